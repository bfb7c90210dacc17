//! Address families and fixed-width address values.
//!
//! Provides [`Family`] (IPv4/IPv6) and [`Addr`], an address of exactly W
//! bits held in a `u128`, along with the netmask/hostmask derivations that
//! the splitting and merging passes are built on. One representation serves
//! both families; the family only fixes the width W.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::{CidrError, ParseError};

/// Address family, fixing the bit width W of every address in it.
///
/// Families order `V4` before `V6`, so the narrower address space sorts
/// first wherever blocks of both families appear together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    /// IPv4, W = 32.
    V4,
    /// IPv6, W = 128.
    V6,
}

impl Family {
    /// Address width W in bits.
    pub const fn width(self) -> u8 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }

    /// Lowest address of the family (`0.0.0.0` / `::`).
    pub fn first_addr(self) -> Addr {
        Addr {
            family: self,
            value: 0,
        }
    }

    /// Highest address of the family (`255.255.255.255` / `ffff:…:ffff`).
    pub fn last_addr(self) -> Addr {
        Addr {
            family: self,
            value: self.all_ones(),
        }
    }

    /// Bit pattern with all W address bits set.
    pub(crate) const fn all_ones(self) -> u128 {
        match self {
            Family::V4 => u32::MAX as u128,
            Family::V6 => u128::MAX,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::V4 => write!(f, "IPv4"),
            Family::V6 => write!(f, "IPv6"),
        }
    }
}

/// A single address: an unsigned integer of exactly `family().width()` bits.
///
/// Addresses are immutable values. Ordering is total, family first and
/// then numeric value, which is exactly the family-grouped ordering merged
/// output is reported in. Operations that combine two addresses into one
/// range insist on matching families and fail with
/// [`CidrError::MismatchedFamily`] otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Addr {
    family: Family,
    value: u128,
}

impl Addr {
    /// Build an address from raw bits, discarding bits at or above the
    /// family width.
    pub fn from_bits(family: Family, bits: u128) -> Addr {
        Addr {
            family,
            value: bits & family.all_ones(),
        }
    }

    /// The address family.
    pub const fn family(self) -> Family {
        self.family
    }

    /// Raw value, always `< 2^W`.
    pub const fn bits(self) -> u128 {
        self.value
    }

    /// Value of the bit at `index`, counted from the least-significant bit.
    /// Indexes at or above the family width read as zero.
    pub fn bit(self, index: u8) -> bool {
        if index >= self.family.width() {
            return false;
        }
        (self.value >> index) & 1 == 1
    }

    /// Copy of the address with the bit at `index` (counted from the
    /// least-significant bit) set to `value`. Indexes at or above the
    /// family width leave the address unchanged.
    pub fn set_bit(self, index: u8, value: bool) -> Addr {
        if index >= self.family.width() {
            return self;
        }
        let mask = 1u128 << index;
        let bits = if value {
            self.value | mask
        } else {
            self.value & !mask
        };
        Addr {
            family: self.family,
            value: bits,
        }
    }

    /// The next address up, or `None` at the top of the family.
    pub fn next(self) -> Option<Addr> {
        if self.value == self.family.all_ones() {
            None
        } else {
            Some(Addr {
                family: self.family,
                value: self.value + 1,
            })
        }
    }

    /// Convert to a standard library IP address.
    pub fn to_ip(self) -> IpAddr {
        match self.family {
            Family::V4 => IpAddr::V4(Ipv4Addr::from(self.value as u32)),
            Family::V6 => IpAddr::V6(Ipv6Addr::from(self.value)),
        }
    }
}

impl From<Ipv4Addr> for Addr {
    fn from(ip: Ipv4Addr) -> Addr {
        Addr {
            family: Family::V4,
            value: u32::from(ip) as u128,
        }
    }
}

impl From<Ipv6Addr> for Addr {
    fn from(ip: Ipv6Addr) -> Addr {
        Addr {
            family: Family::V6,
            value: u128::from(ip),
        }
    }
}

impl From<IpAddr> for Addr {
    fn from(ip: IpAddr) -> Addr {
        match ip {
            IpAddr::V4(ip) => Addr::from(ip),
            IpAddr::V6(ip) => Addr::from(ip),
        }
    }
}

impl FromStr for Addr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Addr, ParseError> {
        let ip: IpAddr = s
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidAddress(s.to_string()))?;
        Ok(Addr::from(ip))
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ip())
    }
}

/// Netmask for `prefix`: the top `prefix` bits set, host bits clear.
///
/// # Examples
/// ```
/// use cidr_merge::models::{netmask, Family};
/// assert_eq!(netmask(Family::V4, 24).unwrap().to_string(), "255.255.255.0");
/// ```
pub fn netmask(family: Family, prefix: u8) -> Result<Addr, CidrError> {
    check_prefix(family, prefix)?;
    Ok(Addr::from_bits(family, netmask_bits(family, prefix)))
}

/// Hostmask for `prefix`: the bitwise complement of the netmask.
pub fn hostmask(family: Family, prefix: u8) -> Result<Addr, CidrError> {
    check_prefix(family, prefix)?;
    Ok(Addr::from_bits(family, hostmask_bits(family, prefix)))
}

/// Highest address of the network `addr` belongs to under `prefix`.
pub fn broadcast_addr(addr: Addr, prefix: u8) -> Result<Addr, CidrError> {
    check_prefix(addr.family(), prefix)?;
    Ok(Addr::from_bits(
        addr.family(),
        addr.bits() | hostmask_bits(addr.family(), prefix),
    ))
}

/// Lowest address of the network `addr` belongs to under `prefix`.
pub fn network_addr(addr: Addr, prefix: u8) -> Result<Addr, CidrError> {
    check_prefix(addr.family(), prefix)?;
    Ok(Addr::from_bits(
        addr.family(),
        addr.bits() & netmask_bits(addr.family(), prefix),
    ))
}

pub(crate) fn check_prefix(family: Family, prefix: u8) -> Result<(), CidrError> {
    if prefix > family.width() {
        Err(CidrError::InvalidPrefixLength { family, prefix })
    } else {
        Ok(())
    }
}

pub(crate) fn hostmask_bits(family: Family, prefix: u8) -> u128 {
    let host_bits = family.width().saturating_sub(prefix);
    if host_bits == 0 {
        0
    } else if host_bits >= 128 {
        u128::MAX
    } else {
        (1u128 << host_bits) - 1
    }
}

pub(crate) fn netmask_bits(family: Family, prefix: u8) -> u128 {
    family.all_ones() & !hostmask_bits(family, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v4(s: &str) -> Addr {
        s.parse().expect("test address")
    }

    fn v6(s: &str) -> Addr {
        s.parse().expect("test address")
    }

    #[test]
    fn test_netmask_v4() {
        assert_eq!(netmask(Family::V4, 0).unwrap().to_string(), "0.0.0.0");
        assert_eq!(netmask(Family::V4, 8).unwrap().bits(), 0xFF000000);
        assert_eq!(netmask(Family::V4, 22).unwrap().to_string(), "255.255.252.0");
        assert_eq!(netmask(Family::V4, 24).unwrap().to_string(), "255.255.255.0");
        assert_eq!(
            netmask(Family::V4, 32).unwrap().to_string(),
            "255.255.255.255"
        );
        assert!(netmask(Family::V4, 33).is_err());
    }

    #[test]
    fn test_hostmask_v4() {
        assert_eq!(
            hostmask(Family::V4, 0).unwrap().to_string(),
            "255.255.255.255"
        );
        assert_eq!(hostmask(Family::V4, 22).unwrap().to_string(), "0.0.3.255");
        assert_eq!(hostmask(Family::V4, 24).unwrap().to_string(), "0.0.0.255");
        assert_eq!(hostmask(Family::V4, 32).unwrap().to_string(), "0.0.0.0");
    }

    #[test]
    fn test_broadcast_and_network_v4() {
        assert_eq!(
            broadcast_addr(v4("192.0.2.0"), 24).unwrap(),
            v4("192.0.2.255")
        );
        assert_eq!(
            network_addr(v4("192.0.2.77"), 24).unwrap(),
            v4("192.0.2.0")
        );
        // /22 straddles the third octet
        assert_eq!(
            broadcast_addr(v4("192.0.3.112"), 22).unwrap(),
            v4("192.0.3.255")
        );
        assert_eq!(
            network_addr(v4("192.0.3.112"), 22).unwrap(),
            v4("192.0.0.0")
        );
        // /32 is the address itself
        assert_eq!(
            broadcast_addr(v4("192.168.1.151"), 32).unwrap(),
            v4("192.168.1.151")
        );
        assert_eq!(
            network_addr(v4("192.168.1.151"), 32).unwrap(),
            v4("192.168.1.151")
        );
        // /0 spans the whole space
        assert_eq!(
            broadcast_addr(v4("10.1.2.3"), 0).unwrap(),
            v4("255.255.255.255")
        );
        assert_eq!(network_addr(v4("10.1.2.3"), 0).unwrap(), v4("0.0.0.0"));
    }

    #[test]
    fn test_masks_v6() {
        assert_eq!(netmask(Family::V6, 0).unwrap().to_string(), "::");
        assert_eq!(
            hostmask(Family::V6, 0).unwrap().to_string(),
            "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"
        );
        assert_eq!(
            netmask(Family::V6, 64).unwrap().to_string(),
            "ffff:ffff:ffff:ffff::"
        );
        assert_eq!(
            hostmask(Family::V6, 64).unwrap().to_string(),
            "::ffff:ffff:ffff:ffff"
        );
        assert_eq!(hostmask(Family::V6, 128).unwrap().to_string(), "::");
        assert!(netmask(Family::V6, 129).is_err());
    }

    #[test]
    fn test_broadcast_and_network_v6() {
        assert_eq!(
            broadcast_addr(v6("fe80::dead:beef"), 64).unwrap(),
            v6("fe80::ffff:ffff:ffff:ffff")
        );
        assert_eq!(network_addr(v6("fe80::dead:beef"), 64).unwrap(), v6("fe80::"));
    }

    #[test]
    fn test_ordering_family_first() {
        assert!(v4("255.255.255.255") < v6("::"));
        assert!(v4("10.0.0.1") < v4("10.0.0.2"));
        assert!(v6("::1") < v6("::2"));
    }

    #[test]
    fn test_family_extremes() {
        assert_eq!(Family::V4.first_addr(), v4("0.0.0.0"));
        assert_eq!(Family::V4.last_addr(), v4("255.255.255.255"));
        assert_eq!(Family::V6.first_addr(), v6("::"));
        assert_eq!(
            Family::V6.last_addr(),
            v6("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff")
        );
    }

    #[test]
    fn test_next() {
        assert_eq!(v4("10.0.0.1").next(), Some(v4("10.0.0.2")));
        assert_eq!(v4("10.0.0.255").next(), Some(v4("10.0.1.0")));
        assert_eq!(v4("255.255.255.255").next(), None);
        assert_eq!(v6("::ffff").next(), Some(v6("::1:0")));
        assert_eq!(v6("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff").next(), None);
    }

    #[test]
    fn test_bit_access() {
        let addr = v4("0.0.0.1");
        assert!(addr.bit(0));
        assert!(!addr.bit(1));
        assert_eq!(addr.set_bit(31, true), v4("128.0.0.1"));
        assert_eq!(addr.set_bit(0, false), v4("0.0.0.0"));
        // out-of-width indexes are inert
        assert_eq!(addr.set_bit(32, true), addr);
        assert!(!addr.bit(32));
    }

    #[test]
    fn test_from_bits_masks_excess() {
        let addr = Addr::from_bits(Family::V4, u128::MAX);
        assert_eq!(addr, v4("255.255.255.255"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-an-ip".parse::<Addr>().is_err());
        assert!("10.0.0.256".parse::<Addr>().is_err());
        assert_eq!("  10.0.0.1 ".parse::<Addr>().unwrap(), v4("10.0.0.1"));
    }
}
