//! CIDR blocks: a network base address plus prefix length.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::{CidrError, ParseError};
use crate::models::addr::{check_prefix, hostmask_bits, netmask_bits};
use crate::models::{Addr, Family};

/// A CIDR block `base/prefix` covering `2^(W - prefix)` addresses.
///
/// The base is always the true network address: construction clears the
/// host bits, so `192.0.2.1/24` and `192.0.2.0/24` are the same block.
/// Ordering is family first, then base, then prefix, which lines blocks
/// up in the order merged output is reported in.
///
/// # Examples
/// ```
/// use cidr_merge::models::CidrBlock;
/// let block: CidrBlock = "192.0.2.1/24".parse().unwrap();
/// assert_eq!(block.to_string(), "192.0.2.0/24");
/// assert_eq!(block.last().to_string(), "192.0.2.255");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CidrBlock {
    base: Addr,
    prefix: u8,
}

impl CidrBlock {
    /// Build a block from any address inside it, normalizing the base to
    /// the network address. Fails with [`CidrError::InvalidPrefixLength`]
    /// when `prefix` exceeds the family width.
    pub fn new(addr: Addr, prefix: u8) -> Result<CidrBlock, CidrError> {
        check_prefix(addr.family(), prefix)?;
        let base = Addr::from_bits(
            addr.family(),
            addr.bits() & netmask_bits(addr.family(), prefix),
        );
        Ok(CidrBlock { base, prefix })
    }

    /// The address family.
    pub fn family(&self) -> Family {
        self.base.family()
    }

    /// Network base address (host bits all zero).
    pub fn base(&self) -> Addr {
        self.base
    }

    /// Prefix length in `[0, W]`.
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Lowest address in the block, identical to [`base`](Self::base).
    pub fn first(&self) -> Addr {
        self.base
    }

    /// Highest address in the block (host bits all one).
    pub fn last(&self) -> Addr {
        Addr::from_bits(
            self.family(),
            self.base.bits() | hostmask_bits(self.family(), self.prefix),
        )
    }

    /// Whether `addr` falls inside this block. Addresses of the other
    /// family are never contained.
    pub fn contains(&self, addr: Addr) -> bool {
        addr.family() == self.family() && self.first() <= addr && addr <= self.last()
    }
}

impl FromStr for CidrBlock {
    type Err = ParseError;

    /// Parse `address/prefix` notation, e.g. `10.0.0.0/8` or `fe80::/64`.
    /// The address may be any host inside the block; the base is
    /// normalized to the network address.
    fn from_str(s: &str) -> Result<CidrBlock, ParseError> {
        let s = s.trim();
        let (addr_part, prefix_part) = s
            .split_once('/')
            .ok_or_else(|| ParseError::InvalidCidr(s.to_string()))?;
        if prefix_part.contains('/') {
            return Err(ParseError::InvalidCidr(s.to_string()));
        }
        let addr: Addr = addr_part.parse()?;
        let prefix: u8 = prefix_part
            .parse()
            .map_err(|_| ParseError::InvalidPrefix(prefix_part.to_string()))?;
        CidrBlock::new(addr, prefix).map_err(|_| ParseError::InvalidPrefix(prefix_part.to_string()))
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix)
    }
}

// Serialize as the CIDR string, so a block round-trips through JSON as
// e.g. "10.0.0.0/8" rather than a struct.
impl Serialize for CidrBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CidrBlock {
    fn deserialize<D>(deserializer: D) -> Result<CidrBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CidrBlockVisitor;

        impl Visitor<'_> for CidrBlockVisitor {
            type Value = CidrBlock;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a CIDR string like \"10.0.0.0/8\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<CidrBlock, E>
            where
                E: de::Error,
            {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(CidrBlockVisitor)
    }
}
