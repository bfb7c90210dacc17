//! Range-to-CIDR splitting.
//!
//! Decomposes an inclusive address range into the unique minimal sequence
//! of CIDR blocks that covers it exactly, in ascending address order.

use crate::error::CidrError;
use crate::models::{broadcast_addr, Addr, AddressRange, CidrBlock};

/// Split an inclusive range into its minimal exact CIDR cover.
///
/// The result covers every address in `[first, last]` once, contains no
/// address outside it, and no two returned blocks could be replaced by a
/// single larger one.
///
/// # Arguments
/// * `first` - Lowest address of the range
/// * `last` - Highest address of the range
///
/// # Returns
/// * `Ok(Vec<CidrBlock>)` - The cover, in ascending order
///
/// # Examples
/// ```
/// use cidr_merge::processing::split_range;
/// let first = "192.0.2.1".parse().unwrap();
/// let last = "192.0.2.3".parse().unwrap();
/// let blocks = split_range(first, last).unwrap();
/// let rendered: Vec<String> = blocks.iter().map(|b| b.to_string()).collect();
/// assert_eq!(rendered, ["192.0.2.1/32", "192.0.2.2/31"]);
/// ```
pub fn split_range(first: Addr, last: Addr) -> Result<Vec<CidrBlock>, CidrError> {
    let range = AddressRange::new(first, last)?;
    let blocks = split_within(range.family().first_addr(), 0, range.first(), range.last())?;
    log::debug!("split {} into {} block(s)", range, blocks.len());
    Ok(blocks)
}

/// Split `[lo, hi]` against the candidate network `base/prefix`, which
/// must contain it. [`split_range`] calls this with the whole address
/// space (`/0`) as the first candidate; each recursion step either emits
/// the candidate whole or halves it.
///
/// # Arguments
/// * `base` - Network address of the candidate
/// * `prefix` - Prefix length of the candidate
/// * `lo` - Lowest address still to cover
/// * `hi` - Highest address still to cover
///
/// # Returns
/// * `Ok(Vec<CidrBlock>)` - Blocks covering exactly `[lo, hi]`, ascending
pub fn split_within(
    base: Addr,
    prefix: u8,
    lo: Addr,
    hi: Addr,
) -> Result<Vec<CidrBlock>, CidrError> {
    let family = base.family();
    if lo.family() != family {
        return Err(CidrError::MismatchedFamily {
            left: family,
            right: lo.family(),
        });
    }
    if hi.family() != family {
        return Err(CidrError::MismatchedFamily {
            left: family,
            right: hi.family(),
        });
    }
    if hi < lo {
        return Err(CidrError::InvalidRange {
            first: lo,
            last: hi,
        });
    }
    // Validates the prefix length as a side effect.
    let top = broadcast_addr(base, prefix)?;
    if lo < base || hi > top {
        return Err(CidrError::OutOfRangeForCandidate {
            base,
            prefix,
            lo,
            hi,
        });
    }

    // The range fills the candidate exactly: emit it as one block.
    if lo == base && hi == top {
        return Ok(vec![CidrBlock::new(base, prefix)?]);
    }

    // Otherwise halve. A partially covered candidate always has more than
    // one address, so the prefix can grow.
    let next_prefix = prefix + 1;
    assert!(
        next_prefix <= family.width(),
        "prefix[{next_prefix}] > {} should never happen.",
        family.width()
    );
    let upper_base = base.set_bit(family.width() - next_prefix, true);

    if hi < upper_base {
        return split_within(base, next_prefix, lo, hi);
    }
    if lo >= upper_base {
        return split_within(upper_base, next_prefix, lo, hi);
    }

    // The range straddles the midpoint: cover the lower half up to its
    // top, then the upper half from its base. Lower blocks come first.
    let mut blocks = split_within(base, next_prefix, lo, broadcast_addr(base, next_prefix)?)?;
    blocks.extend(split_within(upper_base, next_prefix, upper_base, hi)?);
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Family;

    fn addr(s: &str) -> Addr {
        s.parse().expect("test address")
    }

    fn rendered(blocks: &[CidrBlock]) -> Vec<String> {
        blocks.iter().map(|b| b.to_string()).collect()
    }

    #[test]
    fn test_split_aligned_range_is_one_block() {
        let blocks = split_range(addr("192.0.2.0"), addr("192.0.2.255")).unwrap();
        assert_eq!(rendered(&blocks), ["192.0.2.0/24"]);
    }

    #[test]
    fn test_split_whole_space() {
        let blocks = split_range(addr("0.0.0.0"), addr("255.255.255.255")).unwrap();
        assert_eq!(rendered(&blocks), ["0.0.0.0/0"]);

        let blocks = split_range(
            addr("::"),
            addr("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"),
        )
        .unwrap();
        assert_eq!(rendered(&blocks), ["::/0"]);
    }

    #[test]
    fn test_split_unaligned_range() {
        let blocks = split_range(addr("192.0.2.1"), addr("192.0.2.3")).unwrap();
        assert_eq!(rendered(&blocks), ["192.0.2.1/32", "192.0.2.2/31"]);
    }

    #[test]
    fn test_split_single_address() {
        let blocks = split_range(addr("10.0.0.7"), addr("10.0.0.7")).unwrap();
        assert_eq!(rendered(&blocks), ["10.0.0.7/32"]);

        let blocks = split_range(addr("fe80::1"), addr("fe80::1")).unwrap();
        assert_eq!(rendered(&blocks), ["fe80::1/128"]);
    }

    #[test]
    fn test_split_widest_unaligned_range() {
        // [.1, .254] needs a /32 at each end and widening blocks between
        let blocks = split_range(addr("10.0.0.1"), addr("10.0.0.254")).unwrap();
        assert_eq!(blocks.len(), 14, "Expected 14 blocks for 10.0.0.1-10.0.0.254");
        assert_eq!(blocks[0].to_string(), "10.0.0.1/32");
        assert_eq!(blocks[6].to_string(), "10.0.0.64/26");
        assert_eq!(blocks[7].to_string(), "10.0.0.128/26");
        assert_eq!(blocks[13].to_string(), "10.0.0.254/32");

        // Ascending and contiguous
        for pair in blocks.windows(2) {
            assert_eq!(pair[0].last().next(), Some(pair[1].first()));
        }
    }

    #[test]
    fn test_split_v6_aligned() {
        let blocks = split_range(addr("fe80::"), addr("fe80::ffff:ffff:ffff:ffff")).unwrap();
        assert_eq!(rendered(&blocks), ["fe80::/64"]);
    }

    #[test]
    fn test_split_v6_non_sibling_neighbours() {
        // ::1 and ::2 are adjacent but can never share a /127
        let blocks = split_range(addr("::1"), addr("::2")).unwrap();
        assert_eq!(rendered(&blocks), ["::1/128", "::2/128"]);
    }

    #[test]
    fn test_split_rejects_bad_input() {
        assert!(matches!(
            split_range(addr("10.0.0.9"), addr("10.0.0.1")),
            Err(CidrError::InvalidRange { .. })
        ));
        assert!(matches!(
            split_range(addr("10.0.0.1"), addr("fe80::1")),
            Err(CidrError::MismatchedFamily { .. })
        ));
    }

    #[test]
    fn test_split_within_rejects_escaping_range() {
        let base = addr("192.0.2.0");
        let err = split_within(base, 24, addr("192.0.2.10"), addr("192.0.3.1")).unwrap_err();
        assert!(matches!(err, CidrError::OutOfRangeForCandidate { .. }));

        let err = split_within(base, 24, addr("192.0.1.255"), addr("192.0.2.10")).unwrap_err();
        assert!(matches!(err, CidrError::OutOfRangeForCandidate { .. }));
    }

    #[test]
    fn test_split_within_rejects_bad_prefix() {
        let err = split_within(addr("10.0.0.0"), 33, addr("10.0.0.0"), addr("10.0.0.1")).unwrap_err();
        assert_eq!(
            err,
            CidrError::InvalidPrefixLength {
                family: Family::V4,
                prefix: 33,
            }
        );
    }

    #[test]
    fn test_split_within_narrower_candidate() {
        let blocks = split_within(addr("192.0.2.0"), 24, addr("192.0.2.1"), addr("192.0.2.3"))
            .unwrap();
        assert_eq!(rendered(&blocks), ["192.0.2.1/32", "192.0.2.2/31"]);
    }
}
