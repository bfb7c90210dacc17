//! Inclusive address ranges, the span form that blocks split from and
//! merge back into.

use std::fmt;

use crate::error::CidrError;
use crate::models::{Addr, CidrBlock, Family};

/// An inclusive span `[first, last]` of addresses within one family.
///
/// Unlike a [`CidrBlock`] a range carries no alignment requirement; any
/// ordered pair of same-family addresses is a valid range. A single
/// address is the range where `first == last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange {
    first: Addr,
    last: Addr,
}

impl AddressRange {
    /// Build a range, rejecting mixed families and reversed endpoints.
    pub fn new(first: Addr, last: Addr) -> Result<AddressRange, CidrError> {
        if first.family() != last.family() {
            return Err(CidrError::MismatchedFamily {
                left: first.family(),
                right: last.family(),
            });
        }
        if last < first {
            return Err(CidrError::InvalidRange { first, last });
        }
        Ok(AddressRange { first, last })
    }

    /// The address family.
    pub fn family(&self) -> Family {
        self.first.family()
    }

    /// Lowest address in the range.
    pub fn first(&self) -> Addr {
        self.first
    }

    /// Highest address in the range.
    pub fn last(&self) -> Addr {
        self.last
    }
}

impl From<CidrBlock> for AddressRange {
    /// Every block is a range; the inverse direction needs the splitter.
    fn from(block: CidrBlock) -> AddressRange {
        AddressRange {
            first: block.first(),
            last: block.last(),
        }
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}
