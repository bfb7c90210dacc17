// cargo watch -x 'fmt' -x 'run'  // 'run -- --some-arg'

//! Merge CIDR blocks and split IP address ranges into exact CIDR covers,
//! for IPv4 and IPv6.
//!
//! The typed API lives in [`models`] and [`processing`]; the string-level
//! helpers below parse, process and render in one call.
//!
//! ```
//! use cidr_merge::merge_cidrs;
//! let merged = merge_cidrs(&["192.0.2.0/25", "192.0.2.128/25"]).unwrap();
//! assert_eq!(merged, ["192.0.2.0/24"]);
//! ```

pub mod cli;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

use std::error::Error;

// Re-export the types most callers need
pub use error::{CidrError, ParseError};
pub use models::{Addr, AddressRange, CidrBlock, Family};
pub use processing::{merge_blocks, merge_ranges, split_range, split_within};

/// Merge CIDR strings into the smallest equivalent list of CIDR strings.
///
/// # Arguments
/// * `cidrs` - CIDR notation inputs, IPv4 and IPv6 freely mixed
///
/// # Returns
/// * `Ok(Vec<String>)` - Merged CIDRs, IPv4 first, ascending per family
pub fn merge_cidrs(cidrs: &[&str]) -> Result<Vec<String>, Box<dyn Error>> {
    let mut blocks = Vec::with_capacity(cidrs.len());
    for cidr in cidrs {
        blocks.push(cidr.parse::<CidrBlock>()?);
    }
    let merged = merge_blocks(&blocks)?;
    Ok(merged.iter().map(|block| block.to_string()).collect())
}

/// Split the inclusive range `first..=last` into the CIDR strings that
/// cover it exactly.
///
/// # Arguments
/// * `first` - Lowest address of the range
/// * `last` - Highest address of the range, same family as `first`
///
/// # Returns
/// * `Ok(Vec<String>)` - The minimal cover in ascending order
pub fn range_to_cidrs(first: &str, last: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let first: Addr = first.parse()?;
    let last: Addr = last.parse()?;
    let blocks = split_range(first, last)?;
    Ok(blocks.iter().map(|block| block.to_string()).collect())
}
