//! CIDR processing logic.
//!
//! This module contains the two core passes over address data:
//! - [`split`] - Decomposing address ranges into exact CIDR covers
//! - [`merge`] - Collapsing block and range collections into minimal sets

mod merge;
mod split;

// Re-export public functions
pub use merge::{merge_blocks, merge_ranges};
pub use split::{split_range, split_within};
