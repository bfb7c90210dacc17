//! Error types for CIDR arithmetic and textual parsing.
//!
//! The core operations only ever fail on validation: every error here is a
//! plain description of a rejected input, never a transient condition worth
//! retrying.

use crate::models::{Addr, Family};
use thiserror::Error;

/// Errors produced by the numeric core (splitting and merging).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CidrError {
    /// Prefix length outside `[0, W]` for the address family.
    #[error("invalid prefix length /{prefix} for {family}")]
    InvalidPrefixLength { family: Family, prefix: u8 },

    /// The target span does not lie within the candidate network. Reaching
    /// this through the public merge/split entry points indicates a caller
    /// bug, not bad user input.
    #[error("{lo}-{hi} out of range for candidate network {base}/{prefix}")]
    OutOfRangeForCandidate {
        base: Addr,
        prefix: u8,
        lo: Addr,
        hi: Addr,
    },

    /// Addresses of different families combined in one range operation.
    #[error("mismatched address families {left} and {right}")]
    MismatchedFamily { left: Family, right: Family },

    /// A range whose last address is below its first.
    #[error("invalid range: {last} is below {first}")]
    InvalidRange { first: Addr, last: Addr },
}

/// Errors produced by the textual layer before input reaches the core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not of the form `address/prefix`.
    #[error("invalid CIDR format: {0}")]
    InvalidCidr(String),

    /// Address part does not parse as IPv4 or IPv6.
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// Prefix part is not a number in `[0, W]`.
    #[error("invalid prefix length: {0}")]
    InvalidPrefix(String),
}
