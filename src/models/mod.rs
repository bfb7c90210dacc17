//! Domain models for CIDR arithmetic.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`Family`] and [`Addr`] - address families and fixed-width addresses
//! - [`CidrBlock`] - a network base plus prefix length
//! - [`AddressRange`] - an inclusive, unaligned address span

mod addr;
mod block;
mod range;

// Re-export public types
pub use addr::{broadcast_addr, hostmask, netmask, network_addr, Addr, Family};
pub use block::CidrBlock;
pub use range::AddressRange;
