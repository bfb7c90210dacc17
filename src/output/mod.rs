//! Output formatting for merged blocks.
//!
//! This module handles rendering merge results:
//! - [`terminal`] - Plain text, one CIDR per line
//! - [`json`] - JSON array of CIDR strings

mod json;
mod terminal;

pub use json::format_blocks_json;
pub use terminal::format_blocks;
