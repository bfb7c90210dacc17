//! Terminal output utilities.
//!
//! Renders merged blocks as plain text, one CIDR per line.

use itertools::Itertools;

use crate::models::CidrBlock;

/// Format blocks for the terminal, one `address/prefix` per line.
///
/// # Arguments
/// * `blocks` - The blocks to render, already in output order
///
/// # Returns
/// The rendered lines without a trailing newline; empty input renders as
/// an empty string
pub fn format_blocks(blocks: &[CidrBlock]) -> String {
    blocks.iter().join("\n")
}
