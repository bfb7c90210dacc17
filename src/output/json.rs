//! JSON output formatting for merged blocks.

use crate::models::CidrBlock;

/// Render blocks as a pretty-printed JSON array of CIDR strings.
///
/// # Arguments
/// * `blocks` - The blocks to render, already in output order
///
/// # Returns
/// * `Ok(String)` - e.g. `["10.0.0.0/8", "fe80::/64"]` across lines
pub fn format_blocks_json(blocks: &[CidrBlock]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(blocks)
}
