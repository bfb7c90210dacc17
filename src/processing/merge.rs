//! CIDR merging.
//!
//! Collapses a collection of blocks or ranges into the smallest equivalent
//! list of CIDR blocks, merging duplicates, contained blocks and adjacent
//! neighbours.

use crate::error::CidrError;
use crate::models::{Addr, AddressRange, CidrBlock, Family};
use crate::processing::split::split_range;

/// One span under merging. `original` holds the input block for as long
/// as the span is untouched; coalescing clears it, and only cleared spans
/// are re-split on output.
#[derive(Debug, Clone, Copy)]
struct Interval {
    first: Addr,
    last: Addr,
    original: Option<CidrBlock>,
}

impl Interval {
    fn family(&self) -> Family {
        self.first.family()
    }
}

/// Merge CIDR blocks into the smallest equivalent set.
///
/// Duplicates collapse, blocks contained in others disappear, and
/// adjacent blocks combine where a larger block can represent them.
/// Blocks left untouched by coalescing come back verbatim. Both families
/// may be mixed freely; the result lists IPv4 blocks first, ascending
/// within each family.
///
/// # Arguments
/// * `blocks` - The blocks to merge, in any order
///
/// # Returns
/// * `Ok(Vec<CidrBlock>)` - The merged set, family-grouped and ascending
///
/// # Examples
/// ```
/// use cidr_merge::models::CidrBlock;
/// use cidr_merge::processing::merge_blocks;
/// let blocks: Vec<CidrBlock> = ["192.0.2.0/25", "192.0.2.128/25"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// let merged = merge_blocks(&blocks).unwrap();
/// assert_eq!(merged[0].to_string(), "192.0.2.0/24");
/// ```
pub fn merge_blocks(blocks: &[CidrBlock]) -> Result<Vec<CidrBlock>, CidrError> {
    let intervals = blocks
        .iter()
        .map(|block| Interval {
            first: block.first(),
            last: block.last(),
            original: Some(*block),
        })
        .collect();
    let merged = coalesce(intervals)?;
    log::debug!("merged {} block(s) into {}", blocks.len(), merged.len());
    Ok(merged)
}

/// Merge inclusive address ranges into the smallest covering set of CIDR
/// blocks. Unlike [`merge_blocks`] every range is re-split, whether or not
/// coalescing touched it, since an arbitrary range need not be a block.
///
/// # Arguments
/// * `ranges` - The ranges to merge, in any order
///
/// # Returns
/// * `Ok(Vec<CidrBlock>)` - The merged cover, family-grouped and ascending
pub fn merge_ranges(ranges: &[AddressRange]) -> Result<Vec<CidrBlock>, CidrError> {
    let intervals = ranges
        .iter()
        .map(|range| Interval {
            first: range.first(),
            last: range.last(),
            original: None,
        })
        .collect();
    let merged = coalesce(intervals)?;
    log::debug!("merged {} range(s) into {} block(s)", ranges.len(), merged.len());
    Ok(merged)
}

/// One backward coalescing pass over the sorted intervals, then output.
///
/// Sorting is by family (IPv4 first), then last address, then first.
/// Walking from the end, an interval that overlaps or directly abuts its
/// left neighbour is absorbed into it; absorbed slots empty out. Walking
/// backward lets an interval that swallows several predecessors carry its
/// accumulated span leftward in a single pass.
fn coalesce(mut intervals: Vec<Interval>) -> Result<Vec<CidrBlock>, CidrError> {
    if intervals.is_empty() {
        return Ok(Vec::new());
    }

    intervals.sort_by(|a, b| {
        a.family()
            .cmp(&b.family())
            .then_with(|| a.last.cmp(&b.last))
            .then_with(|| a.first.cmp(&b.first))
    });

    let mut slots: Vec<Option<Interval>> = intervals.into_iter().map(Some).collect();
    for i in (1..slots.len()).rev() {
        let (Some(prev), Some(cur)) = (slots[i - 1], slots[i]) else {
            continue;
        };
        if prev.family() != cur.family() {
            continue;
        }
        // Adjacency counts as touching; next() is None at the top of the
        // family, so the test cannot wrap around.
        let touches = cur.first <= prev.last || prev.last.next() == Some(cur.first);
        if !touches {
            continue;
        }
        // Sorted by last, so cur.last is the larger of the two.
        slots[i - 1] = Some(Interval {
            first: prev.first.min(cur.first),
            last: cur.last,
            original: None,
        });
        slots[i] = None;
    }

    let mut merged = Vec::new();
    for interval in slots.into_iter().flatten() {
        match interval.original {
            // Untouched input block, pass it through as-is.
            Some(block) => merged.push(block),
            None => merged.extend(split_range(interval.first, interval.last)?),
        }
    }
    Ok(merged)
}
