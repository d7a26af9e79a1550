//! Search result types

use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::highlight::{highlight_segments, matched_spans, Segment};
use crate::assets::Item;

/// Match quality, best first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Query equals the whole name (ignoring case)
    Exact,
    /// Every term starts at the name's start or at a word boundary
    WordPrefix,
    /// Every term occurs contiguously somewhere in the name
    Substring,
    /// At least one term only matches as a gapped subsequence
    Fuzzy,
}

/// One candidate accepted by a [`super::MatchStrategy`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedMatch {
    /// Position in the haystack slice passed to the strategy
    pub index: usize,
    pub tier: MatchTier,
    /// Characters from the first to the last matched character, inclusive
    pub span: usize,
    /// Flat highlight boundaries, see [`MatchResult::ranges`]
    pub ranges: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("query is {len} characters long, the limit is {max}")]
    QueryTooLong { len: usize, max: usize },

    #[error("match engine failure: {0}")]
    Engine(String),
}

/// An item in the displayed result set.
#[derive(Clone, Debug)]
pub struct MatchResult {
    pub item: Arc<Item>,
    /// Byte offsets into `item.name`: `[start0, end0, start1, end1, ...]`.
    /// Text before `start0`, between `endN` and `startN+1`, and after the last
    /// offset is plain; each `startN..endN` is matched. Empty for an empty query.
    pub ranges: Vec<usize>,
    /// `None` for pass-through results of an empty query
    pub tier: Option<MatchTier>,
}

impl MatchResult {
    pub fn unranked(item: Arc<Item>) -> Self {
        Self {
            item,
            ranges: Vec::new(),
            tier: None,
        }
    }

    /// Matched byte ranges of the display name
    pub fn matched_spans(&self) -> Vec<Range<usize>> {
        matched_spans(&self.ranges)
    }

    /// Alternating plain/matched pieces of the display name
    pub fn segments(&self) -> Vec<Segment<'_>> {
        highlight_segments(&self.item.name, &self.ranges)
    }
}
