//! Search module - query matching and highlight ranges
//!
//! # Module Structure
//!
//! - `tokenize` - Unicode word splitting (inter- and intra-word boundaries)
//! - `matcher` - `MatchStrategy` trait and the default tiered matcher
//! - `types` - MatchResult, MatchTier, RankedMatch, MatchError
//! - `highlight` - plain/matched segmentation of display names

mod highlight;
mod matcher;
mod tokenize;
mod types;

use std::sync::Arc;

use crate::assets::Item;

pub use highlight::{highlight_segments, matched_spans, Segment};
pub use matcher::{MatchStrategy, TieredMatcher};
pub use tokenize::{is_word_char, split_terms, split_words, word_starts};
pub use types::{MatchError, MatchResult, MatchTier, RankedMatch};

/// Match `query` against the names of `candidates` and return at most
/// `limit` results, best first.
///
/// An empty or all-whitespace query passes the first `limit` candidates
/// through unranked, without ranges.
pub fn find_matches(
    strategy: &mut dyn MatchStrategy,
    candidates: &[Arc<Item>],
    query: &str,
    limit: usize,
) -> Result<Vec<MatchResult>, MatchError> {
    if query.trim().is_empty() {
        return Ok(candidates
            .iter()
            .take(limit)
            .map(|item| MatchResult::unranked(Arc::clone(item)))
            .collect());
    }

    let names: Vec<&str> = candidates.iter().map(|item| item.name.as_str()).collect();
    let ranked = strategy.rank(&names, query)?;

    Ok(ranked
        .into_iter()
        .filter_map(|m| {
            candidates.get(m.index).map(|item| MatchResult {
                item: Arc::clone(item),
                ranges: m.ranges,
                tier: Some(m.tier),
            })
        })
        .take(limit)
        .collect())
}
