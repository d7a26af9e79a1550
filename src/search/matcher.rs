//! Tiered matching of a query against display names
//!
//! Each query term is tried against a name in decreasing quality:
//! word-prefix occurrence, plain substring, then a nucleo fuzzy alignment with
//! a bounded gap between consecutive hits. A name's tier is the worst tier any
//! of its terms needed; a query equal to the whole name is `Exact`.

use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use smallvec::SmallVec;

use super::tokenize::{fold_char, split_terms, word_starts};
use super::types::{MatchError, MatchTier, RankedMatch};
use crate::config::MatcherConfig;

/// Ranks haystacks against a query. Swappable so the session can be tested
/// without the real engine.
pub trait MatchStrategy {
    /// Return the accepted haystacks, best first. `index` in each result is a
    /// position in `haystacks`. Never called with an all-whitespace query.
    fn rank(&mut self, haystacks: &[&str], query: &str) -> Result<Vec<RankedMatch>, MatchError>;
}

struct Term {
    folded: Vec<char>,
    atom: Atom,
}

impl Term {
    fn new(text: &str) -> Self {
        Self {
            folded: text.chars().map(fold_char).collect(),
            atom: Atom::new(
                text,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
                false,
            ),
        }
    }
}

/// Default [`MatchStrategy`]. Reuses nucleo buffers across calls.
pub struct TieredMatcher {
    config: MatcherConfig,
    matcher: Matcher,
    buf: Vec<char>,
    indices: Vec<u32>,
}

impl Default for TieredMatcher {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

impl TieredMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            config,
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::with_capacity(64),
            indices: Vec::with_capacity(16),
        }
    }

    /// Match a single term; returns its tier and matched char positions.
    fn match_term(
        &mut self,
        haystack: &str,
        folded: &[char],
        starts: &[bool],
        term: &Term,
    ) -> Option<(MatchTier, Vec<usize>)> {
        let n = term.folded.len();
        if n == 0 {
            return Some((MatchTier::WordPrefix, Vec::new()));
        }

        let mut first_substring = None;
        if n <= folded.len() {
            for start in 0..=(folded.len() - n) {
                if folded[start..start + n] == term.folded[..] {
                    if starts[start] {
                        return Some((MatchTier::WordPrefix, (start..start + n).collect()));
                    }
                    first_substring.get_or_insert(start);
                }
            }
        }
        if let Some(start) = first_substring {
            return Some((MatchTier::Substring, (start..start + n).collect()));
        }

        // Utf32Str::new would fold grapheme clusters into one slot; index by char instead
        self.indices.clear();
        let utf32 = if haystack.is_ascii() {
            Utf32Str::Ascii(haystack.as_bytes())
        } else {
            self.buf.clear();
            self.buf.extend(haystack.chars());
            Utf32Str::Unicode(&self.buf)
        };
        term.atom.indices(utf32, &mut self.matcher, &mut self.indices)?;

        let mut hits: Vec<usize> = self.indices.iter().map(|&i| i as usize).collect();
        hits.sort_unstable();
        hits.dedup();
        let max_gap = self.config.max_gap;
        if hits.windows(2).any(|w| w[1] - w[0] - 1 > max_gap) {
            // nucleo picks its best-scoring alignment, which may not be the tightest
            return bounded_subsequence(folded, &term.folded, max_gap)
                .map(|hits| (MatchTier::Fuzzy, hits));
        }
        Some((MatchTier::Fuzzy, hits))
    }

    fn match_one(
        &mut self,
        haystack: &str,
        folded_query: &[char],
        terms: &[Term],
    ) -> Option<(MatchTier, Vec<usize>)> {
        let chars: Vec<char> = haystack.chars().collect();
        let folded: Vec<char> = chars.iter().map(|&c| fold_char(c)).collect();
        if !folded.is_empty() && folded == folded_query {
            return Some((MatchTier::Exact, (0..chars.len()).collect()));
        }

        let starts = word_starts(&chars);
        let mut tier = MatchTier::WordPrefix;
        let mut hits = Vec::new();
        for term in terms {
            let (term_tier, term_hits) = self.match_term(haystack, &folded, &starts, term)?;
            tier = tier.max(term_tier);
            hits.extend(term_hits);
        }
        hits.sort_unstable();
        hits.dedup();
        Some((tier, hits))
    }
}

impl MatchStrategy for TieredMatcher {
    fn rank(&mut self, haystacks: &[&str], query: &str) -> Result<Vec<RankedMatch>, MatchError> {
        let query = query.trim();
        let len = query.chars().count();
        if len > self.config.max_query_chars {
            return Err(MatchError::QueryTooLong {
                len,
                max: self.config.max_query_chars,
            });
        }
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let folded_query: Vec<char> = query.chars().map(fold_char).collect();
        let mut terms: SmallVec<[Term; 4]> =
            split_terms(query).into_iter().map(Term::new).collect();
        if terms.is_empty() {
            // Query made only of separators: match it literally
            terms.push(Term::new(query));
        }

        // (same case as the query, match); only meaningful inside the Exact tier
        let mut matches: Vec<(bool, RankedMatch)> = Vec::new();
        for (index, haystack) in haystacks.iter().enumerate() {
            if let Some((tier, hits)) = self.match_one(haystack, &folded_query, &terms) {
                let span = match (hits.first(), hits.last()) {
                    (Some(first), Some(last)) => last - first + 1,
                    _ => 0,
                };
                let same_case = tier == MatchTier::Exact && *haystack == query;
                matches.push((
                    same_case,
                    RankedMatch {
                        index,
                        tier,
                        span,
                        ranges: char_hits_to_ranges(haystack, &hits),
                    },
                ));
            }
        }

        // Stable: equal tier, case and span keep candidate order
        matches.sort_by(|(a_case, a), (b_case, b)| {
            a.tier
                .cmp(&b.tier)
                .then(b_case.cmp(a_case))
                .then(a.span.cmp(&b.span))
        });
        Ok(matches.into_iter().map(|(_, m)| m).collect())
    }
}

/// Place `term` as a subsequence of `folded` with at most `max_gap` skipped
/// chars between consecutive hits. Returns the earliest-ending placement,
/// packed as tightly as possible towards its end.
fn bounded_subsequence(folded: &[char], term: &[char], max_gap: usize) -> Option<Vec<usize>> {
    let (first, rest) = term.split_first()?;
    // reachable[i][j]: term[..=i] can end with term[i] at folded[j]
    let mut reachable: Vec<Vec<bool>> = Vec::with_capacity(term.len());
    reachable.push(folded.iter().map(|c| c == first).collect());

    for &tc in rest {
        let prev = reachable.last()?;
        let row = (0..folded.len())
            .map(|j| folded[j] == tc && (j.saturating_sub(max_gap + 1)..j).any(|k| prev[k]))
            .collect();
        reachable.push(row);
    }

    let mut pos = reachable.last()?.iter().position(|&r| r)?;
    let mut hits = vec![pos];
    for row in reachable.iter().rev().skip(1) {
        pos = (pos.saturating_sub(max_gap + 1)..pos).rev().find(|&k| row[k])?;
        hits.push(pos);
    }
    hits.reverse();
    Some(hits)
}

/// Collapse sorted char positions into flat byte boundaries
/// `[start0, end0, start1, end1, ...]`, one pair per contiguous run.
pub(crate) fn char_hits_to_ranges(haystack: &str, hits: &[usize]) -> Vec<usize> {
    let offsets: Vec<usize> = haystack
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(haystack.len()))
        .collect();

    let mut ranges = Vec::new();
    let mut iter = hits.iter().copied().peekable();
    while let Some(start) = iter.next() {
        let mut end = start + 1;
        while iter.peek() == Some(&end) {
            iter.next();
            end += 1;
        }
        if let (Some(&from), Some(&to)) = (offsets.get(start), offsets.get(end)) {
            ranges.push(from);
            ranges.push(to);
        }
    }
    ranges
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
