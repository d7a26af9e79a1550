//! Bounded result window with a wrap-around cursor

use std::sync::Arc;

use tracing::{debug, warn};

use crate::assets::{Category, CategoryTable, Direction, Item};
use crate::search::{find_matches, MatchResult, MatchStrategy};

/// The displayed results and the cursor over them.
///
/// Invariant: when `results` is non-empty, `cursor < results.len()`;
/// otherwise `cursor == 0`.
#[derive(Debug, Clone)]
pub struct ResultWindow {
    capacity: usize,
    results: Vec<MatchResult>,
    cursor: usize,
}

impl ResultWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            results: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Rebuild the displayed results and reset the cursor.
    ///
    /// A matcher failure is logged and shows as zero results.
    pub fn recompute(
        &mut self,
        strategy: &mut dyn MatchStrategy,
        table: &CategoryTable,
        source: &[Arc<Item>],
        query: &str,
        category: Category,
    ) {
        let candidates = table.filter(source, category);
        self.results = match find_matches(strategy, &candidates, query, self.capacity) {
            Ok(results) => results,
            Err(e) => {
                warn!(
                    event_type = "match_engine_failure",
                    error = %e,
                    query_chars = query.chars().count(),
                    "Matcher failed, showing no results"
                );
                Vec::new()
            }
        };
        self.cursor = 0;

        debug!(
            event_type = "recompute",
            category = %category,
            candidates = candidates.len(),
            shown = self.results.len(),
            "Result window recomputed"
        );
    }

    pub fn clear(&mut self) {
        self.results.clear();
        self.cursor = 0;
    }

    /// Move the cursor one step, wrapping at both ends. No-op when empty.
    pub fn advance(&mut self, direction: Direction) {
        let len = self.results.len();
        if len == 0 {
            return;
        }
        self.cursor = match direction {
            Direction::Next => (self.cursor + 1) % len,
            Direction::Prev => (self.cursor + len - 1) % len,
        };
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn active(&self) -> Option<&MatchResult> {
        self.results.get(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
