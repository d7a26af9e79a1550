//! Picker session state machine
//!
//! Closed -> Opening -> Loading -> Ready -> Closed. Query edits, category
//! changes and cursor moves are only applied in `Ready`; anything arriving
//! earlier is discarded. Every open bumps a generation counter so a fetch
//! started by an earlier open can never populate a newer session.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::window::ResultWindow;
use crate::assets::{
    make_asset_link, normalize_all, open_external_url, Category, CategoryTable, Direction, Item,
    RawFile,
};
use crate::config::{Capabilities, PickerConfig};
use crate::error::Result;
use crate::search::{MatchResult, MatchStrategy, TieredMatcher};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Closed,
    Opening,
    Loading,
    Ready,
}

/// Identifies the open that started a fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchApplied {
    /// The listing became the session's source
    Loaded { items: usize },
    /// The ticket belongs to a closed or superseded session; result dropped
    Stale,
}

/// What the host should do with a committed item
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitAction {
    /// Insert a reference at the editing cursor. `None` when the item has no
    /// assets-relative path to link to.
    InsertLink(Option<String>),
    /// Open the file with the system handler (full-features mode)
    OpenExternal(String),
}

#[derive(Clone, Debug)]
pub struct Commit {
    pub item: Arc<Item>,
    pub action: CommitAction,
}

pub struct Session<S: MatchStrategy = TieredMatcher> {
    capabilities: Capabilities,
    table: CategoryTable,
    strategy: S,
    phase: Phase,
    generation: u64,
    query: String,
    category: Category,
    source: Vec<Arc<Item>>,
    window: ResultWindow,
}

impl Session<TieredMatcher> {
    pub fn new(config: &PickerConfig) -> Self {
        Self::with_strategy(config, TieredMatcher::new(config.matcher))
    }
}

impl<S: MatchStrategy> Session<S> {
    pub fn with_strategy(config: &PickerConfig, strategy: S) -> Self {
        Self {
            capabilities: config.capabilities.clone(),
            table: CategoryTable::from_config(config),
            strategy,
            phase: Phase::Closed,
            generation: 0,
            query: String::new(),
            category: Category::All,
            source: Vec::new(),
            window: ResultWindow::new(config.get_window_size()),
        }
    }

    // ============================================
    // LIFECYCLE
    // ============================================

    /// Closed -> Opening. Returns false (and does nothing) if already open.
    pub fn request_open(&mut self) -> bool {
        if self.phase != Phase::Closed {
            debug!(phase = ?self.phase, "Open requested while already open, ignoring");
            return false;
        }
        self.generation += 1;
        self.phase = Phase::Opening;
        self.query.clear();
        self.category = Category::All;
        self.source.clear();
        self.window.clear();
        info!(
            event_type = "session",
            action = "opening",
            generation = self.generation,
            "Picker opening"
        );
        true
    }

    /// Opening -> Loading. The returned ticket must accompany the listing.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.phase != Phase::Opening {
            return None;
        }
        self.phase = Phase::Loading;
        Some(FetchTicket {
            generation: self.generation,
        })
    }

    /// Request an open and start its fetch in one step.
    pub fn open(&mut self) -> Option<FetchTicket> {
        if self.request_open() {
            self.begin_fetch()
        } else {
            None
        }
    }

    /// Apply the outcome of a fetch. Loading -> Ready.
    ///
    /// A failed listing still moves the session to an empty `Ready` and the
    /// error is returned for a non-fatal notice.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        listing: Result<Vec<RawFile>>,
    ) -> Result<FetchApplied> {
        if self.phase != Phase::Loading || ticket.generation != self.generation {
            debug!(
                ticket_generation = ticket.generation,
                generation = self.generation,
                phase = ?self.phase,
                "Discarding stale fetch result"
            );
            return Ok(FetchApplied::Stale);
        }

        self.phase = Phase::Ready;
        match listing {
            Ok(raws) => {
                let raw_count = raws.len();
                self.source = normalize_all(raws, &self.table);
                info!(
                    event_type = "session",
                    action = "ready",
                    raw_count,
                    items = self.source.len(),
                    "Assets loaded"
                );
                self.recompute();
                Ok(FetchApplied::Loaded {
                    items: self.source.len(),
                })
            }
            Err(e) => {
                warn!(event_type = "fetch_failure", error = %e, "Listing assets failed");
                self.source.clear();
                self.recompute();
                Err(e)
            }
        }
    }

    /// Replace the source list while Ready (host-side refresh).
    pub fn refresh_source(&mut self, raws: Vec<RawFile>) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.source = normalize_all(raws, &self.table);
        self.recompute();
        true
    }

    /// Close from any phase. Any fetch still in flight becomes stale.
    pub fn close(&mut self) {
        if self.phase == Phase::Closed {
            return;
        }
        self.phase = Phase::Closed;
        self.query.clear();
        self.category = Category::All;
        self.source.clear();
        self.window.clear();
        info!(event_type = "session", action = "closed", "Picker closed");
    }

    /// Escape: clears a non-empty query first, closes otherwise.
    pub fn dismiss(&mut self) {
        if self.is_ready() && !self.query.is_empty() {
            self.set_query("");
        } else {
            self.close();
        }
    }

    // ============================================
    // INPUT
    // ============================================

    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        if !self.accepts_input("set_query") {
            return false;
        }
        self.query = query.into();
        self.recompute();
        true
    }

    pub fn set_category(&mut self, category: Category) -> bool {
        if !self.accepts_input("set_category") {
            return false;
        }
        self.category = category;
        self.recompute();
        true
    }

    pub fn cycle_category(&mut self, direction: Direction) -> bool {
        if !self.accepts_input("cycle_category") {
            return false;
        }
        self.category = self.table.cycle(self.category, direction);
        self.recompute();
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        if !self.accepts_input("move_cursor") {
            return false;
        }
        self.window.advance(direction);
        true
    }

    /// Commit the active result. Returns `None` when not Ready or nothing is
    /// shown. Inserting a link closes the session; opening externally keeps
    /// it open.
    pub fn commit(&mut self) -> Option<Commit> {
        if !self.accepts_input("commit") {
            return None;
        }
        let item = self.active_item()?;

        if self.capabilities.full_features {
            let url = open_external_url(&item);
            info!(
                event_type = "commit",
                action = "open_external",
                path = %item.path,
                "Opening asset"
            );
            return Some(Commit {
                item,
                action: CommitAction::OpenExternal(url),
            });
        }

        let link = make_asset_link(&item);
        if link.is_none() {
            warn!(path = %item.path, "Committed asset is outside the assets directory");
        }
        info!(
            event_type = "commit",
            action = "insert_link",
            path = %item.path,
            "Inserting asset link"
        );
        self.close();
        Some(Commit {
            item,
            action: CommitAction::InsertLink(link),
        })
    }

    // ============================================
    // ACCESSORS
    // ============================================

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Shows the loading indicator
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Opening | Phase::Loading)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn active_category(&self) -> Category {
        self.category
    }

    pub fn tabs(&self) -> &[Category] {
        self.table.tabs()
    }

    pub fn displayed_results(&self) -> &[MatchResult] {
        self.window.results()
    }

    pub fn cursor(&self) -> usize {
        self.window.cursor()
    }

    pub fn active_item(&self) -> Option<Arc<Item>> {
        self.window.active().map(|r| Arc::clone(&r.item))
    }

    /// Number of items in the source list (the count on the `All` tab)
    pub fn total_count(&self) -> usize {
        self.source.len()
    }

    fn accepts_input(&self, action: &str) -> bool {
        if self.is_ready() {
            return true;
        }
        debug!(action, phase = ?self.phase, "Input outside Ready phase discarded");
        false
    }

    fn recompute(&mut self) {
        self.window.recompute(
            &mut self.strategy,
            &self.table,
            &self.source,
            &self.query,
            self.category,
        );
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
