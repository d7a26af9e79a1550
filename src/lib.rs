//! Assets Plus - search-and-rank core of an in-editor asset picker
//!
//! Turns a workspace's flat file listing into display-ready items, narrows
//! them by category and fuzzy query, and keeps a cursor over a bounded result
//! window. Rendering and document insertion are left to the host.

pub mod assets;
pub mod config;
pub mod error;
pub mod logging;
pub mod search;
pub mod session;
pub mod source;
pub mod stdin_commands;

pub use assets::{Category, Direction, Item, RawFile};
pub use error::{AssetsPlusError, Result};
pub use search::{MatchResult, MatchStrategy, TieredMatcher};
pub use session::{Commit, CommitAction, Phase, Session};
