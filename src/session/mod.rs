//! Session module - the picker's single mutable state
//!
//! # Module Structure
//!
//! - `window` - bounded result window and wrap-around cursor
//! - `state` - lifecycle state machine, input handling and commit

mod state;
mod window;

pub use state::{Commit, CommitAction, FetchApplied, FetchTicket, Phase, Session};
pub use window::ResultWindow;
