//! External control of a picker session via stdin.
//!
//! Primarily used for testing and automation of hosts that embed the picker.
//!
//! # Protocol
//!
//! Commands are sent as JSON objects, one per line (JSONL format):
//!
//! ```json
//! {"type": "open"}
//! {"type": "setFilter", "text": "photo"}
//! {"type": "setCategory", "category": "images"}
//! {"type": "cycleCategory", "direction": "prev"}
//! {"type": "move", "direction": "next"}
//! {"type": "commit"}
//! {"type": "dismiss"}
//! {"type": "close"}
//! ```

use tracing::{debug, info, warn};

use crate::assets::{Category, Direction, RawFile};
use crate::search::MatchStrategy;
use crate::session::{Commit, FetchTicket, Session};

/// Commands that can be sent to a session
///
/// `open` and `setFilter` accept an optional `requestId` that is logged with
/// the command for correlation.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExternalCommand {
    /// Open the picker and start listing assets
    Open {
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Replace the query text
    SetFilter {
        text: String,
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Switch to a tab
    SetCategory { category: Category },
    /// Step to the next (default) or previous tab
    CycleCategory {
        #[serde(default)]
        direction: Direction,
    },
    /// Move the cursor
    Move { direction: Direction },
    /// Replace the listing while open
    Refresh { files: Vec<RawFile> },
    /// Commit the active result
    Commit,
    /// Escape: clear the query, or close when it is already empty
    Dismiss,
    /// Close the picker
    Close,
}

/// What applying a command asks of the caller
#[derive(Debug)]
pub enum CommandEffect {
    /// A fetch must be started for this ticket
    Fetch(FetchTicket),
    /// An item was committed
    Committed(Commit),
    /// State changed (or the command was discarded when `false`)
    Updated(bool),
}

/// Apply one command to a session.
pub fn apply_command<S: MatchStrategy>(
    session: &mut Session<S>,
    command: ExternalCommand,
) -> CommandEffect {
    match command {
        ExternalCommand::Open { request_id } => {
            info!(request_id = ?request_id, "Open command");
            match session.open() {
                Some(ticket) => CommandEffect::Fetch(ticket),
                None => CommandEffect::Updated(false),
            }
        }
        ExternalCommand::SetFilter { text, request_id } => {
            debug!(request_id = ?request_id, query = %text, "Filter command");
            CommandEffect::Updated(session.set_query(text))
        }
        ExternalCommand::SetCategory { category } => {
            CommandEffect::Updated(session.set_category(category))
        }
        ExternalCommand::CycleCategory { direction } => {
            CommandEffect::Updated(session.cycle_category(direction))
        }
        ExternalCommand::Move { direction } => {
            CommandEffect::Updated(session.move_cursor(direction))
        }
        ExternalCommand::Refresh { files } => CommandEffect::Updated(session.refresh_source(files)),
        ExternalCommand::Commit => match session.commit() {
            Some(commit) => CommandEffect::Committed(commit),
            None => CommandEffect::Updated(false),
        },
        ExternalCommand::Dismiss => {
            session.dismiss();
            CommandEffect::Updated(true)
        }
        ExternalCommand::Close => {
            session.close();
            CommandEffect::Updated(true)
        }
    }
}

/// Start a thread that listens on stdin for external JSONL commands.
///
/// Uses a bounded channel with capacity of 100. When the receiver is
/// dropped the thread exits at the next line.
pub fn start_stdin_listener() -> async_channel::Receiver<ExternalCommand> {
    use std::io::BufRead;

    let (tx, rx) = async_channel::bounded(100);

    std::thread::spawn(move || {
        info!("External command listener started");
        let stdin = std::io::stdin();
        let reader = stdin.lock();

        for line in reader.lines() {
            match line {
                Ok(line) if !line.trim().is_empty() => {
                    debug!(line = %line, "Received command line");
                    match serde_json::from_str::<ExternalCommand>(&line) {
                        Ok(cmd) => {
                            // send_blocking is used since we're in a sync thread
                            if tx.send_blocking(cmd).is_err() {
                                debug!("Command channel closed, exiting");
                                break;
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, line = %line, "Failed to parse command");
                        }
                    }
                }
                Ok(_) => {} // Empty line, ignore
                Err(e) => {
                    warn!(error = %e, "Error reading stdin");
                    break;
                }
            }
        }
        info!("External command listener exiting");
    });

    rx
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PickerConfig;
    use crate::session::{CommitAction, Phase};

    fn parse(json: &str) -> ExternalCommand {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_open_with_request_id() {
        match parse(r#"{"type": "open", "requestId": "req-1"}"#) {
            ExternalCommand::Open { request_id } => {
                assert_eq!(request_id, Some("req-1".to_string()));
            }
            other => panic!("Expected Open, got {:?}", other),
        }
    }

    #[test]
    fn test_set_filter_deserialization() {
        match parse(r#"{"type": "setFilter", "text": "pht"}"#) {
            ExternalCommand::SetFilter { text, request_id } => {
                assert_eq!(text, "pht");
                assert!(request_id.is_none());
            }
            other => panic!("Expected SetFilter, got {:?}", other),
        }
    }

    #[test]
    fn test_category_and_direction_deserialization() {
        assert!(matches!(
            parse(r#"{"type": "setCategory", "category": "books"}"#),
            ExternalCommand::SetCategory {
                category: Category::Books
            }
        ));
        assert!(matches!(
            parse(r#"{"type": "cycleCategory"}"#),
            ExternalCommand::CycleCategory {
                direction: Direction::Next
            }
        ));
        assert!(matches!(
            parse(r#"{"type": "move", "direction": "prev"}"#),
            ExternalCommand::Move {
                direction: Direction::Prev
            }
        ));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(serde_json::from_str::<ExternalCommand>(r#"{"type": "explode"}"#).is_err());
    }

    #[test]
    fn test_command_sequence_drives_session() {
        let mut session = Session::new(&PickerConfig::default());
        let ticket = match apply_command(&mut session, parse(r#"{"type": "open"}"#)) {
            CommandEffect::Fetch(ticket) => ticket,
            other => panic!("Expected Fetch, got {:?}", other),
        };
        // discarded while loading
        assert!(matches!(
            apply_command(&mut session, parse(r#"{"type": "setFilter", "text": "x"}"#)),
            CommandEffect::Updated(false)
        ));

        session
            .complete_fetch(
                ticket,
                Ok(vec![
                    RawFile::new("/g/assets/a.pdf", None),
                    RawFile::new("/g/assets/b.png", None),
                ]),
            )
            .unwrap();

        apply_command(&mut session, parse(r#"{"type": "setCategory", "category": "images"}"#));
        assert_eq!(session.displayed_results().len(), 1);

        match apply_command(&mut session, parse(r#"{"type": "commit"}"#)) {
            CommandEffect::Committed(commit) => {
                assert_eq!(
                    commit.action,
                    CommitAction::InsertLink(Some("![b.png](assets/b.png)".to_string()))
                );
            }
            other => panic!("Expected Committed, got {:?}", other),
        }
        assert_eq!(session.phase(), Phase::Closed);
    }

    #[test]
    fn test_refresh_command() {
        let mut session = Session::new(&PickerConfig::default());
        let ticket = session.open().unwrap();
        session.complete_fetch(ticket, Ok(Vec::new())).unwrap();
        let cmd = parse(r#"{"type": "refresh", "files": [{"path": "/g/assets/new.mp3"}]}"#);
        assert!(matches!(
            apply_command(&mut session, cmd),
            CommandEffect::Updated(true)
        ));
        assert_eq!(session.total_count(), 1);
    }
}
