use thiserror::Error;
use tracing::{error, warn};

/// Error severity for notices shown by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

/// Domain-specific errors for the asset picker
#[derive(Error, Debug)]
pub enum AssetsPlusError {
    #[error("Listing workspace assets failed: {0}")]
    Fetch(String),

    #[error("Match engine failed: {0}")]
    MatchEngine(#[from] crate::search::MatchError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse asset manifest: {0}")]
    Json(#[from] serde_json::Error),
}

impl AssetsPlusError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Fetch(_) => ErrorSeverity::Warning,
            Self::MatchEngine(_) => ErrorSeverity::Info,
            Self::Config(_) => ErrorSeverity::Warning,
            Self::Io { .. } => ErrorSeverity::Error,
            Self::Json(_) => ErrorSeverity::Error,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Fetch(msg) => format!("Could not list assets: {}", msg),
            Self::MatchEngine(_) => "No results for this query".to_string(),
            Self::Config(msg) => format!("Configuration issue: {}", msg),
            Self::Io { path, .. } => format!("Could not read {}", path),
            Self::Json(e) => format!("Invalid asset manifest: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, AssetsPlusError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the user doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use assets_plus::error::ResultExt;
///
/// let config = read_config_file().warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
