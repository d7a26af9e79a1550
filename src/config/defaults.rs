//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Number of results shown (and navigable) at once
pub const DEFAULT_WINDOW_SIZE: usize = 8;

/// Default capability flags
pub const DEFAULT_VIDEO: bool = false;
pub const DEFAULT_FULL_FEATURES: bool = false;

/// Largest run of unmatched characters allowed between two fuzzy-matched characters
pub const DEFAULT_MAX_GAP: usize = 24;

/// Queries longer than this are rejected by the matcher
pub const DEFAULT_MAX_QUERY_CHARS: usize = 256;

/// Config file location (tilde-expanded at load time)
pub const DEFAULT_CONFIG_PATH: &str = "~/.assets-plus/config.json";
