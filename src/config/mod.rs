//! Configuration module - picker settings
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.assets-plus/config.json
//! - Default values for all settings
//! - Type definitions for config structures
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions (PickerConfig, Capabilities, etc.)
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{DEFAULT_MAX_GAP, DEFAULT_MAX_QUERY_CHARS, DEFAULT_WINDOW_SIZE};

pub use types::{Capabilities, MatcherConfig, PickerConfig};

pub use loader::{load_config, load_config_from};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
