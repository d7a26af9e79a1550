//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::defaults::*;
use crate::assets::AssetKind;

// ============================================
// CAPABILITIES
// ============================================

/// Feature flags that distinguish picker variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// Recognize video files and show a Videos tab (default: false)
    #[serde(default = "default_video")]
    pub video: bool,
    /// Commit opens the file externally instead of inserting a link (default: false)
    #[serde(default = "default_full_features")]
    pub full_features: bool,
}

fn default_video() -> bool {
    DEFAULT_VIDEO
}
fn default_full_features() -> bool {
    DEFAULT_FULL_FEATURES
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities {
            video: DEFAULT_VIDEO,
            full_features: DEFAULT_FULL_FEATURES,
        }
    }
}

// ============================================
// MATCHER CONFIG
// ============================================

/// Tuning for the tiered matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatcherConfig {
    /// Maximum unmatched characters between consecutive fuzzy hits (default: 24)
    #[serde(default = "default_max_gap")]
    pub max_gap: usize,
    /// Longest accepted query in characters (default: 256)
    #[serde(default = "default_max_query_chars")]
    pub max_query_chars: usize,
}

fn default_max_gap() -> usize {
    DEFAULT_MAX_GAP
}
fn default_max_query_chars() -> usize {
    DEFAULT_MAX_QUERY_CHARS
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig {
            max_gap: DEFAULT_MAX_GAP,
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
        }
    }
}

// ============================================
// MAIN CONFIG
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerConfig {
    /// Number of results shown at once (default: 8)
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default)]
    pub capabilities: Capabilities,
    /// Additional extensions per category, e.g. `{"image": ["svg"]}`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_extensions: BTreeMap<AssetKind, Vec<String>>,
    #[serde(default)]
    pub matcher: MatcherConfig,
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

impl Default for PickerConfig {
    fn default() -> Self {
        PickerConfig {
            window_size: DEFAULT_WINDOW_SIZE,
            capabilities: Capabilities::default(),
            extra_extensions: BTreeMap::new(),
            matcher: MatcherConfig::default(),
        }
    }
}

impl PickerConfig {
    /// Returns the window size, never less than one row
    pub fn get_window_size(&self) -> usize {
        self.window_size.max(1)
    }
}
