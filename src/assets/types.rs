//! Asset type definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A file record as listed by the host workspace
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFile {
    pub path: String,
    /// Size in bytes, when the host reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl RawFile {
    pub fn new(path: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Coarse classification of an asset, derived from its extension
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Book,
    Image,
    Audio,
    Video,
    Uncategorized,
}

/// A normalized, display-ready asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique key, exactly as listed by the host
    pub path: String,
    /// Base name as given (shown as a tooltip)
    pub original_name: String,
    /// Base name with id runs stripped; what is displayed and matched
    pub name: String,
    /// Lowercased text after the final dot of `name`
    pub extension: Option<String>,
    /// e.g. "12.50KB" or "2.50MB"
    pub size_display: Option<String>,
    pub category: AssetKind,
}

/// The tab a session filters by
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    All,
    Books,
    Images,
    Audios,
    Videos,
}

impl Category {
    /// The asset kind this tab admits; `None` for `All`
    pub fn kind(self) -> Option<AssetKind> {
        match self {
            Category::All => None,
            Category::Books => Some(AssetKind::Book),
            Category::Images => Some(AssetKind::Image),
            Category::Audios => Some(AssetKind::Audio),
            Category::Videos => Some(AssetKind::Video),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Books => "books",
            Category::Images => "images",
            Category::Audios => "audios",
            Category::Videos => "videos",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Category::All),
            "books" | "book" => Ok(Category::Books),
            "images" | "image" => Ok(Category::Images),
            "audios" | "audio" => Ok(Category::Audios),
            "videos" | "video" => Ok(Category::Videos),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}
