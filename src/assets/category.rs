//! Extension table and category filtering

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::types::{AssetKind, Category, Item};
use crate::config::PickerConfig;

const BOOK_EXTENSIONS: &[&str] = &["pdf"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];
pub(super) const VIDEO_EXTENSIONS: &[&str] = &["mp4"];

/// Step direction for cursor movement and tab cycling
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Next,
    Prev,
}

/// Maps asset kinds to the extensions they recognize and lists the tabs in
/// cycling order. Extensions are stored lowercased.
#[derive(Clone, Debug)]
pub struct CategoryTable {
    kinds: Vec<(AssetKind, Vec<String>)>,
    tabs: Vec<Category>,
}

fn owned(exts: &[&str]) -> Vec<String> {
    exts.iter().map(|e| e.to_string()).collect()
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::from_config(&PickerConfig::default())
    }
}

impl CategoryTable {
    pub fn from_config(config: &PickerConfig) -> Self {
        let mut kinds = vec![
            (AssetKind::Book, owned(BOOK_EXTENSIONS)),
            (AssetKind::Audio, owned(AUDIO_EXTENSIONS)),
            (AssetKind::Image, owned(IMAGE_EXTENSIONS)),
        ];
        let mut tabs = vec![
            Category::All,
            Category::Books,
            Category::Images,
            Category::Audios,
        ];
        if config.capabilities.video {
            kinds.push((AssetKind::Video, owned(VIDEO_EXTENSIONS)));
            tabs.push(Category::Videos);
        }

        for (kind, extra) in &config.extra_extensions {
            if let Some((_, exts)) = kinds.iter_mut().find(|(k, _)| k == kind) {
                for ext in extra {
                    let ext = ext.trim_start_matches('.').to_lowercase();
                    if !ext.is_empty() && !exts.contains(&ext) {
                        exts.push(ext);
                    }
                }
            }
        }

        Self { kinds, tabs }
    }

    /// Classify an extension. Unknown or absent extensions are `Uncategorized`.
    pub fn classify(&self, extension: Option<&str>) -> AssetKind {
        let Some(ext) = extension else {
            return AssetKind::Uncategorized;
        };
        let ext = ext.to_lowercase();
        self.kinds
            .iter()
            .find(|(_, exts)| exts.contains(&ext))
            .map(|(kind, _)| *kind)
            .unwrap_or(AssetKind::Uncategorized)
    }

    /// Extensions recognized for a kind; empty when the kind is disabled.
    pub fn extensions(&self, kind: AssetKind) -> &[String] {
        self.kinds
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, exts)| exts.as_slice())
            .unwrap_or(&[])
    }

    /// Tabs in cycling order, starting with `All`
    pub fn tabs(&self) -> &[Category] {
        &self.tabs
    }

    pub fn admits(&self, category: Category, item: &Item) -> bool {
        match category.kind() {
            None => true,
            Some(kind) => item.extension.as_deref().is_some_and(|ext| {
                let ext = ext.to_lowercase();
                self.extensions(kind).contains(&ext)
            }),
        }
    }

    /// Keep the items a tab admits, preserving order. Identity for `All`.
    pub fn filter(&self, items: &[Arc<Item>], category: Category) -> Vec<Arc<Item>> {
        items
            .iter()
            .filter(|item| self.admits(category, item))
            .cloned()
            .collect()
    }

    /// Step circularly through the tabs. A tab missing from the table
    /// (e.g. `Videos` without the video capability) restarts from `All`.
    pub fn cycle(&self, current: Category, direction: Direction) -> Category {
        let len = self.tabs.len();
        let Some(idx) = self.tabs.iter().position(|c| *c == current) else {
            return Category::All;
        };
        let to = match direction {
            Direction::Next => (idx + 1) % len,
            Direction::Prev => (idx + len - 1) % len,
        };
        self.tabs[to]
    }
}
