//! Strings handed to the host when an asset is committed

use super::category::VIDEO_EXTENSIONS;
use super::types::{AssetKind, Item};

const ASSETS_SEGMENT: &str = "/assets/";

/// Whether the host editor renders the item inline (embed treatment).
///
/// Anything the category table classified embeds, so extra extensions from
/// the config follow their category. Video embeds even without the video tab.
pub fn is_rich_media(item: &Item) -> bool {
    item.category != AssetKind::Uncategorized
        || item
            .extension
            .as_deref()
            .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext))
}

/// Build a markdown reference to an asset, relative to the graph's assets
/// directory: `![name](assets/rel)` for rich media, `[name](assets/rel)` otherwise.
///
/// Returns `None` when the item has no name, or its path is not under an
/// `/assets/` directory.
pub fn make_asset_link(item: &Item) -> Option<String> {
    if item.name.is_empty() || item.path.is_empty() {
        return None;
    }
    let relative = item.path.split(ASSETS_SEGMENT).nth(1)?;
    if relative.is_empty() {
        return None;
    }

    let embed = is_rich_media(item);
    Some(format!(
        "{}[{}](assets/{})",
        if embed { "!" } else { "" },
        item.name,
        relative
    ))
}

pub fn open_external_url(item: &Item) -> String {
    format!("file://{}", item.path)
}
