//! Assets module - workspace file records and their display form
//!
//! # Module Structure
//!
//! - `types` - RawFile, Item, AssetKind, Category
//! - `normalize` - RawFile -> Item derivation (name cleanup, extension, size)
//! - `category` - extension table, category filtering and tab cycling
//! - `link` - reference/embed strings handed to the host editor

mod category;
mod link;
mod normalize;
mod types;

pub use category::{CategoryTable, Direction};
pub use link::{is_rich_media, make_asset_link, open_external_url};
pub use normalize::{
    base_name, extension_of, format_size, normalize, normalize_all, strip_id_runs,
};
pub use types::{AssetKind, Category, Item, ParseCategoryError, RawFile};
