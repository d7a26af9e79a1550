//! RawFile -> Item derivation
//!
//! Every function here is pure and total: a missing size or a name without a
//! dot yields absent fields, never an error.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::debug;

use super::category::CategoryTable;
use super::types::{Item, RawFile};

/// Id runs of five or more digits/underscores, either leading the name or
/// sitting right before the extension dot (or the end of the name).
fn id_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9_]{5,}|[0-9_]{5,}(\.|$)").expect("Invalid regex"))
}

/// Text after the last `/` of a path; the whole path if it has none.
pub fn base_name(path: &str) -> &str {
    path.rsplit_once('/').map(|(_, name)| name).unwrap_or(path)
}

/// Strip host-generated id runs, e.g. `photo_1693000000000_0.png` -> `photo.png`.
/// Falls back to the input when nothing would be left.
pub fn strip_id_runs(name: &str) -> String {
    let stripped = id_run_regex().replace_all(name, "$1");
    if stripped.is_empty() {
        name.to_string()
    } else {
        stripped.into_owned()
    }
}

/// Lowercased text after the final dot; `None` without a dot or with nothing after it.
pub fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Human-readable size: KB with two decimals, switching to MB above 999 KB.
///
/// The MB figure divides the already-rounded KB figure, so it can differ from
/// `bytes / 1048576` in the last digit.
pub fn format_size(bytes: u64) -> String {
    let kb = round2(bytes as f64 / 1024.0);
    if kb > 999.0 {
        format!("{:.2}MB", round2(kb / 1024.0))
    } else {
        format!("{:.2}KB", kb)
    }
}

/// Derive a display-ready item from a raw record.
pub fn normalize(raw: &RawFile, table: &CategoryTable) -> Item {
    let original_name = base_name(&raw.path).to_string();
    let name = strip_id_runs(&original_name);
    let extension = extension_of(&name);
    let category = table.classify(extension.as_deref());

    Item {
        path: raw.path.clone(),
        original_name,
        name,
        extension,
        size_display: raw.size.map(format_size),
        category,
    }
}

/// Normalize a whole listing, dropping records with an empty path and
/// records whose path repeats an earlier one. Order is preserved.
pub fn normalize_all(raws: Vec<RawFile>, table: &CategoryTable) -> Vec<Arc<Item>> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raws.len());
    let mut items = Vec::with_capacity(raws.len());

    for raw in raws {
        if raw.path.trim().is_empty() {
            debug!(event_type = "normalize", reason = "empty_path", "Dropped raw file record");
            continue;
        }
        if !seen.insert(raw.path.clone()) {
            debug!(
                event_type = "normalize",
                reason = "duplicate_path",
                path = %raw.path,
                "Dropped raw file record"
            );
            continue;
        }
        items.push(Arc::new(normalize(&raw, table)));
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetKind;

    #[test]
    fn test_leading_timestamp_is_stripped() {
        let table = CategoryTable::default();
        let item = normalize(
            &RawFile::new("/assets/1693000000000_photo.png", Some(2_621_440)),
            &table,
        );
        assert_eq!(item.name, "photo.png");
        assert_eq!(item.original_name, "1693000000000_photo.png");
        assert_eq!(item.extension.as_deref(), Some("png"));
        assert_eq!(item.size_display.as_deref(), Some("2.50MB"));
        assert_eq!(item.category, AssetKind::Image);
    }

    #[test]
    fn test_trailing_id_before_extension_is_stripped() {
        assert_eq!(strip_id_runs("image_1693912345678_0.png"), "image.png");
        assert_eq!(strip_id_runs("scan_20230901.PDF"), "scan.PDF");
        assert_eq!(strip_id_runs("clip_123456"), "clip");
    }

    #[test]
    fn test_short_digit_runs_are_kept() {
        assert_eq!(strip_id_runs("chapter_12.pdf"), "chapter_12.pdf");
        assert_eq!(strip_id_runs("v2_final.png"), "v2_final.png");
    }

    #[test]
    fn test_all_digit_name_falls_back_to_original() {
        assert_eq!(strip_id_runs("1234567"), "1234567");
    }

    #[test]
    fn test_strip_is_idempotent() {
        for name in [
            "1693000000000_photo.png",
            "image_1693912345678_0.png",
            "a_12345.b_67890.png",
            "plain.txt",
            "1234567",
            "report",
        ] {
            let once = strip_id_runs(name);
            let twice = strip_id_runs(&once);
            assert_eq!(once, twice, "not idempotent for {}", name);
            assert_eq!(extension_of(&once), extension_of(&twice));
        }
    }

    #[test]
    fn test_extension_is_lowercased_and_optional() {
        assert_eq!(extension_of("Cover.JPG").as_deref(), Some("jpg"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of("README"), None);
        assert_eq!(extension_of("trailing."), None);
    }

    #[test]
    fn test_base_name_without_slash() {
        assert_eq!(base_name("photo.png"), "photo.png");
        assert_eq!(base_name("/graph/assets/photo.png"), "photo.png");
    }

    #[test]
    fn test_format_size_kb_and_mb() {
        assert_eq!(format_size(512), "0.50KB");
        assert_eq!(format_size(12_800), "12.50KB");
        assert_eq!(format_size(1_022_976), "999.00KB");
        assert_eq!(format_size(2_621_440), "2.50MB");
    }

    #[test]
    fn test_format_size_rounds_kb_before_mb() {
        // 1080.3154 KB rounds to 1080.32 KB, and 1080.32 / 1024 is exactly 1.055
        assert_eq!(format_size(1_106_243), "1.06MB");
    }

    #[test]
    fn test_missing_size_yields_no_display() {
        let item = normalize(&RawFile::new("/g/assets/notes", None), &CategoryTable::default());
        assert_eq!(item.size_display, None);
        assert_eq!(item.extension, None);
        assert_eq!(item.category, AssetKind::Uncategorized);
    }

    #[test]
    fn test_normalize_all_drops_empty_and_duplicate_paths() {
        let table = CategoryTable::default();
        let raws = vec![
            RawFile::new("/g/assets/a.png", Some(10)),
            RawFile::new("", Some(10)),
            RawFile::new("/g/assets/b.pdf", None),
            RawFile::new("/g/assets/a.png", Some(99)),
        ];
        let items = normalize_all(raws.clone(), &table);
        let paths: Vec<&str> = items.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["/g/assets/a.png", "/g/assets/b.pdf"]);
        for item in &items {
            assert!(raws.iter().any(|r| r.path == item.path));
        }
        assert_eq!(items[0].size_display.as_deref(), Some("0.01KB"));
    }
}
