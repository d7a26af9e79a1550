//! Where raw asset listings come from
//!
//! Listing is the only slow operation of a session, so it runs on a worker
//! thread and reports back through a channel; the session decides via the
//! ticket whether the result still applies.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::assets::RawFile;
use crate::error::{AssetsPlusError, Result, ResultExt};
use crate::session::FetchTicket;

/// The host workspace's `listFiles()`
pub trait AssetSource: Send + Sync {
    fn list_files(&self) -> Result<Vec<RawFile>>;
}

/// A fixed listing (hosts that already hold the file list, tests)
impl AssetSource for Vec<RawFile> {
    fn list_files(&self) -> Result<Vec<RawFile>> {
        Ok(self.clone())
    }
}

/// Every regular file below a graph's assets directory, sorted by path.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirectorySource {
    fn list_files(&self) -> Result<Vec<RawFile>> {
        if !self.root.is_dir() {
            return Err(AssetsPlusError::Fetch(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }

        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        let pattern = format!("{}/**/*", root.trim_end_matches('/'));
        let entries = glob::glob(&pattern).map_err(|e| AssetsPlusError::Fetch(e.to_string()))?;

        let mut files = Vec::new();
        for entry in entries {
            let Some(path) = entry.warn_on_err() else {
                continue;
            };
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {
                    files.push(RawFile::new(path.to_string_lossy(), Some(meta.len())));
                }
                Ok(_) => {}
                Err(e) => debug!(path = %path.display(), error = %e, "No metadata for asset"),
            }
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));

        info!(root = %self.root.display(), count = files.len(), "Listed asset directory");
        Ok(files)
    }
}

/// A JSON array of `{ "path": ..., "size": ... }` records.
#[derive(Debug, Clone)]
pub struct ManifestSource {
    path: PathBuf,
}

impl ManifestSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AssetSource for ManifestSource {
    fn list_files(&self) -> Result<Vec<RawFile>> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| AssetsPlusError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let files: Vec<RawFile> = serde_json::from_str(&contents)?;
        info!(manifest = %self.path.display(), count = files.len(), "Loaded asset manifest");
        Ok(files)
    }
}

/// Result of a background listing, tagged with the ticket that requested it.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<Vec<RawFile>>,
}

/// Run `source.list_files()` on a worker thread.
///
/// The receiver yields exactly one outcome. If it is dropped before the
/// listing finishes, the outcome is discarded.
pub fn spawn_fetch(
    source: Arc<dyn AssetSource>,
    ticket: FetchTicket,
) -> async_channel::Receiver<FetchOutcome> {
    let (tx, rx) = async_channel::bounded(1);

    std::thread::spawn(move || {
        let result = source.list_files();
        if tx.send_blocking(FetchOutcome { ticket, result }).is_err() {
            debug!(generation = ticket.generation(), "Fetch receiver dropped, discarding listing");
        }
    });

    rx
}
