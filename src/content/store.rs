//! # Content Store
//!
//! Durable mapping between the [`ContentDocument`] and a single JSON file.
//!
//! The store owns the on-disk file exclusively. Every save is a full
//! overwrite of a pretty-printed UTF-8 document; there are no partial
//! writes, no versioning, and no locking at this layer.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::observability::Logger;

use super::document::ContentDocument;
use super::errors::{ContentError, ContentResult};

/// File-backed store for the content document
#[derive(Debug, Clone)]
pub struct ContentStore {
    path: PathBuf,
}

impl ContentStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the content document from disk
    ///
    /// A missing file yields an empty document (the document is created
    /// lazily on first save). An unreadable or unparsable file also yields
    /// an empty document for compatibility with the original behavior, but
    /// corruption is logged as its own event so it is never mistaken for
    /// "no file yet".
    pub fn load(&self) -> ContentDocument {
        let path_str = self.path.display().to_string();

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Logger::trace("CONTENT_FILE_MISSING", &[("path", &path_str)]);
                return ContentDocument::new();
            }
            Err(e) => {
                Logger::warn(
                    "CONTENT_FILE_UNREADABLE",
                    &[("path", &path_str), ("error", &e.to_string())],
                );
                return ContentDocument::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(doc) => doc,
            Err(e) => {
                Logger::warn(
                    "CONTENT_FILE_CORRUPT",
                    &[("path", &path_str), ("error", &e.to_string())],
                );
                ContentDocument::new()
            }
        }
    }

    /// Serialize and overwrite the backing file in full
    ///
    /// The document is written to a sibling temp file and renamed into
    /// place, so a concurrent reader always sees either the old document or
    /// the new one, never a truncated file. Parent directories are created
    /// if absent. Failures are logged and returned as
    /// [`ContentError::PersistFailure`]; they never panic.
    pub fn save(&self, doc: &ContentDocument) -> ContentResult<()> {
        let path_str = self.path.display().to_string();
        let persist_failure = |e: std::io::Error| {
            Logger::error(
                "CONTENT_SAVE_FAILED",
                &[("path", &path_str), ("error", &e.to_string())],
            );
            ContentError::PersistFailure(e.to_string())
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(persist_failure)?;
        }

        // Pretty-printed so the file stays hand-editable
        let json = serde_json::to_string_pretty(doc)
            .map_err(|e| ContentError::PersistFailure(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(persist_failure)?;
        // atomic on POSIX: readers see the old file until this completes
        fs::rename(&tmp_path, &self.path).map_err(persist_failure)
    }
}
