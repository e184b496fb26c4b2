//! Durable last-known-good copies of each KB document.
//!
//! One JSON file per document, named after its cache key. Writes go through
//! a temp file and a rename so a crash never leaves a torn entry.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use carenote_core::models::kb::KbDocument;

use crate::error::KbError;

#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, document: KbDocument) -> PathBuf {
        self.dir.join(format!("{}.json", document.cache_key()))
    }

    /// Read a cached document. Missing and unreadable entries are both `None`.
    pub fn read<T: DeserializeOwned>(&self, document: KbDocument) -> Option<T> {
        let path = self.path(document);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read KB cache");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt KB cache entry");
                None
            }
        }
    }

    /// Replace one document's entry. Other entries are untouched.
    pub fn write<T: Serialize>(&self, document: KbDocument, value: &T) -> Result<(), KbError> {
        let json = serde_json::to_vec(value)?;
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path(document);
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json)?;
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!(path = %path.display(), %document, "KB cache updated");
        Ok(())
    }
}
