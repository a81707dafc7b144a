//! Document store: one JSON file per record, named by token.
//!
//! Documents are addressed by an opaque token (a v4 UUID) that is stable
//! for the record's lifetime, unlike collection ids. Saves overwrite
//! unconditionally; there is no existence check and no backup of the
//! previous version. Two writers on the same token race and the later
//! save wins.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::persist_json;
use crate::config::{DocumentArea, ResourcePaths};
use crate::observability::Logger;

/// A record persisted as its own file.
///
/// `area` names the directory family the record belongs in; callers use it
/// to pick the store, the store itself is bound to one directory.
pub trait DocumentRecord: Serialize {
    /// Opaque unique token, used as the file stem.
    fn token(&self) -> Uuid;

    /// Directory family for this record.
    fn area(&self) -> DocumentArea;
}

/// Store over a single directory of `<token>.json` files.
pub struct DocumentStore {
    dir: PathBuf,
    logger: Logger,
}

impl DocumentStore {
    /// Opens a store over `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// `Io` when the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>, logger: Logger) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        let dir_str = dir.display().to_string();
        logger.info("DOCUMENT_STORE_OPENED", &[("dir", &dir_str)]);
        Ok(Self { dir, logger })
    }

    /// Opens the store for one document area of a resource layout.
    pub fn for_area(
        paths: &ResourcePaths,
        area: DocumentArea,
        logger: Logger,
    ) -> StoreResult<Self> {
        Self::open(paths.document_dir(area), logger)
    }

    /// Returns the directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persists `doc` to `<dir>/<token>.json`, replacing any previous
    /// content at that path. Returns the file path written.
    ///
    /// # Errors
    ///
    /// `Io` when the write fails.
    pub fn save<T: DocumentRecord>(&self, doc: &T) -> StoreResult<PathBuf> {
        let path = self.file_path(doc.token());
        persist_json(&path, doc)?;
        let path_str = path.display().to_string();
        self.logger.trace("DOCUMENT_SAVED", &[("path", &path_str)]);
        Ok(path)
    }

    /// Loads the raw field map for `token`, or `None` when no file exists.
    ///
    /// The result is untyped: directories can hold more than one record
    /// shape (screen objects and screen captures share an area), so
    /// interpreting the map is the caller's job.
    ///
    /// # Errors
    ///
    /// `Io` on filesystem failure, `Corrupt` when the file is not JSON.
    pub fn load(&self, token: Uuid) -> StoreResult<Option<Value>> {
        let path = self.file_path(token);
        let path_str = path.display().to_string();

        match super::read_json(&path)? {
            Some(value) => {
                self.logger.trace("DOCUMENT_LOADED", &[("path", &path_str)]);
                Ok(Some(value))
            }
            None => {
                self.logger.trace("DOCUMENT_MISSING", &[("path", &path_str)]);
                Ok(None)
            }
        }
    }

    /// Deletes the file for `token`.
    ///
    /// Returns `false` when there was nothing to delete; a missing
    /// document is a no-op status, not an error.
    ///
    /// # Errors
    ///
    /// `Io` when the file exists but cannot be removed.
    pub fn delete(&self, token: Uuid) -> StoreResult<bool> {
        let path = self.file_path(token);
        let path_str = path.display().to_string();

        match fs::remove_file(&path) {
            Ok(()) => {
                self.logger.trace("DOCUMENT_DELETED", &[("path", &path_str)]);
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.logger.trace("DOCUMENT_MISSING", &[("path", &path_str)]);
                Ok(false)
            }
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    /// Returns `<dir>/<token>.json`.
    fn file_path(&self, token: Uuid) -> PathBuf {
        self.dir.join(format!("{}.json", token))
    }
}
