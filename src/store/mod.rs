//! File-backed stores for automation records.
//!
//! Two shapes of persistence:
//! - [`CollectionStore`]: all records of one kind in a single JSON object,
//!   keyed by dense integer id
//! - [`DocumentStore`]: one JSON file per record, keyed by token
//!
//! # Design Principles
//!
//! - The in-memory copy and the backing file are identical after every
//!   successful call; there is no separate commit step
//! - Every persist is staged through a temp file, fsynced, and renamed into
//!   place, so a crash can lose the newest mutation but never truncate the
//!   file
//! - Each store instance assumes it is the sole writer; two instances on the
//!   same path race and the last persist wins
//! - Missing records are `None`/`false` returns, not errors

mod collection;
mod document;
mod errors;

pub use collection::{CollectionRecord, CollectionStore};
pub use document::{DocumentRecord, DocumentStore};
pub use errors::{StoreError, StoreResult};

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Writes `value` to `path` as pretty-printed JSON, atomically.
///
/// Sequence: write `<path>.tmp`, fsync it, rename over `path`, fsync the
/// parent directory. The rename makes the new content visible all at once;
/// readers never observe a partially written file.
pub(crate) fn persist_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let content = serde_json::to_string_pretty(value)
        .map_err(|e| StoreError::io(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

    let tmp_path = tmp_sibling(path);

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp_path)
        .map_err(|e| StoreError::io(&tmp_path, e))?;

    file.write_all(content.as_bytes())
        .map_err(|e| StoreError::io(&tmp_path, e))?;

    // fsync before rename so the rename never exposes unsynced content
    file.sync_all().map_err(|e| StoreError::io(&tmp_path, e))?;

    fs::rename(&tmp_path, path).map_err(|e| StoreError::io(path, e))?;

    // Directory fsync makes the rename itself durable; best effort
    if let Some(parent) = path.parent() {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}

/// Reads and deserializes `path`, or `None` when the file is absent.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    let value = serde_json::from_str(&content)
        .map_err(|e| StoreError::corrupt(path, format!("invalid JSON: {}", e)))?;

    Ok(Some(value))
}

/// Returns the staging path `<path>.tmp` next to the target file.
fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
