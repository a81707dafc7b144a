//! Resource layout configuration.
//!
//! Every persisted artifact lives under one resource root:
//!
//! ```text
//! <root>/action_collection.json      one JSON object per collection kind
//! <root>/task_collection.json
//! <root>/schedule_collection.json
//! <root>/images/<token>.json         one file per stored document
//! <root>/screen_data/<token>.json
//! ```
//!
//! The root is an explicit value constructed once and passed into store
//! constructors; nothing in this crate resolves paths at import time or
//! holds them in process-wide state.

use std::fmt;
use std::path::{Path, PathBuf};

/// Collection kinds persisted as `<kind>_collection.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Action,
    Task,
    Schedule,
}

impl CollectionKind {
    /// Returns the kind name used in file names and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Action => "action",
            CollectionKind::Task => "task",
            CollectionKind::Schedule => "schedule",
        }
    }

    /// Returns the backing file name for this kind.
    pub fn file_name(&self) -> String {
        format!("{}_collection.json", self.as_str())
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Directories holding single-document files.
///
/// Images get their own area; screen objects and screen captures share
/// `screen_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentArea {
    Images,
    ScreenData,
}

impl DocumentArea {
    /// Returns the subdirectory name under the resource root.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentArea::Images => "images",
            DocumentArea::ScreenData => "screen_data",
        }
    }
}

impl fmt::Display for DocumentArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved resource root plus the path arithmetic derived from it.
#[derive(Debug, Clone)]
pub struct ResourcePaths {
    root: PathBuf,
}

impl ResourcePaths {
    /// Creates a layout rooted at an explicit directory.
    ///
    /// The directory does not have to exist yet; stores create what they
    /// need on open.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the resource root relative to a base directory.
    ///
    /// `<base>/resources` is used when it exists as a directory; otherwise
    /// `<base>/core/resources` is the fallback. Deployments rely on this
    /// rule for where files land, so it is preserved verbatim; use
    /// [`ResourcePaths::new`] to bypass it.
    pub fn discover(base: &Path) -> Self {
        let primary = base.join("resources");
        if primary.is_dir() {
            Self { root: primary }
        } else {
            Self {
                root: base.join("core").join("resources"),
            }
        }
    }

    /// Returns the resource root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the backing file path for a collection kind.
    pub fn collection_file(&self, kind: CollectionKind) -> PathBuf {
        self.root.join(kind.file_name())
    }

    /// Returns the directory for a document area.
    pub fn document_dir(&self, area: DocumentArea) -> PathBuf {
        self.root.join(area.as_str())
    }
}
