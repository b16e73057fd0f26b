//! Read-only access to the content directory.
//!
//! Every stage reads documents through the [`ContentStore`] trait instead of
//! touching `std::fs` directly. The store is a capability handed to each
//! component: production code uses [`FsStore`] over the content root, tests
//! use [`MemoryStore`] to describe a document set inline.
//!
//! ## Identifiers
//!
//! A document's identifier is its filename stem: `paintings-2021.mdx` is
//! identified as `paintings-2021`. Only files carrying the configured
//! extension are documents; everything else in the directory (`config.toml`,
//! `assets/`, dotfiles) is invisible to the store.
//!
//! Identifiers are always returned sorted, so nothing downstream depends on
//! the platform's directory enumeration order.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Document not found: {0}")]
    NotFound(String),
}

/// Read-only view of a flat directory of documents.
pub trait ContentStore {
    /// All document identifiers, sorted ascending.
    fn identifiers(&self) -> Result<Vec<String>, StoreError>;

    /// Raw source text (frontmatter and body) of one document.
    fn read(&self, identifier: &str) -> Result<String, StoreError>;

    /// Last-modified time, or `None` when it cannot be determined.
    fn modified(&self, identifier: &str) -> Option<SystemTime>;

    /// Whether a document with this identifier exists.
    fn contains(&self, identifier: &str) -> bool {
        self.read(identifier).is_ok()
    }
}

/// Content store backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
    extension: String,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, identifier: &str) -> PathBuf {
        self.root.join(format!("{identifier}.{}", self.extension))
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl ContentStore for FsStore {
    fn identifiers(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.root).map_err(|e| self.io_error(&self.root, e))?;

        let mut identifiers: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .is_some_and(|e| e == self.extension.as_str())
            })
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().to_string()))
            .filter(|stem| !stem.starts_with('.'))
            .collect();

        identifiers.sort();
        Ok(identifiers)
    }

    fn read(&self, identifier: &str) -> Result<String, StoreError> {
        // Identifiers come from URLs as well as from listings; never let one
        // escape the content root.
        if identifier.is_empty() || identifier.contains(['/', '\\']) || identifier.starts_with('.')
        {
            return Err(StoreError::NotFound(identifier.to_string()));
        }
        let path = self.path_for(identifier);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(identifier.to_string()))
            }
            Err(e) => Err(self.io_error(&path, e)),
        }
    }

    fn modified(&self, identifier: &str) -> Option<SystemTime> {
        fs::metadata(self.path_for(identifier))
            .and_then(|m| m.modified())
            .ok()
    }
}

/// In-memory content store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, MemoryDocument>,
}

#[derive(Debug, Clone)]
struct MemoryDocument {
    source: String,
    modified: Option<SystemTime>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with no known modification time.
    pub fn with(mut self, identifier: &str, source: &str) -> Self {
        self.insert(identifier, source, None);
        self
    }

    /// Add a document with an explicit modification time.
    pub fn with_modified(mut self, identifier: &str, source: &str, modified: SystemTime) -> Self {
        self.insert(identifier, source, Some(modified));
        self
    }

    pub fn insert(&mut self, identifier: &str, source: &str, modified: Option<SystemTime>) {
        self.documents.insert(
            identifier.to_string(),
            MemoryDocument {
                source: source.to_string(),
                modified,
            },
        );
    }
}

impl ContentStore for MemoryStore {
    fn identifiers(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn read(&self, identifier: &str) -> Result<String, StoreError> {
        self.documents
            .get(identifier)
            .map(|d| d.source.clone())
            .ok_or_else(|| StoreError::NotFound(identifier.to_string()))
    }

    fn modified(&self, identifier: &str) -> Option<SystemTime> {
        self.documents.get(identifier).and_then(|d| d.modified)
    }
}
