//! Document loading: frontmatter/body split.
//!
//! A document is a text file whose optional preamble is a YAML block fenced
//! by `---` lines:
//!
//! ```text
//! ---
//! title: Parabiosis
//! year: 2021
//! ---
//!
//! Body markdown…
//! ```
//!
//! Files without a preamble are valid: their metadata is empty and the whole
//! text is the body. Documents are loaded fresh on every build pass and never
//! mutated.

use crate::metadata::Metadata;
use crate::store::{ContentStore, StoreError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(StoreError),
    #[error("Invalid frontmatter in {identifier}: {source}")]
    Frontmatter {
        identifier: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl From<StoreError> for DocumentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => DocumentError::NotFound(id),
            other => DocumentError::Store(other),
        }
    }
}

/// A loaded content document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Filename stem, e.g. `paintings-2021`.
    pub identifier: String,
    pub metadata: Metadata,
    /// Raw markup after the frontmatter block.
    pub body: String,
}

impl Document {
    /// Load and parse one document from the store.
    pub fn load(store: &dyn ContentStore, identifier: &str) -> Result<Self, DocumentError> {
        let source = store.read(identifier)?;
        Self::parse(identifier, &source)
    }

    /// Parse a document from its raw source text.
    pub fn parse(identifier: &str, source: &str) -> Result<Self, DocumentError> {
        let (yaml, body) = split_frontmatter(source);
        let metadata = match yaml {
            Some(yaml) if !yaml.trim().is_empty() => {
                let value: serde_yaml::Value =
                    serde_yaml::from_str(yaml).map_err(|source| DocumentError::Frontmatter {
                        identifier: identifier.to_string(),
                        source,
                    })?;
                Metadata::from_yaml(&value)
            }
            _ => Metadata::default(),
        };
        Ok(Self {
            identifier: identifier.to_string(),
            metadata,
            body: body.to_string(),
        })
    }

    /// Display title: metadata title, else the identifier.
    pub fn title(&self) -> String {
        crate::metadata::resolve(&[self.metadata.title.as_deref(), Some(self.identifier.as_str())])
            .unwrap_or_else(|| self.identifier.clone())
    }
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| {
        Regex::new(r"(?s)\A\x{FEFF}?---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)(.*)\z")
            .expect("frontmatter pattern is valid")
    })
}

/// Split source text into `(frontmatter, body)`.
///
/// The frontmatter is `None` when the text does not open with a fenced block.
pub fn split_frontmatter(source: &str) -> (Option<&str>, &str) {
    match frontmatter_regex().captures(source) {
        Some(caps) => {
            let yaml = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let body = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            (Some(yaml), body)
        }
        None => (None, source),
    }
}
