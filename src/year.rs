//! Year inference for documents.
//!
//! Every work on the site is placed on a timeline, but not every document
//! says when it was made. The resolver tries four sources in strict order and
//! stops at the first one that yields a year:
//!
//! 1. **Metadata**: the frontmatter `year`, already coerced by
//!    [`crate::metadata::coerce_year`].
//! 2. **Filename**: the first `20xx` token in the identifier
//!    (`paintings-2021` → 2021).
//! 3. **Body**: the first `20xx` token anywhere in the body text.
//! 4. **Modified**: the local-time year of the file's last modification.
//!
//! Filenames are curated, so they outrank body text, which may mention
//! unrelated years. The resolver only returns `None` when all four sources
//! are unavailable, which in practice means the file could not be stat'd.

use crate::document::Document;
use crate::store::ContentStore;
use chrono::{DateTime, Datelike, Local};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use std::time::SystemTime;

/// Where a resolved year came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearSource {
    Metadata,
    Filename,
    Body,
    Modified,
}

impl fmt::Display for YearSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            YearSource::Metadata => "frontmatter",
            YearSource::Filename => "filename",
            YearSource::Body => "body",
            YearSource::Modified => "modified time",
        };
        f.write_str(label)
    }
}

/// A year together with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedYear {
    pub year: i32,
    pub source: YearSource,
}

static YEAR_TOKEN: OnceLock<Regex> = OnceLock::new();

fn year_token() -> &'static Regex {
    YEAR_TOKEN.get_or_init(|| Regex::new(r"20\d{2}").expect("year pattern is valid"))
}

/// First `20xx` token in `text`, if any.
pub fn find_year_token(text: &str) -> Option<i32> {
    year_token()
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

/// Year of a timestamp in local time.
pub fn year_of(time: SystemTime) -> i32 {
    DateTime::<Local>::from(time).year()
}

/// Resolve a year from already-gathered inputs.
pub fn resolve_year_from(
    metadata_year: Option<i32>,
    identifier: &str,
    body: &str,
    modified: Option<SystemTime>,
) -> Option<ResolvedYear> {
    let candidates = [
        (YearSource::Metadata, metadata_year),
        (YearSource::Filename, find_year_token(identifier)),
        (YearSource::Body, find_year_token(body)),
    ];
    candidates
        .into_iter()
        .find_map(|(source, year)| year.map(|year| ResolvedYear { year, source }))
        .or_else(|| {
            modified.map(|time| ResolvedYear {
                year: year_of(time),
                source: YearSource::Modified,
            })
        })
}

/// Resolve a document's year, consulting the store for its timestamp only
/// when the text sources come up empty.
pub fn resolve_year(doc: &Document, store: &dyn ContentStore) -> Option<ResolvedYear> {
    resolve_year_from(doc.metadata.year, &doc.identifier, &doc.body, None)
        .or_else(|| store.modified(&doc.identifier).map(|time| ResolvedYear {
            year: year_of(time),
            source: YearSource::Modified,
        }))
}
