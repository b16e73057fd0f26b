//! Series pages: year-stamped documents grouped under year tabs.
//!
//! A series is every document named `<series>-YYYY` in the content store.
//! Each member becomes one [`SeriesEntry`] on the series page. Its year is
//! the frontmatter `year` when that is usable, otherwise the four digits in
//! the filename. Members whose year cannot be resolved either way (a
//! `paintings-0000.mdx`, say) are dropped from the page, logged, and listed
//! in [`SeriesPage::dropped`] so `check` can surface them.
//!
//! Entries are ordered newest first. Equal years are ordered by identifier,
//! so the page never depends on directory enumeration order.

use crate::config::SeriesConfig;
use crate::document::{Document, DocumentError};
use crate::naming;
use crate::store::ContentStore;
use crate::types::YearSpan;
use crate::year::YearSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One year's section of a series page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub year: i32,
    pub identifier: String,
    /// Raw markdown body.
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    pub year_source: YearSource,
}

/// A fully assembled series page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPage {
    /// Series name, also the page route (`/<name>/`).
    pub name: String,
    pub title: String,
    pub empty_message: String,
    /// First artist named by an entry in page order, else the primary artist.
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<YearSpan>,
    pub entries: Vec<SeriesEntry>,
    /// Identifiers left out because their year could not be resolved.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<String>,
}

impl SeriesPage {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct years in page order, for the tab bar.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.entries.iter().map(|e| e.year).collect();
        years.dedup();
        years
    }

    /// The entry for `year`, defaulting to the most recent one.
    ///
    /// A requested year with no entry also falls back to the most recent.
    pub fn select(&self, year: Option<i32>) -> Option<&SeriesEntry> {
        year.and_then(|y| self.entries.iter().find(|e| e.year == y))
            .or_else(|| self.entries.first())
    }
}

/// Build the page for one series from the store.
pub fn build_series(
    store: &dyn ContentStore,
    series: &SeriesConfig,
    primary_artist: &str,
) -> Result<SeriesPage, DocumentError> {
    let mut entries = Vec::new();
    let mut dropped = Vec::new();

    for identifier in store.identifiers()? {
        let Some(captured) = naming::member_year(&identifier, &series.name) else {
            continue;
        };
        let doc = Document::load(store, &identifier)?;

        let resolved = match (doc.metadata.year, captured) {
            (Some(year), _) => Some((year, YearSource::Metadata)),
            (None, 0) => None,
            (None, year) => Some((year, YearSource::Filename)),
        };
        let Some((year, year_source)) = resolved else {
            warn!(identifier = %identifier, series = %series.name, "dropping series entry without a usable year");
            dropped.push(identifier);
            continue;
        };

        debug!(identifier = %identifier, year, source = %year_source, "series entry");
        entries.push(SeriesEntry {
            year,
            identifier,
            body: doc.body,
            artist: doc.metadata.artist,
            year_source,
        });
    }

    entries.sort_by(|a, b| b.year.cmp(&a.year).then_with(|| a.identifier.cmp(&b.identifier)));

    let artist = entries
        .iter()
        .find_map(|e| e.artist.clone())
        .unwrap_or_else(|| primary_artist.to_string());
    let span = YearSpan::from_years(entries.iter().map(|e| e.year));

    Ok(SeriesPage {
        name: series.name.clone(),
        title: series.title.clone(),
        empty_message: series.empty_message.clone(),
        artist,
        span,
        entries,
        dropped,
    })
}
