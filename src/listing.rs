//! Home page listing.
//!
//! The home page lists every work once, newest first, split into two
//! sections by attribution. Assembly runs in five steps:
//!
//! 1. Load every document except the CV and the configured companion
//!    documents, resolving a year for each ([`crate::year::resolve_year`]).
//! 2. Pull out members of each combined series (`paintings-YYYY`, ...).
//! 3. Collapse each series into one entry linking to its series page, dated
//!    by its latest year and labelled with the full range.
//! 4. Merge with the remaining documents and the configured external works.
//! 5. Partition by artist into primary and other, sorting each with
//!    [`compare_works`].
//!
//! The listing is a pure function of the store's contents. An unreadable
//! store fails the whole listing; there is no partial result.

use crate::config::{ExternalWork, SeriesConfig, SiteConfig};
use crate::document::{Document, DocumentError};
use crate::metadata::resolve;
use crate::naming;
use crate::store::ContentStore;
use crate::types::{WorkEntry, WorkLink, YearSpan, compare_works};
use crate::year::resolve_year;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The two ordered sections of the home page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Works by the primary artist or with no attribution.
    pub primary: Vec<WorkEntry>,
    /// Works attributed to anyone else.
    pub other: Vec<WorkEntry>,
}

impl Listing {
    pub fn len(&self) -> usize {
        self.primary.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Assemble the home listing from the store.
pub fn assemble_listing(
    store: &dyn ContentStore,
    config: &SiteConfig,
) -> Result<Listing, DocumentError> {
    let primary_artist = config.site.primary_artist.as_str();

    let mut works = Vec::new();
    for identifier in store.identifiers()? {
        if config.content.is_excluded(&identifier) {
            debug!(identifier = %identifier, "excluded from listing");
            continue;
        }
        if config.series_named(&identifier).is_some() {
            debug!(identifier = %identifier, "shadowed by series page");
            continue;
        }
        let doc = Document::load(store, &identifier)?;
        works.push(document_entry(&doc, store, primary_artist));
    }

    let mut merged = Vec::with_capacity(works.len() + config.external_works.len());
    for name in &config.listing.combined_series {
        let Some(series) = config.series_named(name) else {
            continue;
        };
        let (members, rest): (Vec<WorkEntry>, Vec<WorkEntry>) = works
            .into_iter()
            .partition(|w| w.link.slug().is_some_and(|s| naming::is_member_of(s, name)));
        works = rest;
        if let Some(combined) = collapse_series(series, &members) {
            debug!(series = %name, members = members.len(), "collapsed series");
            merged.push(combined);
        }
    }
    merged.extend(works);
    merged.extend(
        config
            .external_works
            .iter()
            .map(|w| external_entry(w, primary_artist)),
    );

    Ok(partition_by_artist(merged, primary_artist))
}

/// Listing entry for one local document.
fn document_entry(doc: &Document, store: &dyn ContentStore, primary_artist: &str) -> WorkEntry {
    let resolved = resolve_year(doc, store);
    WorkEntry {
        link: WorkLink::local(&doc.identifier),
        title: doc.title(),
        year: resolved.map(|r| r.year),
        display_year: None,
        artist: resolve(&[doc.metadata.artist.as_deref(), Some(primary_artist)])
            .unwrap_or_else(|| primary_artist.to_string()),
        year_source: resolved.map(|r| r.source),
    }
}

fn external_entry(work: &ExternalWork, primary_artist: &str) -> WorkEntry {
    WorkEntry {
        link: WorkLink::external(&work.href),
        title: work.title.clone(),
        year: work.year,
        display_year: None,
        artist: resolve(&[work.artist.as_deref(), Some(primary_artist)])
            .unwrap_or_else(|| primary_artist.to_string()),
        year_source: None,
    }
}

/// Collapse the members of a series into one combined entry.
///
/// The entry is dated by the latest member year and labelled with the
/// latest–earliest range; its artist is the first member's. Returns `None`
/// when no member has a year.
pub fn collapse_series(series: &SeriesConfig, members: &[WorkEntry]) -> Option<WorkEntry> {
    let span = YearSpan::from_years(members.iter().filter_map(|m| m.year))?;
    let artist = members.first()?.artist.clone();
    Some(WorkEntry {
        link: WorkLink::local(&series.name),
        title: series.title.clone(),
        year: Some(span.latest),
        display_year: Some(span.to_string()),
        artist,
        year_source: None,
    })
}

/// Split entries into primary and other, each sorted by [`compare_works`].
pub fn partition_by_artist(entries: Vec<WorkEntry>, primary_artist: &str) -> Listing {
    let (mut primary, mut other): (Vec<WorkEntry>, Vec<WorkEntry>) = entries
        .into_iter()
        .partition(|w| w.artist.trim().is_empty() || w.artist == primary_artist);
    primary.sort_by(compare_works);
    other.sort_by(compare_works);
    Listing { primary, other }
}
