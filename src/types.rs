//! Shared types used across the scan and generate stages.
//!
//! These types are serialized into the scan manifest and read back by the
//! generate stage, so both sides see identical shapes.

use crate::year::YearSource;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Where a listed work points: a local page or an off-site URL, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkLink {
    Local { slug: String },
    External { href: String },
}

impl WorkLink {
    pub fn local(slug: impl Into<String>) -> Self {
        WorkLink::Local { slug: slug.into() }
    }

    pub fn external(href: impl Into<String>) -> Self {
        WorkLink::External { href: href.into() }
    }

    /// URL to put in an `href` attribute.
    pub fn url(&self) -> String {
        match self {
            WorkLink::Local { slug } => format!("/{slug}/"),
            WorkLink::External { href } => href.clone(),
        }
    }

    pub fn slug(&self) -> Option<&str> {
        match self {
            WorkLink::Local { slug } => Some(slug),
            WorkLink::External { .. } => None,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, WorkLink::External { .. })
    }
}

/// One line of the home listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkEntry {
    pub link: WorkLink,
    /// Never empty: falls back to the identifier for local documents.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Year range shown instead of `year` for combined series entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_year: Option<String>,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_source: Option<YearSource>,
}

impl WorkEntry {
    /// Text shown next to the title: the range if any, else the year.
    pub fn year_label(&self) -> Option<String> {
        self.display_year
            .clone()
            .or_else(|| self.year.map(|y| y.to_string()))
    }
}

/// Listing order: year descending (missing years sort as 0), then title
/// ascending ignoring case, then exact title, then link.
pub fn compare_works(a: &WorkEntry, b: &WorkEntry) -> Ordering {
    let ya = a.year.unwrap_or(0);
    let yb = b.year.unwrap_or(0);
    yb.cmp(&ya)
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.link.url().cmp(&b.link.url()))
}

/// Inclusive range of years covered by a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSpan {
    pub latest: i32,
    pub earliest: i32,
}

impl YearSpan {
    /// Span of the given years, or `None` when there are none.
    pub fn from_years(years: impl IntoIterator<Item = i32>) -> Option<Self> {
        years.into_iter().fold(None, |span, year| {
            Some(match span {
                None => YearSpan {
                    latest: year,
                    earliest: year,
                },
                Some(YearSpan { latest, earliest }) => YearSpan {
                    latest: latest.max(year),
                    earliest: earliest.min(year),
                },
            })
        })
    }
}

impl fmt::Display for YearSpan {
    /// `2021–2019`, or just `2023` for a single year.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.latest == self.earliest {
            write!(f, "{}", self.latest)
        } else {
            write!(f, "{}\u{2013}{}", self.latest, self.earliest)
        }
    }
}
