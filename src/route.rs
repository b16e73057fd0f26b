//! Request path resolution.
//!
//! Maps a site path to the page that serves it. Generation writes one file per
//! resolvable route; the `route` CLI command exposes the same lookup for
//! debugging links.
//!
//! Resolution order for a single path segment:
//!
//! 1. empty → [`Route::Home`]
//! 2. the CV identifier → [`Route::Cv`] (only if the document exists)
//! 3. a configured series name → [`Route::Series`], with the selected year
//!    narrowed to one the series has (the most recent when absent or unknown)
//! 4. a retired `<from>-YYYY` identifier → [`Route::Redirect`]
//! 5. an existing document → [`Route::Work`]
//! 6. anything else → [`Route::NotFound`]

use crate::config::SiteConfig;
use crate::document::{Document, DocumentError};
use crate::naming;
use crate::series::build_series;
use crate::store::ContentStore;
use std::fmt;

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Cv,
    Work { identifier: String },
    Series { name: String, year: Option<i32> },
    /// Permanent redirect to `location`.
    Redirect { location: String },
    NotFound,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "home"),
            Route::Cv => write!(f, "cv"),
            Route::Work { identifier } => write!(f, "work {identifier}"),
            Route::Series { name, year: None } => write!(f, "series {name}"),
            Route::Series {
                name,
                year: Some(year),
            } => write!(f, "series {name} ({year})"),
            Route::Redirect { location } => write!(f, "301 → {location}"),
            Route::NotFound => write!(f, "not found"),
        }
    }
}

/// Canonical location a retired identifier redirects to, if any rule matches.
pub fn redirect_for(identifier: &str, config: &SiteConfig) -> Option<String> {
    config.redirects.iter().find_map(|rule| {
        naming::member_year(identifier, &rule.from).map(|year| match year {
            0 => format!("/{}/", rule.to),
            year => format!("/{}/#year-{year}", rule.to),
        })
    })
}

/// Resolve a request path such as `/paintings/?year=2020` or `/cv/`.
///
/// Only a malformed document is an error; a missing one is
/// [`Route::NotFound`].
pub fn resolve_route(
    path: &str,
    config: &SiteConfig,
    store: &dyn ContentStore,
) -> Result<Route, DocumentError> {
    let (path, fragment) = match path.split_once('#') {
        Some((p, f)) => (p, Some(f)),
        None => (path, None),
    };
    let (path, query) = match path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path, None),
    };

    let segment = path.trim_matches('/');
    if segment.is_empty() {
        return Ok(Route::Home);
    }
    if segment.contains('/') {
        return Ok(Route::NotFound);
    }

    if segment == config.content.cv {
        return Ok(if store.contains(segment) {
            Route::Cv
        } else {
            Route::NotFound
        });
    }

    if let Some(series) = config.series_named(segment) {
        let requested = query
            .and_then(year_from_query)
            .or_else(|| fragment.and_then(year_from_fragment));
        let page = build_series(store, series, &config.site.primary_artist)?;
        return Ok(Route::Series {
            name: segment.to_string(),
            year: page.select(requested).map(|entry| entry.year),
        });
    }

    if let Some(location) = redirect_for(segment, config) {
        return Ok(Route::Redirect { location });
    }

    match Document::load(store, segment) {
        Ok(doc) => Ok(Route::Work {
            identifier: doc.identifier,
        }),
        Err(DocumentError::NotFound(_)) => Ok(Route::NotFound),
        Err(err) => Err(err),
    }
}

fn year_from_query(query: &str) -> Option<i32> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "year")
        .and_then(|(_, value)| value.parse().ok())
}

fn year_from_fragment(fragment: &str) -> Option<i32> {
    fragment.strip_prefix("year-")?.parse().ok()
}
