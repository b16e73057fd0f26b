//! Content scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads every document in the content store,
//! runs the listing and series builders, and produces a [`Manifest`] the
//! generate stage renders without touching the store again.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── assets/                      # Copied verbatim to the output
//! ├── cv.mdx                       # CV, rendered at /cv/
//! ├── parabiosis.mdx               # Work: /parabiosis/
//! ├── parabiosis-credits.mdx       # Companion: own page, not listed
//! ├── paintings-2019.mdx           # Series member, shown on /paintings/
//! ├── paintings-2021.mdx
//! └── yehi-2020.mdx                # Series member, also listed on its own
//! ```
//!
//! ## Output
//!
//! Produces a [`Manifest`] containing:
//! - The home listing, already partitioned and sorted
//! - One page per configured series
//! - One detail page per remaining document
//! - The CV page, when a CV document exists
//! - Redirect stubs for retired identifiers
//! - Site configuration
//!
//! ## Validation
//!
//! - An unreadable content directory is an error
//! - Malformed frontmatter in any document is an error naming the document
//! - Series members without a usable year are dropped and reported, not fatal

use crate::config::{self, SiteConfig};
use crate::document::{Document, DocumentError};
use crate::listing::{Listing, assemble_listing};
use crate::route::redirect_for;
use crate::series::{SeriesPage, build_series};
use crate::store::{ContentStore, FsStore, StoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Content store error: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub listing: Listing,
    pub series: Vec<SeriesPage>,
    pub works: Vec<WorkPage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv: Option<CvPage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub redirects: Vec<RedirectStub>,
    pub config: SiteConfig,
}

impl Manifest {
    /// Identifiers dropped from any series page.
    pub fn dropped(&self) -> impl Iterator<Item = &str> {
        self.series
            .iter()
            .flat_map(|s| s.dropped.iter().map(String::as_str))
    }
}

/// A work detail page.
///
/// Artist and year are shown only when the document states them; the
/// listing's inferred values are not repeated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkPage {
    pub identifier: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Raw markdown body.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvPage {
    pub title: String,
    pub body: String,
}

/// A retired identifier and where it now lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectStub {
    pub from: String,
    pub location: String,
}

/// Scan the content directory at `root`.
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    // Load site config (uses defaults if config.toml doesn't exist)
    let config = config::load_config(root)?;
    let store = FsStore::new(root, config.content.extension.clone());
    info!(root = %store.root().display(), "scanning content");
    scan_store(&store, config)
}

/// Build the manifest from any content store.
pub fn scan_store(store: &dyn ContentStore, config: SiteConfig) -> Result<Manifest, ScanError> {
    let identifiers = store.identifiers()?;
    debug!(documents = identifiers.len(), "listed content store");

    let listing = assemble_listing(store, &config)?;
    if listing.is_empty() {
        warn!("no works to list; the home page will be empty");
    }

    let mut series = Vec::with_capacity(config.series.len());
    for series_config in &config.series {
        let page = build_series(store, series_config, &config.site.primary_artist)?;
        debug!(series = %page.name, entries = page.entries.len(), "built series page");
        series.push(page);
    }

    let mut works = Vec::new();
    let mut redirects = Vec::new();
    for identifier in &identifiers {
        if *identifier == config.content.cv {
            continue;
        }
        if let Some(location) = redirect_for(identifier, &config) {
            redirects.push(RedirectStub {
                from: identifier.clone(),
                location,
            });
            continue;
        }
        if config.series_named(identifier).is_some() {
            warn!(identifier = %identifier, "document shadowed by series page of the same name");
            continue;
        }
        let doc = Document::load(store, identifier)?;
        works.push(WorkPage {
            identifier: doc.identifier.clone(),
            title: doc.title(),
            artist: doc.metadata.artist,
            year: doc.metadata.year,
            body: doc.body,
        });
    }

    let cv = if store.contains(&config.content.cv) {
        let doc = Document::load(store, &config.content.cv)?;
        Some(CvPage {
            title: format!("{} \u{2014} CV", config.site.primary_artist),
            body: doc.body,
        })
    } else {
        warn!(identifier = %config.content.cv, "no CV document; /cv/ will not be generated");
        None
    };

    info!(
        listed = listing.len(),
        works = works.len(),
        series = series.len(),
        redirects = redirects.len(),
        "scan complete"
    );

    Ok(Manifest {
        listing,
        series,
        works,
        cv,
        redirects,
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    // =========================================================================
    // Fixture scans
    // =========================================================================

    #[test]
    fn fixture_listing_primary_order() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(
            titles(&manifest.listing.primary),
            vec![
                "De Profundis",
                "Yehi 2022",
                "Paintings",
                "Parabiosis",
                "Studio Notes",
                "Yehi 2020",
            ]
        );
    }

    #[test]
    fn fixture_listing_other_section() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(
            titles(&manifest.listing.other),
            vec!["Step Right Up", "Reliquary"]
        );
        assert!(find_entry(&manifest.listing.other, "Step Right Up").link.is_external());
    }

    #[test]
    fn fixture_paintings_collapsed() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let paintings = find_entry(&manifest.listing.primary, "Paintings");
        assert_eq!(paintings.year, Some(2021));
        assert_eq!(paintings.display_year.as_deref(), Some("2021\u{2013}2019"));
    }

    #[test]
    fn fixture_years_report_their_source() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let notes = find_entry(&manifest.listing.primary, "Studio Notes");
        assert_eq!(notes.year_source, Some(crate::year::YearSource::Filename));
        let profundis = find_entry(&manifest.listing.primary, "De Profundis");
        assert_eq!(profundis.year, Some(2022));
        assert_eq!(
            profundis.year_source,
            Some(crate::year::YearSource::Metadata)
        );
    }

    #[test]
    fn fixture_series_pages() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(find_series(&manifest, "paintings").years(), vec![2021, 2020, 2019]);
        assert_eq!(find_series(&manifest, "yehi").years(), vec![2022, 2020]);
    }

    #[test]
    fn fixture_work_pages_exclude_cv_and_retired() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let ids = work_identifiers(&manifest);
        assert!(ids.contains(&"parabiosis-credits"));
        assert!(ids.contains(&"yehi-2020"));
        assert!(!ids.contains(&"cv"));
        assert!(!ids.iter().any(|id| id.starts_with("paintings-")));
    }

    #[test]
    fn fixture_redirect_stubs() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let stub = manifest
            .redirects
            .iter()
            .find(|r| r.from == "paintings-2020")
            .unwrap();
        assert_eq!(stub.location, "/paintings/#year-2020");
        assert_eq!(manifest.redirects.len(), 3);
    }

    #[test]
    fn fixture_cv_page() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let cv = manifest.cv.unwrap();
        assert_eq!(cv.title, "Eduardo Andrés Crespo \u{2014} CV");
        assert!(cv.body.contains("Education"));
    }

    #[test]
    fn work_page_shows_only_stated_metadata() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let notes = find_work(&manifest, "studio-notes-2020");
        assert_eq!(notes.title, "Studio Notes");
        assert_eq!(notes.year, None);
        assert_eq!(notes.artist, None);
        let reliquary = find_work(&manifest, "reliquary");
        assert_eq!(reliquary.artist.as_deref(), Some("Andrea Crespo"));
        assert_eq!(reliquary.year, Some(2017));
    }

    // =========================================================================
    // Config integration
    // =========================================================================

    #[test]
    fn config_loaded_from_fixtures() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.site.description, "Fixture portfolio");
        assert_eq!(manifest.config.colors.light.background, "#fafafa");
    }

    #[test]
    fn default_config_when_no_toml() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "work", "---\ntitle: Work\n---\n");
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.colors.light.background, "#ffffff");
        assert_eq!(manifest.config.content.extension, "mdx");
    }

    #[test]
    fn custom_extension_from_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[content]\nextension = \"md\"\n").unwrap();
        write_file(tmp.path(), "work.md", "---\ntitle: Markdown Work\nyear: 2020\n---\n");
        write_doc(tmp.path(), "ignored", "---\ntitle: Ignored\n---\n");
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(work_identifiers(&manifest), vec!["work"]);
    }

    #[test]
    fn invalid_config_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[site]\nprimary_artist = \"\"\n").unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::Config(_))));
    }

    // =========================================================================
    // Failure modes
    // =========================================================================

    #[test]
    fn missing_content_dir_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("does-not-exist"));
        assert!(matches!(result, Err(ScanError::Store(StoreError::Io { .. }))));
    }

    #[test]
    fn malformed_frontmatter_names_document() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "broken", "---\ntitle: [unclosed\n---\n");
        let err = scan(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn missing_cv_is_not_fatal() {
        let store = MemoryStore::new().with("work", "---\nyear: 2020\n---\n");
        let manifest = scan_store(&store, SiteConfig::default()).unwrap();
        assert_eq!(manifest.cv, None);
        assert_eq!(work_identifiers(&manifest), vec!["work"]);
    }

    #[test]
    fn dropped_series_members_reported() {
        let store = MemoryStore::new()
            .with("yehi-0000", "")
            .with("yehi-2021", "");
        let manifest = scan_store(&store, SiteConfig::default()).unwrap();
        assert_eq!(manifest.dropped().collect::<Vec<_>>(), vec!["yehi-0000"]);
    }

    #[test]
    fn document_named_like_series_is_shadowed() {
        let store = MemoryStore::new().with("yehi", "---\ntitle: Yehi overview\n---\n");
        let manifest = scan_store(&store, SiteConfig::default()).unwrap();
        assert!(manifest.works.is_empty());
        assert!(manifest.listing.primary.is_empty());
    }

    #[test]
    fn manifest_survives_json() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let json = serde_json::to_string(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.listing, manifest.listing);
        assert_eq!(back.series, manifest.series);
        assert_eq!(back.works, manifest.works);
        assert_eq!(back.redirects, manifest.redirects);
    }
}
