//! Shared test utilities for the artfolio test suite.
//!
//! Provides fixture setup, lookup helpers, and bulk extractors that work with
//! scan-phase data structures (`Manifest`, `WorkEntry`, `SeriesPage`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let paintings = find_entry(&manifest.listing.primary, "Paintings");
//! assert_eq!(paintings.display_year.as_deref(), Some("2021–2019"));
//!
//! assert_eq!(find_series(&manifest, "yehi").years(), vec![2022, 2020]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::{Manifest, WorkPage};
use crate::series::SeriesPage;
use crate::types::WorkEntry;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `<identifier>.mdx` into `dir`.
pub fn write_doc(dir: &Path, identifier: &str, source: &str) {
    write_file(dir, &format!("{identifier}.mdx"), source);
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a listing entry by title. Panics if not found.
pub fn find_entry<'a>(entries: &'a [WorkEntry], title: &str) -> &'a WorkEntry {
    entries.iter().find(|e| e.title == title).unwrap_or_else(|| {
        panic!(
            "entry '{title}' not found. Available: {:?}",
            titles(entries)
        )
    })
}

/// Find a series page by name. Panics if not found.
pub fn find_series<'a>(manifest: &'a Manifest, name: &str) -> &'a SeriesPage {
    manifest
        .series
        .iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = manifest.series.iter().map(|s| s.name.as_str()).collect();
            panic!("series '{name}' not found. Available: {names:?}")
        })
}

/// Find a work page by identifier. Panics if not found.
pub fn find_work<'a>(manifest: &'a Manifest, identifier: &str) -> &'a WorkPage {
    manifest
        .works
        .iter()
        .find(|w| w.identifier == identifier)
        .unwrap_or_else(|| {
            panic!(
                "work '{identifier}' not found. Available: {:?}",
                work_identifiers(manifest)
            )
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Titles in listing order.
pub fn titles(entries: &[WorkEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}

/// Work page identifiers in manifest order.
pub fn work_identifiers(manifest: &Manifest) -> Vec<&str> {
    manifest.works.iter().map(|w| w.identifier.as_str()).collect()
}
