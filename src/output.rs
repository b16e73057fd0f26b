//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (listed work, series, page) is its semantic identity:
//! positional index, title, and year. Source files and link targets follow as
//! indented context lines, so the output reads as a content inventory while
//! still letting users trace every line back to a document.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Works
//! 001 De Profundis (2022)
//!     Source: de-profundis.mdx (year from frontmatter)
//! 002 Paintings (2021–2019)
//!     Series: /paintings/
//!
//! Works created as Andrea Crespo
//! 001 Step Right Up (2019)
//!     Link: https://www.k-t-z.com/exhibitions/14-step-right-up-andrea-crespo/
//!
//! Series
//! 001 Paintings (3 entries, 2021–2019)
//!     2021 paintings-2021.mdx
//!     Dropped: paintings-0000.mdx (no usable year)
//!
//! Pages
//! 001 Parabiosis
//!     Source: parabiosis.mdx
//! CV
//!     Source: cv.mdx
//!
//! Redirects
//!     paintings-2021 → /paintings/#year-2021
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! CV → cv/index.html
//! 001 Parabiosis → parabiosis/index.html
//! 001 Paintings → paintings/index.html
//! Generated 4 pages, 3 redirects, 1 asset
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::generate::GenerateReport;
use crate::route::Route;
use crate::scan::Manifest;
use crate::types::{WorkEntry, WorkLink};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format a listing entry header: index, title, and year label if any.
///
/// ```text
/// 001 Paintings (2021–2019)
/// 002 Untitled
/// ```
fn entry_header(index: usize, entry: &WorkEntry) -> String {
    match entry.year_label() {
        Some(label) => format!("{} {} ({})", format_index(index), entry.title, label),
        None => format!("{} {}", format_index(index), entry.title),
    }
}

/// Context line describing where a listing entry comes from.
fn entry_context(entry: &WorkEntry, extension: &str, series: &[&str]) -> String {
    match &entry.link {
        WorkLink::External { href } => format!("{}Link: {}", indent(1), href),
        WorkLink::Local { slug } if series.contains(&slug.as_str()) => {
            format!("{}Series: /{}/", indent(1), slug)
        }
        WorkLink::Local { slug } => match entry.year_source {
            Some(source) => format!(
                "{}Source: {}.{} (year from {})",
                indent(1),
                slug,
                extension,
                source
            ),
            None => format!("{}Source: {}.{}", indent(1), slug, extension),
        },
    }
}

fn push_entries(lines: &mut Vec<String>, entries: &[WorkEntry], extension: &str, series: &[&str]) {
    for (i, entry) in entries.iter().enumerate() {
        lines.push(entry_header(i + 1, entry));
        lines.push(entry_context(entry, extension, series));
    }
}

fn plural(count: usize, noun: &str) -> String {
    match (count, noun.strip_suffix('y')) {
        (1, _) => format!("{count} {noun}"),
        (_, Some(stem)) => format!("{count} {stem}ies"),
        (_, None) => format!("{count} {noun}s"),
    }
}

// ============================================================================
// Scan
// ============================================================================

/// Format scan stage output showing the discovered site content.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let ext = manifest.config.content.extension.as_str();
    let combined: Vec<&str> = manifest
        .config
        .listing
        .combined_series
        .iter()
        .map(String::as_str)
        .collect();

    // Listing sections
    lines.push("Works".to_string());
    push_entries(&mut lines, &manifest.listing.primary, ext, &combined);
    if !manifest.listing.other.is_empty() {
        lines.push(String::new());
        lines.push(manifest.config.site.other_works_heading.clone());
        push_entries(&mut lines, &manifest.listing.other, ext, &combined);
    }

    // Series section
    if !manifest.series.is_empty() {
        lines.push(String::new());
        lines.push("Series".to_string());
        for (i, series) in manifest.series.iter().enumerate() {
            let detail = match &series.span {
                Some(span) => format!("{}, {}", plural(series.entries.len(), "entry"), span),
                None => "empty".to_string(),
            };
            lines.push(format!("{} {} ({})", format_index(i + 1), series.title, detail));
            for entry in &series.entries {
                lines.push(format!(
                    "{}{} {}.{}",
                    indent(1),
                    entry.year,
                    entry.identifier,
                    ext
                ));
            }
            for dropped in &series.dropped {
                lines.push(format!(
                    "{}Dropped: {}.{} (no usable year)",
                    indent(1),
                    dropped,
                    ext
                ));
            }
        }
    }

    // Pages section
    if !manifest.works.is_empty() || manifest.cv.is_some() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (i, work) in manifest.works.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), work.title));
            lines.push(format!("{}Source: {}.{}", indent(1), work.identifier, ext));
        }
        if manifest.cv.is_some() {
            lines.push("CV".to_string());
            lines.push(format!(
                "{}Source: {}.{}",
                indent(1),
                manifest.config.content.cv,
                ext
            ));
        }
    }

    // Redirects section
    if !manifest.redirects.is_empty() {
        lines.push(String::new());
        lines.push("Redirects".to_string());
        for stub in &manifest.redirects {
            lines.push(format!(
                "{}{} \u{2192} {}",
                indent(1),
                stub.from,
                stub.location
            ));
        }
    }

    // Config section
    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    } else {
        lines.push(format!("{}(stock defaults)", indent(1)));
    }
    if source_root.join("assets").is_dir() {
        lines.push(format!("{}assets/", indent(1)));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format generate stage output: each page's title followed by `→` and the
/// file written.
pub fn format_generate_output(manifest: &Manifest, report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Home \u{2192} index.html".to_string());
    if manifest.cv.is_some() {
        lines.push("CV \u{2192} cv/index.html".to_string());
    }

    for (i, work) in manifest.works.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}/index.html",
            format_index(i + 1),
            work.title,
            work.identifier
        ));
    }

    for (i, series) in manifest.series.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}/index.html",
            format_index(i + 1),
            series.title,
            series.name
        ));
    }

    lines.push(format!(
        "Generated {}, {}, {}",
        plural(report.pages.len(), "page"),
        plural(report.redirects.len(), "redirect"),
        plural(report.assets, "asset")
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(manifest: &Manifest, report: &GenerateReport) {
    for line in format_generate_output(manifest, report) {
        println!("{}", line);
    }
}

// ============================================================================
// Route
// ============================================================================

/// One line: the requested path and what serves it.
pub fn format_route(path: &str, route: &Route) -> String {
    format!("{} \u{2192} {}", path, route)
}

// ============================================================================
// Tests
// ============================================================================
