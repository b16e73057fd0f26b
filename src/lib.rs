//! # Artfolio
//!
//! A static site generator for a single artist's portfolio. A flat directory
//! of Markdown documents with YAML frontmatter is the whole data source: each
//! document is a work, `<series>-YYYY` documents form year-tabbed series,
//! and one document holds the CV.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (documents → structured data)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON, so every decision the scan makes
//! (which year a work got and why, which series entries were dropped, which
//! identifiers redirect) can be inspected before anything is rendered.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Read-only `ContentStore` capability over the content directory |
//! | [`document`] | Frontmatter/body split and document loading |
//! | [`metadata`] | Typed frontmatter with tolerant per-field coercion |
//! | [`year`] | Year inference: frontmatter → filename → body → mtime |
//! | [`naming`] | `<series>-YYYY` identifier parser |
//! | [`series`] | Series pages grouped by year |
//! | [`listing`] | Home listing: collapse, merge, partition, sort |
//! | [`route`] | Request path → page, including retired identifiers |
//! | [`scan`] | Stage 1: runs the builders, produces the manifest |
//! | [`generate`] | Stage 2: renders the manifest to HTML with Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Shared types serialized in the manifest (`WorkEntry`, `YearSpan`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Store Is Injected
//!
//! Builders never open files themselves; they take a `&dyn ContentStore`.
//! Tests describe a document set inline with [`store::MemoryStore`], and the
//! binary hands over an [`store::FsStore`] rooted at `--source`.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed markup is a build error, interpolation is
//! auto-escaped, and there is no template directory to ship.
//!
//! ## Static Output Only
//!
//! Series year selection and redirects are resolved at build time where
//! possible: series pages carry one anchored section per year, and retired
//! identifiers get a meta-refresh stub plus a `_redirects` rule. The output
//! can be dropped on any file server.

pub mod config;
pub mod document;
pub mod generate;
pub mod listing;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod route;
pub mod scan;
pub mod series;
pub mod store;
pub mod types;
pub mod year;

#[cfg(test)]
pub(crate) mod test_helpers;
