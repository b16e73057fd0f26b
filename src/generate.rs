//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and writes the final
//! static HTML site. Nothing here reads the content store; the manifest is the
//! only input besides the `assets/` directory.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): works listing in two sections
//! - **CV page** (`/cv/index.html`): only when a CV document exists
//! - **Work pages** (`/{slug}/index.html`): title, stated artist and year, body
//! - **Series pages** (`/{series}/index.html`): one section per year under a
//!   sticky tab bar
//! - **Redirect stubs** (`/{retired}/index.html`): meta refresh to the series
//!   page, plus a `_redirects` file for hosts that honour it
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── _redirects
//! ├── cv/index.html
//! ├── parabiosis/index.html
//! ├── paintings/index.html
//! ├── paintings-2021/index.html      # Redirect stub
//! └── assets/                        # Copied from content/assets
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/year-tabs.js`: Tab scroll-spy for series pages
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping. Document
//! bodies are Markdown rendered with pulldown-cmark and inserted pre-escaped.

use crate::config::{self, SiteConfig};
use crate::scan::{CvPage, Manifest, RedirectStub, WorkPage};
use crate::series::SeriesPage;
use crate::types::WorkEntry;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What a generate run wrote, relative to the output directory.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub pages: Vec<String>,
    pub redirects: Vec<String>,
    pub assets: usize,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const YEAR_TABS_JS: &str = include_str!("../static/year-tabs.js");

/// Read a manifest written by `scan`.
pub fn load_manifest(manifest_path: &Path) -> Result<Manifest, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    Ok(serde_json::from_str(&manifest_content)?)
}

/// Write the site for `manifest` into `output_dir`.
///
/// `source_dir` is only consulted for its `assets/` directory.
pub fn generate(
    manifest: &Manifest,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    // Generate CSS with colors from config
    let color_css = config::generate_color_css(&manifest.config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);
    let site = Site {
        config: &manifest.config,
        css: &css,
        has_cv: manifest.cv.is_some(),
    };

    fs::create_dir_all(output_dir)?;
    let mut report = GenerateReport::default();

    write_page(output_dir, "", render_index(manifest, &site), &mut report.pages)?;

    if let Some(cv) = &manifest.cv {
        write_page(output_dir, "cv", render_cv_page(cv, &site), &mut report.pages)?;
    }

    for work in &manifest.works {
        let page = render_work_page(work, &site);
        write_page(output_dir, &work.identifier, page, &mut report.pages)?;
    }

    for series in &manifest.series {
        let page = render_series_page(series, &site);
        write_page(output_dir, &series.name, page, &mut report.pages)?;
    }

    for stub in &manifest.redirects {
        let page = render_redirect_page(stub);
        write_page(output_dir, &stub.from, page, &mut report.redirects)?;
    }
    if !manifest.redirects.is_empty() {
        fs::write(output_dir.join("_redirects"), redirects_file(&manifest.redirects))?;
    }

    report.assets = copy_assets(&source_dir.join("assets"), &output_dir.join("assets"))?;

    info!(
        pages = report.pages.len(),
        redirects = report.redirects.len(),
        assets = report.assets,
        output = %output_dir.display(),
        "site generated"
    );
    Ok(report)
}

/// Write `markup` to `<dir>/index.html` under the output root.
fn write_page(
    output_dir: &Path,
    dir: &str,
    markup: Markup,
    written: &mut Vec<String>,
) -> Result<(), GenerateError> {
    let page_dir = output_dir.join(dir);
    fs::create_dir_all(&page_dir)?;
    fs::write(page_dir.join("index.html"), markup.into_string())?;
    let relative = if dir.is_empty() {
        "index.html".to_string()
    } else {
        format!("{dir}/index.html")
    };
    debug!(page = %relative, "wrote page");
    written.push(relative);
    Ok(())
}

/// Copy the assets tree verbatim. Returns the number of files copied.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)?;
        copied += 1;
    }
    Ok(copied)
}

/// Netlify/Cloudflare `_redirects` rules, one permanent redirect per path form.
pub fn redirects_file(stubs: &[RedirectStub]) -> String {
    let mut out = String::new();
    for stub in stubs {
        out.push_str(&format!("/{}  {}  301\n", stub.from, stub.location));
        out.push_str(&format!("/{}/  {}  301\n", stub.from, stub.location));
    }
    out
}

/// Render a Markdown body to HTML.
pub fn render_markdown(body: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(body, options);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}

// ============================================================================
// HTML Components
// ============================================================================

/// Site-wide values every page layout needs.
struct Site<'a> {
    config: &'a SiteConfig,
    css: &'a str,
    has_cv: bool,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Works,
    Cv,
}

/// Renders the base HTML document structure
fn base_document(title: &str, site: &Site, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(site.config.site.description);
                title { (title) }
                style { (PreEscaped(site.css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Renders the shared header: site name and the Works / CV links.
fn site_header(site: &Site, current: Section) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (site.config.site.title) }
            nav.site-nav {
                a href="/" class=[(current == Section::Works).then_some("current")] { "Works" }
                @if site.has_cv {
                    a href="/cv/" class=[(current == Section::Cv).then_some("current")] { "CV" }
                }
            }
        }
    }
}

/// Renders one listing line. External works open in a new tab.
fn render_entry(entry: &WorkEntry) -> Markup {
    let external = entry.link.is_external();
    html! {
        li.work-item {
            a.work-link
                href=(entry.link.url())
                target=[external.then_some("_blank")]
                rel=[external.then_some("noopener noreferrer")]
            {
                span.work-title { (entry.title) }
            }
            @if let Some(label) = entry.year_label() {
                span.work-year { (label) }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page: primary works, then works by anyone else
fn render_index(manifest: &Manifest, site: &Site) -> Markup {
    let listing = &manifest.listing;
    let content = html! {
        (site_header(site, Section::Works))
        main.index-page {
            section.works {
                h2 { "Works" }
                ul.work-list {
                    @for entry in &listing.primary {
                        (render_entry(entry))
                    }
                }
            }
            @if !listing.other.is_empty() {
                section.works.other-works {
                    h2 { (site.config.site.other_works_heading) }
                    ul.work-list {
                        @for entry in &listing.other {
                            (render_entry(entry))
                        }
                    }
                }
            }
        }
    };

    base_document(&site.config.site.title, site, None, content)
}

/// Renders a work detail page
fn render_work_page(work: &WorkPage, site: &Site) -> Markup {
    let content = html! {
        (site_header(site, Section::Works))
        main.work-page {
            article.work {
                header.work-header {
                    h1 { (work.title) }
                    @if let Some(artist) = &work.artist {
                        p.work-artist { (artist) }
                    }
                    @if let Some(year) = work.year {
                        p.work-year { (year) }
                    }
                }
                div.prose {
                    (PreEscaped(render_markdown(&work.body)))
                }
            }
        }
    };

    base_document(&work.title, site, None, content)
}

fn render_cv_page(cv: &CvPage, site: &Site) -> Markup {
    let content = html! {
        (site_header(site, Section::Cv))
        main.cv-page {
            article.prose {
                (PreEscaped(render_markdown(&cv.body)))
            }
        }
    };

    base_document(&cv.title, site, None, content)
}

/// Renders a series page: header, year tabs, one section per year
fn render_series_page(series: &SeriesPage, site: &Site) -> Markup {
    let years = series.years();
    let content = html! {
        (site_header(site, Section::Works))
        main.series-page {
            header.series-header {
                h1 { (series.title) }
                @if !series.is_empty() {
                    p.series-artist { (series.artist) }
                }
                @if let Some(span) = &series.span {
                    p.series-span { (span.to_string()) }
                }
            }
            @if series.is_empty() {
                p.empty-state { (series.empty_message) }
            } @else {
                nav.year-tabs aria-label="Years" {
                    @for (idx, year) in years.iter().enumerate() {
                        a.year-tab.active[idx == 0]
                            href={ "#year-" (year) }
                            data-year=(year)
                        { (year) }
                    }
                }
                @for year in &years {
                    section.series-year id={ "year-" (year) } aria-labelledby={ "heading-" (year) } {
                        h2 id={ "heading-" (year) } { (year) }
                        @for entry in series.entries.iter().filter(|e| e.year == *year) {
                            div.prose {
                                (PreEscaped(render_markdown(&entry.body)))
                            }
                        }
                    }
                }
                script { (PreEscaped(YEAR_TABS_JS)) }
            }
        }
    };

    let title = format!("{} \u{2014} {}", series.title, series.artist);
    base_document(&title, site, Some("series-view"), content)
}

/// Renders a redirect stub pointing at the series page
fn render_redirect_page(stub: &RedirectStub) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content={ "0; url=" (stub.location) };
                link rel="canonical" href=(stub.location);
                title { "Redirecting\u{2026}" }
            }
            body {
                p {
                    "This page has moved to "
                    a href=(stub.location) { (stub.location) }
                    "."
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Listing;
    use crate::series::SeriesEntry;
    use crate::types::{WorkLink, YearSpan};
    use crate::year::YearSource;
    use tempfile::TempDir;

    fn site(config: &SiteConfig) -> Site<'_> {
        Site {
            config,
            css: "",
            has_cv: true,
        }
    }

    fn entry(title: &str, link: WorkLink, year: Option<i32>) -> WorkEntry {
        WorkEntry {
            link,
            title: title.to_string(),
            year,
            display_year: None,
            artist: "A".to_string(),
            year_source: None,
        }
    }

    fn manifest(listing: Listing) -> Manifest {
        Manifest {
            listing,
            series: vec![],
            works: vec![],
            cv: None,
            redirects: vec![],
            config: SiteConfig::default(),
        }
    }

    fn series_page(entries: Vec<SeriesEntry>) -> SeriesPage {
        SeriesPage {
            name: "yehi".to_string(),
            title: "Yehi".to_string(),
            empty_message: "Entries will appear here once they are published.".to_string(),
            artist: "Eduardo Andrés Crespo".to_string(),
            span: YearSpan::from_years(entries.iter().map(|e| e.year)),
            entries,
            dropped: vec![],
        }
    }

    fn series_entry(year: i32, body: &str) -> SeriesEntry {
        SeriesEntry {
            year,
            identifier: format!("yehi-{year}"),
            body: body.to_string(),
            artist: None,
            year_source: YearSource::Filename,
        }
    }

    // =========================================================================
    // Components
    // =========================================================================

    #[test]
    fn base_document_includes_doctype() {
        let config = SiteConfig::default();
        let content = html! { p { "test" } };
        let doc = base_document("Test", &site(&config), None, content).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Test</title>"));
        assert!(doc.contains("Artist portfolio of Eduardo Andrés Crespo"));
    }

    #[test]
    fn header_links_works_and_cv() {
        let config = SiteConfig::default();
        let html = site_header(&site(&config), Section::Cv).into_string();
        assert!(html.contains(r#"href="/""#));
        assert!(html.contains(r#"href="/cv/""#));
        assert!(html.contains(r#"class="current""#));
    }

    #[test]
    fn header_hides_cv_when_absent() {
        let config = SiteConfig::default();
        let site = Site {
            has_cv: false,
            ..site(&config)
        };
        let html = site_header(&site, Section::Works).into_string();
        assert!(!html.contains("/cv/"));
    }

    #[test]
    fn external_entry_opens_new_tab() {
        let html = render_entry(&entry(
            "Step Right Up",
            WorkLink::external("https://example.com/x"),
            Some(2019),
        ))
        .into_string();
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
        assert!(html.contains("https://example.com/x"));
    }

    #[test]
    fn local_entry_stays_in_tab() {
        let html =
            render_entry(&entry("Parabiosis", WorkLink::local("parabiosis"), Some(2021)))
                .into_string();
        assert!(html.contains(r#"href="/parabiosis/""#));
        assert!(!html.contains("_blank"));
        assert!(html.contains("2021"));
    }

    #[test]
    fn entry_prefers_display_year() {
        let mut e = entry("Paintings", WorkLink::local("paintings"), Some(2021));
        e.display_year = Some("2021\u{2013}2019".to_string());
        let html = render_entry(&e).into_string();
        assert!(html.contains("2021\u{2013}2019"));
    }

    #[test]
    fn markdown_extensions_enabled() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    // =========================================================================
    // Page renderers
    // =========================================================================

    #[test]
    fn index_has_both_sections() {
        let listing = Listing {
            primary: vec![entry("Mine", WorkLink::local("mine"), Some(2020))],
            other: vec![entry("Theirs", WorkLink::local("theirs"), Some(2019))],
        };
        let manifest = manifest(listing);
        let html = render_index(&manifest, &site(&manifest.config)).into_string();
        assert!(html.contains("Works"));
        assert!(html.contains("Works created as Andrea Crespo"));
        assert!(html.find("Mine").unwrap() < html.find("Theirs").unwrap());
    }

    #[test]
    fn index_omits_empty_other_section() {
        let listing = Listing {
            primary: vec![entry("Mine", WorkLink::local("mine"), Some(2020))],
            other: vec![],
        };
        let manifest = manifest(listing);
        let html = render_index(&manifest, &site(&manifest.config)).into_string();
        assert!(!html.contains("other-works"));
    }

    #[test]
    fn work_page_shows_stated_metadata() {
        let config = SiteConfig::default();
        let work = WorkPage {
            identifier: "reliquary".into(),
            title: "Reliquary".into(),
            artist: Some("Andrea Crespo".into()),
            year: Some(2017),
            body: "Some **bold** text".into(),
        };
        let html = render_work_page(&work, &site(&config)).into_string();
        assert!(html.contains("<h1>Reliquary</h1>"));
        assert!(html.contains("Andrea Crespo"));
        assert!(html.contains("2017"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn work_page_omits_missing_metadata() {
        let config = SiteConfig::default();
        let work = WorkPage {
            identifier: "notes".into(),
            title: "Notes".into(),
            artist: None,
            year: None,
            body: String::new(),
        };
        let html = render_work_page(&work, &site(&config)).into_string();
        assert!(!html.contains("work-artist"));
        assert!(!html.contains("work-year"));
    }

    #[test]
    fn cv_page_title() {
        let config = SiteConfig::default();
        let cv = CvPage {
            title: "Eduardo Andrés Crespo \u{2014} CV".into(),
            body: "## Education".into(),
        };
        let html = render_cv_page(&cv, &site(&config)).into_string();
        assert!(html.contains("<title>Eduardo Andrés Crespo \u{2014} CV</title>"));
        assert!(html.contains("<h2>Education</h2>"));
    }

    #[test]
    fn series_page_has_tabs_and_sections() {
        let config = SiteConfig::default();
        let page = series_page(vec![
            series_entry(2022, "Second cycle"),
            series_entry(2020, "First cycle"),
        ]);
        let html = render_series_page(&page, &site(&config)).into_string();
        assert!(html.contains(r##"href="#year-2022""##));
        assert!(html.contains(r#"id="year-2020""#));
        assert!(html.contains("2022\u{2013}2020"));
        assert!(html.contains("Second cycle"));
        assert!(html.contains("year-tabs"));
        assert!(html.find(r#"id="year-2022""#).unwrap() < html.find(r#"id="year-2020""#).unwrap());
    }

    #[test]
    fn series_page_marks_latest_tab_active() {
        let config = SiteConfig::default();
        let page = series_page(vec![
            series_entry(2022, "Second cycle"),
            series_entry(2020, "First cycle"),
        ]);
        let html = render_series_page(&page, &site(&config)).into_string();
        assert!(html.contains(r##"<a class="year-tab active" href="#year-2022""##));
        assert!(html.contains(r##"<a class="year-tab" href="#year-2020""##));
        assert_eq!(html.matches(r#"class="year-tab active""#).count(), 1);
    }

    #[test]
    fn series_page_groups_same_year() {
        let config = SiteConfig::default();
        let page = series_page(vec![series_entry(2020, "One"), series_entry(2020, "Two")]);
        let html = render_series_page(&page, &site(&config)).into_string();
        assert_eq!(html.matches(r#"id="year-2020""#).count(), 1);
        assert!(html.contains("One") && html.contains("Two"));
    }

    #[test]
    fn empty_series_shows_message() {
        let config = SiteConfig::default();
        let page = series_page(vec![]);
        let html = render_series_page(&page, &site(&config)).into_string();
        assert!(html.contains("Entries will appear here once they are published."));
        assert!(!html.contains("year-tabs"));
        assert!(!html.contains("series-artist"));
    }

    #[test]
    fn redirect_page_points_at_series() {
        let stub = RedirectStub {
            from: "paintings-2020".into(),
            location: "/paintings/#year-2020".into(),
        };
        let html = render_redirect_page(&stub).into_string();
        assert!(html.contains(r#"content="0; url=/paintings/#year-2020""#));
        assert!(html.contains(r#"rel="canonical""#));
    }

    #[test]
    fn redirects_file_lines() {
        let stubs = vec![RedirectStub {
            from: "paintings-2020".into(),
            location: "/paintings/#year-2020".into(),
        }];
        assert_eq!(
            redirects_file(&stubs),
            "/paintings-2020  /paintings/#year-2020  301\n/paintings-2020/  /paintings/#year-2020  301\n"
        );
    }

    #[test]
    fn html_escape_in_maud() {
        let html = render_entry(&entry(
            "<script>alert('xss')</script>",
            WorkLink::local("x"),
            None,
        ))
        .into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    // =========================================================================
    // File output
    // =========================================================================

    #[test]
    fn generate_writes_pages_and_assets() {
        let source = TempDir::new().unwrap();
        fs::create_dir_all(source.path().join("assets/fonts")).unwrap();
        fs::write(source.path().join("assets/fonts/a.woff2"), "font").unwrap();
        let out = TempDir::new().unwrap();

        let mut manifest = manifest(Listing::default());
        manifest.works.push(WorkPage {
            identifier: "parabiosis".into(),
            title: "Parabiosis".into(),
            artist: None,
            year: Some(2021),
            body: "Body".into(),
        });
        manifest.redirects.push(RedirectStub {
            from: "paintings-2019".into(),
            location: "/paintings/#year-2019".into(),
        });

        let report = generate(&manifest, source.path(), out.path()).unwrap();
        assert!(out.path().join("index.html").exists());
        assert!(out.path().join("parabiosis/index.html").exists());
        assert!(out.path().join("paintings-2019/index.html").exists());
        assert!(out.path().join("_redirects").exists());
        assert!(out.path().join("assets/fonts/a.woff2").exists());
        assert!(!out.path().join("cv").exists());
        assert_eq!(report.assets, 1);
        assert_eq!(report.pages, vec!["index.html", "parabiosis/index.html"]);
        assert_eq!(report.redirects, vec!["paintings-2019/index.html"]);
    }

    #[test]
    fn generate_reads_manifest_file() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = tmp.path().join("manifest.json");
        let manifest = manifest(Listing::default());
        fs::write(&manifest_path, serde_json::to_string(&manifest).unwrap()).unwrap();

        let loaded = load_manifest(&manifest_path).unwrap();
        let out = tmp.path().join("dist");
        generate(&loaded, tmp.path(), &out).unwrap();
        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("--color-bg: #ffffff"));
    }

    #[test]
    fn generate_rejects_bad_manifest() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = tmp.path().join("manifest.json");
        fs::write(&manifest_path, "{not json").unwrap();
        assert!(matches!(
            load_manifest(&manifest_path),
            Err(GenerateError::Json(_))
        ));
    }
}
