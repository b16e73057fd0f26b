//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by an optional `config.toml` in the content root.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Eduardo Andrés Crespo"
//! description = "Artist portfolio of Eduardo Andrés Crespo"
//! primary_artist = "Eduardo Andrés Crespo"
//! other_works_heading = "Works created as Andrea Crespo"
//!
//! [content]
//! extension = "mdx"          # Documents are <identifier>.<extension>
//! cv = "cv"                  # Identifier of the CV document
//! excluded = ["parabiosis-credits", "de-profundis-video", "addendum"]
//!
//! [listing]
//! combined_series = ["paintings"]   # Collapsed into one home-page entry
//!
//! [[series]]
//! name = "paintings"
//! title = "Paintings"
//! empty_message = "Paintings will appear here once they are published."
//!
//! [[redirects]]
//! from = "paintings"         # paintings-YYYY ...
//! to = "paintings"           # ... → /paintings/#year-YYYY
//!
//! [[external_works]]
//! title = "Step Right Up"
//! href = "https://…"
//! year = 2019
//! artist = "Andrea Crespo"
//!
//! [colors.light]
//! background = "#ffffff"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: tables merge key by key, while arrays
//! (`excluded`, `[[series]]`, `[[external_works]]`) replace the stock value
//! wholesale.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults; a user file only lists what it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity and artist attribution.
    pub site: SiteSection,
    /// Content store layout.
    pub content: ContentConfig,
    /// Home listing behaviour.
    pub listing: ListingConfig,
    /// Year-tabbed series pages.
    pub series: Vec<SeriesConfig>,
    /// Retired identifier patterns and where they now live.
    pub redirects: Vec<RedirectRule>,
    /// Off-site works merged into the home listing.
    pub external_works: Vec<ExternalWork>,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteSection::default(),
            content: ContentConfig::default(),
            listing: ListingConfig::default(),
            series: default_series(),
            redirects: default_redirects(),
            external_works: default_external_works(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.primary_artist.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.primary_artist must not be empty".into(),
            ));
        }
        if self.content.extension.trim().is_empty() || self.content.extension.contains('.') {
            return Err(ConfigError::Validation(
                "content.extension must be a bare extension like \"mdx\"".into(),
            ));
        }

        let mut names = HashSet::new();
        for series in &self.series {
            if series.name.trim().is_empty() || series.name.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "series name {:?} is not a valid identifier",
                    series.name
                )));
            }
            if !names.insert(series.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "series {:?} is defined twice",
                    series.name
                )));
            }
        }
        for combined in &self.listing.combined_series {
            if !names.contains(combined.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "listing.combined_series names unknown series {combined:?}"
                )));
            }
        }
        for rule in &self.redirects {
            if rule.from.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "redirects.from must not be empty".into(),
                ));
            }
            if !names.contains(rule.to.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "redirect from {:?} targets unknown series {:?}",
                    rule.from, rule.to
                )));
            }
        }
        for work in &self.external_works {
            if work.title.trim().is_empty() || work.href.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "external_works entries need a title and an href".into(),
                ));
            }
        }
        Ok(())
    }

    /// Look up a series by name.
    pub fn series_named(&self, name: &str) -> Option<&SeriesConfig> {
        self.series.iter().find(|s| s.name == name)
    }
}

/// Site identity and attribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// `<title>` of the home page and heading of the site.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Attribution used when a document names no artist.
    pub primary_artist: String,
    /// Heading of the home-page section for works by any other artist.
    pub other_works_heading: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Eduardo Andrés Crespo".to_string(),
            description: "Artist portfolio of Eduardo Andrés Crespo".to_string(),
            primary_artist: "Eduardo Andrés Crespo".to_string(),
            other_works_heading: "Works created as Andrea Crespo".to_string(),
        }
    }
}

/// Content store layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// File extension of documents, without the dot.
    pub extension: String,
    /// Identifier of the CV document.
    pub cv: String,
    /// Companion documents left out of the home listing.
    pub excluded: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            extension: "mdx".to_string(),
            cv: "cv".to_string(),
            excluded: vec![
                "parabiosis-credits".to_string(),
                "de-profundis-video".to_string(),
                "addendum".to_string(),
            ],
        }
    }
}

impl ContentConfig {
    /// Whether an identifier is kept out of the home listing.
    pub fn is_excluded(&self, identifier: &str) -> bool {
        identifier == self.cv || self.excluded.iter().any(|e| e == identifier)
    }
}

/// Home listing behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Series whose members collapse into a single combined entry.
    pub combined_series: Vec<String>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            combined_series: vec!["paintings".to_string()],
        }
    }
}

/// A year-tabbed series page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesConfig {
    /// Identifier prefix: members are `<name>-YYYY`. Also the page route.
    pub name: String,
    /// Page heading and combined-entry title.
    pub title: String,
    /// Shown when the series has no publishable entries.
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
}

fn default_empty_message() -> String {
    "Entries will appear here once they are published.".to_string()
}

/// A retired `<from>-YYYY` pattern now served by series `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedirectRule {
    pub from: String,
    pub to: String,
}

/// An off-site work shown in the home listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExternalWork {
    pub title: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Years, attributions, secondary labels.
    pub text_muted: String,
    /// Header rule and tab bar border.
    pub border: String,
    /// Work links.
    pub link: String,
    /// Work links on hover.
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#171717".to_string(),
            text_muted: "#6b7280".to_string(),
            border: "#e5e7eb".to_string(),
            link: "#2563eb".to_string(),
            link_hover: "#1d4ed8".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            text: "#ededed".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#262626".to_string(),
            link: "#60a5fa".to_string(),
            link_hover: "#93c5fd".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

fn default_series() -> Vec<SeriesConfig> {
    vec![
        SeriesConfig {
            name: "paintings".to_string(),
            title: "Paintings".to_string(),
            empty_message: "Paintings will appear here once they are published.".to_string(),
        },
        SeriesConfig {
            name: "yehi".to_string(),
            title: "Yehi".to_string(),
            empty_message: default_empty_message(),
        },
    ]
}

fn default_redirects() -> Vec<RedirectRule> {
    vec![RedirectRule {
        from: "paintings".to_string(),
        to: "paintings".to_string(),
    }]
}

fn default_external_works() -> Vec<ExternalWork> {
    vec![ExternalWork {
        title: "Step Right Up".to_string(),
        href: "https://www.k-t-z.com/exhibitions/14-step-right-up-andrea-crespo/".to_string(),
        year: Some(2019),
        artist: Some("Andrea Crespo".to_string()),
    }]
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# artfolio configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Place this file in the content root.
#
# Tables merge key by key with the defaults; arrays replace them wholesale.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
title = "Eduardo Andrés Crespo"
description = "Artist portfolio of Eduardo Andrés Crespo"

# Attribution for documents without an `artist` frontmatter key. Works by
# this artist are listed under "Works"; everything else goes to the section
# below.
primary_artist = "Eduardo Andrés Crespo"
other_works_heading = "Works created as Andrea Crespo"

# ---------------------------------------------------------------------------
# Content store
# ---------------------------------------------------------------------------
[content]
# Documents are <identifier>.<extension> files in the content root.
extension = "mdx"

# Identifier of the CV document (rendered at /cv/, never listed).
cv = "cv"

# Companion documents kept out of the home listing. They still get pages.
excluded = ["parabiosis-credits", "de-profundis-video", "addendum"]

# ---------------------------------------------------------------------------
# Home listing
# ---------------------------------------------------------------------------
[listing]
# Series whose <name>-YYYY members collapse into one entry on the home page,
# linking to the series page and showing the latest–earliest year range.
combined_series = ["paintings"]

# ---------------------------------------------------------------------------
# Series pages: /<name>/ shows every <name>-YYYY document under year tabs.
# ---------------------------------------------------------------------------
[[series]]
name = "paintings"
title = "Paintings"
empty_message = "Paintings will appear here once they are published."

[[series]]
name = "yehi"
title = "Yehi"
empty_message = "Entries will appear here once they are published."

# ---------------------------------------------------------------------------
# Retired identifiers: /<from>-YYYY redirects to /<to>/#year-YYYY
# ---------------------------------------------------------------------------
[[redirects]]
from = "paintings"
to = "paintings"

# ---------------------------------------------------------------------------
# Off-site works merged into the home listing.
# ---------------------------------------------------------------------------
[[external_works]]
title = "Step Right Up"
href = "https://www.k-t-z.com/exhibitions/14-step-right-up-andrea-crespo/"
year = 2019
artist = "Andrea Crespo"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#171717"
text_muted = "#6b7280"    # Years, attributions
border = "#e5e7eb"
link = "#2563eb"
link_hover = "#1d4ed8"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0a"
text = "#ededed"
text_muted = "#9ca3af"
border = "#262626"
link = "#60a5fa"
link_hover = "#93c5fd"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-link: {light_link};
    --color-link-hover: {light_link_hover};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-link: {dark_link};
        --color-link-hover: {dark_link_hover};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_link = colors.light.link,
        light_link_hover = colors.light.link_hover,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_link = colors.dark.link,
        dark_link_hover = colors.dark.link_hover,
    )
}
