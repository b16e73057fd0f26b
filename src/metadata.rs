//! Frontmatter metadata and its coercion rules.
//!
//! Documents carry a loosely typed YAML block. Authors write `year: 2021`,
//! `year: "2021"`, or leave the key out entirely, and titles are occasionally
//! bare numbers (`title: 1999`). Rather than passing the raw YAML around,
//! every document's block is coerced once into [`Metadata`], an explicit
//! optional-field structure:
//!
//! | Key      | Accepted                                   | Otherwise |
//! |----------|--------------------------------------------|-----------|
//! | `title`  | string, number or bool rendered as text    | absent    |
//! | `year`   | integer, float, numeric string; non-zero   | absent    |
//! | `artist` | non-empty string                           | absent    |
//!
//! Coercion never fails. A wrong-typed value is simply absent, so the year
//! resolver falls through to its next source instead of rejecting the
//! document.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Typed view of a document's frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

impl Metadata {
    /// Coerce a parsed YAML document into metadata.
    ///
    /// Anything that is not a mapping (a bare scalar, a list, `null`) yields
    /// empty metadata.
    pub fn from_yaml(value: &Value) -> Self {
        let Value::Mapping(map) = value else {
            return Self::default();
        };
        Self {
            title: map.get("title").and_then(coerce_text),
            year: map.get("year").and_then(coerce_year),
            artist: map.get("artist").and_then(coerce_artist),
        }
    }
}

/// Coerce a `year` value to an integer year.
///
/// Numbers and numeric strings are accepted when finite and non-zero; a
/// fractional part is truncated.
pub fn coerce_year(value: &Value) -> Option<i32> {
    let number = match value {
        Value::Number(n) => n.as_i64().map(|i| i as f64).or_else(|| n.as_f64())?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() || number.abs() >= i32::MAX as f64 {
        return None;
    }
    let year = number.trunc() as i32;
    (year != 0).then_some(year)
}

/// Scalars rendered as text; empty strings count as absent.
fn coerce_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    resolve(&[Some(text.as_str())])
}

fn coerce_artist(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => resolve(&[Some(s.as_str())]),
        _ => None,
    }
}

/// Resolve a field from multiple sources.
///
/// Takes optional values in priority order and returns the first non-None,
/// non-blank one, trimmed.
///
/// ```text
/// title:  resolve(&[metadata.title, identifier])
/// artist: resolve(&[metadata.artist, primary_artist])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}
