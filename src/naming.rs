//! Centralized identifier parsing for the `<series>-YYYY` convention.
//!
//! Year-stamped series share one naming pattern: a series name, a dash, and
//! exactly four digits. The digits are captured as written; deciding whether
//! the captured year is usable is left to the caller.
//!
//! - `paintings-2021` → series "paintings", year 2021
//! - `yehi-2019` → series "yehi", year 2019
//! - `still-life-2020` → series "still-life", year 2020
//! - `paintings-21` → not a series member (two digits)
//! - `paintings-2021-b` → not a series member (trailing suffix)

/// Result of parsing a year-stamped identifier like `paintings-2021`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesName {
    /// Series part before the final dash.
    pub series: String,
    /// The four captured digits as a number. `0000` parses as 0.
    pub year: i32,
}

/// Parse an identifier following the `<series>-YYYY` convention.
pub fn parse_series_name(identifier: &str) -> Option<SeriesName> {
    let (series, digits) = identifier.rsplit_once('-')?;
    if series.is_empty() || digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(SeriesName {
        series: series.to_string(),
        year: digits.parse().ok()?,
    })
}

/// Captured year if `identifier` is a member of `series`.
pub fn member_year(identifier: &str, series: &str) -> Option<i32> {
    parse_series_name(identifier)
        .filter(|parsed| parsed.series == series)
        .map(|parsed| parsed.year)
}

/// Whether `identifier` belongs to `series`.
pub fn is_member_of(identifier: &str, series: &str) -> bool {
    member_year(identifier, series).is_some()
}
