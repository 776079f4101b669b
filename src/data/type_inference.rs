//! Shared type detection for cell values
//!
//! The loaders, the comparator and the range predicates all need to answer
//! the same questions ("is this a number?", "is this a date?"), so the
//! answers live here.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// Static compiled regex patterns for date detection
static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // YYYY-MM-DD
        Regex::new(r"^(19|20)\d{2}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").unwrap(),
        // DD/MM/YYYY
        Regex::new(r"^(0[1-9]|[12]\d|3[01])/(0[1-9]|1[0-2])/(19|20)\d{2}$").unwrap(),
        // DD-MM-YYYY
        Regex::new(r"^(0[1-9]|[12]\d|3[01])-(0[1-9]|1[0-2])-(19|20)\d{2}$").unwrap(),
        // YYYY/MM/DD
        Regex::new(r"^(19|20)\d{2}/(0[1-9]|1[0-2])/(0[1-9]|[12]\d|3[01])$").unwrap(),
        // ISO 8601 with time, optional fraction and zone
        Regex::new(
            r"^(19|20)\d{2}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])[T ]\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})?$",
        )
        .unwrap(),
    ]
});

/// Thousands-grouped decimals such as "1,250" or "-12,000.50"
static GROUPED_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d+)?$").unwrap());

/// A significant leading zero, as in "007" or "0012345678"; such text stays a string
static LEADING_ZERO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?0\d").unwrap());

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%d %b %Y"];

/// Detected data type for a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredType {
    Boolean,
    Integer,
    Float,
    DateTime,
    String,
    Null,
}

/// Type inference utilities
pub struct TypeInference;

impl TypeInference {
    /// Infer the type of a single string value.
    ///
    /// Order of checks matters: booleans and integers are cheap, the date
    /// patterns are the most expensive and run last.
    pub fn infer_from_string(value: &str) -> InferredType {
        if value.is_empty() || value.eq_ignore_ascii_case("null") {
            return InferredType::Null;
        }

        if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
            return InferredType::Boolean;
        }

        if !LEADING_ZERO.is_match(value) {
            if value.parse::<i64>().is_ok() {
                return InferredType::Integer;
            }

            if value.parse::<f64>().is_ok_and(f64::is_finite) {
                return InferredType::Float;
            }
        }

        if Self::looks_like_datetime(value) {
            return InferredType::DateTime;
        }

        InferredType::String
    }

    /// Check if a string looks like a datetime value.
    ///
    /// Strict patterns keep ID strings like "TXN-2024-001" out.
    pub fn looks_like_datetime(value: &str) -> bool {
        if value.len() < 8 || value.len() > 35 {
            return false;
        }

        DATE_PATTERNS.iter().any(|pattern| pattern.is_match(value))
    }

    /// Parse numeric-looking text, including thousands separators.
    pub fn parse_numeric(value: &str) -> Option<f64> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Ok(parsed) = trimmed.parse::<f64>() {
            return parsed.is_finite().then_some(parsed);
        }

        if GROUPED_NUMBER.is_match(trimmed) {
            return trimmed.replace(',', "").parse::<f64>().ok();
        }

        None
    }

    /// Parse a date or datetime into a naive UTC timestamp.
    ///
    /// Zoned values are normalized to UTC; bare dates land on midnight.
    pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
        let trimmed = value.trim();

        if let Ok(zoned) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(zoned.naive_utc());
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Some(parsed);
            }
        }

        Self::parse_date(trimmed).and_then(|date| date.and_hms_opt(0, 0, 0))
    }

    /// Parse the calendar date part of a value.
    pub fn parse_date(value: &str) -> Option<NaiveDate> {
        let trimmed = value.trim();

        for format in DATE_FORMATS {
            if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
                return Some(parsed);
            }
        }

        // Fall back to the date part of a full timestamp
        if trimmed.len() > 10 {
            if let Some(datetime) = Self::parse_datetime_only(trimmed) {
                return Some(datetime.date());
            }
        }

        None
    }

    fn parse_datetime_only(value: &str) -> Option<NaiveDateTime> {
        if let Ok(zoned) = DateTime::parse_from_rfc3339(value) {
            return Some(zoned.naive_utc());
        }
        NAIVE_DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    }
}
