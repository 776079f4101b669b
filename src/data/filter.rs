use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};
use std::fmt;

use crate::data::row::DataValue;
use crate::data::type_inference::TypeInference;
use crate::error::{TableError, TableResult};

/// A compiled, case-insensitive pattern
#[derive(Clone)]
pub struct FilterPattern(Regex);

impl FilterPattern {
    pub fn new(pattern: &str) -> TableResult<Self> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(FilterPattern)
            .map_err(|e| TableError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl fmt::Debug for FilterPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/i", self.0.as_str())
    }
}

impl PartialEq for FilterPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// A column-level filter value
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPredicate {
    /// Case-insensitive substring containment
    Contains(String),
    /// Case-insensitive equality with any of the values
    OneOf(Vec<String>),
    /// Inclusive numeric range; an open side is unbounded
    NumberRange { min: Option<f64>, max: Option<f64> },
    /// Inclusive calendar-date range; an open side is unbounded
    DateRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    Pattern(FilterPattern),
}

impl FilterPredicate {
    pub fn contains(text: impl Into<String>) -> Self {
        FilterPredicate::Contains(text.into())
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterPredicate::OneOf(values.into_iter().map(Into::into).collect())
    }

    pub fn pattern(pattern: &str) -> TableResult<Self> {
        FilterPattern::new(pattern).map(FilterPredicate::Pattern)
    }

    /// True when the predicate accepts every value, so the filter can be dropped
    pub fn is_vacuous(&self) -> bool {
        match self {
            FilterPredicate::Contains(text) => text.trim().is_empty(),
            FilterPredicate::OneOf(values) => values.is_empty(),
            FilterPredicate::NumberRange { min, max } => min.is_none() && max.is_none(),
            FilterPredicate::DateRange { from, to } => from.is_none() && to.is_none(),
            FilterPredicate::Pattern(pattern) => pattern.as_str().is_empty(),
        }
    }

    /// Test a cell value; a missing field is treated as Null
    pub fn matches(&self, value: Option<&DataValue>) -> bool {
        let null = DataValue::Null;
        let value = value.unwrap_or(&null);

        match self {
            FilterPredicate::Contains(needle) => {
                let needle = needle.trim().to_lowercase();
                value.to_string().to_lowercase().contains(&needle)
            }
            FilterPredicate::OneOf(candidates) => {
                if candidates.is_empty() {
                    return true;
                }
                let text = value.to_string();
                let text = text.trim();
                candidates
                    .iter()
                    .any(|candidate| candidate.trim().eq_ignore_ascii_case(text))
            }
            FilterPredicate::NumberRange { min, max } => match value.as_f64() {
                Some(number) => {
                    min.map_or(true, |lower| number >= lower)
                        && max.map_or(true, |upper| number <= upper)
                }
                None => min.is_none() && max.is_none(),
            },
            FilterPredicate::DateRange { from, to } => {
                match TypeInference::parse_date(&value.to_string()) {
                    Some(date) => {
                        from.map_or(true, |start| date >= start) && to.map_or(true, |end| date <= end)
                    }
                    None => from.is_none() && to.is_none(),
                }
            }
            FilterPredicate::Pattern(pattern) => pattern.is_match(&value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_case_insensitive() {
        let predicate = FilterPredicate::contains("fail");
        assert!(predicate.matches(Some(&DataValue::from("Failed"))));
        assert!(!predicate.matches(Some(&DataValue::from("Successful"))));
        assert!(!predicate.matches(None));
    }

    #[test]
    fn test_one_of_exact_match() {
        let predicate = FilterPredicate::one_of(["Pending", "failed"]);
        assert!(predicate.matches(Some(&DataValue::from("FAILED"))));
        assert!(predicate.matches(Some(&DataValue::from(" pending "))));
        assert!(!predicate.matches(Some(&DataValue::from("Pending Review"))));
    }

    #[test]
    fn test_number_range_is_inclusive() {
        let predicate = FilterPredicate::NumberRange {
            min: Some(100.0),
            max: Some(500.0),
        };
        assert!(predicate.matches(Some(&DataValue::Integer(100))));
        assert!(predicate.matches(Some(&DataValue::Float(500.0))));
        assert!(predicate.matches(Some(&DataValue::from("250"))));
        assert!(!predicate.matches(Some(&DataValue::Float(500.01))));
        assert!(!predicate.matches(Some(&DataValue::Null)));
    }

    #[test]
    fn test_date_range_is_inclusive_on_days() {
        let predicate = FilterPredicate::DateRange {
            from: NaiveDate::from_ymd_opt(2024, 1, 1),
            to: NaiveDate::from_ymd_opt(2024, 1, 31),
        };
        assert!(predicate.matches(Some(&DataValue::DateTime("2024-01-31T23:59:59".to_string()))));
        assert!(predicate.matches(Some(&DataValue::from("2024-01-01"))));
        assert!(!predicate.matches(Some(&DataValue::from("2024-02-01"))));
        assert!(!predicate.matches(Some(&DataValue::from("not a date"))));
    }

    #[test]
    fn test_open_range_bounds() {
        let at_least = FilterPredicate::NumberRange {
            min: Some(10.0),
            max: None,
        };
        assert!(at_least.matches(Some(&DataValue::Integer(1_000_000))));
        assert!(!at_least.matches(Some(&DataValue::Integer(9))));
    }

    #[test]
    fn test_pattern_predicate() {
        let predicate = FilterPredicate::pattern(r"^upi|card$").unwrap();
        assert!(predicate.matches(Some(&DataValue::from("UPI Collect"))));
        assert!(predicate.matches(Some(&DataValue::from("Debit Card"))));
        assert!(!predicate.matches(Some(&DataValue::from("Netbanking"))));

        assert!(matches!(
            FilterPredicate::pattern("(unclosed"),
            Err(TableError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_vacuous_predicates() {
        assert!(FilterPredicate::contains("  ").is_vacuous());
        assert!(FilterPredicate::OneOf(vec![]).is_vacuous());
        assert!(!FilterPredicate::contains("x").is_vacuous());
    }
}
