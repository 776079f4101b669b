use crate::data::row::DataValue;
use crate::data::type_inference::TypeInference;
use chrono::NaiveDateTime;
use std::cmp::Ordering;

/// How a column's values should be ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareMode {
    /// Numbers numerically, everything else lexicographically
    Natural,
    /// Values parsed as dates and compared chronologically
    Chronological,
}

/// Ordering key for natural comparison.
///
/// Classes are ranked first so mixed columns still sort totally:
/// Null < Number < DateTime < Boolean < Text
enum NaturalKey<'a> {
    Null,
    Number(f64),
    DateTime(NaiveDateTime),
    Boolean(bool),
    Text(String, &'a DataValue),
}

impl NaturalKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            NaturalKey::Null => 0,
            NaturalKey::Number(_) => 1,
            NaturalKey::DateTime(_) => 2,
            NaturalKey::Boolean(_) => 3,
            NaturalKey::Text(..) => 4,
        }
    }
}

fn natural_key(value: &DataValue) -> NaturalKey<'_> {
    match value {
        DataValue::Null => NaturalKey::Null,
        DataValue::Integer(i) => NaturalKey::Number(*i as f64),
        DataValue::Float(f) => NaturalKey::Number(*f),
        DataValue::Boolean(b) => NaturalKey::Boolean(*b),
        DataValue::DateTime(s) => match TypeInference::parse_datetime(s) {
            Some(parsed) => NaturalKey::DateTime(parsed),
            None => NaturalKey::Text(s.to_lowercase(), value),
        },
        DataValue::String(s) => match TypeInference::parse_numeric(s) {
            Some(number) => NaturalKey::Number(number),
            None => NaturalKey::Text(s.to_lowercase(), value),
        },
    }
}

/// Compare two values, numerically when both look numeric.
///
/// Text compares case-insensitively, falling back to the exact text so that
/// "apple" and "Apple" still have a fixed relative order.
pub fn compare_datavalues(a: &DataValue, b: &DataValue) -> Ordering {
    let key_a = natural_key(a);
    let key_b = natural_key(b);

    match (&key_a, &key_b) {
        (NaturalKey::Null, NaturalKey::Null) => Ordering::Equal,
        (NaturalKey::Number(x), NaturalKey::Number(y)) => x.total_cmp(y),
        (NaturalKey::DateTime(x), NaturalKey::DateTime(y)) => x.cmp(y),
        (NaturalKey::Boolean(x), NaturalKey::Boolean(y)) => x.cmp(y),
        (NaturalKey::Text(x, raw_a), NaturalKey::Text(y, raw_b)) => x
            .cmp(y)
            .then_with(|| raw_a.to_string().cmp(&raw_b.to_string())),
        _ => key_a.rank().cmp(&key_b.rank()),
    }
}

/// Compare two values as dates.
///
/// Nulls sort first, then parseable dates, then anything that failed to parse
/// (ordered naturally among themselves).
pub fn compare_chronological(a: &DataValue, b: &DataValue) -> Ordering {
    match (a, b) {
        (DataValue::Null, DataValue::Null) => return Ordering::Equal,
        (DataValue::Null, _) => return Ordering::Less,
        (_, DataValue::Null) => return Ordering::Greater,
        _ => {}
    }

    let parsed_a = TypeInference::parse_datetime(&a.to_string());
    let parsed_b = TypeInference::parse_datetime(&b.to_string());

    match (parsed_a, parsed_b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_datavalues(a, b),
    }
}

pub fn compare_with_mode(a: &DataValue, b: &DataValue, mode: CompareMode) -> Ordering {
    match mode {
        CompareMode::Natural => compare_datavalues(a, b),
        CompareMode::Chronological => compare_chronological(a, b),
    }
}

/// Compare optional values; a missing field orders like Null
pub fn compare_optional_datavalues(
    a: Option<&DataValue>,
    b: Option<&DataValue>,
    mode: CompareMode,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(other)) => compare_with_mode(&DataValue::Null, other, mode),
        (Some(other), None) => compare_with_mode(other, &DataValue::Null, mode),
        (Some(a), Some(b)) => compare_with_mode(a, b, mode),
    }
}
