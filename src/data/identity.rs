//! Row identity resolution.
//!
//! Every other component refers to rows by [`Identity`], never by position,
//! so the resolver has to be total and injective over a dataset.

use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::data::row::{DataRow, DataValue};
use crate::error::{TableError, TableResult};

/// Stable key of a row
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identity {
    Int(i64),
    Str(String),
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Int(i) => write!(f, "{}", i),
            Identity::Str(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<i64> for Identity {
    fn from(value: i64) -> Self {
        Identity::Int(value)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Identity::Str(value.to_string())
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Identity::Str(value)
    }
}

/// Derives identities from a designated field
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    field: String,
}

impl IdentityResolver {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Identity of a single row. `position` is only used for error messages.
    pub fn identify(&self, row: &DataRow, position: usize) -> TableResult<Identity> {
        match row.get(&self.field) {
            None | Some(DataValue::Null) => Err(TableError::MissingIdentity {
                field: self.field.clone(),
                row: position,
            }),
            Some(DataValue::Integer(i)) => Ok(Identity::Int(*i)),
            // Integral floats are common in JSON exports of numeric keys
            Some(DataValue::Float(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Ok(Identity::Int(*f as i64))
            }
            Some(DataValue::String(s)) | Some(DataValue::DateTime(s)) => {
                if s.trim().is_empty() {
                    Err(TableError::MissingIdentity {
                        field: self.field.clone(),
                        row: position,
                    })
                } else {
                    Ok(Identity::Str(s.clone()))
                }
            }
            Some(other) => Err(TableError::InvalidIdentity {
                field: self.field.clone(),
                row: position,
                value: format!("{:?}", other),
            }),
        }
    }

    /// Identities of a whole dataset, in dataset order.
    ///
    /// Fails on the first duplicate, naming the colliding identity and both
    /// row positions.
    pub fn identify_all(&self, rows: &[DataRow]) -> TableResult<Vec<Identity>> {
        let mut seen: HashMap<Identity, usize> = HashMap::with_capacity(rows.len());
        let mut identities = Vec::with_capacity(rows.len());

        for (position, row) in rows.iter().enumerate() {
            let identity = self.identify(row, position)?;
            if let Some(&first) = seen.get(&identity) {
                return Err(TableError::DuplicateIdentity {
                    field: self.field.clone(),
                    identity,
                    first,
                    second: position,
                });
            }
            seen.insert(identity.clone(), position);
            identities.push(identity);
        }

        debug!(
            target: "identity",
            "Resolved {} identities from field '{}'",
            identities.len(),
            self.field
        );
        Ok(identities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: impl Into<DataValue>) -> DataRow {
        DataRow::new().with("id", id).with("name", "x")
    }

    #[test]
    fn test_identify_scalars() {
        let resolver = IdentityResolver::new("id");
        assert_eq!(resolver.identify(&row(5i64), 0), Ok(Identity::Int(5)));
        assert_eq!(resolver.identify(&row(5.0), 0), Ok(Identity::Int(5)));
        assert_eq!(
            resolver.identify(&row("MER-001"), 0),
            Ok(Identity::Str("MER-001".to_string()))
        );
    }

    #[test]
    fn test_missing_identity_is_configuration_error() {
        let resolver = IdentityResolver::new("id");
        let no_field = DataRow::new().with("name", "orphan");
        assert_eq!(
            resolver.identify(&no_field, 2),
            Err(TableError::MissingIdentity {
                field: "id".to_string(),
                row: 2
            })
        );
        assert!(resolver.identify(&row(DataValue::Null), 0).is_err());
        assert!(resolver.identify(&row("  "), 0).is_err());
    }

    #[test]
    fn test_non_scalar_identity_rejected() {
        let resolver = IdentityResolver::new("id");
        assert!(matches!(
            resolver.identify(&row(true), 1),
            Err(TableError::InvalidIdentity { row: 1, .. })
        ));
        assert!(matches!(
            resolver.identify(&row(1.5), 0),
            Err(TableError::InvalidIdentity { .. })
        ));
    }

    #[test]
    fn test_duplicate_fails_fast() {
        let resolver = IdentityResolver::new("id");
        let rows = vec![row(1i64), row(2i64), row(1i64), row(1i64)];
        assert_eq!(
            resolver.identify_all(&rows),
            Err(TableError::DuplicateIdentity {
                field: "id".to_string(),
                identity: Identity::Int(1),
                first: 0,
                second: 2,
            })
        );
    }

    #[test]
    fn test_identify_all_preserves_order() {
        let resolver = IdentityResolver::new("id");
        let rows = vec![row(3i64), row("b"), row(1i64)];
        assert_eq!(
            resolver.identify_all(&rows).unwrap(),
            vec![Identity::Int(3), Identity::from("b"), Identity::Int(1)]
        );
    }
}
