use std::borrow::Cow;

use crate::data::datavalue_compare::CompareMode;
use crate::data::identity::Identity;
use crate::data::row::{DataRow, DataValue};

/// How a column's cells are rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    Plain,
    /// Status text rendered with a tone
    Badge,
    Currency,
    Date,
    /// A named formatter from the cell formatter registry
    Custom(String),
}

impl ColumnKind {
    pub fn custom(name: impl Into<String>) -> Self {
        ColumnKind::Custom(name.into())
    }

    pub fn compare_mode(&self) -> CompareMode {
        match self {
            ColumnKind::Date => CompareMode::Chronological,
            _ => CompareMode::Natural,
        }
    }
}

/// Where a column reads its value from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    Field(String),
    /// The row's resolved identity
    Identity,
    /// First of these fields holding a non-null value
    FirstOf(Vec<String>),
}

impl Accessor {
    pub fn value<'a>(&self, row: &'a DataRow, identity: &Identity) -> Option<Cow<'a, DataValue>> {
        match self {
            Accessor::Field(field) => row.get(field).map(Cow::Borrowed),
            Accessor::Identity => Some(Cow::Owned(match identity {
                Identity::Int(i) => DataValue::Integer(*i),
                Identity::Str(s) => DataValue::String(s.clone()),
            })),
            Accessor::FirstOf(fields) => fields
                .iter()
                .filter_map(|field| row.get(field))
                .find(|value| !value.is_null())
                .map(Cow::Borrowed),
        }
    }
}

/// One column of a resolved schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub key: String,
    pub header: String,
    pub kind: ColumnKind,
    pub accessor: Accessor,
}

impl ColumnDefinition {
    /// A column reading the field named like its key
    pub fn new(key: impl Into<String>, header: impl Into<String>, kind: ColumnKind) -> Self {
        let key = key.into();
        Self {
            accessor: Accessor::Field(key.clone()),
            key,
            header: header.into(),
            kind,
        }
    }

    pub fn plain(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self::new(key, header, ColumnKind::Plain)
    }

    pub fn with_accessor(mut self, accessor: Accessor) -> Self {
        self.accessor = accessor;
        self
    }

    /// Read from a field whose name differs from the column key
    pub fn from_field(self, field: impl Into<String>) -> Self {
        self.with_accessor(Accessor::Field(field.into()))
    }

    pub fn value<'a>(&self, row: &'a DataRow, identity: &Identity) -> Option<Cow<'a, DataValue>> {
        self.accessor.value(row, identity)
    }
}
