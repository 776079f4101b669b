//! Tabular data engine behind the payments admin dashboard's list views.
//!
//! A [`table::TableController`] owns a row dataset plus sort, filter, manual
//! order, selection and pagination state, and recomputes a consistent
//! snapshot after every transition. Column schemas are looked up from a
//! `(table kind, context tag)` catalog.

pub mod config;
pub mod data;
pub mod error;
pub mod table;
pub mod utils;

pub use data::identity::Identity;
pub use data::row::{DataRow, DataValue};
pub use error::{TableError, TableResult};
