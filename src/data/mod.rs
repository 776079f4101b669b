//! Data layer: rows, identities, value comparison and filter predicates.
//!
//! Nothing in here knows about columns or table state; the `table` module
//! builds on top of it.

pub mod datavalue_compare;
pub mod filter;
pub mod identity;
pub mod loaders;
pub mod row;
pub mod type_inference;
