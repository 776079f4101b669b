//! Configuration module
//!
//! Display and paging defaults shared by every table instance.

pub mod config;

pub use config::GridConfig;
