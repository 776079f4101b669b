//! Utility helpers shared by the library and the debug binary

pub mod logging;
