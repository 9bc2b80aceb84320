//! Reporting utilities: ingest diagnostics and aggregate tables.

pub mod format;

pub use format::*;
