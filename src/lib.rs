//! `soul-sales` library crate.
//!
//! The binary (`sales`) is a thin wrapper around this library so that:
//!
//! - the pipeline stages are testable without spawning processes
//! - the aggregation queries can be reused by a presentation layer
//! - nothing runs implicitly: every stage takes an explicit `PipelineConfig`

pub mod aggregate;
pub mod app;
pub mod clean;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
