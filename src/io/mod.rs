//! Input/output helpers.
//!
//! - source discovery + CSV loading (`loader`)
//! - output persistence (`export`)

pub mod export;
pub mod loader;

pub use export::*;
pub use loader::*;
