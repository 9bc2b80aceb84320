//! Turning raw rows into the clean, merged record set.
//!
//! - `normalize`: product filter + coercion + projection (pure)
//! - `merge`: deterministic concatenation of per-file results

pub mod merge;
pub mod normalize;

pub use merge::{FileSummary, IngestReport, MergedRecords, NormalizedFile, ensure_summable, merge};
pub use normalize::{NormalizeOptions, normalize_records, parse_price};
