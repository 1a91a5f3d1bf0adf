//! Progress-tree aggregation
//!
//! - `chapter` - raw chapter label → canonical chapter key
//! - `seconds` - attempt duration parse-and-coerce step
//! - `aggregate` - per-student, per-chapter time totals

pub mod aggregate;
pub mod chapter;
pub mod seconds;

pub use aggregate::{aggregate_time_spent, AggregateStats, ProgressReport, StudentTotals};
pub use chapter::{normalize_chapter_key, ChapterKey};
pub use seconds::{coerce_seconds, read_seconds, SecondsReading};
