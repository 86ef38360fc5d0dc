//! Aggregation of parsed log records into per-interaction summaries.
//!
//! This module transforms resource records into:
//! - Stage durations (start/end markers reduced to seconds)
//! - Worst-case memory figures across replicates
//! - One summary row per interaction with derived totals

pub mod duration;
pub mod memory;
pub mod pair;

// Re-export main types and functions
pub use duration::{stage_duration, StageDuration};
pub use memory::{summarize_replicate_memory, MemorySummary};
pub use pair::{
    aggregate, aggregate_with_exclusions, Anomaly, DerivedDuration, SummaryRow, TotalsPolicy,
};
