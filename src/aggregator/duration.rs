//! Reduce a stage's start/end markers to an elapsed time.

use crate::parser::schema::StageInterval;
use serde::{Deserialize, Serialize};

/// Outcome of timing one stage in one log file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageDuration {
    /// Whole seconds between start and end
    Elapsed(u64),
    /// Start or end marker was never logged
    Missing,
    /// End precedes start by this many seconds
    Negative(u64),
}

impl StageDuration {
    /// Seconds, only for a well-formed interval
    pub fn seconds(self) -> Option<u64> {
        match self {
            StageDuration::Elapsed(secs) => Some(secs),
            StageDuration::Missing | StageDuration::Negative(_) => None,
        }
    }
}

/// Time one stage interval
///
/// **Public** - sub-second precision never exists in the logs, so the
/// difference is taken in whole seconds. Spans longer than a day are
/// kept in full.
pub fn stage_duration(interval: &StageInterval) -> StageDuration {
    let (Some(start), Some(end)) = (interval.start, interval.end) else {
        return StageDuration::Missing;
    };

    let secs = (end - start).num_seconds();
    if secs < 0 {
        StageDuration::Negative(secs.unsigned_abs())
    } else {
        StageDuration::Elapsed(secs.unsigned_abs())
    }
}
