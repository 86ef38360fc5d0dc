//! Memory statistics across replicate runs.
//!
//! Each replicate is reduced on its own first (min/mean/max of its
//! samples), then the worst case of each figure is taken across
//! replicates. Samples are never pooled.

use crate::parser::schema::ResourceRecord;
use log::debug;
use serde::{Deserialize, Serialize};

/// Memory figures for one interaction (or one replicate)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemorySummary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl MemorySummary {
    /// Reduce one sample set; `None` when there are no samples
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;

        Some(Self { min, mean, max })
    }

    /// Field-wise maximum of two summaries
    fn worst_of(self, other: Self) -> Self {
        Self {
            min: self.min.max(other.min),
            mean: self.mean.max(other.mean),
            max: self.max.max(other.max),
        }
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!("min {:.1} | mean {:.1} | max {:.1}", self.min, self.mean, self.max)
    }
}

/// Worst-case memory figures across replicates
///
/// **Public** - main entry point for memory aggregation
///
/// # Returns
/// Max of per-replicate minimums, means and maximums. Replicates without
/// samples are skipped; `None` if no replicate has any.
pub fn summarize_replicate_memory(replicates: &[ResourceRecord]) -> Option<MemorySummary> {
    let summary = replicates
        .iter()
        .filter_map(|record| record.memory_samples())
        .filter_map(MemorySummary::from_samples)
        .reduce(MemorySummary::worst_of);

    match &summary {
        Some(s) => debug!("Memory across {} replicates: {}", replicates.len(), s.summary()),
        None => debug!("No memory samples in {} replicates", replicates.len()),
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_samples() {
        let summary = MemorySummary::from_samples(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.max, 3.0);
    }

    #[test]
    fn test_from_empty_samples() {
        assert!(MemorySummary::from_samples(&[]).is_none());
    }

    #[test]
    fn test_replicates_are_not_pooled() {
        let replicates = vec![
            ResourceRecord::new("r1.out").with_memory(vec![1.0, 9.0]),
            ResourceRecord::new("r2.out").with_memory(vec![4.0, 6.0]),
        ];

        let summary = summarize_replicate_memory(&replicates).unwrap();

        // Pooled min would be 1.0; worst per-replicate min is 4.0
        assert_eq!(summary.min, 4.0);
        assert_eq!(summary.mean, 5.0);
        assert_eq!(summary.max, 9.0);
    }

    #[test]
    fn test_replicates_without_samples_are_skipped() {
        let replicates = vec![
            ResourceRecord::new("r1.out"),
            ResourceRecord::new("r2.out").with_memory(vec![]),
            ResourceRecord::new("r3.out").with_memory(vec![2.0]),
        ];

        let summary = summarize_replicate_memory(&replicates).unwrap();
        assert_eq!(summary, MemorySummary { min: 2.0, mean: 2.0, max: 2.0 });
    }

    #[test]
    fn test_no_samples_anywhere() {
        let replicates = vec![ResourceRecord::new("r1.out")];
        assert!(summarize_replicate_memory(&replicates).is_none());
        assert!(summarize_replicate_memory(&[]).is_none());
    }
}
