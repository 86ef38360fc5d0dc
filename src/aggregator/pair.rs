//! Reduce every record of one interaction into a single summary row.
//!
//! Inputs are the replicate logs of the pair plus the MSA logs of its two
//! proteins. Per-stage figures are the slowest replicate, memory figures
//! come from `memory::summarize_replicate_memory`, and HHBLITS is taken
//! from the protein logs only.

use super::duration::{stage_duration, StageDuration};
use super::memory::{summarize_replicate_memory, MemorySummary};
use crate::discovery::Interaction;
use crate::parser::schema::{ResourceRecord, Stage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Something that kept a value out of a summary row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// No replicate log was found for the interaction
    InteractionNotFound,
    /// Replicate logs were found but could not be parsed
    ExcludedReplicates { count: usize },
    /// No replicate carried memory samples
    MissingMemory,
    /// No replicate has a usable duration for this stage
    MissingStage { stage: Stage },
    /// The protein's own MSA log was not found or could not be parsed
    MissingProteinRecord { protein: String },
    /// The protein's own log lacks a usable duration for this stage
    MissingProteinStage { protein: String, stage: Stage },
    /// End marker precedes start marker; excluded from the reduction
    NegativeDuration {
        stage: Stage,
        source: PathBuf,
        seconds: u64,
    },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::InteractionNotFound => write!(f, "no replicate logs found"),
            Anomaly::ExcludedReplicates { count } => {
                write!(f, "{} replicate logs excluded as unparsable", count)
            }
            Anomaly::MissingMemory => write!(f, "no memory samples in any replicate"),
            Anomaly::MissingStage { stage } => {
                write!(f, "stage {} missing from every replicate", stage)
            }
            Anomaly::MissingProteinRecord { protein } => {
                write!(f, "no usable MSA log for protein {}", protein)
            }
            Anomaly::MissingProteinStage { protein, stage } => {
                write!(f, "stage {} missing from MSA log of {}", stage, protein)
            }
            Anomaly::NegativeDuration {
                stage,
                source,
                seconds,
            } => write!(
                f,
                "stage {} ends {}s before it starts in {}",
                stage,
                seconds,
                source.display()
            ),
        }
    }
}

/// How derived columns treat missing addends when rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalsPolicy {
    /// Sum what was measured; missing only if nothing was
    #[default]
    Partial,
    /// Missing as soon as any addend is missing
    Strict,
}

/// A sum of stage durations that remembers which addends were missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedDuration {
    /// Sum of the addends that were measured
    pub seconds: u64,

    /// Number of addends that were measured
    pub measured: usize,

    /// Addends that had no value
    pub missing: Vec<Stage>,
}

impl DerivedDuration {
    /// Sum labelled addends
    pub fn sum(addends: impl IntoIterator<Item = (Stage, Option<u64>)>) -> Self {
        let mut derived = Self::default();
        for (stage, value) in addends {
            match value {
                Some(secs) => {
                    derived.seconds += secs;
                    derived.measured += 1;
                }
                None => derived.missing.push(stage),
            }
        }
        derived
    }

    /// Combine two sums, keeping every missing addend of both
    pub fn plus(&self, other: &Self) -> Self {
        let mut missing = self.missing.clone();
        missing.extend(other.missing.iter().copied());
        Self {
            seconds: self.seconds + other.seconds,
            measured: self.measured + other.measured,
            missing,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.measured > 0
    }

    /// The sum, only if every addend was measured
    pub fn complete(&self) -> Option<u64> {
        self.is_complete().then_some(self.seconds)
    }

    /// The sum of measured addends, if there was at least one
    pub fn partial(&self) -> Option<u64> {
        (self.measured > 0).then_some(self.seconds)
    }

    pub fn value(&self, policy: TotalsPolicy) -> Option<u64> {
        match policy {
            TotalsPolicy::Partial => self.partial(),
            TotalsPolicy::Strict => self.complete(),
        }
    }
}

/// Aggregated telemetry for one interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub protein1: String,
    pub protein2: String,

    /// Number of replicate logs that went into the row
    pub replicates: usize,

    pub memory: Option<MemorySummary>,

    /// Slowest replicate per stage; one entry for every replicate stage
    pub stages: BTreeMap<Stage, Option<u64>>,

    /// HHBLITS of protein1 plus HHBLITS of protein2
    pub hhblits: Option<u64>,

    pub features: DerivedDuration,
    pub prediction: DerivedDuration,
    pub total: DerivedDuration,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<Anomaly>,
}

impl SummaryRow {
    /// Row for an interaction without any replicate log: every field missing
    pub fn not_found(interaction: &Interaction) -> Self {
        let missing_stages = |stages: &[Stage]| DerivedDuration {
            missing: stages.to_vec(),
            ..Default::default()
        };

        let mut feature_addends = Stage::FEATURE_STAGES.to_vec();
        feature_addends.push(Stage::Hhblits);
        let features = missing_stages(&feature_addends);
        let prediction = missing_stages(&Stage::PREDICTION_STAGES);
        let total = features.plus(&prediction);

        Self {
            protein1: interaction.protein1.clone(),
            protein2: interaction.protein2.clone(),
            replicates: 0,
            memory: None,
            stages: Stage::REPLICATE_STAGES.iter().map(|s| (*s, None)).collect(),
            hhblits: None,
            features,
            prediction,
            total,
            anomalies: vec![Anomaly::InteractionNotFound],
        }
    }

    pub fn interaction(&self) -> Interaction {
        Interaction::new(self.protein1.clone(), self.protein2.clone())
    }

    /// Aggregated duration of any stage, HHBLITS included
    pub fn stage(&self, stage: Stage) -> Option<u64> {
        match stage {
            Stage::Hhblits => self.hhblits,
            _ => self.stages.get(&stage).copied().flatten(),
        }
    }

    /// At least one field carries a measurement
    pub fn is_usable(&self) -> bool {
        self.memory.is_some()
            || self.hhblits.is_some()
            || self.stages.values().any(Option::is_some)
    }
}

/// Aggregate one interaction
///
/// **Public** - main entry point for pair aggregation
///
/// # Arguments
/// * `interaction` - The pair being summarised
/// * `replicates` - Parsed replicate logs of the pair
/// * `protein1` / `protein2` - Parsed MSA logs of each protein, if found
///
/// # Returns
/// One row with every field tagged present or missing, plus the anomalies
/// that explain each missing field. Pure: nothing is logged or written.
pub fn aggregate(
    interaction: &Interaction,
    replicates: &[ResourceRecord],
    protein1: Option<&ResourceRecord>,
    protein2: Option<&ResourceRecord>,
) -> SummaryRow {
    aggregate_with_exclusions(interaction, replicates, 0, protein1, protein2)
}

/// Aggregate one interaction, some of whose replicate logs were rejected
///
/// **Public** - `excluded` counts replicate logs that were found but could
/// not be parsed. The row is `not_found` only when nothing was found at
/// all; otherwise the protein-level figures are still reported.
pub fn aggregate_with_exclusions(
    interaction: &Interaction,
    replicates: &[ResourceRecord],
    excluded: usize,
    protein1: Option<&ResourceRecord>,
    protein2: Option<&ResourceRecord>,
) -> SummaryRow {
    if replicates.is_empty() && excluded == 0 {
        return SummaryRow::not_found(interaction);
    }

    let mut anomalies = Vec::new();
    if excluded > 0 {
        anomalies.push(Anomaly::ExcludedReplicates { count: excluded });
    }

    let memory = summarize_replicate_memory(replicates);
    if memory.is_none() {
        anomalies.push(Anomaly::MissingMemory);
    }

    let stages: BTreeMap<Stage, Option<u64>> = Stage::REPLICATE_STAGES
        .iter()
        .map(|&stage| (stage, slowest_replicate(stage, replicates, &mut anomalies)))
        .collect();

    let hhblits = combined_hhblits(interaction, protein1, protein2, &mut anomalies);

    let features = DerivedDuration::sum(
        Stage::FEATURE_STAGES
            .iter()
            .map(|&stage| (stage, stages[&stage]))
            .chain(std::iter::once((Stage::Hhblits, hhblits))),
    );
    let prediction = DerivedDuration::sum(
        Stage::PREDICTION_STAGES
            .iter()
            .map(|&stage| (stage, stages[&stage])),
    );
    let total = features.plus(&prediction);

    SummaryRow {
        protein1: interaction.protein1.clone(),
        protein2: interaction.protein2.clone(),
        replicates: replicates.len(),
        memory,
        stages,
        hhblits,
        features,
        prediction,
        total,
        anomalies,
    }
}

/// Longest well-formed duration of `stage` across replicates
///
/// **Private** - negative durations are reported and left out
fn slowest_replicate(
    stage: Stage,
    replicates: &[ResourceRecord],
    anomalies: &mut Vec<Anomaly>,
) -> Option<u64> {
    let mut slowest: Option<u64> = None;

    for record in replicates {
        match stage_duration(&record.interval(stage)) {
            StageDuration::Elapsed(secs) => {
                slowest = Some(slowest.map_or(secs, |s| s.max(secs)));
            }
            StageDuration::Negative(seconds) => anomalies.push(Anomaly::NegativeDuration {
                stage,
                source: record.source.clone(),
                seconds,
            }),
            StageDuration::Missing => {}
        }
    }

    if slowest.is_none() {
        anomalies.push(Anomaly::MissingStage { stage });
    }
    slowest
}

/// HHBLITS time of both proteins, missing if either is
///
/// **Private** - internal helper for aggregate
fn combined_hhblits(
    interaction: &Interaction,
    protein1: Option<&ResourceRecord>,
    protein2: Option<&ResourceRecord>,
    anomalies: &mut Vec<Anomaly>,
) -> Option<u64> {
    let first = protein_hhblits(&interaction.protein1, protein1, anomalies);
    let second = protein_hhblits(&interaction.protein2, protein2, anomalies);
    Some(first? + second?)
}

fn protein_hhblits(
    protein: &str,
    record: Option<&ResourceRecord>,
    anomalies: &mut Vec<Anomaly>,
) -> Option<u64> {
    let Some(record) = record else {
        anomalies.push(Anomaly::MissingProteinRecord {
            protein: protein.to_string(),
        });
        return None;
    };

    match stage_duration(&record.interval(Stage::Hhblits)) {
        StageDuration::Elapsed(secs) => Some(secs),
        StageDuration::Negative(seconds) => {
            anomalies.push(Anomaly::NegativeDuration {
                stage: Stage::Hhblits,
                source: record.source.clone(),
                seconds,
            });
            None
        }
        StageDuration::Missing => {
            anomalies.push(Anomaly::MissingProteinStage {
                protein: protein.to_string(),
                stage: Stage::Hhblits,
            });
            None
        }
    }
}
