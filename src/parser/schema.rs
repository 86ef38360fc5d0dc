//! Data model for telemetry parsed out of pipeline logs.
//!
//! One `ResourceRecord` is produced per log file. Records are never
//! mutated after parsing; aggregation only reads them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Lifecycle stage of the pipeline
///
/// The vocabulary is closed. Names are matched exactly (case sensitive),
/// anything else found in a log is ignored by the parser.
/// Declaration order is the report column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "UNALIGN")]
    Unalign,
    #[serde(rename = "CDHIT")]
    Cdhit,
    #[serde(rename = "oxmatch")]
    Oxmatch,
    #[serde(rename = "fuse_msas")]
    FuseMsas,
    #[serde(rename = "AlphaFold 1")]
    AlphaFold1,
    #[serde(rename = "AlphaFold 2")]
    AlphaFold2,
    #[serde(rename = "AlphaFold 3")]
    AlphaFold3,
    #[serde(rename = "AlphaFold 4")]
    AlphaFold4,
    #[serde(rename = "AlphaFold 5")]
    AlphaFold5,
    /// Only meaningful in a protein's own MSA log
    #[serde(rename = "HHBLITS")]
    Hhblits,
}

impl Stage {
    /// Stages that precede structure prediction and are timed per replicate
    pub const FEATURE_STAGES: [Stage; 4] =
        [Stage::Unalign, Stage::Cdhit, Stage::Oxmatch, Stage::FuseMsas];

    pub const PREDICTION_STAGES: [Stage; 5] = [
        Stage::AlphaFold1,
        Stage::AlphaFold2,
        Stage::AlphaFold3,
        Stage::AlphaFold4,
        Stage::AlphaFold5,
    ];

    /// Every stage read from per-pair replicate logs, in column order
    pub const REPLICATE_STAGES: [Stage; 9] = [
        Stage::Unalign,
        Stage::Cdhit,
        Stage::Oxmatch,
        Stage::FuseMsas,
        Stage::AlphaFold1,
        Stage::AlphaFold2,
        Stage::AlphaFold3,
        Stage::AlphaFold4,
        Stage::AlphaFold5,
    ];

    /// Name as it appears in pipeline logs and report headers
    pub fn name(self) -> &'static str {
        match self {
            Stage::Unalign => "UNALIGN",
            Stage::Cdhit => "CDHIT",
            Stage::Oxmatch => "oxmatch",
            Stage::FuseMsas => "fuse_msas",
            Stage::AlphaFold1 => "AlphaFold 1",
            Stage::AlphaFold2 => "AlphaFold 2",
            Stage::AlphaFold3 => "AlphaFold 3",
            Stage::AlphaFold4 => "AlphaFold 4",
            Stage::AlphaFold5 => "AlphaFold 5",
            Stage::Hhblits => "HHBLITS",
        }
    }

    /// Exact-match lookup; `None` for names outside the vocabulary
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "UNALIGN" => Some(Stage::Unalign),
            "CDHIT" => Some(Stage::Cdhit),
            "oxmatch" => Some(Stage::Oxmatch),
            "fuse_msas" => Some(Stage::FuseMsas),
            "AlphaFold 1" => Some(Stage::AlphaFold1),
            "AlphaFold 2" => Some(Stage::AlphaFold2),
            "AlphaFold 3" => Some(Stage::AlphaFold3),
            "AlphaFold 4" => Some(Stage::AlphaFold4),
            "AlphaFold 5" => Some(Stage::AlphaFold5),
            "HHBLITS" => Some(Stage::Hhblits),
            _ => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Start/end timestamps of one stage within one log file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageInterval {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl StageInterval {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    /// Both markers were seen
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// Telemetry parsed from a single log file
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    /// Log file the record was parsed from
    pub source: PathBuf,

    /// Last memory-sample array in the file, if any
    pub memory: Option<Vec<f64>>,

    /// Intervals of every known stage that had at least one marker
    pub stages: BTreeMap<Stage, StageInterval>,
}

impl ResourceRecord {
    /// Create an empty record for the given source file
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            memory: None,
            stages: BTreeMap::new(),
        }
    }

    pub fn with_memory(mut self, samples: Vec<f64>) -> Self {
        self.memory = Some(samples);
        self
    }

    pub fn with_stage(
        mut self,
        stage: Stage,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Self {
        self.stages.insert(stage, StageInterval::new(start, end));
        self
    }

    /// Interval for `stage`; a stage never mentioned in the log has neither marker
    pub fn interval(&self, stage: Stage) -> StageInterval {
        self.stages.get(&stage).copied().unwrap_or_default()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Memory samples, treating an empty array the same as no array
    pub fn memory_samples(&self) -> Option<&[f64]> {
        self.memory.as_deref().filter(|samples| !samples.is_empty())
    }
}
