//! JSON rendition of the resource usage report.
//!
//! Carries everything the TSV table drops: replicate counts, the
//! addends missing from each derived total, and every anomaly.

use super::tsv::validate_output_path;
use crate::aggregator::SummaryRow;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    pub rows: Vec<SummaryRow>,
}

impl Report {
    pub fn new(rows: Vec<SummaryRow>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            rows,
        }
    }
}

/// Write a report to a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report_json(report: &Report, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing JSON report to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    Ok(())
}

/// Read a report back from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report_json(input_path: impl AsRef<Path>) -> Result<Report, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: Report =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!("Report loaded: version {}, {} rows", report.version, report.rows.len());

    Ok(report)
}
