//! Tab-separated resource usage report.
//!
//! One header row, then one row per interaction. Missing values are
//! written as `NA` so they can never be mistaken for a measurement.

use crate::aggregator::{SummaryRow, TotalsPolicy};
use crate::discovery::Interaction;
use crate::parser::schema::Stage;
use crate::utils::config::MISSING_SENTINEL;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column names of the report, in order
pub fn report_header() -> Vec<String> {
    let mut columns: Vec<String> = ["protein1", "protein2", "mem min", "mem mean", "mem max"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    columns.extend(
        Stage::REPLICATE_STAGES
            .iter()
            .chain(std::iter::once(&Stage::Hhblits))
            .map(|stage| format!("time {}", stage)),
    );
    columns.extend(["time features", "time prediction", "time total"].map(String::from));
    columns
}

/// Render one summary row (no trailing newline)
pub fn render_row(row: &SummaryRow, policy: TotalsPolicy) -> String {
    let mut cells = vec![row.protein1.clone(), row.protein2.clone()];

    match &row.memory {
        Some(memory) => cells.extend([memory.min, memory.mean, memory.max].map(format_memory)),
        None => cells.extend([MISSING_SENTINEL; 3].map(String::from)),
    }

    for stage in Stage::REPLICATE_STAGES.iter().chain(std::iter::once(&Stage::Hhblits)) {
        cells.push(format_seconds(row.stage(*stage)));
    }

    for derived in [&row.features, &row.prediction, &row.total] {
        cells.push(format_seconds(derived.value(policy)));
    }

    cells.join("\t")
}

/// Render the whole table, header included
pub fn render_report(rows: &[SummaryRow], policy: TotalsPolicy) -> String {
    let mut out = report_header().join("\t");
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(row, policy));
        out.push('\n');
    }
    out
}

/// Write the report table to a file
///
/// **Public** - main entry point for TSV output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
pub fn write_report(
    rows: &[SummaryRow],
    policy: TotalsPolicy,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

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
    let mut writer = BufWriter::new(file);

    writer
        .write_all(render_report(rows, policy).as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("Report written successfully ({} rows)", rows.len());
    Ok(())
}

/// Write `protein1<TAB>protein2` per interaction
///
/// **Public** - used for the list of finished interactions
pub fn write_interaction_list(
    interactions: &[Interaction],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    validate_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);
    for interaction in interactions {
        writeln!(writer, "{}\t{}", interaction.protein1, interaction.protein2)
            .map_err(OutputError::WriteFailed)?;
    }
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "Wrote {} interactions to {}",
        interactions.len(),
        output_path.display()
    );
    Ok(())
}

/// Validate that output path is writable
///
/// **Private** - internal validation
pub(crate) fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Memory figure with at least one decimal place
fn format_memory(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn format_seconds(value: Option<u64>) -> String {
    value.map_or_else(|| MISSING_SENTINEL.to_string(), |secs| secs.to_string())
}
