//! Times command implementation.
//!
//! The times command:
//! 1. Reads the interactions list
//! 2. Locates per-protein and per-pair logs
//! 3. Parses every log
//! 4. Aggregates one summary row per interaction
//! 5. Writes output files

use super::models::TimesArgs;
use crate::aggregator::{aggregate_with_exclusions, Anomaly, SummaryRow};
use crate::discovery::{index_pair_logs, index_protein_logs, read_interactions, Interaction};
use crate::output::{write_report, write_report_json, Report};
use crate::parser::{parse_log_file, ResourceRecord};
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::time::Instant;

/// What a times run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimesOutcome {
    pub interactions: usize,
    pub rows_written: usize,
    pub usable_rows: usize,
    /// Log files left out because they could not be parsed
    pub excluded_logs: usize,
}

/// Execute the times command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Counts of what was written. The report is written even when some
/// interactions or logs are unusable.
///
/// # Errors
/// * Unreadable interactions file or search directories
/// * File write errors
/// * Not a single row carries a measurement
pub fn execute_times(args: TimesArgs) -> Result<TimesOutcome> {
    let start_time = Instant::now();

    // Step 1: Interactions
    info!("Step 1/5: Reading interactions...");
    let interactions = read_interactions(&args.interactions_file)
        .context("Failed to read interactions file")?;
    info!("Processing {} interactions", interactions.len());

    let proteins: BTreeSet<String> = interactions
        .iter()
        .flat_map(|i| [i.protein1.clone(), i.protein2.clone()])
        .collect();
    info!("Processing {} proteins", proteins.len());

    // Step 2: Discovery
    info!("Step 2/5: Locating log files...");
    let protein_index = index_protein_logs(&args.msa_output_dir, &proteins)
        .context("Failed to search MSA output directory")?;
    let pair_index = index_pair_logs(&args.folddock_output_dir, &interactions)
        .context("Failed to search FoldDock output directory")?;

    // Step 3: Parse
    info!("Step 3/5: Parsing logs...");
    let protein_logs: Vec<(&str, &Path)> = protein_index.iter().collect();
    let protein_records: BTreeMap<String, ResourceRecord> = protein_logs
        .into_par_iter()
        .filter_map(|(protein, path)| load_record(path).map(|r| (protein.to_string(), r)))
        .collect();

    // Per interaction: parsed replicates and the number of logs rejected
    let replicate_records: BTreeMap<Interaction, (Vec<ResourceRecord>, usize)> = interactions
        .par_iter()
        .map(|interaction| {
            let files = pair_index.files(interaction);
            let records: Vec<ResourceRecord> = files
                .par_iter()
                .filter_map(|path| load_record(path))
                .collect();
            let excluded = files.len() - records.len();
            (interaction.clone(), (records, excluded))
        })
        .collect();

    let parsed = protein_records.len()
        + replicate_records
            .values()
            .map(|(records, _)| records.len())
            .sum::<usize>();
    let discovered = protein_index.len() + pair_index.file_count();
    let excluded_logs = discovered - parsed;
    debug!("Parsed {} of {} logs", parsed, discovered);

    // Step 4: Aggregate
    info!("Step 4/5: Aggregating {} interactions...", interactions.len());
    let rows: Vec<SummaryRow> = interactions
        .par_iter()
        .map(|interaction| {
            let (replicates, excluded) = replicate_records
                .get(interaction)
                .map_or((&[] as &[ResourceRecord], 0), |(records, excluded)| {
                    (records.as_slice(), *excluded)
                });
            aggregate_with_exclusions(
                interaction,
                replicates,
                excluded,
                protein_records.get(&interaction.protein1),
                protein_records.get(&interaction.protein2),
            )
        })
        .collect();

    for row in &rows {
        report_anomalies(row);
    }
    let usable_rows = rows.iter().filter(|row| row.is_usable()).count();

    // Step 5: Write outputs
    info!("Step 5/5: Writing output files...");
    write_report(&rows, args.totals_policy, &args.output_file)
        .context("Failed to write report")?;
    info!("✓ Report written to: {}", args.output_file.display());

    if let Some(json_path) = &args.output_json {
        write_report_json(&Report::new(rows.clone()), json_path)
            .context("Failed to write JSON report")?;
        info!("✓ JSON report written to: {}", json_path.display());
    }

    if args.print_summary {
        print_summary(&rows, excluded_logs);
    }

    let elapsed = start_time.elapsed();
    info!("Times completed in {:.2}s", elapsed.as_secs_f64());

    if usable_rows == 0 {
        anyhow::bail!(
            "No usable rows: none of {} interactions produced any measurement",
            interactions.len()
        );
    }

    Ok(TimesOutcome {
        interactions: interactions.len(),
        rows_written: rows.len(),
        usable_rows,
        excluded_logs,
    })
}

/// Parse one log, reporting and excluding it on failure
///
/// **Private** - internal helper for execute_times
fn load_record(path: &Path) -> Option<ResourceRecord> {
    match parse_log_file(path) {
        Ok(record) => Some(record),
        Err(e) => {
            error!("Excluding log: {}", e);
            None
        }
    }
}

fn report_anomalies(row: &SummaryRow) {
    let interaction = row.interaction();
    for anomaly in &row.anomalies {
        match anomaly {
            Anomaly::InteractionNotFound => {
                warn!("{}: interaction not found in pipeline output", interaction)
            }
            other => warn!("{}: {}", interaction, other),
        }
    }
}

/// Print text summary to stdout
fn print_summary(rows: &[SummaryRow], excluded_logs: usize) {
    let complete = rows.iter().filter(|row| row.total.is_complete()).count();
    let not_found = rows
        .iter()
        .filter(|row| row.anomalies.contains(&Anomaly::InteractionNotFound))
        .count();

    println!("\n{}", "=".repeat(80));
    println!("RESOURCE USAGE SUMMARY");
    println!("{}", "=".repeat(80));
    println!("Interactions:       {}", rows.len());
    println!("Fully measured:     {}", complete);
    println!("Not found:          {}", not_found);
    println!("Excluded logs:      {}", excluded_logs);

    if let Some(slowest) = rows.iter().max_by_key(|row| row.total.partial()) {
        if let Some(total) = slowest.total.partial() {
            println!("Slowest:            {} ({}s)", slowest.interaction(), total);
        }
    }
    println!("{}", "=".repeat(80));
}
