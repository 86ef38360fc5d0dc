//! FoldDock Audit CLI
//!
//! Checks which FoldDock runs finished, reports per-interaction resource
//! usage from pipeline logs, and splits predicted complexes into chains.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use folddock_audit::aggregator::TotalsPolicy;
use folddock_audit::commands::{
    execute_completed, execute_split, execute_times, validate_completed_args, validate_split_args,
    validate_times_args, CompletedArgs, SplitArgs, TimesArgs,
};

/// FoldDock Audit - post-processing for FoldDock runs
#[derive(Parser, Debug)]
#[command(name = "folddock-audit")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Report memory and stage timings per interaction
    Times {
        /// Path to the FoldDock output directory
        #[arg(short = 'd', long)]
        folddock_output_dir: PathBuf,

        /// Path to the MSA output directory
        #[arg(short = 'm', long)]
        msa_output_dir: PathBuf,

        /// Path to the interactions file
        #[arg(short, long)]
        interactions_file: PathBuf,

        /// Output path for the TSV report
        #[arg(short, long)]
        output_file: PathBuf,

        /// Output path for a JSON report with anomalies (optional)
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write NA for a derived total if any of its stages is missing
        #[arg(long)]
        strict_totals: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// List interactions whose five replicate models all finished
    Completed {
        /// Path to the FoldDock output directory
        #[arg(short = 'd', long)]
        output_dir: PathBuf,

        /// Path to the interactions file
        #[arg(short, long)]
        interactions_file: PathBuf,

        /// Output path for the finished interactions
        #[arg(short, long)]
        output_file: PathBuf,
    },

    /// Split every replicate model into one PDB file per chain
    Split {
        /// Path to the FoldDock output directory
        #[arg(short = 'd', long)]
        folddock_output_dir: PathBuf,

        /// Path to the interactions file
        #[arg(short, long)]
        interactions_file: PathBuf,

        /// Existing directory receiving the chain files
        #[arg(short, long)]
        output_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Times {
            folddock_output_dir,
            msa_output_dir,
            interactions_file,
            output_file,
            json,
            strict_totals,
            summary,
        } => {
            let args = TimesArgs {
                folddock_output_dir,
                msa_output_dir,
                interactions_file,
                output_file,
                output_json: json,
                totals_policy: if strict_totals {
                    TotalsPolicy::Strict
                } else {
                    TotalsPolicy::Partial
                },
                print_summary: summary,
            };

            validate_times_args(&args)?;
            execute_times(args)?;
        }

        Commands::Completed {
            output_dir,
            interactions_file,
            output_file,
        } => {
            let args = CompletedArgs {
                output_dir,
                interactions_file,
                output_file,
            };

            validate_completed_args(&args)?;
            execute_completed(args)?;
        }

        Commands::Split {
            folddock_output_dir,
            interactions_file,
            output_dir,
        } => {
            let args = SplitArgs {
                folddock_output_dir,
                interactions_file,
                output_dir,
            };

            validate_split_args(&args)?;
            execute_split(args)?;
        }
    }

    Ok(())
}
