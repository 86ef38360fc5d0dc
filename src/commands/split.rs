//! Split command: write one PDB file per chain for every replicate model.

use super::models::SplitArgs;
use crate::discovery::{read_interactions, Interaction};
use crate::structure::{replicate_model_path, split_chains};
use crate::utils::config::REPLICATE_COUNT;
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use rayon::prelude::*;
use std::path::Path;

/// What a split run produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitOutcome {
    pub models_split: usize,
    pub models_missing: usize,
    pub models_failed: usize,
}

impl SplitOutcome {
    fn merge(self, other: Self) -> Self {
        Self {
            models_split: self.models_split + other.models_split,
            models_missing: self.models_missing + other.models_missing,
            models_failed: self.models_failed + other.models_failed,
        }
    }
}

/// Execute the split command
///
/// **Public** - writes `<P1>-<P2>_<k>_A.pdb` and `<P1>-<P2>_<k>_B.pdb`
/// into the output directory. Missing or malformed models are reported
/// and skipped.
///
/// # Errors
/// * Unreadable interactions file
/// * Interactions were listed but no model could be split
pub fn execute_split(args: SplitArgs) -> Result<SplitOutcome> {
    let interactions = read_interactions(&args.interactions_file)
        .context("Failed to read interactions file")?;
    info!("Processing {} interactions", interactions.len());

    let outcome = interactions
        .par_iter()
        .map(|interaction| {
            split_interaction(&args.folddock_output_dir, &args.output_dir, interaction)
        })
        .reduce(SplitOutcome::default, SplitOutcome::merge);

    info!(
        "Split {} models ({} missing, {} failed)",
        outcome.models_split, outcome.models_missing, outcome.models_failed
    );

    if !interactions.is_empty() && outcome.models_split == 0 {
        anyhow::bail!("No model could be split");
    }

    Ok(outcome)
}

/// Split every replicate model of one interaction
///
/// **Private** - internal helper for execute_split
fn split_interaction(
    folddock_output_dir: &Path,
    output_dir: &Path,
    interaction: &Interaction,
) -> SplitOutcome {
    let mut outcome = SplitOutcome::default();
    let label = interaction.label();

    for replicate in 1..=REPLICATE_COUNT {
        let model = replicate_model_path(folddock_output_dir, interaction, replicate);
        if !model.is_file() {
            warn!("Model not found: {}", model.display());
            outcome.models_missing += 1;
            continue;
        }

        let first = output_dir.join(format!("{}_{}_A.pdb", label, replicate));
        let second = output_dir.join(format!("{}_{}_B.pdb", label, replicate));

        match split_chains(&model, &first, &second) {
            Ok(split) => {
                debug!(
                    "{}: {} records in chain A, {} in chain B",
                    model.display(),
                    split.first.len(),
                    split.second.len()
                );
                outcome.models_split += 1;
            }
            Err(e) => {
                error!("Failed to split {}: {}", model.display(), e);
                outcome.models_failed += 1;
            }
        }
    }

    outcome
}
