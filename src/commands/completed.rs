//! Completed command: list interactions whose five replicates all finished.

use super::models::CompletedArgs;
use crate::discovery::{read_interactions, Interaction};
use crate::output::write_interaction_list;
use crate::structure::is_interaction_complete;
use anyhow::{Context, Result};
use log::info;
use rayon::prelude::*;

/// Execute the completed command
///
/// **Public** - returns the finished interactions, in sorted order
pub fn execute_completed(args: CompletedArgs) -> Result<Vec<Interaction>> {
    let interactions = read_interactions(&args.interactions_file)
        .context("Failed to read interactions file")?;
    info!("Processing {} interactions", interactions.len());

    let finished: Vec<Interaction> = interactions
        .par_iter()
        .filter(|interaction| is_interaction_complete(&args.output_dir, interaction))
        .cloned()
        .collect();

    info!(
        "{} of {} interactions finished",
        finished.len(),
        interactions.len()
    );

    write_interaction_list(&finished, &args.output_file)
        .context("Failed to write finished interactions")?;

    Ok(finished)
}
