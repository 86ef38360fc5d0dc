//! Interaction list parsing.
//!
//! The interactions file holds one `protein1 protein2` pair per line.

use crate::utils::error::DiscoveryError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A pair of proteins predicted together
///
/// Order within the pair is kept as written in the interactions file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interaction {
    pub protein1: String,
    pub protein2: String,
}

impl Interaction {
    pub fn new(protein1: impl Into<String>, protein2: impl Into<String>) -> Self {
        Self {
            protein1: protein1.into(),
            protein2: protein2.into(),
        }
    }

    /// `P1-P2`, the prefix the pipeline uses for output directories
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.protein1, self.protein2)
    }
}

/// Parse interactions text
///
/// **Public** - blank lines are skipped, lines without exactly two names
/// are reported and skipped. The result is sorted and de-duplicated.
pub fn parse_interactions(text: &str) -> Vec<Interaction> {
    let mut interactions = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [] => continue,
            [p1, p2] => interactions.push(Interaction::new(*p1, *p2)),
            _ => warn!(
                "Skipping interactions line {}: expected 2 names, found {}: {:?}",
                index + 1,
                fields.len(),
                line
            ),
        }
    }

    interactions.sort();
    interactions.dedup();

    debug!("Parsed {} interactions", interactions.len());
    interactions
}

/// Read and parse an interactions file
///
/// # Errors
/// * `DiscoveryError::Io` - File cannot be read
pub fn read_interactions(path: impl AsRef<Path>) -> Result<Vec<Interaction>, DiscoveryError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| DiscoveryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_interactions(&text))
}
