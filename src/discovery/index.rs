//! Locate the log files that belong to each protein and each interaction.
//!
//! Every pipeline log starts with a header line ending in `= <names>`:
//! ```text
//! Running FoldDock with args = P12345 Q67890     (per-pair log)
//! Running MSA generation for = uniref P12345     (per-protein log)
//! ```

use super::interactions::Interaction;
use crate::utils::config::LOG_FILE_EXTENSION;
use crate::utils::error::DiscoveryError;
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Protein name → its own MSA log
///
/// Lookup contract: the first log registered for a protein wins, later
/// ones are ignored. `get` may miss; callers treat that as missing data.
#[derive(Debug, Clone, Default)]
pub struct ProteinLogIndex {
    logs: BTreeMap<String, PathBuf>,
}

impl ProteinLogIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` unless the protein already has a log; returns whether it was added
    pub fn insert_if_absent(&mut self, protein: impl Into<String>, path: impl Into<PathBuf>) -> bool {
        let protein = protein.into();
        if self.logs.contains_key(&protein) {
            return false;
        }
        self.logs.insert(protein, path.into());
        true
    }

    pub fn get(&self, protein: &str) -> Option<&Path> {
        self.logs.get(protein).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.logs.iter().map(|(p, path)| (p.as_str(), path.as_path()))
    }
}

/// Interaction → its replicate logs
///
/// Lookup contract: interactions must be registered up front. Logs are
/// only attached to registered interactions, and `files` of an
/// interaction without logs (registered or not) is empty.
#[derive(Debug, Clone, Default)]
pub struct PairLogIndex {
    logs: BTreeMap<Interaction, Vec<PathBuf>>,
}

impl PairLogIndex {
    /// Index with every interaction registered and no logs attached
    pub fn new(interactions: &[Interaction]) -> Self {
        Self {
            logs: interactions.iter().map(|i| (i.clone(), Vec::new())).collect(),
        }
    }

    /// Attach a replicate log; returns false if the interaction is not registered
    pub fn attach(&mut self, interaction: &Interaction, path: impl Into<PathBuf>) -> bool {
        match self.logs.get_mut(interaction) {
            Some(files) => {
                files.push(path.into());
                true
            }
            None => false,
        }
    }

    pub fn files(&self, interaction: &Interaction) -> &[PathBuf] {
        self.logs.get(interaction).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Registered interactions in sorted order
    pub fn interactions(&self) -> impl Iterator<Item = &Interaction> {
        self.logs.keys()
    }

    pub fn file_count(&self) -> usize {
        self.logs.values().map(Vec::len).sum()
    }
}

/// All `*.out` files under `root`, sorted by path
///
/// # Errors
/// * `DiscoveryError::Io` - `root` is not a directory
/// * `DiscoveryError::Walk` - `root` cannot be listed
pub fn find_log_files(root: impl AsRef<Path>) -> Result<Vec<PathBuf>, DiscoveryError> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(DiscoveryError::Io {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            // The root itself must be readable; deeper failures are skipped
            Err(e) if e.depth() == 0 => return Err(DiscoveryError::Walk(e)),
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == LOG_FILE_EXTENSION)
        {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    debug!("Found {} log files under {}", files.len(), root.display());
    Ok(files)
}

/// First line of a log file
pub fn read_log_header(path: impl AsRef<Path>) -> Result<String, DiscoveryError> {
    let path = path.as_ref();
    let io_err = |source| DiscoveryError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut line = String::new();
    reader.read_line(&mut line).map_err(io_err)?;
    Ok(line)
}

/// Names after the last `=` of a header line
pub fn header_names(header: &str) -> Vec<&str> {
    header
        .rsplit('=')
        .next()
        .unwrap_or_default()
        .split_whitespace()
        .collect()
}

/// Map each wanted protein to its MSA log
///
/// **Public** - the protein name is the last name of the header.
/// Unreadable files and proteins outside `proteins` are skipped.
pub fn index_protein_logs(
    msa_output_dir: impl AsRef<Path>,
    proteins: &BTreeSet<String>,
) -> Result<ProteinLogIndex, DiscoveryError> {
    let mut index = ProteinLogIndex::new();

    for path in find_log_files(msa_output_dir)? {
        let header = match read_log_header(&path) {
            Ok(header) => header,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };
        let Some(protein) = header_names(&header).last().copied() else {
            debug!("No protein name in header of {}", path.display());
            continue;
        };
        if proteins.contains(protein) && index.insert_if_absent(protein, &path) {
            debug!("Protein {} -> {}", protein, path.display());
        }
    }

    info!("Found {} protein result files", index.len());
    Ok(index)
}

/// Attach replicate logs to the listed interactions
///
/// **Public** - the header must name exactly two proteins, in the same
/// order as the interactions file.
pub fn index_pair_logs(
    output_dir: impl AsRef<Path>,
    interactions: &[Interaction],
) -> Result<PairLogIndex, DiscoveryError> {
    let mut index = PairLogIndex::new(interactions);

    for path in find_log_files(output_dir)? {
        let header = match read_log_header(&path) {
            Ok(header) => header,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };
        let names = header_names(&header);
        let [p1, p2] = names[..] else {
            debug!("Header of {} does not name a pair", path.display());
            continue;
        };
        let interaction = Interaction::new(p1, p2);
        if !index.attach(&interaction, &path) {
            debug!("{} belongs to unlisted interaction {}", path.display(), interaction);
        }
    }

    info!("Found {} result files", index.file_count());
    Ok(index)
}
