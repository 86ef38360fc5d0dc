//! Completion checks on predicted structure files.
//!
//! A replicate is finished once its model file ends with `END`. Model
//! files can be large, so only the tail of the file is read.

use crate::discovery::Interaction;
use crate::utils::config::{
    COMPLETION_SENTINEL, MODEL_FILE_NAME, REPLICATE_COUNT, TAIL_CHUNK_SIZE,
};
use log::{debug, warn};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Last non-blank line of a file, read backwards in chunks
///
/// **Public** - trailing blank lines are skipped; `None` for a file with
/// no visible content. Invalid UTF-8 is replaced, not rejected.
pub fn read_last_line(path: impl AsRef<Path>) -> std::io::Result<Option<String>> {
    let mut file = File::open(path.as_ref())?;
    let mut pos = file.seek(SeekFrom::End(0))?;
    let mut tail: Vec<u8> = Vec::new();

    while pos > 0 {
        let step = TAIL_CHUNK_SIZE.min(pos);
        pos -= step;

        let mut chunk = vec![0u8; step as usize];
        file.seek(SeekFrom::Start(pos))?;
        file.read_exact(&mut chunk)?;
        chunk.extend_from_slice(&tail);
        tail = chunk;

        let Some(last) = tail.iter().rposition(|b| !b.is_ascii_whitespace()) else {
            continue;
        };
        if let Some(newline) = tail[..last].iter().rposition(|&b| b == b'\n') {
            return Ok(Some(String::from_utf8_lossy(&tail[newline + 1..=last]).into_owned()));
        }
    }

    // Reached the start of the file: the whole content is one line
    Ok(tail
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map(|last| String::from_utf8_lossy(&tail[..=last]).into_owned()))
}

/// Model file of one replicate:
/// `<output_dir>/<P1>-<P2>_results/<P1>-<P2>_<k>/unrelaxed_model_1.pdb`
pub fn replicate_model_path(
    output_dir: impl AsRef<Path>,
    interaction: &Interaction,
    replicate: u32,
) -> PathBuf {
    let label = interaction.label();
    output_dir
        .as_ref()
        .join(format!("{}_results", label))
        .join(format!("{}_{}", label, replicate))
        .join(MODEL_FILE_NAME)
}

/// The model file exists and its last line is the completion sentinel
pub fn is_model_complete(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    if !path.is_file() {
        debug!("Model not found: {}", path.display());
        return false;
    }

    match read_last_line(path) {
        Ok(Some(line)) => line.trim() == COMPLETION_SENTINEL,
        Ok(None) => false,
        Err(e) => {
            warn!("Cannot read {}: {}", path.display(), e);
            false
        }
    }
}

/// Every replicate of the interaction produced a finished model
///
/// **Public** - main entry point for completion checks
pub fn is_interaction_complete(output_dir: impl AsRef<Path>, interaction: &Interaction) -> bool {
    let output_dir = output_dir.as_ref();
    (1..=REPLICATE_COUNT)
        .all(|k| is_model_complete(replicate_model_path(output_dir, interaction, k)))
}
