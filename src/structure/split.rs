//! Split a predicted two-chain model into one file per chain.
//!
//! The pipeline models a complex as a single chain with a jump in residue
//! numbering between the two proteins. The first jump larger than
//! `CHAIN_BREAK_RESIDUE_GAP` starts the second chain.

use crate::utils::config::{CHAIN_BREAK_RESIDUE_GAP, SECOND_CHAIN_ID};
use crate::utils::error::StructureError;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Coordinate records of each chain, without line terminators
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainSplit {
    pub first: Vec<String>,
    pub second: Vec<String>,
}

/// Split PDB text by the residue-gap rule
///
/// **Public** - only `ATOM`, `HETATM` and `TER` records are kept. Records
/// of the second chain get their chain identifier rewritten.
///
/// # Errors
/// * `StructureError::MalformedRecord` - An `ATOM`/`HETATM` record has no residue number
pub fn split_chains_text(text: &str) -> Result<ChainSplit, StructureError> {
    let mut split = ChainSplit::default();
    let mut previous_residue: Option<i64> = None;
    let mut in_second_chain = false;

    for (index, line) in text.lines().enumerate() {
        let Some(record) = record_name(line) else {
            continue;
        };

        match residue_number(line) {
            Some(residue) => {
                let previous = previous_residue.unwrap_or(residue);
                if residue - previous > CHAIN_BREAK_RESIDUE_GAP {
                    in_second_chain = true;
                }
                previous_residue = Some(residue);
            }
            // A bare TER stays with the chain it closes
            None if record == "TER" => {}
            None => {
                return Err(StructureError::MalformedRecord {
                    record: record.to_string(),
                    line_number: index + 1,
                    line: line.to_string(),
                })
            }
        }

        if in_second_chain {
            split.second.push(relabel_chain(line, SECOND_CHAIN_ID));
        } else {
            split.first.push(line.to_string());
        }
    }

    debug!(
        "Split model into {} + {} records",
        split.first.len(),
        split.second.len()
    );
    Ok(split)
}

/// Split a PDB file and write each chain to its own file
///
/// **Public** - main entry point for chain splitting
pub fn split_chains(
    input: impl AsRef<Path>,
    first_out: impl AsRef<Path>,
    second_out: impl AsRef<Path>,
) -> Result<ChainSplit, StructureError> {
    let input = input.as_ref();
    let text = std::fs::read_to_string(input).map_err(|source| StructureError::Io {
        path: input.to_path_buf(),
        source,
    })?;

    let split = split_chains_text(&text)?;
    write_records(first_out.as_ref(), &split.first)?;
    write_records(second_out.as_ref(), &split.second)?;
    Ok(split)
}

fn write_records(path: &Path, records: &[String]) -> Result<(), StructureError> {
    let io_err = |source| StructureError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    for record in records {
        writeln!(writer, "{}", record).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)
}

fn record_name(line: &str) -> Option<&'static str> {
    ["ATOM", "HETATM", "TER"]
        .into_iter()
        .find(|name| line.starts_with(name))
}

/// Residue sequence number, columns 23-26
fn residue_number(line: &str) -> Option<i64> {
    line.get(22..26)?.trim().parse().ok()
}

/// Replace the chain identifier in column 22
fn relabel_chain(line: &str, chain: char) -> String {
    match (line.get(..21), line.get(22..)) {
        (Some(head), Some(tail)) => format!("{}{}{}", head, chain, tail),
        _ => line.to_string(),
    }
}
