//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that make a single log file unusable
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed log entry at {path}:{line_number}: {reason}: {line:?}")]
    MalformedLogEntry {
        path: PathBuf,
        line_number: usize,
        line: String,
        reason: String,
    },
}

/// Errors that can occur while locating pipeline inputs
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Errors that can occur while splitting structure files
#[derive(Error, Debug)]
pub enum StructureError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {record} record at line {line_number}: {line:?}")]
    MalformedRecord {
        record: String,
        line_number: usize,
        line: String,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
