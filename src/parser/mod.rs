//! Log parsing and the telemetry data model.
//!
//! This module handles:
//! - Classifying log lines by shape
//! - Extracting stage start/end markers and memory samples
//! - Defining the per-file `ResourceRecord`

pub mod event_log;
pub mod schema;

// Re-export main types
pub use event_log::{classify_line, parse_log_file, parse_log_text, LogLine};
pub use schema::{ResourceRecord, Stage, StageInterval};
