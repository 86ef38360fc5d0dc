//! Parser for pipeline log files.
//!
//! Each line is first classified by shape only, then the interesting
//! shapes are parsed into timestamps, stage names and memory samples.
//!
//! Recognised shapes:
//! ```text
//! [2024-01-01 00:00:00] start: CDHIT
//! [2024-01-01 00:00:05] end: CDHIT
//! [1021.5, 2048.0, 1990.25]
//! ```

use super::schema::{ResourceRecord, Stage};
use crate::utils::config::TIMESTAMP_FORMAT;
use crate::utils::error::ParseError;
use chrono::NaiveDateTime;
use log::debug;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

static MARKER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]]*)\]\s*(start|end):(.*)$").expect("marker pattern is valid")
});

static MEMORY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\[\]]*)\]$").expect("memory pattern is valid"));

/// Shape of a single log line, before any value parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine<'a> {
    StartMarker { timestamp: &'a str, stage: &'a str },
    EndMarker { timestamp: &'a str, stage: &'a str },
    /// Text between the brackets of a memory-sample array
    MemorySamples(&'a str),
    Unrecognized,
}

/// Classify a line by shape
///
/// **Public** - pure text recognition, never fails
pub fn classify_line(line: &str) -> LogLine<'_> {
    let line = line.trim_end();
    if !line.starts_with('[') {
        return LogLine::Unrecognized;
    }

    if let Some(caps) = MARKER_LINE.captures(line) {
        let timestamp = caps.get(1).map_or("", |m| m.as_str());
        let stage = caps.get(3).map_or("", |m| m.as_str().trim());
        return match caps.get(2).map(|m| m.as_str()) {
            Some("start") => LogLine::StartMarker { timestamp, stage },
            _ => LogLine::EndMarker { timestamp, stage },
        };
    }

    match MEMORY_LINE.captures(line) {
        Some(caps) => LogLine::MemorySamples(caps.get(1).map_or("", |m| m.as_str())),
        None => LogLine::Unrecognized,
    }
}

/// Parse one log file into a `ResourceRecord`
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::Io` - The file cannot be opened or read
/// * `ParseError::MalformedLogEntry` - A marker or memory line has unparsable content
pub fn parse_log_file(path: impl AsRef<Path>) -> Result<ResourceRecord, ParseError> {
    let path = path.as_ref();
    debug!("Parsing log file: {}", path.display());

    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_log_reader(path, BufReader::new(file))
}

/// Parse log text that is already in memory
///
/// **Public** - `source` only labels the record and its errors
pub fn parse_log_text(source: impl AsRef<Path>, text: &str) -> Result<ResourceRecord, ParseError> {
    parse_log_reader(source.as_ref(), text.as_bytes())
}

fn parse_log_reader<R: BufRead>(path: &Path, reader: R) -> Result<ResourceRecord, ParseError> {
    let mut record = ResourceRecord::new(path);

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        apply_line(&mut record, &line, index + 1)?;
    }

    debug!(
        "Parsed {}: {} stages, {} memory samples",
        path.display(),
        record.stages.len(),
        record.memory.as_ref().map_or(0, Vec::len)
    );

    Ok(record)
}

/// Fold one classified line into the record
///
/// **Private** - internal helper for parse_log_reader
fn apply_line(
    record: &mut ResourceRecord,
    line: &str,
    line_number: usize,
) -> Result<(), ParseError> {
    let (timestamp, stage, is_start) = match classify_line(line) {
        LogLine::StartMarker { timestamp, stage } => (timestamp, stage, true),
        LogLine::EndMarker { timestamp, stage } => (timestamp, stage, false),
        LogLine::MemorySamples(body) => {
            let samples = parse_memory_samples(body)
                .map_err(|reason| malformed(&record.source, line_number, line, reason))?;
            record.memory = Some(samples);
            return Ok(());
        }
        LogLine::Unrecognized => return Ok(()),
    };

    let at = NaiveDateTime::parse_from_str(timestamp.trim(), TIMESTAMP_FORMAT).map_err(|e| {
        let reason = format!("invalid timestamp {:?} ({})", timestamp, e);
        malformed(&record.source, line_number, line, reason)
    })?;

    if stage.is_empty() {
        let reason = "missing stage name".to_string();
        return Err(malformed(&record.source, line_number, line, reason));
    }

    let Some(stage) = Stage::from_name(stage) else {
        debug!("Ignoring unknown stage {:?} at line {}", stage, line_number);
        return Ok(());
    };

    // Last occurrence of a marker wins
    let interval = record.stages.entry(stage).or_default();
    if is_start {
        interval.start = Some(at);
    } else {
        interval.end = Some(at);
    }

    Ok(())
}

fn malformed(path: &Path, line_number: usize, line: &str, reason: String) -> ParseError {
    ParseError::MalformedLogEntry {
        path: path.to_path_buf(),
        line_number,
        line: line.to_string(),
        reason,
    }
}

/// Parse comma-separated finite floats; an empty body is an empty sample set
///
/// **Private** - internal utility
fn parse_memory_samples(body: &str) -> Result<Vec<f64>, String> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    body.split(',')
        .map(|part| {
            let part = part.trim();
            let sample = part
                .parse::<f64>()
                .map_err(|e| format!("invalid memory sample {:?} ({})", part, e))?;
            if !sample.is_finite() {
                return Err(format!("non-finite memory sample {:?}", part));
            }
            Ok(sample)
        })
        .collect()
}
