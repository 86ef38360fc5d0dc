//! Configuration and constants for the CLI.

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Timestamp format used by pipeline lifecycle markers, e.g. `2024-01-01 00:10:00`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Written in place of any value that could not be measured
pub const MISSING_SENTINEL: &str = "NA";

/// Extension of pipeline log files (both per-pair and per-protein)
pub const LOG_FILE_EXTENSION: &str = "out";

// Every interaction is predicted as a run of five replicates,
// each producing one unrelaxed model.
pub const REPLICATE_COUNT: u32 = 5;
pub const MODEL_FILE_NAME: &str = "unrelaxed_model_1.pdb";

/// Last line of a structure file the pipeline finished writing
pub const COMPLETION_SENTINEL: &str = "END";

/// Chunk size used when scanning a file backwards for its last line
pub const TAIL_CHUNK_SIZE: u64 = 4096;

/// A forward jump in residue numbering larger than this starts the second chain
pub const CHAIN_BREAK_RESIDUE_GAP: i64 = 10;

/// Chain identifier written into records of the second chain
pub const SECOND_CHAIN_ID: char = 'B';
