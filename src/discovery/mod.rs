//! Discovery of pipeline inputs.
//!
//! Reads the interactions list and maps proteins and interactions to
//! the log files the pipeline left behind.

pub mod index;
pub mod interactions;

pub use index::{
    find_log_files, header_names, index_pair_logs, index_protein_logs, read_log_header,
    PairLogIndex, ProteinLogIndex,
};
pub use interactions::{parse_interactions, read_interactions, Interaction};
