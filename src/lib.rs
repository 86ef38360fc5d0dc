//! FoldDock Audit
//!
//! Post-processing for FoldDock protein-protein structure prediction runs:
//! completion checks, per-interaction resource usage reports built from
//! pipeline logs, and splitting of predicted complexes into single chains.
//!
//! This crate provides the core implementation for the
//! `folddock-audit` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! folddock-audit times -d folddock_out -m msa_out -i interactions.txt -o usage.tsv
//! folddock-audit --help
//! ```

pub mod aggregator;
pub mod commands;
pub mod discovery;
pub mod output;
pub mod parser;
pub mod structure;
pub mod utils;
