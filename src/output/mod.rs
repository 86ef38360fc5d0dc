//! Output writers for resource usage reports.
//!
//! This module handles writing data to disk in various formats:
//! - Tab-separated report table
//! - JSON report with anomalies

pub mod json;
pub mod tsv;

// Re-export main functions
pub use json::{read_report_json, write_report_json, Report};
pub use tsv::{render_report, render_row, report_header, write_interaction_list, write_report};
