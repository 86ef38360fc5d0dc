use folddock_audit::aggregator::{aggregate, SummaryRow, TotalsPolicy};
use folddock_audit::discovery::{
    index_pair_logs, index_protein_logs, read_interactions, Interaction,
};
use folddock_audit::output::{
    read_report_json, render_row, report_header, write_report, write_report_json, Report,
};
use folddock_audit::parser::{ResourceRecord, Stage};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn memory_only_row() -> SummaryRow {
    let interaction = Interaction::new("X", "Y");
    let replicates = vec![
        ResourceRecord::new("r1.out").with_memory(vec![4.0, 6.0]),
        ResourceRecord::new("r2.out").with_memory(vec![1.5, 9.25]),
    ];
    aggregate(&interaction, &replicates, None, None)
}

#[test]
fn test_header_matches_column_count() {
    let row = memory_only_row();
    let rendered = render_row(&row, TotalsPolicy::Partial);
    assert_eq!(rendered.split('\t').count(), report_header().len());
}

#[test]
fn test_memory_only_row_rendering() {
    let row = memory_only_row();
    let rendered = render_row(&row, TotalsPolicy::Partial);
    let cells: Vec<&str> = rendered.split('\t').collect();

    // Worst of per-replicate min (4.0 vs 1.5), mean (5.0 vs 5.375), max
    assert_eq!(cells[..5].to_vec(), vec!["X", "Y", "4.0", "5.375", "9.25"]);
    assert!(cells[5..].iter().all(|cell| *cell == "NA"));
}

#[test]
fn test_write_report_has_header_and_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("usage.tsv");

    write_report(&[memory_only_row()], TotalsPolicy::Strict, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], report_header().join("\t"));
    assert!(lines[1].starts_with("X\tY\t"));
}

#[test]
fn test_write_report_rejects_directory() {
    let dir = TempDir::new().unwrap();
    assert!(write_report(&[], TotalsPolicy::Partial, dir.path()).is_err());
}

#[test]
fn test_json_report_keeps_anomalies() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("usage.json");
    let report = Report::new(vec![memory_only_row()]);

    write_report_json(&report, &path).unwrap();
    let loaded = read_report_json(&path).unwrap();

    assert_eq!(loaded.version, report.version);
    assert_eq!(loaded.rows, report.rows);
    assert!(!loaded.rows[0].anomalies.is_empty());

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"kind\": \"missing_stage\""));
    assert!(raw.contains("\"AlphaFold 1\""));
}

#[test]
fn test_protein_index_first_log_wins() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.out"), "args = P1\n").unwrap();
    fs::write(dir.path().join("b.out"), "args = P1\n").unwrap();
    fs::write(dir.path().join("c.out"), "args = P9\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "args = P1\n").unwrap();

    let proteins: BTreeSet<String> = ["P1".to_string(), "P2".to_string()].into();
    let index = index_protein_logs(dir.path(), &proteins).unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index.get("P1"), Some(dir.path().join("a.out").as_path()));
    assert_eq!(index.get("P2"), None);
}

#[test]
fn test_pair_index_respects_listed_order() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("1.out"), "args = P1 P2\n").unwrap();
    fs::write(dir.path().join("2.out"), "args = P1 P2\n").unwrap();
    fs::write(dir.path().join("3.out"), "args = P2 P1\n").unwrap();
    fs::write(dir.path().join("4.out"), "args = P1 P2 P3\n").unwrap();

    let listed = Interaction::new("P1", "P2");
    let index = index_pair_logs(dir.path(), &[listed.clone()]).unwrap();

    assert_eq!(index.file_count(), 2);
    assert_eq!(index.files(&listed).len(), 2);
    assert!(index.files(&Interaction::new("P2", "P1")).is_empty());
}

#[test]
fn test_read_interactions_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("interactions.txt");
    fs::write(&path, "Q2 Q3\nbroken line here\nQ1 Q2\n").unwrap();

    let interactions = read_interactions(&path).unwrap();

    assert_eq!(
        interactions,
        vec![Interaction::new("Q1", "Q2"), Interaction::new("Q2", "Q3")]
    );
    assert!(read_interactions(dir.path().join("absent.txt")).is_err());
}

#[test]
fn test_stage_column_names() {
    let header = report_header();
    for stage in Stage::REPLICATE_STAGES {
        assert!(header.contains(&format!("time {}", stage)));
    }
}
