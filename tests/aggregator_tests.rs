use chrono::{NaiveDate, NaiveDateTime};
use folddock_audit::aggregator::{aggregate, Anomaly, TotalsPolicy};
use folddock_audit::discovery::Interaction;
use folddock_audit::parser::{ResourceRecord, Stage};
use pretty_assertions::assert_eq;

fn at(secs: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t + chrono::Duration::seconds(i64::from(secs)))
}

fn timed(record: ResourceRecord, stage: Stage, start: u32, end: u32) -> ResourceRecord {
    record.with_stage(stage, at(start), at(end))
}

fn protein(name: &str, hhblits: u32) -> ResourceRecord {
    timed(
        ResourceRecord::new(format!("{}.out", name)),
        Stage::Hhblits,
        0,
        hhblits,
    )
}

fn full_replicate(name: &str) -> ResourceRecord {
    let mut record = ResourceRecord::new(name).with_memory(vec![1.0, 2.0, 3.0]);
    record = timed(record, Stage::Unalign, 0, 10);
    record = timed(record, Stage::Cdhit, 10, 15);
    record = timed(record, Stage::Oxmatch, 15, 20);
    record = timed(record, Stage::FuseMsas, 20, 30);
    for stage in Stage::PREDICTION_STAGES {
        record = timed(record, stage, 100, 200);
    }
    record
}

#[test]
fn test_single_replicate_is_identity() {
    let interaction = Interaction::new("P1", "P2");
    let replicate = full_replicate("rep1.out");
    let p1 = protein("P1", 600);
    let p2 = protein("P2", 600);

    let row = aggregate(&interaction, &[replicate], Some(&p1), Some(&p2));

    assert_eq!(row.replicates, 1);
    assert_eq!(row.stage(Stage::Unalign), Some(10));
    assert_eq!(row.stage(Stage::Cdhit), Some(5));
    assert_eq!(row.stage(Stage::Oxmatch), Some(5));
    assert_eq!(row.stage(Stage::FuseMsas), Some(10));
    assert_eq!(row.stage(Stage::AlphaFold3), Some(100));
    assert_eq!(row.stage(Stage::Hhblits), Some(1200));

    let memory = row.memory.expect("memory summary");
    assert_eq!((memory.min, memory.mean, memory.max), (1.0, 2.0, 3.0));

    assert_eq!(row.features.complete(), Some(10 + 5 + 5 + 10 + 1200));
    assert_eq!(row.prediction.complete(), Some(500));
    assert_eq!(row.total.complete(), Some(1730));
    assert!(row.anomalies.is_empty());
}

#[test]
fn test_stage_missing_from_one_replicate_uses_the_others() {
    let interaction = Interaction::new("P1", "P2");
    let shorter = timed(ResourceRecord::new("a.out"), Stage::Cdhit, 0, 17);
    let without = ResourceRecord::new("b.out");
    let longer = timed(ResourceRecord::new("c.out"), Stage::Cdhit, 5, 47);

    let row = aggregate(&interaction, &[shorter, without, longer], None, None);

    assert_eq!(row.stage(Stage::Cdhit), Some(42));
    assert!(!row
        .anomalies
        .contains(&Anomaly::MissingStage { stage: Stage::Cdhit }));
}

#[test]
fn test_stage_absent_everywhere_is_missing() {
    let interaction = Interaction::new("P1", "P2");
    let replicates = vec![
        ResourceRecord::new("a.out").with_memory(vec![1.0]),
        ResourceRecord::new("b.out"),
        ResourceRecord::new("c.out"),
    ];

    let row = aggregate(&interaction, &replicates, None, None);

    assert_eq!(row.stage(Stage::Cdhit), None);
    assert!(row
        .anomalies
        .contains(&Anomaly::MissingStage { stage: Stage::Cdhit }));
    assert!(row.is_usable());
}

#[test]
fn test_slowest_replicate_wins_per_stage() {
    let interaction = Interaction::new("P1", "P2");
    let fast = timed(
        timed(ResourceRecord::new("fast.out"), Stage::Unalign, 0, 5),
        Stage::Cdhit,
        0,
        50,
    );
    let slow = timed(
        timed(ResourceRecord::new("slow.out"), Stage::Unalign, 0, 30),
        Stage::Cdhit,
        0,
        20,
    );

    let row = aggregate(&interaction, &[fast, slow], None, None);

    // Columns may come from different replicates
    assert_eq!(row.stage(Stage::Unalign), Some(30));
    assert_eq!(row.stage(Stage::Cdhit), Some(50));
}

#[test]
fn test_features_plus_prediction_is_total() {
    let interaction = Interaction::new("P1", "P2");
    let replicate = full_replicate("rep.out");
    let p1 = protein("P1", 17);
    let p2 = protein("P2", 23);

    let row = aggregate(&interaction, &[replicate], Some(&p1), Some(&p2));

    for policy in [TotalsPolicy::Partial, TotalsPolicy::Strict] {
        let features = row.features.value(policy).unwrap_or(0);
        let prediction = row.prediction.value(policy).unwrap_or(0);
        assert_eq!(row.total.value(policy), Some(features + prediction));
    }
}

#[test]
fn test_negative_duration_is_excluded() {
    let interaction = Interaction::new("P1", "P2");
    let broken = timed(ResourceRecord::new("broken.out"), Stage::Unalign, 100, 40);
    let fine = timed(ResourceRecord::new("fine.out"), Stage::Unalign, 0, 12);

    let row = aggregate(&interaction, &[broken, fine], None, None);

    assert_eq!(row.stage(Stage::Unalign), Some(12));
    assert!(row.anomalies.iter().any(|a| matches!(
        a,
        Anomaly::NegativeDuration {
            stage: Stage::Unalign,
            seconds: 60,
            ..
        }
    )));
}

#[test]
fn test_hhblits_needs_both_proteins() {
    let interaction = Interaction::new("P1", "P2");
    let replicate = full_replicate("rep.out");
    let p1 = protein("P1", 600);

    let row = aggregate(&interaction, &[replicate], Some(&p1), None);

    assert_eq!(row.stage(Stage::Hhblits), None);
    assert!(row.anomalies.contains(&Anomaly::MissingProteinRecord {
        protein: "P2".to_string()
    }));
    assert_eq!(row.features.complete(), None);
    assert_eq!(row.features.partial(), Some(30));
    assert_eq!(row.features.missing, vec![Stage::Hhblits]);
}

#[test]
fn test_hhblits_stage_missing_from_protein_log() {
    let interaction = Interaction::new("P1", "P2");
    let replicate = full_replicate("rep.out");
    let p1 = protein("P1", 600);
    let p2 = ResourceRecord::new("P2.out");

    let row = aggregate(&interaction, &[replicate], Some(&p1), Some(&p2));

    assert_eq!(row.hhblits, None);
    assert!(row.anomalies.contains(&Anomaly::MissingProteinStage {
        protein: "P2".to_string(),
        stage: Stage::Hhblits,
    }));
}

#[test]
fn test_interaction_without_replicates_is_not_found() {
    let interaction = Interaction::new("P1", "P2");
    let p1 = protein("P1", 600);
    let p2 = protein("P2", 600);

    let row = aggregate(&interaction, &[], Some(&p1), Some(&p2));

    assert_eq!(row.anomalies, vec![Anomaly::InteractionNotFound]);
    assert_eq!(row.hhblits, None);
    assert_eq!(row.memory, None);
    assert_eq!(row.total.partial(), None);
    assert!(!row.is_usable());
}
