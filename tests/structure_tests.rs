use folddock_audit::discovery::Interaction;
use folddock_audit::structure::{
    is_interaction_complete, is_model_complete, read_last_line, replicate_model_path,
    split_chains, split_chains_text,
};
use folddock_audit::utils::StructureError;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn atom(serial: u32, residue: i64) -> String {
    format!(
        "ATOM  {:>5}  N   MET A{:>4}      10.000  10.000  10.000  1.00  0.00           N",
        serial, residue
    )
}

#[test]
fn test_last_line_across_chunk_boundary() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.pdb");
    let mut text = String::new();
    for serial in 1..=400 {
        text.push_str(&atom(serial, i64::from(serial)));
        text.push('\n');
    }
    text.push_str("END\n\n");
    fs::write(&path, &text).unwrap();

    assert_eq!(read_last_line(&path).unwrap().as_deref(), Some("END"));
    assert!(is_model_complete(&path));
}

#[test]
fn test_model_without_sentinel_is_unfinished() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.pdb");
    fs::write(&path, format!("{}\n", atom(1, 1))).unwrap();

    assert!(!is_model_complete(&path));
    assert!(!is_model_complete(dir.path().join("absent.pdb")));
}

#[test]
fn test_interaction_needs_all_replicates() {
    let dir = TempDir::new().unwrap();
    let interaction = Interaction::new("A", "B");

    for replicate in 1..=5 {
        let path = replicate_model_path(dir.path(), &interaction, replicate);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "END\n").unwrap();
    }
    assert!(is_interaction_complete(dir.path(), &interaction));

    fs::remove_file(replicate_model_path(dir.path(), &interaction, 5)).unwrap();
    assert!(!is_interaction_complete(dir.path(), &interaction));
}

#[test]
fn test_replicate_model_layout() {
    let path = replicate_model_path("/runs", &Interaction::new("A", "B"), 2);
    assert_eq!(
        path.to_str(),
        Some("/runs/A-B_results/A-B_2/unrelaxed_model_1.pdb")
    );
}

#[test]
fn test_split_on_residue_gap() {
    let text = [
        "REMARK generated".to_string(),
        atom(1, 1),
        atom(2, 2),
        atom(3, 9),
        atom(4, 30),
        atom(5, 31),
        "TER".to_string(),
        "END".to_string(),
    ]
    .join("\n");

    let split = split_chains_text(&text).unwrap();

    assert_eq!(split.first, vec![atom(1, 1), atom(2, 2), atom(3, 9)]);
    assert_eq!(split.second.len(), 3);
    assert!(split.second[..2].iter().all(|line| line.chars().nth(21) == Some('B')));
    assert_eq!(split.second[2], "TER");
}

#[test]
fn test_gap_of_exactly_ten_stays_in_first_chain() {
    let text = [atom(1, 1), atom(2, 11)].join("\n");
    let split = split_chains_text(&text).unwrap();
    assert_eq!(split.first.len(), 2);
    assert!(split.second.is_empty());
}

#[test]
fn test_second_chain_is_permanent() {
    let text = [atom(1, 1), atom(2, 50), atom(3, 2)].join("\n");
    let split = split_chains_text(&text).unwrap();
    assert_eq!(split.first.len(), 1);
    assert_eq!(split.second.len(), 2);
}

#[test]
fn test_atom_without_residue_number_is_malformed() {
    let err = split_chains_text("ATOM      1  N   MET A").unwrap_err();
    assert!(matches!(
        err,
        StructureError::MalformedRecord { line_number: 1, .. }
    ));
}

#[test]
fn test_split_chains_writes_both_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("model.pdb");
    fs::write(&input, [atom(1, 1), atom(2, 100)].join("\n")).unwrap();

    let first = dir.path().join("A.pdb");
    let second = dir.path().join("B.pdb");
    split_chains(&input, &first, &second).unwrap();

    assert_eq!(fs::read_to_string(&first).unwrap(), format!("{}\n", atom(1, 1)));
    let chain_b = fs::read_to_string(&second).unwrap();
    assert_eq!(chain_b.lines().count(), 1);
    assert!(chain_b.contains(" B 100"));
}
