//! Integration tests for export formats and the import validation path.

use std::sync::Arc;
use std::time::Duration;

use reef::export::{export_json, import_json, leads_to_csv, ImportError, CSV_HEADERS};
use reef::models::{ClientType, Lead, PipelineStage};
use reef::store::{JsonFileBackend, LeadStore, StorageBackend};
use reef::transitions::LeadPatch;
use tempfile::TempDir;

fn seeded_store(dir: &TempDir) -> LeadStore {
    let backend = Arc::new(JsonFileBackend::new(dir.path()));
    let mut store = LeadStore::open_with_debounce(
        backend as Arc<dyn StorageBackend>,
        Duration::from_millis(5),
    )
    .expect("Should open an empty store");

    store.add(Lead::new(
        "Alex Johnson".to_string(),
        "555-0101".to_string(),
        ClientType::PrivateTeacher,
        "Ad Campaign A".to_string(),
    ));
    let id = store
        .add(Lead::new(
            "Future Minds Academy".to_string(),
            "555-0104".to_string(),
            ClientType::Center,
            "Website".to_string(),
        ))
        .id
        .clone();
    store
        .update(
            &id,
            &LeadPatch {
                stage: Some(PipelineStage::ClosedPaid),
                number_of_installments: Some(2),
                ..LeadPatch::default()
            },
        )
        .unwrap();
    store
}

#[test]
fn test_json_export_imports_back_identically() {
    let temp_dir = TempDir::new().unwrap();
    let store = seeded_store(&temp_dir);

    let json = export_json(store.leads()).unwrap();
    let imported = import_json(&json).unwrap();
    assert_eq!(imported, store.leads());
}

#[test]
fn test_import_replaces_wholesale() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = seeded_store(&temp_dir);
    assert_eq!(store.leads().len(), 2);

    let replacement = vec![Lead::new(
        "Fresh Start".to_string(),
        "555-0200".to_string(),
        ClientType::Center,
        "Referral".to_string(),
    )];
    let payload = export_json(&replacement).unwrap();

    let leads = import_json(&payload).unwrap();
    store.replace_all(leads);
    assert_eq!(store.leads(), replacement.as_slice());
}

#[test]
fn test_rejected_import_leaves_no_trace() {
    for payload in [
        "{",
        "{\"leads\": []}",
        "[{\"notALead\": true}]",
        "[{\"id\": \"lead-1\", \"name\": \"X\", \"stage\": \"Not A Stage\"}]",
    ] {
        assert!(import_json(payload).is_err(), "accepted: {payload}");
    }
}

#[test]
fn test_import_error_kinds() {
    assert!(matches!(import_json("42"), Err(ImportError::NotAnArray(_))));
    assert!(matches!(
        import_json("[{\"id\": \"lead-1\"}]"),
        Err(ImportError::MissingField("name"))
    ));
    assert!(matches!(
        import_json("[{\"id\": \"lead-1\", \"name\": \"X\", \"stage\": 7}]"),
        Err(ImportError::BadRecord(_))
    ));
}

#[test]
fn test_csv_shape_matches_header_contract() {
    let temp_dir = TempDir::new().unwrap();
    let store = seeded_store(&temp_dir);

    let csv = leads_to_csv(store.leads()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 1 + store.leads().len());

    let header_cells = lines[0].split(',').count();
    assert_eq!(header_cells, CSV_HEADERS.len());

    // The closed lead's row embeds its installment list as JSON text,
    // quotes doubled, one empty entry per configured installment.
    assert!(lines
        .iter()
        .any(|line| line.contains("[{\"\"date\"\":\"\"\"\"},{\"\"date\"\":\"\"\"\"}]")));
}
