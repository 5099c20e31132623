//! Integration tests for the full lead lifecycle against a file-backed
//! store: creation, stage moves with their derived side effects, the
//! payment plan, and deletion.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reef::models::{ClientType, Lead, PaymentStage, PipelineStage};
use reef::store::{JsonFileBackend, LeadStore, StorageBackend};
use reef::transitions::LeadPatch;
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> LeadStore {
    let backend = Arc::new(JsonFileBackend::new(dir.path()));
    LeadStore::open_with_debounce(backend as Arc<dyn StorageBackend>, Duration::from_millis(5))
        .expect("Should open an empty store")
}

fn new_lead(name: &str) -> Lead {
    Lead::new(
        name.to_string(),
        "555-0100".to_string(),
        ClientType::Center,
        "Ad Campaign A".to_string(),
    )
}

#[test]
fn test_lifecycle_new_to_closed() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open_store(&temp_dir);

    let id = store.add(new_lead("Riverside Academy")).id.clone();
    assert_eq!(store.get(&id).unwrap().stage, PipelineStage::NewLead);

    let lead = store
        .update(&id, &LeadPatch::stage(PipelineStage::Contacted))
        .expect("Should move to Contacted");
    assert_eq!(lead.stage, PipelineStage::Contacted);
    assert!(lead.demo_start_date.is_none());

    // Entering the demo derives a three-day window.
    let lead = store
        .update(&id, &LeadPatch::stage(PipelineStage::DemoActive))
        .expect("Should move to Demo Active");
    let start = lead.demo_start_date.expect("Demo start should be derived");
    let end = lead.demo_end_date.expect("Demo end should be derived");
    assert_eq!((end - start).num_days(), 3);

    // Closing derives the payment scaffolding.
    let lead = store
        .update(
            &id,
            &LeadPatch {
                stage: Some(PipelineStage::ClosedPaid),
                number_of_installments: Some(3),
                ..LeadPatch::default()
            },
        )
        .expect("Should close the sale");
    assert_eq!(lead.payment_stage, Some(PaymentStage::Upfront));
    assert_eq!(lead.installments.as_ref().map(Vec::len), Some(3));
}

#[test]
fn test_reload_preserves_every_field() {
    let temp_dir = TempDir::new().unwrap();
    let id;
    let closed;
    {
        let mut store = open_store(&temp_dir);
        id = store.add(new_lead("Riverside Academy")).id.clone();
        closed = store
            .update(
                &id,
                &LeadPatch {
                    stage: Some(PipelineStage::ClosedPaid),
                    number_of_installments: Some(2),
                    notes: Some("signed on site".to_string()),
                    ..LeadPatch::default()
                },
            )
            .expect("Should close the sale");
    }

    let store = open_store(&temp_dir);
    assert_eq!(store.get(&id), Some(&closed));
}

#[test]
fn test_payment_plan_walk() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open_store(&temp_dir);

    let id = store.add(new_lead("Riverside Academy")).id.clone();
    store
        .update(
            &id,
            &LeadPatch {
                stage: Some(PipelineStage::ClosedPaid),
                number_of_installments: Some(2),
                ..LeadPatch::default()
            },
        )
        .expect("Should close the sale");

    assert_eq!(
        store.advance_payment_stage(&id).unwrap(),
        PaymentStage::Second
    );
    assert_eq!(
        store.advance_payment_stage(&id).unwrap(),
        PaymentStage::Third
    );
    // Fourth would exceed the two configured installments.
    assert!(store.set_payment_stage(&id, PaymentStage::Fourth).is_err());
    assert!(store.advance_payment_stage(&id).is_err());
    // The terminal stage stays reachable regardless of the plan size.
    store.set_payment_stage(&id, PaymentStage::Done).unwrap();
    assert!(store.advance_payment_stage(&id).is_err());
}

#[test]
fn test_moving_out_of_demo_keeps_its_dates() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open_store(&temp_dir);

    let id = store.add(new_lead("Riverside Academy")).id.clone();
    let demo = store
        .update(&id, &LeadPatch::stage(PipelineStage::DemoActive))
        .unwrap();

    let delayed = store
        .update(
            &id,
            &LeadPatch {
                stage: Some(PipelineStage::Delayed),
                recontact_date: Some(Utc::now()),
                ..LeadPatch::default()
            },
        )
        .unwrap();

    assert_eq!(delayed.demo_start_date, demo.demo_start_date);
    assert_eq!(delayed.demo_end_date, demo.demo_end_date);
    assert!(delayed.recontact_date.is_some());
}

#[test]
fn test_bulk_stage_and_delete() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open_store(&temp_dir);

    let a = store.add(new_lead("A")).id.clone();
    let b = store.add(new_lead("B")).id.clone();
    let c = store.add(new_lead("C")).id.clone();

    let moved = store.update_stage_bulk(
        &[a.clone(), b.clone()],
        PipelineStage::LostRefused,
    );
    assert_eq!(moved, 2);
    assert_eq!(store.get(&c).unwrap().stage, PipelineStage::NewLead);

    assert_eq!(store.delete_bulk(&[a, b]), 2);
    assert_eq!(store.leads().len(), 1);
}
