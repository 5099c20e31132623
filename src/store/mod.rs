//! The lead store: an ordered in-memory collection with write-through
//! persistence and debounced snapshot backups.
//!
//! All mutations run through the stage transition rules and then rewrite
//! the whole primary store. Storage failures are logged and otherwise
//! ignored; the in-memory collection stays authoritative for the life of
//! the process.

pub mod backend;
pub mod backup;
pub mod debounce;

pub use backend::{JsonFileBackend, MemoryBackend, StorageBackend};
pub use backup::{BackupSnapshot, MAX_BACKUPS};
pub use debounce::Debouncer;

use anyhow::{bail, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

use crate::models::{Lead, PaymentStage, PipelineStage};
use crate::transitions::{apply_update, next_payment_stage, validate_payment_stage, LeadPatch};

/// Delay between the last mutation of a burst and its backup snapshot.
pub const BACKUP_DEBOUNCE: Duration = Duration::from_secs(2);

pub struct LeadStore {
    leads: Vec<Lead>,
    backend: Arc<dyn StorageBackend>,
    debouncer: Debouncer,
}

impl LeadStore {
    /// Load the collection once from the backend.
    pub fn open(backend: Arc<dyn StorageBackend>) -> Result<Self> {
        Self::open_with_debounce(backend, BACKUP_DEBOUNCE)
    }

    pub fn open_with_debounce(backend: Arc<dyn StorageBackend>, delay: Duration) -> Result<Self> {
        let leads = backend.load_leads()?;
        Ok(Self {
            leads,
            backend,
            debouncer: Debouncer::new(delay),
        })
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn get(&self, id: &str) -> Option<&Lead> {
        self.leads.iter().find(|lead| lead.id == id)
    }

    /// Append a freshly created lead.
    pub fn add(&mut self, lead: Lead) -> &Lead {
        self.leads.push(lead);
        self.persist();
        self.leads.last().expect("lead was just pushed")
    }

    /// Apply a partial update through the transition rules.
    pub fn update(&mut self, id: &str, patch: &LeadPatch) -> Result<Lead> {
        let position = self
            .leads
            .iter()
            .position(|lead| lead.id == id)
            .ok_or_else(|| anyhow::anyhow!("No lead with id '{id}'"))?;

        let resolved = apply_update(&self.leads[position], patch, Utc::now());
        self.leads[position] = resolved.clone();
        self.persist();
        Ok(resolved)
    }

    /// Move every addressed lead to `stage`, leaving all others untouched.
    /// Returns how many records changed.
    pub fn update_stage_bulk(&mut self, ids: &[String], stage: PipelineStage) -> usize {
        let now = Utc::now();
        let patch = LeadPatch::stage(stage);
        let mut changed = 0;

        for lead in &mut self.leads {
            if ids.iter().any(|id| *id == lead.id) {
                *lead = apply_update(lead, &patch, now);
                changed += 1;
            }
        }

        if changed > 0 {
            self.persist();
        }
        changed
    }

    /// Advance a closed sale to its next payment stage, guarded by the
    /// installment limit.
    pub fn advance_payment_stage(&mut self, id: &str) -> Result<PaymentStage> {
        let position = self
            .leads
            .iter()
            .position(|lead| lead.id == id)
            .ok_or_else(|| anyhow::anyhow!("No lead with id '{id}'"))?;

        let next = next_payment_stage(&self.leads[position])?;
        self.leads[position].payment_stage = Some(next);
        self.persist();
        Ok(next)
    }

    /// Set a closed sale's payment stage directly (board drag equivalent).
    pub fn set_payment_stage(&mut self, id: &str, stage: PaymentStage) -> Result<()> {
        let position = self
            .leads
            .iter()
            .position(|lead| lead.id == id)
            .ok_or_else(|| anyhow::anyhow!("No lead with id '{id}'"))?;

        validate_payment_stage(&self.leads[position], stage)?;
        self.leads[position].payment_stage = Some(stage);
        self.persist();
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        let before = self.leads.len();
        self.leads.retain(|lead| lead.id != id);
        if self.leads.len() == before {
            bail!("No lead with id '{id}'");
        }
        self.persist();
        Ok(())
    }

    /// Delete every addressed lead; returns how many were removed.
    pub fn delete_bulk(&mut self, ids: &[String]) -> usize {
        let before = self.leads.len();
        self.leads
            .retain(|lead| !ids.iter().any(|id| *id == lead.id));
        let removed = before - self.leads.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    /// Wholesale replacement, used by import and backup restore. The
    /// caller validates the payload first; this never partially applies.
    pub fn replace_all(&mut self, leads: Vec<Lead>) {
        self.leads = leads;
        self.persist();
    }

    pub fn backups(&self) -> Result<Vec<BackupSnapshot>> {
        self.backend.load_backups()
    }

    /// Replace the collection with snapshot `index` (0 = newest).
    pub fn restore_backup(&mut self, index: usize) -> Result<usize> {
        let backups = self.backend.load_backups()?;
        let Some(snapshot) = backups.get(index) else {
            bail!(
                "No backup at index {index}; {} snapshot(s) available",
                backups.len()
            );
        };
        let restored = snapshot.data.clone();
        let count = restored.len();
        self.leads = restored;
        self.persist();
        Ok(count)
    }

    /// Write-through: rewrite the primary store now, schedule a debounced
    /// snapshot. Failures are logged, never raised; the caller's mutation
    /// has already happened in memory.
    fn persist(&self) {
        if let Err(err) = self.backend.save_leads(&self.leads) {
            error!(%err, "failed to write lead store");
        }

        let backend = Arc::clone(&self.backend);
        let snapshot = backup::BackupSnapshot::capture(&self.leads);
        self.debouncer.schedule(move || {
            let mut ring = match backend.load_backups() {
                Ok(ring) => ring,
                Err(err) => {
                    error!(%err, "failed to read backup store; starting a fresh ring");
                    Vec::new()
                }
            };
            backup::push_snapshot(&mut ring, snapshot);
            if let Err(err) = backend.save_backups(&ring) {
                error!(%err, "failed to write backup store");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClientType;

    fn open_memory_store() -> (LeadStore, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::default());
        let store = LeadStore::open_with_debounce(
            Arc::clone(&backend) as Arc<dyn StorageBackend>,
            Duration::from_millis(5),
        )
        .unwrap();
        (store, backend)
    }

    fn sample_lead(name: &str) -> Lead {
        Lead::new(
            name.to_string(),
            "555-0100".to_string(),
            ClientType::PrivateTeacher,
            "Ad Campaign A".to_string(),
        )
    }

    #[test]
    fn test_add_is_write_through() {
        let (mut store, backend) = open_memory_store();
        let id = store.add(sample_lead("Alex")).id.clone();

        let persisted = backend.load_leads().unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].id, id);
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let (mut store, _) = open_memory_store();
        assert!(store.update("lead-missing", &LeadPatch::default()).is_err());
    }

    #[test]
    fn test_update_runs_transition_rules() {
        let (mut store, _) = open_memory_store();
        let id = store.add(sample_lead("Alex")).id.clone();

        let resolved = store
            .update(&id, &LeadPatch::stage(PipelineStage::DemoActive))
            .unwrap();
        assert!(resolved.demo_start_date.is_some());
        assert!(resolved.demo_end_date.is_some());
    }

    #[test]
    fn test_bulk_stage_change_touches_only_addressed_ids() {
        let (mut store, _) = open_memory_store();
        let a = store.add(sample_lead("A")).clone();
        let b = store.add(sample_lead("B")).clone();
        let c = store.add(sample_lead("C")).clone();

        let changed =
            store.update_stage_bulk(&[a.id.clone(), c.id.clone()], PipelineStage::Contacted);
        assert_eq!(changed, 2);

        assert_eq!(store.get(&a.id).unwrap().stage, PipelineStage::Contacted);
        assert_eq!(store.get(&c.id).unwrap().stage, PipelineStage::Contacted);
        // The unaddressed record is untouched, field for field.
        assert_eq!(store.get(&b.id).unwrap(), &b);
    }

    #[test]
    fn test_delete_and_delete_bulk() {
        let (mut store, backend) = open_memory_store();
        let a = store.add(sample_lead("A")).id.clone();
        let b = store.add(sample_lead("B")).id.clone();
        let c = store.add(sample_lead("C")).id.clone();

        store.delete(&b).unwrap();
        assert!(store.get(&b).is_none());
        assert!(store.delete(&b).is_err());

        let removed = store.delete_bulk(&[a, c, "lead-missing".to_string()]);
        assert_eq!(removed, 2);
        assert!(store.leads().is_empty());
        assert!(backend.load_leads().unwrap().is_empty());
    }

    #[test]
    fn test_advance_payment_stage() {
        let (mut store, _) = open_memory_store();
        let id = store.add(sample_lead("Alex")).id.clone();
        store
            .update(
                &id,
                &LeadPatch {
                    stage: Some(PipelineStage::ClosedPaid),
                    number_of_installments: Some(3),
                    ..LeadPatch::default()
                },
            )
            .unwrap();

        assert_eq!(
            store.advance_payment_stage(&id).unwrap(),
            PaymentStage::Second
        );
        assert_eq!(
            store.get(&id).unwrap().payment_stage,
            Some(PaymentStage::Second)
        );
    }

    #[test]
    fn test_set_payment_stage_guards_installment_limit() {
        let (mut store, _) = open_memory_store();
        let id = store.add(sample_lead("Alex")).id.clone();
        store
            .update(
                &id,
                &LeadPatch {
                    stage: Some(PipelineStage::ClosedPaid),
                    number_of_installments: Some(1),
                    ..LeadPatch::default()
                },
            )
            .unwrap();

        assert!(store.set_payment_stage(&id, PaymentStage::Third).is_err());
        assert!(store.set_payment_stage(&id, PaymentStage::Done).is_ok());
    }

    #[test]
    fn test_replace_all_persists() {
        let (mut store, backend) = open_memory_store();
        store.add(sample_lead("Old"));

        let replacement = vec![sample_lead("New")];
        store.replace_all(replacement.clone());

        assert_eq!(store.leads(), replacement.as_slice());
        assert_eq!(backend.load_leads().unwrap(), replacement);
    }

    #[test]
    fn test_restore_backup_round_trip() {
        let (mut store, backend) = open_memory_store();
        store.add(sample_lead("Keep"));
        let kept = store.leads().to_vec();

        // Let the debounced snapshot land, then mutate past it.
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(backend.load_backups().unwrap().len(), 1);

        store.replace_all(Vec::new());
        assert!(store.leads().is_empty());
        std::thread::sleep(Duration::from_millis(50));

        // Snapshot 1 is the pre-wipe state (newest first).
        let count = store.restore_backup(1).unwrap();
        assert_eq!(count, 1);
        assert_eq!(store.leads(), kept.as_slice());
    }

    #[test]
    fn test_restore_backup_bad_index() {
        let (mut store, _) = open_memory_store();
        assert!(store.restore_backup(3).is_err());
    }
}
