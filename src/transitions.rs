//! Stage transition rules: resolving a partial update against an existing
//! lead record.
//!
//! [`apply_update`] is pure and total; it never touches storage. The store
//! calls it for single edits and for bulk stage moves alike, then persists
//! the resolved records.

use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Utc};

use crate::models::{
    ClientType, Installment, Invoice, Lead, LostReason, PaymentStage, PipelineStage, RibType,
};

/// Length of the demo trial window derived on entry into Demo Active.
pub const DEMO_WINDOW_DAYS: i64 = 3;

/// Bounds on the number of installments a sale can be split into.
pub const MIN_INSTALLMENTS: u8 = 1;
pub const MAX_INSTALLMENTS: u8 = 5;

/// A set of field changes to merge onto a lead.
///
/// `None` means "leave the field as it is"; there is no way to clear a
/// field through a patch. Stage-specific fields left behind by a stage
/// move are retained deliberately.
#[derive(Debug, Clone, Default)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub client_type: Option<ClientType>,
    pub stage: Option<PipelineStage>,
    pub payment_stage: Option<PaymentStage>,
    pub demo_start_date: Option<DateTime<Utc>>,
    pub demo_end_date: Option<DateTime<Utc>>,
    pub payment_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub source: Option<String>,
    pub reason_lost_delay: Option<LostReason>,
    pub recontact_date: Option<DateTime<Utc>>,
    pub rib_type: Option<RibType>,
    pub number_of_installments: Option<u8>,
    pub installments: Option<Vec<Installment>>,
    pub number_of_invoices: Option<u8>,
    pub invoices: Option<Vec<Invoice>>,
}

impl LeadPatch {
    pub fn stage(stage: PipelineStage) -> Self {
        Self {
            stage: Some(stage),
            ..Self::default()
        }
    }
}

/// Merge `patch` onto `existing` and derive dependent fields.
///
/// Derivations, in order:
/// 1. Entering Demo Active from another stage computes the demo window
///    (`now` to `now + 3 days`) for any window date the patch did not
///    supply itself.
/// 2. Entering Closed - Paid without a payment stage defaults to the first
///    value of the payment ordering (Upfront Installment).
/// 3. Installment and invoice lists are resized to match their declared
///    counts; entries keep their index, never reorder.
///
/// No other field is defaulted or cleared. Re-applying the resolved
/// record's own values is a no-op.
pub fn apply_update(existing: &Lead, patch: &LeadPatch, now: DateTime<Utc>) -> Lead {
    let mut merged = existing.clone();

    if let Some(v) = patch.name.clone() {
        merged.name = v;
    }
    if let Some(v) = patch.contact.clone() {
        merged.contact = v;
    }
    if let Some(v) = patch.email.clone() {
        merged.email = Some(v);
    }
    if let Some(v) = patch.client_type {
        merged.client_type = v;
    }
    if let Some(v) = patch.stage {
        merged.stage = v;
    }
    if let Some(v) = patch.payment_stage {
        merged.payment_stage = Some(v);
    }
    if let Some(v) = patch.demo_start_date {
        merged.demo_start_date = Some(v);
    }
    if let Some(v) = patch.demo_end_date {
        merged.demo_end_date = Some(v);
    }
    if let Some(v) = patch.payment_date {
        merged.payment_date = Some(v);
    }
    if let Some(v) = patch.notes.clone() {
        merged.notes = Some(v);
    }
    if let Some(v) = patch.source.clone() {
        merged.source = v;
    }
    if let Some(v) = patch.reason_lost_delay {
        merged.reason_lost_delay = Some(v);
    }
    if let Some(v) = patch.recontact_date {
        merged.recontact_date = Some(v);
    }
    if let Some(v) = patch.rib_type {
        merged.rib_type = Some(v);
    }
    if let Some(v) = patch.number_of_installments {
        merged.number_of_installments = Some(v);
    }
    if let Some(v) = patch.installments.clone() {
        merged.installments = Some(v);
    }
    if let Some(v) = patch.number_of_invoices {
        merged.number_of_invoices = Some(v);
    }
    if let Some(v) = patch.invoices.clone() {
        merged.invoices = Some(v);
    }

    // First entry into Demo Active derives the trial window, unless the
    // caller supplied the dates in the same update.
    if merged.stage == PipelineStage::DemoActive && existing.stage != PipelineStage::DemoActive {
        if patch.demo_start_date.is_none() {
            merged.demo_start_date = Some(now);
        }
        if patch.demo_end_date.is_none() {
            merged.demo_end_date = Some(now + Duration::days(DEMO_WINDOW_DAYS));
        }
    }

    // A sale that closes without an explicit payment stage starts at the
    // front of the payment ordering.
    if merged.stage == PipelineStage::ClosedPaid && merged.payment_stage.is_none() {
        merged.payment_stage = Some(PaymentStage::Upfront);
    }

    sync_payment_details(&mut merged);

    merged
}

/// Keep the installment and invoice lists in step with their declared
/// counts. Resizing preserves entries by index: shrinking truncates the
/// tail, growing pads with empty entries. Invoices never exceed
/// installments.
fn sync_payment_details(lead: &mut Lead) {
    if let Some(count) = lead.number_of_installments {
        let count = count.clamp(MIN_INSTALLMENTS, MAX_INSTALLMENTS);
        lead.number_of_installments = Some(count);
        lead.installments
            .get_or_insert_with(Vec::new)
            .resize_with(count as usize, Installment::default);
    } else if let Some(installments) = &lead.installments {
        let count = (installments.len() as u8).clamp(MIN_INSTALLMENTS, MAX_INSTALLMENTS);
        lead.number_of_installments = Some(count);
        lead.installments
            .get_or_insert_with(Vec::new)
            .resize_with(count as usize, Installment::default);
    }

    if let Some(limit) = lead.number_of_installments {
        if let Some(count) = lead.number_of_invoices {
            let count = count.min(limit);
            lead.number_of_invoices = Some(count);
            lead.invoices
                .get_or_insert_with(Vec::new)
                .resize_with(count as usize, Invoice::default);
        }
    }
}

/// Check that a payment stage is reachable for this lead.
///
/// The progress index of a non-terminal payment stage must never exceed
/// the number of configured installments; `Done` is always reachable so
/// short plans can finish.
pub fn validate_payment_stage(lead: &Lead, target: PaymentStage) -> Result<()> {
    if lead.stage != PipelineStage::ClosedPaid {
        bail!(
            "Lead '{}' is in stage '{}'; payment stages only apply to Closed - Paid leads",
            lead.name,
            lead.stage
        );
    }

    let limit = lead.number_of_installments.unwrap_or(MIN_INSTALLMENTS) as usize;
    if target != PaymentStage::Done && target.index() > limit {
        bail!(
            "Payment stage '{target}' exceeds the {limit} configured installment(s) for lead '{}'",
            lead.name
        );
    }

    Ok(())
}

/// The payment stage that follows the lead's current one.
pub fn next_payment_stage(lead: &Lead) -> Result<PaymentStage> {
    let current = lead.payment_stage.unwrap_or(PaymentStage::Upfront);
    match current.next() {
        Some(next) => {
            validate_payment_stage(lead, next)?;
            Ok(next)
        }
        None => bail!("Lead '{}' has already completed all payments", lead.name),
    }
}
