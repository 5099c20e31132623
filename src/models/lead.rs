use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::stage::{ClientType, DemoDay, LostReason, PaymentStage, PipelineStage, RibType};

/// One scheduled or recorded partial payment, with an optional supporting
/// document attached as a base64 data URL.
///
/// `date` is stored as `YYYY-MM-DD` text and parsed defensively: alert
/// derivation tolerates malformed values rather than failing the pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_mime_type: Option<String>,
}

/// An issued invoice document for a closed sale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_mime_type: Option<String>,
}

/// A prospective or current customer tracked through the pipeline.
///
/// Field names serialize in camelCase so stores written by earlier
/// versions of the tracker import cleanly. Stage-conditional fields
/// (demo window, payment details, recontact date) are deliberately
/// retained when a lead leaves the stage they belong to; they are
/// history, not derived state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Opaque unique identifier, assigned at creation, never reused.
    pub id: String,
    pub name: String,
    /// Phone / WhatsApp.
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub client_type: ClientType,
    pub stage: PipelineStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_stage: Option<PaymentStage>,
    pub date_added: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Ad version or campaign that produced the lead.
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_lost_delay: Option<LostReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recontact_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rib_type: Option<RibType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_installments: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<Vec<Installment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_invoices: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoices: Option<Vec<Invoice>>,
}

impl Lead {
    pub fn new(name: String, contact: String, client_type: ClientType, source: String) -> Self {
        Self {
            id: Self::generate_id(),
            name,
            contact,
            email: None,
            client_type,
            stage: PipelineStage::NewLead,
            payment_stage: None,
            date_added: Utc::now(),
            demo_start_date: None,
            demo_end_date: None,
            payment_date: None,
            notes: None,
            source,
            reason_lost_delay: None,
            recontact_date: None,
            rib_type: None,
            number_of_installments: None,
            installments: None,
            number_of_invoices: None,
            invoices: None,
        }
    }

    fn generate_id() -> String {
        format!("lead-{}", Uuid::new_v4())
    }

    /// Case-insensitive match over name, contact and email.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.contact.to_lowercase().contains(&term)
            || self
                .email
                .as_ref()
                .is_some_and(|e| e.to_lowercase().contains(&term))
    }

    /// Trial-day bucket for an active demo, `None` when the lead is not
    /// in Demo Active or the demo has not started by `as_of`.
    pub fn demo_day(&self, as_of: NaiveDate) -> Option<DemoDay> {
        if self.stage != PipelineStage::DemoActive {
            return None;
        }
        let start = self.demo_start_date?.date_naive();
        DemoDay::for_elapsed((as_of - start).num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_lead() -> Lead {
        Lead::new(
            "Alex Johnson".to_string(),
            "555-0101".to_string(),
            ClientType::PrivateTeacher,
            "Ad Campaign A".to_string(),
        )
    }

    #[test]
    fn test_new_lead_defaults() {
        let lead = sample_lead();
        assert!(lead.id.starts_with("lead-"));
        assert_eq!(lead.stage, PipelineStage::NewLead);
        assert!(lead.payment_stage.is_none());
        assert!(lead.installments.is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = sample_lead();
        let b = sample_lead();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serializes_in_legacy_camel_case() {
        let lead = sample_lead();
        let value = serde_json::to_value(&lead).unwrap();
        assert!(value.get("dateAdded").is_some());
        assert_eq!(value["type"], "Private Teacher");
        assert_eq!(value["stage"], "New Lead");
        // Unset optionals are omitted entirely, matching the old store.
        assert!(value.get("demoStartDate").is_none());
    }

    #[test]
    fn test_parses_legacy_store_record() {
        let json = r#"{
            "id": "lead-1",
            "name": "Innovate Learning Center",
            "contact": "555-0102",
            "type": "Center",
            "stage": "Closed - Paid",
            "paymentStage": "Second Installment",
            "dateAdded": "2026-07-01T09:30:00Z",
            "source": "Referral",
            "numberOfInstallments": 3,
            "installments": [
                { "date": "2026-07-02", "documentName": "receipt.pdf" },
                { "date": "2026-08-02" },
                { "date": "" }
            ]
        }"#;
        let lead: Lead = serde_json::from_str(json).unwrap();
        assert_eq!(lead.stage, PipelineStage::ClosedPaid);
        assert_eq!(lead.payment_stage, Some(PaymentStage::Second));
        assert_eq!(lead.number_of_installments, Some(3));
        let installments = lead.installments.as_ref().unwrap();
        assert_eq!(installments.len(), 3);
        assert_eq!(
            installments[0].document_name.as_deref(),
            Some("receipt.pdf")
        );
    }

    #[test]
    fn test_matches_search() {
        let mut lead = sample_lead();
        lead.email = Some("alex@example.com".to_string());

        assert!(lead.matches_search(""));
        assert!(lead.matches_search("alex"));
        assert!(lead.matches_search("555-01"));
        assert!(lead.matches_search("EXAMPLE.COM"));
        assert!(!lead.matches_search("samantha"));
    }

    #[test]
    fn test_demo_day_requires_demo_stage() {
        let mut lead = sample_lead();
        let today = Utc::now().date_naive();
        lead.demo_start_date = Some(Utc::now() - Duration::days(1));
        assert_eq!(lead.demo_day(today), None);

        lead.stage = PipelineStage::DemoActive;
        assert_eq!(lead.demo_day(today), Some(DemoDay::Day2));
    }
}
