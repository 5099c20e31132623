//! Derived follow-up alerts.
//!
//! Alerts are recomputed from scratch on every call; nothing here is
//! cached or persisted. The collection is small, so a full O(n) pass per
//! render is fine. Rules are evaluated independently per lead and all of
//! them may fire for the same record.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::models::{Lead, PaymentStage, PipelineStage};

/// Days a lead may sit in New Lead before it counts as stuck.
const STALE_NEW_LEAD_DAYS: i64 = 3;

/// Days after the previous installment payment before a follow-up is due.
const PAYMENT_FOLLOW_UP_DAYS: i64 = 30;

/// Which view an alert belongs to. The dashboard shows all categories;
/// the demo and payments boards filter to their own.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    Pipeline,
    Demo,
    Payments,
}

impl std::fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertCategory::Pipeline => write!(f, "pipeline"),
            AlertCategory::Demo => write!(f, "demo"),
            AlertCategory::Payments => write!(f, "payments"),
        }
    }
}

impl std::str::FromStr for AlertCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pipeline" => Ok(AlertCategory::Pipeline),
            "demo" => Ok(AlertCategory::Demo),
            "payments" | "payment" => Ok(AlertCategory::Payments),
            _ => anyhow::bail!(
                "Invalid alert category: {s}. Valid values: pipeline, demo, payments"
            ),
        }
    }
}

/// A single actionable notice on a lead. Not persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub lead_id: String,
    pub lead_name: String,
    pub message: String,
    pub category: AlertCategory,
}

/// Derive all alerts for the collection as of the given calendar day.
///
/// Output order follows input order; a lead with several firing rules
/// produces several entries. A malformed installment date skips the
/// payment rule for that lead only.
pub fn derive_alerts(leads: &[Lead], as_of: NaiveDate) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for lead in leads {
        let push = |alerts: &mut Vec<Alert>, message: String, category: AlertCategory| {
            alerts.push(Alert {
                lead_id: lead.id.clone(),
                lead_name: lead.name.clone(),
                message,
                category,
            });
        };

        // Stale new leads.
        if lead.stage == PipelineStage::NewLead {
            let age = (as_of - lead.date_added.date_naive()).num_days();
            if age > STALE_NEW_LEAD_DAYS {
                push(
                    &mut alerts,
                    format!("Stuck in \"New Lead\" for {age} days. Action needed."),
                    AlertCategory::Pipeline,
                );
            }
        }

        // Delayed re-contact due today or overdue.
        if lead.stage == PipelineStage::Delayed {
            if let Some(recontact) = lead.recontact_date {
                let recontact = recontact.date_naive();
                if recontact == as_of {
                    push(
                        &mut alerts,
                        "Re-contact today.".to_string(),
                        AlertCategory::Pipeline,
                    );
                } else if recontact < as_of {
                    push(
                        &mut alerts,
                        format!("Re-contact was due on {}.", recontact.format("%Y-%m-%d")),
                        AlertCategory::Pipeline,
                    );
                }
            }
        }

        // Demo ending or ended.
        if lead.stage == PipelineStage::DemoActive {
            if let Some(end) = lead.demo_end_date {
                let days_left = (end.date_naive() - as_of).num_days();
                if days_left == 0 {
                    push(
                        &mut alerts,
                        "Demo ends today. Follow up required.".to_string(),
                        AlertCategory::Demo,
                    );
                } else if days_left < 0 {
                    push(
                        &mut alerts,
                        format!("Demo ended {} days ago. Follow up.", days_left.abs()),
                        AlertCategory::Demo,
                    );
                }
            }
        }

        // Payment follow-up: due for the current stage once the previous
        // installment's payment is 30+ days old, so only stages past the
        // first can fire.
        if lead.stage == PipelineStage::ClosedPaid {
            if let (Some(payment_stage), Some(installments)) =
                (lead.payment_stage, lead.installments.as_ref())
            {
                let index = payment_stage.index();
                if payment_stage != PaymentStage::Done && index > 0 {
                    if let Some(previous) = installments.get(index - 1) {
                        if !previous.date.is_empty() {
                            match NaiveDate::parse_from_str(&previous.date, "%Y-%m-%d") {
                                Ok(paid_on) => {
                                    let days_since = (as_of - paid_on).num_days();
                                    if days_since >= PAYMENT_FOLLOW_UP_DAYS {
                                        push(
                                            &mut alerts,
                                            format!(
                                                "Follow up for {payment_stage} payment. It's been {days_since} days since the last."
                                            ),
                                            AlertCategory::Payments,
                                        );
                                    }
                                }
                                Err(err) => {
                                    // Skip this rule for this lead only.
                                    warn!(
                                        lead_id = %lead.id,
                                        date = %previous.date,
                                        %err,
                                        "skipping payment alert: invalid installment date"
                                    );
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    alerts
}
