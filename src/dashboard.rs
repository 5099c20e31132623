//! Aggregate metrics over the lead collection, recomputed per call.

use std::collections::BTreeMap;

use crate::models::{Lead, LostReason, PipelineStage};

/// Assumed revenue per closed sale when no value is configured.
pub const DEFAULT_LEAD_VALUE: f64 = 500.0;

#[derive(Debug, Clone)]
pub struct DashboardStats {
    pub total_leads: usize,
    pub closed_paid: usize,
    /// Percentage of the whole collection that closed.
    pub conversion_rate: f64,
    pub total_revenue: f64,
    /// Mean days from demo start to payment, over closed leads carrying
    /// both dates. Zero when none qualify.
    pub avg_time_to_close_days: f64,
    /// Per-stage counts in pipeline order, including empty stages.
    pub stage_counts: Vec<(PipelineStage, usize)>,
    /// Leads per campaign source, sorted by source name.
    pub source_counts: BTreeMap<String, usize>,
    /// Lost/delay reason frequency in fixed reason order, zeros omitted.
    pub reason_counts: Vec<(LostReason, usize)>,
    /// Leads added per calendar month (`YYYY-MM`).
    pub monthly_added: BTreeMap<String, usize>,
}

pub fn compute_stats(leads: &[Lead], lead_value: f64) -> DashboardStats {
    let total_leads = leads.len();
    let closed: Vec<&Lead> = leads
        .iter()
        .filter(|lead| lead.stage == PipelineStage::ClosedPaid)
        .collect();
    let closed_paid = closed.len();

    let conversion_rate = if total_leads > 0 {
        closed_paid as f64 / total_leads as f64 * 100.0
    } else {
        0.0
    };

    let close_durations: Vec<f64> = closed
        .iter()
        .filter_map(|lead| {
            let start = lead.demo_start_date?;
            let paid = lead.payment_date?;
            Some((paid - start).num_milliseconds() as f64 / 86_400_000.0)
        })
        .collect();
    let avg_time_to_close_days = if close_durations.is_empty() {
        0.0
    } else {
        close_durations.iter().sum::<f64>() / close_durations.len() as f64
    };

    let stage_counts = PipelineStage::ALL
        .iter()
        .map(|stage| {
            (
                *stage,
                leads.iter().filter(|lead| lead.stage == *stage).count(),
            )
        })
        .collect();

    let mut source_counts = BTreeMap::new();
    for lead in leads {
        *source_counts.entry(lead.source.clone()).or_insert(0) += 1;
    }

    let reason_counts = LostReason::ALL
        .iter()
        .map(|reason| {
            (
                *reason,
                leads
                    .iter()
                    .filter(|lead| lead.reason_lost_delay == Some(*reason))
                    .count(),
            )
        })
        .filter(|(_, count)| *count > 0)
        .collect();

    let mut monthly_added = BTreeMap::new();
    for lead in leads {
        let month = lead.date_added.format("%Y-%m").to_string();
        *monthly_added.entry(month).or_insert(0) += 1;
    }

    DashboardStats {
        total_leads,
        closed_paid,
        conversion_rate,
        total_revenue: closed_paid as f64 * lead_value,
        avg_time_to_close_days,
        stage_counts,
        source_counts,
        reason_counts,
        monthly_added,
    }
}
