//! `reef list` and `reef show` - the pipeline board and single-lead view.

use anyhow::{bail, Result};
use colored::Colorize;

use crate::commands::{lead_line, open_store};
use crate::models::{ClientType, Lead, PipelineStage};

pub struct ListFilters {
    pub stage: Option<String>,
    pub client_type: Option<String>,
    pub source: Option<String>,
    pub search: Option<String>,
}

pub fn run(filters: ListFilters) -> Result<()> {
    let stage: Option<PipelineStage> = filters.stage.map(|s| s.parse()).transpose()?;
    let client_type: Option<ClientType> = filters.client_type.map(|s| s.parse()).transpose()?;
    let search = filters.search.unwrap_or_default();

    let store = open_store()?;
    let matching: Vec<&Lead> = store
        .leads()
        .iter()
        .filter(|lead| stage.is_none_or(|s| lead.stage == s))
        .filter(|lead| client_type.is_none_or(|t| lead.client_type == t))
        .filter(|lead| {
            filters
                .source
                .as_ref()
                .is_none_or(|source| lead.source == *source)
        })
        .filter(|lead| lead.matches_search(&search))
        .collect();

    if matching.is_empty() {
        println!("{} No leads match.", "ℹ".blue());
        return Ok(());
    }

    for column in PipelineStage::ALL {
        if stage.is_some_and(|s| s != column) {
            continue;
        }
        let in_column: Vec<&&Lead> = matching.iter().filter(|l| l.stage == column).collect();
        if in_column.is_empty() {
            continue;
        }
        println!(
            "{} ({})",
            column.to_string().color(column.color()).bold(),
            in_column.len()
        );
        for lead in in_column {
            println!("{}", lead_line(lead));
        }
        println!();
    }

    Ok(())
}

pub fn show(id: String) -> Result<()> {
    let store = open_store()?;
    let Some(lead) = store.get(&id) else {
        bail!("No lead with id '{id}'");
    };

    println!("{}", lead.name.bold());
    println!("  id:       {}", lead.id.dimmed());
    println!("  contact:  {}", lead.contact);
    if let Some(email) = &lead.email {
        println!("  email:    {email}");
    }
    println!("  type:     {}", lead.client_type);
    println!(
        "  stage:    {}",
        lead.stage.to_string().color(lead.stage.color())
    );
    println!("  source:   {}", lead.source);
    println!("  added:    {}", lead.date_added.format("%Y-%m-%d %H:%M"));

    if let Some(start) = lead.demo_start_date {
        println!("  demo:     {}", format_window(start, lead.demo_end_date));
    }
    if let Some(stage) = lead.payment_stage {
        println!("  payment:  {stage}");
    }
    if let Some(date) = lead.payment_date {
        println!("  paid on:  {}", date.format("%Y-%m-%d"));
    }
    if let Some(date) = lead.recontact_date {
        println!("  re-contact: {}", date.format("%Y-%m-%d"));
    }
    if let Some(reason) = lead.reason_lost_delay {
        println!("  reason:   {reason}");
    }
    if let Some(rib) = lead.rib_type {
        println!("  rib:      {rib}");
    }
    if let Some(installments) = &lead.installments {
        println!(
            "  installments ({} of {}):",
            installments.iter().filter(|i| !i.date.is_empty()).count(),
            installments.len()
        );
        for (index, installment) in installments.iter().enumerate() {
            let date = if installment.date.is_empty() {
                "unpaid".dimmed().to_string()
            } else {
                installment.date.clone()
            };
            let doc = installment
                .document_name
                .as_deref()
                .map(|name| format!("  [{name}]"))
                .unwrap_or_default();
            println!("    {}. {date}{doc}", index + 1);
        }
    }
    if let Some(invoices) = &lead.invoices {
        println!("  invoices: {}", invoices.len());
    }
    if let Some(notes) = &lead.notes {
        println!("  notes:    {notes}");
    }

    Ok(())
}

fn format_window(
    start: chrono::DateTime<chrono::Utc>,
    end: Option<chrono::DateTime<chrono::Utc>>,
) -> String {
    match end {
        Some(end) => format!(
            "{} → {}",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        ),
        None => start.format("%Y-%m-%d").to_string(),
    }
}
