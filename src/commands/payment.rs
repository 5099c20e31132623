//! `reef payment` - installment tracking for closed sales.

use anyhow::{bail, Result};
use colored::Colorize;

use crate::commands::open_store;
use crate::transitions::LeadPatch;

pub fn advance(id: String) -> Result<()> {
    let mut store = open_store()?;
    let stage = store.advance_payment_stage(&id)?;
    println!("{} Payment stage is now '{}'", "✓".green(), stage);
    Ok(())
}

pub fn set(id: String, stage: String) -> Result<()> {
    let stage = stage.parse()?;
    let mut store = open_store()?;
    store.set_payment_stage(&id, stage)?;
    println!("{} Payment stage is now '{}'", "✓".green(), stage);
    Ok(())
}

/// Declare how many installments the sale is split into. The stored list
/// resizes to match, preserving already-recorded entries by index.
pub fn installments(id: String, count: u8) -> Result<()> {
    let mut store = open_store()?;
    let lead = store.update(
        &id,
        &LeadPatch {
            number_of_installments: Some(count),
            ..LeadPatch::default()
        },
    )?;
    println!(
        "{} '{}' now tracks {} installment(s)",
        "✓".green(),
        lead.name.cyan(),
        lead.number_of_installments.unwrap_or(count)
    );
    Ok(())
}

/// Record the payment date (and optionally a document name) of one
/// installment. `position` is 1-based to match the board.
pub fn record(id: String, position: usize, date: String, document: Option<String>) -> Result<()> {
    // Validated here so the error mentions the flag, not the store.
    chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|err| anyhow::anyhow!("Invalid date '{date}' (expected YYYY-MM-DD): {err}"))?;

    let mut store = open_store()?;
    let Some(lead) = store.get(&id) else {
        bail!("No lead with id '{id}'");
    };

    let mut installments = lead.installments.clone().unwrap_or_default();
    if position == 0 || position > installments.len() {
        bail!(
            "Installment {position} does not exist; '{}' has {} installment(s)",
            lead.name,
            installments.len()
        );
    }
    installments[position - 1].date = date.clone();
    if document.is_some() {
        installments[position - 1].document_name = document;
    }

    let lead = store.update(
        &id,
        &LeadPatch {
            installments: Some(installments),
            ..LeadPatch::default()
        },
    )?;

    println!(
        "{} Recorded installment {position} of '{}' on {date}",
        "✓".green(),
        lead.name.cyan()
    );
    Ok(())
}
