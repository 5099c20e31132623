//! `reef update`, `reef delete` and `reef bulk` - single and bulk edits.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use colored::Colorize;

use crate::commands::open_store;
use crate::transitions::LeadPatch;

/// Raw flag values for `reef update`; parsed here so the store only ever
/// sees well-typed patches.
#[derive(Default)]
pub struct UpdateArgs {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub client_type: Option<String>,
    pub stage: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub reason: Option<String>,
    pub recontact: Option<String>,
    pub demo_start: Option<String>,
    pub demo_end: Option<String>,
    pub payment_date: Option<String>,
    pub rib_type: Option<String>,
    pub installments: Option<u8>,
    pub invoices: Option<u8>,
}

impl UpdateArgs {
    fn into_patch(self) -> Result<LeadPatch> {
        Ok(LeadPatch {
            name: self.name,
            contact: self.contact,
            email: self.email,
            client_type: self.client_type.map(|s| s.parse()).transpose()?,
            stage: self.stage.map(|s| s.parse()).transpose()?,
            payment_stage: None,
            demo_start_date: self.demo_start.map(|s| parse_day(&s)).transpose()?,
            demo_end_date: self.demo_end.map(|s| parse_day(&s)).transpose()?,
            payment_date: self.payment_date.map(|s| parse_day(&s)).transpose()?,
            notes: self.notes,
            source: self.source,
            reason_lost_delay: self.reason.map(|s| s.parse()).transpose()?,
            recontact_date: self.recontact.map(|s| parse_day(&s)).transpose()?,
            rib_type: self.rib_type.map(|s| s.parse()).transpose()?,
            number_of_installments: self.installments,
            installments: None,
            number_of_invoices: self.invoices,
            invoices: None,
        })
    }
}

/// Parse a `YYYY-MM-DD` flag into a UTC midnight timestamp.
pub(crate) fn parse_day(text: &str) -> Result<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|err| anyhow::anyhow!("Invalid date '{text}' (expected YYYY-MM-DD): {err}"))?;
    Ok(day
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc())
}

pub fn run(id: String, args: UpdateArgs) -> Result<()> {
    let patch = args.into_patch()?;
    let mut store = open_store()?;
    let lead = store.update(&id, &patch)?;

    println!(
        "{} Updated '{}' ({}), now in {}",
        "✓".green(),
        lead.name.cyan(),
        lead.id.dimmed(),
        lead.stage.to_string().color(lead.stage.color())
    );
    Ok(())
}

pub fn delete(id: String) -> Result<()> {
    let mut store = open_store()?;
    store.delete(&id)?;
    println!("{} Deleted lead {}", "✓".green(), id.dimmed());
    Ok(())
}

pub fn bulk_stage(ids: Vec<String>, stage: String) -> Result<()> {
    let stage = stage.parse()?;
    let mut store = open_store()?;
    let changed = store.update_stage_bulk(&ids, stage);

    if changed == 0 {
        println!("{} No matching leads.", "ℹ".blue());
    } else {
        println!(
            "{} Moved {changed} lead(s) to {}",
            "✓".green(),
            stage.to_string().color(stage.color())
        );
    }
    Ok(())
}

pub fn bulk_delete(ids: Vec<String>) -> Result<()> {
    let mut store = open_store()?;
    let removed = store.delete_bulk(&ids);

    if removed == 0 {
        println!("{} No matching leads.", "ℹ".blue());
    } else {
        println!("{} Deleted {removed} lead(s)", "✓".green());
    }
    Ok(())
}
