//! `reef export` - write the collection (or a subset) to CSV or JSON.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use crate::commands::open_store;
use crate::export::{export_json, leads_to_csv, CSV_FILE_NAME, JSON_FILE_NAME};
use crate::models::Lead;

pub fn csv(out: Option<String>, ids: Vec<String>) -> Result<()> {
    let store = open_store()?;
    let leads = select(store.leads(), &ids)?;
    let content = leads_to_csv(&leads)?;
    let path = out.map(PathBuf::from).unwrap_or_else(|| CSV_FILE_NAME.into());
    write_out(&path, &content, leads.len())
}

pub fn json(out: Option<String>, ids: Vec<String>) -> Result<()> {
    let store = open_store()?;
    let leads = select(store.leads(), &ids)?;
    let content = export_json(&leads)?;
    let path = out
        .map(PathBuf::from)
        .unwrap_or_else(|| JSON_FILE_NAME.into());
    write_out(&path, &content, leads.len())
}

/// Resolve an optional id subset; an empty list means everything.
fn select(leads: &[Lead], ids: &[String]) -> Result<Vec<Lead>> {
    if ids.is_empty() {
        return Ok(leads.to_vec());
    }
    let mut selected = Vec::with_capacity(ids.len());
    for id in ids {
        match leads.iter().find(|lead| lead.id == *id) {
            Some(lead) => selected.push(lead.clone()),
            None => bail!("No lead with id '{id}'"),
        }
    }
    Ok(selected)
}

fn write_out(path: &PathBuf, content: &str, count: usize) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    println!(
        "{} Exported {} lead(s) to {}",
        "✓".green(),
        count,
        path.display()
    );
    Ok(())
}
