//! `reef import` - replace the collection from a JSON export file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use crate::commands::open_store;
use crate::export::import_json;

pub fn run(file: &str) -> Result<()> {
    let path = Path::new(file);
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let leads = match import_json(&content) {
        Ok(leads) => leads,
        Err(err) => {
            // Existing state is untouched on any validation failure.
            println!("{} {err}", "✗".red());
            std::process::exit(1);
        }
    };

    let count = leads.len();
    let mut store = open_store()?;
    store.replace_all(leads);
    println!(
        "{} Imported {} lead(s) from {}",
        "✓".green(),
        count,
        path.display()
    );
    Ok(())
}
