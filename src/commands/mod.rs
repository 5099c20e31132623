//! CLI command implementations. Each module owns one command family and
//! prints its own human-readable output; shared store access lives here.

pub mod add;
pub mod alerts;
pub mod backup;
pub mod dashboard;
pub mod demo;
pub mod export;
pub mod import;
pub mod list;
pub mod payment;
pub mod update;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::resolve_data_dir;
use crate::models::Lead;
use crate::store::{JsonFileBackend, LeadStore};

/// Open the store in the resolved data directory.
pub(crate) fn open_store() -> Result<LeadStore> {
    let data_dir = resolve_data_dir();
    let backend = Arc::new(JsonFileBackend::new(&data_dir));
    LeadStore::open(backend)
        .with_context(|| format!("Failed to open lead store in {}", data_dir.display()))
}

/// One-line summary used by board-style listings.
pub(crate) fn lead_line(lead: &Lead) -> String {
    use colored::Colorize;
    format!(
        "  {} | {} [{}]  {}",
        lead.name.bold(),
        lead.contact,
        lead.source,
        lead.id.dimmed()
    )
}
