//! `reef add` - create a lead.

use anyhow::Result;
use colored::Colorize;

use crate::commands::open_store;
use crate::models::{Lead, PipelineStage};
use crate::transitions::LeadPatch;

#[allow(clippy::too_many_arguments)]
pub fn run(
    name: String,
    contact: String,
    client_type: String,
    source: String,
    email: Option<String>,
    notes: Option<String>,
    stage: Option<String>,
) -> Result<()> {
    let client_type = client_type.parse()?;
    let stage: Option<PipelineStage> = stage.map(|s| s.parse()).transpose()?;

    let mut lead = Lead::new(name, contact, client_type, source);
    lead.email = email;
    lead.notes = notes;

    let mut store = open_store()?;
    let id = store.add(lead).id.clone();

    // Creating straight into a later stage still goes through the
    // transition rules, so demo windows and payment defaults derive.
    let lead = match stage {
        Some(stage) if stage != PipelineStage::NewLead => {
            store.update(&id, &LeadPatch::stage(stage))?
        }
        _ => store.get(&id).expect("lead was just added").clone(),
    };

    println!(
        "{} Added lead '{}' in stage {} ({})",
        "✓".green(),
        lead.name.cyan(),
        lead.stage.to_string().color(lead.stage.color()),
        lead.id.dimmed()
    );
    Ok(())
}
