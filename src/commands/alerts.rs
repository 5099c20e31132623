//! `reef alerts` - derived follow-up notices.

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;

use crate::alerts::{derive_alerts, AlertCategory};
use crate::commands::open_store;

pub fn run(category: Option<String>) -> Result<()> {
    let category: Option<AlertCategory> = category.map(|s| s.parse()).transpose()?;

    let store = open_store()?;
    let alerts = derive_alerts(store.leads(), Utc::now().date_naive());
    let matching: Vec<_> = alerts
        .iter()
        .filter(|alert| category.is_none_or(|c| alert.category == c))
        .collect();

    if matching.is_empty() {
        println!("{} Nothing needs attention.", "✓".green());
        return Ok(());
    }

    for alert in matching {
        let tag = match alert.category {
            AlertCategory::Pipeline => "pipeline".blue(),
            AlertCategory::Demo => "demo".yellow(),
            AlertCategory::Payments => "payments".green(),
        };
        println!(
            "{} [{tag}] {}: {}",
            "!".red().bold(),
            alert.lead_name.cyan(),
            alert.message
        );
    }

    Ok(())
}
