//! `reef demo` - the three-day trial board.

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;

use crate::commands::{lead_line, open_store};
use crate::models::{DemoDay, PipelineStage};

pub fn run() -> Result<()> {
    let store = open_store()?;
    let today = Utc::now().date_naive();

    let active: Vec<_> = store
        .leads()
        .iter()
        .filter(|lead| lead.stage == PipelineStage::DemoActive)
        .collect();

    if active.is_empty() {
        println!("{} No active demos.", "ℹ".blue());
        return Ok(());
    }

    for day in DemoDay::ALL {
        let in_bucket: Vec<_> = active
            .iter()
            .filter(|lead| lead.demo_day(today) == Some(day))
            .collect();
        println!("{} ({})", day.to_string().yellow().bold(), in_bucket.len());
        for lead in in_bucket {
            println!("{}", lead_line(lead));
        }
        println!();
    }

    // Demos without a start date can't be bucketed; surface them rather
    // than dropping them silently.
    let unscheduled: Vec<_> = active
        .iter()
        .filter(|lead| lead.demo_day(today).is_none())
        .collect();
    if !unscheduled.is_empty() {
        println!("{} ({})", "Not started".dimmed().bold(), unscheduled.len());
        for lead in unscheduled {
            println!("{}", lead_line(lead));
        }
    }

    Ok(())
}
