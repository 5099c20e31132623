//! `reef dashboard` - KPIs, breakdown tables and all current alerts.

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;

use crate::alerts::derive_alerts;
use crate::commands::open_store;
use crate::config::{resolve_data_dir, Config};
use crate::dashboard::compute_stats;

pub fn run() -> Result<()> {
    let config = Config::load(&resolve_data_dir())?;
    let store = open_store()?;
    let stats = compute_stats(store.leads(), config.lead_value);

    println!("{}\n", crate::LOGO.cyan());
    println!("{}", "Dashboard".bold());
    println!("  Total leads:        {}", stats.total_leads);
    println!("  Closed - Paid:      {}", stats.closed_paid);
    println!("  Conversion rate:    {:.1}%", stats.conversion_rate);
    println!("  Total revenue:      ${:.0}", stats.total_revenue);
    println!(
        "  Avg. time to close: {:.1} days",
        stats.avg_time_to_close_days
    );

    println!("\n{}", "Pipeline".bold());
    for (stage, count) in &stats.stage_counts {
        println!(
            "  {:<16} {}",
            stage.to_string().color(stage.color()),
            count
        );
    }

    if !stats.source_counts.is_empty() {
        println!("\n{}", "Sources".bold());
        for (source, count) in &stats.source_counts {
            println!("  {source:<20} {count}");
        }
    }

    if !stats.reason_counts.is_empty() {
        println!("\n{}", "Lost / delayed reasons".bold());
        for (reason, count) in &stats.reason_counts {
            println!("  {:<16} {}", reason.to_string(), count);
        }
    }

    if !stats.monthly_added.is_empty() {
        println!("\n{}", "Leads added by month".bold());
        for (month, count) in &stats.monthly_added {
            println!("  {month}  {count}");
        }
    }

    // The dashboard shows every category, unlike the per-view boards.
    let alerts = derive_alerts(store.leads(), Utc::now().date_naive());
    if !alerts.is_empty() {
        println!("\n{} ({})", "Alerts".bold(), alerts.len());
        for alert in &alerts {
            println!(
                "  {} {}: {}",
                "!".red(),
                alert.lead_name.cyan(),
                alert.message
            );
        }
    }

    Ok(())
}
