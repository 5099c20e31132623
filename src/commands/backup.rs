//! `reef backup` - inspect the snapshot ring and roll the store back.

use anyhow::Result;
use colored::Colorize;

use crate::commands::open_store;

pub fn list() -> Result<()> {
    let store = open_store()?;
    let backups = store.backups()?;

    if backups.is_empty() {
        println!("{} No backups yet.", "ℹ".blue());
        return Ok(());
    }

    println!("{} (newest first)", "Backups".bold());
    for (index, snapshot) in backups.iter().enumerate() {
        println!(
            "  [{index}] {}  {} lead(s)",
            snapshot.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            snapshot.lead_count
        );
    }
    Ok(())
}

pub fn restore(index: usize) -> Result<()> {
    let mut store = open_store()?;
    let count = store.restore_backup(index)?;
    println!(
        "{} Restored backup [{index}]: collection now holds {count} lead(s)",
        "✓".green()
    );
    Ok(())
}
