//! List command handler.

use crate::commands::load_or_report;
use crate::{table, Config};
use anyhow::Result;

/// Shows the ledger in file order.
pub fn list(config: &Config) -> Result<()> {
    if let Some(records) = load_or_report(config)? {
        println!("Current data:");
        table::print(&records, config.currency());
    }
    Ok(())
}
