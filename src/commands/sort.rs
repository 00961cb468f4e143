//! Sort command handler.

use crate::commands::load_or_report;
use crate::report::query::{self, SortKey, SortOrder};
use crate::{table, Config};
use anyhow::Result;

/// Shows the ledger reordered by `key`. The file itself is left untouched.
pub fn sort(config: &Config, key: SortKey, order: SortOrder) -> Result<()> {
    if let Some(records) = load_or_report(config)? {
        let view = query::sort_records(&records, key, order);
        println!("Sorted by {key}, {order}ending:");
        table::print(&view, config.currency());
    }
    Ok(())
}
