//! Command handlers for the outlay CLI.
//!
//! This module contains implementations for all CLI subcommands. Each handler
//! prints its outcome to stdout and reserves `Err` for failures the caller
//! should surface.

mod add;
mod chart;
mod delete;
mod filter;
mod list;
mod open;
mod sort;

use crate::model::ExpenseRecord;
use crate::Config;
use anyhow::Result;

pub use add::add;
pub use chart::{chart_categories, chart_daily, chart_monthly};
pub use delete::delete;
pub use filter::{filter_by_amount, filter_by_category, filter_by_dates};
pub use list::list;
pub use open::open;
pub use sort::sort;

pub(crate) use open::reveal;

/// Loads the ledger, reporting instead of failing when there is nothing to
/// read yet.
///
/// Returns `None` after printing a hint when the file is missing or holds no
/// records. Any other load failure is passed through.
pub(crate) fn load_or_report(config: &Config) -> Result<Option<Vec<ExpenseRecord>>> {
    match config.store().load() {
        Ok(records) => Ok(Some(records)),
        Err(e) if e.is_no_data() => {
            println!("No data to show: {e}. Add an expense first.");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
