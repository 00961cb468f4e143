//! Add command handler.

use crate::model::ExpenseRecord;
use crate::{table, Config};
use anyhow::Result;

/// Appends `record` to the ledger and shows the updated table.
///
/// The ledger file, header row included, is created on first use.
pub fn add(config: &Config, record: ExpenseRecord) -> Result<()> {
    let store = config.store();
    store.append(&record)?;
    println!(
        "Recorded {} under {} on {}.",
        table::money(config.currency(), record.amount.value()),
        record.category,
        record.date
    );
    let records = store.load()?;
    table::print(&records, config.currency());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, Category};
    use crate::test::TestEnv;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn record() -> ExpenseRecord {
        ExpenseRecord::new(
            NaiveDate::from_ymd_opt(2024, 8, 14).unwrap(),
            Category::Healthcare,
            Amount::from_str("42.10").unwrap(),
            "pharmacy",
        )
    }

    #[test]
    fn test_add_creates_ledger_with_header() {
        let env = TestEnv::new();
        add(&env.config(), record()).unwrap();

        let text = std::fs::read_to_string(env.config().store_path()).unwrap();
        assert_eq!(
            text,
            "Date,Category,Amount,Description\n2024-08-14,Healthcare,42.10,pharmacy\n"
        );
    }

    #[test]
    fn test_add_appends_to_existing_ledger() {
        let env = TestEnv::new();
        let seeded = env.seed();
        add(&env.config(), record()).unwrap();

        let records = env.config().store().load().unwrap();
        assert_eq!(records.len(), seeded.len() + 1);
        assert_eq!(records.last(), Some(&record()));
    }
}
