//! Filter command handlers.
//!
//! Each filter validates its inputs against the loaded table and fails with
//! the reason when the requested view would be empty or meaningless. The
//! interactive shell catches those failures and re-prompts instead.

use crate::commands::load_or_report;
use crate::model::{Amount, Category};
use crate::report::query::{self, ThresholdMode};
use crate::{table, Config};
use anyhow::Result;
use chrono::NaiveDate;

/// Shows the records dated between `start` and `end`, inclusive.
pub fn filter_by_dates(config: &Config, start: NaiveDate, end: NaiveDate) -> Result<()> {
    if let Some(records) = load_or_report(config)? {
        let view = query::filter_by_dates(&records, start, end)?;
        println!("Filtered data:");
        table::print(&view, config.currency());
    }
    Ok(())
}

/// Shows the records strictly below or above `threshold`.
pub fn filter_by_amount(config: &Config, mode: ThresholdMode, threshold: Amount) -> Result<()> {
    if let Some(records) = load_or_report(config)? {
        let view = query::filter_by_amount(&records, mode, threshold)?;
        println!("Filtered data:");
        table::print(&view, config.currency());
    }
    Ok(())
}

/// Shows the records filed under `category`.
pub fn filter_by_category(config: &Config, category: Category) -> Result<()> {
    if let Some(records) = load_or_report(config)? {
        let view = query::filter_by_category(&records, category)?;
        println!("Filtered data:");
        table::print(&view, config.currency());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use crate::Error;
    use std::str::FromStr;

    #[test]
    fn test_filter_by_dates_inside_span() {
        let env = TestEnv::new();
        env.seed();
        let start = NaiveDate::from_str("2024-08-01").unwrap();
        let end = NaiveDate::from_str("2024-08-05").unwrap();
        assert!(filter_by_dates(&env.config(), start, end).is_ok());
    }

    #[test]
    fn test_filter_by_dates_outside_span_fails() {
        let env = TestEnv::new();
        env.seed();
        let start = NaiveDate::from_str("2020-01-01").unwrap();
        let end = NaiveDate::from_str("2024-08-05").unwrap();
        let err = filter_by_dates(&env.config(), start, end).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_filter_by_amount_without_data() {
        let env = TestEnv::new();
        let threshold = Amount::from_str("10").unwrap();
        assert!(filter_by_amount(&env.config(), ThresholdMode::Less, threshold).is_ok());
    }

    #[test]
    fn test_filter_by_category_absent_fails() {
        let env = TestEnv::new();
        env.seed();
        let err = filter_by_category(&env.config(), Category::Utilities).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Validation { .. })
        ));
    }
}
