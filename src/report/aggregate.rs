//! Grouping and summing over the ledger.
//!
//! Every function here returns a `BTreeMap`, so iteration order is the key
//! order: dates chronologically, months chronologically via `MonthKey`, and
//! categories in menu order.

use crate::error::{Error, Result};
use crate::model::{Category, ExpenseRecord};
use chrono::{Datelike, Month, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

/// English month names, indexed by month number minus one.
pub(crate) const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month in a specific year.
///
/// Orders chronologically and displays as a "MonthName Year" label, so a map
/// keyed by `MonthKey` is already in presentation order. The label itself is
/// never used for ordering.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // month always comes from a NaiveDate, so it is in 1..=12
        let name = MONTH_NAMES[(self.month - 1) as usize];
        write!(f, "{name} {}", self.year)
    }
}

/// Parses a case-insensitive English month name, e.g. "august".
pub fn month_from_name(name: &str) -> Result<Month> {
    let wanted = name.trim();
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(wanted))
        .and_then(|ix| Month::try_from(ix as u8 + 1).ok())
        .ok_or_else(|| Error::parse("month", wanted))
}

/// Sums amounts grouped by exact date.
pub fn by_day(records: &[ExpenseRecord]) -> BTreeMap<NaiveDate, Decimal> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(record.date).or_insert(Decimal::ZERO) += record.amount.value();
    }
    totals
}

/// Sums amounts grouped by calendar month and year.
pub fn by_month(records: &[ExpenseRecord]) -> BTreeMap<MonthKey, Decimal> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(MonthKey::of(record.date)).or_insert(Decimal::ZERO) +=
            record.amount.value();
    }
    totals
}

/// Sums amounts grouped by category for every record whose month matches
/// `target`, pooling all years that share the month name.
///
/// An empty result means nothing was spent in that month; callers report it
/// instead of rendering an empty chart.
pub fn by_category_for_month(
    records: &[ExpenseRecord],
    target: Month,
) -> BTreeMap<Category, Decimal> {
    let month = target.number_from_month();
    let mut totals = BTreeMap::new();
    for record in records.iter().filter(|r| r.date.month() == month) {
        *totals.entry(record.category).or_insert(Decimal::ZERO) += record.amount.value();
    }
    totals
}
