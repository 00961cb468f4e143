//! Non-mutating views over the loaded table: ordering and filters.
//!
//! Filters validate their inputs against what the table actually contains
//! and refuse combinations that could only produce a meaningless view; the
//! interactive boundary turns each refusal into a re-prompt.

use crate::error::{Error, Result};
use crate::model::{Amount, Category, ExpenseRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The column a sorted view is ordered by.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Date,
    Category,
    Amount,
    Description,
}

serde_plain::derive_display_from_serialize!(SortKey);
serde_plain::derive_fromstr_from_deserialize!(SortKey);

impl SortKey {
    /// Looks up a key by its 1-based menu position.
    pub fn from_index(index: usize) -> Option<SortKey> {
        match index {
            1 => Some(SortKey::Date),
            2 => Some(SortKey::Category),
            3 => Some(SortKey::Amount),
            4 => Some(SortKey::Description),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

serde_plain::derive_display_from_serialize!(SortOrder);
serde_plain::derive_fromstr_from_deserialize!(SortOrder);

/// Which side of the threshold the amount filter keeps.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    Less,
    Greater,
}

serde_plain::derive_display_from_serialize!(ThresholdMode);
serde_plain::derive_fromstr_from_deserialize!(ThresholdMode);

/// Returns the records reordered by `key`.
///
/// The sort is stable in both directions: records with equal keys keep
/// their file order. The category key compares the capitalized display
/// labels, so "Education" sorts before "Food".
pub fn sort_records(
    records: &[ExpenseRecord],
    key: SortKey,
    order: SortOrder,
) -> Vec<ExpenseRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Category => a.category.as_str().cmp(b.category.as_str()),
            SortKey::Amount => a.amount.cmp(&b.amount),
            SortKey::Description => a.description.cmp(&b.description),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

/// The smallest and largest dates present.
pub fn date_span(records: &[ExpenseRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let min = records.iter().map(|r| r.date).min()?;
    let max = records.iter().map(|r| r.date).max()?;
    Some((min, max))
}

/// Keeps records with `start <= date <= end`.
///
/// Both endpoints must fall inside the table's recorded span; an endpoint
/// outside it, or a range that matches nothing, is a `Validation` error so
/// the caller can re-prompt. There is no empty view.
pub fn filter_by_dates(
    records: &[ExpenseRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<ExpenseRecord>> {
    let (min, max) = date_span(records).ok_or(Error::EmptyStore)?;
    for endpoint in [start, end] {
        if endpoint < min || endpoint > max {
            return Err(Error::validation(format!(
                "{endpoint} is outside the recorded range {min} to {max}"
            )));
        }
    }
    let matches: Vec<ExpenseRecord> = records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect();
    if matches.is_empty() {
        return Err(Error::validation(format!(
            "no expenses between {start} and {end}"
        )));
    }
    Ok(matches)
}

/// Keeps records strictly below or strictly above `threshold`.
///
/// A threshold at or below the smallest amount (less mode), or at or above
/// the largest (greater mode), is refused up front; past that check the
/// result always contains at least the extreme row.
pub fn filter_by_amount(
    records: &[ExpenseRecord],
    mode: ThresholdMode,
    threshold: Amount,
) -> Result<Vec<ExpenseRecord>> {
    let min = records.iter().map(|r| r.amount).min().ok_or(Error::EmptyStore)?;
    let max = records.iter().map(|r| r.amount).max().ok_or(Error::EmptyStore)?;
    let keep: fn(Amount, Amount) -> bool = match mode {
        ThresholdMode::Less => {
            if threshold <= min {
                return Err(Error::validation(format!(
                    "every expense is at least {min}, nothing lies below {threshold}"
                )));
            }
            |amount, threshold| amount < threshold
        }
        ThresholdMode::Greater => {
            if threshold >= max {
                return Err(Error::validation(format!(
                    "no expense exceeds {max}, nothing lies above {threshold}"
                )));
            }
            |amount, threshold| amount > threshold
        }
    };
    Ok(records
        .iter()
        .filter(|r| keep(r.amount, threshold))
        .cloned()
        .collect())
}

/// The distinct categories in the table, in menu order.
pub fn categories_present(records: &[ExpenseRecord]) -> Vec<Category> {
    let present: BTreeSet<Category> = records.iter().map(|r| r.category).collect();
    present.into_iter().collect()
}

/// Keeps records in `category`, which must actually occur in the table.
pub fn filter_by_category(
    records: &[ExpenseRecord],
    category: Category,
) -> Result<Vec<ExpenseRecord>> {
    if !records.iter().any(|r| r.category == category) {
        return Err(Error::validation(format!(
            "no expenses recorded under {category}"
        )));
    }
    Ok(records
        .iter()
        .filter(|r| r.category == category)
        .cloned()
        .collect())
}
