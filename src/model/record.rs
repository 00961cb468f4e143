//! The ledger row type.

use crate::model::{Amount, Category};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The CSV header row, in column order.
pub const HEADERS: [&str; 4] = ["Date", "Category", "Amount", "Description"];

/// One expense entry as stored in the ledger file.
///
/// Field order matches the on-disk column order. A record is immutable once
/// written; the only mutation the store supports is whole-row deletion.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: Amount,
    pub description: String,
}

impl ExpenseRecord {
    pub fn new(
        date: NaiveDate,
        category: Category,
        amount: Amount,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            category,
            amount,
            description: description.into(),
        }
    }
}
