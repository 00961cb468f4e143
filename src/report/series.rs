//! Dense day-by-day series for the trend chart.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Expands a sparse date→amount mapping into one entry per calendar day
/// between its smallest and largest key, inclusive, zero-filling the gaps.
///
/// A line drawn from the sparse mapping alone would connect non-adjacent
/// days and distort the trend; the dense series keeps zero-spend days on
/// the axis. Output is sorted ascending by construction.
pub fn complete(sparse: &BTreeMap<NaiveDate, Decimal>) -> Vec<(NaiveDate, Decimal)> {
    let (Some((&min, _)), Some((&max, _))) = (sparse.first_key_value(), sparse.last_key_value())
    else {
        return Vec::new();
    };
    let mut series = Vec::new();
    let mut day = min;
    while day <= max {
        series.push((day, sparse.get(&day).copied().unwrap_or(Decimal::ZERO)));
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    series
}
