//! Terminal table rendering for record views.

use crate::model::ExpenseRecord;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Formats a decimal as money for display, e.g. `$1,234.50`.
pub fn money(currency: &str, value: Decimal) -> String {
    format!(
        "{currency}{}",
        format_num::format_num!(",.2", value.to_f64().unwrap_or_default())
    )
}

/// Builds a bordered table of `records` with 1-based display indices.
///
/// The index column numbers the view being shown, not the rows' positions
/// in the file; a filtered or sorted view always counts 1..N.
pub fn render(records: &[ExpenseRecord], currency: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Date", "Category", "Amount", "Description"]);
    for (ix, record) in records.iter().enumerate() {
        table.add_row(vec![
            Cell::new(ix + 1).set_alignment(CellAlignment::Right),
            Cell::new(record.date),
            Cell::new(record.category),
            Cell::new(money(currency, record.amount.value())).set_alignment(CellAlignment::Right),
            Cell::new(&record.description),
        ]);
    }
    table
}

/// Renders `records` to stdout.
pub fn print(records: &[ExpenseRecord], currency: &str) {
    println!("{}", render(records, currency));
}
