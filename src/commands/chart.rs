//! Chart command handlers.
//!
//! Each handler aggregates the ledger, renders an SVG into the configured
//! charts directory and, unless asked not to, hands the file to the platform
//! opener. The written path is returned so callers and tests can find it.

use crate::commands::{load_or_report, reveal};
use crate::report::{aggregate, series};
use crate::{chart, Config};
use anyhow::Result;
use chrono::Month;
use std::path::PathBuf;

/// Renders the day-by-day spending line chart.
///
/// Days between the first and last recorded date with no spending appear as
/// zero rather than being skipped.
pub fn chart_daily(config: &Config, open_chart: bool) -> Result<Option<PathBuf>> {
    let Some(records) = load_or_report(config)? else {
        return Ok(None);
    };
    let points = series::complete(&aggregate::by_day(&records));
    let document = chart::line_chart(&points);
    let path = config.charts().join("daily.svg");
    finish(&document, path, open_chart).map(Some)
}

/// Renders the month-by-month spending bar chart.
pub fn chart_monthly(config: &Config, open_chart: bool) -> Result<Option<PathBuf>> {
    let Some(records) = load_or_report(config)? else {
        return Ok(None);
    };
    let bars: Vec<(String, _)> = aggregate::by_month(&records)
        .into_iter()
        .map(|(month, total)| (month.to_string(), total))
        .collect();
    let document = chart::bar_chart(&bars);
    let path = config.charts().join("monthly.svg");
    finish(&document, path, open_chart).map(Some)
}

/// Renders the category donut chart for one month, pooling every year that
/// has records in that month.
pub fn chart_categories(
    config: &Config,
    month: Month,
    open_chart: bool,
) -> Result<Option<PathBuf>> {
    let Some(records) = load_or_report(config)? else {
        return Ok(None);
    };
    let totals = aggregate::by_category_for_month(&records, month);
    if totals.is_empty() {
        println!("No expenses found for month {}.", month.name());
        return Ok(None);
    }
    let slices: Vec<_> = totals.into_iter().collect();
    let document = chart::donut_chart(&slices, month.name());
    let path = config
        .charts()
        .join(format!("categories-{}.svg", month.name().to_lowercase()));
    finish(&document, path, open_chart).map(Some)
}

fn finish(document: &svg::Document, path: PathBuf, open_chart: bool) -> Result<PathBuf> {
    chart::save(document, &path)?;
    println!("Chart saved to {}", path.display());
    if open_chart {
        reveal(&path)?;
    }
    Ok(path)
}
