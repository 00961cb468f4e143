//! SVG chart rendering.
//!
//! Three generators, one per visual summary: a daily trend line, monthly
//! total bars, and a category donut. Each returns an `svg::Document`; the
//! chart commands decide where it lands on disk and whether to open it.

use crate::error::Result;
use crate::model::Category;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::path::Path;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Line, Path as SvgPath, Rectangle, Text};
use svg::Document;

const FWIDTH: f64 = 1000.0;
const FHEIGHT: f64 = 620.0;
const MARGIN: f64 = 90.0;
const STROKE_WIDTH: f64 = 2.0;

const COLORS: &[&str] = &[
    "red", "green", "blue", "yellow", "orange", "purple", "cyan", "magenta",
];

/// How many degrees into the circle the first donut slice starts.
const START_ANGLE: f64 = 140.0;

fn value_of(d: Decimal) -> f64 {
    d.to_f64().unwrap_or_default()
}

fn frame(title: &str) -> Document {
    let xaxis = Line::new()
        .set("x1", 0.0)
        .set("x2", FWIDTH)
        .set("y1", FHEIGHT)
        .set("y2", FHEIGHT)
        .set("stroke", "black")
        .set("stroke-width", STROKE_WIDTH);
    let yaxis = Line::new()
        .set("x1", 0.0)
        .set("x2", 0.0)
        .set("y1", 0.0)
        .set("y2", FHEIGHT)
        .set("stroke", "black")
        .set("stroke-width", STROKE_WIDTH);
    Document::new()
        .set(
            "viewBox",
            (
                -MARGIN,
                -MARGIN,
                FWIDTH + 2.0 * MARGIN,
                FHEIGHT + 2.0 * MARGIN,
            ),
        )
        .add(
            Text::new(title)
                .set("x", FWIDTH / 2.0)
                .set("y", -MARGIN / 2.0)
                .set("font-size", 24)
                .set("text-anchor", "middle"),
        )
        .add(xaxis)
        .add(yaxis)
}

/// Horizontal tick lines with amount labels on the y axis.
fn y_ticks(document: Document, max_y: f64) -> Document {
    (0..=4).fold(document, |doc, step| {
        let value = max_y * f64::from(step) / 4.0;
        let y = FHEIGHT - value / max_y * FHEIGHT;
        doc.add(
            Line::new()
                .set("x1", -6.0)
                .set("x2", 0.0)
                .set("y1", y)
                .set("y2", y)
                .set("stroke", "black")
                .set("stroke-width", 1.0),
        )
        .add(
            Text::new(format!("{value:.2}"))
                .set("x", -12.0)
                .set("y", y + 4.0)
                .set("font-size", 12)
                .set("text-anchor", "end"),
        )
    })
}

/// Daily spending trend: one marker per day of the dense series, joined by
/// a line. Expects the zero-filled output of `report::series::complete`.
pub fn line_chart(series: &[(NaiveDate, Decimal)]) -> Document {
    let max_y = series
        .iter()
        .map(|(_, v)| value_of(*v))
        .fold(1.0_f64, f64::max);
    let span = (series.len().saturating_sub(1)).max(1) as f64;
    let resize_x = |ix: usize| ix as f64 / span * FWIDTH;
    let resize_y = |v: f64| FHEIGHT - v / max_y * FHEIGHT;

    let mut document = y_ticks(frame("Spending per day"), max_y).add(
        Text::new("Amount")
            .set("x", -MARGIN + 18.0)
            .set("y", FHEIGHT / 2.0)
            .set("font-size", 14)
            .set(
                "transform",
                format!("rotate(-90 {} {})", -MARGIN + 18.0, FHEIGHT / 2.0),
            ),
    );

    if let Some((_, first)) = series.first() {
        let data = series
            .iter()
            .enumerate()
            .skip(1)
            .fold(
                Data::new().move_to((resize_x(0), resize_y(value_of(*first)))),
                |data, (ix, (_, v))| data.line_to((resize_x(ix), resize_y(value_of(*v)))),
            );
        document = document.add(
            SvgPath::new()
                .set("fill", "none")
                .set("stroke", "black")
                .set("stroke-width", STROKE_WIDTH)
                .set("d", data),
        );
    }

    for (ix, (_, v)) in series.iter().enumerate() {
        document = document.add(
            Circle::new()
                .set("cx", resize_x(ix))
                .set("cy", resize_y(value_of(*v)))
                .set("r", 4.0)
                .set("fill", "black"),
        );
    }

    // Date labels thin out as the span grows so they stay readable.
    let step = (series.len() / 12).max(1);
    for (ix, (day, _)) in series.iter().enumerate().step_by(step) {
        document = document.add(
            Text::new(day.to_string())
                .set("x", resize_x(ix))
                .set("y", FHEIGHT + 26.0)
                .set("font-size", 11)
                .set("text-anchor", "middle"),
        );
    }
    document
}

/// Monthly totals as vertical bars with one label per month.
pub fn bar_chart(bars: &[(String, Decimal)]) -> Document {
    let max_y = bars
        .iter()
        .map(|(_, v)| value_of(*v))
        .fold(1.0_f64, f64::max);
    let slot = FWIDTH / bars.len().max(1) as f64;
    let bar_width = slot * 0.2;

    let mut document = y_ticks(frame("Spendings per Month"), max_y)
        .add(
            Text::new("Months")
                .set("x", FWIDTH / 2.0)
                .set("y", FHEIGHT + 56.0)
                .set("font-size", 14)
                .set("text-anchor", "middle"),
        )
        .add(
            Text::new("Spendings")
                .set("x", -MARGIN + 18.0)
                .set("y", FHEIGHT / 2.0)
                .set("font-size", 14)
                .set(
                    "transform",
                    format!("rotate(-90 {} {})", -MARGIN + 18.0, FHEIGHT / 2.0),
                ),
        );

    for (ix, (label, v)) in bars.iter().enumerate() {
        let center = slot * (ix as f64 + 0.5);
        let height = value_of(*v) / max_y * FHEIGHT;
        document = document
            .add(
                Rectangle::new()
                    .set("x", center - bar_width / 2.0)
                    .set("y", FHEIGHT - height)
                    .set("width", bar_width)
                    .set("height", height)
                    .set("fill", COLORS[ix % COLORS.len()]),
            )
            .add(
                Text::new(label.clone())
                    .set("x", center)
                    .set("y", FHEIGHT + 26.0)
                    .set("font-size", 12)
                    .set("text-anchor", "middle"),
            );
    }
    document
}

/// A point on the circle at `angle` degrees, counterclockwise from the
/// positive x axis as on a chart, not in screen coordinates.
fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    let rad = angle.to_radians();
    (cx + radius * rad.cos(), cy - radius * rad.sin())
}

/// One annular sector from `from` to `to` degrees.
fn sector(cx: f64, cy: f64, outer: f64, inner: f64, from: f64, to: f64) -> String {
    let large = if to - from > 180.0 { 1 } else { 0 };
    let (ox0, oy0) = polar(cx, cy, outer, from);
    let (ox1, oy1) = polar(cx, cy, outer, to);
    let (ix0, iy0) = polar(cx, cy, inner, from);
    let (ix1, iy1) = polar(cx, cy, inner, to);
    format!(
        "M {ox0:.3} {oy0:.3} \
         A {outer:.3} {outer:.3} 0 {large} 0 {ox1:.3} {oy1:.3} \
         L {ix1:.3} {iy1:.3} \
         A {inner:.3} {inner:.3} 0 {large} 1 {ix0:.3} {iy0:.3} Z"
    )
}

/// Category shares of one month as a donut: colored ring sectors, the
/// percentage inside the ring, the category name outside it.
pub fn donut_chart(slices: &[(Category, Decimal)], month_name: &str) -> Document {
    let total: f64 = slices.iter().map(|(_, v)| value_of(*v)).sum();
    let total = if total > 0.0 { total } else { 1.0 };
    let (cx, cy) = (FWIDTH / 2.0, FHEIGHT / 2.0);
    let outer = FHEIGHT * 0.36;
    let inner = outer * 0.6;

    let mut document = Document::new()
        .set(
            "viewBox",
            (
                -MARGIN,
                -MARGIN,
                FWIDTH + 2.0 * MARGIN,
                FHEIGHT + 2.0 * MARGIN,
            ),
        )
        .add(
            Text::new(format!("Expenses by Category ({month_name})"))
                .set("x", cx)
                .set("y", -MARGIN / 2.0)
                .set("font-size", 24)
                .set("text-anchor", "middle"),
        );

    let mut angle = START_ANGLE;
    for (ix, (category, v)) in slices.iter().enumerate() {
        let fraction = value_of(*v) / total;
        // an arc whose endpoints coincide renders as nothing, so a lone
        // slice stops a sliver short of the full circle
        let sweep = (fraction * 360.0).min(359.99);
        document = document.add(
            SvgPath::new()
                .set("fill", COLORS[ix % COLORS.len()])
                .set("stroke", "white")
                .set("stroke-width", 1.0)
                .set("d", sector(cx, cy, outer, inner, angle, angle + sweep)),
        );

        let mid = angle + sweep / 2.0;
        let (px, py) = polar(cx, cy, (outer + inner) / 2.0, mid);
        document = document.add(
            Text::new(format!("{:.1}%", fraction * 100.0))
                .set("x", px)
                .set("y", py + 4.0)
                .set("font-size", 13)
                .set("text-anchor", "middle"),
        );

        let (lx, ly) = polar(cx, cy, outer * 1.12, mid);
        let anchor = if lx < cx { "end" } else { "start" };
        document = document.add(
            Text::new(category.to_string())
                .set("x", lx)
                .set("y", ly + 4.0)
                .set("font-size", 14)
                .set("text-anchor", anchor),
        );
        angle += sweep;
    }
    document
}

/// Writes `document` to `path`.
pub fn save(document: &Document, path: &Path) -> Result<()> {
    svg::save(path, document)?;
    Ok(())
}
