//! A dependency-free SVG line chart of the cumulative growth table.

use crate::format::fixed;
use analytics::CumulativeGrowth;
use core_types::PortfolioId;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

// Roughly the 15x8 aspect ratio of a wide matplotlib figure.
const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 640.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 90.0;
const MIN_DATE_TICKS: usize = 5;
const MAX_DATE_TICKS: usize = 12;
const VALUE_TICKS: usize = 6;
const COLORS: [&str; 5] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd"];

/// Renders the chart, or `None` when the table has no plottable value.
pub fn render_growth_chart(growth: &CumulativeGrowth, initial_investment: Decimal) -> Option<String> {
    let first_date = *growth.dates().first()?;

    let series: Vec<(PortfolioId, Vec<(usize, f64)>)> = growth
        .columns()
        .map(|(id, column)| {
            let points = column
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.and_then(|v| v.to_f64()).map(|v| (i, v)))
                .collect();
            (id, points)
        })
        .collect();

    let (min, max) = series
        .iter()
        .flat_map(|(_, points)| points.iter().map(|(_, v)| *v))
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })?;
    let (min, max) = if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    };

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let last_index = growth.len().saturating_sub(1).max(1) as f64;
    let x = |i: usize| MARGIN_LEFT + plot_w * i as f64 / last_index;
    let y = |v: f64| MARGIN_TOP + plot_h * (1.0 - (v - min) / (max - min));

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" width="{WIDTH}" height="{HEIGHT}"><style>text{{font-family:Arial,sans-serif;font-size:12px;fill:#333}}</style><rect width="100%" height="100%" fill="white"/>"#
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="28" text-anchor="middle" style="font-size:16px">Daily Cumulative Growth of ${} Initial Investment (Starting {})</text>"#,
        WIDTH / 2.0,
        fixed(initial_investment, 0),
        first_date.format("%Y-%m-%d")
    ));

    // Value axis with horizontal grid lines.
    for step in 0..=VALUE_TICKS {
        let value = min + (max - min) * step as f64 / VALUE_TICKS as f64;
        let ty = y(value);
        svg.push_str(&format!(
            r##"<line x1="{MARGIN_LEFT}" y1="{ty:.1}" x2="{:.1}" y2="{ty:.1}" stroke="#e0e0e0"/><text x="{:.1}" y="{:.1}" text-anchor="end">{value:.2}</text>"##,
            WIDTH - MARGIN_RIGHT,
            MARGIN_LEFT - 8.0,
            ty + 4.0
        ));
    }

    // Date axis.
    for i in date_tick_indices(growth.len()) {
        let tx = x(i);
        let label = growth.dates()[i].format("%Y-%m-%d");
        svg.push_str(&format!(
            r##"<line x1="{tx:.1}" y1="{MARGIN_TOP}" x2="{tx:.1}" y2="{:.1}" stroke="#e0e0e0"/><text x="{tx:.1}" y="{:.1}" text-anchor="end" transform="rotate(-45 {tx:.1} {:.1})">{label}</text>"##,
            HEIGHT - MARGIN_BOTTOM,
            HEIGHT - MARGIN_BOTTOM + 16.0,
            HEIGHT - MARGIN_BOTTOM + 16.0
        ));
    }
    svg.push_str(&format!(
        r##"<rect x="{MARGIN_LEFT}" y="{MARGIN_TOP}" width="{plot_w}" height="{plot_h}" fill="none" stroke="#999"/><text x="{}" y="{}" text-anchor="middle">Date</text><text x="18" y="{}" text-anchor="middle" transform="rotate(-90 18 {})">Portfolio Value ($)</text>"##,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 8.0,
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0
    ));

    for (id, points) in &series {
        if points.is_empty() {
            continue;
        }
        let coords: Vec<String> = points
            .iter()
            .map(|(i, v)| format!("{:.1},{:.1}", x(*i), y(*v)))
            .collect();
        svg.push_str(&format!(
            r#"<polyline fill="none" stroke="{}" stroke-width="1.5" points="{}"/>"#,
            COLORS[id.index()],
            coords.join(" ")
        ));
    }

    // Legend in the upper left corner of the plot area.
    for (row, id) in PortfolioId::ALL.iter().enumerate() {
        let ly = MARGIN_TOP + 16.0 + row as f64 * 18.0;
        let lx = MARGIN_LEFT + 12.0;
        svg.push_str(&format!(
            r#"<line x1="{lx}" y1="{ly}" x2="{}" y2="{ly}" stroke="{}" stroke-width="2"/><text x="{}" y="{}">{}</text>"#,
            lx + 24.0,
            COLORS[id.index()],
            lx + 30.0,
            ly + 4.0,
            id.name()
        ));
    }

    svg.push_str("</svg>");
    Some(svg)
}

/// Evenly spaced row indices for date labels: every row when there are few,
/// otherwise between 5 and 12 ticks including both ends.
pub fn date_tick_indices(len: usize) -> Vec<usize> {
    if len <= MIN_DATE_TICKS {
        return (0..len).collect();
    }
    let ticks = len.min(MAX_DATE_TICKS);
    let last = len - 1;
    let mut indices: Vec<usize> = (0..ticks).map(|t| t * last / (ticks - 1)).collect();
    indices.dedup();
    indices
}
