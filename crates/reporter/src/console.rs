use crate::format::{NOT_AVAILABLE, fixed, optional};
use analytics::{AnalysisOutcome, CumulativeGrowth, ExtremeDayRecord, PerformanceReport, resample_weekly};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use core_types::PortfolioId;

fn new_table(header: Vec<String>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Week-ending values of every portfolio, forward-filled across empty weeks.
pub fn weekly_growth_table(growth: &CumulativeGrowth) -> Table {
    let weekly = resample_weekly(growth);

    let mut header = vec!["Week ending".to_string()];
    header.extend(PortfolioId::ALL.iter().map(|id| id.name().to_string()));
    let mut table = new_table(header);

    for (row, week) in weekly.dates().iter().enumerate() {
        let mut cells = vec![Cell::new(week.format("%Y-%m-%d"))];
        cells.extend(weekly.columns().map(|(_, column)| right(optional(column[row], 2))));
        table.add_row(cells);
    }
    table
}

/// Best and worst days of one portfolio side by side.
pub fn extreme_days_table(record: &ExtremeDayRecord) -> Table {
    let mut table = new_table(vec![
        "#".to_string(),
        "Best day".to_string(),
        "Change %".to_string(),
        "Worst day".to_string(),
        "Change %".to_string(),
    ]);

    let Some(days) = &record.days else {
        table.add_row(vec![Cell::new("-"), Cell::new(NOT_AVAILABLE)]);
        return table;
    };

    for i in 0..days.best.len().max(days.worst.len()) {
        let (best_date, best_pct) = days
            .best
            .get(i)
            .map(|d| (d.date.to_string(), fixed(d.change_pct, 2)))
            .unwrap_or_default();
        let (worst_date, worst_pct) = days
            .worst
            .get(i)
            .map(|d| (d.date.to_string(), fixed(d.change_pct, 2)))
            .unwrap_or_default();
        table.add_row(vec![
            right((i + 1).to_string()),
            Cell::new(best_date),
            right(best_pct),
            Cell::new(worst_date),
            right(worst_pct),
        ]);
    }
    table
}

/// Maximum drawdown of every portfolio, and how each peer did over that window.
pub fn drawdown_table(report: &PerformanceReport) -> Table {
    let mut header = vec![
        "Portfolio".to_string(),
        "Max DD %".to_string(),
        "Peak".to_string(),
        "Trough".to_string(),
    ];
    header.extend(PortfolioId::ALL.iter().map(|id| format!("{} %", id.name())));
    let mut table = new_table(header);

    for record in &report.drawdowns {
        let mut cells = vec![Cell::new(record.portfolio.name())];
        match record.drawdown {
            Some(dd) => {
                cells.push(right(fixed(dd.max_drawdown_pct, 2)));
                cells.push(Cell::new(dd.peak_date));
                cells.push(Cell::new(dd.trough_date));
            }
            None => {
                cells.extend([NOT_AVAILABLE; 3].map(Cell::new));
            }
        }
        for peer in PortfolioId::ALL {
            let text = if peer == record.portfolio {
                "-".to_string()
            } else {
                let change = record
                    .peers
                    .iter()
                    .find(|p| p.peer == peer)
                    .and_then(|p| p.change_pct);
                optional(change, 2)
            };
            cells.push(right(text));
        }
        table.add_row(cells);
    }
    table
}

/// The full console narrative for one run.
pub fn render_summary(outcome: &AnalysisOutcome) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Common data available from {} to {}\nAnalyzing data from {} to {}\n\n",
        outcome.common_range.start,
        outcome.common_range.end,
        outcome.analysis_range.start,
        outcome.analysis_range.end,
    ));

    out.push_str(&format!(
        "--- Weekly Growth of {} Initial Investment ---\n{}\n\n",
        fixed(outcome.initial_investment, 2),
        weekly_growth_table(&outcome.growth)
    ));

    for record in &outcome.performance.extreme_days {
        out.push_str(&format!(
            "--- Extreme Performing Days for {} ---\n{}\n\n",
            record.portfolio.name(),
            extreme_days_table(record)
        ));
    }

    out.push_str(&format!(
        "--- Maximum Drawdown and Peer Performance ---\n{}\n",
        drawdown_table(&outcome.performance)
    ));

    out
}
