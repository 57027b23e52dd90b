use analytics::{AnalysisOutcome, DailyChange, DateRange};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// The structured-document form of one run's analytics.
///
/// Unavailable metrics serialize as `null`.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub common_range: DateRange,
    pub analysis_range: DateRange,
    pub initial_investment: Decimal,
    pub final_values: BTreeMap<&'static str, Option<Decimal>>,
    pub drawdowns: Vec<JsonDrawdown>,
    pub extreme_days: Vec<JsonExtremeDays>,
}

#[derive(Debug, Serialize)]
pub struct JsonDrawdown {
    pub portfolio: &'static str,
    pub max_drawdown_pct: Option<Decimal>,
    pub peak_date: Option<NaiveDate>,
    pub trough_date: Option<NaiveDate>,
    /// Peer name -> percentage change over the drawdown window.
    pub peers: BTreeMap<&'static str, Option<Decimal>>,
}

#[derive(Debug, Serialize)]
pub struct JsonExtremeDays {
    pub portfolio: &'static str,
    pub best: Option<Vec<DailyChange>>,
    pub worst: Option<Vec<DailyChange>>,
}

impl JsonReport {
    pub fn from_outcome(outcome: &AnalysisOutcome) -> Self {
        let final_values = outcome
            .growth
            .columns()
            .map(|(id, column)| (id.name(), column.last().copied().flatten()))
            .collect();

        let drawdowns = outcome
            .performance
            .drawdowns
            .iter()
            .map(|record| JsonDrawdown {
                portfolio: record.portfolio.name(),
                max_drawdown_pct: record.drawdown.map(|d| d.max_drawdown_pct),
                peak_date: record.drawdown.map(|d| d.peak_date),
                trough_date: record.drawdown.map(|d| d.trough_date),
                peers: record
                    .peers
                    .iter()
                    .map(|p| (p.peer.name(), p.change_pct))
                    .collect(),
            })
            .collect();

        let extreme_days = outcome
            .performance
            .extreme_days
            .iter()
            .map(|record| JsonExtremeDays {
                portfolio: record.portfolio.name(),
                best: record.days.as_ref().map(|d| d.best.clone()),
                worst: record.days.as_ref().map(|d| d.worst.clone()),
            })
            .collect();

        Self {
            common_range: outcome.common_range,
            analysis_range: outcome.analysis_range,
            initial_investment: outcome.initial_investment,
            final_values,
            drawdowns,
            extreme_days,
        }
    }

    pub fn to_pretty_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
