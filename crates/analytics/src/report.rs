use crate::growth::CumulativeGrowth;
use crate::portfolio::PortfolioReturns;
use chrono::NaiveDate;
use core_types::PortfolioId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// First and last entries of an ascending date index.
    pub fn of(dates: &[NaiveDate]) -> Option<Self> {
        Some(Self {
            start: *dates.first()?,
            end: *dates.last()?,
        })
    }
}

/// One day's change in a portfolio's value, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChange {
    pub date: NaiveDate,
    pub change_pct: Decimal,
}

/// The largest and smallest daily value changes of one portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremeDays {
    /// Largest changes first.
    pub best: Vec<DailyChange>,
    /// Smallest changes first.
    pub worst: Vec<DailyChange>,
}

/// The deepest peak-to-trough decline of one portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawdown {
    /// Always <= 0.
    pub max_drawdown_pct: Decimal,
    pub peak_date: NaiveDate,
    pub trough_date: NaiveDate,
}

/// How another portfolio did over a drawdown window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerPerformance {
    pub peer: PortfolioId,
    /// `None` when either endpoint is missing or the peer was worth zero at the peak.
    pub change_pct: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownRecord {
    pub portfolio: PortfolioId,
    /// `None` when the portfolio has no usable values.
    pub drawdown: Option<Drawdown>,
    /// Every other portfolio, in reporting order. Empty when `drawdown` is `None`.
    pub peers: Vec<PeerPerformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremeDayRecord {
    pub portfolio: PortfolioId,
    /// `None` when the portfolio has no finite daily changes.
    pub days: Option<ExtremeDays>,
}

/// Per-portfolio analytics, always in [`PortfolioId::ALL`] order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub extreme_days: Vec<ExtremeDayRecord>,
    pub drawdowns: Vec<DrawdownRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremeKind {
    Best,
    Worst,
}

/// A flattened extreme day, ready for delimited-text output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeDayRow {
    pub portfolio: PortfolioId,
    pub kind: ExtremeKind,
    /// 1-based position within its list.
    pub rank: usize,
    pub date: NaiveDate,
    pub change_pct: Decimal,
}

/// A flattened drawdown/peer pair, ready for delimited-text output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawdownRow {
    pub portfolio: PortfolioId,
    pub max_drawdown_pct: Option<Decimal>,
    pub peak_date: Option<NaiveDate>,
    pub trough_date: Option<NaiveDate>,
    pub peer: Option<PortfolioId>,
    pub peer_change_pct: Option<Decimal>,
}

impl PerformanceReport {
    pub fn drawdown(&self, id: PortfolioId) -> Option<&DrawdownRecord> {
        self.drawdowns.iter().find(|r| r.portfolio == id)
    }

    pub fn extremes(&self, id: PortfolioId) -> Option<&ExtremeDayRecord> {
        self.extreme_days.iter().find(|r| r.portfolio == id)
    }

    /// One row per reported day. Portfolios without data contribute no rows.
    pub fn extreme_day_rows(&self) -> Vec<ExtremeDayRow> {
        let mut rows = Vec::new();
        for record in &self.extreme_days {
            let Some(days) = &record.days else { continue };
            for (kind, list) in [(ExtremeKind::Best, &days.best), (ExtremeKind::Worst, &days.worst)] {
                rows.extend(list.iter().enumerate().map(|(i, day)| ExtremeDayRow {
                    portfolio: record.portfolio,
                    kind,
                    rank: i + 1,
                    date: day.date,
                    change_pct: day.change_pct,
                }));
            }
        }
        rows
    }

    /// One row per (portfolio, peer) pair; a single row without a peer when
    /// the drawdown itself is not available.
    pub fn drawdown_rows(&self) -> Vec<DrawdownRow> {
        let mut rows = Vec::new();
        for record in &self.drawdowns {
            let base = DrawdownRow {
                portfolio: record.portfolio,
                max_drawdown_pct: record.drawdown.map(|d| d.max_drawdown_pct),
                peak_date: record.drawdown.map(|d| d.peak_date),
                trough_date: record.drawdown.map(|d| d.trough_date),
                peer: None,
                peer_change_pct: None,
            };
            if record.peers.is_empty() {
                rows.push(base);
                continue;
            }
            rows.extend(record.peers.iter().map(|p| DrawdownRow {
                peer: Some(p.peer),
                peer_change_pct: p.change_pct,
                ..base.clone()
            }));
        }
        rows
    }
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    /// Dates shared by all three assets, before the start-date filter.
    pub common_range: DateRange,
    /// Dates actually analysed.
    pub analysis_range: DateRange,
    pub initial_investment: Decimal,
    pub returns: PortfolioReturns,
    pub growth: CumulativeGrowth,
    pub performance: PerformanceReport,
}
