//! # Spreadlab Analytics Engine
//!
//! This crate turns three per-asset daily return histories (QQQ, SPY, IWM)
//! into five portfolio value curves and the statistics reported on them.
//!
//! ## Pipeline
//!
//! 1. **Alignment:** inner-join the three series on date and keep the dates on
//!    or after the configured start date.
//! 2. **Portfolio returns:** fixed row-wise formulas (two spreads against IWM,
//!    three long positions).
//! 3. **Growth:** compounding for the long portfolios, a leveraged running-sum
//!    model floored at zero for the spreads.
//! 4. **Performance:** best/worst days of each value curve, and its maximum
//!    drawdown together with how every other portfolio fared over that window.
//!
//! Every stage is a pure function that returns a new table. Missing or
//! non-finite values are carried as `None` and reported as not available.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: runs the whole pipeline against a `ReturnSource`.
//! - `AnalysisOutcome`: the tables and the `PerformanceReport` of one run.
//! - `AnalyticsError`: the fatal conditions that stop a run.

// Declare the modules that constitute this crate.
pub mod alignment;
pub mod engine;
pub mod error;
pub mod growth;
pub mod performance;
pub mod portfolio;
pub mod report;
pub mod resample;

// Re-export the key components to create a clean, public-facing API.
pub use alignment::{AlignedReturns, align_returns};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use growth::{CumulativeGrowth, GrowthEngine};
pub use portfolio::{PortfolioReturns, PortfolioTable, calculate_portfolio_returns};
pub use report::{
    AnalysisOutcome, DailyChange, DateRange, Drawdown, DrawdownRecord, DrawdownRow,
    ExtremeDayRecord, ExtremeDayRow, ExtremeDays, ExtremeKind, PeerPerformance,
    PerformanceReport,
};
pub use resample::resample_weekly;
