use chrono::NaiveDate;
use core_types::AssetId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisSettings,
    pub data: DataSources,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

/// Parameters of a single analysis run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Only dates on or after this day are analysed.
    pub start_date: NaiveDate,
    /// The amount every portfolio starts with, in currency units.
    pub initial_investment: Decimal,
    /// Leverage applied to the running spread sum of the long/short portfolios.
    pub leverage: Decimal,
    /// How many best and worst days are reported per portfolio.
    pub extreme_day_count: usize,
}

/// Where the per-asset price histories live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSources {
    pub qqq: PathBuf,
    pub spy: PathBuf,
    pub iwm: PathBuf,
}

/// File names of every emitted artifact, relative to `directory`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub growth_csv: String,
    pub extreme_days_csv: String,
    pub drawdowns_csv: String,
    pub report_json: String,
    pub plot_svg: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

/// Values supplied on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct CliOverrides {
    /// Analysis start date (format: YYYY-MM-DD).
    #[cfg_attr(feature = "clap", arg(long))]
    pub start_date: Option<NaiveDate>,

    /// Initial investment per portfolio.
    #[cfg_attr(feature = "clap", arg(long))]
    pub initial_investment: Option<Decimal>,

    /// Leverage factor for the spread portfolios.
    #[cfg_attr(feature = "clap", arg(long))]
    pub leverage: Option<Decimal>,

    /// Directory the reports and chart are written to.
    #[cfg_attr(feature = "clap", arg(long = "output-dir"))]
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Applies command-line overrides on top of the loaded values.
    pub fn apply_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(start_date) = overrides.start_date {
            self.analysis.start_date = start_date;
        }
        if let Some(initial_investment) = overrides.initial_investment {
            self.analysis.initial_investment = initial_investment;
        }
        if let Some(leverage) = overrides.leverage {
            self.analysis.leverage = leverage;
        }
        if let Some(dir) = &overrides.output_dir {
            self.output.directory = dir.clone();
        }
    }

    /// Rejects settings the analytics cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.initial_investment <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "initial_investment must be positive, got {}",
                self.analysis.initial_investment
            )));
        }
        if self.analysis.leverage <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "leverage must be positive, got {}",
                self.analysis.leverage
            )));
        }
        if self.analysis.extreme_day_count == 0 {
            return Err(ConfigError::ValidationError(
                "extreme_day_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl DataSources {
    pub fn path_for(&self, asset: AssetId) -> &Path {
        match asset {
            AssetId::Qqq => &self.qqq,
            AssetId::Spy => &self.spy,
            AssetId::Iwm => &self.iwm,
        }
    }
}

impl OutputSettings {
    /// Joins an artifact file name onto the output directory.
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.directory.join(file_name)
    }
}

// --- Default Implementations ---
// These mirror the values the tool has always run with, so a missing
// config file still produces the standard analysis.

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap_or_default(),
            initial_investment: dec!(100),
            leverage: dec!(2),
            extreme_day_count: 7,
        }
    }
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            qqq: PathBuf::from("QQQ ETF Stock Price History.csv"),
            spy: PathBuf::from("SPY ETF Stock Price History.csv"),
            iwm: PathBuf::from("IWM ETF Stock Price History.csv"),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            growth_csv: "daily_cumulative_portfolio_growth.csv".to_string(),
            extreme_days_csv: "extreme_days.csv".to_string(),
            drawdowns_csv: "drawdowns.csv".to_string(),
            report_json: "portfolio_report.json".to_string(),
            plot_svg: "daily_portfolio_cumulative_growth.svg".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
