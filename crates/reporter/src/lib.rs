//! # Spreadlab Reporter
//!
//! Renders an [`AnalysisOutcome`] into the artifacts a run leaves behind:
//!
//! - a cumulative growth CSV, one row per analysed date;
//! - flat CSVs of the extreme days and the drawdown/peer table;
//! - a pretty-printed JSON document with the same metrics;
//! - an SVG line chart of the five growth curves;
//! - a console summary built with `comfy-table`.
//!
//! File failures are reported per artifact. One artifact failing to write
//! never prevents the others from being produced.

pub mod console;
pub mod csv_writer;
pub mod error;
pub mod format;
pub mod json;
pub mod plot;

pub use console::render_summary;
pub use error::ReporterError;
pub use json::JsonReport;

use analytics::{AnalysisOutcome, CumulativeGrowth, PerformanceReport};
use configuration::OutputSettings;
use rust_decimal::Decimal;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// What [`Reporter::emit_all`] managed to produce.
#[derive(Debug, Default)]
pub struct EmitSummary {
    pub written: Vec<PathBuf>,
    pub failures: usize,
}

/// Writes report artifacts into the configured output directory.
#[derive(Debug, Clone)]
pub struct Reporter {
    output: OutputSettings,
}

impl Reporter {
    pub fn new(output: OutputSettings) -> Self {
        Self { output }
    }

    fn create(&self, file_name: &str) -> Result<(PathBuf, BufWriter<File>), ReporterError> {
        let path = self.output.resolve(file_name);
        let io_err = |source| ReporterError::Io {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.output.directory).map_err(io_err)?;
        let file = File::create(&path).map_err(io_err)?;
        Ok((path, BufWriter::new(file)))
    }

    pub fn write_growth_csv(&self, growth: &CumulativeGrowth) -> Result<PathBuf, ReporterError> {
        let (path, out) = self.create(&self.output.growth_csv)?;
        csv_writer::write_growth(out, growth).map_err(|source| ReporterError::Csv {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    pub fn write_extreme_days_csv(&self, report: &PerformanceReport) -> Result<PathBuf, ReporterError> {
        let (path, out) = self.create(&self.output.extreme_days_csv)?;
        csv_writer::write_extreme_days(out, report).map_err(|source| ReporterError::Csv {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    pub fn write_drawdowns_csv(&self, report: &PerformanceReport) -> Result<PathBuf, ReporterError> {
        let (path, out) = self.create(&self.output.drawdowns_csv)?;
        csv_writer::write_drawdowns(out, report).map_err(|source| ReporterError::Csv {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    pub fn write_json(&self, outcome: &AnalysisOutcome) -> Result<PathBuf, ReporterError> {
        let document = JsonReport::from_outcome(outcome).to_pretty_string()?;
        let path = self.output.resolve(&self.output.report_json);
        write_text(&self.output.directory, &path, &document)?;
        Ok(path)
    }

    /// Writes the growth chart. An empty table yields [`ReporterError::NoData`]
    /// and no file.
    pub fn write_plot(
        &self,
        growth: &CumulativeGrowth,
        initial_investment: Decimal,
    ) -> Result<PathBuf, ReporterError> {
        let svg = plot::render_growth_chart(growth, initial_investment)
            .ok_or_else(|| ReporterError::NoData("the growth table has no values to plot".to_string()))?;
        let path = self.output.resolve(&self.output.plot_svg);
        write_text(&self.output.directory, &path, &svg)?;
        Ok(path)
    }

    /// Writes every artifact, logging each failure and carrying on.
    pub fn emit_all(&self, outcome: &AnalysisOutcome, with_plot: bool) -> EmitSummary {
        let mut summary = EmitSummary::default();

        let mut results = vec![
            ("growth CSV", self.write_growth_csv(&outcome.growth)),
            ("extreme days CSV", self.write_extreme_days_csv(&outcome.performance)),
            ("drawdowns CSV", self.write_drawdowns_csv(&outcome.performance)),
            ("JSON report", self.write_json(outcome)),
        ];
        if with_plot {
            results.push((
                "growth chart",
                self.write_plot(&outcome.growth, outcome.initial_investment),
            ));
        }

        for (artifact, result) in results {
            match result {
                Ok(path) => {
                    tracing::info!(artifact, path = %path.display(), "Report written.");
                    summary.written.push(path);
                }
                Err(ReporterError::NoData(reason)) => {
                    tracing::warn!(artifact, %reason, "Skipped report.");
                }
                Err(e) => {
                    tracing::error!(artifact, error = %e, "Failed to write report.");
                    summary.failures += 1;
                }
            }
        }

        summary
    }
}

fn write_text(directory: &Path, path: &Path, contents: &str) -> Result<(), ReporterError> {
    let io_err = |source| ReporterError::Io {
        path: path.to_path_buf(),
        source,
    };
    fs::create_dir_all(directory).map_err(io_err)?;
    fs::write(path, contents).map_err(io_err)
}
