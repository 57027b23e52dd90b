use crate::alignment::align_returns;
use crate::error::AnalyticsError;
use crate::growth::GrowthEngine;
use crate::performance::analyze_performance;
use crate::portfolio::calculate_portfolio_returns;
use crate::report::AnalysisOutcome;
use configuration::AnalysisSettings;
use core_types::{AssetId, ReturnSeries, ReturnSource};

/// A stateless driver for one analysis run.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point: loads the three assets and analyses them.
    ///
    /// Every asset is requested before anything else happens. If any of them
    /// fails to load, the run stops with the first failure and no portfolio
    /// is computed.
    pub fn run<S: ReturnSource>(
        &self,
        source: &S,
        settings: &AnalysisSettings,
    ) -> Result<AnalysisOutcome, AnalyticsError> {
        let loaded = AssetId::ALL.map(|asset| {
            source.load(asset).map_err(|e| {
                tracing::error!(asset = %asset, error = %e, "Failed to load return series.");
                AnalyticsError::Load {
                    asset,
                    source: Box::new(e),
                }
            })
        });

        let [qqq, spy, iwm] = loaded;
        let (qqq, spy, iwm) = (qqq?, spy?, iwm?);
        for series in [&qqq, &spy, &iwm] {
            if let Some((first, last)) = series.date_range() {
                tracing::info!(
                    asset = %series.asset(),
                    rows = series.len(),
                    %first,
                    %last,
                    "Loaded return series."
                );
            }
        }

        self.analyze(&qqq, &spy, &iwm, settings)
    }

    /// Runs alignment, portfolio construction, growth and analytics on
    /// already-loaded series.
    pub fn analyze(
        &self,
        qqq: &ReturnSeries,
        spy: &ReturnSeries,
        iwm: &ReturnSeries,
        settings: &AnalysisSettings,
    ) -> Result<AnalysisOutcome, AnalyticsError> {
        let aligned = align_returns(qqq, spy, iwm)?;
        let common_range = aligned.date_range().ok_or(AnalyticsError::NoCommonDates)?;
        tracing::info!(
            start = %common_range.start,
            end = %common_range.end,
            rows = aligned.len(),
            "Common data available."
        );

        let filtered = aligned.since(settings.start_date)?;
        let analysis_range = filtered
            .date_range()
            .ok_or(AnalyticsError::NoDataAfterStart {
                start_date: settings.start_date,
            })?;
        tracing::info!(
            start = %analysis_range.start,
            end = %analysis_range.end,
            rows = filtered.len(),
            requested_start = %settings.start_date,
            "Analysing data."
        );

        let returns = calculate_portfolio_returns(&filtered);
        let growth_engine = GrowthEngine::new(settings.initial_investment, settings.leverage);
        let growth = growth_engine.cumulative_growth(&returns);
        let performance = analyze_performance(
            &growth,
            growth_engine.initial_investment(),
            settings.extreme_day_count,
        );

        Ok(AnalysisOutcome {
            common_range,
            analysis_range,
            initial_investment: growth_engine.initial_investment(),
            returns,
            growth,
            performance,
        })
    }
}
