use analytics::{AnalyticsEngine, AnalyticsError};
use chrono::NaiveDate;
use configuration::AnalysisSettings;
use core_types::{AssetId, PortfolioId, ReturnPoint, ReturnSeries, ReturnSource};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("no fixture for {0}")]
struct MissingFixture(AssetId);

/// An in-memory source that records which assets were requested.
#[derive(Default)]
struct FixtureSource {
    series: HashMap<AssetId, ReturnSeries>,
    requested: RefCell<Vec<AssetId>>,
}

impl FixtureSource {
    fn with(mut self, asset: AssetId, start: NaiveDate, returns: &[Decimal]) -> Self {
        let points = start
            .iter_days()
            .zip(returns)
            .map(|(date, r)| ReturnPoint::new(date, *r))
            .collect();
        self.series.insert(asset, ReturnSeries::new(asset, points).unwrap());
        self
    }
}

impl ReturnSource for FixtureSource {
    type Error = MissingFixture;

    fn load(&self, asset: AssetId) -> Result<ReturnSeries, MissingFixture> {
        self.requested.borrow_mut().push(asset);
        self.series.get(&asset).cloned().ok_or(MissingFixture(asset))
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn settings(start_date: NaiveDate) -> AnalysisSettings {
    AnalysisSettings {
        start_date,
        ..AnalysisSettings::default()
    }
}

fn returns() -> [Decimal; 5] {
    [dec!(0.01), dec!(-0.02), dec!(0.03), dec!(-0.01), dec!(0.00)]
}

fn identical_assets(start: NaiveDate) -> FixtureSource {
    AssetId::ALL
        .into_iter()
        .fold(FixtureSource::default(), |source, asset| source.with(asset, start, &returns()))
}

#[test]
fn identical_assets_flatten_spreads_and_compound_longs() {
    let start = date(2022, 1, 3);
    let source = identical_assets(start);

    let outcome = AnalyticsEngine::new().run(&source, &settings(start)).unwrap();

    assert_eq!(outcome.growth.len(), 5);
    for id in [PortfolioId::P1, PortfolioId::P2] {
        assert!(outcome.growth.column(id).iter().all(|v| *v == Some(dec!(100))));
    }

    let expected = [
        dec!(101.00),
        dec!(98.98),
        dec!(101.9494),
        dec!(100.929906),
        dec!(100.929906),
    ];
    for id in [PortfolioId::P3, PortfolioId::P4, PortfolioId::P5] {
        let values: Vec<_> = outcome.growth.column(id).iter().map(|v| v.unwrap()).collect();
        assert_eq!(values, expected);
    }

    let p3 = outcome.performance.drawdown(PortfolioId::P3).unwrap();
    let dd = p3.drawdown.unwrap();
    assert_eq!(dd.peak_date, date(2022, 1, 3));
    assert_eq!(dd.trough_date, date(2022, 1, 4));
    assert_eq!(dd.max_drawdown_pct, dec!(-2));

    // The flat spread portfolios never draw down.
    let p1 = outcome.performance.drawdown(PortfolioId::P1).unwrap();
    assert_eq!(p1.drawdown.unwrap().max_drawdown_pct, Decimal::ZERO);
}

#[test]
fn start_date_filter_trims_leading_rows() {
    let start = date(2022, 1, 3);
    let source = identical_assets(start);

    let outcome = AnalyticsEngine::new()
        .run(&source, &settings(date(2022, 1, 5)))
        .unwrap();

    assert_eq!(outcome.common_range.start, date(2022, 1, 3));
    assert_eq!(outcome.analysis_range.start, date(2022, 1, 5));
    assert_eq!(outcome.analysis_range.end, date(2022, 1, 7));
    // Growth restarts from the initial investment on the first analysed day.
    assert_eq!(outcome.growth.column(PortfolioId::P4)[0], Some(dec!(103)));
}

#[test]
fn start_date_after_all_data_halts() {
    let start = date(2022, 1, 3);
    let source = identical_assets(start);

    let err = AnalyticsEngine::new()
        .run(&source, &settings(date(2023, 1, 1)))
        .unwrap_err();

    assert!(matches!(err, AnalyticsError::NoDataAfterStart { .. }));
    assert_eq!(err.to_string(), "No data available on or after the start date 2023-01-01.");
}

#[test]
fn failed_asset_load_halts_before_any_computation() {
    let start = date(2022, 1, 3);
    let source = FixtureSource::default()
        .with(AssetId::Qqq, start, &returns())
        .with(AssetId::Iwm, start, &returns());

    let result = AnalyticsEngine::new().run(&source, &settings(start));

    match result {
        Err(AnalyticsError::Load { asset, .. }) => assert_eq!(asset, AssetId::Spy),
        other => panic!("expected a load failure, got {other:?}"),
    }
    assert_eq!(*source.requested.borrow(), AssetId::ALL.to_vec());
}

#[test]
fn non_overlapping_assets_have_no_common_dates() {
    let source = FixtureSource::default()
        .with(AssetId::Qqq, date(2022, 1, 3), &returns())
        .with(AssetId::Spy, date(2022, 2, 1), &returns())
        .with(AssetId::Iwm, date(2022, 1, 3), &returns());

    let err = AnalyticsEngine::new()
        .run(&source, &settings(date(2021, 1, 1)))
        .unwrap_err();

    assert!(matches!(err, AnalyticsError::NoCommonDates));
}

#[test]
fn spread_portfolio_extremes_follow_value_not_formula() {
    let start = date(2022, 1, 3);
    let source = FixtureSource::default()
        .with(AssetId::Qqq, start, &[dec!(0.02), dec!(0.02)])
        .with(AssetId::Spy, start, &[dec!(0), dec!(0)])
        .with(AssetId::Iwm, start, &[dec!(0), dec!(0)]);

    let outcome = AnalyticsEngine::new().run(&source, &settings(start)).unwrap();

    // P1 values: 104, 108. The second day's value change is 108/104 - 1, not 2 * 2%.
    assert_eq!(
        outcome.growth.column(PortfolioId::P1),
        &[Some(dec!(104)), Some(dec!(108))]
    );
    let days = outcome
        .performance
        .extremes(PortfolioId::P1)
        .unwrap()
        .days
        .as_ref()
        .unwrap();
    assert_eq!(days.best[0].change_pct, dec!(4));
    assert_eq!(days.best[1].change_pct.round_dp(4), dec!(3.8462));
    assert_eq!(days.worst[0].date, date(2022, 1, 4));
}

#[test]
fn report_rows_cover_every_portfolio_in_order() {
    let start = date(2022, 1, 3);
    let source = identical_assets(start);

    let outcome = AnalyticsEngine::new().run(&source, &settings(start)).unwrap();

    let drawdown_rows = outcome.performance.drawdown_rows();
    assert_eq!(drawdown_rows.len(), 5 * 4);
    assert_eq!(drawdown_rows[0].portfolio, PortfolioId::P1);
    assert_eq!(drawdown_rows[19].portfolio, PortfolioId::P5);

    // Five data points: every portfolio lists all five days on both sides.
    let extreme_rows = outcome.performance.extreme_day_rows();
    assert_eq!(extreme_rows.len(), 5 * 2 * 5);
}

#[rstest]
#[case::fewer_than_available(2, 2)]
#[case::all_available(5, 5)]
#[case::more_than_available(7, 5)]
fn extreme_day_count_caps_each_side(#[case] count: usize, #[case] expected: usize) {
    let start = date(2022, 1, 3);
    let source = identical_assets(start);
    let settings = AnalysisSettings {
        start_date: start,
        initial_investment: dec!(1000),
        extreme_day_count: count,
        ..AnalysisSettings::default()
    };

    let outcome = AnalyticsEngine::new().run(&source, &settings).unwrap();

    assert_eq!(outcome.initial_investment, dec!(1000));
    assert_eq!(outcome.growth.column(PortfolioId::P3)[0], Some(dec!(1010)));
    for record in &outcome.performance.extreme_days {
        let days = record.days.as_ref().unwrap();
        assert_eq!(days.best.len(), expected);
        assert_eq!(days.worst.len(), expected);
    }
}
