use chrono::NaiveDate;
use core_types::{AssetId, ReturnSource};
use data_handler::{CsvReturnSource, LoaderError, load_return_series};
use rust_decimal_macros::dec;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn loads_investing_style_export_newest_first() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "QQQ ETF Stock Price History.csv",
        "\"Date\",\"Price\",\"Open\",\"High\",\"Low\",\"Vol.\",\"Change %\"\n\
         \"06/03/2021\",\"336.12\",\"335.00\",\"337.10\",\"334.20\",\"40.12M\",\"-0.85%\"\n\
         \"06/02/2021\",\"339.00\",\"338.10\",\"339.90\",\"337.50\",\"35.01M\",\"0.12%\"\n\
         \"06/01/2021\",\"338.60\",\"339.20\",\"340.00\",\"336.80\",\"38.77M\",\"1.00%\"\n",
    );

    let series = load_return_series(&path, AssetId::Qqq).unwrap();

    assert_eq!(series.asset(), AssetId::Qqq);
    assert_eq!(series.len(), 3);
    let points = series.points();
    assert_eq!(points[0].date, date(2021, 6, 1));
    assert_eq!(points[0].value, dec!(0.01));
    assert_eq!(points[1].value, dec!(0.0012));
    assert_eq!(points[2].date, date(2021, 6, 3));
    assert_eq!(points[2].value, dec!(-0.0085));
}

#[test]
fn missing_change_column_is_reported() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "spy.csv", "Date,Price\n2021-06-01,420.00\n");

    let err = load_return_series(&path, AssetId::Spy).unwrap_err();

    assert!(matches!(err, LoaderError::MissingColumn { ref column, .. } if column == "Change %"));
}

#[test]
fn malformed_percentage_names_the_line() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "iwm.csv",
        "Date,Change %\n2021-06-01,0.5%\n2021-06-02,abc%\n",
    );

    let err = load_return_series(&path, AssetId::Iwm).unwrap_err();

    match err {
        LoaderError::InvalidPercentage { line, value, .. } => {
            assert_eq!(line, 3);
            assert_eq!(value, "abc%");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_dates_are_rejected() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "qqq.csv",
        "Date,Change %\n2021-06-01,0.5%\n2021-06-01,0.7%\n",
    );

    let err = load_return_series(&path, AssetId::Qqq).unwrap_err();

    assert!(matches!(err, LoaderError::Series { .. }));
}

#[test]
fn header_only_file_is_empty() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "qqq.csv", "Date,Change %\n");

    assert!(matches!(
        load_return_series(&path, AssetId::Qqq),
        Err(LoaderError::Empty { .. })
    ));
}

#[test]
fn source_reports_missing_file_as_io_error() {
    let dir = tempdir().unwrap();
    let source = CsvReturnSource::new().with_file(AssetId::Spy, dir.path().join("absent.csv"));

    assert!(matches!(source.load(AssetId::Spy), Err(LoaderError::Io { .. })));
    assert!(matches!(source.load(AssetId::Qqq), Err(LoaderError::Io { .. })));
}

#[test]
fn source_loads_every_configured_asset() {
    let dir = tempdir().unwrap();
    for asset in AssetId::ALL {
        write_file(
            &dir,
            &format!("{}.csv", asset.ticker()),
            "Date,Change %\n2021-06-01,0.10%\n2021-06-02,-0.20%\n",
        );
    }

    let source = CsvReturnSource::from_paths(|asset| dir.path().join(format!("{}.csv", asset.ticker())));

    for asset in AssetId::ALL {
        let series = source.load(asset).unwrap();
        assert_eq!(series.asset(), asset);
        assert_eq!(series.len(), 2);
    }
}
