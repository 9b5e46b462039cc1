//! End-to-end fetch pipeline tests
//!
//! Drives the mock provider through the factory, pipeline, and CSV store,
//! then checks the persisted output against the canonical format.

use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use kline_manager::forecast::{ForecastParams, ForecastSession, MockPredictor};
use kline_manager::provider::mock::MockProvider;
use kline_manager::storage::read_daily_csv;
use kline_manager::{
    ColumnMap, CsvStore, DailyRequest, FetchPipeline, PipelineError, ProviderError,
    ProviderFactory, Settings,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("kline_e2e_{}_{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[tokio::test]
async fn fetch_via_factory_writes_canonical_csv() {
    let dir = temp_dir("factory");

    let factory = ProviderFactory::new(&Settings::default_settings());
    let (provider, mapping) = factory.create("mock").unwrap();
    let pipeline = FetchPipeline::new(provider, mapping, CsvStore::new(&dir));

    let request = DailyRequest::new("MOCK1", date("2024-01-01"), date("2024-01-12"));
    let outcome = pipeline.run(&request).await.unwrap();

    assert_eq!(
        outcome.path.file_name().unwrap().to_str().unwrap(),
        "MOCK1_daily_20240101_20240112.csv"
    );

    let content = fs::read_to_string(&outcome.path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "timestamps,open,high,low,close,volume,amount");
    // 10 weekdays in the range, plus the header
    assert_eq!(lines.len(), 11);

    // Every data row carries a midnight timestamp and 2-digit numerics
    for line in &lines[1..] {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 7);
        assert!(fields[0].ends_with(" 00:00:00"));
        for field in &fields[1..] {
            let (_, frac) = field.split_once('.').expect("fixed 2-digit scale");
            assert_eq!(frac.len(), 2);
        }
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn defective_feed_normalizes_clean() {
    let dir = temp_dir("defective");

    // Reversed order plus nulls every third close: the output must still be
    // ascending, gap-free, and readable back as written
    let mut provider = MockProvider::new();
    provider.reverse_order = true;
    provider.null_close_every = Some(3);
    provider.duplicate_last_day = true;
    let pipeline = FetchPipeline::new(
        Box::new(provider),
        ColumnMap::mock(),
        CsvStore::new(&dir),
    );

    let request = DailyRequest::new("MOCK2", date("2024-01-01"), date("2024-01-12"));
    let outcome = pipeline.run(&request).await.unwrap();

    assert!(outcome
        .records
        .windows(2)
        .all(|w| w[0].timestamp < w[1].timestamp));

    let read = read_daily_csv(&outcome.path).unwrap();
    assert_eq!(read, outcome.records);

    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn unavailable_data_leaves_no_file() {
    let dir = temp_dir("unavailable");

    let mut provider = MockProvider::new();
    provider.empty = true;
    let pipeline = FetchPipeline::new(
        Box::new(provider),
        ColumnMap::mock(),
        CsvStore::new(&dir),
    );

    let request = DailyRequest::new("MOCK3", date("2024-01-01"), date("2024-01-12"));
    let err = pipeline.run(&request).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Provider(ProviderError::DataUnavailable(_))
    ));
    assert!(!dir.exists());
}

#[tokio::test]
async fn fetched_csv_feeds_a_forecast() {
    let dir = temp_dir("forecast");

    let factory = ProviderFactory::new(&Settings::default_settings());
    let (provider, mapping) = factory.create("mock").unwrap();
    let pipeline = FetchPipeline::new(provider, mapping, CsvStore::new(&dir));

    let request = DailyRequest::new("MOCK4", date("2024-01-01"), date("2024-02-29"));
    let outcome = pipeline.run(&request).await.unwrap();

    let history = read_daily_csv(&outcome.path).unwrap();
    let session = ForecastSession::new(
        Box::new(MockPredictor::new()),
        ForecastParams {
            lookback: 20,
            horizon: 5,
            ..ForecastParams::default()
        },
    );

    let forecast = session.run(&history).await.unwrap();
    assert_eq!(forecast.len(), 5);
    assert!(forecast[0].timestamp > history.last().unwrap().timestamp);

    let store = CsvStore::new(&dir);
    let path = store
        .write_forecast(
            "MOCK4",
            forecast.first().unwrap().timestamp,
            forecast.last().unwrap().timestamp,
            &forecast,
        )
        .unwrap();
    assert!(path
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("MOCK4_forecast_"));

    fs::remove_dir_all(&dir).unwrap();
}
