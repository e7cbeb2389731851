//! Pipeline integration tests driven through the library API
//!
//! A fake resolver stands in for the network so that every property can be
//! checked deterministically.

use async_trait::async_trait;
use dns_impact::{
    dns::Resolver,
    models::round_ms,
    output::{CsvRecorder, NoopChartRenderer, CSV_HEADER},
    App, AppError, ChartOutcome, Config, Prober, Result,
};
use proptest::prelude::*;
use std::{net::IpAddr, sync::Arc, time::Duration};
use tempfile::TempDir;

/// Resolves any name except those under `.invalid`
struct FakeResolver;

#[async_trait]
impl Resolver for FakeResolver {
    async fn lookup(&self, domain: &str) -> Result<Vec<IpAddr>> {
        if domain.ends_with(".invalid") {
            Err(AppError::dns_resolution("host not found"))
        } else {
            Ok(vec!["198.51.100.7".parse().unwrap()])
        }
    }

    fn name(&self) -> String {
        "fake".to_string()
    }
}

fn config_in(dir: &TempDir, domains: Vec<String>) -> Config {
    Config {
        domains,
        bad_domain: "nonexistent.invalid".to_string(),
        csv_path: dir.path().join("dns_results.csv"),
        chart_path: dir.path().join("dns_times.png"),
        enable_chart: false,
        enable_color: false,
        ..Config::default()
    }
}

fn run_pipeline(config: Config) -> dns_impact::RunSummary {
    let prober = Prober::new(Arc::new(FakeResolver), Duration::from_secs(3));
    let app = App::with_components(config, prober, Box::new(NoopChartRenderer::new("charts disabled")));

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(app.run())
        .unwrap()
}

fn read_rows(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (header, rows)
}

#[test]
fn test_default_domain_list_produces_one_row_per_probe_plus_header() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, Config::default().domains);
    let expected = config.domains.len() + 1;

    let summary = run_pipeline(config.clone());

    assert_eq!(summary.total(), expected);
    assert_eq!(summary.chart, ChartOutcome::Skipped);
    assert!(!config.chart_path.exists());

    let text = std::fs::read_to_string(&config.csv_path).unwrap();
    assert_eq!(text.lines().count(), expected + 1);

    let (header, rows) = read_rows(&config.csv_path);
    assert_eq!(header, CSV_HEADER);
    let domains: Vec<&str> = rows.iter().map(|r| r[1].as_str()).collect();
    assert_eq!(domains, ["google.com", "github.com", "example.com", "nonexistent.invalid"]);
    assert_eq!(rows[3][2], "false");
    assert!(!rows[3][4].is_empty());
}

#[test]
fn test_bad_domain_failure_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let summary = run_pipeline(config_in(&dir, vec!["a.example".to_string()]));

    let bad = summary.measurements.last().unwrap();
    assert!(!bad.is_success());
    assert!(bad.error().contains("host not found"));
    assert_eq!(summary.failed(), 1);
}

#[test]
fn test_recorder_round_trips_through_csv_reader() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rows.csv");
    let prober = Prober::new(Arc::new(FakeResolver), Duration::from_secs(3));

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let measurements = runtime.block_on(async {
        vec![
            prober.measure("ok.example").await,
            prober.measure("gone.invalid").await,
        ]
    });

    CsvRecorder::new().record(&measurements, &path).unwrap();
    let (_, rows) = read_rows(&path);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][2], "true");
    assert_eq!(rows[0][4], "");
    assert_eq!(rows[1][2], "false");
    assert_eq!(rows[1][4], "host not found");
}

proptest! {
    #[test]
    fn prop_round_ms_is_non_negative_with_two_decimals(nanos in 0u64..10_000_000_000u64) {
        let ms = round_ms(Duration::from_nanos(nanos));

        prop_assert!(ms >= 0.0);
        let formatted = format!("{:.2}", ms);
        prop_assert_eq!(formatted.parse::<f64>().unwrap(), ms);
    }

    #[test]
    fn prop_rows_match_probes_and_error_iff_failure(
        names in prop::collection::vec("[a-z]{1,12}\\.(example|invalid)", 1..6)
    ) {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, names.clone());
        let summary = run_pipeline(config.clone());

        let (_, rows) = read_rows(&config.csv_path);
        prop_assert_eq!(rows.len(), names.len() + 1);

        for (row, m) in rows.iter().zip(&summary.measurements) {
            prop_assert_eq!(&row[1], m.domain());
            prop_assert_eq!(row[2] == "false", !row[4].is_empty());
            prop_assert!(row[3].split('.').nth(1).map(|d| d.len()) == Some(2));
            prop_assert!(row[3].parse::<f64>().unwrap() >= 0.0);
        }
    }
}
