//! DNS Impact Probe
//!
//! Measures how long name resolution takes for a small fixed set of domains,
//! including one that is guaranteed not to resolve, then records the results
//! as CSV and, when charting is available, as a bar chart.

pub mod app;
pub mod cli;
pub mod config;
pub mod dns;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod types;

// Re-export commonly used types
pub use app::{App, ChartOutcome, RunSummary};
pub use error::{AppError, Result};
pub use executor::Prober;
pub use models::{Config, Measurement};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_DOMAINS: &[&str] = &["google.com", "github.com", "example.com"];
    pub const DEFAULT_BAD_DOMAIN: &str = "nonexistentdomainforschoolproject123.com";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
    pub const MAX_TIMEOUT_SECS: u64 = 60;
    pub const DEFAULT_CSV_PATH: &str = "dns_results.csv";
    pub const DEFAULT_CHART_PATH: &str = "dns_times.png";
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
