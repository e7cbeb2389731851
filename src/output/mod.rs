//! Output stages: console progress, result recording and chart rendering

pub mod chart;
pub mod recorder;

pub use self::chart::{select_renderer, ChartRenderer, NoopChartRenderer};
#[cfg(feature = "chart")]
pub use self::chart::BitmapChartRenderer;
pub use self::recorder::{CsvRecorder, CSV_HEADER};

use crate::models::Measurement;
use colored::Colorize;
use std::path::Path;

/// Width the domain column is padded to; longer names overflow it
pub const DOMAIN_COLUMN_WIDTH: usize = 35;

/// Formats console lines for a run
#[derive(Debug, Clone, Copy)]
pub struct ConsoleFormatter {
    enable_color: bool,
}

impl ConsoleFormatter {
    pub fn new(enable_color: bool) -> Self {
        Self { enable_color }
    }

    /// Banner printed before probing
    pub fn header(&self, resolver_name: &str) -> String {
        let title = "DNS Impact on Application Behavior (CSV + Plot)";
        let title = if self.enable_color {
            title.bold().to_string()
        } else {
            title.to_string()
        };
        format!("\n{}\nResolver: {}\n", title, resolver_name)
    }

    /// One progress row per completed probe
    pub fn probe_row(&self, measurement: &Measurement) -> String {
        let flag = format!("success={}", measurement.is_success());
        let flag = if !self.enable_color {
            flag
        } else if measurement.is_success() {
            flag.green().to_string()
        } else {
            flag.red().to_string()
        };

        format!(
            "{:<width$} -> {:>7.2} ms | {}",
            measurement.domain(),
            measurement.duration_ms(),
            flag,
            width = DOMAIN_COLUMN_WIDTH
        )
    }

    /// Resolved addresses for verbose output
    pub fn address_line(&self, measurement: &Measurement) -> Option<String> {
        if measurement.addresses().is_empty() {
            return None;
        }

        let list: Vec<String> = measurement.addresses().iter().map(|ip| ip.to_string()).collect();
        Some(format!("    addresses: {}", list.join(", ")))
    }

    /// Line printed when the deliberately bad domain fails
    pub fn error_line(&self, measurement: &Measurement) -> String {
        let line = format!("Error: {}", measurement.error());
        if self.enable_color {
            line.yellow().to_string()
        } else {
            line
        }
    }

    pub fn csv_saved(&self, path: &Path) -> String {
        format!("\n[CSV] Saved: {}", path.display())
    }

    pub fn chart_saved(&self, path: &Path) -> String {
        format!("[Plot] Saved: {}", path.display())
    }

    /// Closing tally of the run
    pub fn summary(&self, total: usize, succeeded: usize) -> String {
        format!(
            "\n{} probed, {} succeeded, {} failed",
            total,
            succeeded,
            total - succeeded
        )
    }
}
