//! CSV result recorder

use crate::{
    error::{AppError, Result},
    models::Measurement,
};
use chrono::Local;
use serde::Serialize;
use std::{fs::File, io::Write, path::Path};

/// Column order of the result file
pub const CSV_HEADER: [&str; 5] = ["timestamp", "domain", "success", "duration_ms", "error"];

/// Capture timestamp format: ISO-8601 local time, second precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One serialized row, field order matches [`CSV_HEADER`]
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    timestamp: String,
    domain: &'a str,
    success: bool,
    duration_ms: String,
    error: &'a str,
}

impl<'a> CsvRow<'a> {
    fn new(measurement: &'a Measurement, timestamp: String) -> Self {
        Self {
            timestamp,
            domain: measurement.domain(),
            success: measurement.is_success(),
            duration_ms: format!("{:.2}", measurement.duration_ms()),
            error: measurement.error(),
        }
    }
}

/// Writes measurements as CSV, replacing any previous file
pub struct CsvRecorder<F = fn() -> String> {
    clock: F,
}

impl CsvRecorder {
    /// Recorder stamping rows with the local wall clock
    pub fn new() -> Self {
        Self { clock: local_timestamp }
    }
}

impl Default for CsvRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> CsvRecorder<F>
where
    F: Fn() -> String,
{
    /// Recorder with a custom timestamp source
    pub fn with_clock(clock: F) -> Self {
        Self { clock }
    }

    /// Write all measurements to `destination`, truncating an existing file
    pub fn record(&self, measurements: &[Measurement], destination: &Path) -> Result<()> {
        let file = File::create(destination).map_err(|e| {
            AppError::io(format!("Failed to create {}: {}", destination.display(), e))
        })?;

        self.write_to(measurements, file)?;
        Ok(())
    }

    /// Serialize measurements to any writer
    pub fn write_to<W: Write>(&self, measurements: &[Measurement], writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if measurements.is_empty() {
            csv_writer.write_record(CSV_HEADER)?;
        }

        for measurement in measurements {
            csv_writer.serialize(CsvRow::new(measurement, (self.clock)()))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

fn local_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
