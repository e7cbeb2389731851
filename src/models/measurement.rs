//! Probe measurement data model

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

/// Outcome of a single timed resolution attempt
///
/// Fields are private so that the `success`/`error` pairing can only be
/// produced through [`Measurement::success`] and [`Measurement::failed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    domain: String,
    success: bool,
    duration_ms: f64,
    error: String,
    /// Resolved addresses, never written to the result file
    #[serde(skip)]
    addresses: Vec<IpAddr>,
}

impl Measurement {
    /// Create a successful measurement
    pub fn success(domain: impl Into<String>, elapsed: Duration, addresses: Vec<IpAddr>) -> Self {
        Self {
            domain: domain.into(),
            success: true,
            duration_ms: round_ms(elapsed),
            error: String::new(),
            addresses,
        }
    }

    /// Create a failed measurement
    pub fn failed(domain: impl Into<String>, elapsed: Duration, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "unknown resolution failure".to_string();
        }

        Self {
            domain: domain.into(),
            success: false,
            duration_ms: round_ms(elapsed),
            error,
            addresses: Vec::new(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Elapsed time in milliseconds, rounded to 2 decimals
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Failure description, empty on success
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn addresses(&self) -> &[IpAddr] {
        &self.addresses
    }
}

/// Convert an elapsed duration to milliseconds rounded to 2 decimal places
pub fn round_ms(elapsed: Duration) -> f64 {
    let ms = elapsed.as_secs_f64() * 1000.0;
    ((ms * 100.0).round() / 100.0).max(0.0)
}
