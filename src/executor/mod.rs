//! Sequential probe execution
//!
//! Each domain gets exactly one timed lookup. Probes never overlap: the next
//! lookup starts only after the previous one has produced its measurement.

use crate::{
    dns::Resolver,
    error::{AppError, Result},
    models::Measurement,
};
use std::{
    net::IpAddr,
    sync::Arc,
    time::{Duration, Instant},
};

/// Runs timed lookups against a resolver
pub struct Prober {
    resolver: Arc<dyn Resolver>,
    timeout: Duration,
}

impl Prober {
    /// Create a prober with a per-lookup deadline
    pub fn new(resolver: Arc<dyn Resolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn resolver_name(&self) -> String {
        self.resolver.name()
    }

    /// Probe one domain, converting every failure into a failed measurement
    pub async fn measure(&self, domain: &str) -> Measurement {
        let start = Instant::now();
        let outcome = tokio::time::timeout(self.timeout, self.resolver.lookup(domain)).await;
        let elapsed = start.elapsed();

        let result = match outcome {
            Ok(lookup) => lookup,
            Err(_) => Err(timeout_error(domain, self.timeout)),
        };

        classify(domain, result, elapsed, self.timeout)
    }

    /// Probe every domain in order, reporting each measurement as it completes
    pub async fn measure_all<F>(&self, domains: &[String], mut on_result: F) -> Vec<Measurement>
    where
        F: FnMut(&Measurement),
    {
        let mut measurements = Vec::with_capacity(domains.len());

        for domain in domains {
            let measurement = self.measure(domain).await;
            on_result(&measurement);
            measurements.push(measurement);
        }

        measurements
    }
}

/// Turn a lookup result and its elapsed time into a measurement
///
/// A lookup that took the full deadline or longer counts as timed out even
/// if addresses came back.
pub fn classify(
    domain: &str,
    result: Result<Vec<IpAddr>>,
    elapsed: Duration,
    timeout: Duration,
) -> Measurement {
    match result {
        Ok(_) if elapsed >= timeout => {
            Measurement::failed(domain, elapsed, timeout_error(domain, timeout).detail())
        }
        Ok(addresses) if addresses.is_empty() => {
            Measurement::failed(domain, elapsed, format!("no addresses returned for {}", domain))
        }
        Ok(addresses) => Measurement::success(domain, elapsed, addresses),
        Err(e) => Measurement::failed(domain, elapsed, e.detail()),
    }
}

fn timeout_error(domain: &str, timeout: Duration) -> AppError {
    AppError::timeout(format!(
        "lookup of {} timed out after {:.1}s",
        domain,
        timeout.as_secs_f64()
    ))
}
