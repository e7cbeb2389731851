//! Configuration data model and validation

use crate::logging::{LogFormat, LogLevel};
use crate::types::{AppError, ResolverKind, Result};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Domains expected to resolve, probed in order
    #[serde(default = "default_domains")]
    pub domains: Vec<String>,

    /// Deliberately unresolvable domain, always probed last
    #[serde(default = "default_bad_domain")]
    pub bad_domain: String,

    /// Per-probe lookup timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// Destination of the CSV result file
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,

    /// Destination of the bar chart image
    #[serde(default = "default_chart_path")]
    pub chart_path: PathBuf,

    /// Whether the chart stage should be attempted at all
    #[serde(default = "default_enable_chart")]
    pub enable_chart: bool,

    /// Explicit DNS servers; empty means the system resolver
    #[serde(default)]
    pub dns_servers: Vec<String>,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,

    /// Diagnostic log level; derived from verbose/debug when unset
    #[serde(default)]
    pub log_level: Option<LogLevel>,

    /// Diagnostic log format; derived from debug when unset
    #[serde(default)]
    pub log_format: Option<LogFormat>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domains: default_domains(),
            bad_domain: default_bad_domain(),
            timeout_seconds: default_timeout_secs(),
            csv_path: default_csv_path(),
            chart_path: default_chart_path(),
            enable_chart: default_enable_chart(),
            dns_servers: Vec::new(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
            log_level: None,
            log_format: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Domains in probe order: the normal list followed by the bad domain
    pub fn probe_targets(&self) -> Vec<String> {
        let mut targets = self.domains.clone();
        targets.push(self.bad_domain.clone());
        targets
    }

    /// Resolver backend selected by this configuration
    pub fn resolver_kind(&self) -> Result<ResolverKind> {
        if self.dns_servers.is_empty() {
            return Ok(ResolverKind::System);
        }

        let mut servers = Vec::with_capacity(self.dns_servers.len());
        for server in &self.dns_servers {
            servers.push(parse_value::<IpAddr>("DNS server", server)?);
        }

        Ok(ResolverKind::NameServers { servers })
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.domains.is_empty() {
            return Err(AppError::config("At least one domain must be configured"));
        }

        for domain in &self.domains {
            validate_hostname(domain)?;
        }
        validate_hostname(&self.bad_domain)?;

        if self.timeout_seconds == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        if self.timeout_seconds > crate::defaults::MAX_TIMEOUT_SECS {
            return Err(AppError::config(format!(
                "Timeout cannot exceed {} seconds",
                crate::defaults::MAX_TIMEOUT_SECS
            )));
        }

        if self.csv_path.as_os_str().is_empty() {
            return Err(AppError::config("CSV path cannot be empty"));
        }

        if self.enable_chart && self.chart_path.as_os_str().is_empty() {
            return Err(AppError::config("Chart path cannot be empty"));
        }

        self.resolver_kind()?;

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        self.merge_from_lookup(|key| std::env::var(key).ok())
    }

    /// Merge values from an arbitrary key lookup (environment or test map)
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(domains) = lookup("DOMAINS") {
            self.domains = split_list(&domains);
        }

        if let Some(bad_domain) = lookup("BAD_DOMAIN") {
            self.bad_domain = bad_domain.trim().to_string();
        }

        if let Some(timeout) = lookup("TIMEOUT_SECONDS") {
            self.timeout_seconds = parse_value("TIMEOUT_SECONDS", &timeout)?;
        }

        if let Some(csv_path) = lookup("CSV_PATH") {
            self.csv_path = PathBuf::from(csv_path.trim());
        }

        if let Some(chart_path) = lookup("CHART_PATH") {
            self.chart_path = PathBuf::from(chart_path.trim());
        }

        if let Some(enable_chart) = lookup("ENABLE_CHART") {
            self.enable_chart = parse_value("ENABLE_CHART", &enable_chart)?;
        }

        if let Some(dns_servers) = lookup("DNS_SERVERS") {
            self.dns_servers = split_list(&dns_servers);
        }

        if let Some(enable_color) = lookup("ENABLE_COLOR") {
            self.enable_color = parse_value("ENABLE_COLOR", &enable_color)?;
        }

        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.log_level = Some(parse_value("LOG_LEVEL", &log_level)?);
        }

        if let Some(log_format) = lookup("LOG_FORMAT") {
            self.log_format = Some(parse_value("LOG_FORMAT", &log_format)?);
        }

        Ok(())
    }
}

/// Parse one configuration value, naming where it came from on failure
fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    AppError: From<T::Err>,
{
    raw.trim().parse::<T>().map_err(|e| {
        AppError::config(format!("Invalid {} value '{}': {}", key, raw, AppError::from(e).detail()))
    })
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn validate_hostname(domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(AppError::config("Domain cannot be empty"));
    }

    if domain.len() > 253 {
        return Err(AppError::config(format!("Domain '{}' exceeds 253 characters", domain)));
    }

    if domain.chars().any(|c| c.is_whitespace() || c == '/' || c == ':') {
        return Err(AppError::config(format!("Invalid domain '{}': expected a bare hostname", domain)));
    }

    Ok(())
}

// Default value functions for serde
fn default_domains() -> Vec<String> {
    crate::defaults::DEFAULT_DOMAINS
        .iter()
        .map(|&s| s.to_string())
        .collect()
}

fn default_bad_domain() -> String {
    crate::defaults::DEFAULT_BAD_DOMAIN.to_string()
}

fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs()
}

fn default_csv_path() -> PathBuf {
    PathBuf::from(crate::defaults::DEFAULT_CSV_PATH)
}

fn default_chart_path() -> PathBuf {
    PathBuf::from(crate::defaults::DEFAULT_CHART_PATH)
}

fn default_enable_chart() -> bool {
    true
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
