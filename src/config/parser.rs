//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::{supports_color, Cli},
    config::env::EnvManager,
    error::Result,
    models::Config,
};

/// Configuration parser that layers defaults, `.env`, environment and CLI
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        let mut config = Config::default();

        EnvManager::load_env_file(self.cli.debug)?;
        config.merge_from_env()?;

        self.apply_cli_overrides(&mut config);

        if !supports_color() {
            config.enable_color = false;
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_cli_overrides(&self, config: &mut Config) {
        if !self.cli.domains.is_empty() {
            config.domains = self.cli.domains.clone();
        }

        if let Some(ref bad_domain) = self.cli.bad_domain {
            config.bad_domain = bad_domain.clone();
        }

        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }

        if let Some(ref csv_path) = self.cli.csv_path {
            config.csv_path = csv_path.clone();
        }

        if let Some(ref chart_path) = self.cli.chart_path {
            config.chart_path = chart_path.clone();
        }

        if self.cli.no_chart {
            config.enable_chart = false;
        }

        if let Some(servers) = self.cli.dns_server_list() {
            config.dns_servers = servers;
        }

        if self.cli.no_color {
            config.enable_color = false;
        }

        if let Some(level) = self.cli.log_level {
            config.log_level = Some(level);
        }

        if let Some(format) = self.cli.log_format {
            config.log_format = Some(format);
        }

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let dns_servers = if config.dns_servers.is_empty() {
        "system".to_string()
    } else {
        config.dns_servers.join(", ")
    };

    let summary = [
        format!("Domains: {}", config.domains.join(", ")),
        format!("Bad domain: {}", config.bad_domain),
        format!("Timeout: {}s", config.timeout_seconds),
        format!("CSV: {}", config.csv_path.display()),
        format!("Chart: {} (enabled: {})", config.chart_path.display(), config.enable_chart),
        format!("DNS servers: {}", dns_servers),
        format!("Color Output: {}", config.enable_color),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
        format!(
            "Log: {} / {}",
            config.log_level.map(|l| l.as_str()).unwrap_or("auto"),
            config.log_format.map(|f| format!("{:?}", f)).unwrap_or_else(|| "auto".to_string())
        ),
    ];

    summary.join("\n")
}
