//! Command-line interface
//!
//! Every flag is optional: with no arguments the probe runs the built-in
//! domain list and writes `dns_results.csv` and `dns_times.png`.

use crate::config::EnvManager;
use crate::logging::{LogFormat, LogLevel};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Measure DNS resolution latency for a fixed set of domains
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dns-impact")]
#[command(version, about, long_about = None)]
#[command(after_long_help = EnvManager::create_example_env_content())]
pub struct Cli {
    /// Domain to probe (repeatable, replaces the built-in list)
    #[arg(short, long = "domain", action = ArgAction::Append, value_name = "HOST")]
    pub domains: Vec<String>,

    /// Deliberately unresolvable domain probed last
    #[arg(long, value_name = "HOST")]
    pub bad_domain: Option<String>,

    /// Per-lookup timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path of the CSV result file
    #[arg(long = "csv", value_name = "PATH")]
    pub csv_path: Option<PathBuf>,

    /// Path of the bar chart image
    #[arg(long = "chart", value_name = "PATH")]
    pub chart_path: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    pub no_chart: bool,

    /// Query these DNS servers instead of the system resolver (comma-separated)
    #[arg(long = "dns-server", value_name = "IP[,IP...]")]
    pub dns_servers: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Diagnostic log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Diagnostic log format (console, json, compact)
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Comma-separated `--dns-server` value split into entries
    pub fn dns_server_list(&self) -> Option<Vec<String>> {
        self.dns_servers.as_ref().map(|servers| {
            servers
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
    }
}

/// Check the terminal environment for color support
pub fn supports_color() -> bool {
    color_supported_by(|key| std::env::var(key).ok())
}

/// `FORCE_COLOR` wins over `NO_COLOR` and `TERM=dumb`
fn color_supported_by<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if lookup("FORCE_COLOR").is_some() {
        return true;
    }

    if lookup("NO_COLOR").is_some() {
        return false;
    }

    lookup("TERM").as_deref() != Some("dumb")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["dns-impact"]).unwrap();

        assert!(cli.domains.is_empty());
        assert!(cli.bad_domain.is_none());
        assert!(cli.timeout.is_none());
        assert!(cli.csv_path.is_none());
        assert!(!cli.no_chart);
        assert!(cli.dns_server_list().is_none());
    }

    #[test]
    fn test_all_arguments() {
        let cli = Cli::try_parse_from([
            "dns-impact",
            "--domain", "rust-lang.org",
            "-d", "crates.io",
            "--bad-domain", "nothing.invalid",
            "--timeout", "5",
            "--csv", "out.csv",
            "--chart", "out.png",
            "--no-chart",
            "--dns-server", "1.1.1.1, 8.8.8.8",
            "--no-color",
            "--verbose",
            "--debug",
        ])
        .unwrap();

        assert_eq!(cli.domains, vec!["rust-lang.org", "crates.io"]);
        assert_eq!(cli.bad_domain.as_deref(), Some("nothing.invalid"));
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.csv_path, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.chart_path, Some(PathBuf::from("out.png")));
        assert!(cli.no_chart);
        assert_eq!(cli.dns_server_list().unwrap(), vec!["1.1.1.1", "8.8.8.8"]);
        assert!(cli.no_color && cli.verbose && cli.debug);
    }

    #[test]
    fn test_log_options() {
        let cli = Cli::try_parse_from(["dns-impact", "--log-level", "trace", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Trace));
        assert_eq!(cli.log_format, Some(LogFormat::Json));

        assert!(Cli::try_parse_from(["dns-impact", "--log-level", "loud"]).is_err());
    }

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }

    #[test]
    fn test_color_detection() {
        assert!(color_supported_by(env(&[])));
        assert!(color_supported_by(env(&[("TERM", "xterm-256color")])));
        assert!(!color_supported_by(env(&[("TERM", "dumb")])));
        assert!(!color_supported_by(env(&[("NO_COLOR", "1")])));
        assert!(color_supported_by(env(&[("NO_COLOR", "1"), ("FORCE_COLOR", "1")])));
        assert!(color_supported_by(env(&[("TERM", "dumb"), ("FORCE_COLOR", "1")])));
    }

    #[test]
    fn test_long_help_lists_env_variables() {
        use clap::CommandFactory;

        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("TIMEOUT_SECONDS"));
        assert!(help.contains("DNS_IMPACT_FONT"));
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        assert!(Cli::try_parse_from(["dns-impact", "--timeout", "soon"]).is_err());
    }
}
