//! Environment variable handling and .env file management

use crate::error::Result;
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env file from the current directory if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        Self::load_env_file_from(Path::new(".env"), debug)?;
        Ok(())
    }

    /// Load a specific env file if it exists; a missing file is not an error
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<bool> {
        if !path.exists() {
            if debug {
                eprintln!("No {} file found, using defaults and CLI arguments", path.display());
            }
            return Ok(false);
        }

        dotenv::from_path(path)?;

        if debug {
            eprintln!("Loaded configuration from {}", path.display());
        }

        Ok(true)
    }

    /// Example .env file content documenting every recognised variable
    pub fn create_example_env_content() -> String {
        r#"# DNS Impact Probe Configuration
#
# Values here are used as defaults and can be overridden by
# command-line arguments.

# Domains expected to resolve (comma-separated)
# DOMAINS=google.com,github.com,example.com

# Deliberately unresolvable domain, probed last
# BAD_DOMAIN=nonexistentdomainforschoolproject123.com

# Per-lookup timeout in seconds (1-60)
# TIMEOUT_SECONDS=3

# Output files
# CSV_PATH=dns_results.csv
# CHART_PATH=dns_times.png

# Render the bar chart (true/false)
# ENABLE_CHART=true

# Query explicit DNS servers instead of the system resolver (comma-separated)
# DNS_SERVERS=1.1.1.1,8.8.8.8

# Diagnostic log level (trace, debug, info, warn, error) and format (console, json, compact)
# LOG_LEVEL=warn
# LOG_FORMAT=console

# Enable colored output (true/false)
# ENABLE_COLOR=true

# TrueType font used for chart text
# DNS_IMPACT_FONT=/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf
"#.to_string()
    }
}
