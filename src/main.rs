//! DNS Impact Probe - CLI entry point

use clap::Parser;
use dns_impact::{
    app::{run_detached, App, ChartOutcome},
    cli::Cli,
    config::load_config,
    error::{AppError, ErrorReporter, Result},
    PKG_NAME, VERSION,
};
use std::{error::Error, process};

fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let cli = Cli::parse();
    let use_color = !cli.no_color && dns_impact::cli::supports_color();
    let verbose = cli.verbose;

    let result = run_detached(run_application(cli)).and_then(|outcome| outcome);

    if let Err(e) = result {
        ErrorReporter::new(use_color, verbose).report_error(&e);

        if let Some(source) = e.source() {
            eprintln!("Caused by: {}", source);
        }

        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    if cli.debug {
        println!("{} v{}", PKG_NAME, VERSION);
        println!(
            "Built {} ({})",
            option_env!("BUILD_TIME").unwrap_or("unknown"),
            option_env!("GIT_COMMIT").unwrap_or("no commit")
        );
        println!("Debug mode enabled");
    }

    let config = load_config(cli)?;
    let app = App::new(config)?;
    let summary = app.run().await?;

    // A failed chart is reported by the app; the run itself still completed
    if let ChartOutcome::Failed(_) = summary.chart {
        if app.config().verbose {
            eprintln!("Chart stage failed; {} is complete.", summary.csv_path.display());
        }
    }

    Ok(())
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Validation(_) | AppError::Parse(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format");
            eprintln!("  - Domains must be bare hostnames (no scheme, port or path)");
            eprintln!("  - DNS servers must be IP addresses");
            eprintln!("  - Timeout must be between 1 and 60 seconds");
        }
        AppError::Io(_) | AppError::Csv(_) => {
            eprintln!();
            eprintln!("Output help:");
            eprintln!("  - Check that the directory of the --csv path exists");
            eprintln!("  - Check file permissions and free disk space");
        }
        _ => {}
    }
}
