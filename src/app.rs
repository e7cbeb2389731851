//! Main application orchestration: probe, record, render

use crate::{
    config::display_config_summary,
    dns::create_resolver,
    error::{AppError, ErrorReporter, Result},
    executor::Prober,
    logging::Logger,
    models::{Config, Measurement},
    output::{select_renderer, ChartRenderer, ConsoleFormatter, CsvRecorder},
};
use std::future::Future;
use std::path::PathBuf;

/// What happened in the visualization stage
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    /// Chart written to this path
    Rendered(PathBuf),
    /// Charting unavailable or disabled
    Skipped,
    /// Rendering was attempted and failed; the CSV file is unaffected
    Failed(String),
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub measurements: Vec<Measurement>,
    pub csv_path: PathBuf,
    pub chart: ChartOutcome,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.measurements.len()
    }

    pub fn succeeded(&self) -> usize {
        self.measurements.iter().filter(|m| m.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }
}

/// Main application struct that coordinates all stages
pub struct App {
    config: Config,
    prober: Prober,
    recorder: CsvRecorder,
    renderer: Box<dyn ChartRenderer>,
    formatter: ConsoleFormatter,
    logger: Logger,
}

impl App {
    /// Build the application from a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        let resolver = create_resolver(&config.resolver_kind()?, config.timeout())?;
        let prober = Prober::new(resolver, config.timeout());
        let renderer = select_renderer(config.enable_chart);

        Ok(Self::with_components(config, prober, renderer))
    }

    /// Build the application around an explicit prober and renderer
    pub fn with_components(config: Config, prober: Prober, renderer: Box<dyn ChartRenderer>) -> Self {
        let formatter = ConsoleFormatter::new(config.enable_color);
        let logger = Logger::with_config("app", &config);

        Self {
            config,
            prober,
            recorder: CsvRecorder::new(),
            renderer,
            formatter,
            logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole pipeline once
    ///
    /// Only a failure to write the CSV file is returned as an error. Probe
    /// failures end up in the measurements and chart failures in
    /// [`RunSummary::chart`].
    pub async fn run(&self) -> Result<RunSummary> {
        self.logger.start_run().await;
        self.logger.add_context_field("resolver", self.prober.resolver_name()).await;

        println!("{}", self.formatter.header(&self.prober.resolver_name()));

        if self.config.debug {
            println!("Configuration Summary:\n{}\n", display_config_summary(&self.config));
        }

        self.logger
            .info("Starting probe run")
            .field("domains", self.config.probe_targets())
            .field("timeout_secs", self.config.timeout_seconds)
            .log()
            .await;

        let measurements = self.probe().await;
        self.report_bad_domain(&measurements);

        self.record(&measurements).await?;
        let chart = self.render(&measurements).await;

        let summary = RunSummary {
            measurements,
            csv_path: self.config.csv_path.clone(),
            chart,
        };

        println!("{}", self.formatter.summary(summary.total(), summary.succeeded()));

        self.logger
            .info("Probe run finished")
            .field("succeeded", summary.succeeded())
            .field("failed", summary.failed())
            .log()
            .await;

        Ok(summary)
    }

    async fn probe(&self) -> Vec<Measurement> {
        let targets = self.config.probe_targets();
        let verbose = self.config.verbose || self.config.debug;

        let measurements = self
            .prober
            .measure_all(&targets, |m| {
                println!("{}", self.formatter.probe_row(m));
                if verbose {
                    if let Some(line) = self.formatter.address_line(m) {
                        println!("{}", line);
                    }
                }
            })
            .await;

        let probe_logger = self.logger.child("probe");
        for m in &measurements {
            probe_logger.debug("Probe finished").measurement(m).log().await;
        }

        measurements
    }

    /// Print the failure of the deliberately bad domain, which is expected
    fn report_bad_domain(&self, measurements: &[Measurement]) {
        if let Some(last) = measurements.last() {
            if last.domain() == self.config.bad_domain && !last.is_success() {
                println!("{}", self.formatter.error_line(last));
            }
        }
    }

    async fn record(&self, measurements: &[Measurement]) -> Result<()> {
        let logger = self.logger.child("recorder");

        match self.recorder.record(measurements, &self.config.csv_path) {
            Ok(()) => {
                println!("{}", self.formatter.csv_saved(&self.config.csv_path));
                logger
                    .info("Results recorded")
                    .field("path", self.config.csv_path.display().to_string())
                    .field("rows", measurements.len())
                    .log()
                    .await;
                Ok(())
            }
            Err(e) => {
                logger.error("Recording failed").error_info(&e).log().await;
                Err(e)
            }
        }
    }

    async fn render(&self, measurements: &[Measurement]) -> ChartOutcome {
        let logger = self.logger.child("chart");

        match self.renderer.render(measurements, &self.config.chart_path) {
            Ok(Some(path)) => {
                println!("{}", self.formatter.chart_saved(&path));
                logger
                    .info("Chart rendered")
                    .field("path", path.display().to_string())
                    .log()
                    .await;
                ChartOutcome::Rendered(path)
            }
            Ok(None) => {
                logger.info("Chart stage skipped").log().await;
                ChartOutcome::Skipped
            }
            Err(e) => {
                ErrorReporter::new(self.config.enable_color, self.config.verbose).report_error(&e);
                logger.warn("Chart stage failed").error_info(&e).log().await;
                ChartOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Drive `future` to completion on a fresh multi-threaded runtime
///
/// A system lookup abandoned at its deadline keeps a blocking-pool thread
/// busy until `getaddrinfo` returns. The runtime is shut down without waiting
/// for those threads, so the process exits as soon as the run is done.
pub fn run_detached<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::internal(format!("Failed to start async runtime: {}", e)))?;

    let output = runtime.block_on(future);
    runtime.shutdown_background();

    Ok(output)
}
