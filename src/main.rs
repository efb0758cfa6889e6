//! Sales Metrics CLI
//!
//! Loads orders, products and discounts from the data directory, prints the
//! metrics report on stdout and exits non-zero if the calculation fails.

use std::{io, process::ExitCode, time::Instant};

use humanize_duration::{Truncate, prelude::DurationExt};
use thiserror::Error;
use tracing::{error, info, warn};

use sales_metrics::{
    MetricsError,
    fixtures::{FixtureError, SalesData},
    observer::TracingObserver,
    report::{self, ReportError},
};

use crate::config::{CalculatorConfig, OutputFormat};

mod config;
mod observability;

/// Any failure of a calculator run.
#[derive(Debug, Error)]
enum CalculatorError {
    /// An input file is missing or malformed.
    #[error(transparent)]
    Input(#[from] FixtureError),

    /// The calculation was aborted.
    #[error("Failed to calculate sales metrics: {0}")]
    Metrics(#[from] MetricsError),

    /// The report could not be written.
    #[error(transparent)]
    Report(#[from] ReportError),
}

fn main() -> ExitCode {
    let config = match CalculatorConfig::load() {
        Ok(config) => config,
        Err(parse_error) => parse_error.exit(),
    };

    let log_path = match observability::init(&config.logging) {
        Ok(log_path) => log_path,
        Err(init_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging not initialized yet, must use eprintln for setup errors"
            )]
            {
                eprintln!("Logging setup error: {init_error}");
            }

            return ExitCode::FAILURE;
        }
    };

    if let Some(log_path) = log_path {
        info!("Logging to {}", log_path.display());
    }

    match run(&config) {
        Ok(()) => {
            info!("Process completed successfully");

            ExitCode::SUCCESS
        }
        Err(run_error) => {
            error!("Sales calculation failed: {run_error}");

            ExitCode::FAILURE
        }
    }
}

fn run(config: &CalculatorConfig) -> Result<(), CalculatorError> {
    info!("Loading sales data files");

    let data = SalesData::load(&config.input.data_dir, &config.input.files())?;

    let start = Instant::now();
    let calculation = data.calculate(config.input.failure_policy(), &mut TracingObserver)?;
    let elapsed = start.elapsed();

    info!(
        "Calculated metrics for {} orders in {}",
        calculation.metrics.total_orders(),
        elapsed.human(Truncate::Nano)
    );

    if !calculation.rejected_orders.is_empty() {
        warn!(
            "Skipped {} invalid order(s)",
            calculation.rejected_orders.len()
        );
    }

    let stdout = io::stdout();
    let handle = stdout.lock();

    match config.output.format {
        OutputFormat::Json => report::write_json(handle, &calculation.metrics)?,
        OutputFormat::Table => report::write_table(
            handle,
            &calculation.metrics,
            calculation.rejected_orders.len(),
        )?,
    }

    Ok(())
}
