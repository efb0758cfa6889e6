//! Calculator configuration

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use sales_metrics::{FailurePolicy, fixtures::InputFiles};

/// Sales metrics calculator configuration
#[derive(Debug, Parser)]
#[command(name = "sales-metrics", about = "Calculate aggregate sales metrics", long_about = None)]
pub(crate) struct CalculatorConfig {
    /// Input file settings.
    #[command(flatten)]
    pub input: InputConfig,

    /// Report settings.
    #[command(flatten)]
    pub output: OutputConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl CalculatorConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Input file settings.
#[derive(Debug, Args)]
pub(crate) struct InputConfig {
    /// Directory holding the input files
    #[arg(short, long, env = "SALES_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Orders file, relative to the data directory
    #[arg(long, env = "SALES_ORDERS_FILE", default_value = "orders.json")]
    pub orders: PathBuf,

    /// Products file, relative to the data directory
    #[arg(long, env = "SALES_PRODUCTS_FILE", default_value = "products.json")]
    pub products: PathBuf,

    /// Discounts file, relative to the data directory
    #[arg(long, env = "SALES_DISCOUNTS_FILE", default_value = "discounts.json")]
    pub discounts: PathBuf,

    /// Leave invalid orders out of the totals instead of aborting
    #[arg(long, env = "SALES_SKIP_INVALID_ORDERS")]
    pub skip_invalid_orders: bool,
}

impl InputConfig {
    /// Input file names.
    pub(crate) fn files(&self) -> InputFiles {
        InputFiles {
            orders: self.orders.clone(),
            products: self.products.clone(),
            discounts: self.discounts.clone(),
        }
    }

    /// Policy for orders that cannot be processed.
    pub(crate) fn failure_policy(&self) -> FailurePolicy {
        if self.skip_invalid_orders {
            FailurePolicy::SkipInvalid
        } else {
            FailurePolicy::Abort
        }
    }
}

/// Report format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Pretty-printed JSON.
    Json,

    /// Human-readable table.
    Table,
}

/// Report settings.
#[derive(Debug, Args)]
pub(crate) struct OutputConfig {
    /// Report format (json, table)
    #[arg(short, long, env = "SALES_OUTPUT_FORMAT", value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Directory for the per-run log file
    #[arg(long, env = "SALES_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// Log to the console only
    #[arg(long, env = "SALES_NO_LOG_FILE")]
    pub no_log_file: bool,
}
