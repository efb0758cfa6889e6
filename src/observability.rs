//! Logging subscriber initialisation.

use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use jiff::Zoned;
use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Registry,
    filter::ParseError,
    fmt::MakeWriter,
    layer::{Layer, Layered, SubscriberExt},
    util::{SubscriberInitExt, TryInitError},
};

use crate::config::{LogFormat, LoggingConfig};

/// Prefix of the per-run log file name.
const LOG_FILE_PREFIX: &str = "sales_calculator";

/// Errors raised while initialising logging.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    /// The log level is not a valid filter directive.
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    /// The log file could not be created.
    #[error("failed to create log file {}: {source}", .path.display())]
    LogFile {
        /// Path of the log file.
        path: PathBuf,

        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] TryInitError),
}

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Install the global subscriber: console output on stderr, plus a
/// timestamped log file unless disabled.
///
/// Returns the path of the log file, if one was created.
pub(crate) fn init(config: &LoggingConfig) -> Result<Option<PathBuf>, ObservabilityError> {
    let filter = EnvFilter::try_new(&config.log_level)?;

    let mut layers = vec![fmt_layer(config.log_format, io::stderr, true)];

    let log_path = if config.no_log_file {
        None
    } else {
        let path = log_file_path(&config.log_dir, &Zoned::now());
        let file = create_log_file(&path)?;

        layers.push(fmt_layer(config.log_format, Arc::new(file), false));

        Some(path)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()?;

    Ok(log_path)
}

fn fmt_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(writer)
            .boxed(),
    }
}

fn log_file_path(log_dir: &Path, now: &Zoned) -> PathBuf {
    log_dir.join(format!(
        "{LOG_FILE_PREFIX}_{}.log",
        now.strftime("%Y%m%d_%H%M%S")
    ))
}

fn create_log_file(path: &Path) -> Result<File, ObservabilityError> {
    let to_error = |source: io::Error| ObservabilityError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }

    File::create(path).map_err(to_error)
}
