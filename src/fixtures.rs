//! Fixtures
//!
//! Loads the three input collections from disk. JSON is the primary format;
//! YAML documents with the same shape are accepted too.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

use crate::{
    calculator::{Calculation, FailurePolicy, calculate_with_policy},
    error::MetricsError,
    observer::MetricsObserver,
    records::{DiscountRecord, OrderRecord, ProductRecord},
};

/// Fixture Loading Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The input file does not exist.
    #[error("Missing required file: {}", .path.display())]
    MissingFile {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The input file exists but could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Path being read.
        path: PathBuf,

        /// Underlying I/O error.
        source: io::Error,
    },

    /// The input file is not valid JSON for the expected records.
    #[error("Invalid JSON format in {}: {source}", .path.display())]
    Json {
        /// Path being parsed.
        path: PathBuf,

        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// The input file is not valid YAML for the expected records.
    #[error("Invalid YAML format in {}: {source}", .path.display())]
    Yaml {
        /// Path being parsed.
        path: PathBuf,

        /// Underlying parse error.
        source: serde_norway::Error,
    },

    /// The file extension is not one of `json`, `yml` or `yaml`.
    #[error("Unsupported input format: {}", .path.display())]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },
}

/// Document format of an input file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// `.json`
    Json,

    /// `.yml` or `.yaml`
    Yaml,
}

impl InputFormat {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();

        match extension.as_str() {
            "json" => Some(InputFormat::Json),
            "yml" | "yaml" => Some(InputFormat::Yaml),
            _ => None,
        }
    }
}

/// Load a collection of records from a JSON or YAML file.
///
/// # Errors
///
/// Returns [`FixtureError::MissingFile`] if the file does not exist, and the
/// other [`FixtureError`] variants if it cannot be read or parsed.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, FixtureError> {
    let format = InputFormat::from_path(path).ok_or_else(|| FixtureError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let contents = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            error!("File not found: {}", path.display());

            FixtureError::MissingFile {
                path: path.to_path_buf(),
            }
        } else {
            FixtureError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let records: Vec<T> = match format {
        InputFormat::Json => serde_json::from_str(&contents).map_err(|source| {
            error!("Invalid JSON in {}: {source}", path.display());

            FixtureError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?,
        InputFormat::Yaml => serde_norway::from_str(&contents).map_err(|source| {
            error!("Invalid YAML in {}: {source}", path.display());

            FixtureError::Yaml {
                path: path.to_path_buf(),
                source,
            }
        })?,
    };

    debug!(path = %path.display(), records = records.len(), "Loaded input file");

    Ok(records)
}

/// File names of the three inputs, relative to a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFiles {
    /// Orders file.
    pub orders: PathBuf,

    /// Products file.
    pub products: PathBuf,

    /// Discounts file.
    pub discounts: PathBuf,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            orders: PathBuf::from("orders.json"),
            products: PathBuf::from("products.json"),
            discounts: PathBuf::from("discounts.json"),
        }
    }
}

/// The three input collections of a calculation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesData {
    /// Orders, in input order.
    pub orders: Vec<OrderRecord>,

    /// Product price list.
    pub products: Vec<ProductRecord>,

    /// Discount-code table.
    pub discounts: Vec<DiscountRecord>,
}

impl SalesData {
    /// Load `orders.json`, `products.json` and `discounts.json` from `base_path`.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if any file is missing or malformed.
    pub fn from_dir(base_path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        Self::load(base_path, &InputFiles::default())
    }

    /// Load the named input files from `base_path`.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if any file is missing or malformed.
    pub fn load(base_path: impl AsRef<Path>, files: &InputFiles) -> Result<Self, FixtureError> {
        let base_path = base_path.as_ref();

        Ok(Self {
            orders: load_records(&base_path.join(&files.orders))?,
            products: load_records(&base_path.join(&files.products))?,
            discounts: load_records(&base_path.join(&files.discounts))?,
        })
    }

    /// Run a calculation over the loaded collections.
    ///
    /// # Errors
    ///
    /// See [`calculate_with_policy`].
    pub fn calculate<O: MetricsObserver + ?Sized>(
        &self,
        policy: FailurePolicy,
        observer: &mut O,
    ) -> Result<Calculation, MetricsError> {
        calculate_with_policy(
            &self.orders,
            &self.products,
            &self.discounts,
            policy,
            observer,
        )
    }
}
