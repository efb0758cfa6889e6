//! Decimal Conversion
//!
//! Every price, quantity and discount rate enters the calculation through
//! [`to_decimal`], which parses the raw text into an exact [`Decimal`] and
//! quantizes it to [`DECIMAL_PLACES`] fractional digits.
//!
//! Rounding is round-half-to-even (banker's rounding): `1.005` becomes `1.00`
//! and `1.015` becomes `1.02`.

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use crate::error::MetricsError;

/// Number of fractional digits kept for monetary and percentage values.
pub const DECIMAL_PLACES: u32 = 2;

/// Round a value to [`DECIMAL_PLACES`] fractional digits.
///
/// The result always carries exactly two fractional digits, so `5` is
/// rendered as `5.00`.
pub fn quantize(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);

    rounded.rescale(DECIMAL_PLACES);

    rounded
}

/// Quantize a parsed input value, failing if it has too many integer digits
/// to carry [`DECIMAL_PLACES`] fractional digits.
fn quantize_input(value: Decimal, label: &'static str, raw: &str) -> Result<Decimal, MetricsError> {
    let quantized = quantize(value);

    if quantized.scale() == DECIMAL_PLACES {
        Ok(quantized)
    } else {
        Err(MetricsError::InvalidValue {
            label,
            value: raw.to_string(),
        })
    }
}

/// Parse a textual number into a quantized decimal.
///
/// Surrounding whitespace is ignored and scientific notation (`1e2`) is
/// accepted.
///
/// # Errors
///
/// Returns [`MetricsError::InvalidValue`] carrying `label` and the raw text
/// if `value` is not a finite decimal number, or is too large to hold
/// [`DECIMAL_PLACES`] fractional digits.
pub fn to_decimal(value: &str, label: &'static str) -> Result<Decimal, MetricsError> {
    let trimmed = value.trim();

    let parsed = Decimal::from_str(trimmed)
        .or_else(|_err| Decimal::from_scientific(trimmed))
        .map_err(|_err| MetricsError::InvalidValue {
            label,
            value: value.to_string(),
        })?;

    quantize_input(parsed, label, value)
}

/// A numeric field exactly as it appeared in the input.
///
/// Inputs may spell numbers as strings (`"10.00"`) or as bare numbers
/// (`10`). Anything else (null, booleans, nested values) is kept so that
/// conversion can report it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Number written as text.
    Text(String),

    /// Bare integer.
    Integer(i64),

    /// Bare floating point number.
    Float(f64),

    /// Any other value; never convertible.
    Other(serde_json::Value),
}

impl RawValue {
    /// Convert this value with [`to_decimal`].
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidValue`] if the value is not numeric or
    /// is out of range.
    pub fn to_decimal(&self, label: &'static str) -> Result<Decimal, MetricsError> {
        match self {
            RawValue::Text(text) => to_decimal(text, label),
            RawValue::Integer(value) => {
                quantize_input(Decimal::from(*value), label, &value.to_string())
            }
            RawValue::Float(value) => to_decimal(&value.to_string(), label),
            RawValue::Other(value) => Err(MetricsError::InvalidValue {
                label,
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(text) => f.write_str(text),
            RawValue::Integer(value) => write!(f, "{value}"),
            RawValue::Float(value) => write!(f, "{value}"),
            RawValue::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}
