//! Errors

use thiserror::Error;

/// Errors raised while calculating sales metrics.
///
/// Every variant aborts the calculation it was raised in, unless the caller
/// opted into [`FailurePolicy::SkipInvalid`](crate::calculator::FailurePolicy::SkipInvalid),
/// in which case [`MetricsError::InvalidOrder`] and [`MetricsError::Overflow`] are
/// collected per order instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetricsError {
    /// A numeric field could not be parsed as a decimal.
    #[error("Invalid {label} value: {value}")]
    InvalidValue {
        /// Name of the field being converted (`price`, `quantity`, `discount`).
        label: &'static str,

        /// Raw value as it appeared in the input.
        value: String,
    },

    /// A product or discount row is missing its key or numeric field.
    #[error("Invalid {table} row {position}: missing or empty `{field}`")]
    InvalidRecord {
        /// Which lookup table the row belongs to (`products`, `discounts`).
        table: &'static str,

        /// Zero-based position of the row in its collection.
        position: usize,

        /// Name of the offending field.
        field: &'static str,
    },

    /// An order referenced an unknown product or was missing a required field.
    #[error("Invalid order data in order {order_id}: {fault}")]
    InvalidOrder {
        /// Order identifier, or `unknown` when the order has none.
        order_id: String,

        /// What was wrong with the order.
        fault: OrderFault,
    },

    /// Accumulated totals exceeded the range of the decimal type.
    #[error("Arithmetic overflow while totalling order {order_id}")]
    Overflow {
        /// Order identifier, or `unknown` when the order has none.
        order_id: String,
    },
}

/// The reason an order was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderFault {
    /// A required field was absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// An order line referenced a SKU with no price.
    #[error("unknown product sku `{0}`")]
    UnknownSku(String),

    /// A numeric field on an order line was malformed.
    #[error("invalid {label} value: {value}")]
    InvalidValue {
        /// Name of the field being converted.
        label: &'static str,

        /// Raw value as it appeared in the input.
        value: String,
    },
}

impl MetricsError {
    /// Re-home a conversion failure under the order it occurred in.
    ///
    /// Errors that already describe an order are returned unchanged.
    #[must_use]
    pub fn in_order(self, order_id: &str) -> Self {
        match self {
            MetricsError::InvalidValue { label, value } => MetricsError::InvalidOrder {
                order_id: order_id.to_string(),
                fault: OrderFault::InvalidValue { label, value },
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_order_wraps_invalid_values() {
        let error = MetricsError::InvalidValue {
            label: "quantity",
            value: "two".to_string(),
        }
        .in_order("42");

        assert_eq!(
            error,
            MetricsError::InvalidOrder {
                order_id: "42".to_string(),
                fault: OrderFault::InvalidValue {
                    label: "quantity",
                    value: "two".to_string(),
                },
            }
        );
    }

    #[test]
    fn in_order_keeps_order_errors() {
        let error = MetricsError::Overflow {
            order_id: "7".to_string(),
        };

        assert_eq!(error.clone().in_order("8"), error);
    }

    #[test]
    fn invalid_order_message_names_order_and_key() {
        let error = MetricsError::InvalidOrder {
            order_id: "3".to_string(),
            fault: OrderFault::UnknownSku("NONEXISTENT".to_string()),
        };

        assert_eq!(
            error.to_string(),
            "Invalid order data in order 3: unknown product sku `NONEXISTENT`"
        );
    }
}
