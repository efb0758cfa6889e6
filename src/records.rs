//! Input Records
//!
//! Typed rows for the three input collections. Field names follow the input
//! documents (`orderId`, `items`, `discount`, `sku`, `quantity`, `price`,
//! `key`, `value`). Required fields are modelled as `Option` so that a missing
//! field is reported by the calculation with the order or row it belongs to,
//! rather than failing the whole document at load time.

use serde::Deserialize;

use crate::decimal::RawValue;

/// Identifier used in diagnostics for orders without an `orderId`.
pub const UNKNOWN_ORDER_ID: &str = "unknown";

/// A single order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrderRecord {
    /// Order identifier, used only for diagnostics.
    #[serde(rename = "orderId")]
    pub order_id: Option<RawValue>,

    /// Order lines, in input order.
    pub items: Option<Vec<OrderLineRecord>>,

    /// Comma-separated discount codes.
    pub discount: Option<String>,
}

impl OrderRecord {
    /// Create an order with the given lines, no identifier and no discount.
    pub fn new(items: impl Into<Vec<OrderLineRecord>>) -> Self {
        Self {
            order_id: None,
            items: Some(items.into()),
            discount: None,
        }
    }

    /// Set the order identifier.
    #[must_use]
    pub fn with_id(mut self, order_id: impl Into<RawValue>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    /// Set the comma-separated discount codes.
    #[must_use]
    pub fn with_discount(mut self, codes: impl Into<String>) -> Self {
        self.discount = Some(codes.into());
        self
    }

    /// The identifier to report this order under.
    pub fn label(&self) -> String {
        self.order_id
            .as_ref()
            .map_or_else(|| UNKNOWN_ORDER_ID.to_string(), ToString::to_string)
    }
}

/// One line of an order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrderLineRecord {
    /// Product SKU.
    pub sku: Option<String>,

    /// Quantity ordered; fractional quantities are allowed.
    pub quantity: Option<RawValue>,
}

impl OrderLineRecord {
    /// Create an order line.
    pub fn new(sku: impl Into<String>, quantity: impl Into<RawValue>) -> Self {
        Self {
            sku: Some(sku.into()),
            quantity: Some(quantity.into()),
        }
    }
}

/// A row of the product price list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductRecord {
    /// Product SKU.
    pub sku: Option<String>,

    /// Unit price.
    pub price: Option<RawValue>,
}

impl ProductRecord {
    /// Create a product row.
    pub fn new(sku: impl Into<String>, price: impl Into<RawValue>) -> Self {
        Self {
            sku: Some(sku.into()),
            price: Some(price.into()),
        }
    }
}

/// A row of the discount-code table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DiscountRecord {
    /// Discount code.
    pub key: Option<String>,

    /// Rate as a fraction, e.g. `0.10` for 10%.
    pub value: Option<RawValue>,
}

impl DiscountRecord {
    /// Create a discount row.
    pub fn new(key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn order_deserializes_from_input_field_names() -> TestResult {
        let order: OrderRecord = serde_json::from_str(
            r#"{
                "orderId": "1",
                "items": [{"sku": "PROD1", "quantity": "2"}],
                "discount": "SAVE10"
            }"#,
        )?;

        assert_eq!(
            order,
            OrderRecord::new([OrderLineRecord::new("PROD1", "2")])
                .with_id("1")
                .with_discount("SAVE10")
        );

        Ok(())
    }

    #[test]
    fn missing_fields_deserialize_as_none() -> TestResult {
        let order: OrderRecord = serde_json::from_str("{}")?;

        assert_eq!(order, OrderRecord::default());

        Ok(())
    }

    #[test]
    fn label_falls_back_to_unknown() {
        assert_eq!(OrderRecord::default().label(), UNKNOWN_ORDER_ID);
        assert_eq!(OrderRecord::new(Vec::new()).with_id(17_i64).label(), "17");
    }
}
