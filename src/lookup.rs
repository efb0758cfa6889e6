//! Lookup Tables
//!
//! Price and discount lookups keyed by SKU and discount code. Both are built
//! in input order, so when a key appears more than once the last row wins.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::{
    decimal::RawValue,
    error::MetricsError,
    records::{DiscountRecord, ProductRecord},
};

/// Unit prices keyed by product SKU.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    prices: FxHashMap<String, Decimal>,
}

impl PriceTable {
    /// Unit price for `sku`, if the product is known.
    pub fn price(&self, sku: &str) -> Option<Decimal> {
        self.prices.get(sku).copied()
    }

    /// Number of distinct products.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the table holds no products.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Discount rates keyed by discount code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscountTable {
    rates: FxHashMap<String, Decimal>,
}

impl DiscountTable {
    /// Rate for `code` as a fraction, if the code is known.
    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).copied()
    }

    /// Number of distinct codes.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the table holds no codes.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Build the SKU to unit price table.
///
/// # Errors
///
/// - [`MetricsError::InvalidRecord`]: a row has no SKU, an empty SKU or no price.
/// - [`MetricsError::InvalidValue`]: a price is not a valid decimal.
pub fn build_price_table(products: &[ProductRecord]) -> Result<PriceTable, MetricsError> {
    let prices = build_table(
        products
            .iter()
            .map(|product| (product.sku.as_deref(), product.price.as_ref())),
        &TableShape {
            table: "products",
            key_field: "sku",
            value_field: "price",
            label: "price",
        },
    )?;

    Ok(PriceTable { prices })
}

/// Build the discount code to rate table.
///
/// # Errors
///
/// - [`MetricsError::InvalidRecord`]: a row has no key, an empty key or no value.
/// - [`MetricsError::InvalidValue`]: a rate is not a valid decimal.
pub fn build_discount_table(discounts: &[DiscountRecord]) -> Result<DiscountTable, MetricsError> {
    let rates = build_table(
        discounts
            .iter()
            .map(|discount| (discount.key.as_deref(), discount.value.as_ref())),
        &TableShape {
            table: "discounts",
            key_field: "key",
            value_field: "value",
            label: "discount",
        },
    )?;

    Ok(DiscountTable { rates })
}

/// Field names used when reporting a malformed row.
struct TableShape {
    table: &'static str,
    key_field: &'static str,
    value_field: &'static str,
    label: &'static str,
}

fn build_table<'r>(
    rows: impl Iterator<Item = (Option<&'r str>, Option<&'r RawValue>)>,
    shape: &TableShape,
) -> Result<FxHashMap<String, Decimal>, MetricsError> {
    let mut table = FxHashMap::default();

    for (position, (key, value)) in rows.enumerate() {
        let key = key
            .filter(|key| !key.is_empty())
            .ok_or(MetricsError::InvalidRecord {
                table: shape.table,
                position,
                field: shape.key_field,
            })?;

        let value = value.ok_or(MetricsError::InvalidRecord {
            table: shape.table,
            position,
            field: shape.value_field,
        })?;

        table.insert(key.to_string(), value.to_decimal(shape.label)?);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn price_table_maps_skus_to_quantized_prices() -> TestResult {
        let table = build_price_table(&[
            ProductRecord::new("PROD1", "10.00"),
            ProductRecord::new("PROD2", "19.999"),
        ])?;

        assert_eq!(table.len(), 2);
        assert_eq!(table.price("PROD1"), Some(Decimal::new(1000, 2)));
        assert_eq!(table.price("PROD2"), Some(Decimal::new(2000, 2)));
        assert_eq!(table.price("PROD3"), None);

        Ok(())
    }

    #[test]
    fn duplicate_keys_keep_the_last_row() -> TestResult {
        let prices = build_price_table(&[
            ProductRecord::new("PROD1", "10.00"),
            ProductRecord::new("PROD1", "12.50"),
        ])?;

        let discounts = build_discount_table(&[
            DiscountRecord::new("SAVE10", "0.10"),
            DiscountRecord::new("SAVE10", "0.15"),
        ])?;

        assert_eq!(prices.len(), 1);
        assert_eq!(prices.price("PROD1"), Some(Decimal::new(1250, 2)));
        assert_eq!(discounts.rate("SAVE10"), Some(Decimal::new(15, 2)));

        Ok(())
    }

    #[test]
    fn malformed_price_propagates_invalid_value() {
        let result = build_price_table(&[ProductRecord::new("PROD1", "ten")]);

        assert_eq!(
            result,
            Err(MetricsError::InvalidValue {
                label: "price",
                value: "ten".to_string(),
            })
        );
    }

    #[test]
    fn malformed_discount_is_labelled_as_discount() {
        let result = build_discount_table(&[DiscountRecord::new("SAVE10", "lots")]);

        assert!(matches!(
            result,
            Err(MetricsError::InvalidValue { label: "discount", .. })
        ));
    }

    #[test]
    fn empty_key_is_rejected() {
        let result = build_discount_table(&[
            DiscountRecord::new("SAVE10", "0.10"),
            DiscountRecord::new("", "0.10"),
        ]);

        assert_eq!(
            result,
            Err(MetricsError::InvalidRecord {
                table: "discounts",
                position: 1,
                field: "key",
            })
        );
    }

    #[test]
    fn missing_price_is_rejected() {
        let result = build_price_table(&[ProductRecord {
            sku: Some("PROD1".to_string()),
            price: None,
        }]);

        assert_eq!(
            result,
            Err(MetricsError::InvalidRecord {
                table: "products",
                position: 0,
                field: "price",
            })
        );
    }

    #[test]
    fn empty_inputs_build_empty_tables() -> TestResult {
        assert!(build_price_table(&[])?.is_empty());
        assert!(build_discount_table(&[])?.is_empty());

        Ok(())
    }
}
