//! Metrics Summary

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{aggregator::RunningTotals, decimal::quantize};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Final sales metrics for one calculation.
///
/// Values are kept at full precision; [`SalesMetrics::snapshot`] gives the
/// rounded view meant for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesMetrics {
    total_before_discount: Decimal,
    total_after_discount: Decimal,
    total_discount_amount: Decimal,
    orders_with_discount: usize,
    total_orders: usize,
    average_discount_percentage: Decimal,
}

impl SalesMetrics {
    /// Create metrics from already computed values.
    pub(crate) fn new(
        total_before_discount: Decimal,
        total_after_discount: Decimal,
        total_discount_amount: Decimal,
        orders_with_discount: usize,
        total_orders: usize,
        average_discount_percentage: Decimal,
    ) -> Self {
        Self {
            total_before_discount,
            total_after_discount,
            total_discount_amount,
            orders_with_discount,
            total_orders,
            average_discount_percentage,
        }
    }

    /// Sum of order totals before any discount.
    pub fn total_before_discount(&self) -> Decimal {
        self.total_before_discount
    }

    /// Sum of order totals after discounts.
    pub fn total_after_discount(&self) -> Decimal {
        self.total_after_discount
    }

    /// Sum of discount amounts.
    pub fn total_discount_amount(&self) -> Decimal {
        self.total_discount_amount
    }

    /// Number of orders that received a non-zero discount.
    pub fn orders_with_discount(&self) -> usize {
        self.orders_with_discount
    }

    /// Number of orders included in the totals.
    pub fn total_orders(&self) -> usize {
        self.total_orders
    }

    /// Discount amount as a percentage of the pre-discount total.
    pub fn average_discount_percentage(&self) -> Decimal {
        self.average_discount_percentage
    }

    /// Rounded view of the metrics for reporting.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_before_discount: quantize(self.total_before_discount),
            total_after_discount: quantize(self.total_after_discount),
            total_discount_amount: quantize(self.total_discount_amount),
            average_discount_percentage: quantize(self.average_discount_percentage),
        }
    }
}

/// Derive the final metrics from accumulated totals.
///
/// The average discount is blended: total discount over total pre-discount
/// amount, times 100. It is zero unless there is a positive pre-discount total
/// and at least one discounted order. A ratio too large for a decimal
/// saturates at [`Decimal::MAX`].
pub fn finalize(totals: &RunningTotals) -> SalesMetrics {
    let before = totals.total_before_discount();
    let discount = totals.total_discount_amount();

    let average_discount_percentage = if before > Decimal::ZERO && totals.orders_with_discount() > 0
    {
        discount
            .checked_div(before)
            .map_or(Decimal::MAX, |ratio| ratio.saturating_mul(HUNDRED))
    } else {
        Decimal::ZERO
    };

    SalesMetrics::new(
        before,
        totals.total_after_discount(),
        discount,
        totals.orders_with_discount(),
        totals.total_orders(),
        average_discount_percentage,
    )
}

/// Flat, rounded view of [`SalesMetrics`].
///
/// Serializes to the report keys with every value as a number rounded to two
/// decimal places. Order counts are not part of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Total before discount.
    #[serde(rename = "Total before discount", with = "rust_decimal::serde::float")]
    pub total_before_discount: Decimal,

    /// Total after discount.
    #[serde(rename = "Total after discount", with = "rust_decimal::serde::float")]
    pub total_after_discount: Decimal,

    /// Total discount amount.
    #[serde(rename = "Total discount amount", with = "rust_decimal::serde::float")]
    pub total_discount_amount: Decimal,

    /// Average discount percentage.
    #[serde(
        rename = "Average discount percentage",
        with = "rust_decimal::serde::float"
    )]
    pub average_discount_percentage: Decimal,
}
