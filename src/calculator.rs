//! Sales Metrics Calculation
//!
//! Entry points tying the lookup tables, the aggregator and the summary
//! together. A calculation is a pure function of its three input collections:
//! it performs no I/O, holds no shared state, and reports diagnostics only
//! through the [`MetricsObserver`] it is given.

pub use crate::aggregator::FailurePolicy;

use crate::{
    aggregator::aggregate_with_policy,
    error::MetricsError,
    lookup::{build_discount_table, build_price_table},
    metrics::{SalesMetrics, finalize},
    observer::{MetricsObserver, NoopObserver},
    records::{DiscountRecord, OrderRecord, ProductRecord},
};

/// Outcome of a calculation run under a [`FailurePolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    /// Metrics over every accepted order.
    pub metrics: SalesMetrics,

    /// Errors for orders left out of the metrics. Always empty under
    /// [`FailurePolicy::Abort`].
    pub rejected_orders: Vec<MetricsError>,
}

/// Calculate sales metrics, aborting on the first invalid row or order.
///
/// # Errors
///
/// - [`MetricsError::InvalidValue`] / [`MetricsError::InvalidRecord`]: a
///   product or discount row is malformed.
/// - [`MetricsError::InvalidOrder`]: an order references an unknown SKU, is
///   missing a required field or has a malformed quantity.
/// - [`MetricsError::Overflow`]: totals exceed the decimal range.
pub fn calculate_sales_metrics(
    orders: &[OrderRecord],
    products: &[ProductRecord],
    discounts: &[DiscountRecord],
) -> Result<SalesMetrics, MetricsError> {
    calculate_sales_metrics_with_observer(orders, products, discounts, &mut NoopObserver)
}

/// Calculate sales metrics, reporting diagnostics to `observer`.
///
/// # Errors
///
/// See [`calculate_sales_metrics`].
pub fn calculate_sales_metrics_with_observer<O: MetricsObserver + ?Sized>(
    orders: &[OrderRecord],
    products: &[ProductRecord],
    discounts: &[DiscountRecord],
    observer: &mut O,
) -> Result<SalesMetrics, MetricsError> {
    calculate_with_policy(orders, products, discounts, FailurePolicy::Abort, observer)
        .map(|calculation| calculation.metrics)
}

/// Calculate sales metrics under the given failure policy.
///
/// Malformed product or discount rows abort the calculation under either
/// policy; the policy only governs orders.
///
/// # Errors
///
/// See [`calculate_sales_metrics`]. Under [`FailurePolicy::SkipInvalid`] only
/// lookup table errors are returned.
pub fn calculate_with_policy<O: MetricsObserver + ?Sized>(
    orders: &[OrderRecord],
    products: &[ProductRecord],
    discounts: &[DiscountRecord],
    policy: FailurePolicy,
    observer: &mut O,
) -> Result<Calculation, MetricsError> {
    observer.on_calculation_started(orders.len(), products.len(), discounts.len());

    let result = build_price_table(products)
        .and_then(|prices| Ok((prices, build_discount_table(discounts)?)))
        .and_then(|(prices, rates)| {
            aggregate_with_policy(orders, &prices, &rates, policy, observer)
        });

    match result {
        Ok((totals, rejected_orders)) => {
            let metrics = finalize(&totals);

            observer.on_calculation_completed(&metrics);

            Ok(Calculation {
                metrics,
                rejected_orders,
            })
        }
        Err(error) => {
            observer.on_calculation_failed(&error);

            Err(error)
        }
    }
}
