//! Calculation Observer

use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::{error::MetricsError, metrics::SalesMetrics};

/// Observer trait for diagnostics raised while a calculation runs.
///
/// The calculation itself performs no logging. It reports recoverable
/// conditions (unknown discount codes) and failures through this trait, and
/// the caller decides where they go. Every callback defaults to a no-op, so an
/// observer only implements the events it cares about.
pub trait MetricsObserver {
    /// Called once before any order is processed.
    fn on_calculation_started(&mut self, _orders: usize, _products: usize, _discounts: usize) {}

    /// Called after an order has been folded into the running totals.
    fn on_order_totalled(&mut self, _order_id: &str, _order_total: Decimal, _discount: Decimal) {}

    /// Called for each discount code on an order that is not in the discount table.
    fn on_unknown_discount_code(&mut self, _order_id: &str, _code: &str) {}

    /// Called when an order carried discount codes but none of them applied.
    fn on_discount_not_applied(&mut self, _order_id: &str, _codes: &str) {}

    /// Called when an order is rejected.
    fn on_order_rejected(&mut self, _order_id: &str, _error: &MetricsError) {}

    /// Called when the calculation is aborted.
    fn on_calculation_failed(&mut self, _error: &MetricsError) {}

    /// Called once the metrics have been produced.
    fn on_calculation_completed(&mut self, _metrics: &SalesMetrics) {}
}

/// No-op observer for unobserved calculations.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MetricsObserver for NoopObserver {}

/// Observer that forwards every event to [`tracing`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl MetricsObserver for TracingObserver {
    fn on_calculation_started(&mut self, orders: usize, products: usize, discounts: usize) {
        info!(orders, products, discounts, "Starting sales metrics calculation");
    }

    fn on_order_totalled(&mut self, order_id: &str, order_total: Decimal, discount: Decimal) {
        debug!(order_id, %order_total, %discount, "Order totalled");
    }

    fn on_unknown_discount_code(&mut self, order_id: &str, code: &str) {
        warn!(order_id, code, "Unknown discount code ignored");
    }

    fn on_discount_not_applied(&mut self, order_id: &str, codes: &str) {
        warn!(order_id, "Invalid discount code(s): {codes}");
    }

    fn on_order_rejected(&mut self, order_id: &str, error: &MetricsError) {
        error!(order_id, "Rejected order: {error}");
    }

    fn on_calculation_failed(&mut self, error: &MetricsError) {
        error!("Error calculating sales metrics: {error}");
    }

    fn on_calculation_completed(&mut self, metrics: &SalesMetrics) {
        info!(
            total_orders = metrics.total_orders(),
            orders_with_discount = metrics.orders_with_discount(),
            "Sales metrics calculation completed successfully"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingObserver {
        unknown_codes: usize,
    }

    impl MetricsObserver for CountingObserver {
        fn on_unknown_discount_code(&mut self, _order_id: &str, _code: &str) {
            self.unknown_codes += 1;
        }
    }

    #[test]
    fn default_callbacks_are_callable() {
        let mut observer = CountingObserver { unknown_codes: 0 };
        let obs: &mut dyn MetricsObserver = &mut observer;

        obs.on_calculation_started(1, 2, 3);
        obs.on_discount_not_applied("1", "NOPE");
        obs.on_unknown_discount_code("1", "NOPE");

        assert_eq!(observer.unknown_codes, 1);
    }

    #[test]
    fn tracing_observer_runs_without_a_subscriber() {
        let mut observer = TracingObserver;

        observer.on_calculation_started(0, 0, 0);
        observer.on_unknown_discount_code("1", "NOPE");
        observer.on_calculation_failed(&MetricsError::Overflow {
            order_id: "1".to_string(),
        });
    }
}
