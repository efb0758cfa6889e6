//! Sales Metrics
//!
//! Batch calculator for aggregate sales metrics. Orders are priced against a
//! product price list, stacked percentage discounts are applied from a
//! discount-code table, and the totals are accumulated with exact decimal
//! arithmetic into a [`SalesMetrics`](metrics::SalesMetrics) summary.

pub mod aggregator;
pub mod calculator;
pub mod decimal;
pub mod error;
pub mod fixtures;
pub mod lookup;
pub mod metrics;
pub mod observer;
pub mod records;
pub mod report;

pub use calculator::{
    Calculation, FailurePolicy, calculate_sales_metrics, calculate_sales_metrics_with_observer,
    calculate_with_policy,
};
pub use error::{MetricsError, OrderFault};
pub use metrics::{MetricsSnapshot, SalesMetrics};
