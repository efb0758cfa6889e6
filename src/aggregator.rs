//! Order Aggregator
//!
//! Joins orders against the price and discount tables and folds each order
//! into a [`RunningTotals`] accumulator.
//!
//! Discount codes stack additively: two 10% codes give a 20% discount, not a
//! compounded 19%. Unknown codes are skipped and reported to the observer.

use rust_decimal::Decimal;

use crate::{
    error::{MetricsError, OrderFault},
    lookup::{DiscountTable, PriceTable},
    observer::{MetricsObserver, NoopObserver},
    records::OrderRecord,
};

/// Separator between discount codes on an order.
pub const DISCOUNT_CODE_SEPARATOR: char = ',';

/// What to do when an order cannot be processed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole calculation on the first bad order.
    #[default]
    Abort,

    /// Leave bad orders out of the totals and report them alongside the result.
    SkipInvalid,
}

/// Accumulated totals for one calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunningTotals {
    total_before_discount: Decimal,
    total_after_discount: Decimal,
    total_discount_amount: Decimal,
    orders_with_discount: usize,
    total_orders: usize,
}

impl RunningTotals {
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

    /// Number of orders folded into the totals.
    pub fn total_orders(&self) -> usize {
        self.total_orders
    }

    /// Fold a processed order into the totals.
    ///
    /// The totals are left untouched if the addition overflows.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Overflow`] if any running total overflows.
    pub fn fold(&mut self, order_id: &str, outcome: &OrderOutcome) -> Result<(), MetricsError> {
        let overflow = || MetricsError::Overflow {
            order_id: order_id.to_string(),
        };

        let net = outcome
            .order_total
            .checked_sub(outcome.discount_amount)
            .ok_or_else(overflow)?;

        let before = self
            .total_before_discount
            .checked_add(outcome.order_total)
            .ok_or_else(overflow)?;

        let discount = self
            .total_discount_amount
            .checked_add(outcome.discount_amount)
            .ok_or_else(overflow)?;

        let after = self
            .total_after_discount
            .checked_add(net)
            .ok_or_else(overflow)?;

        self.total_before_discount = before;
        self.total_discount_amount = discount;
        self.total_after_discount = after;
        self.total_orders += 1;

        if outcome.discounted {
            self.orders_with_discount += 1;
        }

        Ok(())
    }
}

/// Result of pricing a single order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderOutcome {
    /// Sum of line totals.
    pub order_total: Decimal,

    /// Stacked discount rate that was applied, as a fraction.
    pub discount_rate: Decimal,

    /// Amount taken off the order total.
    pub discount_amount: Decimal,

    /// Whether the order counts as discounted.
    pub discounted: bool,
}

/// Aggregate orders, aborting on the first bad order.
///
/// # Errors
///
/// Returns the first order's error; no partial totals are returned.
pub fn aggregate(
    orders: &[OrderRecord],
    prices: &PriceTable,
    discounts: &DiscountTable,
) -> Result<RunningTotals, MetricsError> {
    aggregate_with_observer(orders, prices, discounts, &mut NoopObserver)
}

/// Aggregate orders, reporting diagnostics to `observer`, aborting on the first bad order.
///
/// # Errors
///
/// Returns the first order's error; no partial totals are returned.
pub fn aggregate_with_observer<O: MetricsObserver + ?Sized>(
    orders: &[OrderRecord],
    prices: &PriceTable,
    discounts: &DiscountTable,
    observer: &mut O,
) -> Result<RunningTotals, MetricsError> {
    let (totals, _rejected) =
        aggregate_with_policy(orders, prices, discounts, FailurePolicy::Abort, observer)?;

    Ok(totals)
}

/// Aggregate orders under the given failure policy.
///
/// With [`FailurePolicy::SkipInvalid`] the errors of rejected orders are
/// returned next to the totals of the accepted ones, and this function
/// never fails.
///
/// # Errors
///
/// With [`FailurePolicy::Abort`], returns the first order's error.
pub fn aggregate_with_policy<O: MetricsObserver + ?Sized>(
    orders: &[OrderRecord],
    prices: &PriceTable,
    discounts: &DiscountTable,
    policy: FailurePolicy,
    observer: &mut O,
) -> Result<(RunningTotals, Vec<MetricsError>), MetricsError> {
    let mut totals = RunningTotals::default();
    let mut rejected = Vec::new();

    for order in orders {
        let order_id = order.label();

        let result = process_order(order, &order_id, prices, discounts, observer)
            .and_then(|outcome| totals.fold(&order_id, &outcome).map(|()| outcome));

        match result {
            Ok(outcome) => {
                observer.on_order_totalled(&order_id, outcome.order_total, outcome.discount_amount);
            }
            Err(error) => {
                observer.on_order_rejected(&order_id, &error);

                match policy {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::SkipInvalid => rejected.push(error),
                }
            }
        }
    }

    Ok((totals, rejected))
}

/// Price a single order and resolve its discount.
///
/// An empty discount string is treated as no discount. A non-empty one whose
/// codes resolve to no positive rate applies nothing, and the order does not
/// count as discounted.
///
/// # Errors
///
/// - [`MetricsError::InvalidOrder`]: the order is missing a field, references
///   an unknown SKU or carries a malformed quantity.
/// - [`MetricsError::Overflow`]: the order total does not fit in a decimal.
pub fn process_order<O: MetricsObserver + ?Sized>(
    order: &OrderRecord,
    order_id: &str,
    prices: &PriceTable,
    discounts: &DiscountTable,
    observer: &mut O,
) -> Result<OrderOutcome, MetricsError> {
    let order_total = order_total(order, order_id, prices)?;

    let Some(codes) = order.discount.as_deref().filter(|codes| !codes.is_empty()) else {
        return Ok(OrderOutcome {
            order_total,
            ..OrderOutcome::default()
        });
    };

    let discount_rate = stacked_percentage(codes, order_id, discounts, observer)?;

    if discount_rate > Decimal::ZERO {
        let discount_amount = order_total
            .checked_mul(discount_rate)
            .ok_or_else(|| MetricsError::Overflow {
                order_id: order_id.to_string(),
            })?;

        Ok(OrderOutcome {
            order_total,
            discount_rate,
            discount_amount,
            discounted: true,
        })
    } else {
        observer.on_discount_not_applied(order_id, codes);

        Ok(OrderOutcome {
            order_total,
            ..OrderOutcome::default()
        })
    }
}

/// Sum of `price * quantity` over the order's lines.
///
/// # Errors
///
/// - [`MetricsError::InvalidOrder`]: `items`, a `sku` or a `quantity` is
///   missing, a SKU has no price, or a quantity is malformed.
/// - [`MetricsError::Overflow`]: the total does not fit in a decimal.
pub fn order_total(
    order: &OrderRecord,
    order_id: &str,
    prices: &PriceTable,
) -> Result<Decimal, MetricsError> {
    let invalid = |fault| MetricsError::InvalidOrder {
        order_id: order_id.to_string(),
        fault,
    };

    let overflow = || MetricsError::Overflow {
        order_id: order_id.to_string(),
    };

    let items = order
        .items
        .as_ref()
        .ok_or_else(|| invalid(OrderFault::MissingField("items")))?;

    items.iter().try_fold(Decimal::ZERO, |total, line| {
        let sku = line
            .sku
            .as_deref()
            .ok_or_else(|| invalid(OrderFault::MissingField("sku")))?;

        let price = prices
            .price(sku)
            .ok_or_else(|| invalid(OrderFault::UnknownSku(sku.to_string())))?;

        let quantity = line
            .quantity
            .as_ref()
            .ok_or_else(|| invalid(OrderFault::MissingField("quantity")))?
            .to_decimal("quantity")
            .map_err(|error| error.in_order(order_id))?;

        price
            .checked_mul(quantity)
            .and_then(|line_total| total.checked_add(line_total))
            .ok_or_else(overflow)
    })
}

/// Sum the rates of every known code in a comma-separated list.
///
/// Codes are trimmed; empty segments are ignored. Unknown codes are reported
/// to the observer and contribute nothing.
///
/// # Errors
///
/// Returns [`MetricsError::Overflow`] if the summed rate does not fit in a decimal.
pub fn stacked_percentage<O: MetricsObserver + ?Sized>(
    codes: &str,
    order_id: &str,
    discounts: &DiscountTable,
    observer: &mut O,
) -> Result<Decimal, MetricsError> {
    codes
        .split(DISCOUNT_CODE_SEPARATOR)
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .try_fold(Decimal::ZERO, |sum, code| match discounts.rate(code) {
            Some(rate) => sum.checked_add(rate).ok_or_else(|| MetricsError::Overflow {
                order_id: order_id.to_string(),
            }),
            None => {
                observer.on_unknown_discount_code(order_id, code);

                Ok(sum)
            }
        })
}
