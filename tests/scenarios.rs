//! End-to-end calculation scenarios through the public API.
//!
//! Sample data: PROD1 costs 10.00, PROD2 costs 20.00, and the codes SAVE10
//! and WINTERMADNESS are worth 10% each.

use rust_decimal::Decimal;
use testresult::TestResult;

use sales_metrics::{
    MetricsError, OrderFault, calculate_sales_metrics,
    records::{DiscountRecord, OrderLineRecord, OrderRecord, ProductRecord},
};

fn products() -> Vec<ProductRecord> {
    vec![
        ProductRecord::new("PROD1", "10.00"),
        ProductRecord::new("PROD2", "20.00"),
    ]
}

fn discounts() -> Vec<DiscountRecord> {
    vec![
        DiscountRecord::new("SAVE10", "0.10"),
        DiscountRecord::new("WINTERMADNESS", "0.10"),
    ]
}

#[test]
fn sample_orders_produce_expected_metrics() -> TestResult {
    let orders = [
        OrderRecord::new([
            OrderLineRecord::new("PROD1", "2"),
            OrderLineRecord::new("PROD2", "1"),
        ])
        .with_id("1")
        .with_discount("SAVE10,WINTERMADNESS"),
        OrderRecord::new([OrderLineRecord::new("PROD1", "1")]).with_id("2"),
    ];

    let metrics = calculate_sales_metrics(&orders, &products(), &discounts())?;

    // (2 * 10 + 20) + 10 = 50; 20% of the first order's 40 = 8
    assert_eq!(metrics.total_before_discount(), Decimal::new(5000, 2));
    assert_eq!(metrics.total_discount_amount(), Decimal::new(800, 2));
    assert_eq!(metrics.total_after_discount(), Decimal::new(4200, 2));
    assert_eq!(metrics.orders_with_discount(), 1);
    assert_eq!(metrics.total_orders(), 2);
    assert_eq!(metrics.average_discount_percentage(), Decimal::new(1600, 2));

    Ok(())
}

#[test]
fn stacked_codes_on_a_single_order() -> TestResult {
    let orders = [OrderRecord::new([OrderLineRecord::new("PROD1", "1")])
        .with_id("1")
        .with_discount("SAVE10,WINTERMADNESS")];

    let metrics = calculate_sales_metrics(&orders, &products(), &discounts())?;

    assert_eq!(metrics.total_before_discount(), Decimal::new(1000, 2));
    assert_eq!(metrics.total_discount_amount(), Decimal::new(200, 2));
    assert_eq!(metrics.total_after_discount(), Decimal::new(800, 2));
    assert_eq!(metrics.average_discount_percentage(), Decimal::new(2000, 2));

    Ok(())
}

#[test]
fn invalid_code_next_to_a_valid_one() -> TestResult {
    let orders = [OrderRecord::new([OrderLineRecord::new("PROD1", "1")])
        .with_id("4")
        .with_discount("INVALID,WINTERMADNESS")];

    let metrics = calculate_sales_metrics(&orders, &products(), &discounts())?;

    assert_eq!(metrics.orders_with_discount(), 1);
    assert_eq!(metrics.total_discount_amount(), Decimal::new(100, 2));

    Ok(())
}

#[test]
fn only_invalid_codes_do_not_count_as_discounted() -> TestResult {
    let orders = [OrderRecord::new([OrderLineRecord::new("PROD2", "1")])
        .with_id("5")
        .with_discount("INVALID")];

    let metrics = calculate_sales_metrics(&orders, &products(), &discounts())?;

    assert_eq!(metrics.orders_with_discount(), 0);
    assert_eq!(metrics.total_discount_amount(), Decimal::ZERO);
    assert_eq!(metrics.average_discount_percentage(), Decimal::ZERO);

    Ok(())
}

#[test]
fn unknown_product_aborts_the_calculation() {
    let orders = [
        OrderRecord::new([OrderLineRecord::new("PROD1", "1")]).with_id("1"),
        OrderRecord::new([OrderLineRecord::new("NONEXISTENT", "1")]).with_id("3"),
    ];

    let result = calculate_sales_metrics(&orders, &products(), &discounts());

    assert_eq!(
        result,
        Err(MetricsError::InvalidOrder {
            order_id: "3".to_string(),
            fault: OrderFault::UnknownSku("NONEXISTENT".to_string()),
        })
    );
}

#[test]
fn no_orders_yield_zero_metrics() -> TestResult {
    let metrics = calculate_sales_metrics(&[], &products(), &discounts())?;
    let snapshot = metrics.snapshot();

    assert_eq!(metrics.total_orders(), 0);
    assert_eq!(snapshot.total_before_discount, Decimal::ZERO);
    assert_eq!(snapshot.average_discount_percentage, Decimal::ZERO);

    Ok(())
}

#[test]
fn totals_stay_exact_over_many_orders() -> TestResult {
    let products = [ProductRecord::new("PENNY", "0.01")];
    let discounts = [DiscountRecord::new("THIRD", "0.33")];
    let orders: Vec<OrderRecord> = (0..1000)
        .map(|_| OrderRecord::new([OrderLineRecord::new("PENNY", "1")]).with_discount("THIRD"))
        .collect();

    let metrics = calculate_sales_metrics(&orders, &products, &discounts)?;

    assert_eq!(metrics.total_before_discount(), Decimal::new(1000, 2));
    assert_eq!(metrics.total_discount_amount(), Decimal::new(330, 2));
    assert_eq!(
        metrics.total_after_discount(),
        metrics.total_before_discount() - metrics.total_discount_amount()
    );
    assert_eq!(metrics.orders_with_discount(), 1000);

    Ok(())
}
