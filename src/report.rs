//! Report

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::metrics::SalesMetrics;

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The snapshot could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The report could not be written.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Write the metrics snapshot as pretty-printed JSON.
///
/// # Errors
///
/// Returns a [`ReportError`] if serialization or writing fails.
pub fn write_json(mut out: impl io::Write, metrics: &SalesMetrics) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut out, &metrics.snapshot())?;

    writeln!(out)?;

    Ok(())
}

/// Write the metrics snapshot and order counts as a table.
///
/// # Errors
///
/// Returns a [`ReportError`] if writing fails.
pub fn write_table(
    mut out: impl io::Write,
    metrics: &SalesMetrics,
    rejected_orders: usize,
) -> Result<(), ReportError> {
    let snapshot = metrics.snapshot();
    let mut builder = Builder::default();

    builder.push_record(["Metric".to_string(), "Value".to_string()]);

    push_row(
        &mut builder,
        "Total before discount",
        snapshot.total_before_discount.to_string(),
    );
    push_row(
        &mut builder,
        "Total after discount",
        snapshot.total_after_discount.to_string(),
    );
    push_row(
        &mut builder,
        "Total discount amount",
        snapshot.total_discount_amount.to_string(),
    );
    push_row(
        &mut builder,
        "Average discount percentage",
        format!("{}%", snapshot.average_discount_percentage),
    );
    push_row(&mut builder, "Orders", metrics.total_orders().to_string());
    push_row(
        &mut builder,
        "Orders with discount",
        metrics.orders_with_discount().to_string(),
    );

    if rejected_orders > 0 {
        push_row(&mut builder, "Rejected orders", rejected_orders.to_string());
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..2), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

fn push_row(builder: &mut Builder, label: &str, value: String) {
    builder.push_record([label.to_string(), value]);
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn metrics() -> SalesMetrics {
        SalesMetrics::new(
            Decimal::new(5000, 2),
            Decimal::new(4200, 2),
            Decimal::new(800, 2),
            1,
            2,
            Decimal::new(1600, 2),
        )
    }

    #[test]
    fn json_report_uses_two_space_indent() -> TestResult {
        let mut out = Vec::new();

        write_json(&mut out, &metrics())?;

        assert_eq!(
            String::from_utf8(out)?,
            concat!(
                "{\n",
                "  \"Total before discount\": 50.0,\n",
                "  \"Total after discount\": 42.0,\n",
                "  \"Total discount amount\": 8.0,\n",
                "  \"Average discount percentage\": 16.0\n",
                "}\n",
            )
        );

        Ok(())
    }

    #[test]
    fn table_report_lists_metrics_and_counts() -> TestResult {
        let mut out = Vec::new();

        write_table(&mut out, &metrics(), 0)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Total before discount"));
        assert!(rendered.contains("50.00"));
        assert!(rendered.contains("16.00%"));
        assert!(rendered.contains("Orders with discount"));
        assert!(!rendered.contains("Rejected orders"));

        Ok(())
    }

    #[test]
    fn table_report_lists_rejected_orders() -> TestResult {
        let mut out = Vec::new();

        write_table(&mut out, &metrics(), 3)?;

        assert!(String::from_utf8(out)?.contains("Rejected orders"));

        Ok(())
    }
}
