//! Result sinks: console report and JSON output.

use std::fmt::Write as _;

use restock_orchestrator::{OrderSink, PlanRun};
use restock_planner::sort_by_days_ascending;

/// Render the text report for one run.
///
/// Metrics are listed ascending by days of stock (no-demand items, shown as
/// `∞`, last), followed by warehouse usage and the recommended orders.
pub fn render(run: &PlanRun) -> String {
    let mut out = String::new();
    let mut metrics = run.metrics.clone();
    sort_by_days_ascending(&mut metrics);

    let _ = writeln!(out, "=== Stock Optimization Results ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "Current stock metrics:");
    for metric in &metrics {
        let days = if metric.days_of_stock.is_infinite() {
            "∞".to_string()
        } else {
            format!("{:.1}", metric.days_of_stock)
        };
        let _ = writeln!(
            out,
            "  {}: {} stock, {} sold/day, {} days",
            metric.name, metric.total_stock, metric.sold_today, days
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Warehouse: {}/{} ({} free)",
        run.total_stock, run.warehouse_capacity, run.free_capacity
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Recommended orders:");
    if run.plan.has_orders() {
        for (name, quantity) in run.plan.iter() {
            if quantity > 0 {
                let _ = writeln!(out, "  {}: {} units", name, quantity);
            }
        }
    } else {
        let _ = writeln!(out, "  no orders needed - all items adequately stocked");
    }

    out
}

/// Prints the text report to stdout.
#[derive(Debug, Default)]
pub struct ConsoleOrderSink;

impl OrderSink for ConsoleOrderSink {
    fn deliver(&self, run: &PlanRun) -> anyhow::Result<()> {
        print!("{}", render(run));
        Ok(())
    }
}

/// Emits the full run as pretty-printed JSON, for piping into another
/// system.
#[derive(Debug, Default)]
pub struct JsonOrderSink;

impl OrderSink for JsonOrderSink {
    fn deliver(&self, run: &PlanRun) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(run)?);
        Ok(())
    }
}
