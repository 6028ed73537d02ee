use serde::{Deserialize, Serialize};

use restock_inventory::{StockItem, StockSnapshot};

use crate::job::PlannerJob;
use crate::plan::PlannerError;

/// Days-of-stock figure for a single item.
///
/// This is a reporting/diagnostics payload, not a domain event. It is
/// produced fresh per run and never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMetric {
    pub name: String,
    /// On-hand plus inbound stock.
    pub total_stock: u64,
    pub sold_today: f64,
    /// `f64::INFINITY` when the item has no measured demand.
    pub days_of_stock: f64,
}

impl StockMetric {
    fn for_item(item: &StockItem) -> Self {
        let total_stock = item.state().effective_stock();
        let sold_today = item.state().daily_consumption();
        let days_of_stock = if sold_today == 0.0 {
            f64::INFINITY
        } else {
            total_stock as f64 / sold_today
        };
        Self {
            name: item.name().to_string(),
            total_stock,
            sold_today,
            days_of_stock,
        }
    }
}

/// Computes the days-of-stock metric for every item in a snapshot,
/// ineligible items included.
///
/// Output order follows the snapshot; display callers sort with
/// [`sort_by_days_ascending`]. No clamping, no rounding. Total over any
/// validated snapshot; `run` never fails.
#[derive(Debug, Clone)]
pub struct MetricsJob {
    snapshot: StockSnapshot,
}

impl MetricsJob {
    pub fn new(snapshot: StockSnapshot) -> Self {
        Self { snapshot }
    }
}

impl PlannerJob for MetricsJob {
    type Input = StockSnapshot;
    type Output = Vec<StockMetric>;

    fn input(&self) -> &StockSnapshot {
        &self.snapshot
    }

    fn run(&self) -> Result<Vec<StockMetric>, PlannerError> {
        Ok(self
            .snapshot
            .items()
            .iter()
            .map(StockMetric::for_item)
            .collect())
    }
}

/// Sort metrics ascending by days of stock; items with no demand (infinite
/// days) sort last.
pub fn sort_by_days_ascending(metrics: &mut [StockMetric]) {
    metrics.sort_by(|a, b| a.days_of_stock.total_cmp(&b.days_of_stock));
}

#[cfg(test)]
mod tests {
    use super::*;
    use restock_inventory::ItemState;

    fn snapshot(entries: &[(&str, u64, u64, f64)]) -> StockSnapshot {
        let items = entries
            .iter()
            .map(|(name, on_hand, inbound, sold)| {
                StockItem::new(*name, ItemState::new(*on_hand, *inbound, *sold).unwrap()).unwrap()
            })
            .collect();
        StockSnapshot::new(items).unwrap()
    }

    #[test]
    fn zero_demand_yields_infinite_days() {
        let metrics = MetricsJob::new(snapshot(&[("A", 10, 5, 0.0)])).run().unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].total_stock, 15);
        assert_eq!(metrics[0].days_of_stock, f64::INFINITY);
    }

    #[test]
    fn days_of_stock_is_exact_division() {
        let metrics = MetricsJob::new(snapshot(&[("B", 10, 0, 5.0)])).run().unwrap();
        assert_eq!(metrics[0].days_of_stock, 2.0);
        assert_eq!(metrics[0].sold_today, 5.0);
    }

    #[test]
    fn empty_snapshot_yields_empty_metrics() {
        let metrics = MetricsJob::new(snapshot(&[])).run().unwrap();
        assert!(metrics.is_empty());
    }

    #[test]
    fn fractional_days_are_not_rounded() {
        let metrics = MetricsJob::new(snapshot(&[("C", 7, 0, 2.0)])).run().unwrap();
        assert_eq!(metrics[0].days_of_stock, 3.5);
    }

    #[test]
    fn display_sort_puts_infinite_days_last() {
        let mut metrics = MetricsJob::new(snapshot(&[
            ("Idle", 10, 0, 0.0),
            ("Fast", 10, 0, 10.0),
            ("Slow", 10, 0, 1.0),
        ]))
        .run()
        .unwrap();
        sort_by_days_ascending(&mut metrics);
        let names: Vec<&str> = metrics.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Fast", "Slow", "Idle"]);
    }
}
