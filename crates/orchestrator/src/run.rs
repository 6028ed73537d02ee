use chrono::{DateTime, Utc};
use serde::Serialize;

use restock_core::RunId;
use restock_planner::{OrderPlan, StockMetric};

/// The stamped result of one optimization run.
///
/// Produced fresh per run; nothing here is retained across runs.
#[derive(Debug, Clone, Serialize)]
pub struct PlanRun {
    pub run_id: RunId,
    pub computed_at: DateTime<Utc>,
    /// Total warehouse capacity reported by the capacity provider.
    pub warehouse_capacity: u64,
    /// Sum of effective stock across all snapshot items.
    pub total_stock: u64,
    /// `max(0, warehouse_capacity - total_stock)`, the allocator's budget.
    pub free_capacity: u64,
    pub metrics: Vec<StockMetric>,
    pub plan: OrderPlan,
}
