use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use restock_core::RunId;
use restock_planner::{AllocationJob, MetricsJob, PlannerError, PlannerJob};

use crate::providers::{CapacityProvider, InsightSink, OrderSink, StockProvider};
use crate::run::PlanRun;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("failed to read stock snapshot: {0}")]
    Snapshot(#[source] anyhow::Error),

    #[error("failed to read warehouse capacity: {0}")]
    Capacity(#[source] anyhow::Error),

    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error("failed to deliver order plan: {0}")]
    Delivery(#[source] anyhow::Error),
}

/// Wires providers, the planning core, and sinks into one linear pass.
///
/// One `run` is atomic with respect to the external data source: the
/// snapshot is read once and both planner jobs consume that same immutable
/// read. Neither job blocks, retries, or times out; a host wanting a
/// cadence wraps `run` itself.
pub struct Orchestrator {
    stock: Arc<dyn StockProvider>,
    capacity: Arc<dyn CapacityProvider>,
    orders: Arc<dyn OrderSink>,
    insights: Option<Arc<dyn InsightSink>>,
}

impl Orchestrator {
    pub fn new(
        stock: Arc<dyn StockProvider>,
        capacity: Arc<dyn CapacityProvider>,
        orders: Arc<dyn OrderSink>,
    ) -> Self {
        Self {
            stock,
            capacity,
            orders,
            insights: None,
        }
    }

    /// Attach an optional diagnostics consumer.
    pub fn with_insight_sink(mut self, sink: Arc<dyn InsightSink>) -> Self {
        self.insights = Some(sink);
        self
    }

    /// Execute one optimization run: read the snapshot and capacity, run
    /// both planner jobs, hand the stamped result to the sinks. Sequencing
    /// only; every decision lives in the planner.
    pub fn run(&self) -> Result<PlanRun, OrchestratorError> {
        let snapshot = self
            .stock
            .stock_snapshot()
            .map_err(OrchestratorError::Snapshot)?;
        let warehouse_capacity = self
            .capacity
            .warehouse_capacity()
            .map_err(OrchestratorError::Capacity)?;

        let total_stock = snapshot.total_effective_stock();
        let free_capacity = warehouse_capacity.saturating_sub(total_stock);

        // The two jobs are independent computations over the same snapshot.
        let metrics = MetricsJob::new(snapshot.clone()).run()?;
        let plan = AllocationJob::new(snapshot, free_capacity).run()?;

        let run = PlanRun {
            run_id: RunId::new(),
            computed_at: Utc::now(),
            warehouse_capacity,
            total_stock,
            free_capacity,
            metrics,
            plan,
        };

        info!(
            run_id = %run.run_id,
            items = run.metrics.len(),
            total_stock,
            free_capacity,
            ordered_units = run.plan.total_units(),
            "order plan computed"
        );

        if let Some(sink) = &self.insights {
            sink.emit(&run);
        }
        self.orders
            .deliver(&run)
            .map_err(OrchestratorError::Delivery)?;

        Ok(run)
    }
}
