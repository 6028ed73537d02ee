//! External collaborator seams.
//!
//! Providers and sinks are the system's only contact with the outside
//! world. They are arbitrary (a page scrape, a database read, a file), so
//! their failures cross the boundary as `anyhow::Error`; the orchestrator
//! wraps them into its own typed error.

use std::sync::Mutex;

use restock_inventory::StockSnapshot;

use crate::run::PlanRun;

/// Yields the current stock snapshot.
///
/// Implementations must reject or omit entries that cannot be parsed into
/// non-negative numeric fields; the planning core does not re-validate.
pub trait StockProvider: Send + Sync {
    fn stock_snapshot(&self) -> anyhow::Result<StockSnapshot>;
}

/// Yields the total warehouse capacity, in units.
pub trait CapacityProvider: Send + Sync {
    fn warehouse_capacity(&self) -> anyhow::Result<u64>;
}

/// Receives the computed plan for application (display, persistence,
/// write-back into another system).
pub trait OrderSink: Send + Sync {
    fn deliver(&self, run: &PlanRun) -> anyhow::Result<()>;
}

/// Receives runs purely for observability.
///
/// This is intentionally separate from plan delivery: insights never feed
/// back into the optimizer.
pub trait InsightSink: Send + Sync {
    fn emit(&self, run: &PlanRun);
}

/// Fixed-snapshot provider for tests/dev.
#[derive(Debug, Clone)]
pub struct InMemoryStockProvider {
    snapshot: StockSnapshot,
}

impl InMemoryStockProvider {
    pub fn new(snapshot: StockSnapshot) -> Self {
        Self { snapshot }
    }
}

impl StockProvider for InMemoryStockProvider {
    fn stock_snapshot(&self) -> anyhow::Result<StockSnapshot> {
        Ok(self.snapshot.clone())
    }
}

/// Fixed-capacity provider for tests/dev.
#[derive(Debug, Copy, Clone)]
pub struct InMemoryCapacityProvider {
    capacity: u64,
}

impl InMemoryCapacityProvider {
    pub fn new(capacity: u64) -> Self {
        Self { capacity }
    }
}

impl CapacityProvider for InMemoryCapacityProvider {
    fn warehouse_capacity(&self) -> anyhow::Result<u64> {
        Ok(self.capacity)
    }
}

/// In-memory order sink for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryOrderSink {
    inner: Mutex<Vec<PlanRun>>,
}

impl InMemoryOrderSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<PlanRun> {
        self.inner.lock().unwrap().clone()
    }
}

impl OrderSink for InMemoryOrderSink {
    fn deliver(&self, run: &PlanRun) -> anyhow::Result<()> {
        self.inner.lock().unwrap().push(run.clone());
        Ok(())
    }
}

/// In-memory insight sink for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryInsightSink {
    inner: Mutex<Vec<PlanRun>>,
}

impl InMemoryInsightSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<PlanRun> {
        self.inner.lock().unwrap().clone()
    }
}

impl InsightSink for InMemoryInsightSink {
    fn emit(&self, run: &PlanRun) {
        self.inner.lock().unwrap().push(run.clone());
    }
}
