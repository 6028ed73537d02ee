//! `restock-orchestrator`
//!
//! **Responsibility:** sequencing one optimization run.
//!
//! The orchestrator owns no decision logic. It reads a stock snapshot and a
//! warehouse capacity from external providers, floors the free-capacity
//! budget at zero, runs the two planner jobs over the same snapshot, and
//! hands the stamped [`PlanRun`] to the configured sinks. External
//! collaborators live behind object-safe traits; in-memory implementations
//! ship here for tests/dev.

pub mod orchestrator;
pub mod providers;
pub mod run;

pub use orchestrator::{Orchestrator, OrchestratorError};
pub use providers::{
    CapacityProvider, InMemoryCapacityProvider, InMemoryInsightSink, InMemoryOrderSink,
    InMemoryStockProvider, InsightSink, OrderSink, StockProvider,
};
pub use run::PlanRun;
