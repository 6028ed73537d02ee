//! Document-backed provider implementations.

use std::path::Path;

use tracing::warn;

use restock_inventory::{StockItem, StockSnapshot};
use restock_orchestrator::{CapacityProvider, StockProvider};

use crate::document::SnapshotDocument;

/// Capacity assumed when the snapshot document does not carry one.
pub const DEFAULT_CAPACITY: u64 = 500_000;

/// Serves both the stock snapshot and the warehouse capacity from one
/// parsed document, so a run sees a single consistent read.
#[derive(Debug, Clone)]
pub struct DocumentProvider {
    document: SnapshotDocument,
}

impl DocumentProvider {
    pub fn new(document: SnapshotDocument) -> Self {
        Self { document }
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        Ok(Self::new(SnapshotDocument::from_path(path)?))
    }
}

impl StockProvider for DocumentProvider {
    fn stock_snapshot(&self) -> anyhow::Result<StockSnapshot> {
        let mut items: Vec<StockItem> = Vec::with_capacity(self.document.items.len());
        for record in &self.document.items {
            match record.to_stock_item() {
                Ok(item) => items.push(item),
                Err(e) => {
                    warn!(item = %record.name, error = %e, "skipping malformed stock entry");
                }
            }
        }
        Ok(StockSnapshot::new(items)?)
    }
}

impl CapacityProvider for DocumentProvider {
    fn warehouse_capacity(&self) -> anyhow::Result<u64> {
        match self.document.capacity {
            Some(capacity) => Ok(capacity),
            None => {
                warn!(
                    default = DEFAULT_CAPACITY,
                    "capacity missing from snapshot document; using default"
                );
                Ok(DEFAULT_CAPACITY)
            }
        }
    }
}
