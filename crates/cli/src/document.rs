//! On-disk snapshot document format.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use restock_core::{DomainError, DomainResult};
use restock_inventory::{ItemState, StockItem};

/// A stock snapshot as written by an exporter.
///
/// The `items` array is ordered; that order carries into the snapshot and
/// from there into the planner's tie-breaks.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotDocument {
    /// Total warehouse capacity in units. Optional; the provider falls back
    /// to a default with a warning when missing.
    #[serde(default)]
    pub capacity: Option<u64>,

    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

/// One raw item entry, not yet validated.
///
/// Numeric fields are deliberately loose (signed, defaulted): a malformed
/// entry must be skippable with a warning instead of failing the whole
/// document.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRecord {
    pub name: String,

    #[serde(default)]
    pub on_hand: i64,

    #[serde(default)]
    pub inbound: i64,

    #[serde(default)]
    pub daily_consumption: f64,
}

impl SnapshotDocument {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("malformed snapshot document")
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&raw)
    }
}

impl ItemRecord {
    /// Validate this record into a domain item.
    pub fn to_stock_item(&self) -> DomainResult<StockItem> {
        let on_hand = u64::try_from(self.on_hand)
            .map_err(|_| DomainError::validation("on_hand cannot be negative"))?;
        let inbound = u64::try_from(self.inbound)
            .map_err(|_| DomainError::validation("inbound cannot be negative"))?;
        let state = ItemState::new(on_hand, inbound, self.daily_consumption)?;
        StockItem::new(self.name.clone(), state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ordered_items_and_capacity() {
        let doc = SnapshotDocument::parse(
            r#"{
                "capacity": 1000,
                "items": [
                    {"name": "Flour", "on_hand": 10, "inbound": 2, "daily_consumption": 5},
                    {"name": "Sugar", "daily_consumption": 1.5}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.capacity, Some(1000));
        assert_eq!(doc.items.len(), 2);
        assert_eq!(doc.items[0].name, "Flour");
        // Missing quantities default to zero, like an empty cell.
        assert_eq!(doc.items[1].on_hand, 0);
    }

    #[test]
    fn negative_quantities_fail_item_validation() {
        let doc = SnapshotDocument::parse(
            r#"{"items": [{"name": "Flour", "on_hand": -3, "daily_consumption": 5}]}"#,
        )
        .unwrap();
        assert!(doc.items[0].to_stock_item().is_err());
    }

    #[test]
    fn valid_record_becomes_a_stock_item() {
        let record = ItemRecord {
            name: "Flour".to_string(),
            on_hand: 10,
            inbound: 2,
            daily_consumption: 5.0,
        };
        let item = record.to_stock_item().unwrap();
        assert_eq!(item.state().effective_stock(), 12);
    }
}
