use chrono::{DateTime, Utc};
use std::collections::HashSet;

use restock_core::{DomainError, DomainResult};

use crate::item::StockItem;

/// One immutable read of the warehouse state.
///
/// Items are kept as an explicit ordered sequence rather than a hash map:
/// the planner's rounding-shortfall attribution and leftover tie-breaks are
/// defined in terms of snapshot order, so ordering is load-bearing.
#[derive(Debug, Clone, PartialEq)]
pub struct StockSnapshot {
    items: Vec<StockItem>,
    taken_at: DateTime<Utc>,
}

impl StockSnapshot {
    /// Build a snapshot from an ordered list of items.
    ///
    /// Item names are the keys of the eventual order plan and must be unique.
    pub fn new(items: Vec<StockItem>) -> DomainResult<Self> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.name()) {
                return Err(DomainError::invariant(format!(
                    "duplicate item name: {}",
                    item.name()
                )));
            }
        }
        Ok(Self {
            items,
            taken_at: Utc::now(),
        })
    }

    pub fn items(&self) -> &[StockItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// When this snapshot was captured.
    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    /// Sum of effective stock over all items (eligible or not).
    pub fn total_effective_stock(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.state().effective_stock()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemState;

    fn item(name: &str, on_hand: u64, inbound: u64, sold: f64) -> StockItem {
        StockItem::new(name, ItemState::new(on_hand, inbound, sold).unwrap()).unwrap()
    }

    #[test]
    fn empty_snapshot_is_valid() {
        let snapshot = StockSnapshot::new(Vec::new()).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.total_effective_stock(), 0);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = StockSnapshot::new(vec![
            item("Flour", 10, 0, 1.0),
            item("Flour", 3, 0, 2.0),
        ])
        .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn preserves_insertion_order() {
        let snapshot = StockSnapshot::new(vec![
            item("Sugar", 1, 0, 1.0),
            item("Flour", 2, 0, 1.0),
            item("Salt", 3, 0, 1.0),
        ])
        .unwrap();
        let names: Vec<&str> = snapshot.items().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["Sugar", "Flour", "Salt"]);
    }

    #[test]
    fn totals_include_inbound_and_ineligible_items() {
        let snapshot = StockSnapshot::new(vec![
            item("Sugar", 10, 5, 2.0),
            item("Dust", 7, 0, 0.0),
        ])
        .unwrap();
        assert_eq!(snapshot.total_effective_stock(), 22);
    }
}
