use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Computed order quantities, keyed by item name.
///
/// Keys are a subset of the *eligible* item names from the input snapshot
/// (items with zero consumption never appear); quantities are whole units
/// and their sum never exceeds the free-capacity budget the plan was
/// computed against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderPlan {
    orders: BTreeMap<String, u64>,
}

impl OrderPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantity(&self, name: &str) -> Option<u64> {
        self.orders.get(name).copied()
    }

    pub fn total_units(&self) -> u64 {
        self.orders.values().fold(0u64, |acc, q| acc.saturating_add(*q))
    }

    /// True when at least one item receives a strictly positive quantity.
    pub fn has_orders(&self) -> bool {
        self.orders.values().any(|q| *q > 0)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.orders.iter().map(|(name, q)| (name.as_str(), *q))
    }

    pub(crate) fn set(&mut self, name: &str, quantity: u64) {
        self.orders.insert(name.to_string(), quantity);
    }

    pub(crate) fn grant_one(&mut self, name: &str) {
        if let Some(q) = self.orders.get_mut(name) {
            *q = q.saturating_add(1);
        }
    }
}

#[derive(Debug, Error)]
pub enum PlannerError {
    /// A job was configured with out-of-range parameters. The planning
    /// algorithms themselves are total over validated snapshots.
    #[error("invalid job configuration: {0}")]
    InvalidConfig(String),
}
