use restock_core::{DomainError, DomainResult};

/// Stock position of a single tracked item.
///
/// Quantities are unsigned by construction; the daily consumption rate is
/// validated to be finite and non-negative. An item with zero consumption is
/// a valid state (no measured demand), it is just never *eligible* for
/// ordering.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ItemState {
    on_hand: u64,
    inbound: u64,
    daily_consumption: f64,
}

impl ItemState {
    pub fn new(on_hand: u64, inbound: u64, daily_consumption: f64) -> DomainResult<Self> {
        if !daily_consumption.is_finite() {
            return Err(DomainError::validation(
                "daily consumption must be a finite number",
            ));
        }
        if daily_consumption < 0.0 {
            return Err(DomainError::validation(
                "daily consumption cannot be negative",
            ));
        }
        Ok(Self {
            on_hand,
            inbound,
            daily_consumption,
        })
    }

    /// Quantity currently held.
    pub fn on_hand(&self) -> u64 {
        self.on_hand
    }

    /// Quantity already ordered but not yet received.
    pub fn inbound(&self) -> u64 {
        self.inbound
    }

    /// Units consumed per day. May be zero.
    pub fn daily_consumption(&self) -> f64 {
        self.daily_consumption
    }

    /// On-hand plus inbound stock.
    pub fn effective_stock(&self) -> u64 {
        self.on_hand.saturating_add(self.inbound)
    }

    /// Only items with strictly positive consumption can receive an order.
    pub fn is_eligible(&self) -> bool {
        self.daily_consumption > 0.0
    }
}

/// A named entry in a stock snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct StockItem {
    name: String,
    state: ItemState,
}

impl StockItem {
    pub fn new(name: impl Into<String>, state: ItemState) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self { name, state })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &ItemState {
        &self.state
    }
}
