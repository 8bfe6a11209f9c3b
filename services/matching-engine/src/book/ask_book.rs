//! Ask (sell-side) order book
//!
//! Maintains sell orders sorted by price ascending (best ask first).
//! Uses BTreeMap so best-price lookup and iteration order are deterministic.

use std::collections::BTreeMap;
use types::errors::ClobResult;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::PriceLevel;

/// Ask (sell) side order book
///
/// Orders are sorted by price ascending, so the lowest ask is first.
/// At each price level, orders are maintained in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    /// Price levels sorted ascending (lowest price first)
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    /// Create a new empty ask book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Insert an order into the ask book
    ///
    /// A level created for a rejected order is dropped again.
    pub fn insert(&mut self, order: Order) -> ClobResult<()> {
        let price = order.price;
        let inserted = self
            .levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .insert(order);
        if inserted.is_err() {
            self.prune(price);
        }
        inserted
    }

    /// Remove an order from the ask book
    ///
    /// Returns the removed order; None if it was not resting here
    pub fn remove(&mut self, order_id: &OrderId, price: Price) -> Option<Order> {
        let level = self.levels.get_mut(&price)?;
        let removed = level.remove(order_id);
        self.prune(price);
        removed
    }

    /// Drop the level at `price` if it has no orders left
    pub(crate) fn prune(&mut self, price: Price) {
        if self.levels.get(&price).is_some_and(PriceLevel::is_empty) {
            self.levels.remove(&price);
        }
    }

    /// Get the best ask level (lowest price)
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.levels.values().next()
    }

    /// Get mutable reference to the best ask level
    pub(crate) fn best_ask_level_mut(&mut self) -> Option<&mut PriceLevel> {
        self.levels.values_mut().next()
    }

    /// Level resting at exactly `price`
    pub fn level(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Levels best-first
    pub fn levels(&self) -> impl Iterator<Item = &PriceLevel> {
        self.levels.values()
    }

    /// Get depth snapshot (top N non-empty price levels, lowest first)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels()
            .filter(|level| level.total_quantity() > 0)
            .take(depth)
            .map(|level| (level.price(), level.total_quantity()))
            .collect()
    }

    /// Check if the ask book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
