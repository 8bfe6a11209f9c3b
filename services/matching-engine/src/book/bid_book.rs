//! Bid (buy-side) order book
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! Uses BTreeMap so best-price lookup and iteration order are deterministic.

use std::collections::BTreeMap;
use types::errors::ClobResult;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::PriceLevel;

/// Bid (buy) side order book
///
/// Orders are sorted by price descending, so the highest bid is first.
/// At each price level, orders are maintained in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    /// Price levels keyed by price; iterated in reverse for best-first
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Insert an order into the bid book
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

    /// Remove an order from the bid book
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

    /// Get the best bid level (highest price)
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.levels.values().next_back()
    }

    /// Get mutable reference to the best bid level
    pub(crate) fn best_bid_level_mut(&mut self) -> Option<&mut PriceLevel> {
        self.levels.values_mut().next_back()
    }

    /// Level resting at exactly `price`
    pub fn level(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Levels best-first
    pub fn levels(&self) -> impl Iterator<Item = &PriceLevel> {
        self.levels.values().rev()
    }

    /// Get depth snapshot (top N non-empty price levels, highest first)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels()
            .filter(|level| level.total_quantity() > 0)
            .take(depth)
            .map(|level| (level.price(), level.total_quantity()))
            .collect()
    }

    /// Check if the bid book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
