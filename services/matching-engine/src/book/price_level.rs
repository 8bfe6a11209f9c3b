//! Price level implementation with FIFO queue
//!
//! A price level contains all resting orders at a specific price point.
//! Orders are maintained in FIFO (First-In-First-Out) order to enforce
//! time priority.

use std::collections::VecDeque;
use types::errors::{ClobError, ClobResult};
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Order;

/// A price level containing resting orders at a specific price
///
/// The level owns its orders. `total_quantity` always equals the sum of
/// `remaining` over the queue.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Price,
    /// Queue of orders at this price level (FIFO order)
    orders: VecDeque<Order>,
    /// Total open quantity at this level
    total_quantity: Quantity,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: Price) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
            total_quantity: 0,
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Append an order at the back of the queue (time priority)
    ///
    /// Fails without touching the level if the open total would overflow.
    pub fn insert(&mut self, order: Order) -> ClobResult<()> {
        debug_assert_eq!(order.price, self.price, "order inserted at foreign price level");
        self.total_quantity = self
            .total_quantity
            .checked_add(order.remaining)
            .ok_or_else(|| {
                ClobError::invalid_parameter(format!(
                    "open quantity at price {} would overflow",
                    self.price
                ))
            })?;
        self.orders.push_back(order);
        Ok(())
    }

    /// Remove an order from the queue by id
    ///
    /// Returns the removed order, or None if it is not queued here
    pub fn remove(&mut self, order_id: &OrderId) -> Option<Order> {
        let position = self.orders.iter().position(|order| &order.order_id == order_id)?;
        let order = self.orders.remove(position)?;
        self.total_quantity -= order.remaining;
        Some(order)
    }

    /// Peek at the front order without removing it
    pub fn peek_front(&self) -> Option<&Order> {
        self.orders.front()
    }

    /// Fill the front order by `quantity`
    ///
    /// Returns the order's state after the fill. A fully filled order leaves
    /// the queue; a partially filled one keeps its place at the head.
    ///
    /// # Panics
    /// Panics if `quantity` exceeds the front order's remaining quantity
    pub fn fill_front(&mut self, quantity: Quantity) -> Option<Order> {
        let front = self.orders.front_mut()?;
        front.fill(quantity);
        self.total_quantity -= quantity;

        if front.is_filled() {
            self.orders.pop_front()
        } else {
            Some(front.clone())
        }
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total open quantity at this price level
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Orders in time priority
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// `total_quantity` matches the queue
    pub fn check_invariant(&self) -> bool {
        self.total_quantity == self.orders.iter().map(|o| o.remaining).sum::<Quantity>()
    }
}
