//! Order types
//!
//! An order is immutable after creation except for `remaining`, which only
//! matching (`fill`) and cancellation (`close`) may change.

use crate::errors::OrderError;
use crate::ids::{AccountId, Instrument, OrderId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::BUY => "buy",
            Side::SELL => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = OrderError;

    /// Accepts "buy" or "sell" in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::BUY),
            "sell" => Ok(Side::SELL),
            _ => Err(OrderError::InvalidSide(s.to_string())),
        }
    }
}

/// Limit order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub account_id: AccountId,
    pub instrument: Instrument,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    pub remaining: Quantity,
    pub created_at: i64, // Unix nanos
}

impl Order {
    /// Create a new order with the full quantity open
    pub fn new(
        account_id: AccountId,
        instrument: Instrument,
        side: Side,
        price: Price,
        quantity: Quantity,
        timestamp: i64,
    ) -> Result<Self, OrderError> {
        Self::with_remaining(account_id, instrument, side, price, quantity, quantity, timestamp)
    }

    /// Create an order with an explicit open quantity
    ///
    /// Requires price > 0, quantity > 0 and 0 <= remaining <= quantity.
    pub fn with_remaining(
        account_id: AccountId,
        instrument: Instrument,
        side: Side,
        price: Price,
        quantity: Quantity,
        remaining: Quantity,
        timestamp: i64,
    ) -> Result<Self, OrderError> {
        if price <= 0 {
            return Err(OrderError::InvalidOrder(format!("price must be positive, got {price}")));
        }
        if quantity <= 0 {
            return Err(OrderError::InvalidOrder(format!(
                "quantity must be positive, got {quantity}"
            )));
        }
        if remaining < 0 || remaining > quantity {
            return Err(OrderError::InvalidOrder(format!(
                "remaining {remaining} outside 0..={quantity}"
            )));
        }

        Ok(Self {
            order_id: OrderId::new(),
            account_id,
            instrument,
            side,
            price,
            quantity,
            remaining,
            created_at: timestamp,
        })
    }

    /// Check quantity invariant: 0 <= remaining <= quantity
    pub fn check_invariant(&self) -> bool {
        self.remaining >= 0 && self.remaining <= self.quantity
    }

    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    pub fn filled_quantity(&self) -> Quantity {
        self.quantity - self.remaining
    }

    /// Record an execution against this order
    ///
    /// # Panics
    /// Panics if the fill is not positive or exceeds the open quantity
    pub fn fill(&mut self, quantity: Quantity) {
        assert!(quantity > 0, "Fill quantity must be positive");
        assert!(quantity <= self.remaining, "Fill would exceed remaining quantity");

        self.remaining -= quantity;
    }

    /// Force the open quantity to zero (cancellation)
    pub fn close(&mut self) {
        self.remaining = 0;
    }
}
