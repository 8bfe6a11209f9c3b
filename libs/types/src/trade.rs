//! Trade execution types
//!
//! Trades are produced by matching, returned to the caller and settled against
//! the ledger. They are not stored.

use crate::errors::ClobError;
use crate::ids::{AccountId, OrderId, TradeId};
use crate::numeric::{notional, Amount, Price, Quantity};
use serde::{Deserialize, Serialize};

/// A single execution between a taker and a resting maker
///
/// `buyer_account_id` is always the buy-side party, whether it was the taker or
/// the maker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: TradeId,
    pub taker_order_id: OrderId,
    pub maker_order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
    pub buyer_account_id: AccountId,
    pub seller_account_id: AccountId,
    pub executed_at: i64, // Unix nanos
}

impl Trade {
    pub fn new(
        taker_order_id: OrderId,
        maker_order_id: OrderId,
        price: Price,
        quantity: Quantity,
        buyer_account_id: AccountId,
        seller_account_id: AccountId,
        executed_at: i64,
    ) -> Self {
        Self {
            trade_id: TradeId::new(),
            taker_order_id,
            maker_order_id,
            price,
            quantity,
            buyer_account_id,
            seller_account_id,
            executed_at,
        }
    }

    /// Quote value exchanged (price × quantity)
    pub fn notional(&self) -> Result<Amount, ClobError> {
        notional(self.price, self.quantity)
    }

    /// Buyer and seller are the same account
    pub fn is_self_trade(&self) -> bool {
        self.buyer_account_id == self.seller_account_id
    }
}

/// Ordered list of trades produced by one matching pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeReport {
    pub trades: Vec<Trade>,
}

impl TradeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// Sum of executed quantity
    pub fn total_quantity(&self) -> Quantity {
        self.trades.iter().map(|t| t.quantity).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trade> {
        self.trades.iter()
    }
}

impl<'a> IntoIterator for &'a TradeReport {
    type Item = &'a Trade;
    type IntoIter = std::slice::Iter<'a, Trade>;

    fn into_iter(self) -> Self::IntoIter {
        self.trades.iter()
    }
}
