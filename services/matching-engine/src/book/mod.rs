//! Order book infrastructure module
//!
//! Contains price levels, bid book, ask book and the per-instrument `Book`
//! that pairs them.

pub mod price_level;
pub mod bid_book;
pub mod ask_book;

pub use price_level::PriceLevel;
pub use bid_book::BidBook;
pub use ask_book::AskBook;

use serde::Serialize;
use types::errors::ClobResult;
use types::ids::Instrument;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

/// Order book for a single instrument
#[derive(Debug, Clone)]
pub struct Book {
    instrument: Instrument,
    bids: BidBook,
    asks: AskBook,
}

impl Book {
    /// Create an empty book
    pub fn new(instrument: Instrument) -> Self {
        Self {
            instrument,
            bids: BidBook::new(),
            asks: AskBook::new(),
        }
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// Rest an order at the tail of its price level
    pub fn add_order(&mut self, order: Order) -> ClobResult<()> {
        match order.side {
            Side::BUY => self.bids.insert(order),
            Side::SELL => self.asks.insert(order),
        }
    }

    /// Remove a resting order
    ///
    /// Idempotent: removing an order that is not resting leaves the book unchanged.
    pub fn remove_order(&mut self, order: &Order) -> Option<Order> {
        match order.side {
            Side::BUY => self.bids.remove(&order.order_id, order.price),
            Side::SELL => self.asks.remove(&order.order_id, order.price),
        }
    }

    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.best_bid()
    }

    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.best_ask()
    }

    pub fn bids(&self) -> &BidBook {
        &self.bids
    }

    pub fn asks(&self) -> &AskBook {
        &self.asks
    }

    /// Best level an incoming order on `taker_side` would trade against
    pub(crate) fn best_opposite_level_mut(&mut self, taker_side: Side) -> Option<&mut PriceLevel> {
        match taker_side {
            Side::BUY => self.asks.best_ask_level_mut(),
            Side::SELL => self.bids.best_bid_level_mut(),
        }
    }

    /// Drop an emptied level on `side`
    pub(crate) fn prune_level(&mut self, side: Side, price: Price) {
        match side {
            Side::BUY => self.bids.prune(price),
            Side::SELL => self.asks.prune(price),
        }
    }

    /// Whether `order` is currently resting in the book
    pub fn contains(&self, order: &Order) -> bool {
        let level = match order.side {
            Side::BUY => self.bids.level(order.price),
            Side::SELL => self.asks.level(order.price),
        };
        level.is_some_and(|level| level.iter().any(|o| o.order_id == order.order_id))
    }

    /// Total number of resting orders
    pub fn order_count(&self) -> usize {
        self.bids.levels().map(PriceLevel::order_count).sum::<usize>()
            + self.asks.levels().map(PriceLevel::order_count).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Aggregated depth of both sides, best-first, zero levels omitted
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            instrument: self.instrument.clone(),
            bids: self.bids.depth_snapshot(usize::MAX).into_iter().map(LevelView::from).collect(),
            asks: self.asks.depth_snapshot(usize::MAX).into_iter().map(LevelView::from).collect(),
        }
    }
}

/// One aggregated price level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelView {
    pub price: Price,
    pub qty: Quantity,
}

impl From<(Price, Quantity)> for LevelView {
    fn from((price, qty): (Price, Quantity)) -> Self {
        Self { price, qty }
    }
}

/// Order book snapshot for market data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSnapshot {
    pub instrument: Instrument,
    pub bids: Vec<LevelView>,
    pub asks: Vec<LevelView>,
}
