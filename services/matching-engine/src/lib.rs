//! Matching Engine Service
//!
//! Central limit order book with an available/reserved escrow ledger.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - Execution at the resting order's price
//! - Conservation of quantity and of `available + reserved` per asset
//! - A failed request persists nothing

pub mod book;
pub mod matching;
pub mod settlement;
pub mod transfer;
pub mod batch;
pub mod repository;
pub mod memory;
pub mod locks;
pub mod engine;

pub use book::{Book, BookSnapshot, LevelView};
pub use engine::{Exchange, PlaceOrderRequest, PlacedOrder, TransferReceipt};
pub use repository::{AccountRepository, BookRepository, OrderRepository};
