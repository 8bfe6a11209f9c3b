//! Types library for the central limit order book
//!
//! Core type definitions shared by the matching engine and the gateway.
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId, TradeId, AccountId) and `Instrument`
//! - `numeric`: Fixed-point integer prices, quantities and amounts
//! - `order`: Limit orders and sides
//! - `trade`: Executions and trade reports
//! - `account`: Accounts and the available/reserved escrow ledger
//! - `clock`: Injected time source
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;
pub mod account;
pub mod clock;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::trade::*;
    pub use crate::account::*;
    pub use crate::clock::*;
    pub use crate::errors::*;
}
