//! Trade execution logic
//!
//! Turns one taker/maker crossing into a `Trade`: execution price is the
//! maker's, buyer and seller follow the taker's side.

use std::sync::Arc;
use types::clock::Clock;
use types::numeric::Quantity;
use types::order::{Order, Side};
use types::trade::Trade;

/// Match executor for handling trade generation
#[derive(Clone)]
pub struct MatchExecutor {
    clock: Arc<dyn Clock>,
}

impl MatchExecutor {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Execute a trade between a taker and the maker it crossed
    ///
    /// The caller guarantees `0 < quantity <= min(taker.remaining, maker.remaining)`.
    pub fn execute_trade(&self, taker: &Order, maker: &Order, quantity: Quantity) -> Trade {
        debug_assert!(quantity > 0, "zero-quantity trade");

        let (buyer, seller) = match taker.side {
            Side::BUY => (taker.account_id, maker.account_id),
            Side::SELL => (maker.account_id, taker.account_id),
        };

        Trade::new(
            taker.order_id,
            maker.order_id,
            maker.price,
            quantity,
            buyer,
            seller,
            self.clock.now_nanos(),
        )
    }
}

impl std::fmt::Debug for MatchExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchExecutor").finish_non_exhaustive()
    }
}
