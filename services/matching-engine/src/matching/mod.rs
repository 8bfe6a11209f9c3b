//! Matching logic module
//!
//! Implements the price-time priority matching algorithm: an incoming order
//! sweeps the opposite side best level first, FIFO within a level, and any
//! unfilled remainder rests at its own limit.

pub mod crossing;
pub mod executor;

pub use crossing::{can_match, incoming_can_match};
pub use executor::MatchExecutor;

use tracing::debug;
use types::errors::ClobResult;
use types::order::Order;
use types::trade::TradeReport;

use crate::book::Book;

/// Result of running one taker through a book
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    /// Trades in execution order
    pub report: TradeReport,
    /// Post-fill state of every maker touched, in execution order
    pub makers: Vec<Order>,
}

/// Match `taker` against `book`, then rest any remainder
///
/// Mutates both the book and `taker.remaining`. Never emits a zero-quantity
/// trade; a taker that arrives with nothing open is neither matched nor rested.
/// Fails if the remainder cannot rest because its level's open total would
/// overflow; the book may then hold partial fills and must be discarded.
pub fn match_order(
    book: &mut Book,
    taker: &mut Order,
    executor: &MatchExecutor,
) -> ClobResult<MatchOutcome> {
    let mut outcome = MatchOutcome::default();

    while taker.remaining > 0 {
        let Some(level) = book.best_opposite_level_mut(taker.side) else {
            break;
        };
        let level_price = level.price();
        if !incoming_can_match(taker.side, taker.price, level_price) {
            break;
        }

        let Some(maker) = level.peek_front() else {
            break;
        };
        let quantity = taker.remaining.min(maker.remaining);
        let trade = executor.execute_trade(taker, maker, quantity);

        let Some(maker) = level.fill_front(quantity) else {
            break;
        };
        taker.fill(quantity);

        debug!(
            trade_id = %trade.trade_id,
            maker_order_id = %maker.order_id,
            price = trade.price,
            quantity = trade.quantity,
            "Trade executed"
        );

        outcome.report.push(trade);
        outcome.makers.push(maker);
        book.prune_level(taker.side.opposite(), level_price);
    }

    if taker.remaining > 0 {
        debug!(
            order_id = %taker.order_id,
            price = taker.price,
            remaining = taker.remaining,
            "Order resting"
        );
        book.add_order(taker.clone())?;
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use types::clock::ManualClock;
    use types::ids::{AccountId, Instrument};
    use types::numeric::{Price, Quantity};
    use types::order::Side;

    fn create_order(side: Side, price: Price, qty: Quantity) -> Order {
        Order::new(
            AccountId::new(),
            Instrument::parse("BTC/USDT").unwrap(),
            side,
            price,
            qty,
            1708123456789000000,
        )
        .unwrap()
    }

    fn setup() -> (Book, MatchExecutor) {
        (
            Book::new(Instrument::parse("BTC/USDT").unwrap()),
            MatchExecutor::new(Arc::new(ManualClock::with_step(0, 1))),
        )
    }

    #[test]
    fn test_resting_order() {
        let (mut book, executor) = setup();
        let mut buy = create_order(Side::BUY, 100, 10);

        let outcome = match_order(&mut book, &mut buy, &executor).unwrap();

        assert!(outcome.report.is_empty());
        assert!(outcome.makers.is_empty());
        assert!(book.contains(&buy));
        assert_eq!(buy.remaining, 10);
    }

    #[test]
    fn test_full_match_removes_level() {
        let (mut book, executor) = setup();
        let mut ask = create_order(Side::SELL, 100, 10);
        match_order(&mut book, &mut ask, &executor).unwrap();

        let mut buy = create_order(Side::BUY, 100, 10);
        let outcome = match_order(&mut book, &mut buy, &executor).unwrap();

        assert_eq!(outcome.report.len(), 1);
        assert_eq!(outcome.report.trades[0].quantity, 10);
        assert_eq!(outcome.report.trades[0].price, 100);
        assert!(buy.is_filled());
        assert!(outcome.makers[0].is_filled());
        assert!(book.best_ask().is_none());
        assert!(book.is_empty());
    }

    #[test]
    fn test_partial_match_rests_remainder() {
        let (mut book, executor) = setup();
        let mut ask = create_order(Side::SELL, 100, 5);
        match_order(&mut book, &mut ask, &executor).unwrap();

        let mut buy = create_order(Side::BUY, 100, 10);
        let outcome = match_order(&mut book, &mut buy, &executor).unwrap();

        assert_eq!(outcome.report.total_quantity(), 5);
        assert_eq!(buy.remaining, 5);
        assert_eq!(book.best_bid().unwrap().total_quantity(), 5);
        assert!(book.best_ask().is_none());
    }

    #[test]
    fn test_price_improvement_uses_maker_price() {
        let (mut book, executor) = setup();
        let mut bid = create_order(Side::BUY, 105, 4);
        match_order(&mut book, &mut bid, &executor).unwrap();

        let mut sell = create_order(Side::SELL, 100, 4);
        let outcome = match_order(&mut book, &mut sell, &executor).unwrap();

        assert_eq!(outcome.report.trades[0].price, 105);
        assert_eq!(outcome.report.trades[0].seller_account_id, sell.account_id);
    }

    #[test]
    fn test_no_cross_leaves_book() {
        let (mut book, executor) = setup();
        let mut ask = create_order(Side::SELL, 101, 5);
        match_order(&mut book, &mut ask, &executor).unwrap();

        let mut buy = create_order(Side::BUY, 100, 5);
        let outcome = match_order(&mut book, &mut buy, &executor).unwrap();

        assert!(outcome.report.is_empty());
        assert_eq!(book.best_ask().unwrap().price(), 101);
        assert_eq!(book.best_bid().unwrap().price(), 100);
    }

    #[test]
    fn test_multi_level_sweep_and_fifo() {
        let (mut book, executor) = setup();
        let mut a = create_order(Side::SELL, 100, 5);
        let mut b = create_order(Side::SELL, 100, 5);
        let mut c = create_order(Side::SELL, 101, 5);
        for order in [&mut a, &mut b, &mut c] {
            match_order(&mut book, order, &executor).unwrap();
        }

        let mut buy = create_order(Side::BUY, 101, 12);
        let outcome = match_order(&mut book, &mut buy, &executor).unwrap();

        let fills: Vec<_> = outcome
            .report
            .iter()
            .map(|t| (t.maker_order_id, t.price, t.quantity))
            .collect();
        assert_eq!(
            fills,
            vec![(a.order_id, 100, 5), (b.order_id, 100, 5), (c.order_id, 101, 2)]
        );
        assert_eq!(outcome.makers.last().unwrap().remaining, 3);
        assert_eq!(book.best_ask().unwrap().total_quantity(), 3);
        assert!(buy.is_filled());
    }

    #[test]
    fn test_sell_taker_walks_bids_descending() {
        let (mut book, executor) = setup();
        let mut low = create_order(Side::BUY, 98, 5);
        let mut high = create_order(Side::BUY, 99, 5);
        match_order(&mut book, &mut low, &executor).unwrap();
        match_order(&mut book, &mut high, &executor).unwrap();

        let mut sell = create_order(Side::SELL, 98, 7);
        let outcome = match_order(&mut book, &mut sell, &executor).unwrap();

        let prices: Vec<_> = outcome.report.iter().map(|t| t.price).collect();
        assert_eq!(prices, vec![99, 98]);
        assert_eq!(book.best_bid().unwrap().total_quantity(), 3);
    }

    #[test]
    fn test_rest_overflow_is_an_error() {
        let (mut book, executor) = setup();
        let half = i64::MAX / 2 + 1;
        let mut first = create_order(Side::SELL, 100, half);
        match_order(&mut book, &mut first, &executor).unwrap();

        let mut second = create_order(Side::SELL, 100, half);
        assert!(match_order(&mut book, &mut second, &executor).is_err());
        assert!(!book.contains(&second));
        assert_eq!(book.best_ask().unwrap().total_quantity(), half);
    }
}
