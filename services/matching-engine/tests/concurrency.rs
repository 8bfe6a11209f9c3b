//! Concurrency test
//!
//! Many threads hammer one shared `Exchange`. Per-instrument and per-account
//! critical sections must keep every balance update and every fill.

use matching_engine::{Exchange, PlaceOrderRequest};
use std::sync::Arc;
use std::thread;
use types::account::Balance;
use types::clock::SystemClock;
use types::ids::AccountId;

const ROUNDS: usize = 200;

fn request(account_id: AccountId, instrument: &str, side: &str) -> PlaceOrderRequest {
    PlaceOrderRequest {
        account_id,
        instrument: instrument.to_string(),
        side: side.to_string(),
        price: 100,
        quantity: 1,
    }
}

#[test]
fn test_concurrent_same_instrument() {
    let exchange = Arc::new(Exchange::in_memory(Arc::new(SystemClock)));
    let seller = exchange.create_account("seller").unwrap().account_id;
    let buyer = exchange.create_account("buyer").unwrap().account_id;
    exchange.credit_account(seller, "BTC", ROUNDS as i64).unwrap();
    exchange.credit_account(buyer, "USDT", 100 * ROUNDS as i64).unwrap();

    let handles: Vec<_> = [(seller, "sell"), (buyer, "buy")]
        .into_iter()
        .map(|(account, side)| {
            let exchange = Arc::clone(&exchange);
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    exchange.place_order(request(account, "BTC/USDT", side)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = exchange.snapshot_book("BTC/USDT").unwrap();
    assert!(snapshot.bids.is_empty());
    assert!(snapshot.asks.is_empty());
    assert_eq!(exchange.get_account(buyer).unwrap().balance("BTC"), Balance::new(ROUNDS as i64));
    assert_eq!(
        exchange.get_account(seller).unwrap().balance("USDT"),
        Balance::new(100 * ROUNDS as i64)
    );
}

#[test]
fn test_concurrent_markets_share_accounts() {
    let exchange = Arc::new(Exchange::in_memory(Arc::new(SystemClock)));
    let markets = ["BTC/USDT", "ETH/USDT", "SOL/USDT", "DOGE/USDT"];
    let maker = exchange.create_account("maker").unwrap().account_id;
    let taker = exchange.create_account("taker").unwrap().account_id;
    for market in markets {
        let base = market.split('/').next().unwrap();
        exchange.credit_account(maker, base, ROUNDS as i64).unwrap();
    }
    exchange
        .credit_account(taker, "USDT", 100 * (ROUNDS * markets.len()) as i64)
        .unwrap();

    let handles: Vec<_> = markets
        .into_iter()
        .flat_map(|market| [(maker, market, "sell"), (taker, market, "buy")])
        .map(|(account, market, side)| {
            let exchange = Arc::clone(&exchange);
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    exchange.place_order(request(account, market, side)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let maker_account = exchange.get_account(maker).unwrap();
    let taker_account = exchange.get_account(taker).unwrap();
    assert_eq!(
        maker_account.balance("USDT"),
        Balance::new(100 * (ROUNDS * markets.len()) as i64)
    );
    assert_eq!(taker_account.balance("USDT"), Balance::default());
    for market in markets {
        let base = market.split('/').next().unwrap();
        assert_eq!(taker_account.balance(base), Balance::new(ROUNDS as i64));
        assert_eq!(maker_account.balance(base), Balance::default());
    }
}

#[test]
fn test_concurrent_credits_are_not_lost() {
    let exchange = Arc::new(Exchange::in_memory(Arc::new(SystemClock)));
    let account = exchange.create_account("saver").unwrap().account_id;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let exchange = Arc::clone(&exchange);
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    exchange.credit_account(account, "USDT", 1).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        exchange.get_account(account).unwrap().balance("USDT"),
        Balance::new(8 * ROUNDS as i64)
    );
}

#[test]
fn test_opposing_transfers_conserve_funds() {
    let exchange = Arc::new(Exchange::in_memory(Arc::new(SystemClock)));
    let alice = exchange.create_account("alice").unwrap().account_id;
    let bob = exchange.create_account("bob").unwrap().account_id;
    exchange.credit_account(alice, "BTC", ROUNDS as i64).unwrap();
    exchange.credit_account(bob, "BTC", ROUNDS as i64).unwrap();

    // Each direction takes the two account locks in the same order
    let handles: Vec<_> = [(alice, bob), (bob, alice)]
        .into_iter()
        .map(|(from, to)| {
            let exchange = Arc::clone(&exchange);
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    exchange.transfer(from, to, "BTC", 1).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(exchange.get_account(alice).unwrap().balance("BTC"), Balance::new(ROUNDS as i64));
    assert_eq!(exchange.get_account(bob).unwrap().balance("BTC"), Balance::new(ROUNDS as i64));
}
