//! Exchange use cases
//!
//! `Exchange` ties the ledger, the books and the order records together.
//! Every mutating operation stages its changes (book copy, `AccountBatch`,
//! order states) and writes them back only after all steps succeeded.

use serde::Serialize;
use std::iter;
use std::sync::Arc;
use tracing::info;
use types::account::Account;
use types::clock::Clock;
use types::errors::{ClobError, ClobResult, Entity};
use types::ids::{AccountId, Instrument, OrderId};
use types::numeric::{notional, Amount, Price, Quantity};
use types::order::{Order, Side};
use types::trade::TradeReport;

use crate::batch::AccountBatch;
use crate::book::{Book, BookSnapshot};
use crate::locks::{lock_all, LockRegistry};
use crate::matching::{match_order, MatchExecutor};
use crate::memory::{InMemoryAccountRepository, InMemoryBookRepository, InMemoryOrderRepository};
use crate::repository::{AccountRepository, BookRepository, OrderRepository};
use crate::settlement::settle_trade;
use crate::transfer::transfer;

/// Raw order submission, validated by `Exchange::place_order`
#[derive(Debug, Clone)]
pub struct PlaceOrderRequest {
    pub account_id: AccountId,
    pub instrument: String,
    pub side: String,
    pub price: Price,
    pub quantity: Quantity,
}

/// Result of a successful placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedOrder {
    /// The order as stored after matching
    pub order: Order,
    pub report: TradeReport,
}

/// Both sides of a completed transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    pub from: Account,
    pub to: Account,
}

pub struct Exchange {
    accounts: Arc<dyn AccountRepository>,
    books: Arc<dyn BookRepository>,
    orders: Arc<dyn OrderRepository>,
    clock: Arc<dyn Clock>,
    executor: MatchExecutor,
    locks: LockRegistry,
}

impl Exchange {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        books: Arc<dyn BookRepository>,
        orders: Arc<dyn OrderRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            books,
            orders,
            executor: MatchExecutor::new(Arc::clone(&clock)),
            clock,
            locks: LockRegistry::new(),
        }
    }

    /// Exchange backed by fresh in-memory repositories
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(InMemoryBookRepository::new()),
            Arc::new(InMemoryOrderRepository::new()),
            clock,
        )
    }

    pub fn create_account(&self, name: &str) -> ClobResult<Account> {
        let account = Account::new(name, self.clock.now_nanos())?;
        self.accounts.create(account.clone())?;

        info!(account_id = %account.account_id, name = %account.name, "Account created");
        Ok(account)
    }

    /// Deposit funds into an account's available balance
    pub fn credit_account(
        &self,
        account_id: AccountId,
        asset: &str,
        amount: Amount,
    ) -> ClobResult<Account> {
        if asset.trim().is_empty() {
            return Err(ClobError::invalid_parameter("asset must not be empty"));
        }

        let lock = self.locks.account(account_id);
        let _guard = lock.lock();

        let mut account = self.accounts.get(&account_id)?;
        account.credit(asset, amount)?;
        self.accounts.save(account.clone())?;

        info!(%account_id, asset = %asset.trim().to_uppercase(), amount, "Account credited");
        Ok(account)
    }

    /// Move funds from one account's available balance to another's
    ///
    /// Both account locks are held, in id order, for the whole transfer.
    pub fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        asset: &str,
        amount: Amount,
    ) -> ClobResult<TransferReceipt> {
        if asset.trim().is_empty() {
            return Err(ClobError::invalid_parameter("asset must not be empty"));
        }

        let account_locks = self.locks.accounts([from, to]);
        let _account_guards = lock_all(&account_locks);

        let mut batch = AccountBatch::load(self.accounts.as_ref(), [from, to])?;
        transfer(&mut batch, &from, &to, asset, amount)?;
        let receipt = TransferReceipt {
            from: batch.get(&from)?,
            to: batch.get(&to)?,
        };
        batch.commit(self.accounts.as_ref())?;

        info!(%from, %to, asset = %asset.trim().to_uppercase(), amount, "Funds transferred");
        Ok(receipt)
    }

    pub fn get_account(&self, account_id: AccountId) -> ClobResult<Account> {
        self.accounts.get(&account_id)
    }

    pub fn get_order(&self, order_id: OrderId) -> ClobResult<Order> {
        self.orders
            .get_order(&order_id)?
            .ok_or_else(|| ClobError::not_found(Entity::Order, order_id))
    }

    /// Place a limit order, match it and settle every resulting trade
    ///
    /// Validation order: price and quantity, side, account, instrument, funds.
    /// On error nothing is persisted.
    pub fn place_order(&self, request: PlaceOrderRequest) -> ClobResult<PlacedOrder> {
        let PlaceOrderRequest {
            account_id,
            instrument,
            side,
            price,
            quantity,
        } = request;

        if price <= 0 || quantity <= 0 {
            return Err(ClobError::invalid_parameter(format!(
                "price and quantity must be positive, got {price} x {quantity}"
            )));
        }
        let side: Side = side.parse()?;
        self.accounts.get(&account_id)?;
        let instrument = Instrument::parse(&instrument)?;
        let (reserve_asset, reserve_amount) = match side {
            Side::BUY => (instrument.quote(), notional(price, quantity)?),
            Side::SELL => (instrument.base(), quantity),
        };

        let book_lock = self.locks.instrument(&instrument);
        let _book_guard = book_lock.lock();

        let mut book = self
            .books
            .get_book(&instrument)?
            .unwrap_or_else(|| Book::new(instrument.clone()));
        let mut order = Order::new(
            account_id,
            instrument.clone(),
            side,
            price,
            quantity,
            self.clock.now_nanos(),
        )?;

        let outcome = match_order(&mut book, &mut order, &self.executor)?;

        let participants: Vec<AccountId> = iter::once(account_id)
            .chain(
                outcome
                    .report
                    .iter()
                    .flat_map(|trade| [trade.buyer_account_id, trade.seller_account_id]),
            )
            .collect();
        let account_locks = self.locks.accounts(participants.iter().copied());
        let _account_guards = lock_all(&account_locks);

        let mut batch = AccountBatch::load(self.accounts.as_ref(), participants)?;
        let mut taker_account = batch.get(&account_id)?;
        taker_account.reserve(reserve_asset, reserve_amount)?;
        batch.put(taker_account);

        for trade in &outcome.report {
            settle_trade(&mut batch, trade, &instrument, &order)?;
        }

        batch.commit(self.accounts.as_ref())?;
        self.orders.save_order(order.clone())?;
        for maker in outcome.makers {
            self.orders.save_order(maker)?;
        }
        self.books.save_book(book)?;

        info!(
            order_id = %order.order_id,
            %account_id,
            %instrument,
            %side,
            price,
            quantity,
            remaining = order.remaining,
            trades = outcome.report.len(),
            "Order placed"
        );

        Ok(PlacedOrder {
            order,
            report: outcome.report,
        })
    }

    /// Cancel an open order and release its remaining reservation
    ///
    /// Orders that are unknown, fully filled or already cancelled are `NotFound`.
    pub fn cancel_order(&self, order_id: OrderId) -> ClobResult<Order> {
        let instrument = self.get_order(order_id)?.instrument;

        let book_lock = self.locks.instrument(&instrument);
        let _book_guard = book_lock.lock();

        // Re-read under the book lock; a concurrent match may have filled it.
        let mut order = self.get_order(order_id)?;
        if order.remaining == 0 {
            return Err(ClobError::not_found(Entity::Order, order_id));
        }
        let mut book = self
            .books
            .get_book(&instrument)?
            .ok_or_else(|| ClobError::not_found(Entity::Book, &instrument))?;

        let account_lock = self.locks.account(order.account_id);
        let _account_guard = account_lock.lock();
        let mut account = self.accounts.get(&order.account_id)?;

        book.remove_order(&order);
        match order.side {
            Side::BUY => {
                account.release_reserved(instrument.quote(), notional(order.price, order.remaining)?)?
            }
            Side::SELL => account.release_reserved(instrument.base(), order.remaining)?,
        }
        let released = order.remaining;
        order.close();

        self.books.save_book(book)?;
        self.accounts.save(account)?;
        self.orders.save_order(order.clone())?;

        info!(%order_id, account_id = %order.account_id, %instrument, released, "Order cancelled");
        Ok(order)
    }

    /// Aggregated depth for one instrument
    pub fn snapshot_book(&self, instrument: &str) -> ClobResult<BookSnapshot> {
        let instrument = Instrument::parse(instrument)?;
        self.books
            .get_book(&instrument)?
            .map(|book| book.snapshot())
            .ok_or_else(|| ClobError::not_found(Entity::Book, &instrument))
    }
}

impl std::fmt::Debug for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exchange").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::account::Balance;
    use types::clock::ManualClock;
    use types::errors::ErrorKind;

    fn exchange() -> Exchange {
        Exchange::in_memory(Arc::new(ManualClock::with_step(1708123456789000000, 1)))
    }

    fn request(account_id: AccountId, side: &str, price: Price, quantity: Quantity) -> PlaceOrderRequest {
        PlaceOrderRequest {
            account_id,
            instrument: "BTC/USDT".to_string(),
            side: side.to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_create_account_rules() {
        let exchange = exchange();
        let alice = exchange.create_account("  alice ").unwrap();
        assert_eq!(alice.name, "alice");
        assert_eq!(alice.created_at, 1708123456789000000);

        let dup = exchange.create_account("alice").unwrap_err();
        assert_eq!(dup.kind(), ErrorKind::AlreadyExists);

        let empty = exchange.create_account("   ").unwrap_err();
        assert_eq!(empty.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn test_credit_account() {
        let exchange = exchange();
        let alice = exchange.create_account("alice").unwrap();

        let updated = exchange.credit_account(alice.account_id, "usdt", 500).unwrap();
        assert_eq!(updated.balance("USDT"), Balance::new(500));
        assert_eq!(exchange.get_account(alice.account_id).unwrap(), updated);

        let zero = exchange.credit_account(alice.account_id, "USDT", 0).unwrap_err();
        assert_eq!(zero.kind(), ErrorKind::InvalidParameter);
        let blank = exchange.credit_account(alice.account_id, " ", 10).unwrap_err();
        assert_eq!(blank.kind(), ErrorKind::InvalidParameter);
        let missing = exchange.credit_account(AccountId::new(), "USDT", 10).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_transfer_commits_both_accounts() {
        let exchange = exchange();
        let alice = exchange.create_account("alice").unwrap().account_id;
        let bob = exchange.create_account("bob").unwrap().account_id;
        exchange.credit_account(alice, "BTC", 100).unwrap();

        let receipt = exchange.transfer(alice, bob, "btc", 60).unwrap();

        assert_eq!(receipt.from.balance("BTC"), Balance::new(40));
        assert_eq!(receipt.to.balance("BTC"), Balance::new(60));
        assert_eq!(exchange.get_account(alice).unwrap(), receipt.from);
        assert_eq!(exchange.get_account(bob).unwrap(), receipt.to);
    }

    #[test]
    fn test_failed_transfer_persists_nothing() {
        let exchange = exchange();
        let alice = exchange.create_account("alice").unwrap().account_id;
        let bob = exchange.create_account("bob").unwrap().account_id;
        exchange.credit_account(alice, "BTC", 100).unwrap();
        let before = (exchange.get_account(alice).unwrap(), exchange.get_account(bob).unwrap());

        let cases = [
            (exchange.transfer(alice, bob, "BTC", 101), ErrorKind::Insufficient),
            (exchange.transfer(alice, bob, "BTC", 0), ErrorKind::InvalidParameter),
            (exchange.transfer(alice, bob, "  ", 10), ErrorKind::InvalidParameter),
            (exchange.transfer(alice, AccountId::new(), "BTC", 10), ErrorKind::NotFound),
        ];
        for (result, expected) in cases {
            assert_eq!(result.unwrap_err().kind(), expected);
        }

        let after = (exchange.get_account(alice).unwrap(), exchange.get_account(bob).unwrap());
        assert_eq!(after, before);
    }

    #[test]
    fn test_place_order_validation_precedence() {
        let exchange = exchange();
        let alice = exchange.create_account("alice").unwrap();
        let ghost = AccountId::new();

        let cases = [
            (request(ghost, "hold", 0, 1), ErrorKind::InvalidParameter),
            (request(ghost, "hold", 100, 1), ErrorKind::InvalidSide),
            (request(ghost, "buy", 100, 1), ErrorKind::NotFound),
            (
                PlaceOrderRequest {
                    instrument: "BTCUSDT".to_string(),
                    ..request(alice.account_id, "buy", 100, 1)
                },
                ErrorKind::InvalidInstrument,
            ),
            (request(alice.account_id, "buy", 100, 1), ErrorKind::Insufficient),
        ];

        for (req, expected) in cases {
            assert_eq!(exchange.place_order(req).unwrap_err().kind(), expected);
        }
    }

    #[test]
    fn test_place_order_persists_order_and_reservation() {
        let exchange = exchange();
        let alice = exchange.create_account("alice").unwrap();
        exchange.credit_account(alice.account_id, "USDT", 1000).unwrap();

        let placed = exchange.place_order(request(alice.account_id, "BUY", 100, 4)).unwrap();

        assert!(placed.report.is_empty());
        assert_eq!(exchange.get_order(placed.order.order_id).unwrap(), placed.order);
        let balance = exchange.get_account(alice.account_id).unwrap().balance("USDT");
        assert_eq!(balance, Balance { available: 600, reserved: 400 });

        let snapshot = exchange.snapshot_book("btc/usdt").unwrap();
        assert_eq!(snapshot.bids.len(), 1);
        assert_eq!(snapshot.bids[0].qty, 4);
    }

    #[test]
    fn test_snapshot_errors() {
        let exchange = exchange();
        assert_eq!(exchange.snapshot_book("ETH/USDT").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(exchange.snapshot_book("ETH").unwrap_err().kind(), ErrorKind::InvalidInstrument);
    }

    #[test]
    fn test_cancel_unknown_order() {
        let exchange = exchange();
        let err = exchange.cancel_order(OrderId::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
