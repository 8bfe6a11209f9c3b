//! Storage contracts consumed by the exchange use cases
//!
//! Implementations guard their own maps; the exchange serializes writers
//! through `LockRegistry`, so a repository only needs per-call atomicity.

use types::account::Account;
use types::errors::ClobResult;
use types::ids::{AccountId, Instrument, OrderId};
use types::order::Order;

use crate::book::Book;

pub trait AccountRepository: Send + Sync {
    /// Insert a new account; `AlreadyExists` on a duplicate id or name
    fn create(&self, account: Account) -> ClobResult<()>;

    /// `NotFound` when absent
    fn get(&self, account_id: &AccountId) -> ClobResult<Account>;

    /// Overwrite an existing account
    fn save(&self, account: Account) -> ClobResult<()>;
}

pub trait BookRepository: Send + Sync {
    fn get_book(&self, instrument: &Instrument) -> ClobResult<Option<Book>>;

    fn save_book(&self, book: Book) -> ClobResult<()>;
}

pub trait OrderRepository: Send + Sync {
    fn get_order(&self, order_id: &OrderId) -> ClobResult<Option<Order>>;

    fn save_order(&self, order: Order) -> ClobResult<()>;

    fn remove_order(&self, order_id: &OrderId) -> ClobResult<()>;
}
