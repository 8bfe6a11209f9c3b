//! In-memory repositories
//!
//! Values are stored by clone behind a `parking_lot::RwLock`.

use parking_lot::RwLock;
use std::collections::HashMap;
use types::account::Account;
use types::errors::{ClobError, ClobResult, Entity};
use types::ids::{AccountId, Instrument, OrderId};
use types::order::Order;

use crate::book::Book;
use crate::repository::{AccountRepository, BookRepository, OrderRepository};

#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    fn create(&self, account: Account) -> ClobResult<()> {
        let mut accounts = self.accounts.write();

        if accounts.contains_key(&account.account_id) {
            return Err(ClobError::AlreadyExists {
                entity: Entity::Account,
                key: account.account_id.to_string(),
            });
        }
        if accounts.values().any(|existing| existing.name == account.name) {
            return Err(ClobError::AlreadyExists {
                entity: Entity::Account,
                key: account.name,
            });
        }

        accounts.insert(account.account_id, account);
        Ok(())
    }

    fn get(&self, account_id: &AccountId) -> ClobResult<Account> {
        self.accounts
            .read()
            .get(account_id)
            .cloned()
            .ok_or_else(|| ClobError::not_found(Entity::Account, account_id))
    }

    fn save(&self, account: Account) -> ClobResult<()> {
        let mut accounts = self.accounts.write();
        match accounts.get_mut(&account.account_id) {
            Some(slot) => {
                *slot = account;
                Ok(())
            }
            None => Err(ClobError::not_found(Entity::Account, account.account_id)),
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: RwLock<HashMap<Instrument, Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookRepository for InMemoryBookRepository {
    fn get_book(&self, instrument: &Instrument) -> ClobResult<Option<Book>> {
        Ok(self.books.read().get(instrument).cloned())
    }

    fn save_book(&self, book: Book) -> ClobResult<()> {
        self.books.write().insert(book.instrument().clone(), book);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.read().is_empty()
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn get_order(&self, order_id: &OrderId) -> ClobResult<Option<Order>> {
        Ok(self.orders.read().get(order_id).cloned())
    }

    fn save_order(&self, order: Order) -> ClobResult<()> {
        self.orders.write().insert(order.order_id, order);
        Ok(())
    }

    fn remove_order(&self, order_id: &OrderId) -> ClobResult<()> {
        self.orders.write().remove(order_id);
        Ok(())
    }
}
