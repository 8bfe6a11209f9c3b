//! Staged account writes
//!
//! An `AccountBatch` holds working copies of every account a request touches.
//! Mutations apply to the copies; nothing reaches the repository until
//! `commit`, so a failed request leaves stored balances untouched.

use std::collections::BTreeMap;
use types::account::Account;
use types::errors::{ClobError, ClobResult, Entity};
use types::ids::AccountId;

use crate::repository::AccountRepository;

#[derive(Debug, Clone, Default)]
pub struct AccountBatch {
    accounts: BTreeMap<AccountId, Account>,
}

impl AccountBatch {
    /// Load working copies; `NotFound` if any id is unknown
    pub fn load(
        repo: &dyn AccountRepository,
        ids: impl IntoIterator<Item = AccountId>,
    ) -> ClobResult<Self> {
        let mut accounts = BTreeMap::new();
        for id in ids {
            if !accounts.contains_key(&id) {
                accounts.insert(id, repo.get(&id)?);
            }
        }
        Ok(Self { accounts })
    }

    /// Copy of a staged account
    pub fn get(&self, id: &AccountId) -> ClobResult<Account> {
        self.accounts
            .get(id)
            .cloned()
            .ok_or_else(|| ClobError::not_found(Entity::Account, id))
    }

    /// Replace a staged account
    pub fn put(&mut self, account: Account) {
        self.accounts.insert(account.account_id, account);
    }

    /// Write every staged account back
    pub fn commit(self, repo: &dyn AccountRepository) -> ClobResult<()> {
        for account in self.accounts.into_values() {
            repo.save(account)?;
        }
        Ok(())
    }
}
