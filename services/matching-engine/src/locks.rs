//! Per-instrument and per-account critical sections
//!
//! Locks are created lazily and live for the process lifetime. Acquisition
//! order is fixed: the instrument lock first, then account locks in ascending
//! `AccountId` order. Never take an instrument lock while holding an account
//! lock.

use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use types::ids::{AccountId, Instrument};

pub type LockHandle = Arc<Mutex<()>>;

#[derive(Debug, Default)]
pub struct LockRegistry {
    instruments: DashMap<Instrument, LockHandle>,
    accounts: DashMap<AccountId, LockHandle>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock guarding every mutation of one book
    pub fn instrument(&self, instrument: &Instrument) -> LockHandle {
        if let Some(lock) = self.instruments.get(instrument) {
            return Arc::clone(lock.value());
        }
        Arc::clone(
            self.instruments
                .entry(instrument.clone())
                .or_default()
                .value(),
        )
    }

    /// Locks for a set of accounts, sorted by id with duplicates collapsed
    pub fn accounts(&self, ids: impl IntoIterator<Item = AccountId>) -> Vec<LockHandle> {
        let mut ids: Vec<AccountId> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();

        ids.into_iter()
            .map(|id| Arc::clone(self.accounts.entry(id).or_default().value()))
            .collect()
    }

    pub fn account(&self, id: AccountId) -> LockHandle {
        Arc::clone(self.accounts.entry(id).or_default().value())
    }
}

/// Acquire handles in the order given
pub fn lock_all(handles: &[LockHandle]) -> Vec<MutexGuard<'_, ()>> {
    handles.iter().map(|handle| handle.lock()).collect()
}
