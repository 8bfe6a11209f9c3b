//! Account and balance types
//!
//! Escrow ledger: each asset carries an `available` and a `reserved` amount.
//! Funds move `available -> reserved` when an order is placed, leave `reserved`
//! when a trade settles, and move back to `available` on cancellation.

use crate::errors::AccountError;
use crate::ids::AccountId;
use crate::numeric::Amount;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Balance for a single asset
///
/// Invariant: available >= 0 and reserved >= 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub available: Amount,
    pub reserved: Amount,
}

impl Balance {
    pub fn new(available: Amount) -> Self {
        Self {
            available,
            reserved: 0,
        }
    }

    /// Check balance invariant: both components non-negative
    pub fn check_invariant(&self) -> bool {
        self.available >= 0 && self.reserved >= 0
    }

    /// available + reserved
    pub fn total(&self) -> Amount {
        self.available.saturating_add(self.reserved)
    }
}

/// Trading account with per-asset escrow balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: AccountId,
    pub name: String,
    pub balances: BTreeMap<String, Balance>,
    pub created_at: i64,
}

impl Account {
    /// Create a new account with no balances
    ///
    /// The name is trimmed and must not be empty.
    pub fn new(name: &str, timestamp: i64) -> Result<Self, AccountError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AccountError::InvalidName);
        }

        Ok(Self {
            account_id: AccountId::new(),
            name: name.to_string(),
            balances: BTreeMap::new(),
            created_at: timestamp,
        })
    }

    /// Current balance for an asset (zero if never touched)
    pub fn balance(&self, asset: &str) -> Balance {
        self.balances
            .get(&normalize_asset(asset))
            .copied()
            .unwrap_or_default()
    }

    /// Add to available balance (deposits, trade proceeds)
    pub fn credit(&mut self, asset: &str, amount: Amount) -> Result<(), AccountError> {
        let asset = normalize_asset(asset);
        if amount <= 0 {
            return Err(AccountError::InvalidParameter { asset, amount });
        }

        let balance = self.balances.entry(asset.clone()).or_default();
        balance.available = balance
            .available
            .checked_add(amount)
            .ok_or(AccountError::InvalidParameter { asset, amount })?;
        Ok(())
    }

    /// Move funds from available into escrow
    pub fn reserve(&mut self, asset: &str, amount: Amount) -> Result<(), AccountError> {
        let asset = normalize_asset(asset);
        if amount <= 0 {
            return Err(AccountError::InvalidParameter { asset, amount });
        }

        let balance = self.balances.entry(asset.clone()).or_default();
        if balance.available < amount {
            return Err(AccountError::Insufficient {
                asset,
                required: amount,
                available: balance.available,
            });
        }
        let reserved = balance
            .reserved
            .checked_add(amount)
            .ok_or(AccountError::InvalidParameter {
                asset: asset.clone(),
                amount,
            })?;

        balance.available -= amount;
        balance.reserved = reserved;
        Ok(())
    }

    /// Consume escrowed funds; they are credited to a counterparty elsewhere
    ///
    /// A zero amount is a no-op.
    pub fn use_reserved(&mut self, asset: &str, amount: Amount) -> Result<(), AccountError> {
        let asset = normalize_asset(asset);
        let balance = self.escrow_mut(asset, amount)?;
        balance.reserved -= amount;
        Ok(())
    }

    /// Return escrowed funds to available
    ///
    /// A zero amount is a no-op.
    pub fn release_reserved(&mut self, asset: &str, amount: Amount) -> Result<(), AccountError> {
        let asset = normalize_asset(asset);
        let balance = self.escrow_mut(asset, amount)?;
        balance.reserved -= amount;
        balance.available += amount;
        Ok(())
    }

    /// Validation shared by the two escrow-draining operations
    fn escrow_mut(&mut self, asset: String, amount: Amount) -> Result<&mut Balance, AccountError> {
        if amount < 0 {
            return Err(AccountError::InvalidParameter { asset, amount });
        }

        let balance = self.balances.entry(asset.clone()).or_default();
        if balance.reserved < amount {
            return Err(AccountError::Insufficient {
                asset,
                required: amount,
                available: balance.reserved,
            });
        }
        if balance.available.checked_add(amount).is_none() {
            return Err(AccountError::InvalidParameter { asset, amount });
        }
        Ok(balance)
    }

    /// Every balance satisfies its invariant
    pub fn check_invariant(&self) -> bool {
        self.balances.values().all(Balance::check_invariant)
    }
}

/// Asset symbols are compared upper-case
pub fn normalize_asset(asset: &str) -> String {
    asset.trim().to_uppercase()
}
