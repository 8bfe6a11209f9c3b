//! Unique identifier types for order book entities
//!
//! All IDs use UUID v7 for time-sortable ordering. `Instrument` is the
//! normalized `BASE/QUOTE` trading pair.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::InstrumentError;

/// Unique identifier for an order
///
/// Uses UUID v7 for time-based sorting. Two orders never share an id, so the
/// id doubles as the order's identity inside the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Create a new OrderId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Unique identifier for a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(Uuid);

impl TradeId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TradeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an account
///
/// `Ord` gives the total order used when several account locks are taken at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Trading pair identifier
///
/// Format: "BASE/QUOTE" (e.g., "BTC/USDT"). Both symbols are upper-cased on
/// construction, so `"btc/usdt"` and `"BTC/USDT"` name the same book.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Instrument {
    base: String,
    quote: String,
}

impl Instrument {
    /// Parse and normalize an instrument symbol
    ///
    /// Exactly two non-empty `/`-separated parts are accepted.
    pub fn parse(symbol: &str) -> Result<Self, InstrumentError> {
        let mut parts = symbol.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(base), Some(quote), None) => {
                let base = base.trim();
                let quote = quote.trim();
                if base.is_empty() || quote.is_empty() {
                    return Err(InstrumentError::Malformed(symbol.to_string()));
                }
                Ok(Self {
                    base: base.to_uppercase(),
                    quote: quote.to_uppercase(),
                })
            }
            _ => Err(InstrumentError::Malformed(symbol.to_string())),
        }
    }

    /// Asset being bought or sold
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Pricing asset
    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Split into base and quote assets
    pub fn split(&self) -> (&str, &str) {
        (&self.base, &self.quote)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for Instrument {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Instrument {
    type Error = InstrumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Instrument> for String {
    fn from(instrument: Instrument) -> Self {
        instrument.to_string()
    }
}
