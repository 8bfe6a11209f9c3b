//! Error types for the order book core
//!
//! Comprehensive error taxonomy using thiserror. Domain errors (`AccountError`,
//! `OrderError`, `InstrumentError`) convert into the top-level `ClobError`, which is
//! what every orchestrated operation returns.

use thiserror::Error;

/// Top-level error returned by every core operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClobError {
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: String },

    #[error("{entity} already exists: {key}")]
    AlreadyExists { entity: Entity, key: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl ClobError {
    pub fn not_found(entity: Entity, id: impl ToString) -> Self {
        ClobError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        ClobError::InvalidParameter(message.into())
    }

    /// Stable classification used by transport layers to choose a response code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClobError::Account(AccountError::InvalidParameter { .. })
            | ClobError::Account(AccountError::InvalidName)
            | ClobError::InvalidParameter(_) => ErrorKind::InvalidParameter,
            ClobError::Account(AccountError::Insufficient { .. }) => ErrorKind::Insufficient,
            ClobError::Order(OrderError::InvalidOrder(_)) => ErrorKind::InvalidOrder,
            ClobError::Order(OrderError::InvalidSide(_)) => ErrorKind::InvalidSide,
            ClobError::Instrument(_) => ErrorKind::InvalidInstrument,
            ClobError::NotFound { .. } => ErrorKind::NotFound,
            ClobError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            ClobError::Storage { .. } => ErrorKind::Storage,
        }
    }
}

/// Flat classification of [`ClobError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidParameter,
    InvalidOrder,
    InvalidSide,
    Insufficient,
    NotFound,
    AlreadyExists,
    InvalidInstrument,
    Storage,
}

/// Entity named in lookup and uniqueness errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Account,
    Order,
    Book,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Entity::Account => "Account",
            Entity::Order => "Order",
            Entity::Book => "Book",
        };
        f.write_str(name)
    }
}

/// Ledger errors raised by balance mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid amount {amount} for asset {asset}")]
    InvalidParameter { asset: String, amount: i64 },

    #[error("Insufficient balance for asset {asset}: required {required}, available {available}")]
    Insufficient {
        asset: String,
        required: i64,
        available: i64,
    },

    #[error("Account name must not be empty")]
    InvalidName,
}

/// Order construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Invalid side: {0:?}")]
    InvalidSide(String),
}

/// Instrument parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstrumentError {
    #[error("Invalid instrument {0:?}, expected BASE/QUOTE")]
    Malformed(String),
}

pub type ClobResult<T> = std::result::Result<T, ClobError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_error_insufficient_display() {
        let err = AccountError::Insufficient {
            asset: "USDT".to_string(),
            required: 1500,
            available: 1000,
        };
        assert!(err.to_string().contains("USDT"));
        assert!(err.to_string().contains("1500"));
    }

    #[test]
    fn test_clob_error_from_account_error() {
        let err: ClobError = AccountError::InvalidName.into();
        assert!(matches!(err, ClobError::Account(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn test_not_found_display() {
        let err = ClobError::not_found(Entity::Order, "abc");
        assert_eq!(err.to_string(), "Order not found: abc");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_error_kinds() {
        let insufficient: ClobError = AccountError::Insufficient {
            asset: "BTC".to_string(),
            required: 2,
            available: 1,
        }
        .into();
        assert_eq!(insufficient.kind(), ErrorKind::Insufficient);

        let side: ClobError = OrderError::InvalidSide("hold".to_string()).into();
        assert_eq!(side.kind(), ErrorKind::InvalidSide);

        let instrument: ClobError = InstrumentError::Malformed("BTC".to_string()).into();
        assert_eq!(instrument.kind(), ErrorKind::InvalidInstrument);
    }
}
