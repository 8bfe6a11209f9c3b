//! Fixed-point integer types for prices, quantities and ledger amounts
//!
//! Everything is counted in integer units of the smallest tick; there is no
//! floating point in the ledger. Products are computed with checked arithmetic.

use crate::errors::ClobError;

/// Limit or execution price, in quote units per base unit
pub type Price = i64;

/// Order or trade quantity, in base units
pub type Quantity = i64;

/// Ledger amount of a single asset
pub type Amount = i64;

/// Quote value of `quantity` at `price`
///
/// Overflow is reported as an invalid parameter rather than wrapping.
pub fn notional(price: Price, quantity: Quantity) -> Result<Amount, ClobError> {
    price.checked_mul(quantity).ok_or_else(|| {
        ClobError::invalid_parameter(format!("notional overflow: {price} x {quantity}"))
    })
}
