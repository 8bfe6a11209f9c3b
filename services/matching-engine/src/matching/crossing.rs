//! Crossing detection logic
//!
//! Determines when a bid and ask can match based on price compatibility

use types::numeric::Price;
use types::order::Side;

/// Check if a bid and ask can match at given prices
///
/// For a buy order to match with a sell order the buy price must be >= the
/// sell price.
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming order can match against a resting order
///
/// Returns true if the incoming limit crosses the resting price
pub fn incoming_can_match(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
    match incoming_side {
        Side::BUY => can_match(incoming_price, resting_price),
        Side::SELL => can_match(resting_price, incoming_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_match_crossing() {
        assert!(can_match(50000, 49000), "Bid >= ask should match");
    }

    #[test]
    fn test_can_match_exact() {
        assert!(can_match(50000, 50000), "Equal prices should match");
    }

    #[test]
    fn test_can_match_no_cross() {
        assert!(!can_match(49000, 50000), "Bid < ask should not match");
    }

    #[test]
    fn test_incoming_buy_can_match() {
        assert!(incoming_can_match(Side::BUY, 50000, 49000));
        assert!(!incoming_can_match(Side::BUY, 48000, 49000));
    }

    #[test]
    fn test_incoming_sell_can_match() {
        assert!(incoming_can_match(Side::SELL, 49000, 50000));
        assert!(incoming_can_match(Side::SELL, 50000, 50000));
        assert!(!incoming_can_match(Side::SELL, 51000, 50000));
    }
}
