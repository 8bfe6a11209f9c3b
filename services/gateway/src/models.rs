use serde::{Deserialize, Serialize};
use types::ids::AccountId;
use types::numeric::{Amount, Price, Quantity};
use types::order::Order;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreditRequest {
    pub asset: String,
    pub amount: Amount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferRequest {
    pub to_account_id: AccountId,
    pub asset: String,
    pub amount: Amount,
}

/// Side and instrument stay raw strings; the core validates them in order
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub account_id: AccountId,
    pub instrument: String,
    pub side: String,
    pub price: Price,
    pub qty: Quantity,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderResponse {
    pub order: Order,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub environment: &'static str,
    pub version: &'static str,
}
