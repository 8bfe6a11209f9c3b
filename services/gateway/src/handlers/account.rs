use super::{json_body, parse_id, run_blocking};
use crate::error::AppError;
use crate::models::{CreateAccountRequest, CreditRequest, TransferRequest};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use matching_engine::TransferReceipt;
use types::account::Account;
use types::ids::AccountId;

pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let request = json_body(payload)?;
    let account =
        run_blocking(&state, move |exchange| exchange.create_account(&request.name)).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

pub async fn credit_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    payload: Result<Json<CreditRequest>, JsonRejection>,
) -> Result<Json<Account>, AppError> {
    let account_id: AccountId = parse_id(&account_id, "account")?;
    let request = json_body(payload)?;

    let account = run_blocking(&state, move |exchange| {
        exchange.credit_account(account_id, &request.asset, request.amount)
    })
    .await?;
    Ok(Json(account))
}

/// `POST /accounts/{id}/transfer`
pub async fn transfer(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<TransferReceipt>, AppError> {
    let from: AccountId = parse_id(&account_id, "account")?;
    let request = json_body(payload)?;

    let receipt = run_blocking(&state, move |exchange| {
        exchange.transfer(from, request.to_account_id, &request.asset, request.amount)
    })
    .await?;
    Ok(Json(receipt))
}

pub async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<Account>, AppError> {
    let account_id: AccountId = parse_id(&account_id, "account")?;
    let account = run_blocking(&state, move |exchange| exchange.get_account(account_id)).await?;
    Ok(Json(account))
}
