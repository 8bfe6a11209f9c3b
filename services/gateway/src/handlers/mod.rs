pub mod account;
pub mod book;
pub mod health;
pub mod order;

use crate::error::AppError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use matching_engine::Exchange;
use std::str::FromStr;
use std::sync::Arc;
use types::errors::ClobResult;

/// Run an `Exchange` call on the blocking pool
///
/// Exchange operations wait on book and account mutexes; they must not park
/// an async worker thread while doing so.
pub(crate) async fn run_blocking<T, F>(state: &AppState, call: F) -> Result<T, AppError>
where
    F: FnOnce(&Exchange) -> ClobResult<T> + Send + 'static,
    T: Send + 'static,
{
    let exchange = Arc::clone(&state.exchange);
    let result = tokio::task::spawn_blocking(move || call(exchange.as_ref()))
        .await
        .map_err(anyhow::Error::from)?;
    Ok(result?)
}

/// Unwrap a JSON body, reporting rejections in the gateway's error shape
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Parse an id taken from the request path
pub(crate) fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {what} id: {raw:?}")))
}
