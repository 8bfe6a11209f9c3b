use super::run_blocking;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use matching_engine::BookSnapshot;

/// `GET /book/BASE/QUOTE`
pub async fn get_book(
    State(state): State<AppState>,
    Path(instrument): Path<String>,
) -> Result<Json<BookSnapshot>, AppError> {
    let snapshot =
        run_blocking(&state, move |exchange| exchange.snapshot_book(&instrument)).await?;
    Ok(Json(snapshot))
}
