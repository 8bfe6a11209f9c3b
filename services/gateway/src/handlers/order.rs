use super::{json_body, parse_id, run_blocking};
use crate::error::AppError;
use crate::models::{CancelOrderResponse, CreateOrderRequest};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use matching_engine::{PlaceOrderRequest, PlacedOrder};
use types::ids::OrderId;
use types::order::Order;

pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlacedOrder>), AppError> {
    let request = json_body(payload)?;
    let request = PlaceOrderRequest {
        account_id: request.account_id,
        instrument: request.instrument,
        side: request.side,
        price: request.price,
        quantity: request.qty,
    };

    let placed = run_blocking(&state, move |exchange| exchange.place_order(request)).await?;
    Ok((StatusCode::CREATED, Json(placed)))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<CancelOrderResponse>, AppError> {
    let order_id: OrderId = parse_id(&order_id, "order")?;
    let order = run_blocking(&state, move |exchange| exchange.cancel_order(order_id)).await?;

    Ok(Json(CancelOrderResponse {
        order,
        status: "canceled",
    }))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, AppError> {
    let order_id: OrderId = parse_id(&order_id, "order")?;
    let order = run_blocking(&state, move |exchange| exchange.get_order(order_id)).await?;
    Ok(Json(order))
}
