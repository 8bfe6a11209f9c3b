use crate::handlers::{account, book, health, order};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/accounts", post(account::create_account))
        .route("/accounts/{id}", get(account::get_account))
        .route("/accounts/{id}/credit", post(account::credit_account))
        .route("/accounts/{id}/transfer", post(account::transfer))
        .route("/orders", post(order::create_order))
        .route("/orders/{id}", get(order::get_order))
        .route("/orders/{id}/cancel", post(order::cancel_order))
        .route("/book/{*instrument}", get(book::get_book))
        .route("/health", get(health::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
