use crate::models::HealthResponse;
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        environment: state.environment.as_str(),
        version: types::LIB_VERSION,
    })
}
