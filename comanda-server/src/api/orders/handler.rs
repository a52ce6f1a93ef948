//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::order::{CreateOrderRequest, Order, TransitionRequest};

/// POST /api/orders - create an order
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<Order>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let order = state.store.create_order(payload).await?;
    Ok(Json(order))
}

/// GET /api/orders/:id - fetch a single order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.store.get_order(&id).await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/status - advance or cancel an order
pub async fn transition(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TransitionRequest>,
) -> AppResult<Json<Order>> {
    let order = state
        .lifecycle
        .transition(&id, payload.status, payload.reason)
        .await?;
    Ok(Json(order))
}
