//! Table billing API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::order::{CloseTableRequest, CloseTableResponse, ConsolidatedBill, Order};

#[derive(Debug, Deserialize)]
pub struct TableQuery {
    pub restaurant_id: String,
    /// Restrict the view to one customer's orders (exact name match)
    pub customer: Option<String>,
}

/// GET /api/tables/:id/orders - active orders currently open on a table
pub async fn active_orders(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<TableQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let mut orders = state
        .store
        .active_orders_by_table(&query.restaurant_id, &id)
        .await?;

    if let Some(name) = &query.customer {
        orders.retain(|o| o.customer.name == *name);
    }

    Ok(Json(orders))
}

/// GET /api/tables/:id/bill-preview - consolidated bill without closing
pub async fn bill_preview(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<TableQuery>,
) -> AppResult<Json<ConsolidatedBill>> {
    let bill = state
        .consolidator
        .consolidate(&query.restaurant_id, &id, query.customer.as_deref())
        .await?;
    Ok(Json(bill))
}

/// POST /api/tables/:id/close - settle and close the table
pub async fn close(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CloseTableRequest>,
) -> AppResult<Json<CloseTableResponse>> {
    let response = state.closer.close_table(&id, payload).await?;
    Ok(Json(response))
}
