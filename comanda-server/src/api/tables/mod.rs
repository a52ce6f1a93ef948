//! Table billing API module

mod handler;

use axum::{Router, routing::{get, post}};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}/orders", get(handler::active_orders))
        .route("/{id}/bill-preview", get(handler::bill_preview))
        .route("/{id}/close", post(handler::close))
}
