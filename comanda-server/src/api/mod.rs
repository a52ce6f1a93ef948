//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`orders`] - order creation, lookup and status transitions
//! - [`tables`] - per-table order views, bill preview and table closing

use axum::Router;

use crate::core::ServerState;

pub mod health;
pub mod orders;
pub mod tables;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Assemble the full application router.
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(tables::router())
        .with_state(state)
}
