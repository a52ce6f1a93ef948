//! Order lifecycle and table billing engine
//!
//! - **money**: decimal arithmetic helpers and input validation
//! - **lifecycle**: the order state machine (per-kind transition policy)
//! - **consolidator**: merges a table's active orders into one itemized bill
//! - **settlement**: pure tip/split arithmetic over a consolidated bill
//! - **closing**: the table-closing orchestrator (single-flight per table)
//!
//! # Control flow
//!
//! ```text
//! staff action ─┬─> OrderLifecycle::transition (single order)
//!               └─> TableCloser::close_table (multi-order)
//!                        ├─ BillingConsolidator::consolidate
//!                        ├─ settlement::compute_final
//!                        └─ OrderLifecycle::transition (per snapshot order)
//!                               ├─ OrderStore mutation (conditional)
//!                               └─ Notifier::enqueue (fire-and-forget)
//! ```

pub mod closing;
pub mod consolidator;
pub mod lifecycle;
pub mod money;
pub mod settlement;

pub use closing::{CloseError, TableCloser};
pub use consolidator::BillingConsolidator;
pub use lifecycle::OrderLifecycle;

use shared::order::OrderStatus;

/// Domain errors for order operations
///
/// All of these are recoverable at the caller/UI level by re-querying current
/// state; none should crash the process.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Invalid transition for order {order_id}: {from:?} -> {to:?}")]
    InvalidTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Lost the race on a conditional status update. The caller should
    /// refetch and retry or surface "already updated by someone else".
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// No active orders matched a bill consolidation request.
    #[error("No active orders to bill for table {0}")]
    EmptyBill(String),
}

pub type OrderResult<T> = Result<T, OrderError>;
