//! Table closing orchestrator
//!
//! The only multi-step operation in the engine that needs atomicity
//! guarantees. Per `(restaurant, table)` the close is single-flight: a
//! bounded-wait mutex serializes concurrent attempts so two closes can never
//! each take a snapshot and settle overlapping order sets.
//!
//! Closing semantics are best-effort forward progress: orders that already
//! transitioned to DELIVERED stay delivered even if a later order in the
//! batch fails — a dish already served cannot be un-served by a system
//! glitch. The caller gets the full picture either way.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde::Serialize;
use shared::order::dto::{CloseTableRequest, CloseTableResponse};
use shared::order::{OrderStatus, SettlementOptions};
use tokio::sync::Mutex;
use tokio::time::timeout;

use super::consolidator::BillingConsolidator;
use super::lifecycle::OrderLifecycle;
use super::settlement::compute_final;
use super::OrderError;

/// An order from the closing snapshot that could not be transitioned
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FailedClose {
    pub order_id: String,
    pub reason: String,
}

/// Failure modes of `close_table`
#[derive(Debug, Clone, thiserror::Error)]
pub enum CloseError {
    /// Another close is in progress; the caller should retry or inform staff.
    #[error("Another close is already in progress for table {0}")]
    TableLockBusy(String),

    #[error("No active orders to close for table {0}")]
    NothingToClose(String),

    /// Some snapshot orders closed, some did not. Already-closed orders are
    /// NOT rolled back.
    #[error("Table {table_id} partially closed: {} closed, {} failed", closed.len(), failed.len())]
    PartialCloseFailure {
        table_id: String,
        closed: Vec<String>,
        failed: Vec<FailedClose>,
    },

    #[error(transparent)]
    Order(#[from] OrderError),
}

type TableKey = (String, String);

/// Coordinates bill recomputation, settlement, and batch delivery transitions
pub struct TableCloser {
    consolidator: BillingConsolidator,
    lifecycle: Arc<OrderLifecycle>,
    /// Single-flight locks, lazily created per table
    locks: DashMap<TableKey, Arc<Mutex<()>>>,
    /// Bounded wait for the table lock; expiry surfaces `TableLockBusy`
    /// instead of hanging a staff request.
    lock_wait: Duration,
}

impl TableCloser {
    pub fn new(
        consolidator: BillingConsolidator,
        lifecycle: Arc<OrderLifecycle>,
        lock_wait: Duration,
    ) -> Self {
        Self {
            consolidator,
            lifecycle,
            locks: DashMap::new(),
            lock_wait,
        }
    }

    fn table_lock(&self, restaurant_id: &str, table_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry((restaurant_id.to_string(), table_id.to_string()))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Close a table: recompute the bill, settle tip/split, and transition
    /// every snapshot order to DELIVERED.
    ///
    /// Only orders in the consolidated snapshot are touched — an order
    /// created after the snapshot is taken is never silently folded in.
    pub async fn close_table(
        &self,
        table_id: &str,
        req: CloseTableRequest,
    ) -> Result<CloseTableResponse, CloseError> {
        if req.close_by_user && req.selected_user.is_none() {
            return Err(OrderError::InvalidOperation(
                "close_by_user requires selected_user".to_string(),
            )
            .into());
        }

        // 1. Acquire the per-table closing lock with a bounded wait.
        let lock = self.table_lock(&req.restaurant_id, table_id);
        let _guard = timeout(self.lock_wait, lock.lock())
            .await
            .map_err(|_| CloseError::TableLockBusy(table_id.to_string()))?;

        // 2. Recompute the bill under the lock.
        let customer_filter = req
            .close_by_user
            .then(|| req.selected_user.clone())
            .flatten();
        let bill = self
            .consolidator
            .consolidate(&req.restaurant_id, table_id, customer_filter.as_deref())
            .await
            .map_err(|e| match e {
                OrderError::EmptyBill(t) => CloseError::NothingToClose(t),
                other => CloseError::Order(other),
            })?;

        // 3. Settle with the caller-supplied tip/split parameters.
        let amounts = compute_final(
            bill.subtotal,
            &SettlementOptions {
                tip_enabled: req.tip_enabled,
                tip_percent: req.tip_percent,
                split_enabled: req.split_bill,
                number_of_people: req.number_of_people,
            },
        );

        // 4. Transition exactly the snapshot's source orders. No rollback of
        // successes on later failures.
        let mut closed = Vec::with_capacity(bill.source_order_ids.len());
        let mut failed = Vec::new();
        for order_id in &bill.source_order_ids {
            match self
                .lifecycle
                .transition(order_id, OrderStatus::Delivered, None)
                .await
            {
                Ok(_) => closed.push(order_id.clone()),
                Err(e) => {
                    tracing::warn!(order_id = %order_id, error = %e, "Order failed to close");
                    failed.push(FailedClose {
                        order_id: order_id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        // 5. Lock released on guard drop; notification dispatch is queued,
        // not awaited, so nothing network-bound ran under the lock.
        if !failed.is_empty() {
            return Err(CloseError::PartialCloseFailure {
                table_id: table_id.to_string(),
                closed,
                failed,
            });
        }

        tracing::info!(
            table_id = %table_id,
            orders = closed.len(),
            total = amounts.total,
            "Table closed"
        );

        Ok(CloseTableResponse {
            bill,
            amounts,
            closed_count: closed.len(),
            closed_order_ids: closed,
        })
    }
}
