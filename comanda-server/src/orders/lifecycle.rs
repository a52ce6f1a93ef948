//! Order state machine
//!
//! Validates and applies status transitions for a single order, then fires a
//! customer notification. Transition rules are forward-or-cancel: staff may
//! skip stages (a dish can go straight from PENDING to READY), but the status
//! never moves backwards, and terminal states admit nothing further.
//!
//! Which targets a kind may reach at all comes from a per-kind policy table
//! rather than kind checks scattered through the flow: delivery orders own
//! the OUT_FOR_DELIVERY leg, table and pickup orders never enter it.

use std::sync::Arc;

use shared::order::{Order, OrderKind, OrderStatus};

use crate::notify::{Notifier, StatusNotification};
use crate::store::OrderStore;

use super::{OrderError, OrderResult};

/// Transition targets reachable by delivery orders
const DELIVERY_TARGETS: &[OrderStatus] = &[
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::OutForDelivery,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
];

/// Transition targets reachable by table and pickup orders
const ON_PREMISE_TARGETS: &[OrderStatus] = &[
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
];

/// Per-kind transition policy, looked up once per transition call
fn allowed_targets(kind: OrderKind) -> &'static [OrderStatus] {
    match kind {
        OrderKind::Delivery => DELIVERY_TARGETS,
        OrderKind::Table | OrderKind::Pickup => ON_PREMISE_TARGETS,
    }
}

/// Order state machine over an [`OrderStore`]
pub struct OrderLifecycle {
    store: Arc<dyn OrderStore>,
    notifier: Notifier,
}

impl OrderLifecycle {
    pub fn new(store: Arc<dyn OrderStore>, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    /// Check a proposed transition against the rules, without applying it.
    pub fn validate(order: &Order, new_status: OrderStatus) -> OrderResult<()> {
        let invalid = || OrderError::InvalidTransition {
            order_id: order.id.clone(),
            from: order.status,
            to: new_status,
        };

        if order.status.is_terminal() {
            return Err(invalid());
        }
        // Explicit cancel is allowed from any non-terminal state.
        if new_status == OrderStatus::Cancelled {
            return Ok(());
        }
        if !allowed_targets(order.kind).contains(&new_status) {
            return Err(invalid());
        }
        // Forward-only; re-applying the current status is also rejected.
        if new_status.rank() <= order.status.rank() {
            return Err(invalid());
        }
        Ok(())
    }

    /// Apply a status transition.
    ///
    /// The persist step is conditional on the status read here, so of two
    /// staff terminals racing on the same order exactly one wins; the loser
    /// gets [`OrderError::Conflict`]. On success a customer notification is
    /// queued — never awaited, and never able to revert the change.
    pub async fn transition(
        &self,
        order_id: &str,
        new_status: OrderStatus,
        reason: Option<String>,
    ) -> OrderResult<Order> {
        let order = self.store.get_order(order_id).await?;
        Self::validate(&order, new_status)?;

        let updated = self
            .store
            .update_status_checked(order_id, order.status, new_status, reason)
            .await?;

        tracing::info!(
            order_id = %updated.id,
            order_number = updated.order_number,
            from = ?order.status,
            to = ?new_status,
            "Order status transition"
        );

        self.notifier.enqueue(StatusNotification {
            order_id: updated.id.clone(),
            order_number: updated.order_number,
            customer: updated.customer.clone(),
            new_status,
        });

        Ok(updated)
    }
}
