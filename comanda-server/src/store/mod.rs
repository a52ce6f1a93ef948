//! Order Store — persistence seam
//!
//! The durable record of orders lives behind [`OrderStore`] so the engine
//! never talks to a concrete database. The in-process [`MemoryOrderStore`]
//! backs the single-instance deployment and all tests; a SQL-backed
//! implementation would slot in behind the same trait.

pub mod memory;

pub use memory::MemoryOrderStore;

use async_trait::async_trait;
use shared::order::dto::CreateOrderRequest;
use shared::order::{Order, OrderStatus};

use crate::orders::OrderResult;

/// Persistence operations required by the engine
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Create an order, assigning the restaurant-scoped sequential order
    /// number and deriving `total = subtotal - coupon_discount + delivery_fee`.
    async fn create_order(&self, req: CreateOrderRequest) -> OrderResult<Order>;

    async fn get_order(&self, order_id: &str) -> OrderResult<Order>;

    /// All billable orders referencing the table, ordered by order number.
    /// Billable means status in {PENDING, CONFIRMED, PREPARING, READY}.
    async fn active_orders_by_table(
        &self,
        restaurant_id: &str,
        table_id: &str,
    ) -> OrderResult<Vec<Order>>;

    /// Conditional status update: applies only if the current status equals
    /// `expected` and is non-terminal, atomically. Losing the race returns
    /// [`crate::orders::OrderError::Conflict`].
    ///
    /// Sets `delivered_at` iff `new_status` is DELIVERED, and records
    /// `cancel_reason` iff `new_status` is CANCELLED.
    async fn update_status_checked(
        &self,
        order_id: &str,
        expected: OrderStatus,
        new_status: OrderStatus,
        cancel_reason: Option<String>,
    ) -> OrderResult<Order>;
}
