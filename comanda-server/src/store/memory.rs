//! In-memory order store
//!
//! `DashMap`-backed implementation. Conditional status updates run under the
//! entry's shard lock, so two racing transitions cannot both win.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use shared::order::dto::CreateOrderRequest;
use shared::order::{Order, OrderItem, OrderKind, OrderStatus};

use super::OrderStore;
use crate::orders::money::{to_decimal, to_f64, validate_item_input, validate_order_amount};
use crate::orders::{OrderError, OrderResult};
use crate::utils::time::now_millis;

/// In-process order store
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: DashMap<String, Order>,
    /// Per-restaurant order number counters. Numbers are assigned once and
    /// never reused, even when the order is later cancelled.
    counters: Mutex<HashMap<String, i64>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_order_number(&self, restaurant_id: &str) -> i64 {
        let mut counters = self.counters.lock();
        let counter = counters.entry(restaurant_id.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Number of stored orders, terminal ones included (history is append-only).
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create_order(&self, req: CreateOrderRequest) -> OrderResult<Order> {
        if req.restaurant_id.trim().is_empty() {
            return Err(OrderError::InvalidOperation(
                "restaurant_id must not be empty".to_string(),
            ));
        }
        if req.items.is_empty() {
            return Err(OrderError::InvalidOperation(
                "order must contain at least one item".to_string(),
            ));
        }
        if req.kind == OrderKind::Table && req.table_id.is_none() {
            return Err(OrderError::InvalidOperation(
                "table orders require a table_id".to_string(),
            ));
        }
        validate_order_amount(req.delivery_fee, "delivery_fee")?;
        validate_order_amount(req.coupon_discount, "coupon_discount")?;

        let mut subtotal = Decimal::ZERO;
        let mut items = Vec::with_capacity(req.items.len());
        for input in &req.items {
            validate_item_input(input)?;
            let line_total = to_decimal(input.unit_price) * Decimal::from(input.quantity);
            subtotal += line_total;
            items.push(OrderItem {
                product_id: input.product_id.clone(),
                name: input.name.clone(),
                unit_price: to_f64(to_decimal(input.unit_price)),
                quantity: input.quantity,
                line_total: to_f64(line_total),
                note: input.note.clone(),
            });
        }

        let total = subtotal - to_decimal(req.coupon_discount) + to_decimal(req.delivery_fee);
        if total < Decimal::ZERO {
            return Err(OrderError::InvalidOperation(format!(
                "coupon_discount {} exceeds order value",
                req.coupon_discount
            )));
        }

        let order = Order {
            id: uuid::Uuid::new_v4().to_string(),
            restaurant_id: req.restaurant_id.clone(),
            order_number: self.next_order_number(&req.restaurant_id),
            kind: req.kind,
            table_id: req.table_id,
            customer: req.customer,
            status: OrderStatus::Pending,
            items,
            subtotal: to_f64(subtotal),
            delivery_fee: req.delivery_fee,
            coupon_discount: req.coupon_discount,
            total: to_f64(total),
            note: req.note,
            cancel_reason: None,
            created_at: now_millis(),
            delivered_at: None,
        };

        self.orders.insert(order.id.clone(), order.clone());
        tracing::debug!(
            order_id = %order.id,
            order_number = order.order_number,
            total = order.total,
            "Order created"
        );
        Ok(order)
    }

    async fn get_order(&self, order_id: &str) -> OrderResult<Order> {
        self.orders
            .get(order_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    async fn active_orders_by_table(
        &self,
        restaurant_id: &str,
        table_id: &str,
    ) -> OrderResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|entry| {
                let o = entry.value();
                o.restaurant_id == restaurant_id
                    && o.table_id.as_deref() == Some(table_id)
                    && o.status.is_billable()
            })
            .map(|entry| entry.value().clone())
            .collect();
        orders.sort_by_key(|o| o.order_number);
        Ok(orders)
    }

    async fn update_status_checked(
        &self,
        order_id: &str,
        expected: OrderStatus,
        new_status: OrderStatus,
        cancel_reason: Option<String>,
    ) -> OrderResult<Order> {
        // get_mut holds the shard lock for the whole check-and-set.
        let mut entry = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;
        let order = entry.value_mut();

        if order.status.is_terminal() || order.status != expected {
            return Err(OrderError::Conflict(format!(
                "order {} is {:?}, expected {:?}",
                order_id, order.status, expected
            )));
        }

        order.status = new_status;
        if new_status == OrderStatus::Delivered {
            order.delivered_at = Some(now_millis());
        }
        if new_status == OrderStatus::Cancelled {
            order.cancel_reason = cancel_reason;
        }
        Ok(order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::dto::OrderItemInput;
    use shared::order::CustomerInfo;

    fn table_request(table_id: &str, customer: &str, items: Vec<(f64, i32)>) -> CreateOrderRequest {
        CreateOrderRequest {
            restaurant_id: "r1".to_string(),
            kind: OrderKind::Table,
            table_id: Some(table_id.to_string()),
            customer: CustomerInfo {
                name: customer.to_string(),
                phone: None,
                address: None,
            },
            items: items
                .into_iter()
                .enumerate()
                .map(|(i, (price, qty))| OrderItemInput {
                    product_id: format!("p{}", i),
                    name: format!("Item {}", i),
                    unit_price: price,
                    quantity: qty,
                    note: None,
                })
                .collect(),
            delivery_fee: 0.0,
            coupon_discount: 0.0,
            note: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_numbers() {
        let store = MemoryOrderStore::new();
        let a = store
            .create_order(table_request("t1", "Ana", vec![(10.0, 1)]))
            .await
            .unwrap();
        let b = store
            .create_order(table_request("t1", "Bruno", vec![(10.0, 1)]))
            .await
            .unwrap();
        assert_eq!(a.order_number, 1);
        assert_eq!(b.order_number, 2);
        assert_eq!(a.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_numbers_not_reused_after_cancel() {
        let store = MemoryOrderStore::new();
        let a = store
            .create_order(table_request("t1", "Ana", vec![(10.0, 1)]))
            .await
            .unwrap();
        store
            .update_status_checked(&a.id, OrderStatus::Pending, OrderStatus::Cancelled, None)
            .await
            .unwrap();
        let b = store
            .create_order(table_request("t1", "Bruno", vec![(10.0, 1)]))
            .await
            .unwrap();
        // The cancelled order keeps number 1; it is never handed out again.
        assert_eq!(b.order_number, 2);
    }

    #[tokio::test]
    async fn test_total_derivation() {
        let mut req = table_request("t1", "Ana", vec![(20.0, 2), (8.0, 1)]);
        req.kind = OrderKind::Delivery;
        req.table_id = None;
        req.delivery_fee = 5.0;
        req.coupon_discount = 3.0;
        let store = MemoryOrderStore::new();
        let order = store.create_order(req).await.unwrap();
        assert_eq!(order.subtotal, 48.0);
        // total = 48 - 3 + 5
        assert_eq!(order.total, 50.0);
        assert_eq!(order.items[0].line_total, 40.0);
    }

    #[tokio::test]
    async fn test_table_order_requires_table_id() {
        let mut req = table_request("t1", "Ana", vec![(10.0, 1)]);
        req.table_id = None;
        let store = MemoryOrderStore::new();
        assert!(matches!(
            store.create_order(req).await,
            Err(OrderError::InvalidOperation(_))
        ));
    }

    #[tokio::test]
    async fn test_excessive_coupon_rejected() {
        let mut req = table_request("t1", "Ana", vec![(10.0, 1)]);
        req.coupon_discount = 20.0;
        let store = MemoryOrderStore::new();
        assert!(store.create_order(req).await.is_err());
    }

    #[tokio::test]
    async fn test_active_orders_excludes_terminal() {
        let store = MemoryOrderStore::new();
        let a = store
            .create_order(table_request("t5", "Ana", vec![(10.0, 1)]))
            .await
            .unwrap();
        let _b = store
            .create_order(table_request("t5", "Bruno", vec![(8.0, 1)]))
            .await
            .unwrap();
        store
            .update_status_checked(&a.id, OrderStatus::Pending, OrderStatus::Cancelled, None)
            .await
            .unwrap();

        let active = store.active_orders_by_table("r1", "t5").await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].customer.name, "Bruno");
    }

    #[tokio::test]
    async fn test_conditional_update_conflict() {
        let store = MemoryOrderStore::new();
        let a = store
            .create_order(table_request("t1", "Ana", vec![(10.0, 1)]))
            .await
            .unwrap();

        store
            .update_status_checked(&a.id, OrderStatus::Pending, OrderStatus::Confirmed, None)
            .await
            .unwrap();

        // Second updater still thinks the order is pending — loses the race.
        let result = store
            .update_status_checked(&a.id, OrderStatus::Pending, OrderStatus::Confirmed, None)
            .await;
        assert!(matches!(result, Err(OrderError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delivered_at_set_only_on_delivery() {
        let store = MemoryOrderStore::new();
        let a = store
            .create_order(table_request("t1", "Ana", vec![(10.0, 1)]))
            .await
            .unwrap();
        assert!(a.delivered_at.is_none());

        let confirmed = store
            .update_status_checked(&a.id, OrderStatus::Pending, OrderStatus::Confirmed, None)
            .await
            .unwrap();
        assert!(confirmed.delivered_at.is_none());

        let delivered = store
            .update_status_checked(&a.id, OrderStatus::Confirmed, OrderStatus::Delivered, None)
            .await
            .unwrap();
        assert!(delivered.delivered_at.is_some());
    }
}
