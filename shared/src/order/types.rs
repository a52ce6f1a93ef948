//! Persistent order shapes
//!
//! An order is created once, mutated only through the state machine, and
//! never physically deleted — history is append-only via the status field.

use serde::{Deserialize, Serialize};

/// Order status
///
/// Forward path: `PENDING → CONFIRMED → PREPARING → READY → OUT_FOR_DELIVERY
/// → DELIVERED`. `CANCELLED` is terminal and reachable from any non-terminal
/// state. Which targets a given order may reach also depends on its
/// [`OrderKind`] (see the lifecycle policy table in the server crate).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether the order still counts toward a table's open bill.
    ///
    /// `OUT_FOR_DELIVERY` is excluded: a table order is never out for
    /// delivery, and delivered/cancelled orders have left the active ledger.
    pub fn is_billable(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending
                | OrderStatus::Confirmed
                | OrderStatus::Preparing
                | OrderStatus::Ready
        )
    }

    /// Position along the forward path, used to reject regressions.
    pub fn rank(&self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Confirmed => 1,
            OrderStatus::Preparing => 2,
            OrderStatus::Ready => 3,
            OrderStatus::OutForDelivery => 4,
            OrderStatus::Delivered => 5,
            // Cancelled sits outside the forward path; it is only ever
            // reached through the explicit cancel rule.
            OrderStatus::Cancelled => u8::MAX,
        }
    }
}

/// Order kind (fulfilment channel)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    Delivery,
    #[default]
    Table,
    Pickup,
}

/// Customer identity as captured at order time (free-form, not normalized)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CustomerInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A line item within an order
///
/// `unit_price` is a snapshot taken at order time — never re-read from the
/// live product price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Product reference
    pub product_id: String,
    /// Product name snapshot (for receipts)
    pub name: String,
    /// Unit price snapshot at order time
    pub unit_price: f64,
    /// Quantity (positive)
    pub quantity: i32,
    /// Computed line total = quantity * unit_price
    pub line_total: f64,
    /// Special instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Order record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Server-assigned ID
    pub id: String,
    /// Owning restaurant
    pub restaurant_id: String,
    /// Restaurant-scoped sequential number — unique, monotonically
    /// increasing, assigned at creation, never reused even after cancellation
    pub order_number: i64,
    pub kind: OrderKind,
    /// Table reference for TABLE orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    pub customer: CustomerInfo,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    /// Sum of line totals
    pub subtotal: f64,
    #[serde(default)]
    pub delivery_fee: f64,
    #[serde(default)]
    pub coupon_discount: f64,
    /// total = subtotal - coupon_discount + delivery_fee, derived at creation
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Reason supplied with a cancel transition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    /// Creation timestamp (epoch millis)
    pub created_at: i64,
    /// Set only on transition into DELIVERED (epoch millis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<i64>,
}
