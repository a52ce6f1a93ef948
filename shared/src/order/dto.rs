//! Request/response payloads for the staff-facing API

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::bill::{ConsolidatedBill, FinalAmounts};
use super::types::{CustomerInfo, OrderKind, OrderStatus};

/// Item payload for order creation (line totals are computed server-side)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemInput {
    #[validate(length(min = 1))]
    pub product_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub unit_price: f64,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// POST /api/orders
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1))]
    pub restaurant_id: String,
    pub kind: OrderKind,
    /// Required for TABLE orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    pub customer: CustomerInfo,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub delivery_fee: f64,
    #[serde(default)]
    pub coupon_discount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// POST /api/orders/{id}/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub status: OrderStatus,
    /// Free-text reason, recorded on cancel transitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// POST /api/tables/{id}/close
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CloseTableRequest {
    pub restaurant_id: String,
    #[serde(default)]
    pub tip_enabled: bool,
    #[serde(default)]
    pub tip_percent: f64,
    #[serde(default)]
    pub split_bill: bool,
    #[serde(default)]
    pub number_of_people: i32,
    #[serde(default)]
    pub close_by_user: bool,
    /// Customer name to close for, when `close_by_user` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_user: Option<String>,
}

/// Result of a table close, sufficient for receipt rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseTableResponse {
    pub bill: ConsolidatedBill,
    pub amounts: FinalAmounts,
    /// Orders actually transitioned to DELIVERED
    pub closed_order_ids: Vec<String>,
    pub closed_count: usize,
}
