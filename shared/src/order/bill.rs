//! Consolidated bill shapes
//!
//! These are ephemeral, computed values — never persisted. A bill is
//! recomputed from item data on every preview/close; the persisted order
//! `total` is carried along only as a cross-check.

use serde::{Deserialize, Serialize};

/// One merged line of a consolidated bill
///
/// Lines are keyed by `(product_id, unit_price)`: the same product ordered at
/// two different historical unit prices stays two distinct lines — prices are
/// never averaged or overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillLine {
    pub product_id: String,
    /// Product name snapshot from the contributing items
    pub name: String,
    pub unit_price: f64,
    /// Summed quantity across all contributing orders
    pub quantity: i32,
    /// Summed line totals across all contributing orders
    pub line_total: f64,
}

/// Itemized bill for all active orders on a table (optionally one customer's)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsolidatedBill {
    pub restaurant_id: String,
    pub table_id: String,
    /// Customer-name filter applied, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_filter: Option<String>,
    pub lines: Vec<BillLine>,
    /// Authoritative subtotal: sum of the grouped line totals
    pub subtotal: f64,
    /// Independent cross-check: sum of the source orders' persisted totals.
    /// May differ from `subtotal` (stale delivery fees, coupon discounts);
    /// the consolidator never trusts it.
    pub orders_total_sum: f64,
    /// Orders contributing to this bill. Closing must transition exactly this
    /// set — never an order created after the snapshot was taken.
    pub source_order_ids: Vec<String>,
}

impl ConsolidatedBill {
    pub fn is_empty(&self) -> bool {
        self.source_order_ids.is_empty()
    }
}

/// Tip and split configuration for final settlement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct SettlementOptions {
    #[serde(default)]
    pub tip_enabled: bool,
    /// Clamped to [0, 30] during computation
    #[serde(default)]
    pub tip_percent: f64,
    #[serde(default)]
    pub split_enabled: bool,
    /// Coerced to >= 1 during computation
    #[serde(default)]
    pub number_of_people: i32,
}

/// Final payable amounts produced by the settlement calculator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FinalAmounts {
    pub subtotal: f64,
    pub tip_amount: f64,
    pub total: f64,
    pub per_person: f64,
}
