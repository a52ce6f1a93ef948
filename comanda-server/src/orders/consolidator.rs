//! Billing consolidator
//!
//! Merges all active orders for a table into a single itemized bill. Items
//! group by `(product_id, unit_price snapshot)` — the same product added to
//! the table at two different prices across two orders must not be silently
//! merged into one price bucket.
//!
//! The bill subtotal is re-derived from item data; the persisted order
//! totals are summed only as a cross-check value (they may carry stale
//! delivery fees that do not apply to a table).

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use shared::order::{BillLine, ConsolidatedBill};

use crate::store::OrderStore;

use super::money::{to_cents, to_decimal, to_f64};
use super::{OrderError, OrderResult};

/// Consolidates a table's active orders into one bill
pub struct BillingConsolidator {
    store: Arc<dyn OrderStore>,
}

impl BillingConsolidator {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Compute the consolidated bill for a table, optionally restricted to a
    /// single customer (exact, case-sensitive name match).
    ///
    /// Returns [`OrderError::EmptyBill`] when no active order matches.
    pub async fn consolidate(
        &self,
        restaurant_id: &str,
        table_id: &str,
        customer_filter: Option<&str>,
    ) -> OrderResult<ConsolidatedBill> {
        let mut orders = self
            .store
            .active_orders_by_table(restaurant_id, table_id)
            .await?;

        if let Some(name) = customer_filter {
            orders.retain(|o| o.customer.name == name);
        }
        if orders.is_empty() {
            return Err(OrderError::EmptyBill(table_id.to_string()));
        }

        // Keyed by (product, cents) so two price snapshots of the same
        // product stay distinct lines; BTreeMap keeps line order stable.
        let mut groups: BTreeMap<(String, i64), BillLine> = BTreeMap::new();
        let mut subtotal = Decimal::ZERO;
        let mut orders_total_sum = Decimal::ZERO;
        let mut source_order_ids = Vec::with_capacity(orders.len());

        for order in &orders {
            orders_total_sum += to_decimal(order.total);
            source_order_ids.push(order.id.clone());

            for item in &order.items {
                let line_total = to_decimal(item.unit_price) * Decimal::from(item.quantity);
                subtotal += line_total;

                let key = (item.product_id.clone(), to_cents(item.unit_price));
                groups
                    .entry(key)
                    .and_modify(|line| {
                        line.quantity += item.quantity;
                        line.line_total =
                            to_f64(to_decimal(line.line_total) + line_total);
                    })
                    .or_insert_with(|| BillLine {
                        product_id: item.product_id.clone(),
                        name: item.name.clone(),
                        unit_price: item.unit_price,
                        quantity: item.quantity,
                        line_total: to_f64(line_total),
                    });
            }
        }

        let bill = ConsolidatedBill {
            restaurant_id: restaurant_id.to_string(),
            table_id: table_id.to_string(),
            customer_filter: customer_filter.map(str::to_string),
            lines: groups.into_values().collect(),
            subtotal: to_f64(subtotal),
            orders_total_sum: to_f64(orders_total_sum),
            source_order_ids,
        };

        tracing::debug!(
            table_id = %table_id,
            orders = bill.source_order_ids.len(),
            lines = bill.lines.len(),
            subtotal = bill.subtotal,
            "Consolidated bill computed"
        );
        Ok(bill)
    }
}
