//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic is done in `Decimal` internally, then converted to
//! `f64` for storage/serialization. Every rounding site uses the same
//! strategy (2 decimal places, half-up) so a displayed amount never drifts a
//! cent from a stored one.

use rust_decimal::prelude::*;
use shared::order::dto::OrderItemInput;

use super::OrderError;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed unit price per item
const MAX_UNIT_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per item
const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed order-level fee/discount
const MAX_ORDER_AMOUNT: f64 = 1_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), OrderError> {
    if !value.is_finite() {
        return Err(OrderError::InvalidOperation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate an item payload before it enters an order
pub fn validate_item_input(item: &OrderItemInput) -> Result<(), OrderError> {
    require_finite(item.unit_price, "unit_price")?;
    if item.unit_price < 0.0 {
        return Err(OrderError::InvalidOperation(format!(
            "unit_price must be non-negative, got {}",
            item.unit_price
        )));
    }
    if item.unit_price > MAX_UNIT_PRICE {
        return Err(OrderError::InvalidOperation(format!(
            "unit_price exceeds maximum allowed ({}), got {}",
            MAX_UNIT_PRICE, item.unit_price
        )));
    }

    if item.quantity <= 0 {
        return Err(OrderError::InvalidOperation(format!(
            "quantity must be positive, got {}",
            item.quantity
        )));
    }
    if item.quantity > MAX_QUANTITY {
        return Err(OrderError::InvalidOperation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, item.quantity
        )));
    }

    if item.product_id.trim().is_empty() {
        return Err(OrderError::InvalidOperation(
            "product_id must not be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validate an order-level monetary field (delivery fee, coupon discount)
pub fn validate_order_amount(value: f64, field_name: &str) -> Result<(), OrderError> {
    require_finite(value, field_name)?;
    if value < 0.0 {
        return Err(OrderError::InvalidOperation(format!(
            "{} must be non-negative, got {}",
            field_name, value
        )));
    }
    if value > MAX_ORDER_AMOUNT {
        return Err(OrderError::InvalidOperation(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field_name, MAX_ORDER_AMOUNT, value
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a Decimal to the money precision without leaving Decimal space
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Snapshot unit price as integer cents, for exact grouping keys.
///
/// Bill lines group by `(product_id, unit_price)`; f64 is unusable as a map
/// key, so the price is normalized to cents first.
#[inline]
pub fn to_cents(value: f64) -> i64 {
    (to_decimal(value) * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .unwrap_or_default()
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
