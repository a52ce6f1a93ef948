//! Tip & split settlement calculator
//!
//! Pure arithmetic over a consolidated bill subtotal. No I/O, no state:
//! given the same inputs the same final amounts come out, rounded with the
//! single money strategy so a printed per-person share never disagrees with
//! the stored total by a cent of drift.

use rust_decimal::Decimal;
use shared::order::{FinalAmounts, SettlementOptions};

use super::money::{round_money, to_decimal, to_f64};

/// Tip percentage bounds; out-of-range values are clamped, not rejected.
pub const MAX_TIP_PERCENT: f64 = 30.0;

/// Compute final payable amounts from a bill subtotal and tip/split options.
///
/// - `tip_amount = subtotal * tip_percent / 100` when tipping is enabled,
///   with the percentage clamped to `[0, 30]`; otherwise zero.
/// - `total = subtotal + tip_amount`
/// - `per_person = total / number_of_people` when splitting is enabled, with
///   the head count coerced to at least 1; otherwise `total`.
pub fn compute_final(subtotal: f64, opts: &SettlementOptions) -> FinalAmounts {
    let subtotal_dec = to_decimal(subtotal);

    let tip = if opts.tip_enabled {
        let percent = to_decimal(opts.tip_percent.clamp(0.0, MAX_TIP_PERCENT));
        round_money(subtotal_dec * percent / Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    let total = subtotal_dec + tip;

    let per_person = if opts.split_enabled {
        let people = Decimal::from(opts.number_of_people.max(1));
        round_money(total / people)
    } else {
        round_money(total)
    };

    FinalAmounts {
        subtotal: to_f64(subtotal_dec),
        tip_amount: to_f64(tip),
        total: to_f64(total),
        per_person: to_f64(per_person),
    }
}
