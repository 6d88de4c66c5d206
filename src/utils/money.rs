//! Currency rounding and checked arithmetic helpers

use crate::utils::error::{helpers::validation_error, AppError, AppResult};
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits reported for currency amounts
pub const CURRENCY_SCALE: u32 = 2;

/// Round half-up to two decimals and pad to exactly two fractional digits
pub fn round_currency(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CURRENCY_SCALE);
    rounded
}

/// `rate x units`, rejecting results outside the representable range
pub fn try_mul(rate: Decimal, units: Decimal) -> AppResult<Decimal> {
    rate.checked_mul(units).ok_or_else(out_of_range)
}

pub fn try_add(left: Decimal, right: Decimal) -> AppResult<Decimal> {
    left.checked_add(right).ok_or_else(out_of_range)
}

pub fn try_sub(left: Decimal, right: Decimal) -> AppResult<Decimal> {
    left.checked_sub(right).ok_or_else(out_of_range)
}

/// `value x pct / 100`
pub fn try_percent_of(value: Decimal, pct: Decimal) -> AppResult<Decimal> {
    try_mul(value, pct)?
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or_else(out_of_range)
}

fn out_of_range() -> AppError {
    validation_error("amount out of range")
}
