//! Money conversion utilities
//!
//! Domain values are `rust_decimal::Decimal`; storage keeps integer cents so
//! sums and comparisons in SQL are exact.

use rust_decimal::prelude::*;

/// Minor units per major unit
const CENTS_PER_UNIT: Decimal = Decimal::ONE_HUNDRED;

/// Fractional digits allowed for a price
pub const DECIMAL_PLACES: u32 = 2;

/// Largest amount with at most 10 significant digits at 2 decimal places
pub const MAX_AMOUNT_CENTS: i64 = 9_999_999_999;

/// Convert an exact amount to cents; `None` if it has more than two
/// decimals or does not fit.
pub fn to_cents(value: Decimal) -> Option<i64> {
    let cents = value.checked_mul(CENTS_PER_UNIT)?;
    if !cents.fract().is_zero() {
        return None;
    }
    cents.to_i64()
}

/// Convert cents back to a two-decimal amount
#[inline]
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, DECIMAL_PLACES)
}

/// Smallest cent value `>= value` (inclusive lower bound)
pub fn ceil_cents(value: Decimal) -> Option<i64> {
    value.checked_mul(CENTS_PER_UNIT)?.ceil().to_i64()
}

/// Largest cent value `<= value` (inclusive upper bound)
pub fn floor_cents(value: Decimal) -> Option<i64> {
    value.checked_mul(CENTS_PER_UNIT)?.floor().to_i64()
}

/// Sum `unit_cents * quantity` over lines, `None` on overflow
pub fn line_total_cents<I>(lines: I) -> Option<i64>
where
    I: IntoIterator<Item = (i64, i64)>,
{
    lines.into_iter().try_fold(0i64, |acc, (unit_cents, quantity)| {
        acc.checked_add(unit_cents.checked_mul(quantity)?)
    })
}
