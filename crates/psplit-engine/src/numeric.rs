//! Integer coercion and split helpers.
//!
//! Every monetary value in the engine is a whole `i64` unit. Raw user input
//! arrives as `f64` (it may be fractional, negative, NaN or infinite) and is
//! coerced here before any arithmetic happens:
//!
//! - non-finite → 0
//! - fractional → floor
//! - magnitude clamped to [`MAX_SAFE_INTEGER`], the largest integer the
//!   persisted snapshot format can carry exactly
//!
//! Amount-like fields (gross, incentive, penalty) are additionally clamped at 0.

/// Largest integer exactly representable in an `f64` (2^53 − 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Coerce a raw numeric value to an integer: non-finite → 0, fractional → floor.
#[inline]
pub fn clamp_int(v: f64) -> i64 {
    if !v.is_finite() {
        return 0;
    }
    let f = v.floor();
    if f >= MAX_SAFE_INTEGER as f64 {
        MAX_SAFE_INTEGER
    } else if f <= -(MAX_SAFE_INTEGER as f64) {
        -MAX_SAFE_INTEGER
    } else {
        f as i64
    }
}

/// Coerce an amount-like field: like [`clamp_int`] but never negative.
#[inline]
pub fn clamp_amount(v: f64) -> i64 {
    clamp_int(v).max(0)
}

/// Fee deducted from `gross` at `fee_rate` percent, truncated toward zero.
///
/// `floor(gross * fee_rate / 100)`, clamped to `[0, gross]`. A non-finite
/// rate is treated as 0 %.
pub fn fee_amount(gross: i64, fee_rate: f64) -> i64 {
    if gross <= 0 || !fee_rate.is_finite() {
        return 0;
    }
    let fee = (gross as f64 * fee_rate / 100.0).floor();
    if fee <= 0.0 {
        0
    } else if fee >= gross as f64 {
        gross
    } else {
        fee as i64
    }
}

/// Net amount of one income entry after its fee; never negative.
#[inline]
pub fn net_amount(gross: i64, fee_rate: f64) -> i64 {
    (gross - fee_amount(gross, fee_rate)).max(0)
}

/// Split `amount` into `n` integer shares that sum to exactly `amount`.
///
/// Each share is `floor(amount / n)`; the first `amount mod n` shares get one
/// extra unit. Returns an empty vector when `n == 0`.
pub fn split_evenly(amount: i64, n: usize) -> Vec<i64> {
    if n == 0 {
        return Vec::new();
    }
    let count = n as i64;
    let per = amount.div_euclid(count);
    let rem = amount.rem_euclid(count);
    (0..count).map(|k| per + i64::from(k < rem)).collect()
}

/// Sum that clamps at `i64::MAX` instead of overflowing.
pub fn sum_saturating<I: IntoIterator<Item = i64>>(values: I) -> i64 {
    values.into_iter().fold(0i64, |acc, v| acc.saturating_add(v))
}
