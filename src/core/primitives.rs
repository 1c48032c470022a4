use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// Number of decimal digits kept when turning tick sizes into integers.
pub const TICK_DECIMAL_DIGITS: u32 = 6;

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Converts epoch seconds back to a UTC datetime at millisecond precision.
#[must_use]
pub fn unix_seconds_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis((seconds * 1000.0).round() as i64)
}

#[must_use]
pub fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Integer LCM; `None` on overflow or when either side is zero.
#[must_use]
pub fn lcm(a: u128, b: u128) -> Option<u128> {
    if a == 0 || b == 0 {
        return None;
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Scales a positive tick size to an integer count of `10^-6` units.
///
/// Returns `None` for non-finite, non-positive, or sub-resolution sizes.
#[must_use]
pub fn tick_to_scaled_integer(tick: f64) -> Option<u128> {
    if !tick.is_finite() || tick <= 0.0 {
        return None;
    }
    let rounded = Decimal::from_f64(tick)?.round_dp(TICK_DECIMAL_DIGITS);
    let scaled = rounded.checked_mul(Decimal::from(10u64.pow(TICK_DECIMAL_DIGITS)))?;
    let value = scaled.trunc().to_u128()?;
    (value > 0).then_some(value)
}

/// Inverse of [`tick_to_scaled_integer`].
#[must_use]
pub fn scaled_integer_to_tick(value: u128) -> Option<f64> {
    let mantissa = i128::try_from(value).ok()?;
    Decimal::try_from_i128_with_scale(mantissa, TICK_DECIMAL_DIGITS)
        .ok()?
        .to_f64()
}
