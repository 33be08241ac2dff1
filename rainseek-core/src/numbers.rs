//! Numeric conversion helpers centralizing lossy casts.

use num_traits::cast::cast;

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Round to two decimal places, the precision used by progress frames.
#[must_use]
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

/// Percentage of `part` over `whole`, rounded to two decimals.
#[must_use]
pub fn percent(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    round2(i64_to_f64(part) / i64_to_f64(whole) * 100.0)
}
