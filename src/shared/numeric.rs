//! Numeric helpers shared by the statistics pipeline and the adapters
//!
//! Rounding works on the exact binary value and breaks exact ties to the even
//! digit, so `0.125` becomes `0.12` and `0.075` (stored as 0.07499...) becomes
//! `0.07`. Scaling by 100 first would get both wrong.

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Values are compared and grouped by their exact bit pattern after
/// normalizing negative zero, so `0.0` and `-0.0` share a bucket.
pub fn value_key(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}
