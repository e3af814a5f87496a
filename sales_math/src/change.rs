//! Relative change and fixed-decimal rounding

/// Percentage change from `previous` to `next`.
///
/// Returns 0 when `previous` is zero, or when the ratio overflows, so callers
/// never see NaN or infinity.
pub fn percent_change(previous: f64, next: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    let change = (next - previous) / previous * 100.0;
    if change.is_finite() {
        change
    } else {
        0.0
    }
}

/// Round to a fixed number of decimal places, halves away from zero.
///
/// Rounds the scaled binary value, not its decimal expansion: `1.115` is
/// stored just below the half and still rounds to `1.12`, where a
/// decimal-string formatter would print `1.11`. Values too large to scale
/// are returned unchanged. Negative zero is normalised to `0.0`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
