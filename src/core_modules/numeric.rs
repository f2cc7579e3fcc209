// THEORY:
// Shared scalar helpers for the color-difference formulas. Every formula returns a
// `DeltaE`, and every clamp or reduction here lets `NaN` through unchanged: a bad
// input must surface as a `NaN` result, never be silently replaced by a number.

pub type DeltaE = f64;

/// Clamps small negative rounding residue to zero. `NaN` passes through.
///
/// `f64::max` would swallow `NaN`, so this compares explicitly.
pub fn non_negative(value: f64) -> f64 {
    if value < 0.0 { 0.0 } else { value }
}

/// Larger of two values, or `NaN` if either is `NaN`.
pub fn nan_aware_max(left: f64, right: f64) -> f64 {
    if left.is_nan() || right.is_nan() {
        f64::NAN
    } else if right > left {
        right
    } else {
        left
    }
}
