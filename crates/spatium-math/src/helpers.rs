//! Small floating-point helpers shared by the value types.

/// Default tolerance used by `equal`.
pub const DEFAULT_TOL: f64 = 1e-6;

/// Compare two floats for equality within a tolerance.
///
/// # Arguments
///
/// * `a` - First value.
/// * `b` - Second value.
/// * `epsilon` - Maximum allowed absolute difference.
#[inline]
pub fn equal(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// `a <= b` treating values within `epsilon` as equal.
#[inline]
pub fn less_or_near_equal(a: f64, b: f64, epsilon: f64) -> bool {
    a < b + epsilon
}

/// Round `value` to `precision` decimal places.
#[inline]
pub fn round_to_precision(value: f64, precision: u32) -> f64 {
    let p = 10f64.powi(precision as i32);
    (value * p).round() / p
}
