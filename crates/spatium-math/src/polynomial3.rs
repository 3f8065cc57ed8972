//! Cubic polynomials and interval-constrained minimization.

use crate::interval::Interval;
use crate::vector4::Vector4;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cubic polynomial `c0*x^3 + c1*x^2 + c2*x + c3`.
///
/// Coefficients are carried in a [`Vector4`] ordered from the highest
/// power down to the constant term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Polynomial3 {
    coeffs: Vector4,
}

impl Polynomial3 {
    /// A polynomial from its coefficient vector.
    pub const fn new(coeffs: Vector4) -> Self {
        Self { coeffs }
    }

    /// The constant polynomial `p(x) = value`.
    pub const fn constant(value: f64) -> Self {
        Self::new(Vector4::new(0.0, 0.0, 0.0, value))
    }

    /// The coefficient vector.
    pub fn coeffs(&self) -> &Vector4 {
        &self.coeffs
    }

    /// Evaluate the polynomial at `x`.
    ///
    /// NaN passes through, and infinite arguments yield the appropriate
    /// limit based on the sign of the leading nonzero coefficient.
    pub fn evaluate(&self, x: f64) -> f64 {
        if x.is_nan() {
            return x;
        }
        if !x.is_finite() {
            if self.coeffs.x.abs() >= f64::EPSILON {
                return x * 1f64.copysign(self.coeffs.x);
            }
            if self.coeffs.y.abs() >= f64::EPSILON {
                return x.abs().copysign(self.coeffs.y);
            }
            if self.coeffs.z.abs() >= f64::EPSILON {
                return x * 1f64.copysign(self.coeffs.z);
            }
            return self.coeffs.w;
        }
        let x2 = x * x;
        let x3 = x2 * x;
        self.coeffs.x * x3 + self.coeffs.y * x2 + self.coeffs.z * x + self.coeffs.w
    }

    /// Minimum of the polynomial over an interval, along with its argmin.
    ///
    /// Open bounds are treated as limits, so the infimum at an excluded
    /// endpoint is still reported. Returns None when the interval is
    /// empty; the returned value may be infinite on unbounded domains.
    pub fn minimum_with_arg(&self, interval: &Interval) -> Option<(f64, f64)> {
        if interval.is_empty() {
            return None;
        }

        let x_left = interval.left_value();
        let x_right = interval.right_value();
        let y_left = self.evaluate(x_left);
        let y_right = self.evaluate(x_right);
        let (mut x_min, mut y_min) = if y_left <= y_right {
            (x_left, y_left)
        } else {
            (x_right, y_right)
        };

        if self.coeffs.x.abs() >= f64::EPSILON {
            // cubic: the rightmost root of p'(x) is the local minimum
            let a = self.coeffs.x * 3.0;
            let b = self.coeffs.y * 2.0;
            let c = self.coeffs.z;

            let discriminant = b * b - 4.0 * a * c;
            if discriminant >= 0.0 {
                let x = (-b + discriminant.sqrt()) / (2.0 * a);
                if interval.contains(x) {
                    let y = self.evaluate(x);
                    if y < y_min {
                        x_min = x;
                        y_min = y;
                    }
                }
            }
        } else if self.coeffs.y.abs() >= f64::EPSILON {
            // quadratic: check the vertex when convex
            let a = self.coeffs.y;
            let b = self.coeffs.z;
            if a > 0.0 {
                let x = -b / (2.0 * a);
                if interval.contains(x) {
                    let y = self.evaluate(x);
                    if y < y_min {
                        x_min = x;
                        y_min = y;
                    }
                }
            }
        }
        Some((x_min, y_min))
    }

    /// Minimum of the polynomial over an interval.
    pub fn minimum(&self, interval: &Interval) -> Option<f64> {
        self.minimum_with_arg(interval).map(|(_, y)| y)
    }
}

impl fmt::Display for Polynomial3 {
    /// Algebraic form, e.g. `x^3 - x + 2`, omitting zero terms and unit
    /// magnitudes on the variable terms.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut started = false;
        for i in 0..4 {
            let coeff = self.coeffs[i];
            let magnitude = coeff.abs();
            let negative = coeff < 0.0;
            let exponent = 3 - i;
            if magnitude < f64::EPSILON {
                continue;
            }
            if started {
                write!(f, "{}", if negative { " - " } else { " + " })?;
            } else if negative {
                write!(f, "-")?;
            }
            if exponent > 0 {
                if magnitude - 1.0 > f64::EPSILON {
                    write!(f, "{magnitude} ")?;
                }
                write!(f, "x")?;
                if exponent > 1 {
                    write!(f, "^{exponent}")?;
                }
            } else {
                write!(f, "{magnitude}")?;
            }
            started = true;
        }
        if !started {
            write!(f, "{}", self.coeffs.w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate() {
        let p = Polynomial3::new(Vector4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(p.evaluate(0.0), 4.0);
        assert_eq!(p.evaluate(1.0), 10.0);
        assert_eq!(p.evaluate(-1.0), 2.0);
        assert!(p.evaluate(f64::NAN).is_nan());
    }

    #[test]
    fn test_evaluate_limits() {
        // positive leading coefficient
        let p = Polynomial3::new(Vector4::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(p.evaluate(f64::INFINITY), f64::INFINITY);
        assert_eq!(p.evaluate(f64::NEG_INFINITY), f64::NEG_INFINITY);

        // even leading power: both limits share the coefficient's sign
        let q = Polynomial3::new(Vector4::new(0.0, -1.0, 0.0, 0.0));
        assert_eq!(q.evaluate(f64::INFINITY), f64::NEG_INFINITY);
        assert_eq!(q.evaluate(f64::NEG_INFINITY), f64::NEG_INFINITY);

        // constant polynomial
        let c = Polynomial3::constant(7.0);
        assert_eq!(c.evaluate(f64::INFINITY), 7.0);
    }

    #[test]
    fn test_minimum_quadratic_open_interval() {
        // p(x) = x^2 + x over (0, 1): infimum approached at the excluded
        // left bound
        let p = Polynomial3::new(Vector4::new(0.0, 0.0, 1.0, 1.0));
        let min = p.minimum(&Interval::open(0.0, 1.0));
        assert_eq!(min, Some(1.0));
    }

    #[test]
    fn test_minimum_cubic_interior() {
        // p(x) = x^3 - 3x has a local minimum at x = 1, p(1) = -2
        let p = Polynomial3::new(Vector4::new(1.0, 0.0, -3.0, 0.0));
        let (x_min, y_min) = p.minimum_with_arg(&Interval::closed(-1.0, 3.0)).unwrap();
        assert!((x_min - 1.0).abs() < 1e-12);
        assert!((y_min + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_minimum_empty_and_unbounded() {
        let p = Polynomial3::new(Vector4::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(p.minimum(&Interval::open(1.0, 1.0)), None);

        // a cubic is unbounded below on the whole line
        assert_eq!(p.minimum(&Interval::UNBOUNDED), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_minimum_convex_quadratic_vertex() {
        // p(x) = x^2 - 2x + 2, vertex at x = 1
        let p = Polynomial3::new(Vector4::new(0.0, 1.0, -2.0, 2.0));
        let (x_min, y_min) = p.minimum_with_arg(&Interval::closed(-5.0, 5.0)).unwrap();
        assert!((x_min - 1.0).abs() < 1e-12);
        assert!((y_min - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let p = Polynomial3::new(Vector4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(p.to_string(), "x^3 + x^2 + x + 1");

        let q = Polynomial3::new(Vector4::new(2.0, 0.0, -1.0, 0.0));
        assert_eq!(q.to_string(), "2 x^3 - x");

        assert_eq!(Polynomial3::constant(0.0).to_string(), "0");
        assert_eq!(Polynomial3::constant(-3.0).to_string(), "-3");
    }
}
