//! 2D vector of `f64` components.

use crate::helpers::equal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// A 2D vector with `x` and `y` components.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector2 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl Vector2 {
    /// The zero vector.
    pub const ZERO: Vector2 = Vector2::new(0.0, 0.0);
    /// The all-ones vector.
    pub const ONE: Vector2 = Vector2::new(1.0, 1.0);
    /// Unit vector along x.
    pub const UNIT_X: Vector2 = Vector2::new(1.0, 0.0);
    /// Unit vector along y.
    pub const UNIT_Y: Vector2 = Vector2::new(0.0, 1.0);
    /// Vector with all components NaN.
    pub const NAN: Vector2 = Vector2::new(f64::NAN, f64::NAN);

    /// Create a new vector.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Set both components.
    pub fn set(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Sum of the components.
    pub fn sum(&self) -> f64 {
        self.x + self.y
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.squared_length().sqrt()
    }

    /// Squared Euclidean length.
    pub fn squared_length(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Distance to another point.
    pub fn distance(&self, other: &Vector2) -> f64 {
        (*self - *other).length()
    }

    /// Normalize in place. The zero vector is left unchanged.
    pub fn normalize(&mut self) {
        let d = self.length();
        if !equal(d, 0.0, 1e-6) {
            self.x /= d;
            self.y /= d;
        }
    }

    /// A normalized copy of this vector.
    pub fn normalized(&self) -> Vector2 {
        let mut result = *self;
        result.normalize();
        result
    }

    /// Round each component to the nearest integer, in place.
    pub fn round(&mut self) {
        self.x = self.x.round();
        self.y = self.y.round();
    }

    /// A copy with each component rounded to the nearest integer.
    pub fn rounded(&self) -> Vector2 {
        let mut result = *self;
        result.round();
        result
    }

    /// Dot product.
    pub fn dot(&self, other: &Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Absolute dot product.
    pub fn abs_dot(&self, other: &Vector2) -> f64 {
        self.x.abs() * other.x.abs() + self.y.abs() * other.y.abs()
    }

    /// Cross product, the scalar z component of the 3D cross.
    pub fn cross(&self, other: &Vector2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// A copy with each component replaced by its absolute value.
    pub fn abs(&self) -> Vector2 {
        Vector2::new(self.x.abs(), self.y.abs())
    }

    /// Clamp each component to the maximum of this and `other`, in place.
    pub fn set_to_max(&mut self, other: &Vector2) {
        self.x = self.x.max(other.x);
        self.y = self.y.max(other.y);
    }

    /// Clamp each component to the minimum of this and `other`, in place.
    pub fn set_to_min(&mut self, other: &Vector2) {
        self.x = self.x.min(other.x);
        self.y = self.y.min(other.y);
    }

    /// Largest component.
    pub fn max(&self) -> f64 {
        self.x.max(self.y)
    }

    /// Smallest component.
    pub fn min(&self) -> f64 {
        self.x.min(self.y)
    }

    /// Replace non-finite components with zero.
    pub fn correct(&mut self) {
        if !self.x.is_finite() {
            self.x = 0.0;
        }
        if !self.y.is_finite() {
            self.y = 0.0;
        }
    }

    /// True if all components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component-wise equality within a tolerance.
    pub fn equal(&self, other: &Vector2, tol: f64) -> bool {
        equal(self.x, other.x, tol) && equal(self.y, other.y, tol)
    }
}

impl PartialEq for Vector2 {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other, 1e-6)
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl Mul for Vector2 {
    type Output = Vector2;
    fn mul(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;
    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;
    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs * self
    }
}

impl MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div for Vector2 {
    type Output = Vector2;
    fn div(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;
    fn div(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x / rhs, self.y / rhs)
    }
}

impl DivAssign<f64> for Vector2 {
    fn div_assign(&mut self, rhs: f64) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl Index<usize> for Vector2 {
    type Output = f64;

    /// Index access, clamped to the last component.
    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            _ => &self.y,
        }
    }
}

impl IndexMut<usize> for Vector2 {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.x,
            _ => &mut self.y,
        }
    }
}

impl fmt::Display for Vector2 {
    /// Space-separated components.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 4.0);
        assert_eq!(a + b, Vector2::new(4.0, 6.0));
        assert_eq!(b - a, Vector2::new(2.0, 2.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(b / 2.0, Vector2::new(1.5, 2.0));
        assert_eq!(a.dot(&b), 11.0);
        assert_eq!(a.cross(&b), -2.0);
    }

    #[test]
    fn test_length() {
        let v = Vector2::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v.squared_length(), 25.0);
        assert_eq!(v.distance(&Vector2::ZERO), 5.0);
    }

    #[test]
    fn test_normalize_idempotent() {
        let mut v = Vector2::new(0.1, 0.2);
        v.normalize();
        let again = v.normalized();
        assert_eq!(v, again);
        assert!((v.length() - 1.0).abs() < 1e-12);

        let mut z = Vector2::ZERO;
        z.normalize();
        assert_eq!(z, Vector2::ZERO);
    }

    #[test]
    fn test_correct() {
        // an infinite component is zeroed, the finite one kept
        let mut v = Vector2::new(0.0, f64::INFINITY);
        v.correct();
        assert_eq!(v, Vector2::ZERO);

        let mut w = Vector2::new(f64::NAN, 3.0);
        w.correct();
        assert_eq!(w, Vector2::new(0.0, 3.0));
    }

    #[test]
    fn test_tolerant_eq() {
        let a = Vector2::new(1.0, 2.0);
        assert_eq!(a, Vector2::new(1.0 + 1e-7, 2.0));
        assert_ne!(a, Vector2::new(1.0 + 1e-5, 2.0));
        assert!(a.equal(&Vector2::new(1.1, 2.0), 0.2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector2::new(1.0, -0.5).to_string(), "1 -0.5");
    }
}
