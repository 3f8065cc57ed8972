//! 4D vector of `f64` components.

use crate::helpers::equal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// A 4D vector with `x`, `y`, `z` and `w` components.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector4 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
    /// W component.
    pub w: f64,
}

impl Vector4 {
    /// The zero vector.
    pub const ZERO: Vector4 = Vector4::new(0.0, 0.0, 0.0, 0.0);
    /// The all-ones vector.
    pub const ONE: Vector4 = Vector4::new(1.0, 1.0, 1.0, 1.0);
    /// Unit vector along x.
    pub const UNIT_X: Vector4 = Vector4::new(1.0, 0.0, 0.0, 0.0);
    /// Unit vector along y.
    pub const UNIT_Y: Vector4 = Vector4::new(0.0, 1.0, 0.0, 0.0);
    /// Unit vector along z.
    pub const UNIT_Z: Vector4 = Vector4::new(0.0, 0.0, 1.0, 0.0);
    /// Unit vector along w.
    pub const UNIT_W: Vector4 = Vector4::new(0.0, 0.0, 0.0, 1.0);
    /// Vector with all components NaN.
    pub const NAN: Vector4 = Vector4::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN);

    /// Create a new vector.
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Set all four components.
    pub fn set(&mut self, x: f64, y: f64, z: f64, w: f64) {
        self.x = x;
        self.y = y;
        self.z = z;
        self.w = w;
    }

    /// Sum of the components.
    pub fn sum(&self) -> f64 {
        self.x + self.y + self.z + self.w
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.squared_length().sqrt()
    }

    /// Squared Euclidean length.
    pub fn squared_length(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Distance to another point.
    pub fn distance(&self, other: &Vector4) -> f64 {
        (*self - *other).length()
    }

    /// Normalize in place. The zero vector is left unchanged.
    pub fn normalize(&mut self) {
        let d = self.length();
        if !equal(d, 0.0, 1e-6) {
            self.x /= d;
            self.y /= d;
            self.z /= d;
            self.w /= d;
        }
    }

    /// A normalized copy of this vector.
    pub fn normalized(&self) -> Vector4 {
        let mut result = *self;
        result.normalize();
        result
    }

    /// Round each component to the nearest integer, in place.
    pub fn round(&mut self) {
        self.x = self.x.round();
        self.y = self.y.round();
        self.z = self.z.round();
        self.w = self.w.round();
    }

    /// A copy with each component rounded to the nearest integer.
    pub fn rounded(&self) -> Vector4 {
        let mut result = *self;
        result.round();
        result
    }

    /// Dot product.
    pub fn dot(&self, other: &Vector4) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Absolute dot product.
    pub fn abs_dot(&self, other: &Vector4) -> f64 {
        self.x.abs() * other.x.abs()
            + self.y.abs() * other.y.abs()
            + self.z.abs() * other.z.abs()
            + self.w.abs() * other.w.abs()
    }

    /// A copy with each component replaced by its absolute value.
    pub fn abs(&self) -> Vector4 {
        Vector4::new(self.x.abs(), self.y.abs(), self.z.abs(), self.w.abs())
    }

    /// Largest component.
    pub fn max(&self) -> f64 {
        self.x.max(self.y).max(self.z).max(self.w)
    }

    /// Smallest component.
    pub fn min(&self) -> f64 {
        self.x.min(self.y).min(self.z).min(self.w)
    }

    /// Replace non-finite components with zero.
    pub fn correct(&mut self) {
        if !self.x.is_finite() {
            self.x = 0.0;
        }
        if !self.y.is_finite() {
            self.y = 0.0;
        }
        if !self.z.is_finite() {
            self.z = 0.0;
        }
        if !self.w.is_finite() {
            self.w = 0.0;
        }
    }

    /// True if all components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Component-wise equality within a tolerance.
    pub fn equal(&self, other: &Vector4, tol: f64) -> bool {
        equal(self.x, other.x, tol)
            && equal(self.y, other.y, tol)
            && equal(self.z, other.z, tol)
            && equal(self.w, other.w, tol)
    }
}

impl PartialEq for Vector4 {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other, 1e-6)
    }
}

impl Add for Vector4 {
    type Output = Vector4;
    fn add(self, rhs: Vector4) -> Vector4 {
        Vector4::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}

impl AddAssign for Vector4 {
    fn add_assign(&mut self, rhs: Vector4) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
        self.w += rhs.w;
    }
}

impl Sub for Vector4 {
    type Output = Vector4;
    fn sub(self, rhs: Vector4) -> Vector4 {
        Vector4::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}

impl SubAssign for Vector4 {
    fn sub_assign(&mut self, rhs: Vector4) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
        self.w -= rhs.w;
    }
}

impl Neg for Vector4 {
    type Output = Vector4;
    fn neg(self) -> Vector4 {
        Vector4::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul for Vector4 {
    type Output = Vector4;
    fn mul(self, rhs: Vector4) -> Vector4 {
        Vector4::new(
            self.x * rhs.x,
            self.y * rhs.y,
            self.z * rhs.z,
            self.w * rhs.w,
        )
    }
}

impl Mul<f64> for Vector4 {
    type Output = Vector4;
    fn mul(self, rhs: f64) -> Vector4 {
        Vector4::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Mul<Vector4> for f64 {
    type Output = Vector4;
    fn mul(self, rhs: Vector4) -> Vector4 {
        rhs * self
    }
}

impl MulAssign<f64> for Vector4 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
        self.w *= rhs;
    }
}

impl Div for Vector4 {
    type Output = Vector4;
    fn div(self, rhs: Vector4) -> Vector4 {
        Vector4::new(
            self.x / rhs.x,
            self.y / rhs.y,
            self.z / rhs.z,
            self.w / rhs.w,
        )
    }
}

impl Div<f64> for Vector4 {
    type Output = Vector4;
    fn div(self, rhs: f64) -> Vector4 {
        Vector4::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w / rhs)
    }
}

impl DivAssign<f64> for Vector4 {
    fn div_assign(&mut self, rhs: f64) {
        self.x /= rhs;
        self.y /= rhs;
        self.z /= rhs;
        self.w /= rhs;
    }
}

impl Index<usize> for Vector4 {
    type Output = f64;

    /// Index access, clamped to the last component.
    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => &self.w,
        }
    }
}

impl IndexMut<usize> for Vector4 {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => &mut self.w,
        }
    }
}

impl fmt::Display for Vector4 {
    /// Space-separated components, `x y z w`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.z, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = Vector4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vector4::new(4.0, 3.0, 2.0, 1.0);
        assert_eq!(a + b, Vector4::new(5.0, 5.0, 5.0, 5.0));
        assert_eq!(a - b, Vector4::new(-3.0, -1.0, 1.0, 3.0));
        assert_eq!(a.dot(&b), 20.0);
        assert_eq!(a.sum(), 10.0);
        assert_eq!((a * 2.0).w, 8.0);
    }

    #[test]
    fn test_normalize() {
        let mut v = Vector4::new(2.0, 0.0, 0.0, 0.0);
        v.normalize();
        assert_eq!(v, Vector4::UNIT_X);

        let mut z = Vector4::ZERO;
        z.normalize();
        assert_eq!(z, Vector4::ZERO);
    }

    #[test]
    fn test_correct() {
        let mut v = Vector4::new(f64::NAN, 1.0, f64::NEG_INFINITY, 4.0);
        v.correct();
        assert_eq!(v, Vector4::new(0.0, 1.0, 0.0, 4.0));
    }

    #[test]
    fn test_display() {
        let v = Vector4::new(1.0, 2.0, 3.5, -4.0);
        assert_eq!(v.to_string(), "1 2 3.5 -4");
    }
}
