//! 3D vector of `f64` components.

use crate::helpers::{equal, round_to_precision};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// A 3D vector with `x`, `y` and `z` components.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    /// The all-ones vector.
    pub const ONE: Vector3 = Vector3::new(1.0, 1.0, 1.0);
    /// Unit vector along x.
    pub const UNIT_X: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    /// Unit vector along y.
    pub const UNIT_Y: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    /// Unit vector along z.
    pub const UNIT_Z: Vector3 = Vector3::new(0.0, 0.0, 1.0);
    /// Vector with all components NaN.
    pub const NAN: Vector3 = Vector3::new(f64::NAN, f64::NAN, f64::NAN);

    /// Create a new vector.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Set all three components.
    pub fn set(&mut self, x: f64, y: f64, z: f64) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Sum of the components.
    pub fn sum(&self) -> f64 {
        self.x + self.y + self.z
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.squared_length().sqrt()
    }

    /// Squared Euclidean length.
    pub fn squared_length(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Distance to another point.
    pub fn distance(&self, other: &Vector3) -> f64 {
        (*self - *other).length()
    }

    /// Normalize in place. The zero vector is left unchanged.
    pub fn normalize(&mut self) {
        let d = self.length();
        if !equal(d, 0.0, 1e-6) {
            self.x /= d;
            self.y /= d;
            self.z /= d;
        }
    }

    /// A normalized copy of this vector.
    pub fn normalized(&self) -> Vector3 {
        let mut result = *self;
        result.normalize();
        result
    }

    /// Round each component to the nearest integer, in place.
    pub fn round(&mut self) {
        self.x = self.x.round();
        self.y = self.y.round();
        self.z = self.z.round();
    }

    /// A copy with each component rounded to the nearest integer.
    pub fn rounded(&self) -> Vector3 {
        let mut result = *self;
        result.round();
        result
    }

    /// Round each component to `precision` decimal places, in place.
    pub fn round_to(&mut self, precision: u32) {
        self.x = round_to_precision(self.x, precision);
        self.y = round_to_precision(self.y, precision);
        self.z = round_to_precision(self.z, precision);
    }

    /// Dot product.
    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Absolute dot product, |x1|*|x2| + |y1|*|y2| + |z1|*|z2|.
    pub fn abs_dot(&self, other: &Vector3) -> f64 {
        self.x.abs() * other.x.abs() + self.y.abs() * other.y.abs() + self.z.abs() * other.z.abs()
    }

    /// Cross product.
    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// A copy with each component replaced by its absolute value.
    pub fn abs(&self) -> Vector3 {
        Vector3::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// A vector perpendicular to this one.
    ///
    /// Crosses with the x unit vector, falling back to the y unit vector
    /// when this vector is (nearly) parallel to x.
    pub fn perpendicular(&self) -> Vector3 {
        let per = self.cross(&Vector3::UNIT_X);
        if per.squared_length() < 1e-12 {
            self.cross(&Vector3::UNIT_Y)
        } else {
            per
        }
    }

    /// Unit normal of the plane through three points.
    pub fn normal(v1: &Vector3, v2: &Vector3, v3: &Vector3) -> Vector3 {
        let a = *v2 - *v1;
        let b = *v3 - *v1;
        a.cross(&b).normalized()
    }

    /// Distance from this point to the infinite line through `pt1` and `pt2`.
    pub fn dist_to_line(&self, pt1: &Vector3, pt2: &Vector3) -> f64 {
        let d = (*pt2 - *pt1).length();
        if equal(d, 0.0, 1e-6) {
            return f64::NAN;
        }
        (*self - *pt1).cross(&(*self - *pt2)).length() / d
    }

    /// Clamp each component to the maximum of this and `other`, in place.
    pub fn set_to_max(&mut self, other: &Vector3) {
        self.x = self.x.max(other.x);
        self.y = self.y.max(other.y);
        self.z = self.z.max(other.z);
    }

    /// Clamp each component to the minimum of this and `other`, in place.
    pub fn set_to_min(&mut self, other: &Vector3) {
        self.x = self.x.min(other.x);
        self.y = self.y.min(other.y);
        self.z = self.z.min(other.z);
    }

    /// Largest component.
    pub fn max(&self) -> f64 {
        self.x.max(self.y).max(self.z)
    }

    /// Smallest component.
    pub fn min(&self) -> f64 {
        self.x.min(self.y).min(self.z)
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
    }

    /// True if all components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Component-wise equality within a tolerance.
    pub fn equal(&self, other: &Vector3, tol: f64) -> bool {
        equal(self.x, other.x, tol) && equal(self.y, other.y, tol) && equal(self.z, other.z, tol)
    }
}

impl PartialEq for Vector3 {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other, 1e-3)
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Vector3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Neg for Vector3 {
    type Output = Vector3;
    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul for Vector3 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;
    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs * self
    }
}

impl MulAssign<f64> for Vector3 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl Div for Vector3 {
    type Output = Vector3;
    fn div(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;
    fn div(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl DivAssign<f64> for Vector3 {
    fn div_assign(&mut self, rhs: f64) {
        self.x /= rhs;
        self.y /= rhs;
        self.z /= rhs;
    }
}

impl Index<usize> for Vector3 {
    type Output = f64;

    /// Index access, clamped to the last component.
    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }
}

impl IndexMut<usize> for Vector3 {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => &mut self.z,
        }
    }
}

impl fmt::Display for Vector3 {
    /// Space-separated components.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_distance() {
        let v = Vector3::new(1.0, 2.0, 2.0);
        assert_eq!(v.length(), 3.0);
        assert_eq!(v.squared_length(), 9.0);
        assert_eq!(v.distance(&Vector3::ZERO), 3.0);
        assert_eq!(v.sum(), 5.0);
    }

    #[test]
    fn test_normalize() {
        let mut v = Vector3::new(3.0, 0.0, 4.0);
        v.normalize();
        assert!((v.length() - 1.0).abs() < 1e-12);

        // normalizing twice is a fixed point
        let once = v.normalized();
        assert_eq!(once, v);

        // the zero vector stays zero
        let mut z = Vector3::ZERO;
        z.normalize();
        assert_eq!(z, Vector3::ZERO);
    }

    #[test]
    fn test_dot_cross() {
        let x = Vector3::UNIT_X;
        let y = Vector3::UNIT_Y;
        assert_eq!(x.dot(&y), 0.0);
        assert_eq!(x.cross(&y), Vector3::UNIT_Z);
        assert_eq!(y.cross(&x), -Vector3::UNIT_Z);

        let a = Vector3::new(-1.0, 2.0, -3.0);
        assert_eq!(a.abs_dot(&Vector3::ONE), 6.0);
    }

    #[test]
    fn test_perpendicular() {
        let v = Vector3::new(0.0, 3.0, 0.0);
        assert_eq!(v.dot(&v.perpendicular()), 0.0);
        // parallel to x falls back to the y cross
        let x = Vector3::new(5.0, 0.0, 0.0);
        assert!(x.perpendicular().squared_length() > 0.0);
        assert_eq!(x.dot(&x.perpendicular()), 0.0);
    }

    #[test]
    fn test_normal_and_dist_to_line() {
        let n = Vector3::normal(
            &Vector3::ZERO,
            &Vector3::UNIT_X,
            &Vector3::UNIT_Y,
        );
        assert_eq!(n, Vector3::UNIT_Z);

        let p = Vector3::new(0.0, 1.0, 0.0);
        let d = p.dist_to_line(&Vector3::ZERO, &Vector3::UNIT_X);
        assert!((d - 1.0).abs() < 1e-12);

        // degenerate line
        assert!(p.dist_to_line(&Vector3::ZERO, &Vector3::ZERO).is_nan());
    }

    #[test]
    fn test_correct() {
        let mut v = Vector3::new(f64::NAN, 2.0, f64::INFINITY);
        assert!(!v.is_finite());
        v.correct();
        assert_eq!(v, Vector3::new(0.0, 2.0, 0.0));
        assert!(v.is_finite());
    }

    #[test]
    fn test_tolerant_eq() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(1.0 + 1e-4, 2.0, 3.0);
        assert_eq!(a, b);
        assert!(!a.equal(&b, 1e-6));
    }

    #[test]
    fn test_min_max() {
        let mut a = Vector3::new(1.0, 5.0, -2.0);
        assert_eq!(a.max(), 5.0);
        assert_eq!(a.min(), -2.0);
        a.set_to_max(&Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(a, Vector3::new(2.0, 5.0, 0.0));
        a.set_to_min(&Vector3::new(0.0, 1.0, 10.0));
        assert_eq!(a, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_display() {
        let v = Vector3::new(1.0, -2.5, 3.0);
        assert_eq!(v.to_string(), "1 -2.5 3");
    }

    #[test]
    fn test_index_clamped() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[2], 3.0);
        assert_eq!(v[7], 3.0);
    }
}
