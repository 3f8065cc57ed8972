//! 3x3 row-major matrix.

use crate::helpers::equal;
use crate::quaternion::Quaternion;
use crate::vector3::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

/// A 3x3 matrix of `f64`, stored row-major.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Matrix3 {
    data: [[f64; 3]; 3],
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Matrix3 {
    /// The identity matrix.
    pub const IDENTITY: Matrix3 = Matrix3 {
        data: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// The zero matrix.
    pub const ZERO: Matrix3 = Matrix3 {
        data: [[0.0; 3]; 3],
    };

    /// Create a matrix from nine row-major values.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        v00: f64,
        v01: f64,
        v02: f64,
        v10: f64,
        v11: f64,
        v12: f64,
        v20: f64,
        v21: f64,
        v22: f64,
    ) -> Self {
        Self {
            data: [[v00, v01, v02], [v10, v11, v12], [v20, v21, v22]],
        }
    }

    /// Rotation matrix from an axis and angle (Rodrigues formula).
    ///
    /// The axis is normalized before use.
    pub fn from_axis_angle(axis: &Vector3, angle: f64) -> Self {
        let axis = axis.normalized();
        let c = angle.cos();
        let s = angle.sin();
        let t = 1.0 - c;

        Self::new(
            t * axis.x * axis.x + c,
            t * axis.x * axis.y - s * axis.z,
            t * axis.x * axis.z + s * axis.y,
            t * axis.x * axis.y + s * axis.z,
            t * axis.y * axis.y + c,
            t * axis.y * axis.z - s * axis.x,
            t * axis.x * axis.z - s * axis.y,
            t * axis.y * axis.z + s * axis.x,
            t * axis.z * axis.z + c,
        )
    }

    /// Rotation matrix that maps the direction of `v1` onto the direction
    /// of `v2`.
    ///
    /// Returns Identity when either vector is zero-length or the vectors
    /// are parallel, and -Identity when they are exactly antiparallel.
    pub fn from_2_axes(v1: &Vector3, v2: &Vector3) -> Self {
        let len1 = v1.squared_length();
        let len2 = v2.squared_length();
        if equal(len1, 0.0, 1e-6) || equal(len2, 0.0, 1e-6) {
            return Self::IDENTITY;
        }

        let dot = v1.dot(v2) / (len1 * len2).sqrt();
        if (dot - 1.0).abs() <= 1e-6 {
            return Self::IDENTITY;
        }
        if (dot + 1.0).abs() <= 1e-6 {
            return Self::IDENTITY * -1.0;
        }

        let cross = v1.cross(v2).normalized();
        Self::from_axis_angle(&cross, dot.acos())
    }

    /// Rotation matrix from a quaternion.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        let (w, x, y, z) = (q.w, q.x, q.y, q.z);
        Self::new(
            1.0 - 2.0 * y * y - 2.0 * z * z,
            2.0 * x * y - 2.0 * z * w,
            2.0 * x * z + 2.0 * y * w,
            2.0 * x * y + 2.0 * z * w,
            1.0 - 2.0 * x * x - 2.0 * z * z,
            2.0 * y * z - 2.0 * x * w,
            2.0 * x * z - 2.0 * y * w,
            2.0 * y * z + 2.0 * x * w,
            1.0 - 2.0 * x * x - 2.0 * y * y,
        )
    }

    /// Value at (row, col), clamped to valid indices.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row.min(2)][col.min(2)]
    }

    /// Set the value at (row, col). Returns false when out of range.
    pub fn set_value(&mut self, row: usize, col: usize, value: f64) -> bool {
        if row < 3 && col < 3 {
            self.data[row][col] = value;
            true
        } else {
            false
        }
    }

    /// Determinant, computed by cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        let m = &self.data;
        let t0 = m[2][2] * m[1][1] - m[2][1] * m[1][2];
        let t1 = -(m[2][2] * m[1][0] - m[2][0] * m[1][2]);
        let t2 = m[2][1] * m[1][0] - m[2][0] * m[1][1];
        t0 * m[0][0] + t1 * m[0][1] + t2 * m[0][2]
    }

    /// Closed-form inverse via the adjugate.
    ///
    /// The result contains non-finite values when the matrix is singular.
    pub fn inverse(&self) -> Matrix3 {
        let m = &self.data;
        let t0 = m[2][2] * m[1][1] - m[2][1] * m[1][2];
        let t1 = -(m[2][2] * m[1][0] - m[2][0] * m[1][2]);
        let t2 = m[2][1] * m[1][0] - m[2][0] * m[1][1];
        let inv_det = 1.0 / (t0 * m[0][0] + t1 * m[0][1] + t2 * m[0][2]);

        Matrix3::new(
            t0 * inv_det,
            (m[2][1] * m[0][2] - m[2][2] * m[0][1]) * inv_det,
            (m[1][2] * m[0][1] - m[1][1] * m[0][2]) * inv_det,
            t1 * inv_det,
            (m[2][2] * m[0][0] - m[2][0] * m[0][2]) * inv_det,
            (m[1][0] * m[0][2] - m[1][2] * m[0][0]) * inv_det,
            t2 * inv_det,
            (m[2][0] * m[0][1] - m[2][1] * m[0][0]) * inv_det,
            (m[1][1] * m[0][0] - m[1][0] * m[0][1]) * inv_det,
        )
    }

    /// Transpose in place.
    pub fn transpose(&mut self) {
        *self = self.transposed();
    }

    /// The transposed matrix.
    pub fn transposed(&self) -> Matrix3 {
        let m = &self.data;
        Matrix3::new(
            m[0][0], m[1][0], m[2][0], m[0][1], m[1][1], m[2][1], m[0][2], m[1][2], m[2][2],
        )
    }

    /// Element-wise equality within a tolerance.
    pub fn equal(&self, other: &Matrix3, tol: f64) -> bool {
        for r in 0..3 {
            for c in 0..3 {
                if !equal(self.data[r][c], other.data[r][c], tol) {
                    return false;
                }
            }
        }
        true
    }
}

impl PartialEq for Matrix3 {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other, 1e-6)
    }
}

impl Add for Matrix3 {
    type Output = Matrix3;
    fn add(self, rhs: Matrix3) -> Matrix3 {
        let mut out = Matrix3::ZERO;
        for r in 0..3 {
            for c in 0..3 {
                out.data[r][c] = self.data[r][c] + rhs.data[r][c];
            }
        }
        out
    }
}

impl Sub for Matrix3 {
    type Output = Matrix3;
    fn sub(self, rhs: Matrix3) -> Matrix3 {
        let mut out = Matrix3::ZERO;
        for r in 0..3 {
            for c in 0..3 {
                out.data[r][c] = self.data[r][c] - rhs.data[r][c];
            }
        }
        out
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;
    fn mul(self, rhs: Matrix3) -> Matrix3 {
        let mut out = Matrix3::ZERO;
        for r in 0..3 {
            for c in 0..3 {
                let mut sum = 0.0;
                for k in 0..3 {
                    sum += self.data[r][k] * rhs.data[k][c];
                }
                out.data[r][c] = sum;
            }
        }
        out
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;
    fn mul(self, v: Vector3) -> Vector3 {
        let m = &self.data;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }
}

impl Mul<f64> for Matrix3 {
    type Output = Matrix3;
    fn mul(self, s: f64) -> Matrix3 {
        let mut out = self;
        for r in 0..3 {
            for c in 0..3 {
                out.data[r][c] *= s;
            }
        }
        out
    }
}

impl Index<(usize, usize)> for Matrix3 {
    type Output = f64;

    /// Access by (row, col), clamped to valid indices.
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row.min(2)][col.min(2)]
    }
}

impl IndexMut<(usize, usize)> for Matrix3 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row.min(2)][col.min(2)]
    }
}

impl fmt::Display for Matrix3 {
    /// Nine space-separated row-major values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.data;
        write!(
            f,
            "{} {} {} {} {} {} {} {} {}",
            m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_and_indexing() {
        let m = Matrix3::IDENTITY;
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(0, 1)], 0.0);
        // clamped access
        assert_eq!(m[(9, 9)], 1.0);
    }

    #[test]
    fn test_determinant_inverse() {
        let m = Matrix3::new(2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 4.0);
        assert_eq!(m.determinant(), 24.0);

        let inv = m.inverse();
        assert_eq!(m * inv, Matrix3::IDENTITY);
        assert_eq!(inv.inverse(), m);

        let g = Matrix3::new(1.0, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 0.0);
        assert_eq!(g * g.inverse(), Matrix3::IDENTITY);
    }

    #[test]
    fn test_transpose() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        let t = m.transposed();
        assert_eq!(t[(0, 1)], 4.0);
        assert_eq!(t.transposed(), m);
    }

    #[test]
    fn test_axis_angle() {
        let m = Matrix3::from_axis_angle(&Vector3::UNIT_Z, PI / 2.0);
        let v = m * Vector3::UNIT_X;
        assert!(v.equal(&Vector3::UNIT_Y, 1e-12));
    }

    #[test]
    fn test_from_2_axes() {
        // generic rotation maps direction onto direction
        let v1 = Vector3::new(1.0, 0.0, 0.0);
        let v2 = Vector3::new(0.0, 1.0, 0.0);
        let m = Matrix3::from_2_axes(&v1, &v2);
        assert!((m * v1).equal(&v2, 1e-12));

        // zero length input
        assert_eq!(Matrix3::from_2_axes(&Vector3::ZERO, &v2), Matrix3::IDENTITY);

        // parallel, different lengths
        let m = Matrix3::from_2_axes(&v1, &(v1 * 4.0));
        assert_eq!(m, Matrix3::IDENTITY);

        // axis-aligned antiparallel
        let m = Matrix3::from_2_axes(&v1, &-v1);
        assert_eq!(m, Matrix3::IDENTITY * -1.0);
    }

    #[test]
    fn test_mul_vector() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(m * v, Vector3::new(14.0, 32.0, 50.0));
    }

    #[test]
    fn test_display() {
        let m = Matrix3::IDENTITY;
        assert_eq!(m.to_string(), "1 0 0 0 1 0 0 0 1");
    }
}
