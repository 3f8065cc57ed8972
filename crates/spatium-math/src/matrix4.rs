//! 4x4 row-major matrix for homogeneous 3D transforms.

use crate::helpers::equal;
use crate::pose3::Pose3;
use crate::quaternion::Quaternion;
use crate::vector3::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut, Mul};

/// A 4x4 matrix of `f64`, stored row-major.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Matrix4 {
    data: [[f64; 4]; 4],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Matrix4 {
    /// The identity matrix.
    pub const IDENTITY: Matrix4 = Matrix4 {
        data: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// The zero matrix.
    pub const ZERO: Matrix4 = Matrix4 {
        data: [[0.0; 4]; 4],
    };

    /// Create a matrix from sixteen row-major values.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        v00: f64,
        v01: f64,
        v02: f64,
        v03: f64,
        v10: f64,
        v11: f64,
        v12: f64,
        v13: f64,
        v20: f64,
        v21: f64,
        v22: f64,
        v23: f64,
        v30: f64,
        v31: f64,
        v32: f64,
        v33: f64,
    ) -> Self {
        Self {
            data: [
                [v00, v01, v02, v03],
                [v10, v11, v12, v13],
                [v20, v21, v22, v23],
                [v30, v31, v32, v33],
            ],
        }
    }

    /// Homogeneous transform from a rotation quaternion.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        let q = q.normalized();
        let (w, x, y, z) = (q.w, q.x, q.y, q.z);
        Self::new(
            1.0 - 2.0 * y * y - 2.0 * z * z,
            2.0 * x * y - 2.0 * z * w,
            2.0 * x * z + 2.0 * y * w,
            0.0,
            2.0 * x * y + 2.0 * z * w,
            1.0 - 2.0 * x * x - 2.0 * z * z,
            2.0 * y * z - 2.0 * x * w,
            0.0,
            2.0 * x * z - 2.0 * y * w,
            2.0 * y * z + 2.0 * x * w,
            1.0 - 2.0 * x * x - 2.0 * y * y,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    /// Homogeneous transform from a pose.
    pub fn from_pose(pose: &Pose3) -> Self {
        let mut m = Self::from_quaternion(&pose.rot);
        m.set_translation(&pose.pos);
        m
    }

    /// Pure translation transform.
    pub fn from_translation(v: &Vector3) -> Self {
        let mut m = Self::IDENTITY;
        m.set_translation(v);
        m
    }

    /// Camera-style transform placing the x axis along `eye` to `target`,
    /// with `up` steering the z axis.
    ///
    /// Degenerate inputs fall back gracefully: a zero view direction
    /// becomes UnitX, a zero or x-parallel up becomes UnitZ, and an up
    /// parallel to the view direction yields a y-axis of UnitY.
    pub fn look_at(eye: &Vector3, target: &Vector3, up: &Vector3) -> Self {
        let mut front = *target - *eye;
        if front == Vector3::ZERO {
            front = Vector3::UNIT_X;
        }
        front.normalize();

        let mut up = *up;
        if up == Vector3::ZERO {
            up = Vector3::UNIT_Z;
        } else {
            up.normalize();
        }

        if up.cross(&Vector3::UNIT_X) == Vector3::ZERO {
            up = Vector3::UNIT_Z;
        }

        let mut left = up.cross(&front);
        if left == Vector3::ZERO {
            left = Vector3::UNIT_Y;
        } else {
            left.normalize();
        }

        let up = front.cross(&left).normalized();

        Self::new(
            front.x, left.x, up.x, eye.x, front.y, left.y, up.y, eye.y, front.z, left.z, up.z,
            eye.z, 0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Value at (row, col), clamped to valid indices.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row.min(3)][col.min(3)]
    }

    /// Set the translation column.
    pub fn set_translation(&mut self, v: &Vector3) {
        self.data[0][3] = v.x;
        self.data[1][3] = v.y;
        self.data[2][3] = v.z;
    }

    /// The translation column.
    pub fn translation(&self) -> Vector3 {
        Vector3::new(self.data[0][3], self.data[1][3], self.data[2][3])
    }

    /// Rotation part as a quaternion, extracted with Shoemake's
    /// trace-based method.
    pub fn rotation(&self) -> Quaternion {
        let m = &self.data;
        let trace = m[0][0] + m[1][1] + m[2][2];
        if trace > 0.0 {
            let mut root = (trace + 1.0).sqrt();
            let w = root / 2.0;
            root = 1.0 / (2.0 * root);
            Quaternion::new(
                w,
                (m[2][1] - m[1][2]) * root,
                (m[0][2] - m[2][0]) * root,
                (m[1][0] - m[0][1]) * root,
            )
        } else {
            const NEXT: [usize; 3] = [1, 2, 0];
            let mut i = 0;
            if m[1][1] > m[0][0] {
                i = 1;
            }
            if m[2][2] > m[i][i] {
                i = 2;
            }
            let j = NEXT[i];
            let k = NEXT[j];

            let mut root = (m[i][i] - m[j][j] - m[k][k] + 1.0).sqrt();
            let a = root / 2.0;
            root = 1.0 / (2.0 * root);
            let b = (m[j][i] + m[i][j]) * root;
            let c = (m[k][i] + m[i][k]) * root;

            let mut xyz = [0.0; 3];
            xyz[i] = a;
            xyz[j] = b;
            xyz[k] = c;
            Quaternion::new((m[k][j] - m[j][k]) * root, xyz[0], xyz[1], xyz[2])
        }
    }

    /// Euler angles of the rotation part.
    ///
    /// A rotation matrix has two Euler decompositions; `first_solution`
    /// selects between them. At gimbal lock (|m31| >= 1) yaw is fixed to
    /// zero and both solutions coincide.
    pub fn euler_rotation(&self, first_solution: bool) -> Vector3 {
        let m31 = self.data[2][0];
        let m11 = self.data[0][0];
        let m12 = self.data[0][1];
        let m13 = self.data[0][2];
        let m32 = self.data[2][1];
        let m33 = self.data[2][2];
        let m21 = self.data[1][0];

        if m31.abs() >= 1.0 {
            if m31 < 0.0 {
                Vector3::new(m12.atan2(m13), std::f64::consts::FRAC_PI_2, 0.0)
            } else {
                Vector3::new((-m12).atan2(-m13), -std::f64::consts::FRAC_PI_2, 0.0)
            }
        } else {
            let y1 = -m31.asin();
            let y = if first_solution {
                y1
            } else {
                std::f64::consts::PI - y1
            };
            let cy = y.cos();
            Vector3::new(
                (m32 / cy).atan2(m33 / cy),
                y,
                (m21 / cy).atan2(m11 / cy),
            )
        }
    }

    /// Pose formed from the translation and rotation parts.
    pub fn pose(&self) -> Pose3 {
        Pose3::new(self.translation(), self.rotation())
    }

    /// True if the bottom row is (0, 0, 0, 1).
    pub fn is_affine(&self) -> bool {
        equal(self.data[3][0], 0.0, 1e-6)
            && equal(self.data[3][1], 0.0, 1e-6)
            && equal(self.data[3][2], 0.0, 1e-6)
            && equal(self.data[3][3], 1.0, 1e-6)
    }

    /// Apply this transform to a point. None when the matrix is not
    /// affine.
    pub fn transform_affine(&self, v: &Vector3) -> Option<Vector3> {
        if !self.is_affine() {
            return None;
        }
        let m = &self.data;
        Some(Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3],
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3],
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3],
        ))
    }

    /// Determinant via 2x2 minors of the bottom rows.
    pub fn determinant(&self) -> f64 {
        let m = &self.data;

        let v0 = m[2][0] * m[3][1] - m[2][1] * m[3][0];
        let v1 = m[2][0] * m[3][2] - m[2][2] * m[3][0];
        let v2 = m[2][0] * m[3][3] - m[2][3] * m[3][0];
        let v3 = m[2][1] * m[3][2] - m[2][2] * m[3][1];
        let v4 = m[2][1] * m[3][3] - m[2][3] * m[3][1];
        let v5 = m[2][2] * m[3][3] - m[2][3] * m[3][2];

        let t00 = v5 * m[1][1] - v4 * m[1][2] + v3 * m[1][3];
        let t10 = -v5 * m[1][0] + v2 * m[1][2] - v1 * m[1][3];
        let t20 = v4 * m[1][0] - v2 * m[1][1] + v0 * m[1][3];
        let t30 = -v3 * m[1][0] + v1 * m[1][1] - v0 * m[1][2];

        t00 * m[0][0] + t10 * m[0][1] + t20 * m[0][2] + t30 * m[0][3]
    }

    /// Closed-form cofactor inverse.
    ///
    /// The result contains non-finite values when the matrix is singular.
    pub fn inverse(&self) -> Matrix4 {
        let m = &self.data;
        let mut r = Matrix4::ZERO;

        let v0 = m[2][0] * m[3][1] - m[2][1] * m[3][0];
        let v1 = m[2][0] * m[3][2] - m[2][2] * m[3][0];
        let v2 = m[2][0] * m[3][3] - m[2][3] * m[3][0];
        let v3 = m[2][1] * m[3][2] - m[2][2] * m[3][1];
        let v4 = m[2][1] * m[3][3] - m[2][3] * m[3][1];
        let v5 = m[2][2] * m[3][3] - m[2][3] * m[3][2];

        let t00 = v5 * m[1][1] - v4 * m[1][2] + v3 * m[1][3];
        let t10 = -(v5 * m[1][0] - v2 * m[1][2] + v1 * m[1][3]);
        let t20 = v4 * m[1][0] - v2 * m[1][1] + v0 * m[1][3];
        let t30 = -(v3 * m[1][0] - v1 * m[1][1] + v0 * m[1][2]);

        let inv_det = 1.0 / (t00 * m[0][0] + t10 * m[0][1] + t20 * m[0][2] + t30 * m[0][3]);

        r.data[0][0] = t00 * inv_det;
        r.data[1][0] = t10 * inv_det;
        r.data[2][0] = t20 * inv_det;
        r.data[3][0] = t30 * inv_det;

        r.data[0][1] = -(v5 * m[0][1] - v4 * m[0][2] + v3 * m[0][3]) * inv_det;
        r.data[1][1] = (v5 * m[0][0] - v2 * m[0][2] + v1 * m[0][3]) * inv_det;
        r.data[2][1] = -(v4 * m[0][0] - v2 * m[0][1] + v0 * m[0][3]) * inv_det;
        r.data[3][1] = (v3 * m[0][0] - v1 * m[0][1] + v0 * m[0][2]) * inv_det;

        let v0 = m[1][0] * m[3][1] - m[1][1] * m[3][0];
        let v1 = m[1][0] * m[3][2] - m[1][2] * m[3][0];
        let v2 = m[1][0] * m[3][3] - m[1][3] * m[3][0];
        let v3 = m[1][1] * m[3][2] - m[1][2] * m[3][1];
        let v4 = m[1][1] * m[3][3] - m[1][3] * m[3][1];
        let v5 = m[1][2] * m[3][3] - m[1][3] * m[3][2];

        r.data[0][2] = (v5 * m[0][1] - v4 * m[0][2] + v3 * m[0][3]) * inv_det;
        r.data[1][2] = -(v5 * m[0][0] - v2 * m[0][2] + v1 * m[0][3]) * inv_det;
        r.data[2][2] = (v4 * m[0][0] - v2 * m[0][1] + v0 * m[0][3]) * inv_det;
        r.data[3][2] = -(v3 * m[0][0] - v1 * m[0][1] + v0 * m[0][2]) * inv_det;

        let v0 = m[2][1] * m[1][0] - m[2][0] * m[1][1];
        let v1 = m[2][2] * m[1][0] - m[2][0] * m[1][2];
        let v2 = m[2][3] * m[1][0] - m[2][0] * m[1][3];
        let v3 = m[2][2] * m[1][1] - m[2][1] * m[1][2];
        let v4 = m[2][3] * m[1][1] - m[2][1] * m[1][3];
        let v5 = m[2][3] * m[1][2] - m[2][2] * m[1][3];

        r.data[0][3] = -(v5 * m[0][1] - v4 * m[0][2] + v3 * m[0][3]) * inv_det;
        r.data[1][3] = (v5 * m[0][0] - v2 * m[0][2] + v1 * m[0][3]) * inv_det;
        r.data[2][3] = -(v4 * m[0][0] - v2 * m[0][1] + v0 * m[0][3]) * inv_det;
        r.data[3][3] = (v3 * m[0][0] - v1 * m[0][1] + v0 * m[0][2]) * inv_det;

        r
    }

    /// Transpose in place.
    pub fn transpose(&mut self) {
        *self = self.transposed();
    }

    /// The transposed matrix.
    pub fn transposed(&self) -> Matrix4 {
        let m = &self.data;
        Matrix4::new(
            m[0][0], m[1][0], m[2][0], m[3][0], m[0][1], m[1][1], m[2][1], m[3][1], m[0][2],
            m[1][2], m[2][2], m[3][2], m[0][3], m[1][3], m[2][3], m[3][3],
        )
    }

    /// Element-wise equality within a tolerance.
    pub fn equal(&self, other: &Matrix4, tol: f64) -> bool {
        for r in 0..4 {
            for c in 0..4 {
                if !equal(self.data[r][c], other.data[r][c], tol) {
                    return false;
                }
            }
        }
        true
    }
}

impl PartialEq for Matrix4 {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other, 1e-6)
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;
    fn mul(self, rhs: Matrix4) -> Matrix4 {
        let mut out = Matrix4::ZERO;
        for r in 0..4 {
            for c in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[r][k] * rhs.data[k][c];
                }
                out.data[r][c] = sum;
            }
        }
        out
    }
}

impl Mul<Vector3> for Matrix4 {
    type Output = Vector3;

    /// Transform a point, treating it as homogeneous with w = 1.
    fn mul(self, v: Vector3) -> Vector3 {
        let m = &self.data;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3],
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3],
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3],
        )
    }
}

impl Index<(usize, usize)> for Matrix4 {
    type Output = f64;

    /// Access by (row, col), clamped to valid indices.
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row.min(3)][col.min(3)]
    }
}

impl IndexMut<(usize, usize)> for Matrix4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row.min(3)][col.min(3)]
    }
}

impl fmt::Display for Matrix4 {
    /// Sixteen space-separated row-major values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for row in &self.data {
            for v in row {
                if first {
                    write!(f, "{v}")?;
                    first = false;
                } else {
                    write!(f, " {v}")?;
                }
            }
        }
        Ok(())
    }
}
