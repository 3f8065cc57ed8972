//! Rigid transform: a position plus a rotation.
//!
//! The `+`/`-` frame-composition algebra reads right-to-left: if A is the
//! transform from O to P specified in frame O and B is the transform from
//! P to Q specified in frame P, then `b + a` is the transform from O to Q
//! specified in frame O. `-` undoes that composition.

use crate::helpers::round_to_precision;
use crate::quaternion::Quaternion;
use crate::vector3::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A position and orientation in 3D space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose3 {
    /// Position of the frame origin.
    pub pos: Vector3,
    /// Orientation of the frame.
    pub rot: Quaternion,
}

impl Pose3 {
    /// The identity pose: zero position, identity rotation.
    pub const IDENTITY: Pose3 = Pose3 {
        pos: Vector3::ZERO,
        rot: Quaternion::IDENTITY,
    };

    /// Create a pose from a position and rotation.
    pub const fn new(pos: Vector3, rot: Quaternion) -> Self {
        Self { pos, rot }
    }

    /// Create a pose from position coordinates and Euler angles.
    #[allow(clippy::too_many_arguments)]
    pub fn from_components(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            pos: Vector3::new(x, y, z),
            rot: Quaternion::from_euler(roll, pitch, yaw),
        }
    }

    /// The inverse transform.
    pub fn inverse(&self) -> Pose3 {
        let inv = self.rot.inverse();
        Pose3::new(inv.rotate_vector(&(self.pos * -1.0)), inv)
    }

    /// Express a point given in this frame in the parent frame.
    pub fn coord_position_add(&self, pos: &Vector3) -> Vector3 {
        self.pos + self.rot.rotate_vector(pos)
    }

    /// Position of `self` composed onto `other`, other.pos +
    /// other.rot * self.pos.
    pub fn coord_position_add_pose(&self, other: &Pose3) -> Vector3 {
        other.pos + other.rot.rotate_vector(&self.pos)
    }

    /// Position of `self` relative to `other`, expressed in `other`'s
    /// frame.
    pub fn coord_position_sub(&self, other: &Pose3) -> Vector3 {
        other
            .rot
            .inverse()
            .rotate_vector(&(self.pos - other.pos))
    }

    /// Rotation of `self` composed onto `rot`.
    pub fn coord_rotation_add(&self, rot: &Quaternion) -> Quaternion {
        *rot * self.rot
    }

    /// Rotation of `self` relative to `rot`, normalized.
    pub fn coord_rotation_sub(&self, rot: &Quaternion) -> Quaternion {
        (rot.inverse() * self.rot).normalized()
    }

    /// Solve for `a` in `b = a + self`, given `b`.
    pub fn coord_pose_solve(&self, b: &Pose3) -> Pose3 {
        let q = self.rot.inverse() * b.rot;
        let p = b.pos - q.rotate_vector(&self.pos);
        Pose3::new(p, q)
    }

    /// Rotate the position about the origin by `q`, keeping the
    /// orientation unchanged.
    pub fn rotate_position_about_origin(&self, q: &Quaternion) -> Pose3 {
        let p = &self.pos;
        Pose3::new(
            Vector3::new(
                (1.0 - 2.0 * q.y * q.y - 2.0 * q.z * q.z) * p.x
                    + 2.0 * (q.x * q.y + q.w * q.z) * p.y
                    + 2.0 * (q.x * q.z - q.w * q.y) * p.z,
                2.0 * (q.x * q.y - q.w * q.z) * p.x
                    + (1.0 - 2.0 * q.x * q.x - 2.0 * q.z * q.z) * p.y
                    + 2.0 * (q.y * q.z + q.w * q.x) * p.z,
                2.0 * (q.x * q.z + q.w * q.y) * p.x
                    + 2.0 * (q.y * q.z - q.w * q.x) * p.y
                    + (1.0 - 2.0 * q.x * q.x - 2.0 * q.y * q.y) * p.z,
            ),
            self.rot,
        )
    }

    /// Round position and rotation components to `precision` decimal
    /// places.
    pub fn round_to(&mut self, precision: u32) {
        self.pos.round_to(precision);
        self.rot.w = round_to_precision(self.rot.w, precision);
        self.rot.x = round_to_precision(self.rot.x, precision);
        self.rot.y = round_to_precision(self.rot.y, precision);
        self.rot.z = round_to_precision(self.rot.z, precision);
    }

    /// Reset to the identity pose.
    pub fn reset(&mut self) {
        self.pos = Vector3::ZERO;
        self.rot = Quaternion::IDENTITY;
    }

    /// Zero any non-finite components.
    pub fn correct(&mut self) {
        self.pos.correct();
        self.rot.correct();
    }

    /// True if all components are finite.
    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.rot.is_finite()
    }

    /// Component-wise equality within a tolerance.
    pub fn equal(&self, other: &Pose3, tol: f64) -> bool {
        self.pos.equal(&other.pos, tol) && self.rot.equal(&other.rot, tol)
    }
}

impl Add for Pose3 {
    type Output = Pose3;

    /// Frame composition: `b + a` applies `b` in frame P, then `a` from O
    /// to P.
    fn add(self, rhs: Pose3) -> Pose3 {
        Pose3::new(
            self.coord_position_add_pose(&rhs),
            self.coord_rotation_add(&rhs.rot),
        )
    }
}

impl AddAssign for Pose3 {
    fn add_assign(&mut self, rhs: Pose3) {
        *self = *self + rhs;
    }
}

impl Sub for Pose3 {
    type Output = Pose3;

    /// Inverse frame composition: `b - a` is the transform from P to Q in
    /// frame P when `a` goes O to P and `b` goes O to Q.
    fn sub(self, rhs: Pose3) -> Pose3 {
        Pose3::new(
            self.coord_position_sub(&rhs),
            self.coord_rotation_sub(&rhs.rot),
        )
    }
}

impl SubAssign for Pose3 {
    fn sub_assign(&mut self, rhs: Pose3) {
        *self = *self - rhs;
    }
}

impl Neg for Pose3 {
    type Output = Pose3;
    fn neg(self) -> Pose3 {
        self.inverse()
    }
}

impl Mul for Pose3 {
    type Output = Pose3;

    /// Matrix-order composition, equivalent to `rhs + self`.
    fn mul(self, rhs: Pose3) -> Pose3 {
        Pose3::new(rhs.coord_position_add_pose(&self), self.rot * rhs.rot)
    }
}

impl MulAssign for Pose3 {
    fn mul_assign(&mut self, rhs: Pose3) {
        *self = *self * rhs;
    }
}

impl fmt::Display for Pose3 {
    /// Position followed by Euler angles, space-separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pos, self.rot)
    }
}
