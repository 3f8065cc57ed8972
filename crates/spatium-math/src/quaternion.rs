//! Quaternion algebra for 3D rotations.
//!
//! Quaternions are stored as `(w, x, y, z)` with the scalar part first.
//! Products follow the Hamilton convention, so composition reads
//! right-to-left: `a * b` applies `b` first, then `a`.

use crate::helpers::equal;
use crate::matrix3::Matrix3;
use crate::vector3::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A quaternion with scalar part `w` and vector part `(x, y, z)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Quaternion {
    /// Scalar component.
    pub w: f64,
    /// First vector component.
    pub x: f64,
    /// Second vector component.
    pub y: f64,
    /// Third vector component.
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// The identity rotation (1, 0, 0, 0).
    pub const IDENTITY: Quaternion = Quaternion::new(1.0, 0.0, 0.0, 0.0);
    /// The zero quaternion (0, 0, 0, 0). Not a rotation.
    pub const ZERO: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 0.0);

    /// Create a quaternion from components.
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Quaternion from Euler angles (roll, pitch, yaw) in radians.
    pub fn from_euler(roll: f64, pitch: f64, yaw: f64) -> Self {
        let phi = roll / 2.0;
        let the = pitch / 2.0;
        let psi = yaw / 2.0;

        let mut q = Quaternion::new(
            phi.cos() * the.cos() * psi.cos() + phi.sin() * the.sin() * psi.sin(),
            phi.sin() * the.cos() * psi.cos() - phi.cos() * the.sin() * psi.sin(),
            phi.cos() * the.sin() * psi.cos() + phi.sin() * the.cos() * psi.sin(),
            phi.cos() * the.cos() * psi.sin() - phi.sin() * the.sin() * psi.cos(),
        );
        q.normalize();
        q
    }

    /// Quaternion from an Euler angle vector (roll, pitch, yaw).
    pub fn from_euler_vector(v: &Vector3) -> Self {
        Self::from_euler(v.x, v.y, v.z)
    }

    /// Quaternion rotating by `angle` radians about `axis`.
    ///
    /// A zero axis yields the identity.
    pub fn from_axis_angle(axis: &Vector3, angle: f64) -> Self {
        let l = axis.squared_length();
        let mut q = if equal(l, 0.0, 1e-6) {
            Quaternion::IDENTITY
        } else {
            let half = angle * 0.5;
            let scale = half.sin() / l.sqrt();
            Quaternion::new(half.cos(), axis.x * scale, axis.y * scale, axis.z * scale)
        };
        q.normalize();
        q
    }

    /// Quaternion from an orthogonal rotation matrix.
    pub fn from_rotation_matrix(m: &Matrix3) -> Self {
        let trace = m.get(0, 0) + m.get(1, 1) + m.get(2, 2);
        if trace > 0.0000001 {
            let w = (1.0 + trace).sqrt() / 2.0;
            let s = 1.0 / (4.0 * w);
            Quaternion::new(
                w,
                (m.get(2, 1) - m.get(1, 2)) * s,
                (m.get(0, 2) - m.get(2, 0)) * s,
                (m.get(1, 0) - m.get(0, 1)) * s,
            )
        } else if m.get(0, 0) > m.get(1, 1) && m.get(0, 0) > m.get(2, 2) {
            let x = (1.0 + m.get(0, 0) - m.get(1, 1) - m.get(2, 2)).sqrt() / 2.0;
            let s = 1.0 / (4.0 * x);
            Quaternion::new(
                (m.get(2, 1) - m.get(1, 2)) * s,
                x,
                (m.get(1, 0) + m.get(0, 1)) * s,
                (m.get(0, 2) + m.get(2, 0)) * s,
            )
        } else if m.get(1, 1) > m.get(2, 2) {
            let y = (1.0 - m.get(0, 0) + m.get(1, 1) - m.get(2, 2)).sqrt() / 2.0;
            let s = 1.0 / (4.0 * y);
            Quaternion::new(
                (m.get(0, 2) - m.get(2, 0)) * s,
                (m.get(0, 1) + m.get(1, 0)) * s,
                y,
                (m.get(1, 2) + m.get(2, 1)) * s,
            )
        } else {
            let z = (1.0 - m.get(0, 0) - m.get(1, 1) + m.get(2, 2)).sqrt() / 2.0;
            let s = 1.0 / (4.0 * z);
            Quaternion::new(
                (m.get(1, 0) - m.get(0, 1)) * s,
                (m.get(0, 2) + m.get(2, 0)) * s,
                (m.get(1, 2) + m.get(2, 1)) * s,
                z,
            )
        }
    }

    /// Rotation carrying the direction of `v1` onto the direction of `v2`,
    /// so that `v2.normalized() == q.rotate_vector(v1.normalized())`.
    pub fn from_2_axes(v1: &Vector3, v2: &Vector3) -> Self {
        // half-way quaternion: (1, (0,0,0)) + (v1 . v2, v1 x v2),
        // normalized; k restores the magnitudes of non-unit inputs
        let k_cos_theta = v1.dot(v2);
        let k = (v1.squared_length() * v2.squared_length()).sqrt();

        if (k_cos_theta / k + 1.0).abs() < 1e-6 {
            // opposite vectors: pick any axis orthogonal to v1
            let v1_abs = v1.abs();
            let other = if v1_abs.x < v1_abs.y {
                if v1_abs.x < v1_abs.z {
                    Vector3::UNIT_X
                } else {
                    Vector3::UNIT_Z
                }
            } else if v1_abs.y < v1_abs.z {
                Vector3::UNIT_Y
            } else {
                Vector3::UNIT_Z
            };
            let axis = v1.cross(&other).normalized();
            Quaternion::new(0.0, axis.x, axis.y, axis.z)
        } else {
            let axis = v1.cross(v2);
            let mut q = Quaternion::new(k_cos_theta + k, axis.x, axis.y, axis.z);
            q.normalize();
            q
        }
    }

    /// The conjugate (-x, -y, -z).
    pub fn conjugate(&self) -> Quaternion {
        Quaternion::new(self.w, -self.x, -self.y, -self.z)
    }

    /// The multiplicative inverse. The zero quaternion maps to identity.
    pub fn inverse(&self) -> Quaternion {
        let s = self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z;
        if s == 0.0 {
            Quaternion::IDENTITY
        } else {
            Quaternion::new(self.w / s, -self.x / s, -self.y / s, -self.z / s)
        }
    }

    /// Quaternion logarithm.
    ///
    /// If q = cos(A) + sin(A)*(x*i + y*j + z*k) for a unit vector (x,y,z),
    /// then log(q) = A*(x*i + y*j + z*k). The real part of the result is
    /// always zero.
    pub fn log(&self) -> Quaternion {
        if self.w.abs() < 1.0 {
            let angle = self.w.acos();
            let s = angle.sin();
            if s.abs() >= 1e-3 {
                let coeff = angle / s;
                return Quaternion::new(0.0, coeff * self.x, coeff * self.y, coeff * self.z);
            }
        }
        Quaternion::new(0.0, self.x, self.y, self.z)
    }

    /// Quaternion exponential, the inverse of [`Quaternion::log`] for pure
    /// quaternions.
    pub fn exp(&self) -> Quaternion {
        let angle = (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        let s = angle.sin();
        if s.abs() >= 1e-3 {
            let coeff = s / angle;
            Quaternion::new(angle.cos(), coeff * self.x, coeff * self.y, coeff * self.z)
        } else {
            Quaternion::new(angle.cos(), self.x, self.y, self.z)
        }
    }

    /// Normalize to unit length in place. The zero quaternion becomes
    /// identity.
    pub fn normalize(&mut self) {
        let s = (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        if s == 0.0 {
            *self = Quaternion::IDENTITY;
        } else {
            self.w /= s;
            self.x /= s;
            self.y /= s;
            self.z /= s;
        }
    }

    /// A normalized copy.
    pub fn normalized(&self) -> Quaternion {
        let mut q = *self;
        q.normalize();
        q
    }

    /// Zero any non-finite components (w falls back to 1), and map the
    /// all-zero quaternion to identity.
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
            self.w = 1.0;
        }
        if equal(self.w, 0.0, 1e-6)
            && equal(self.x, 0.0, 1e-6)
            && equal(self.y, 0.0, 1e-6)
            && equal(self.z, 0.0, 1e-6)
        {
            self.w = 1.0;
        }
    }

    /// Euler angle representation (roll, pitch, yaw) in radians.
    pub fn euler(&self) -> Vector3 {
        let tol = 1e-15;
        let copy = self.normalized();

        let squ = copy.w * copy.w;
        let sqx = copy.x * copy.x;
        let sqy = copy.y * copy.y;
        let sqz = copy.z * copy.z;

        let sarg = -2.0 * (copy.x * copy.z - copy.w * copy.y);
        let pitch = if sarg <= -1.0 {
            -0.5 * std::f64::consts::PI
        } else if sarg >= 1.0 {
            0.5 * std::f64::consts::PI
        } else {
            sarg.asin()
        };

        // At pitch +-pi/2 only roll + yaw is observable; fix yaw = 0 and
        // fold everything into roll.
        if (sarg - 1.0).abs() < tol {
            Vector3::new(
                (2.0 * (copy.x * copy.y - copy.z * copy.w)).atan2(squ - sqx + sqy - sqz),
                pitch,
                0.0,
            )
        } else if (sarg + 1.0).abs() < tol {
            Vector3::new(
                (-2.0 * (copy.x * copy.y - copy.z * copy.w)).atan2(squ - sqx + sqy - sqz),
                pitch,
                0.0,
            )
        } else {
            Vector3::new(
                (2.0 * (copy.y * copy.z + copy.w * copy.x)).atan2(squ - sqx - sqy + sqz),
                pitch,
                (2.0 * (copy.x * copy.y + copy.w * copy.z)).atan2(squ + sqx - sqy - sqz),
            )
        }
    }

    /// Euler roll angle in radians.
    pub fn roll(&self) -> f64 {
        self.euler().x
    }

    /// Euler pitch angle in radians.
    pub fn pitch(&self) -> f64 {
        self.euler().y
    }

    /// Euler yaw angle in radians.
    pub fn yaw(&self) -> f64 {
        self.euler().z
    }

    /// Axis-angle representation.
    ///
    /// Near-zero rotations return angle 0 about the x axis.
    pub fn axis_angle(&self) -> (Vector3, f64) {
        let sq_len = self.x * self.x + self.y * self.y + self.z * self.z;
        if equal(sq_len, 0.0, 1e-12) {
            (Vector3::UNIT_X, 0.0)
        } else {
            let inv_len = 1.0 / sq_len.sqrt();
            (
                Vector3::new(self.x * inv_len, self.y * inv_len, self.z * inv_len),
                2.0 * self.w.acos(),
            )
        }
    }

    /// Dot product over the four components.
    pub fn dot(&self, other: &Quaternion) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Rotate a vector by this quaternion, q * v * q^-1.
    pub fn rotate_vector(&self, v: &Vector3) -> Vector3 {
        let tmp = Quaternion::new(0.0, v.x, v.y, v.z);
        let tmp = *self * tmp * self.inverse();
        Vector3::new(tmp.x, tmp.y, tmp.z)
    }

    /// Rotate a vector by the inverse of this quaternion.
    pub fn rotate_vector_reverse(&self, v: &Vector3) -> Vector3 {
        let tmp = Quaternion::new(0.0, v.x, v.y, v.z);
        let tmp = self.inverse() * (tmp * *self);
        Vector3::new(tmp.x, tmp.y, tmp.z)
    }

    /// The rotated x axis, column 0 of the equivalent rotation matrix.
    pub fn x_axis(&self) -> Vector3 {
        let ty = 2.0 * self.y;
        let tz = 2.0 * self.z;
        Vector3::new(
            1.0 - (ty * self.y + tz * self.z),
            ty * self.x + tz * self.w,
            tz * self.x - ty * self.w,
        )
    }

    /// The rotated y axis, column 1 of the equivalent rotation matrix.
    pub fn y_axis(&self) -> Vector3 {
        let tx = 2.0 * self.x;
        let ty = 2.0 * self.y;
        let tz = 2.0 * self.z;
        Vector3::new(
            ty * self.x - tz * self.w,
            1.0 - (tx * self.x + tz * self.z),
            tz * self.y + tx * self.w,
        )
    }

    /// The rotated z axis, column 2 of the equivalent rotation matrix.
    pub fn z_axis(&self) -> Vector3 {
        let tx = 2.0 * self.x;
        let ty = 2.0 * self.y;
        let tz = 2.0 * self.z;
        Vector3::new(
            tz * self.x + ty * self.w,
            tz * self.y - tx * self.w,
            1.0 - (tx * self.x + ty * self.y),
        )
    }

    /// Spherical linear interpolation from `p` to `q` at parameter `t`.
    ///
    /// With `shortest_path`, `q` is negated when the rotations are more
    /// than a half turn apart so interpolation takes the short way round.
    pub fn slerp(t: f64, p: &Quaternion, q: &Quaternion, shortest_path: bool) -> Quaternion {
        let mut cos = p.dot(q);
        let target = if cos < 0.0 && shortest_path {
            cos = -cos;
            -*q
        } else {
            *q
        };

        if cos.abs() < 1.0 - 1e-3 {
            let sin = (1.0 - cos * cos).sqrt();
            let angle = sin.atan2(cos);
            let inv_sin = 1.0 / sin;
            let c0 = ((1.0 - t) * angle).sin() * inv_sin;
            let c1 = (t * angle).sin() * inv_sin;
            *p * c0 + target * c1
        } else {
            // endpoints nearly equal (or nearly opposite, where slerp is
            // ill-defined): fall back to normalized lerp
            let mut out = *p * (1.0 - t) + target * t;
            out.normalize();
            out
        }
    }

    /// Spherical cubic interpolation through `p` and `q` with inner
    /// control quaternions `a` and `b`.
    pub fn squad(
        t: f64,
        p: &Quaternion,
        a: &Quaternion,
        b: &Quaternion,
        q: &Quaternion,
        shortest_path: bool,
    ) -> Quaternion {
        let slerp_t = 2.0 * t * (1.0 - t);
        let slerp_p = Self::slerp(t, p, q, shortest_path);
        let slerp_q = Self::slerp(t, a, b, false);
        Self::slerp(slerp_t, &slerp_p, &slerp_q, false)
    }

    /// Integrate a constant angular velocity (given in the base frame of
    /// this quaternion) over `delta_t` seconds.
    pub fn integrate(&self, angular_velocity: &Vector3, delta_t: f64) -> Quaternion {
        let theta = *angular_velocity * delta_t / 2.0;
        let theta_mag_sq = theta.squared_length();
        let (w, s) = if theta_mag_sq * theta_mag_sq / 24.0 < f64::MIN_POSITIVE {
            // second-order Taylor expansion for very small steps
            (1.0 - theta_mag_sq / 2.0, 1.0 - theta_mag_sq / 6.0)
        } else {
            let theta_mag = theta_mag_sq.sqrt();
            (theta_mag.cos(), theta_mag.sin() / theta_mag)
        };
        let delta_q = Quaternion::new(w, theta.x * s, theta.y * s, theta.z * s);
        delta_q * *self
    }

    /// True if all components are finite.
    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Component-wise equality within a tolerance.
    pub fn equal(&self, other: &Quaternion, tol: f64) -> bool {
        equal(self.w, other.w, tol)
            && equal(self.x, other.x, tol)
            && equal(self.y, other.y, tol)
            && equal(self.z, other.z, tol)
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other, 1e-3)
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    /// Hamilton product.
    fn mul(self, q: Quaternion) -> Quaternion {
        Quaternion::new(
            self.w * q.w - self.x * q.x - self.y * q.y - self.z * q.z,
            self.w * q.x + self.x * q.w + self.y * q.z - self.z * q.y,
            self.w * q.y - self.x * q.z + self.y * q.w + self.z * q.x,
            self.w * q.z + self.x * q.y - self.y * q.x + self.z * q.w,
        )
    }
}

impl Mul<f64> for Quaternion {
    type Output = Quaternion;
    fn mul(self, s: f64) -> Quaternion {
        Quaternion::new(self.w * s, self.x * s, self.y * s, self.z * s)
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;

    /// Rotate a vector.
    fn mul(self, v: Vector3) -> Vector3 {
        self.rotate_vector(&v)
    }
}

impl Add for Quaternion {
    type Output = Quaternion;
    fn add(self, q: Quaternion) -> Quaternion {
        Quaternion::new(self.w + q.w, self.x + q.x, self.y + q.y, self.z + q.z)
    }
}

impl Sub for Quaternion {
    type Output = Quaternion;
    fn sub(self, q: Quaternion) -> Quaternion {
        Quaternion::new(self.w - q.w, self.x - q.x, self.y - q.y, self.z - q.z)
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;
    fn neg(self) -> Quaternion {
        Quaternion::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Quaternion {
    /// Euler angle form, space-separated roll pitch yaw.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.euler())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_and_zero() {
        assert_eq!(Quaternion::default(), Quaternion::IDENTITY);

        // the zero quaternion normalizes to identity
        let mut z = Quaternion::ZERO;
        z.normalize();
        assert_eq!(z, Quaternion::IDENTITY);
    }

    #[test]
    fn test_axis_angle_round_trip() {
        let q = Quaternion::from_axis_angle(&Vector3::UNIT_Z, PI / 3.0);
        let (axis, angle) = q.axis_angle();
        assert!(axis.equal(&Vector3::UNIT_Z, 1e-12));
        assert_relative_eq!(angle, PI / 3.0, epsilon = 1e-12);

        // zero axis gives identity
        let q = Quaternion::from_axis_angle(&Vector3::ZERO, 1.0);
        assert_eq!(q, Quaternion::IDENTITY);

        // near-identity gives axis x, angle 0
        let (axis, angle) = Quaternion::IDENTITY.axis_angle();
        assert_eq!(axis, Vector3::UNIT_X);
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_euler_round_trip() {
        let q = Quaternion::from_euler(0.1, 0.2, 0.3);
        let e = q.euler();
        assert_relative_eq!(e.x, 0.1, epsilon = 1e-12);
        assert_relative_eq!(e.y, 0.2, epsilon = 1e-12);
        assert_relative_eq!(e.z, 0.3, epsilon = 1e-12);
        assert_relative_eq!(q.roll(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_vector() {
        let q = Quaternion::from_axis_angle(&Vector3::UNIT_Z, PI / 2.0);
        let v = q.rotate_vector(&Vector3::UNIT_X);
        assert!(v.equal(&Vector3::UNIT_Y, 1e-12));

        let back = q.rotate_vector_reverse(&v);
        assert!(back.equal(&Vector3::UNIT_X, 1e-12));
    }

    #[test]
    fn test_product_non_commutative() {
        let a = Quaternion::from_euler(0.3, 0.0, 0.0);
        let b = Quaternion::from_euler(0.0, 0.7, 0.0);
        let c = Quaternion::from_euler(0.0, 0.0, 1.1);
        assert_ne!(a * b * c, c * b * a);
    }

    #[test]
    fn test_inverse() {
        let q = Quaternion::from_euler(0.4, -0.2, 0.9);
        assert_eq!(q * q.inverse(), Quaternion::IDENTITY);
        assert_eq!(Quaternion::ZERO.inverse(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_log_exp() {
        let q = Quaternion::from_axis_angle(&Vector3::new(1.0, 2.0, 3.0), 0.8);
        let back = q.log().exp();
        assert!(q.equal(&back, 1e-9));
    }

    #[test]
    fn test_from_rotation_matrix() {
        let q = Quaternion::from_euler(0.5, -0.3, 1.2);
        let m = Matrix3::from_quaternion(&q);
        let q2 = Quaternion::from_rotation_matrix(&m);
        assert!(q.equal(&q2, 1e-9) || q.equal(&-q2, 1e-9));
    }

    #[test]
    fn test_from_2_axes() {
        let v1 = Vector3::new(1.0, 0.0, 0.0);
        let v2 = Vector3::new(0.0, 2.0, 0.0);
        let q = Quaternion::from_2_axes(&v1, &v2);
        assert!(q.rotate_vector(&v1.normalized()).equal(&v2.normalized(), 1e-9));

        // antiparallel: a half turn about some orthogonal axis
        let q = Quaternion::from_2_axes(&v1, &-v1);
        assert_relative_eq!(q.w, 0.0, epsilon = 1e-12);
        assert!(q.rotate_vector(&v1).equal(&-v1, 1e-9));
    }

    #[test]
    fn test_slerp() {
        let a = Quaternion::from_axis_angle(&Vector3::UNIT_Z, 0.0);
        let b = Quaternion::from_axis_angle(&Vector3::UNIT_Z, PI / 2.0);
        let mid = Quaternion::slerp(0.5, &a, &b, false);
        let expected = Quaternion::from_axis_angle(&Vector3::UNIT_Z, PI / 4.0);
        assert!(mid.equal(&expected, 1e-9));

        assert!(Quaternion::slerp(0.0, &a, &b, false).equal(&a, 1e-9));
        assert!(Quaternion::slerp(1.0, &a, &b, false).equal(&b, 1e-9));
    }

    #[test]
    fn test_integrate() {
        let q = Quaternion::IDENTITY;
        let rotated = q.integrate(&Vector3::new(0.0, 0.0, PI / 2.0), 1.0);
        let expected = Quaternion::from_axis_angle(&Vector3::UNIT_Z, PI / 2.0);
        assert!(rotated.equal(&expected, 1e-9));

        // sequential single-axis steps in a fixed order compose, but the
        // result depends on the order
        let wx = Vector3::new(0.3, 0.0, 0.0);
        let wz = Vector3::new(0.0, 0.0, 0.4);
        let xyz = Quaternion::IDENTITY.integrate(&wx, 1.0).integrate(&wz, 1.0);
        let zyx = Quaternion::IDENTITY.integrate(&wz, 1.0).integrate(&wx, 1.0);
        assert_ne!(xyz, zyx);
    }

    #[test]
    fn test_correct() {
        let mut q = Quaternion::new(f64::NAN, 0.2, f64::INFINITY, 0.4);
        q.correct();
        assert_eq!(q, Quaternion::new(1.0, 0.2, 0.0, 0.4));

        let mut z = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        z.correct();
        assert_eq!(z, Quaternion::IDENTITY);
    }

    #[test]
    fn test_axes() {
        let q = Quaternion::from_axis_angle(&Vector3::UNIT_Z, PI / 2.0);
        assert!(q.x_axis().equal(&Vector3::UNIT_Y, 1e-12));
        assert!(q.y_axis().equal(&-Vector3::UNIT_X, 1e-12));
        assert!(q.z_axis().equal(&Vector3::UNIT_Z, 1e-12));
    }

    #[test]
    fn test_random_matrix_round_trip() {
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let q = Quaternion::from_euler(
                rng.random_range(-PI..PI),
                rng.random_range(-PI / 2.0 + 0.01..PI / 2.0 - 0.01),
                rng.random_range(-PI..PI),
            );
            let m = crate::Matrix3::from_quaternion(&q);
            let r = Quaternion::from_rotation_matrix(&m);
            // A quaternion and its negation encode the same rotation.
            let same = q.equal(&r, 1e-9) || q.equal(&-r, 1e-9);
            assert!(same, "round trip failed for {q}");
        }
    }
}
