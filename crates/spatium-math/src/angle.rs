//! Angle in radians with principal-range normalization.

use crate::helpers::equal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Tolerance used when comparing two angles.
const ANGLE_TOL: f64 = 1e-3;

/// An angle stored in radians.
///
/// Arithmetic operates on raw radians without wrapping; call
/// [`Angle::normalized`] to reduce into the principal range (-pi, pi].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Angle {
    value: f64,
}

impl Angle {
    /// The zero angle.
    pub const ZERO: Angle = Angle { value: 0.0 };
    /// Half a turn.
    pub const PI: Angle = Angle {
        value: std::f64::consts::PI,
    };
    /// A quarter turn.
    pub const HALF_PI: Angle = Angle {
        value: std::f64::consts::FRAC_PI_2,
    };
    /// A full turn.
    pub const TWO_PI: Angle = Angle {
        value: std::f64::consts::TAU,
    };

    /// Create an angle from radians.
    pub fn radians(radians: f64) -> Self {
        Self { value: radians }
    }

    /// Create an angle from degrees.
    pub fn degrees(degrees: f64) -> Self {
        Self {
            value: degrees.to_radians(),
        }
    }

    /// The angle in radians.
    pub fn radian(&self) -> f64 {
        self.value
    }

    /// The angle in degrees.
    pub fn degree(&self) -> f64 {
        self.value.to_degrees()
    }

    /// Set the angle from a radian value.
    pub fn set_radian(&mut self, radians: f64) {
        self.value = radians;
    }

    /// Set the angle from a degree value.
    pub fn set_degree(&mut self, degrees: f64) {
        self.value = degrees.to_radians();
    }

    /// Reduce this angle into (-pi, pi] in place.
    pub fn normalize(&mut self) {
        self.value = self.value.sin().atan2(self.value.cos());
    }

    /// This angle reduced into (-pi, pi].
    pub fn normalized(&self) -> Self {
        Self {
            value: self.value.sin().atan2(self.value.cos()),
        }
    }

    /// Shortest angular distance to another angle.
    pub fn shortest_distance(&self, other: &Angle) -> Angle {
        (*self - *other).normalized()
    }

    /// Absolute value of the angle.
    pub fn abs(&self) -> Angle {
        Angle {
            value: self.value.abs(),
        }
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle {
            value: self.value + rhs.value,
        }
    }
}

impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Angle) {
        self.value += rhs.value;
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle {
            value: self.value - rhs.value,
        }
    }
}

impl SubAssign for Angle {
    fn sub_assign(&mut self, rhs: Angle) {
        self.value -= rhs.value;
    }
}

impl Mul for Angle {
    type Output = Angle;
    fn mul(self, rhs: Angle) -> Angle {
        Angle {
            value: self.value * rhs.value,
        }
    }
}

impl Div for Angle {
    type Output = Angle;
    fn div(self, rhs: Angle) -> Angle {
        Angle {
            value: self.value / rhs.value,
        }
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle { value: -self.value }
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        equal(self.value, other.value, ANGLE_TOL)
    }
}

impl PartialOrd for Angle {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        if equal(self.value, other.value, ANGLE_TOL) {
            Some(std::cmp::Ordering::Equal)
        } else {
            self.value.partial_cmp(&other.value)
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
