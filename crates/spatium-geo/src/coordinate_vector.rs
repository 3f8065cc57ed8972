//! A 3-component vector that is either metric or spherical.

use serde::{Deserialize, Serialize};
use spatium_math::{equal, Angle, Vector3};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum Components {
    Metric { x: f64, y: f64 },
    Spherical { lat: Angle, lon: Angle },
}

/// A vector expressed either in metric coordinates (x, y in meters) or
/// in spherical coordinates (latitude, longitude as [`Angle`]s).
///
/// The third component is an altitude in meters in both cases. Mixing
/// the two kinds in arithmetic is an error: the result is tagged with
/// NaN components and an error is logged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoordinateVector3 {
    components: Components,
    z: f64,
}

impl Default for CoordinateVector3 {
    fn default() -> Self {
        Self::metric(0.0, 0.0, 0.0)
    }
}

impl CoordinateVector3 {
    /// A metric vector from its components in meters.
    pub const fn metric(x: f64, y: f64, z: f64) -> Self {
        Self {
            components: Components::Metric { x, y },
            z,
        }
    }

    /// A metric vector from a [`Vector3`].
    pub const fn from_metric_vector(v: &Vector3) -> Self {
        Self::metric(v.x, v.y, v.z)
    }

    /// A spherical vector from latitude, longitude and altitude.
    pub const fn spherical(lat: Angle, lon: Angle, z: f64) -> Self {
        Self {
            components: Components::Spherical { lat, lon },
            z,
        }
    }

    /// True when this vector holds metric components.
    pub const fn is_metric(&self) -> bool {
        matches!(self.components, Components::Metric { .. })
    }

    /// True when this vector holds spherical components.
    pub const fn is_spherical(&self) -> bool {
        matches!(self.components, Components::Spherical { .. })
    }

    /// Replace the contents with metric components.
    pub fn set_metric(&mut self, x: f64, y: f64, z: f64) {
        *self = Self::metric(x, y, z);
    }

    /// Replace the contents with spherical components.
    pub fn set_spherical(&mut self, lat: Angle, lon: Angle, z: f64) {
        *self = Self::spherical(lat, lon, z);
    }

    /// The metric components as a [`Vector3`], or None when spherical.
    pub fn as_metric_vector(&self) -> Option<Vector3> {
        match self.components {
            Components::Metric { x, y } => Some(Vector3::new(x, y, self.z)),
            Components::Spherical { .. } => None,
        }
    }

    /// The metric x component, or None when spherical.
    pub fn x(&self) -> Option<f64> {
        match self.components {
            Components::Metric { x, .. } => Some(x),
            Components::Spherical { .. } => None,
        }
    }

    /// The metric y component, or None when spherical.
    pub fn y(&self) -> Option<f64> {
        match self.components {
            Components::Metric { y, .. } => Some(y),
            Components::Spherical { .. } => None,
        }
    }

    /// The latitude, or None when metric.
    pub fn lat(&self) -> Option<Angle> {
        match self.components {
            Components::Spherical { lat, .. } => Some(lat),
            Components::Metric { .. } => None,
        }
    }

    /// The longitude, or None when metric.
    pub fn lon(&self) -> Option<Angle> {
        match self.components {
            Components::Spherical { lon, .. } => Some(lon),
            Components::Metric { .. } => None,
        }
    }

    /// The altitude in meters.
    pub const fn z(&self) -> f64 {
        self.z
    }

    /// Set the metric x component. Returns false when spherical.
    pub fn set_x(&mut self, v: f64) -> bool {
        match &mut self.components {
            Components::Metric { x, .. } => {
                *x = v;
                true
            }
            Components::Spherical { .. } => false,
        }
    }

    /// Set the metric y component. Returns false when spherical.
    pub fn set_y(&mut self, v: f64) -> bool {
        match &mut self.components {
            Components::Metric { y, .. } => {
                *y = v;
                true
            }
            Components::Spherical { .. } => false,
        }
    }

    /// Set the latitude. Returns false when metric.
    pub fn set_lat(&mut self, v: Angle) -> bool {
        match &mut self.components {
            Components::Spherical { lat, .. } => {
                *lat = v;
                true
            }
            Components::Metric { .. } => false,
        }
    }

    /// Set the longitude. Returns false when metric.
    pub fn set_lon(&mut self, v: Angle) -> bool {
        match &mut self.components {
            Components::Spherical { lon, .. } => {
                *lon = v;
                true
            }
            Components::Metric { .. } => false,
        }
    }

    /// Set the altitude in meters.
    pub fn set_z(&mut self, v: f64) {
        self.z = v;
    }

    /// True when every stored component is finite.
    pub fn is_finite(&self) -> bool {
        if !self.z.is_finite() {
            return false;
        }
        match self.components {
            Components::Metric { x, y } => x.is_finite() && y.is_finite(),
            Components::Spherical { lat, lon } => {
                lat.radian().is_finite() && lon.radian().is_finite()
            }
        }
    }

    /// Comparison with separate metric and angular tolerances.
    ///
    /// Vectors of different kinds never compare equal. Angles compare
    /// through their shortest distance, so equivalent longitudes across
    /// the antimeridian match.
    pub fn equal(&self, other: &Self, tol: f64, angular_tol: Angle) -> bool {
        if !equal(self.z, other.z, tol) {
            return false;
        }
        match (self.components, other.components) {
            (Components::Metric { x, y }, Components::Metric { x: ox, y: oy }) => {
                equal(x, ox, tol) && equal(y, oy, tol)
            }
            (
                Components::Spherical { lat, lon },
                Components::Spherical { lat: olat, lon: olon },
            ) => {
                lat.shortest_distance(&olat).abs() <= angular_tol
                    && lon.shortest_distance(&olon).abs() <= angular_tol
            }
            _ => false,
        }
    }

    fn nan_like(&self) -> Self {
        if self.is_metric() {
            Self::metric(f64::NAN, f64::NAN, f64::NAN)
        } else {
            Self::spherical(
                Angle::radians(f64::NAN),
                Angle::radians(f64::NAN),
                f64::NAN,
            )
        }
    }
}

impl PartialEq for CoordinateVector3 {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other, 1e-3, Angle::radians(1e-3))
    }
}

impl Add for CoordinateVector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        if self.is_metric() != rhs.is_metric() {
            log::error!("cannot add metric and spherical coordinates, returning NaN");
            return self.nan_like();
        }
        let components = match (self.components, rhs.components) {
            (Components::Metric { x, y }, Components::Metric { x: ox, y: oy }) => {
                Components::Metric { x: x + ox, y: y + oy }
            }
            (
                Components::Spherical { lat, lon },
                Components::Spherical { lat: olat, lon: olon },
            ) => Components::Spherical {
                lat: lat + olat,
                lon: lon + olon,
            },
            _ => unreachable!(),
        };
        Self {
            components,
            z: self.z + rhs.z,
        }
    }
}

impl AddAssign for CoordinateVector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for CoordinateVector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        if self.is_metric() != rhs.is_metric() {
            log::error!("cannot subtract metric and spherical coordinates, returning NaN");
            return self.nan_like();
        }
        let components = match (self.components, rhs.components) {
            (Components::Metric { x, y }, Components::Metric { x: ox, y: oy }) => {
                Components::Metric { x: x - ox, y: y - oy }
            }
            (
                Components::Spherical { lat, lon },
                Components::Spherical { lat: olat, lon: olon },
            ) => Components::Spherical {
                lat: lat - olat,
                lon: lon - olon,
            },
            _ => unreachable!(),
        };
        Self {
            components,
            z: self.z - rhs.z,
        }
    }
}

impl SubAssign for CoordinateVector3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for CoordinateVector3 {
    type Output = Self;

    fn neg(self) -> Self {
        let components = match self.components {
            Components::Metric { x, y } => Components::Metric { x: -x, y: -y },
            Components::Spherical { lat, lon } => Components::Spherical {
                lat: -lat,
                lon: -lon,
            },
        };
        Self {
            components,
            z: -self.z,
        }
    }
}

impl fmt::Display for CoordinateVector3 {
    /// Metric vectors print as `x y z`, spherical vectors as
    /// `lat° lon° z` with the angles in degrees.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.components {
            Components::Metric { x, y } => write!(f, "{} {} {}", x, y, self.z),
            Components::Spherical { lat, lon } => {
                write!(f, "{}° {}° {}", lat.degree(), lon.degree(), self.z)
            }
        }
    }
}
