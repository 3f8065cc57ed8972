//! Axis-aligned regions of 3D space as products of three intervals.

use crate::interval::Interval;
use crate::vector3::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A region of 3D space formed by one interval per axis.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Region3 {
    /// Interval along the x axis.
    ix: Interval,
    /// Interval along the y axis.
    iy: Interval,
    /// Interval along the z axis.
    iz: Interval,
}

impl Region3 {
    /// All of 3D space.
    pub const UNBOUNDED: Region3 = Region3 {
        ix: Interval::UNBOUNDED,
        iy: Interval::UNBOUNDED,
        iz: Interval::UNBOUNDED,
    };

    /// A region from per-axis intervals.
    pub const fn new(ix: Interval, iy: Interval, iz: Interval) -> Self {
        Self { ix, iy, iz }
    }

    /// An open box (xl, xr) x (yl, yr) x (zl, zr).
    pub const fn open(xl: f64, yl: f64, zl: f64, xr: f64, yr: f64, zr: f64) -> Self {
        Self::new(
            Interval::open(xl, xr),
            Interval::open(yl, yr),
            Interval::open(zl, zr),
        )
    }

    /// A closed box [xl, xr] x [yl, yr] x [zl, zr].
    pub const fn closed(xl: f64, yl: f64, zl: f64, xr: f64, yr: f64, zr: f64) -> Self {
        Self::new(
            Interval::closed(xl, xr),
            Interval::closed(yl, yr),
            Interval::closed(zl, zr),
        )
    }

    /// The x-axis interval.
    pub fn ix(&self) -> &Interval {
        &self.ix
    }

    /// The y-axis interval.
    pub fn iy(&self) -> &Interval {
        &self.iy
    }

    /// The z-axis interval.
    pub fn iz(&self) -> &Interval {
        &self.iz
    }

    /// True when any axis interval is empty.
    pub fn is_empty(&self) -> bool {
        self.ix.is_empty() || self.iy.is_empty() || self.iz.is_empty()
    }

    /// True when the point lies within the region on every axis.
    pub fn contains(&self, point: &Vector3) -> bool {
        self.ix.contains(point.x) && self.iy.contains(point.y) && self.iz.contains(point.z)
    }

    /// True when `other` is a subset of this region.
    pub fn contains_region(&self, other: &Region3) -> bool {
        self.ix.contains_interval(&other.ix)
            && self.iy.contains_interval(&other.iy)
            && self.iz.contains_interval(&other.iz)
    }

    /// True when the regions share at least one point.
    pub fn intersects(&self, other: &Region3) -> bool {
        self.ix.intersects(&other.ix)
            && self.iy.intersects(&other.iy)
            && self.iz.intersects(&other.iz)
    }
}

impl PartialEq for Region3 {
    /// Mutual containment; all empty regions compare equal.
    fn eq(&self, other: &Self) -> bool {
        if self.is_empty() {
            return other.is_empty();
        }
        self.contains_region(other) && other.contains_region(self)
    }
}

impl fmt::Display for Region3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} x {}", self.ix, self.iy, self.iz)
    }
}
