#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Spatium Geo
//!
//! Geodesy on reference ellipsoids: positions tagged as metric or
//! spherical, and conversions between latitude/longitude, ECEF and
//! local tangent frames anchored at a reference point.

/// Metric-or-spherical tagged vector.
pub mod coordinate_vector;
/// Reference surfaces and frame conversions.
pub mod spherical;

pub use coordinate_vector::CoordinateVector3;
pub use spherical::{CoordinateType, SphericalCoordinates, SurfaceType};
