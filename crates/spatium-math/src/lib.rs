#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Spatium Math
//!
//! Fixed-size linear algebra and geometry value types used across the
//! spatium workspace: vectors, row-major matrices, quaternions, rigid
//! transforms, angles, intervals, axis-aligned regions and cubic
//! polynomials.
//!
//! All types are plain `f64` value types with copy semantics. Equality
//! (`==`) is tolerance-based with a per-type epsilon; exact comparisons
//! go through `equal(other, tol)` with an explicit tolerance.

/// Angle type wrapping a radian value.
pub mod angle;
/// Shared floating-point helpers.
pub mod helpers;
/// One-dimensional intervals with open or closed bounds.
pub mod interval;
/// 3x3 row-major matrix.
pub mod matrix3;
/// 4x4 row-major matrix with rigid-transform helpers.
pub mod matrix4;
/// 6x6 row-major block matrix.
pub mod matrix6;
/// Cubic polynomials with interval-constrained minimization.
pub mod polynomial3;
/// Rigid transform as position plus rotation.
pub mod pose3;
/// Quaternion algebra.
pub mod quaternion;
/// Axis-aligned region as a product of three intervals.
pub mod region3;
/// 2D vector.
pub mod vector2;
/// 3D vector.
pub mod vector3;
/// 4D vector.
pub mod vector4;

pub use angle::Angle;
pub use helpers::equal;
pub use interval::Interval;
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use matrix6::{Matrix6, Matrix6Corner};
pub use polynomial3::Polynomial3;
pub use pose3::Pose3;
pub use quaternion::Quaternion;
pub use region3::Region3;
pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;
