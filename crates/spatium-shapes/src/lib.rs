#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Spatium Shapes
//!
//! Solid primitives (box, sphere, cylinder, cone, capsule) carrying a
//! material, with volumes, densities and rigid-body mass matrices.

/// Material types and densities.
pub mod material;

/// Mass and moment of inertia of rigid bodies.
pub mod mass_matrix;

/// Geometric primitives carrying a material.
pub mod shapes;

pub use crate::mass_matrix::MassMatrix3;
pub use crate::material::{Material, MaterialType};
pub use crate::shapes::{Box3, Capsule, Cone, Cylinder, Sphere};
