#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Spatium Grid
//!
//! Discretized spatial containers: a 2D occupancy grid with Bresenham
//! rasterization and information-gain scoring, and a volumetric lookup
//! field for trilinear interpolation over grid-like point clouds.

/// Volumetric sample indexing and trilinear interpolation.
pub mod lookup_field;
/// 2D occupancy mapping.
pub mod occupancy;

pub use lookup_field::{
    AxisIndex, InterpolationPoint1D, InterpolationPoint3D, VolumetricGridLookupField,
};
pub use occupancy::{CellState, OccupancyGrid, OccupancyGridError};
