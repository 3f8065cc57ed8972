//! Spatial indexing and trilinear interpolation over scattered samples.
//!
//! The sample cloud may be distorted or have non-uniform strides, but
//! it must still be grid-like: points share coordinate values along
//! each axis. Missing samples are allowed; queries fall back to a
//! caller-supplied default where data is absent.

use spatium_math::Vector3;
use std::collections::BTreeMap;

/// f64 key with a total order, so axis positions can live in a
/// [`BTreeMap`]. NaN positions are not meaningful sample coordinates
/// and sort last.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisKey(f64);

impl Eq for AxisKey {}

impl PartialOrd for AxisKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AxisKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// An interpolation anchor on a single axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationPoint1D {
    /// Coordinate of the anchor on the axis.
    pub position: f64,
    /// Registration index of the coordinate on this axis.
    pub index: usize,
}

/// An interpolation anchor in the sample cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationPoint3D {
    /// Position of the anchor sample.
    pub position: Vector3,
    /// Index of the sample's value, or None where the grid is sparse.
    pub index: Option<usize>,
}

/// A sparse number line mapping coordinate values to registration
/// indices, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct AxisIndex {
    positions: BTreeMap<AxisKey, usize>,
}

impl AxisIndex {
    /// Register a coordinate if it has not been seen yet.
    pub fn add_index_if_not_found(&mut self, value: f64) {
        let next = self.positions.len();
        self.positions.entry(AxisKey(value)).or_insert(next);
    }

    /// Number of distinct coordinates registered.
    pub fn num_unique_indices(&self) -> usize {
        self.positions.len()
    }

    /// Smallest registered coordinate, or zero when empty.
    pub fn min_key(&self) -> f64 {
        self.positions.keys().next().map_or(0.0, |k| k.0)
    }

    /// Largest registered coordinate, or zero when empty.
    pub fn max_key(&self) -> f64 {
        self.positions.keys().next_back().map_or(0.0, |k| k.0)
    }

    /// Registration index of an exact coordinate.
    pub fn index(&self, value: f64) -> Option<usize> {
        self.positions.get(&AxisKey(value)).copied()
    }

    /// Anchors to interpolate a coordinate from.
    ///
    /// Returns one anchor for a coordinate matching a registered value
    /// within `tol`, two bracketing anchors for a coordinate interior
    /// to the registered range, and none outside the range.
    pub fn interpolators(&self, value: f64, tol: f64) -> Vec<InterpolationPoint1D> {
        let mut at_or_above = self.positions.range(AxisKey(value)..);
        let Some((upper_key, upper_index)) = at_or_above.next() else {
            return Vec::new();
        };
        if (upper_key.0 - value).abs() < tol {
            return vec![InterpolationPoint1D {
                position: upper_key.0,
                index: *upper_index,
            }];
        }
        let Some((lower_key, lower_index)) = self.positions.range(..AxisKey(value)).next_back()
        else {
            return Vec::new();
        };
        vec![
            InterpolationPoint1D {
                position: lower_key.0,
                index: *lower_index,
            },
            InterpolationPoint1D {
                position: upper_key.0,
                index: *upper_index,
            },
        ]
    }
}

/// Lookup table over a volumetric sample cloud.
///
/// Indexes each axis's distinct coordinate values and keeps a dense
/// table of sample indices, so a query point can be resolved to the
/// corners of its enclosing cell and interpolated trilinearly.
#[derive(Debug, Clone)]
pub struct VolumetricGridLookupField {
    x_index: AxisIndex,
    y_index: AxisIndex,
    z_index: AxisIndex,
    // indexed [z][y][x] by per-axis registration indices
    table: Vec<Vec<Vec<Option<usize>>>>,
}

impl VolumetricGridLookupField {
    /// A field whose sample values are indexed by cloud position.
    pub fn new(cloud: &[Vector3]) -> Self {
        let indices: Vec<usize> = (0..cloud.len()).collect();
        Self::with_indices(cloud, &indices)
    }

    /// A field with explicit value indices per cloud point.
    ///
    /// `indices` must be the same length as `cloud`.
    pub fn with_indices(cloud: &[Vector3], indices: &[usize]) -> Self {
        debug_assert_eq!(cloud.len(), indices.len());

        let mut field = Self {
            x_index: AxisIndex::default(),
            y_index: AxisIndex::default(),
            z_index: AxisIndex::default(),
            table: Vec::new(),
        };
        for pt in cloud {
            field.x_index.add_index_if_not_found(pt.x);
            field.y_index.add_index_if_not_found(pt.y);
            field.z_index.add_index_if_not_found(pt.z);
        }

        let num_x = field.x_index.num_unique_indices();
        let num_y = field.y_index.num_unique_indices();
        let num_z = field.z_index.num_unique_indices();
        field.table = vec![vec![vec![None; num_x]; num_y]; num_z];

        for (pt, &value_index) in cloud.iter().zip(indices) {
            let (Some(xi), Some(yi), Some(zi)) = (
                field.x_index.index(pt.x),
                field.y_index.index(pt.y),
                field.z_index.index(pt.z),
            ) else {
                continue;
            };
            field.table[zi][yi][xi] = Some(value_index);
        }
        field
    }

    /// Corner samples needed to interpolate at a query point.
    ///
    /// Returns 8 anchors for a point interior to a cell, 4 on a face,
    /// 2 on an edge, 1 for a coincident point and none outside the
    /// indexed extent. Sparse corners carry a None index.
    pub fn interpolators(&self, pt: &Vector3) -> Vec<InterpolationPoint3D> {
        self.interpolators_with_tol(pt, 1e-6, 1e-6, 1e-6)
    }

    /// Like [`Self::interpolators`] with per-axis exact-hit tolerances,
    /// for data whose axes span different magnitudes.
    pub fn interpolators_with_tol(
        &self,
        pt: &Vector3,
        x_tol: f64,
        y_tol: f64,
        z_tol: f64,
    ) -> Vec<InterpolationPoint3D> {
        let xs = self.x_index.interpolators(pt.x, x_tol);
        let ys = self.y_index.interpolators(pt.y, y_tol);
        let zs = self.z_index.interpolators(pt.z, z_tol);

        let mut anchors = Vec::with_capacity(xs.len() * ys.len() * zs.len());
        for x in &xs {
            for y in &ys {
                for z in &zs {
                    anchors.push(InterpolationPoint3D {
                        position: Vector3::new(x.position, y.position, z.position),
                        index: self.table[z.index][y.index][x.index],
                    });
                }
            }
        }
        anchors
    }

    /// Estimate the field value at a query point by trilinear
    /// interpolation.
    ///
    /// None when the point lies outside the indexed extent; anchors
    /// without data contribute `default`.
    pub fn estimate_value_using_trilinear(
        &self,
        pt: &Vector3,
        values: &[f64],
        default: f64,
    ) -> Option<f64> {
        let anchors = self.interpolators(pt);
        match anchors.len() {
            0 => None,
            1 => Some(anchors[0].index.map_or(default, |i| values[i])),
            2 => Some(linear_interpolate(
                &anchors[0], &anchors[1], values, pt, default,
            )),
            4 => Some(bilinear_interpolate(&anchors, 0, values, pt, default)),
            8 => Some(trilinear_interpolate(&anchors, values, pt, default)),
            _ => None,
        }
    }

    /// Minimum and maximum corners of the indexed extent.
    pub fn bounds(&self) -> (Vector3, Vector3) {
        (
            Vector3::new(
                self.x_index.min_key(),
                self.y_index.min_key(),
                self.z_index.min_key(),
            ),
            Vector3::new(
                self.x_index.max_key(),
                self.y_index.max_key(),
                self.z_index.max_key(),
            ),
        )
    }
}

fn anchor_value(anchor: &InterpolationPoint3D, values: &[f64], default: f64) -> f64 {
    anchor.index.map_or(default, |i| values[i])
}

/// Linear blend between two anchors, weighted by the query's distance
/// along the segment. The anchors must not be coincident.
fn linear_interpolate(
    a: &InterpolationPoint3D,
    b: &InterpolationPoint3D,
    values: &[f64],
    pos: &Vector3,
    default: f64,
) -> f64 {
    let t = pos.distance(&b.position) / a.position.distance(&b.position);
    (1.0 - t) * anchor_value(b, values, default) + t * anchor_value(a, values, default)
}

fn linear_blend(pos1: &Vector3, val1: f64, pos2: &Vector3, val2: f64, pos: &Vector3) -> f64 {
    let t = pos.distance(pos2) / pos1.distance(pos2);
    (1.0 - t) * val2 + t * val1
}

/// Bilinear blend over four coplanar anchors forming a rectangular
/// patch; consecutive anchor pairs must lie on the same edge.
fn bilinear_interpolate(
    anchors: &[InterpolationPoint3D],
    start: usize,
    values: &[f64],
    pos: &Vector3,
    default: f64,
) -> f64 {
    let n0 = &anchors[start];
    let n1 = &anchors[start + 1];
    let edge = (n1.position - n0.position).normalized();

    // project the query onto both edges, interpolate along each, then
    // blend the two edge results
    let pos1 = edge * (*pos - n0.position).dot(&edge) + n0.position;
    let val1 = linear_interpolate(n0, n1, values, &pos1, default);

    let n2 = &anchors[start + 2];
    let n3 = &anchors[start + 3];
    let pos2 = edge * (*pos - n2.position).dot(&edge) + n2.position;
    let val2 = linear_interpolate(n2, n3, values, &pos2, default);

    linear_blend(&pos1, val1, &pos2, val2, pos)
}

fn project_point_to_plane(anchors: &[InterpolationPoint3D], start: usize, pos: &Vector3) -> Vector3 {
    let n = (anchors[start + 1].position - anchors[start].position)
        .cross(&(anchors[start + 2].position - anchors[start].position));
    *pos - n.normalized() * n.dot(&(*pos - anchors[start].position))
}

/// Trilinear blend over eight anchors forming a rectangular prism; the
/// first and last four anchors each form a plane.
fn trilinear_interpolate(
    anchors: &[InterpolationPoint3D],
    values: &[f64],
    pos: &Vector3,
    default: f64,
) -> f64 {
    let pos1 = project_point_to_plane(anchors, 0, pos);
    let val1 = bilinear_interpolate(anchors, 0, values, &pos1, default);

    let pos2 = project_point_to_plane(anchors, 4, pos);
    let val2 = bilinear_interpolate(anchors, 4, values, &pos2, default);

    linear_blend(&pos1, val1, &pos2, val2, pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_cube() -> Vec<Vector3> {
        let mut cloud = Vec::new();
        for x in 0..2 {
            for y in 0..2 {
                for z in 0..2 {
                    cloud.push(Vector3::new(x as f64, y as f64, z as f64));
                }
            }
        }
        cloud
    }

    #[test]
    fn test_axis_index() {
        let mut axis = AxisIndex::default();
        axis.add_index_if_not_found(0.0);
        axis.add_index_if_not_found(10.0);
        axis.add_index_if_not_found(5.0);
        axis.add_index_if_not_found(10.0);

        assert_eq!(axis.num_unique_indices(), 3);
        assert_eq!(axis.index(10.0), Some(1));
        assert_eq!(axis.index(5.0), Some(2));
        assert_eq!(axis.index(7.0), None);
        assert_eq!(axis.min_key(), 0.0);
        assert_eq!(axis.max_key(), 10.0);

        // exact hit
        let exact = axis.interpolators(5.0, 1e-6);
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].index, 2);

        // interior bracketing pair
        let pair = axis.interpolators(7.0, 1e-6);
        assert_eq!(pair.len(), 2);
        assert_eq!(pair[0].position, 5.0);
        assert_eq!(pair[1].position, 10.0);

        // outside the range
        assert!(axis.interpolators(-1.0, 1e-6).is_empty());
        assert!(axis.interpolators(11.0, 1e-6).is_empty());
    }

    #[test]
    fn test_interpolator_counts() {
        let field = VolumetricGridLookupField::new(&unit_cube());

        assert_eq!(field.interpolators(&Vector3::new(0.5, 0.5, 0.5)).len(), 8);
        assert_eq!(field.interpolators(&Vector3::new(0.5, 0.5, 0.0)).len(), 4);
        assert_eq!(field.interpolators(&Vector3::new(0.5, 0.0, 0.0)).len(), 2);
        assert_eq!(field.interpolators(&Vector3::new(0.0, 0.0, 0.0)).len(), 1);
        assert_eq!(field.interpolators(&Vector3::new(-0.5, -0.5, -0.5)).len(), 0);
    }

    #[test]
    fn test_exact_lookup_on_irregular_grid() {
        let mut cloud = Vec::new();
        for x in 0..10 {
            for y in 0..6 {
                for z in 0..4 {
                    cloud.push(Vector3::new(x as f64, y as f64 * 5.0, z as f64 * 10.0));
                }
            }
        }
        let field = VolumetricGridLookupField::new(&cloud);
        for (i, pt) in cloud.iter().enumerate() {
            let anchors = field.interpolators(pt);
            assert_eq!(anchors.len(), 1);
            assert_eq!(anchors[0].index, Some(i));
        }
    }

    #[test]
    fn test_trilinear_estimate() {
        let cloud = unit_cube();
        let field = VolumetricGridLookupField::new(&cloud);
        // value = z at each corner
        let values: Vec<f64> = cloud.iter().map(|p| p.z).collect();

        let center = field
            .estimate_value_using_trilinear(&Vector3::new(0.5, 0.5, 0.5), &values, 0.0)
            .unwrap();
        assert_relative_eq!(center, 0.5, epsilon = 1e-9);

        let quarter = field
            .estimate_value_using_trilinear(&Vector3::new(0.5, 0.5, 0.25), &values, 0.0)
            .unwrap();
        assert_relative_eq!(quarter, 0.25, epsilon = 1e-9);

        // corner hit returns the stored value
        let corner = field
            .estimate_value_using_trilinear(&Vector3::new(1.0, 1.0, 1.0), &values, 0.0)
            .unwrap();
        assert_relative_eq!(corner, 1.0, epsilon = 1e-9);

        // outside the extent
        assert!(field
            .estimate_value_using_trilinear(&Vector3::new(2.0, 0.5, 0.5), &values, 0.0)
            .is_none());
    }

    #[test]
    fn test_edge_and_face_estimates() {
        let cloud = unit_cube();
        let field = VolumetricGridLookupField::new(&cloud);
        let values: Vec<f64> = cloud.iter().map(|p| p.x + p.y).collect();

        // along an edge (y = z = 0): value = x
        let edge = field
            .estimate_value_using_trilinear(&Vector3::new(0.25, 0.0, 0.0), &values, 0.0)
            .unwrap();
        assert_relative_eq!(edge, 0.25, epsilon = 1e-9);

        // on a face (z = 0): value = x + y
        let face = field
            .estimate_value_using_trilinear(&Vector3::new(0.25, 0.75, 0.0), &values, 0.0)
            .unwrap();
        assert_relative_eq!(face, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sparse_grid_uses_default() {
        // seven corners of the cube; (1, 1, 1) is missing
        let mut cloud = unit_cube();
        cloud.pop();
        let field = VolumetricGridLookupField::new(&cloud);

        let anchors = field.interpolators(&Vector3::new(0.5, 0.5, 0.5));
        assert_eq!(anchors.len(), 8);
        assert_eq!(anchors.iter().filter(|a| a.index.is_none()).count(), 1);

        let values = vec![2.0; cloud.len()];
        // a constant field stays constant when the default matches
        let est = field
            .estimate_value_using_trilinear(&Vector3::new(0.5, 0.5, 0.5), &values, 2.0)
            .unwrap();
        assert_relative_eq!(est, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_with_indices() {
        let cloud = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)];
        let field = VolumetricGridLookupField::with_indices(&cloud, &[5, 9]);
        let anchors = field.interpolators(&Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].index, Some(9));
    }

    #[test]
    fn test_bounds() {
        let field = VolumetricGridLookupField::new(&[
            Vector3::new(-1.0, 0.0, 3.0),
            Vector3::new(4.0, 2.0, -7.0),
        ]);
        let (min, max) = field.bounds();
        assert_eq!(min, Vector3::new(-1.0, 0.0, -7.0));
        assert_eq!(max, Vector3::new(4.0, 2.0, 3.0));
    }
}
