use std::f64::consts::PI;

use spatium_math::{Matrix3, Quaternion, Vector3};

use crate::Material;

/// Mass, center-of-mass-frame moments of inertia and products of inertia
/// of a rigid body.
///
/// The inertia matrix is stored as the diagonal moments (Ixx, Iyy, Izz) and
/// the off-diagonal products (Ixy, Ixz, Iyz). Setters report whether the
/// resulting matrix is physically valid, and the `set_from_*` family fills
/// in the inertia of common solids of uniform density.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MassMatrix3 {
    mass: f64,
    diagonal: Vector3,
    off_diagonal: Vector3,
}

impl Default for MassMatrix3 {
    fn default() -> Self {
        Self {
            mass: 0.0,
            diagonal: Vector3::ZERO,
            off_diagonal: Vector3::ZERO,
        }
    }
}

impl MassMatrix3 {
    /// Create a mass matrix from a mass, the diagonal moments
    /// (Ixx, Iyy, Izz) and the off-diagonal products (Ixy, Ixz, Iyz).
    pub fn new(mass: f64, diagonal: Vector3, off_diagonal: Vector3) -> Self {
        Self {
            mass,
            diagonal,
            off_diagonal,
        }
    }

    /// The mass.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Set the mass. Returns true if the resulting matrix is valid.
    pub fn set_mass(&mut self, mass: f64) -> bool {
        self.mass = mass;
        self.is_valid()
    }

    /// Diagonal moments of inertia (Ixx, Iyy, Izz).
    pub fn diagonal_moments(&self) -> Vector3 {
        self.diagonal
    }

    /// Off-diagonal products of inertia (Ixy, Ixz, Iyz).
    pub fn off_diagonal_moments(&self) -> Vector3 {
        self.off_diagonal
    }

    /// Set the diagonal moments. Returns true if the resulting matrix is
    /// valid.
    pub fn set_diagonal_moments(&mut self, moments: Vector3) -> bool {
        self.diagonal = moments;
        self.is_valid()
    }

    /// Set the off-diagonal products. Returns true if the resulting matrix
    /// is valid.
    pub fn set_off_diagonal_moments(&mut self, products: Vector3) -> bool {
        self.off_diagonal = products;
        self.is_valid()
    }

    /// Moment of inertia about the X axis.
    pub fn ixx(&self) -> f64 {
        self.diagonal.x
    }

    /// Moment of inertia about the Y axis.
    pub fn iyy(&self) -> f64 {
        self.diagonal.y
    }

    /// Moment of inertia about the Z axis.
    pub fn izz(&self) -> f64 {
        self.diagonal.z
    }

    /// XY product of inertia.
    pub fn ixy(&self) -> f64 {
        self.off_diagonal.x
    }

    /// XZ product of inertia.
    pub fn ixz(&self) -> f64 {
        self.off_diagonal.y
    }

    /// YZ product of inertia.
    pub fn iyz(&self) -> f64 {
        self.off_diagonal.z
    }

    /// The moment of inertia matrix.
    pub fn moi(&self) -> Matrix3 {
        Matrix3::new(
            self.diagonal.x,
            self.off_diagonal.x,
            self.off_diagonal.y,
            self.off_diagonal.x,
            self.diagonal.y,
            self.off_diagonal.z,
            self.off_diagonal.y,
            self.off_diagonal.z,
            self.diagonal.z,
        )
    }

    /// Set the moments and products from a matrix, symmetrizing it by
    /// averaging the off-diagonal pairs. Returns true if the resulting
    /// matrix is valid.
    pub fn set_moi(&mut self, moi: &Matrix3) -> bool {
        self.diagonal = Vector3::new(moi.get(0, 0), moi.get(1, 1), moi.get(2, 2));
        self.off_diagonal = Vector3::new(
            0.5 * (moi.get(0, 1) + moi.get(1, 0)),
            0.5 * (moi.get(0, 2) + moi.get(2, 0)),
            0.5 * (moi.get(1, 2) + moi.get(2, 1)),
        );
        self.is_valid()
    }

    /// Principal moments of inertia, the eigenvalues of the inertia matrix,
    /// sorted from smallest to largest. When the products of inertia are
    /// negligible the diagonal moments are returned directly.
    pub fn principal_moments(&self) -> Vector3 {
        let tol = 1e-6 * self.diagonal.max().abs();
        let p1 = self.off_diagonal.dot(&self.off_diagonal);
        if p1 <= tol * tol {
            let mut m = [self.diagonal.x, self.diagonal.y, self.diagonal.z];
            m.sort_by(f64::total_cmp);
            return Vector3::new(m[0], m[1], m[2]);
        }

        // Analytic eigenvalues of a real symmetric 3x3 matrix via the
        // trigonometric method.
        let q = (self.diagonal.x + self.diagonal.y + self.diagonal.z) / 3.0;
        let dx = self.diagonal.x - q;
        let dy = self.diagonal.y - q;
        let dz = self.diagonal.z - q;
        let p2 = dx * dx + dy * dy + dz * dz + 2.0 * p1;
        let p = (p2 / 6.0).sqrt();
        let b = (self.moi() - Matrix3::IDENTITY * q) * (1.0 / p);
        let r = (b.determinant() / 2.0).clamp(-1.0, 1.0);
        let phi = r.acos() / 3.0;

        let eig_max = q + 2.0 * p * phi.cos();
        let eig_min = q + 2.0 * p * (phi + 2.0 * PI / 3.0).cos();
        let eig_mid = 3.0 * q - eig_max - eig_min;
        Vector3::new(eig_min, eig_mid, eig_max)
    }

    /// Whether the given principal moments are non-negative and satisfy the
    /// triangle inequality, within a tolerance scaled by the largest
    /// possible moment of inertia.
    pub fn valid_moments(moments: &Vector3) -> bool {
        let max_possible_moi = 0.5 * (moments.x + moments.y + moments.z).abs();
        let epsilon = 10.0 * f64::EPSILON * max_possible_moi;

        moments.x + epsilon >= 0.0
            && moments.y + epsilon >= 0.0
            && moments.z + epsilon >= 0.0
            && moments.x + moments.y + epsilon >= moments.z
            && moments.y + moments.z + epsilon >= moments.x
            && moments.z + moments.x + epsilon >= moments.y
    }

    /// Whether the mass is positive and the principal moments are valid.
    pub fn is_valid(&self) -> bool {
        self.mass > 0.0 && Self::valid_moments(&self.principal_moments())
    }

    /// Set the inertia of a uniform box of the given mass and size, rotated
    /// by `rot` relative to the body frame. Returns false when the mass or
    /// any size component is non-positive or the rotation is the zero
    /// quaternion.
    pub fn set_from_box(&mut self, mass: f64, size: &Vector3, rot: &Quaternion) -> bool {
        if mass <= 0.0 || size.min() <= 0.0 || *rot == Quaternion::ZERO {
            return false;
        }
        self.mass = mass;
        self.set_from_box_with_current_mass(size, rot)
    }

    /// Set the inertia of a uniform box made of the given material.
    pub fn set_from_box_material(
        &mut self,
        material: &Material,
        size: &Vector3,
        rot: &Quaternion,
    ) -> bool {
        if material.density() <= 0.0 {
            return false;
        }
        let volume = size.x * size.y * size.z;
        self.set_from_box(material.density() * volume, size, rot)
    }

    fn set_from_box_with_current_mass(&mut self, size: &Vector3, rot: &Quaternion) -> bool {
        if self.mass <= 0.0 || size.min() <= 0.0 || *rot == Quaternion::ZERO {
            return false;
        }
        let x2 = size.x * size.x;
        let y2 = size.y * size.y;
        let z2 = size.z * size.z;
        let l = Matrix3::new(
            self.mass / 12.0 * (y2 + z2),
            0.0,
            0.0,
            0.0,
            self.mass / 12.0 * (z2 + x2),
            0.0,
            0.0,
            0.0,
            self.mass / 12.0 * (x2 + y2),
        );
        self.rotate_and_set(&l, rot)
    }

    /// Set the inertia of a uniform cylinder aligned with the Z axis.
    /// Returns false on non-positive mass, length or radius, or a zero
    /// rotation quaternion.
    pub fn set_from_cylinder_z(
        &mut self,
        mass: f64,
        length: f64,
        radius: f64,
        rot: &Quaternion,
    ) -> bool {
        if mass <= 0.0 || length <= 0.0 || radius <= 0.0 || *rot == Quaternion::ZERO {
            return false;
        }
        self.mass = mass;
        let r2 = radius * radius;
        let ortho = self.mass / 12.0 * (3.0 * r2 + length * length);
        let l = Matrix3::new(
            ortho,
            0.0,
            0.0,
            0.0,
            ortho,
            0.0,
            0.0,
            0.0,
            self.mass / 2.0 * r2,
        );
        self.rotate_and_set(&l, rot)
    }

    /// Set the inertia of a uniform cylinder made of the given material.
    pub fn set_from_cylinder_z_material(
        &mut self,
        material: &Material,
        length: f64,
        radius: f64,
        rot: &Quaternion,
    ) -> bool {
        if material.density() <= 0.0 || length <= 0.0 || radius <= 0.0 {
            return false;
        }
        let volume = PI * radius * radius * length;
        self.set_from_cylinder_z(material.density() * volume, length, radius, rot)
    }

    /// Set the inertia of a uniform sphere. Returns false on non-positive
    /// mass or radius.
    pub fn set_from_sphere(&mut self, mass: f64, radius: f64) -> bool {
        if mass <= 0.0 || radius <= 0.0 {
            return false;
        }
        self.mass = mass;
        let moment = 0.4 * self.mass * radius * radius;
        self.diagonal = Vector3::new(moment, moment, moment);
        self.off_diagonal = Vector3::ZERO;
        self.is_valid()
    }

    /// Set the inertia of a uniform sphere made of the given material.
    pub fn set_from_sphere_material(&mut self, material: &Material, radius: f64) -> bool {
        if material.density() <= 0.0 || radius <= 0.0 {
            return false;
        }
        let volume = 4.0 / 3.0 * PI * radius.powi(3);
        self.set_from_sphere(material.density() * volume, radius)
    }

    /// Set the inertia of a uniform cone aligned with the Z axis, its apex
    /// pointing up and the moments taken about its center of mass. Returns
    /// false on non-positive parameters or a zero rotation quaternion.
    pub fn set_from_cone_z(
        &mut self,
        mass: f64,
        length: f64,
        radius: f64,
        rot: &Quaternion,
    ) -> bool {
        if mass <= 0.0 || length <= 0.0 || radius <= 0.0 || *rot == Quaternion::ZERO {
            return false;
        }
        self.mass = mass;
        let r2 = radius * radius;
        let ortho = self.mass * (3.0 / 20.0 * r2 + 3.0 / 80.0 * length * length);
        let l = Matrix3::new(
            ortho,
            0.0,
            0.0,
            0.0,
            ortho,
            0.0,
            0.0,
            0.0,
            3.0 / 10.0 * self.mass * r2,
        );
        self.rotate_and_set(&l, rot)
    }

    /// Set the inertia of a uniform cone made of the given material.
    pub fn set_from_cone_z_material(
        &mut self,
        material: &Material,
        length: f64,
        radius: f64,
        rot: &Quaternion,
    ) -> bool {
        if material.density() <= 0.0 || length <= 0.0 || radius <= 0.0 {
            return false;
        }
        let volume = PI * radius * radius * length;
        self.set_from_cone_z(material.density() * volume, length, radius, rot)
    }

    /// Set the inertia of a uniform capsule aligned with the Z axis, where
    /// `length` is the length of the cylindrical section. The mass is split
    /// between the cylinder and the two hemispherical caps in proportion to
    /// their volumes. Returns false on non-positive parameters or a zero
    /// rotation quaternion.
    pub fn set_from_capsule_z(
        &mut self,
        mass: f64,
        length: f64,
        radius: f64,
        rot: &Quaternion,
    ) -> bool {
        if mass <= 0.0 || length <= 0.0 || radius <= 0.0 || *rot == Quaternion::ZERO {
            return false;
        }
        self.mass = mass;

        let cylinder_volume = PI * radius * radius * length;
        let sphere_volume = 4.0 / 3.0 * PI * radius.powi(3);
        let volume = cylinder_volume + sphere_volume;
        let cylinder_mass = mass * cylinder_volume / volume;
        let sphere_mass = mass * sphere_volume / volume;

        let r2 = radius * radius;
        let cylinder_on_axis = 0.5 * cylinder_mass * r2;
        let cylinder_off_axis = cylinder_mass * (3.0 * r2 + length * length) / 12.0;
        // Hemisphere moments shifted from the flat face by the parallel
        // axis theorem.
        let sphere_on_axis = 2.0 / 5.0 * sphere_mass * r2;
        let sphere_off_axis =
            sphere_on_axis + sphere_mass * (0.25 * length * length + 3.0 / 8.0 * length * radius);

        let ortho = cylinder_off_axis + sphere_off_axis;
        let l = Matrix3::new(
            ortho,
            0.0,
            0.0,
            0.0,
            ortho,
            0.0,
            0.0,
            0.0,
            cylinder_on_axis + sphere_on_axis,
        );
        self.rotate_and_set(&l, rot)
    }

    /// Set the inertia of a uniform capsule made of the given material.
    pub fn set_from_capsule_z_material(
        &mut self,
        material: &Material,
        length: f64,
        radius: f64,
        rot: &Quaternion,
    ) -> bool {
        if material.density() <= 0.0 || length <= 0.0 || radius <= 0.0 {
            return false;
        }
        let volume = PI * radius * radius * (length + 4.0 / 3.0 * radius);
        self.set_from_capsule_z(material.density() * volume, length, radius, rot)
    }

    fn rotate_and_set(&mut self, principal: &Matrix3, rot: &Quaternion) -> bool {
        let r = Matrix3::from_quaternion(rot);
        self.set_moi(&(r * *principal * r.transposed()))
    }

    /// Component-wise comparison of mass, moments and products within the
    /// given tolerance.
    pub fn equal(&self, other: &MassMatrix3, tol: f64) -> bool {
        spatium_math::equal(self.mass, other.mass, tol)
            && self.diagonal.equal(&other.diagonal, tol)
            && self.off_diagonal.equal(&other.off_diagonal, tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_invalid() {
        let m = MassMatrix3::default();
        assert_eq!(m.mass(), 0.0);
        assert!(!m.is_valid());
    }

    #[test]
    fn test_moi_round_trip() {
        let mut m = MassMatrix3::default();
        let moi = Matrix3::new(2.0, 0.1, 0.2, 0.1, 3.0, 0.3, 0.2, 0.3, 4.0);
        m.set_mass(1.0);
        assert!(m.set_moi(&moi));
        assert_eq!(m.moi(), moi);
        assert_eq!(m.ixx(), 2.0);
        assert_eq!(m.iyy(), 3.0);
        assert_eq!(m.izz(), 4.0);
        assert_eq!(m.ixy(), 0.1);
        assert_eq!(m.ixz(), 0.2);
        assert_eq!(m.iyz(), 0.3);
    }

    #[test]
    fn test_set_moi_symmetrizes() {
        let mut m = MassMatrix3::default();
        m.set_mass(1.0);
        let asymmetric = Matrix3::new(2.0, 0.0, 0.4, 0.2, 3.0, 0.0, 0.0, 0.4, 4.0);
        m.set_moi(&asymmetric);
        assert_relative_eq!(m.ixy(), 0.1);
        assert_relative_eq!(m.ixz(), 0.2);
        assert_relative_eq!(m.iyz(), 0.2);
    }

    #[test]
    fn test_principal_moments_diagonal() {
        let m = MassMatrix3::new(1.0, Vector3::new(3.0, 1.0, 2.0), Vector3::ZERO);
        assert_eq!(m.principal_moments(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_principal_moments_off_diagonal() {
        // Eigenvalues of [[2,1,0],[1,2,0],[0,0,2]] are 1, 2, 3.
        let m = MassMatrix3::new(
            1.0,
            Vector3::new(2.0, 2.0, 2.0),
            Vector3::new(1.0, 0.0, 0.0),
        );
        let moments = m.principal_moments();
        assert_relative_eq!(moments.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(moments.y, 2.0, epsilon = 1e-9);
        assert_relative_eq!(moments.z, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_validity() {
        // Uniform sphere-like moments are valid.
        let m = MassMatrix3::new(1.0, Vector3::new(0.4, 0.4, 0.4), Vector3::ZERO);
        assert!(m.is_valid());

        // Triangle inequality violated.
        let m = MassMatrix3::new(1.0, Vector3::new(1.0, 1.0, 3.0), Vector3::ZERO);
        assert!(!m.is_valid());

        // Negative moment.
        let m = MassMatrix3::new(1.0, Vector3::new(-1.0, 1.0, 1.0), Vector3::ZERO);
        assert!(!m.is_valid());

        // Non-positive mass.
        let m = MassMatrix3::new(0.0, Vector3::new(0.4, 0.4, 0.4), Vector3::ZERO);
        assert!(!m.is_valid());
    }

    #[test]
    fn test_set_from_box() {
        let mut m = MassMatrix3::default();
        assert!(m.set_from_box(
            12.0,
            &Vector3::new(1.0, 2.0, 3.0),
            &Quaternion::IDENTITY
        ));
        assert_relative_eq!(m.ixx(), 13.0);
        assert_relative_eq!(m.iyy(), 10.0);
        assert_relative_eq!(m.izz(), 5.0);
        assert_eq!(m.off_diagonal_moments(), Vector3::ZERO);

        assert!(!m.set_from_box(
            0.0,
            &Vector3::new(1.0, 1.0, 1.0),
            &Quaternion::IDENTITY
        ));
        assert!(!m.set_from_box(
            1.0,
            &Vector3::new(1.0, 0.0, 1.0),
            &Quaternion::IDENTITY
        ));
        assert!(!m.set_from_box(1.0, &Vector3::new(1.0, 1.0, 1.0), &Quaternion::ZERO));
    }

    #[test]
    fn test_set_from_box_rotated() {
        // A cube has the same inertia under any rotation.
        let mut a = MassMatrix3::default();
        let mut b = MassMatrix3::default();
        let size = Vector3::new(2.0, 2.0, 2.0);
        let rot = Quaternion::from_euler(0.3, -0.4, 0.5);
        assert!(a.set_from_box(6.0, &size, &Quaternion::IDENTITY));
        assert!(b.set_from_box(6.0, &size, &rot));
        assert!(a.equal(&b, 1e-9));
    }

    #[test]
    fn test_set_from_box_material() {
        let mut m = MassMatrix3::default();
        let material = Material::from_density(2.0);
        assert!(m.set_from_box_material(
            &material,
            &Vector3::new(1.0, 2.0, 3.0),
            &Quaternion::IDENTITY
        ));
        assert_relative_eq!(m.mass(), 12.0);

        assert!(!m.set_from_box_material(
            &Material::default(),
            &Vector3::new(1.0, 1.0, 1.0),
            &Quaternion::IDENTITY
        ));
    }

    #[test]
    fn test_set_from_cylinder_z() {
        let mut m = MassMatrix3::default();
        assert!(m.set_from_cylinder_z(12.0, 3.0, 1.0, &Quaternion::IDENTITY));
        assert_relative_eq!(m.ixx(), 12.0);
        assert_relative_eq!(m.iyy(), 12.0);
        assert_relative_eq!(m.izz(), 6.0);

        assert!(!m.set_from_cylinder_z(12.0, 0.0, 1.0, &Quaternion::IDENTITY));
        assert!(!m.set_from_cylinder_z(12.0, 3.0, -1.0, &Quaternion::IDENTITY));
        assert!(!m.set_from_cylinder_z(12.0, 3.0, 1.0, &Quaternion::ZERO));
    }

    #[test]
    fn test_set_from_sphere() {
        let mut m = MassMatrix3::default();
        assert!(m.set_from_sphere(5.0, 2.0));
        assert_relative_eq!(m.ixx(), 8.0);
        assert_relative_eq!(m.iyy(), 8.0);
        assert_relative_eq!(m.izz(), 8.0);
        assert!(m.is_valid());

        assert!(!m.set_from_sphere(5.0, 0.0));
        assert!(!m.set_from_sphere(-5.0, 1.0));
    }

    #[test]
    fn test_set_from_cone_z() {
        let mut m = MassMatrix3::default();
        assert!(m.set_from_cone_z(20.0, 4.0, 1.0, &Quaternion::IDENTITY));
        assert_relative_eq!(m.ixx(), 20.0 * (3.0 / 20.0 + 3.0 / 80.0 * 16.0));
        assert_relative_eq!(m.izz(), 6.0);
        assert!(m.is_valid());

        assert!(!m.set_from_cone_z(20.0, 4.0, 1.0, &Quaternion::ZERO));
    }

    #[test]
    fn test_set_from_capsule_z() {
        let mut m = MassMatrix3::default();
        assert!(m.set_from_capsule_z(10.0, 2.0, 0.5, &Quaternion::IDENTITY));
        assert!(m.is_valid());
        // The flat moments dominate the axial one for a long capsule.
        assert!(m.ixx() > m.izz());
        assert_relative_eq!(m.ixx(), m.iyy());

        assert!(!m.set_from_capsule_z(10.0, 2.0, 0.5, &Quaternion::ZERO));
        assert!(!m.set_from_capsule_z(10.0, -2.0, 0.5, &Quaternion::IDENTITY));
    }

    #[test]
    fn test_capsule_mass_split() {
        // With equal cylinder and sphere volumes the masses split evenly.
        // radius chosen so that pi r^2 L == 4/3 pi r^3, i.e. L = 4r/3.
        let radius = 0.75;
        let length = 1.0;
        let mut m = MassMatrix3::default();
        assert!(m.set_from_capsule_z(2.0, length, radius, &Quaternion::IDENTITY));

        let r2 = radius * radius;
        let expected_zz = 0.5 * 1.0 * r2 + 0.4 * 1.0 * r2;
        assert_relative_eq!(m.izz(), expected_zz, epsilon = 1e-12);
    }
}
