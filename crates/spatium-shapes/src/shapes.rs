use std::f64::consts::PI;

use spatium_math::{equal, Quaternion, Vector3};

use crate::{MassMatrix3, Material};

/// An axis-aligned box described by its size along each axis.
///
/// ```
/// use spatium_math::Vector3;
/// use spatium_shapes::Box3;
///
/// let b = Box3::new(Vector3::new(1.0, 2.0, 3.0));
/// assert_eq!(b.volume(), 6.0);
/// ```
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Box3 {
    size: Vector3,
    material: Material,
}

impl Box3 {
    /// Create a box with the given size and the default material.
    pub fn new(size: Vector3) -> Self {
        Self {
            size,
            material: Material::default(),
        }
    }

    /// Create a box with the given size and material.
    pub fn with_material(size: Vector3, material: Material) -> Self {
        Self { size, material }
    }

    /// The size along each axis.
    pub fn size(&self) -> Vector3 {
        self.size
    }

    /// Set the size along each axis.
    pub fn set_size(&mut self, size: Vector3) {
        self.size = size;
    }

    /// The material.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Set the material.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Volume of the box.
    pub fn volume(&self) -> f64 {
        self.size.x * self.size.y * self.size.z
    }

    /// Density a body of the given mass would have with this box's volume,
    /// or -1.0 when the mass or any size component is non-positive.
    pub fn density_from_mass(&self, mass: f64) -> f64 {
        if self.size.min() <= 0.0 || mass <= 0.0 {
            return -1.0;
        }
        mass / self.volume()
    }

    /// Update the material density so the box has the given mass. Returns
    /// false when the density cannot be computed.
    pub fn set_density_from_mass(&mut self, mass: f64) -> bool {
        let density = self.density_from_mass(mass);
        if density > 0.0 {
            self.material.set_density(density);
        }
        density > 0.0
    }

    /// Mass matrix for this box with its material density, or None when
    /// the parameters do not describe a valid body.
    pub fn mass_matrix(&self) -> Option<MassMatrix3> {
        let mut m = MassMatrix3::default();
        m.set_from_box_material(&self.material, &self.size, &Quaternion::IDENTITY)
            .then_some(m)
    }
}

impl PartialEq for Box3 {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.material == other.material
    }
}

/// A sphere described by its radius.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Sphere {
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a sphere with the given radius and the default material.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            material: Material::default(),
        }
    }

    /// Create a sphere with the given radius and material.
    pub fn with_material(radius: f64, material: Material) -> Self {
        Self { radius, material }
    }

    /// The radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Set the radius.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    /// The material.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Set the material.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Volume of the sphere.
    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius.powi(3)
    }

    /// Density a body of the given mass would have with this sphere's
    /// volume, or -1.0 when the mass or radius is non-positive.
    pub fn density_from_mass(&self, mass: f64) -> f64 {
        if self.radius <= 0.0 || mass <= 0.0 {
            return -1.0;
        }
        mass / self.volume()
    }

    /// Update the material density so the sphere has the given mass.
    /// Returns false when the density cannot be computed.
    pub fn set_density_from_mass(&mut self, mass: f64) -> bool {
        let density = self.density_from_mass(mass);
        if density > 0.0 {
            self.material.set_density(density);
        }
        density > 0.0
    }

    /// Mass matrix for this sphere with its material density, or None when
    /// the parameters do not describe a valid body.
    pub fn mass_matrix(&self) -> Option<MassMatrix3> {
        let mut m = MassMatrix3::default();
        m.set_from_sphere_material(&self.material, self.radius)
            .then_some(m)
    }
}

impl PartialEq for Sphere {
    fn eq(&self, other: &Self) -> bool {
        equal(self.radius, other.radius, 1e-6) && self.material == other.material
    }
}

/// A cylinder aligned with the Z axis, with an optional rotational offset.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Cylinder {
    radius: f64,
    length: f64,
    rot_offset: Quaternion,
    material: Material,
}

impl Cylinder {
    /// Create a cylinder with the given length and radius, no rotational
    /// offset and the default material.
    pub fn new(length: f64, radius: f64) -> Self {
        Self {
            radius,
            length,
            rot_offset: Quaternion::IDENTITY,
            material: Material::default(),
        }
    }

    /// Create a cylinder with a rotational offset from the Z axis.
    pub fn with_rotation(length: f64, radius: f64, rot_offset: Quaternion) -> Self {
        Self {
            radius,
            length,
            rot_offset,
            material: Material::default(),
        }
    }

    /// The radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Set the radius.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    /// The length along the Z axis.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Set the length along the Z axis.
    pub fn set_length(&mut self, length: f64) {
        self.length = length;
    }

    /// The rotational offset.
    pub fn rotational_offset(&self) -> Quaternion {
        self.rot_offset
    }

    /// Set the rotational offset.
    pub fn set_rotational_offset(&mut self, rot_offset: Quaternion) {
        self.rot_offset = rot_offset;
    }

    /// The material.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Set the material.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Volume of the cylinder.
    pub fn volume(&self) -> f64 {
        PI * self.radius * self.radius * self.length
    }

    /// Density a body of the given mass would have with this cylinder's
    /// volume, or -1.0 when any parameter is non-positive.
    pub fn density_from_mass(&self, mass: f64) -> f64 {
        if self.radius <= 0.0 || self.length <= 0.0 || mass <= 0.0 {
            return -1.0;
        }
        mass / self.volume()
    }

    /// Update the material density so the cylinder has the given mass.
    /// Returns false when the density cannot be computed.
    pub fn set_density_from_mass(&mut self, mass: f64) -> bool {
        let density = self.density_from_mass(mass);
        if density > 0.0 {
            self.material.set_density(density);
        }
        density > 0.0
    }

    /// Mass matrix for this cylinder with its material density, or None
    /// when the parameters do not describe a valid body.
    pub fn mass_matrix(&self) -> Option<MassMatrix3> {
        let mut m = MassMatrix3::default();
        m.set_from_cylinder_z_material(&self.material, self.length, self.radius, &self.rot_offset)
            .then_some(m)
    }
}

impl PartialEq for Cylinder {
    fn eq(&self, other: &Self) -> bool {
        equal(self.radius, other.radius, 1e-6)
            && equal(self.length, other.length, 1e-6)
            && self.material == other.material
    }
}

/// A cone aligned with the Z axis, apex up, with an optional rotational
/// offset.
///
/// The volume is computed as pi * r^2 * L, without the 1/3 factor of the
/// geometric cone volume, and density and mass calculations follow suit.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Cone {
    radius: f64,
    length: f64,
    rot_offset: Quaternion,
    material: Material,
}

impl Cone {
    /// Create a cone with the given length and radius, no rotational offset
    /// and the default material.
    pub fn new(length: f64, radius: f64) -> Self {
        Self {
            radius,
            length,
            rot_offset: Quaternion::IDENTITY,
            material: Material::default(),
        }
    }

    /// Create a cone with a rotational offset from the Z axis.
    pub fn with_rotation(length: f64, radius: f64, rot_offset: Quaternion) -> Self {
        Self {
            radius,
            length,
            rot_offset,
            material: Material::default(),
        }
    }

    /// The radius of the base.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Set the radius of the base.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    /// The length along the Z axis.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Set the length along the Z axis.
    pub fn set_length(&mut self, length: f64) {
        self.length = length;
    }

    /// The rotational offset.
    pub fn rotational_offset(&self) -> Quaternion {
        self.rot_offset
    }

    /// Set the rotational offset.
    pub fn set_rotational_offset(&mut self, rot_offset: Quaternion) {
        self.rot_offset = rot_offset;
    }

    /// The material.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Set the material.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Volume of the cone, computed as pi * r^2 * L.
    pub fn volume(&self) -> f64 {
        PI * self.radius * self.radius * self.length
    }

    /// Density a body of the given mass would have with this cone's volume,
    /// or -1.0 when any parameter is non-positive.
    pub fn density_from_mass(&self, mass: f64) -> f64 {
        if self.radius <= 0.0 || self.length <= 0.0 || mass <= 0.0 {
            return -1.0;
        }
        mass / self.volume()
    }

    /// Update the material density so the cone has the given mass. Returns
    /// false when the density cannot be computed.
    pub fn set_density_from_mass(&mut self, mass: f64) -> bool {
        let density = self.density_from_mass(mass);
        if density > 0.0 {
            self.material.set_density(density);
        }
        density > 0.0
    }

    /// Mass matrix for this cone with its material density, or None when
    /// the parameters do not describe a valid body.
    pub fn mass_matrix(&self) -> Option<MassMatrix3> {
        let mut m = MassMatrix3::default();
        m.set_from_cone_z_material(&self.material, self.length, self.radius, &self.rot_offset)
            .then_some(m)
    }
}

impl PartialEq for Cone {
    fn eq(&self, other: &Self) -> bool {
        equal(self.radius, other.radius, 1e-6)
            && equal(self.length, other.length, 1e-6)
            && self.material == other.material
    }
}

/// A capsule aligned with the Z axis, a cylinder of the given length capped
/// by two hemispheres.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Capsule {
    radius: f64,
    length: f64,
    material: Material,
}

impl Capsule {
    /// Create a capsule with the given cylinder length and radius and the
    /// default material.
    pub fn new(length: f64, radius: f64) -> Self {
        Self {
            radius,
            length,
            material: Material::default(),
        }
    }

    /// Create a capsule with the given dimensions and material.
    pub fn with_material(length: f64, radius: f64, material: Material) -> Self {
        Self {
            radius,
            length,
            material,
        }
    }

    /// The radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Set the radius.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    /// The length of the cylindrical section.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Set the length of the cylindrical section.
    pub fn set_length(&mut self, length: f64) {
        self.length = length;
    }

    /// The material.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Set the material.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Volume of the capsule, the cylinder plus the two hemispherical caps.
    pub fn volume(&self) -> f64 {
        PI * self.radius * self.radius * (self.length + 4.0 / 3.0 * self.radius)
    }

    /// Density a body of the given mass would have with this capsule's
    /// volume, or -1.0 when any parameter is non-positive.
    pub fn density_from_mass(&self, mass: f64) -> f64 {
        if self.radius <= 0.0 || self.length <= 0.0 || mass <= 0.0 {
            return -1.0;
        }
        mass / self.volume()
    }

    /// Update the material density so the capsule has the given mass.
    /// Returns false when the density cannot be computed.
    pub fn set_density_from_mass(&mut self, mass: f64) -> bool {
        let density = self.density_from_mass(mass);
        if density > 0.0 {
            self.material.set_density(density);
        }
        density > 0.0
    }

    /// Mass matrix for this capsule with its material density, or None when
    /// the parameters do not describe a valid body.
    pub fn mass_matrix(&self) -> Option<MassMatrix3> {
        let mut m = MassMatrix3::default();
        m.set_from_capsule_z_material(
            &self.material,
            self.length,
            self.radius,
            &Quaternion::IDENTITY,
        )
        .then_some(m)
    }
}

impl PartialEq for Capsule {
    fn eq(&self, other: &Self) -> bool {
        equal(self.radius, other.radius, 1e-6)
            && equal(self.length, other.length, 1e-6)
            && self.material == other.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MaterialType;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_volume_and_density() {
        let mut b = Box3::new(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(b.volume(), 6.0);
        assert_relative_eq!(b.density_from_mass(12.0), 2.0);
        assert_eq!(b.density_from_mass(0.0), -1.0);

        assert!(b.set_density_from_mass(24.0));
        assert_relative_eq!(b.material().density(), 4.0);
        assert!(!b.set_density_from_mass(-1.0));

        let degenerate = Box3::new(Vector3::new(1.0, 0.0, 1.0));
        assert_eq!(degenerate.density_from_mass(1.0), -1.0);
        assert!(degenerate.mass_matrix().is_none());
    }

    #[test]
    fn test_box_mass_matrix() {
        let b = Box3::with_material(Vector3::new(1.0, 2.0, 3.0), Material::from_density(2.0));
        let m = b.mass_matrix().unwrap();
        assert_relative_eq!(m.mass(), 12.0);
        assert_relative_eq!(m.ixx(), 13.0);
        assert_relative_eq!(m.izz(), 5.0);
    }

    #[test]
    fn test_sphere() {
        let mut s = Sphere::new(2.0);
        assert_relative_eq!(s.volume(), 4.0 / 3.0 * PI * 8.0);
        assert!(s.set_density_from_mass(s.volume()));
        assert_relative_eq!(s.material().density(), 1.0);

        let m = s.mass_matrix().unwrap();
        assert_relative_eq!(m.mass(), s.volume());
        assert_relative_eq!(m.ixx(), 0.4 * s.volume() * 4.0);

        assert!(Sphere::new(0.0).mass_matrix().is_none());
    }

    #[test]
    fn test_cylinder() {
        let mut c = Cylinder::new(3.0, 1.0);
        assert_relative_eq!(c.volume(), 3.0 * PI);
        assert_relative_eq!(c.density_from_mass(3.0 * PI), 1.0);

        assert!(c.set_density_from_mass(4.0 * c.volume()));
        let m = c.mass_matrix().unwrap();
        assert_relative_eq!(m.mass(), 12.0 * PI);
        assert_relative_eq!(m.izz(), 6.0 * PI);

        assert!(Cylinder::new(3.0, -1.0).mass_matrix().is_none());
    }

    #[test]
    fn test_cone_volume_has_no_third() {
        let c = Cone::new(2.0, 1.0);
        assert_relative_eq!(c.volume(), 2.0 * PI);
        assert_relative_eq!(c.density_from_mass(2.0 * PI), 1.0);
    }

    #[test]
    fn test_cone_mass_matrix() {
        let mut c = Cone::new(4.0, 1.0);
        assert!(c.set_density_from_mass(20.0));
        let m = c.mass_matrix().unwrap();
        assert_relative_eq!(m.mass(), 20.0);
        assert_relative_eq!(m.izz(), 6.0);
        assert!(Cone::new(4.0, 0.0).mass_matrix().is_none());
    }

    #[test]
    fn test_capsule() {
        let mut c = Capsule::new(1.0, 0.75);
        assert_relative_eq!(c.volume(), PI * 0.5625 * 2.0);
        assert!(c.set_density_from_mass(2.0));
        let m = c.mass_matrix().unwrap();
        assert_relative_eq!(m.mass(), 2.0, epsilon = 1e-12);
        assert!(m.is_valid());

        assert!(Capsule::new(0.0, 0.75).mass_matrix().is_none());
    }

    #[test]
    fn test_equality_tolerant() {
        let a = Cylinder::new(3.0, 1.0);
        let b = Cylinder::new(3.0 + 1e-8, 1.0 - 1e-8);
        assert_eq!(a, b);
        let c = Cylinder::new(3.1, 1.0);
        assert_ne!(a, c);

        let mut d = Cylinder::new(3.0, 1.0);
        d.set_material(Material::from_type(MaterialType::Wood));
        assert_ne!(a, d);
    }
}
