use std::collections::HashMap;
use std::sync::OnceLock;

use spatium_math::equal;

/// Predefined material kinds with known densities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum MaterialType {
    /// Styrofoam, density = 75.0 kg/m^3.
    Styrofoam,
    /// Pine, density = 373.0 kg/m^3.
    Pine,
    /// Wood, density = 700.0 kg/m^3.
    Wood,
    /// Oak, density = 710.0 kg/m^3.
    Oak,
    /// Plastic, density = 1175.0 kg/m^3.
    Plastic,
    /// Concrete, density = 2000.0 kg/m^3.
    Concrete,
    /// Aluminum, density = 2700.0 kg/m^3.
    Aluminum,
    /// Steel alloy, density = 7600.0 kg/m^3.
    SteelAlloy,
    /// Stainless steel, density = 7800.0 kg/m^3.
    SteelStainless,
    /// Iron, density = 7870.0 kg/m^3.
    Iron,
    /// Brass, density = 8600.0 kg/m^3.
    Brass,
    /// Copper, density = 8940.0 kg/m^3.
    Copper,
    /// Tungsten, density = 19300.0 kg/m^3.
    Tungsten,
    /// No known material.
    #[default]
    Unknown,
}

const MATERIAL_DATA: &[(MaterialType, &str, f64)] = &[
    (MaterialType::Styrofoam, "styrofoam", 75.0),
    (MaterialType::Pine, "pine", 373.0),
    (MaterialType::Wood, "wood", 700.0),
    (MaterialType::Oak, "oak", 710.0),
    (MaterialType::Plastic, "plastic", 1175.0),
    (MaterialType::Concrete, "concrete", 2000.0),
    (MaterialType::Aluminum, "aluminum", 2700.0),
    (MaterialType::SteelAlloy, "steel_alloy", 7600.0),
    (MaterialType::SteelStainless, "steel_stainless", 7800.0),
    (MaterialType::Iron, "iron", 7870.0),
    (MaterialType::Brass, "brass", 8600.0),
    (MaterialType::Copper, "copper", 8940.0),
    (MaterialType::Tungsten, "tungsten", 19300.0),
];

/// A physical material with a name and a density.
///
/// Unknown materials carry a density of -1.0.
///
/// ```
/// use spatium_shapes::{Material, MaterialType};
///
/// let aluminum = Material::from_type(MaterialType::Aluminum);
/// assert_eq!(aluminum.density(), 2700.0);
/// assert_eq!(aluminum.name(), "aluminum");
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Material {
    material_type: MaterialType,
    name: String,
    density: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            material_type: MaterialType::Unknown,
            name: String::new(),
            density: -1.0,
        }
    }
}

impl Material {
    /// Create a material from a predefined type. An unknown type yields the
    /// default material.
    pub fn from_type(material_type: MaterialType) -> Self {
        MATERIAL_DATA
            .iter()
            .find(|(t, _, _)| *t == material_type)
            .map(|&(t, name, density)| Self {
                material_type: t,
                name: name.to_owned(),
                density,
            })
            .unwrap_or_default()
    }

    /// Create a material by name. The lookup is case insensitive; an
    /// unrecognized name yields the default material.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        MATERIAL_DATA
            .iter()
            .find(|(_, n, _)| *n == lower)
            .map(|&(t, n, density)| Self {
                material_type: t,
                name: n.to_owned(),
                density,
            })
            .unwrap_or_default()
    }

    /// Create an unnamed material with the given density.
    pub fn from_density(density: f64) -> Self {
        Self {
            density,
            ..Self::default()
        }
    }

    /// The predefined materials keyed by type, built on first use.
    pub fn predefined() -> &'static HashMap<MaterialType, Material> {
        static MATERIALS: OnceLock<HashMap<MaterialType, Material>> = OnceLock::new();
        MATERIALS.get_or_init(|| {
            MATERIAL_DATA
                .iter()
                .map(|&(t, _, _)| (t, Material::from_type(t)))
                .collect()
        })
    }

    /// Replace this material with the predefined one whose density is
    /// nearest to the given value, if any lies within `epsilon`. Otherwise
    /// the material is left unchanged.
    pub fn set_to_nearest_density(&mut self, value: f64, epsilon: f64) {
        let mut min = f64::MAX;
        let mut nearest = None;
        for &(t, name, density) in MATERIAL_DATA {
            let diff = (density - value).abs();
            if diff < min && diff < epsilon {
                min = diff;
                nearest = Some((t, name, density));
            }
        }
        if let Some((t, name, density)) = nearest {
            self.material_type = t;
            self.name = name.to_owned();
            self.density = density;
        }
    }

    /// The material type.
    pub fn material_type(&self) -> MaterialType {
        self.material_type
    }

    /// Set the material type. The name and density are left unchanged.
    pub fn set_material_type(&mut self, material_type: MaterialType) {
        self.material_type = material_type;
    }

    /// The lowercase material name, empty for unnamed materials.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the material name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Density in kg/m^3, -1.0 when unknown.
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Set the density in kg/m^3.
    pub fn set_density(&mut self, density: f64) {
        self.density = density;
    }

    /// Equality on type and density within the given tolerance. The name is
    /// not compared.
    pub fn equal(&self, other: &Material, tol: f64) -> bool {
        self.material_type == other.material_type && equal(self.density, other.density, tol)
    }
}

impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other, 1e-6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let mat = Material::default();
        assert_eq!(mat.material_type(), MaterialType::Unknown);
        assert_eq!(mat.name(), "");
        assert_eq!(mat.density(), -1.0);
    }

    #[test]
    fn test_from_type() {
        let mat = Material::from_type(MaterialType::Tungsten);
        assert_eq!(mat.material_type(), MaterialType::Tungsten);
        assert_eq!(mat.name(), "tungsten");
        assert_eq!(mat.density(), 19300.0);

        let unknown = Material::from_type(MaterialType::Unknown);
        assert_eq!(unknown, Material::default());
    }

    #[test]
    fn test_from_name() {
        let mat = Material::from_name("Steel_Alloy");
        assert_eq!(mat.material_type(), MaterialType::SteelAlloy);
        assert_eq!(mat.density(), 7600.0);

        let bogus = Material::from_name("vibranium");
        assert_eq!(bogus.material_type(), MaterialType::Unknown);
        assert_eq!(bogus.density(), -1.0);
    }

    #[test]
    fn test_from_density() {
        let mat = Material::from_density(1234.0);
        assert_eq!(mat.material_type(), MaterialType::Unknown);
        assert_eq!(mat.density(), 1234.0);
    }

    #[test]
    fn test_predefined() {
        let materials = Material::predefined();
        assert_eq!(materials.len(), 13);
        assert_eq!(materials[&MaterialType::Pine].density(), 373.0);
        assert_eq!(materials[&MaterialType::Copper].name(), "copper");
    }

    #[test]
    fn test_nearest_density() {
        let mut mat = Material::default();
        mat.set_to_nearest_density(19300.0, f64::MAX);
        assert_eq!(mat.material_type(), MaterialType::Tungsten);

        let mut mat = Material::default();
        mat.set_to_nearest_density(7860.0, f64::MAX);
        assert_eq!(mat.material_type(), MaterialType::Iron);

        // No predefined material within the window.
        let mut mat = Material::default();
        mat.set_to_nearest_density(7860.0, 1.0);
        assert_eq!(mat.material_type(), MaterialType::Unknown);
    }

    #[test]
    fn test_equality() {
        let a = Material::from_type(MaterialType::Wood);
        let mut b = Material::from_type(MaterialType::Wood);
        assert_eq!(a, b);

        // The name is not part of equality.
        b.set_name("plank");
        assert_eq!(a, b);

        b.set_density(701.0);
        assert_ne!(a, b);
    }
}
