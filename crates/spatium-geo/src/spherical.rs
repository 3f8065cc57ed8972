//! Geodetic coordinate transforms between planetary frames.
//!
//! Converts positions and velocities between the frames listed in
//! [`CoordinateType`], anchored at a configurable reference point on a
//! configurable reference ellipsoid.

use crate::coordinate_vector::CoordinateVector3;
use serde::{Deserialize, Serialize};
use spatium_math::{equal, Angle, Matrix3, Vector3};

/// Earth equatorial radius, the WGS84 semi-major axis, in meters.
pub const EARTH_WGS84_AXIS_EQUATORIAL: f64 = 6378137.0;

/// Earth polar radius, the WGS84 semi-minor axis, in meters.
pub const EARTH_WGS84_AXIS_POLAR: f64 = 6356752.314245;

/// WGS84 flattening parameter, unitless.
pub const EARTH_WGS84_FLATTENING: f64 = 1.0 / 298.257223563;

/// Mean radius of the Earth in meters, used for great-circle distances.
pub const EARTH_RADIUS: f64 = 6371000.0;

/// Equatorial radius of the Moon in meters.
pub const MOON_AXIS_EQUATORIAL: f64 = 1738100.0;

/// Polar radius of the Moon in meters.
pub const MOON_AXIS_POLAR: f64 = 1736000.0;

/// Flattening parameter of the Moon, unitless.
pub const MOON_FLATTENING: f64 = 0.0012;

/// Mean radius of the Moon in meters.
pub const MOON_RADIUS: f64 = 1737400.0;

/// Reference surface an instance is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceType {
    /// Earth, modeled as the WGS84 ellipsoid.
    EarthWgs84,
    /// Moon, using the Selenographic Coordinate System parameters.
    MoonScs,
    /// A user-supplied ellipsoid.
    Custom,
}

impl SurfaceType {
    /// Parse a surface type from its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "EARTH_WGS84" => Some(Self::EarthWgs84),
            "MOON_SCS" => Some(Self::MoonScs),
            "CUSTOM_SURFACE" => Some(Self::Custom),
            _ => None,
        }
    }

    /// The canonical name of this surface type.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EarthWgs84 => "EARTH_WGS84",
            Self::MoonScs => "MOON_SCS",
            Self::Custom => "CUSTOM_SURFACE",
        }
    }
}

/// Coordinate frames understood by the transform methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateType {
    /// Latitude, longitude and altitude on the reference surface.
    Spherical,
    /// Earth-centered, earth-fixed Cartesian frame.
    Ecef,
    /// East-North-Up tangent frame at the reference point, before the
    /// heading offset is applied.
    Global,
    /// Heading-rotated tangent frame. The raw-vector legacy transform
    /// keeps this frame's historical sign inversion; the
    /// [`CoordinateVector3`] API treats it as [`CoordinateType::Local2`].
    Local,
    /// Heading-rotated tangent frame with the corrected rotation.
    Local2,
}

/// Geodetic reference frame conversions on a configurable ellipsoid.
///
/// Holds a reference point (latitude, longitude, elevation, heading)
/// and the ellipsoid parameters, and converts positions and velocities
/// between the spherical, ECEF, global and local frames. Transform
/// caches are refreshed whenever a reference setter is called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphericalCoordinates {
    surface_type: SurfaceType,
    surface_radius: f64,
    latitude_reference: Angle,
    longitude_reference: Angle,
    elevation_reference: f64,
    heading_offset: Angle,
    ell_a: f64,
    ell_b: f64,
    ell_f: f64,
    ell_e: f64,
    ell_p: f64,
    rot_ecef_to_global: Matrix3,
    rot_global_to_ecef: Matrix3,
    origin_ecef: Vector3,
    cos_hea: f64,
    sin_hea: f64,
}

impl Default for SphericalCoordinates {
    fn default() -> Self {
        Self::new(SurfaceType::EarthWgs84)
    }
}

impl SphericalCoordinates {
    /// A frame on a built-in surface with a zero reference point.
    pub fn new(surface: SurfaceType) -> Self {
        let mut out = Self {
            surface_type: surface,
            surface_radius: 0.0,
            latitude_reference: Angle::ZERO,
            longitude_reference: Angle::ZERO,
            elevation_reference: 0.0,
            heading_offset: Angle::ZERO,
            ell_a: 0.0,
            ell_b: 0.0,
            ell_f: 0.0,
            ell_e: 0.0,
            ell_p: 0.0,
            rot_ecef_to_global: Matrix3::IDENTITY,
            rot_global_to_ecef: Matrix3::IDENTITY,
            origin_ecef: Vector3::ZERO,
            cos_hea: 1.0,
            sin_hea: 0.0,
        };
        out.set_surface(surface);
        out.update_transformation_matrices();
        out
    }

    /// A frame on a custom ellipsoid given by its semi-axes in meters.
    ///
    /// Invalid axes (non-positive, or polar longer than equatorial) are
    /// rejected with a warning and Earth WGS84 parameters are used
    /// instead.
    pub fn with_surface_axes(surface: SurfaceType, axis_equatorial: f64, axis_polar: f64) -> Self {
        let mut out = Self::new(SurfaceType::EarthWgs84);
        out.set_surface_axes(surface, axis_equatorial, axis_polar);
        out.update_transformation_matrices();
        out
    }

    /// A frame on a built-in surface anchored at a reference point.
    pub fn with_reference(
        surface: SurfaceType,
        latitude: Angle,
        longitude: Angle,
        elevation: f64,
        heading: Angle,
    ) -> Self {
        let mut out = Self::new(surface);
        out.latitude_reference = latitude;
        out.longitude_reference = longitude;
        out.elevation_reference = elevation;
        out.heading_offset = heading;
        out.update_transformation_matrices();
        out
    }

    /// The configured surface type.
    pub const fn surface(&self) -> SurfaceType {
        self.surface_type
    }

    /// Mean radius of the configured surface in meters.
    pub const fn surface_radius(&self) -> f64 {
        self.surface_radius
    }

    /// Equatorial semi-axis of the configured surface in meters.
    pub const fn surface_axis_equatorial(&self) -> f64 {
        self.ell_a
    }

    /// Polar semi-axis of the configured surface in meters.
    pub const fn surface_axis_polar(&self) -> f64 {
        self.ell_b
    }

    /// Flattening parameter of the configured surface.
    pub const fn surface_flattening(&self) -> f64 {
        self.ell_f
    }

    /// Reference latitude.
    pub const fn latitude_reference(&self) -> Angle {
        self.latitude_reference
    }

    /// Reference longitude.
    pub const fn longitude_reference(&self) -> Angle {
        self.longitude_reference
    }

    /// Reference elevation above sea level in meters.
    pub const fn elevation_reference(&self) -> f64 {
        self.elevation_reference
    }

    /// Heading offset, the angle from East to the local x-axis.
    pub const fn heading_offset(&self) -> Angle {
        self.heading_offset
    }

    /// Switch to a built-in surface, keeping the reference point.
    pub fn set_surface(&mut self, surface: SurfaceType) {
        self.surface_type = surface;
        match surface {
            SurfaceType::EarthWgs84 => {
                self.ell_a = EARTH_WGS84_AXIS_EQUATORIAL;
                self.ell_b = EARTH_WGS84_AXIS_POLAR;
                self.ell_f = EARTH_WGS84_FLATTENING;
                self.surface_radius = EARTH_RADIUS;
            }
            SurfaceType::MoonScs => {
                self.ell_a = MOON_AXIS_EQUATORIAL;
                self.ell_b = MOON_AXIS_POLAR;
                self.ell_f = MOON_FLATTENING;
                self.surface_radius = MOON_RADIUS;
            }
            SurfaceType::Custom => {
                log::error!("custom surfaces need explicit axes, use set_surface_axes");
                return;
            }
        }
        self.update_eccentricities();
    }

    /// Switch surfaces with explicit semi-axes in meters.
    ///
    /// The flattening becomes `(a - b) / a` and the surface radius the
    /// arithmetic mean `(2a + b) / 3`. Invalid axes fall back to Earth
    /// WGS84 parameters with a warning.
    pub fn set_surface_axes(
        &mut self,
        surface: SurfaceType,
        axis_equatorial: f64,
        axis_polar: f64,
    ) {
        self.surface_type = surface;

        if axis_equatorial > 0.0 && axis_polar > 0.0 && axis_polar <= axis_equatorial {
            self.ell_a = axis_equatorial;
            self.ell_b = axis_polar;
            self.ell_f = (axis_equatorial - axis_polar) / axis_equatorial;
            self.surface_radius = (2.0 * axis_equatorial + axis_polar) / 3.0;
        } else {
            log::warn!("invalid surface axes, falling back to Earth WGS84 parameters");
            self.ell_a = EARTH_WGS84_AXIS_EQUATORIAL;
            self.ell_b = EARTH_WGS84_AXIS_POLAR;
            self.ell_f = EARTH_WGS84_FLATTENING;
            self.surface_radius = EARTH_RADIUS;
        }
        self.update_eccentricities();
    }

    /// Set the reference latitude.
    pub fn set_latitude_reference(&mut self, latitude: Angle) {
        self.latitude_reference = latitude;
        self.update_transformation_matrices();
    }

    /// Set the reference longitude.
    pub fn set_longitude_reference(&mut self, longitude: Angle) {
        self.longitude_reference = longitude;
        self.update_transformation_matrices();
    }

    /// Set the reference elevation in meters.
    pub fn set_elevation_reference(&mut self, elevation: f64) {
        self.elevation_reference = elevation;
        self.update_transformation_matrices();
    }

    /// Set the heading offset.
    pub fn set_heading_offset(&mut self, heading: Angle) {
        self.heading_offset = heading;
        self.update_transformation_matrices();
    }

    fn update_eccentricities(&mut self) {
        self.ell_e = (1.0 - self.ell_b.powi(2) / self.ell_a.powi(2)).sqrt();
        self.ell_p = (self.ell_a.powi(2) / self.ell_b.powi(2) - 1.0).sqrt();
    }

    fn update_transformation_matrices(&mut self) {
        let cos_lat = self.latitude_reference.radian().cos();
        let sin_lat = self.latitude_reference.radian().sin();
        let cos_lon = self.longitude_reference.radian().cos();
        let sin_lon = self.longitude_reference.radian().sin();

        // ENU rotation, see
        // navipedia.net Transformations_between_ECEF_and_ENU_coordinates
        self.rot_ecef_to_global = Matrix3::new(
            -sin_lon,
            cos_lon,
            0.0,
            -cos_lon * sin_lat,
            -sin_lon * sin_lat,
            cos_lat,
            cos_lon * cos_lat,
            sin_lon * cos_lat,
            sin_lat,
        );
        self.rot_global_to_ecef = Matrix3::new(
            -sin_lon,
            -cos_lon * sin_lat,
            cos_lon * cos_lat,
            cos_lon,
            -sin_lon * sin_lat,
            sin_lon * cos_lat,
            0.0,
            cos_lat,
            sin_lat,
        );

        // The heading has historically been a clockwise rotation taking
        // GLOBAL to LOCAL, so it is negated to express it as a
        // right-handed anti-clockwise rotation.
        self.cos_hea = (-self.heading_offset.radian()).cos();
        self.sin_hea = (-self.heading_offset.radian()).sin();

        self.origin_ecef = self.spherical_to_ecef(
            self.latitude_reference.radian(),
            self.longitude_reference.radian(),
            self.elevation_reference,
        );
    }

    fn spherical_to_ecef(&self, lat: f64, lon: f64, elevation: f64) -> Vector3 {
        let cos_lat = lat.cos();
        let sin_lat = lat.sin();
        let cos_lon = lon.cos();
        let sin_lon = lon.sin();

        // prime vertical radius of curvature
        let curvature = self.ell_a / (1.0 - self.ell_e * self.ell_e * sin_lat * sin_lat).sqrt();

        Vector3::new(
            (elevation + curvature) * cos_lat * cos_lon,
            (elevation + curvature) * cos_lat * sin_lon,
            ((self.ell_b * self.ell_b) / (self.ell_a * self.ell_a) * curvature + elevation)
                * sin_lat,
        )
    }

    fn ecef_to_spherical(&self, ecef: &Vector3) -> (f64, f64, f64) {
        let p = (ecef.x * ecef.x + ecef.y * ecef.y).sqrt();
        let theta = ((ecef.z * self.ell_a) / (p * self.ell_b)).atan();

        let lat = ((ecef.z + self.ell_p.powi(2) * self.ell_b * theta.sin().powi(3))
            / (p - self.ell_e.powi(2) * self.ell_a * theta.cos().powi(3)))
        .atan();
        let lon = ecef.y.atan2(ecef.x);

        let curvature = self.ell_a / (1.0 - self.ell_e.powi(2) * lat.sin().powi(2)).sqrt();
        (lat, lon, p / lat.cos() - curvature)
    }

    fn position_transform_impl(
        &self,
        pos: &CoordinateVector3,
        input: CoordinateType,
        output: CoordinateType,
    ) -> Option<CoordinateVector3> {
        if (input == CoordinateType::Spherical) != pos.is_spherical() {
            log::error!("position transform input vector has the wrong kind for {input:?}");
            return None;
        }

        // first bring the input to ECEF
        let ecef = match input {
            CoordinateType::Local => {
                // historical inverted tangent frame
                let x = pos.x()?;
                let y = pos.y()?;
                let tmp = Vector3::new(
                    -x * self.cos_hea + y * self.sin_hea,
                    -x * self.sin_hea - y * self.cos_hea,
                    pos.z(),
                );
                self.origin_ecef + self.rot_global_to_ecef * tmp
            }
            CoordinateType::Local2 => {
                let x = pos.x()?;
                let y = pos.y()?;
                let tmp = Vector3::new(
                    x * self.cos_hea + y * self.sin_hea,
                    -x * self.sin_hea + y * self.cos_hea,
                    pos.z(),
                );
                self.origin_ecef + self.rot_global_to_ecef * tmp
            }
            CoordinateType::Global => {
                self.origin_ecef + self.rot_global_to_ecef * pos.as_metric_vector()?
            }
            CoordinateType::Spherical => {
                self.spherical_to_ecef(pos.lat()?.radian(), pos.lon()?.radian(), pos.z())
            }
            CoordinateType::Ecef => pos.as_metric_vector()?,
        };

        // then to the requested output frame
        let res = match output {
            CoordinateType::Spherical => {
                let (lat, lon, elevation) = self.ecef_to_spherical(&ecef);
                CoordinateVector3::spherical(Angle::radians(lat), Angle::radians(lon), elevation)
            }
            CoordinateType::Global => {
                let tmp = self.rot_ecef_to_global * (ecef - self.origin_ecef);
                CoordinateVector3::from_metric_vector(&tmp)
            }
            CoordinateType::Local | CoordinateType::Local2 => {
                let tmp = self.rot_ecef_to_global * (ecef - self.origin_ecef);
                CoordinateVector3::metric(
                    tmp.x * self.cos_hea - tmp.y * self.sin_hea,
                    tmp.x * self.sin_hea + tmp.y * self.cos_hea,
                    tmp.z,
                )
            }
            CoordinateType::Ecef => CoordinateVector3::from_metric_vector(&ecef),
        };
        Some(res)
    }

    /// Convert a position between two coordinate frames.
    ///
    /// The input vector's kind must match `input` (spherical for
    /// [`CoordinateType::Spherical`], metric otherwise) or None is
    /// returned. [`CoordinateType::Local`] uses the corrected tangent
    /// frame math here; only the legacy raw-vector path keeps the
    /// historical inversion.
    pub fn position_transform(
        &self,
        pos: &CoordinateVector3,
        input: CoordinateType,
        output: CoordinateType,
    ) -> Option<CoordinateVector3> {
        let input = if input == CoordinateType::Local {
            CoordinateType::Local2
        } else {
            input
        };
        let output = if output == CoordinateType::Local {
            CoordinateType::Local2
        } else {
            output
        };
        self.position_transform_impl(pos, input, output)
    }

    /// Legacy raw-vector position transform.
    ///
    /// Spherical components are radians in `pos.x`/`pos.y`, and the
    /// [`CoordinateType::Local`] frame keeps its historical axis
    /// inversion. Returns the input unchanged when the transform is not
    /// possible.
    pub fn position_transform_legacy(
        &self,
        pos: &Vector3,
        input: CoordinateType,
        output: CoordinateType,
    ) -> Vector3 {
        let vec = if input == CoordinateType::Spherical {
            CoordinateVector3::spherical(Angle::radians(pos.x), Angle::radians(pos.y), pos.z)
        } else {
            CoordinateVector3::metric(pos.x, pos.y, pos.z)
        };

        match self.position_transform_impl(&vec, input, output) {
            None => *pos,
            Some(res) => match res.as_metric_vector() {
                Some(v) => v,
                None => Vector3::new(
                    res.lat().map_or(f64::NAN, |a| a.radian()),
                    res.lon().map_or(f64::NAN, |a| a.radian()),
                    res.z(),
                ),
            },
        }
    }

    fn velocity_transform_impl(
        &self,
        vel: &CoordinateVector3,
        input: CoordinateType,
        output: CoordinateType,
    ) -> Option<CoordinateVector3> {
        if input == CoordinateType::Spherical
            || output == CoordinateType::Spherical
            || vel.is_spherical()
        {
            log::error!("velocity cannot be expressed in spherical coordinates");
            return None;
        }

        let v = vel.as_metric_vector()?;
        let ecef = match input {
            CoordinateType::Local => self.rot_global_to_ecef
                * Vector3::new(
                    -v.x * self.cos_hea + v.y * self.sin_hea,
                    -v.x * self.sin_hea - v.y * self.cos_hea,
                    v.z,
                ),
            CoordinateType::Local2 => self.rot_global_to_ecef
                * Vector3::new(
                    v.x * self.cos_hea + v.y * self.sin_hea,
                    -v.x * self.sin_hea + v.y * self.cos_hea,
                    v.z,
                ),
            CoordinateType::Global => self.rot_global_to_ecef * v,
            CoordinateType::Ecef => v,
            CoordinateType::Spherical => return None,
        };

        let res = match output {
            CoordinateType::Ecef => ecef,
            CoordinateType::Global => self.rot_ecef_to_global * ecef,
            CoordinateType::Local | CoordinateType::Local2 => {
                let tmp = self.rot_ecef_to_global * ecef;
                Vector3::new(
                    tmp.x * self.cos_hea - tmp.y * self.sin_hea,
                    tmp.x * self.sin_hea + tmp.y * self.cos_hea,
                    tmp.z,
                )
            }
            CoordinateType::Spherical => return None,
        };
        Some(CoordinateVector3::from_metric_vector(&res))
    }

    /// Convert a velocity between two coordinate frames.
    ///
    /// Velocities are never spherical; None is returned when either
    /// frame or the payload is spherical.
    pub fn velocity_transform(
        &self,
        vel: &CoordinateVector3,
        input: CoordinateType,
        output: CoordinateType,
    ) -> Option<CoordinateVector3> {
        let input = if input == CoordinateType::Local {
            CoordinateType::Local2
        } else {
            input
        };
        let output = if output == CoordinateType::Local {
            CoordinateType::Local2
        } else {
            output
        };
        self.velocity_transform_impl(vel, input, output)
    }

    /// Legacy raw-vector velocity transform, keeping the historical
    /// [`CoordinateType::Local`] axis inversion. Returns the input
    /// unchanged when the transform is not possible.
    pub fn velocity_transform_legacy(
        &self,
        vel: &Vector3,
        input: CoordinateType,
        output: CoordinateType,
    ) -> Vector3 {
        let vec = CoordinateVector3::from_metric_vector(vel);
        match self
            .velocity_transform_impl(&vec, input, output)
            .and_then(|r| r.as_metric_vector())
        {
            Some(v) => v,
            None => *vel,
        }
    }

    /// Latitude, longitude and altitude of a local position.
    pub fn spherical_from_local_position(
        &self,
        xyz: &CoordinateVector3,
    ) -> Option<CoordinateVector3> {
        self.position_transform(xyz, CoordinateType::Local, CoordinateType::Spherical)
    }

    /// Local position of a latitude, longitude and altitude.
    pub fn local_from_spherical_position(
        &self,
        xyz: &CoordinateVector3,
    ) -> Option<CoordinateVector3> {
        self.position_transform(xyz, CoordinateType::Spherical, CoordinateType::Local)
    }

    /// Legacy variant of [`Self::spherical_from_local_position`]; the
    /// returned x and y components are latitude and longitude in
    /// degrees.
    pub fn spherical_from_local_position_legacy(&self, xyz: &Vector3) -> Vector3 {
        let mut res =
            self.position_transform_legacy(xyz, CoordinateType::Local, CoordinateType::Spherical);
        res.x = res.x.to_degrees();
        res.y = res.y.to_degrees();
        res
    }

    /// Legacy variant of [`Self::local_from_spherical_position`]; the
    /// x and y components of the input are latitude and longitude in
    /// degrees.
    pub fn local_from_spherical_position_legacy(&self, xyz: &Vector3) -> Vector3 {
        let rad = Vector3::new(xyz.x.to_radians(), xyz.y.to_radians(), xyz.z);
        self.position_transform_legacy(&rad, CoordinateType::Spherical, CoordinateType::Local)
    }

    /// Global-frame velocity of a local-frame velocity.
    pub fn global_from_local_velocity(
        &self,
        xyz: &CoordinateVector3,
    ) -> Option<CoordinateVector3> {
        self.velocity_transform(xyz, CoordinateType::Local, CoordinateType::Global)
    }

    /// Local-frame velocity of a global-frame velocity.
    pub fn local_from_global_velocity(
        &self,
        xyz: &CoordinateVector3,
    ) -> Option<CoordinateVector3> {
        self.velocity_transform(xyz, CoordinateType::Global, CoordinateType::Local)
    }

    /// Legacy variant of [`Self::global_from_local_velocity`].
    pub fn global_from_local_velocity_legacy(&self, xyz: &Vector3) -> Vector3 {
        self.velocity_transform_legacy(xyz, CoordinateType::Local, CoordinateType::Global)
    }

    /// Legacy variant of [`Self::local_from_global_velocity`].
    pub fn local_from_global_velocity_legacy(&self, xyz: &Vector3) -> Vector3 {
        self.velocity_transform_legacy(xyz, CoordinateType::Global, CoordinateType::Local)
    }

    /// Great-circle distance between two points on the configured
    /// surface, by the haversine formula, ignoring elevation.
    pub fn distance_between_points(
        &self,
        lat_a: Angle,
        lon_a: Angle,
        lat_b: Angle,
        lon_b: Angle,
    ) -> f64 {
        self.surface_radius * haversine_central_angle(lat_a, lon_a, lat_b, lon_b)
    }

    /// Great-circle distance between two points on Earth in meters.
    pub fn distance_wgs84(lat_a: Angle, lon_a: Angle, lat_b: Angle, lon_b: Angle) -> f64 {
        EARTH_RADIUS * haversine_central_angle(lat_a, lon_a, lat_b, lon_b)
    }
}

fn haversine_central_angle(lat_a: Angle, lon_a: Angle, lat_b: Angle, lon_b: Angle) -> f64 {
    let d_lat = (lat_b - lat_a).radian();
    let d_lon = (lon_b - lon_a).radian();

    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + (d_lon / 2.0).sin() * (d_lon / 2.0).sin() * lat_a.radian().cos() * lat_b.radian().cos();
    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

impl PartialEq for SphericalCoordinates {
    fn eq(&self, other: &Self) -> bool {
        self.surface_type == other.surface_type
            && self.latitude_reference == other.latitude_reference
            && self.longitude_reference == other.longitude_reference
            && equal(self.elevation_reference, other.elevation_reference, 1e-6)
            && self.heading_offset == other.heading_offset
    }
}
