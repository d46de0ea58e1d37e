//! Surface models that map 2D coordinates onto a module's 3D input space.

use glam::DVec3;

use crate::module::{Module, NoiseModule};

/// Converts latitude/longitude in degrees to a point on the unit sphere.
///
/// Latitude should range from -90 to +90 and longitude from -180 to +180.
#[inline]
pub fn lat_lon_to_xyz(lat: f64, lon: f64) -> DVec3 {
    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
    let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
    DVec3::new(cos_lat * cos_lon, sin_lat, cos_lat * sin_lon)
}

/// Infinite plane lying in the `y = 0` slice of the module's input space.
#[derive(Debug, Clone, Copy)]
pub struct PlaneModel<'a> {
    module: &'a Module,
}

impl<'a> PlaneModel<'a> {
    pub fn new(module: &'a Module) -> Self {
        Self { module }
    }

    pub fn module(&self) -> &'a Module {
        self.module
    }

    /// Samples the module at `(x, 0, z)`.
    #[inline]
    pub fn get_value(&self, x: f64, z: f64) -> f64 {
        self.module.get_value(x, 0.0, z)
    }
}

/// Unit sphere centered on the origin, addressed by latitude/longitude.
#[derive(Debug, Clone, Copy)]
pub struct SphereModel<'a> {
    module: &'a Module,
}

impl<'a> SphereModel<'a> {
    pub fn new(module: &'a Module) -> Self {
        Self { module }
    }

    pub fn module(&self) -> &'a Module {
        self.module
    }

    /// Samples the module at the surface point for `(lat, lon)` in degrees.
    #[inline]
    pub fn get_value(&self, lat: f64, lon: f64) -> f64 {
        let p = lat_lon_to_xyz(lat, lon);
        self.module.get_value(p.x, p.y, p.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Perlin;

    fn assert_close(a: DVec3, b: DVec3) {
        assert!((a - b).length() < 1e-12, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_lat_lon_axes() {
        assert_close(lat_lon_to_xyz(0.0, 0.0), DVec3::X);
        assert_close(lat_lon_to_xyz(90.0, 0.0), DVec3::Y);
        assert_close(lat_lon_to_xyz(0.0, 90.0), DVec3::Z);
        assert_close(lat_lon_to_xyz(-90.0, 45.0), DVec3::NEG_Y);
    }

    #[test]
    fn test_lat_lon_on_unit_sphere() {
        for lat in [-80.0, -30.0, 0.0, 12.5, 60.0] {
            for lon in [-180.0, -90.0, 0.0, 33.0, 179.0] {
                let p = lat_lon_to_xyz(lat, lon);
                assert!((p.length() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_plane_model_samples_y_zero() {
        let module = Module::from(Perlin::new());
        let plane = PlaneModel::new(&module);
        assert_eq!(plane.get_value(1.3, 2.7), module.get_value(1.3, 0.0, 2.7));
    }

    #[test]
    fn test_sphere_model_samples_surface() {
        let module = Module::from(Perlin::new());
        let sphere = SphereModel::new(&module);
        let p = lat_lon_to_xyz(20.0, -45.0);
        assert_eq!(sphere.get_value(20.0, -45.0), module.get_value(p.x, p.y, p.z));
    }
}
