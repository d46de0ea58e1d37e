//! Spherical noise-map builder.

use super::{BuilderState, NoiseMapBuilder};
use crate::error::NoiseError;
use crate::model::SphereModel;
use crate::raster::NoiseMap;

/// Builds an equirectangular noise map from the surface of a unit sphere.
///
/// Map columns span `[west, east)` longitude and rows span `[south, north)`
/// latitude, both in degrees. Row 0 is the southern edge.
#[derive(Default)]
pub struct SphereMapBuilder<'a> {
    state: BuilderState<'a>,
    south_lat: f64,
    north_lat: f64,
    west_lon: f64,
    east_lon: f64,
}

impl<'a> SphereMapBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the latitude/longitude bounds in degrees.
    ///
    /// Fails with `InvalidParam` unless `south < north` and `west < east`.
    pub fn set_bounds(
        &mut self,
        south_lat: f64,
        north_lat: f64,
        west_lon: f64,
        east_lon: f64,
    ) -> Result<(), NoiseError> {
        check_bounds(south_lat, north_lat, west_lon, east_lon)?;
        self.south_lat = south_lat;
        self.north_lat = north_lat;
        self.west_lon = west_lon;
        self.east_lon = east_lon;
        Ok(())
    }

    pub fn south_lat_bound(&self) -> f64 {
        self.south_lat
    }

    pub fn north_lat_bound(&self) -> f64 {
        self.north_lat
    }

    pub fn west_lon_bound(&self) -> f64 {
        self.west_lon
    }

    pub fn east_lon_bound(&self) -> f64 {
        self.east_lon
    }
}

fn check_bounds(south: f64, north: f64, west: f64, east: f64) -> Result<(), NoiseError> {
    if !(south < north) || !(west < east) {
        return Err(NoiseError::invalid(format!(
            "sphere bounds lat [{}, {}] lon [{}, {}] are not strictly ordered",
            south, north, west, east
        )));
    }
    Ok(())
}

impl<'a> NoiseMapBuilder<'a> for SphereMapBuilder<'a> {
    fn state(&self) -> &BuilderState<'a> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BuilderState<'a> {
        &mut self.state
    }

    fn dest_noise_map(&self) -> Option<&NoiseMap> {
        self.state.dest_noise_map.as_deref()
    }

    fn build(&mut self) -> Result<(), NoiseError> {
        check_bounds(self.south_lat, self.north_lat, self.west_lon, self.east_lon)?;
        let sphere = SphereModel::new(self.state.validate()?);

        let (south, west) = (self.south_lat, self.west_lon);
        let lat_delta = (self.north_lat - self.south_lat) / self.state.dest_height as f64;
        let lon_delta = (self.east_lon - self.west_lon) / self.state.dest_width as f64;

        self.state.fill(move |x, y| {
            let lat = south + y as f64 * lat_delta;
            let lon = west + x as f64 * lon_delta;
            sphere.get_value(lat, lon) as f32
        })
    }
}
