//! Planar noise-map builder.

use super::{BuilderState, NoiseMapBuilder};
use crate::error::NoiseError;
use crate::model::PlaneModel;
use crate::noise::linear_interp;
use crate::raster::NoiseMap;

/// Builds a noise map from the `y = 0` plane of a module.
///
/// The map covers `[lower_x, upper_x) × [lower_z, upper_z)`; map columns
/// follow x and map rows follow z.
///
/// With seamless tiling enabled, each sample is blended with the samples one
/// period to the east, north and north-east so that the map tiles without
/// a visible seam when the bounds span exactly one tile.
#[derive(Default)]
pub struct PlaneMapBuilder<'a> {
    state: BuilderState<'a>,
    seamless: bool,
    lower_x: f64,
    upper_x: f64,
    lower_z: f64,
    upper_z: f64,
}

impl<'a> PlaneMapBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bounds of the plane region.
    ///
    /// Fails with `InvalidParam` unless `lower_x < upper_x` and
    /// `lower_z < upper_z`; the previous bounds are kept on failure.
    pub fn set_bounds(
        &mut self,
        lower_x: f64,
        upper_x: f64,
        lower_z: f64,
        upper_z: f64,
    ) -> Result<(), NoiseError> {
        check_bounds(lower_x, upper_x, lower_z, upper_z)?;
        self.lower_x = lower_x;
        self.upper_x = upper_x;
        self.lower_z = lower_z;
        self.upper_z = upper_z;
        Ok(())
    }

    pub fn enable_seamless(&mut self, enable: bool) {
        self.seamless = enable;
    }

    pub fn is_seamless_enabled(&self) -> bool {
        self.seamless
    }

    pub fn lower_x_bound(&self) -> f64 {
        self.lower_x
    }

    pub fn upper_x_bound(&self) -> f64 {
        self.upper_x
    }

    pub fn lower_z_bound(&self) -> f64 {
        self.lower_z
    }

    pub fn upper_z_bound(&self) -> f64 {
        self.upper_z
    }
}

fn check_bounds(lower_x: f64, upper_x: f64, lower_z: f64, upper_z: f64) -> Result<(), NoiseError> {
    // Negated comparisons also reject NaN bounds.
    if !(lower_x < upper_x) || !(lower_z < upper_z) {
        return Err(NoiseError::invalid(format!(
            "plane bounds x [{}, {}) z [{}, {}) are not strictly ordered",
            lower_x, upper_x, lower_z, upper_z
        )));
    }
    Ok(())
}

impl<'a> NoiseMapBuilder<'a> for PlaneMapBuilder<'a> {
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
        check_bounds(self.lower_x, self.upper_x, self.lower_z, self.upper_z)?;
        let plane = PlaneModel::new(self.state.validate()?);

        let tile = Tile {
            lower_x: self.lower_x,
            lower_z: self.lower_z,
            x_extent: self.upper_x - self.lower_x,
            z_extent: self.upper_z - self.lower_z,
        };
        let x_delta = tile.x_extent / self.state.dest_width as f64;
        let z_delta = tile.z_extent / self.state.dest_height as f64;
        let seamless = self.seamless;

        self.state.fill(move |x, z| {
            let x_cur = tile.lower_x + x as f64 * x_delta;
            let z_cur = tile.lower_z + z as f64 * z_delta;
            if seamless {
                tile.seamless_value(&plane, x_cur, z_cur) as f32
            } else {
                plane.get_value(x_cur, z_cur) as f32
            }
        })
    }
}

/// One period of a seamless plane map.
#[derive(Debug, Clone, Copy)]
struct Tile {
    lower_x: f64,
    lower_z: f64,
    x_extent: f64,
    z_extent: f64,
}

impl Tile {
    /// Blends the sample at `(x, z)` with its translates one period east,
    /// north and north-east.
    ///
    /// The result is periodic: a point one full extent past the lower bound
    /// yields the same value as the lower bound itself, so the column after
    /// the last one of a map repeats its first column.
    fn seamless_value(&self, plane: &PlaneModel<'_>, x: f64, z: f64) -> f64 {
        let sw = plane.get_value(x, z);
        let se = plane.get_value(x + self.x_extent, z);
        let nw = plane.get_value(x, z + self.z_extent);
        let ne = plane.get_value(x + self.x_extent, z + self.z_extent);
        let x_blend = 1.0 - ((x - self.lower_x) / self.x_extent);
        let z_blend = 1.0 - ((z - self.lower_z) / self.z_extent);
        let z0 = linear_interp(sw, se, x_blend);
        let z1 = linear_interp(nw, ne, x_blend);
        linear_interp(z0, z1, z_blend)
    }
}
