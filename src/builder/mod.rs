//! Noise-map builders.
//!
//! A builder samples a module over a bounded region of some surface (a
//! plane or a sphere) and writes the values into a [`NoiseMap`].
//!
//! To build a map: set the bounds, the destination size, the destination
//! map and the source module, then call `build()`. An optional callback is
//! invoked with the index of every completed row.

mod plane;
mod sphere;

use std::time::Instant;

use rayon::prelude::*;

use crate::error::NoiseError;
use crate::module::Module;
use crate::raster::NoiseMap;

pub use plane::PlaneMapBuilder;
pub use sphere::SphereMapBuilder;

/// Called with the index of each row once it is filled.
pub type RowCallback<'a> = Box<dyn FnMut(usize) + 'a>;

/// Inputs shared by every builder.
#[derive(Default)]
pub struct BuilderState<'a> {
    source_module: Option<&'a Module>,
    dest_noise_map: Option<&'a mut NoiseMap>,
    dest_width: usize,
    dest_height: usize,
    callback: Option<RowCallback<'a>>,
}

impl<'a> BuilderState<'a> {
    /// Checks the size, module and map, returning the module.
    fn validate(&self) -> Result<&'a Module, NoiseError> {
        if self.dest_width == 0 || self.dest_height == 0 {
            return Err(NoiseError::invalid(format!(
                "destination size {}x{} must be positive",
                self.dest_width, self.dest_height
            )));
        }
        if self.dest_noise_map.is_none() {
            return Err(NoiseError::invalid("no destination noise map set"));
        }
        self.source_module
            .ok_or_else(|| NoiseError::invalid("no source module set"))
    }

    /// Resizes the destination and fills it with `sample(x, y)`.
    ///
    /// Rows run on the rayon pool unless a callback is installed, in which
    /// case they run in order and the callback sees each finished row.
    fn fill<F>(&mut self, sample: F) -> Result<(), NoiseError>
    where
        F: Fn(usize, usize) -> f32 + Sync,
    {
        let width = self.dest_width;
        let height = self.dest_height;
        let map = self
            .dest_noise_map
            .as_deref_mut()
            .ok_or_else(|| NoiseError::invalid("no destination noise map set"))?;
        map.set_size(width, height)?;

        let start = Instant::now();
        let stride = map.stride();
        let fill_row = |y: usize, row: &mut [f32]| {
            for (x, value) in row[..width].iter_mut().enumerate() {
                *value = sample(x, y);
            }
        };

        match self.callback.as_mut() {
            Some(callback) => {
                for (y, row) in map.as_mut_slice().chunks_mut(stride).enumerate() {
                    fill_row(y, row);
                    callback(y);
                }
            }
            None => {
                map.as_mut_slice()
                    .par_chunks_mut(stride)
                    .enumerate()
                    .for_each(|(y, row)| fill_row(y, row));
            }
        }

        log::debug!(
            "built {}x{} noise map in {:.2?}",
            width,
            height,
            start.elapsed()
        );
        Ok(())
    }
}

/// Common interface of the noise-map builders.
///
/// Implementors only provide access to their [`BuilderState`] and the
/// surface-specific `build()`.
pub trait NoiseMapBuilder<'a> {
    fn state(&self) -> &BuilderState<'a>;

    fn state_mut(&mut self) -> &mut BuilderState<'a>;

    /// Builds the noise map.
    ///
    /// Fails with `InvalidParam`, before touching the destination, if the
    /// bounds, size, source module or destination map are missing or
    /// invalid. On success the destination is resized to the requested size
    /// and fully overwritten.
    fn build(&mut self) -> Result<(), NoiseError>;

    /// Sets the module that generates the values.
    fn set_source_module(&mut self, module: &'a Module) {
        self.state_mut().source_module = Some(module);
    }

    /// Sets the map that receives the values.
    fn set_dest_noise_map(&mut self, map: &'a mut NoiseMap) {
        self.state_mut().dest_noise_map = Some(map);
    }

    /// Sets the size of the map to build. Takes effect on `build()`.
    fn set_dest_size(&mut self, width: usize, height: usize) {
        let state = self.state_mut();
        state.dest_width = width;
        state.dest_height = height;
    }

    /// Installs a callback invoked with the index of each completed row.
    fn set_callback(&mut self, callback: impl FnMut(usize) + 'a)
    where
        Self: Sized,
    {
        self.state_mut().callback = Some(Box::new(callback));
    }

    fn dest_width(&self) -> usize {
        self.state().dest_width
    }

    fn dest_height(&self) -> usize {
        self.state().dest_height
    }

    /// The destination map, for reading results back.
    fn dest_noise_map(&self) -> Option<&NoiseMap>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Perlin;

    fn built_size<'a, B: NoiseMapBuilder<'a>>(builder: &mut B) -> Option<(usize, usize)> {
        builder.build().ok()?;
        builder.dest_noise_map().map(|map| (map.width(), map.height()))
    }

    #[test]
    fn test_dest_noise_map_through_trait() {
        let module = Module::from(Perlin::new());
        let mut plane_map = NoiseMap::new();
        let mut sphere_map = NoiseMap::new();

        let mut plane = PlaneMapBuilder::new();
        assert!(plane.dest_noise_map().is_none());
        plane.set_source_module(&module);
        plane.set_dest_noise_map(&mut plane_map);
        plane.set_dest_size(6, 3);
        plane.set_bounds(0.0, 1.0, 0.0, 1.0).unwrap();
        assert_eq!(built_size(&mut plane), Some((6, 3)));

        let mut sphere = SphereMapBuilder::new();
        sphere.set_source_module(&module);
        sphere.set_dest_noise_map(&mut sphere_map);
        sphere.set_dest_size(8, 4);
        sphere.set_bounds(-90.0, 90.0, -180.0, 180.0).unwrap();
        assert_eq!(built_size(&mut sphere), Some((8, 4)));
    }

    #[test]
    fn test_validate_reports_missing_inputs() {
        let state = BuilderState::default();
        assert!(matches!(state.validate(), Err(NoiseError::InvalidParam(_))));
    }
}
