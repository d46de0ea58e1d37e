//! Noise modules and their composition graph.
//!
//! A module turns a 3D input point into a scalar. Modules may read other
//! modules through a fixed number of source slots; the slot count is part
//! of each concrete type (`SourceModules<N>`), so it can never be resized.

mod perlin;

use std::sync::Arc;

use crate::error::NoiseError;

pub use perlin::{
    Perlin, PerlinConfig, DEFAULT_PERLIN_FREQUENCY, DEFAULT_PERLIN_LACUNARITY,
    DEFAULT_PERLIN_OCTAVE_COUNT, DEFAULT_PERLIN_PERSISTENCE, DEFAULT_PERLIN_QUALITY,
    DEFAULT_PERLIN_SEED, PERLIN_MAX_OCTAVE,
};

/// Uniform interface implemented by every noise module.
pub trait NoiseModule: Send + Sync {
    /// Number of source modules this module reads.
    fn source_module_count(&self) -> usize;

    /// Returns the source module connected at `index`.
    ///
    /// Fails with [`NoiseError::NoModule`] when `index` is out of range or the
    /// slot is empty.
    fn source_module(&self, index: usize) -> Result<&Module, NoiseError>;

    /// Connects `module` at `index`, replacing any previous occupant.
    ///
    /// Fails with [`NoiseError::InvalidParam`] when `index` is out of range.
    fn set_source_module(&mut self, index: usize, module: Arc<Module>) -> Result<(), NoiseError>;

    /// Generates the output value at `(x, y, z)`.
    ///
    /// Every source slot must be connected first.
    fn get_value(&self, x: f64, y: f64, z: f64) -> f64;
}

/// Fixed-arity array of source-module slots.
///
/// Slots hold shared handles; connecting a module never copies it and the
/// module stays alive as long as any graph refers to it.
#[derive(Debug, Clone)]
pub struct SourceModules<const N: usize> {
    slots: [Option<Arc<Module>>; N],
}

impl<const N: usize> Default for SourceModules<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SourceModules<N> {
    /// Number of slots.
    pub const COUNT: usize = N;

    /// Creates a slot array with every slot empty.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }

    /// Returns the module at `index`, or `NoModule` if the index is out of
    /// range or the slot is empty.
    pub fn get(&self, index: usize) -> Result<&Module, NoiseError> {
        self.slots
            .get(index)
            .and_then(|slot| slot.as_deref())
            .ok_or(NoiseError::NoModule(index))
    }

    /// Stores `module` at `index`.
    pub fn set(&mut self, index: usize, module: Arc<Module>) -> Result<(), NoiseError> {
        let slot = self.slots.get_mut(index).ok_or_else(|| {
            NoiseError::invalid(format!(
                "source module index {} out of range (module takes {})",
                index, N
            ))
        })?;
        *slot = Some(module);
        Ok(())
    }

    /// Returns true if every slot is connected.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

/// Closed set of noise modules.
#[derive(Debug, Clone)]
pub enum Module {
    /// Fractal gradient noise.
    Perlin(Perlin),
}

impl Module {
    /// Returns a short name for the module type.
    pub fn name(&self) -> &'static str {
        match self {
            Module::Perlin(_) => "perlin",
        }
    }

    fn inner(&self) -> &dyn NoiseModule {
        match self {
            Module::Perlin(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn NoiseModule {
        match self {
            Module::Perlin(m) => m,
        }
    }
}

impl NoiseModule for Module {
    fn source_module_count(&self) -> usize {
        self.inner().source_module_count()
    }

    fn source_module(&self, index: usize) -> Result<&Module, NoiseError> {
        self.inner().source_module(index)
    }

    fn set_source_module(&mut self, index: usize, module: Arc<Module>) -> Result<(), NoiseError> {
        self.inner_mut().set_source_module(index, module)
    }

    fn get_value(&self, x: f64, y: f64, z: f64) -> f64 {
        self.inner().get_value(x, y, z)
    }
}

impl From<Perlin> for Module {
    fn from(module: Perlin) -> Self {
        Module::Perlin(module)
    }
}
