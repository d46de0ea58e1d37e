//! Perlin noise module: octave-summed gradient coherent noise.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Module, NoiseModule, SourceModules};
use crate::error::NoiseError;
use crate::noise::{gradient_coherent_noise_3d, make_int32_range, NoiseQuality};

pub const DEFAULT_PERLIN_FREQUENCY: f64 = 1.0;
pub const DEFAULT_PERLIN_LACUNARITY: f64 = 2.0;
pub const DEFAULT_PERLIN_OCTAVE_COUNT: u32 = 6;
pub const DEFAULT_PERLIN_PERSISTENCE: f64 = 0.5;
pub const DEFAULT_PERLIN_QUALITY: NoiseQuality = NoiseQuality::Standard;
pub const DEFAULT_PERLIN_SEED: i32 = 0;

/// Maximum number of octaves a [`Perlin`] module accepts.
pub const PERLIN_MAX_OCTAVE: u32 = 30;

/// Parameters of a [`Perlin`] module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerlinConfig {
    /// Frequency of the first octave.
    pub frequency: f64,
    /// Frequency multiplier between successive octaves (1.5-3.5 typical).
    pub lacunarity: f64,
    /// Number of octaves, 1 to [`PERLIN_MAX_OCTAVE`].
    pub octave_count: u32,
    /// Amplitude multiplier between successive octaves (0.0-1.0 typical).
    pub persistence: f64,
    /// Seed of the first octave; octave `i` uses `seed + i`.
    pub seed: i32,
    pub quality: NoiseQuality,
}

impl Default for PerlinConfig {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_PERLIN_FREQUENCY,
            lacunarity: DEFAULT_PERLIN_LACUNARITY,
            octave_count: DEFAULT_PERLIN_OCTAVE_COUNT,
            persistence: DEFAULT_PERLIN_PERSISTENCE,
            seed: DEFAULT_PERLIN_SEED,
            quality: DEFAULT_PERLIN_QUALITY,
        }
    }
}

impl PerlinConfig {
    /// Creates a default configuration with the given seed.
    pub fn with_seed(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

fn check_octave_count(octave_count: u32) -> Result<(), NoiseError> {
    if !(1..=PERLIN_MAX_OCTAVE).contains(&octave_count) {
        return Err(NoiseError::invalid(format!(
            "octave count {} outside 1..={}",
            octave_count, PERLIN_MAX_OCTAVE
        )));
    }
    Ok(())
}

/// Fractal gradient noise with no source modules.
///
/// Each octave samples gradient coherent noise at a frequency `lacunarity`
/// times higher and an amplitude `persistence` times lower than the last.
/// The octaves are summed without normalization, so the output is not
/// clamped to [-1, 1]; for persistence below 1 it stays close to it.
#[derive(Debug, Clone)]
pub struct Perlin {
    config: PerlinConfig,
    sources: SourceModules<0>,
}

impl Default for Perlin {
    fn default() -> Self {
        Self::new()
    }
}

impl Perlin {
    /// Creates a module with the default parameters.
    pub fn new() -> Self {
        Self {
            config: PerlinConfig::default(),
            sources: SourceModules::new(),
        }
    }

    /// Creates a module from a configuration, validating the octave count.
    pub fn from_config(config: &PerlinConfig) -> Result<Self, NoiseError> {
        check_octave_count(config.octave_count)?;
        Ok(Self {
            config: config.clone(),
            sources: SourceModules::new(),
        })
    }

    /// Returns a copy of the current parameters.
    pub fn config(&self) -> PerlinConfig {
        self.config.clone()
    }

    pub fn frequency(&self) -> f64 {
        self.config.frequency
    }

    pub fn lacunarity(&self) -> f64 {
        self.config.lacunarity
    }

    pub fn octave_count(&self) -> u32 {
        self.config.octave_count
    }

    pub fn persistence(&self) -> f64 {
        self.config.persistence
    }

    pub fn seed(&self) -> i32 {
        self.config.seed
    }

    pub fn noise_quality(&self) -> NoiseQuality {
        self.config.quality
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.config.frequency = frequency;
    }

    pub fn set_lacunarity(&mut self, lacunarity: f64) {
        self.config.lacunarity = lacunarity;
    }

    /// Sets the number of octaves.
    ///
    /// Fails with `InvalidParam` outside `1..=PERLIN_MAX_OCTAVE`, leaving the
    /// previous count in place.
    pub fn set_octave_count(&mut self, octave_count: u32) -> Result<(), NoiseError> {
        check_octave_count(octave_count)?;
        self.config.octave_count = octave_count;
        Ok(())
    }

    pub fn set_persistence(&mut self, persistence: f64) {
        self.config.persistence = persistence;
    }

    pub fn set_seed(&mut self, seed: i32) {
        self.config.seed = seed;
    }

    pub fn set_noise_quality(&mut self, quality: NoiseQuality) {
        self.config.quality = quality;
    }
}

impl NoiseModule for Perlin {
    fn source_module_count(&self) -> usize {
        self.sources.len()
    }

    fn source_module(&self, index: usize) -> Result<&Module, NoiseError> {
        self.sources.get(index)
    }

    fn set_source_module(&mut self, index: usize, module: Arc<Module>) -> Result<(), NoiseError> {
        self.sources.set(index, module)
    }

    fn get_value(&self, x: f64, y: f64, z: f64) -> f64 {
        let config = &self.config;
        let mut value = 0.0;
        let mut cur_persistence = 1.0;

        let mut x = x * config.frequency;
        let mut y = y * config.frequency;
        let mut z = z * config.frequency;

        for octave in 0..config.octave_count {
            let seed = config.seed.wrapping_add(octave as i32);
            let signal = gradient_coherent_noise_3d(
                make_int32_range(x),
                make_int32_range(y),
                make_int32_range(z),
                seed,
                config.quality,
            );
            value += signal * cur_persistence;

            x *= config.lacunarity;
            y *= config.lacunarity;
            z *= config.lacunarity;
            cur_persistence *= config.persistence;
        }

        value
    }
}
