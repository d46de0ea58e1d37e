//! Coherent-noise quality settings.

use serde::{Deserialize, Serialize};

/// Selects the S-curve applied to the interpolation parameter.
///
/// Higher qualities smooth more derivatives across lattice boundaries,
/// which removes the "creasing" visible in bump-mapped renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NoiseQuality {
    /// Linear interpolation. The first derivative is discontinuous at
    /// integer boundaries.
    Fast,
    /// Cubic S-curve. The second derivative is discontinuous at integer
    /// boundaries.
    #[default]
    Standard,
    /// Quintic S-curve. First and second derivatives are continuous.
    Best,
}

impl NoiseQuality {
    /// Returns the name of the quality level.
    pub fn name(&self) -> &'static str {
        match self {
            NoiseQuality::Fast => "fast",
            NoiseQuality::Standard => "standard",
            NoiseQuality::Best => "best",
        }
    }
}
