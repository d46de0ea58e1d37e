//! Light source parameters for bump-mapped rendering.

use serde::{Deserialize, Serialize};

use crate::raster::Color;

pub const DEFAULT_LIGHT_AZIMUTH: f64 = 45.0;
pub const DEFAULT_LIGHT_ELEVATION: f64 = 45.0;
pub const DEFAULT_LIGHT_CONTRAST: f64 = 1.0;
pub const DEFAULT_LIGHT_BRIGHTNESS: f64 = 1.0;
pub const DEFAULT_LIGHT_INTENSITY: f64 = 1.0;

/// User-facing light parameters. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSettings {
    /// Direction the light comes from, counterclockwise from east.
    pub azimuth: f64,
    /// Angle above the horizon; 90 is straight overhead.
    pub elevation: f64,
    pub contrast: f64,
    pub brightness: f64,
    pub intensity: f64,
    pub color: Color,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            azimuth: DEFAULT_LIGHT_AZIMUTH,
            elevation: DEFAULT_LIGHT_ELEVATION,
            contrast: DEFAULT_LIGHT_CONTRAST,
            brightness: DEFAULT_LIGHT_BRIGHTNESS,
            intensity: DEFAULT_LIGHT_INTENSITY,
            color: Color::WHITE,
        }
    }
}

/// Coefficients of the bump-mapping formula, derived from azimuth,
/// elevation and contrast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightState {
    pub io: f64,
    pub ix: f64,
    pub iy: f64,
}

impl LightState {
    pub fn derive(settings: &LightSettings) -> Self {
        let (sin_az, cos_az) = settings.azimuth.to_radians().sin_cos();
        let (sin_elev, cos_elev) = settings.elevation.to_radians().sin_cos();
        let io = std::f64::consts::SQRT_2 * sin_elev / 2.0;
        let ix = (1.0 - io) * settings.contrast * std::f64::consts::SQRT_2 * cos_elev * cos_az;
        let iy = (1.0 - io) * settings.contrast * std::f64::consts::SQRT_2 * cos_elev * sin_az;
        Self { io, ix, iy }
    }

    /// Light intensity at a point given its four neighbours.
    #[inline]
    pub fn intensity(&self, left: f64, right: f64, down: f64, up: f64, brightness: f64) -> f64 {
        let value = self.ix * (left - right) + self.iy * (down - up) + self.io;
        value.max(0.0) * brightness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_surface_uses_ambient_term() {
        let state = LightState::derive(&LightSettings::default());
        let expected = std::f64::consts::SQRT_2 * (45.0f64).to_radians().sin() / 2.0;
        assert!((state.io - expected).abs() < 1e-12);
        assert!((state.intensity(0.3, 0.3, 0.3, 0.3, 1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_overhead_light_has_no_directional_terms() {
        let settings = LightSettings {
            elevation: 90.0,
            ..Default::default()
        };
        let state = LightState::derive(&settings);
        assert!(state.ix.abs() < 1e-12);
        assert!(state.iy.abs() < 1e-12);
    }

    #[test]
    fn test_contrast_scales_directional_terms() {
        let base = LightState::derive(&LightSettings::default());
        let doubled = LightState::derive(&LightSettings {
            contrast: 2.0,
            ..Default::default()
        });
        assert!((doubled.ix - 2.0 * base.ix).abs() < 1e-12);
        assert!((doubled.iy - 2.0 * base.iy).abs() < 1e-12);
        assert_eq!(doubled.io, base.io);
    }

    #[test]
    fn test_intensity_never_negative() {
        let state = LightState::derive(&LightSettings::default());
        // Steep slope facing away from the light.
        assert_eq!(state.intensity(-10.0, 10.0, -10.0, 10.0, 1.0), 0.0);
    }

    #[test]
    fn test_brightness_scales_result() {
        let state = LightState::derive(&LightSettings::default());
        let one = state.intensity(0.1, 0.0, 0.0, 0.2, 1.0);
        let two = state.intensity(0.1, 0.0, 0.0, 0.2, 2.0);
        assert!((two - 2.0 * one).abs() < 1e-12);
    }
}
