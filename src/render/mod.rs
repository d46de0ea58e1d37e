//! Turning noise maps into shaded color images.
//!
//! A [`GradientColor`] maps each noise value to a base color; the
//! [`ImageRenderer`] optionally treats the map as a bump map lit by a
//! single distant light and blends the result over a background.

mod gradient;
mod image_renderer;
mod light;

pub use gradient::{GradientColor, GradientPoint};
pub use image_renderer::{Background, ImageRenderer};
pub use light::{
    LightSettings, LightState, DEFAULT_LIGHT_AZIMUTH, DEFAULT_LIGHT_BRIGHTNESS,
    DEFAULT_LIGHT_CONTRAST, DEFAULT_LIGHT_ELEVATION, DEFAULT_LIGHT_INTENSITY,
};
