//! Four-channel 8-bit colors.

use serde::{Deserialize, Serialize};

/// An RGBA color with one byte per channel.
///
/// Alpha 0 is fully transparent, 255 fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Creates a color, clamping each channel to `0..=255`.
    pub fn new(red: i32, green: i32, blue: i32, alpha: i32) -> Self {
        let clamp = |c: i32| c.clamp(0, 255) as u8;
        Self {
            red: clamp(red),
            green: clamp(green),
            blue: clamp(blue),
            alpha: clamp(alpha),
        }
    }

    /// Creates a color from raw channel bytes.
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

/// Linearly interpolates one 8-bit channel; the result is truncated.
#[inline]
pub fn blend_channel(channel0: u8, channel1: u8, alpha: f32) -> u8 {
    let c0 = channel0 as f32 / 255.0;
    let c1 = channel1 as f32 / 255.0;
    (((c1 * alpha) + (c0 * (1.0 - alpha))) * 255.0) as u8
}

/// Linearly interpolates every channel of two colors.
pub fn linear_interp_color(color0: Color, color1: Color, alpha: f32) -> Color {
    Color {
        red: blend_channel(color0.red, color1.red, alpha),
        green: blend_channel(color0.green, color1.green, alpha),
        blue: blend_channel(color0.blue, color1.blue, alpha),
        alpha: blend_channel(color0.alpha, color1.alpha, alpha),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_channels() {
        let c = Color::new(-20, 300, 128, 1000);
        assert_eq!(c, Color::rgba(0, 255, 128, 255));
    }

    #[test]
    fn test_blend_channel_endpoints() {
        assert_eq!(blend_channel(10, 200, 0.0), 10);
        assert_eq!(blend_channel(10, 200, 1.0), 200);
        assert_eq!(blend_channel(0, 255, 0.5), 127);
    }

    #[test]
    fn test_linear_interp_color_midpoint() {
        let c = linear_interp_color(Color::BLACK, Color::WHITE, 0.5);
        for channel in [c.red, c.green, c.blue] {
            assert!((127..=128).contains(&channel));
        }
        assert_eq!(c.alpha, 255);
    }
}
