//! PNG export for rendered images and noise maps.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma, Rgba};
use thiserror::Error;

use crate::raster::{Image, NoiseMap};

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid value range: min ({0}) >= max ({1})")]
    InvalidValueRange(f32, f32),
    #[error("Cannot export an empty raster")]
    EmptyRaster,
    #[error("Raster of {0}x{1} exceeds PNG dimensions")]
    TooLarge(usize, usize),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// Noise value mapped to 0.
    pub min_value: f32,
    /// Noise value mapped to 65535.
    pub max_value: f32,
    pub compression: CompressionType,
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            min_value: -1.0,
            max_value: 1.0,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngExportOptions {
    /// Options covering the actual value range of `map`.
    ///
    /// A constant map gets a unit-wide range so export still succeeds.
    pub fn auto_range(map: &NoiseMap) -> Self {
        let (min, max) = value_range(map);
        let max = if max > min { max } else { min + 1.0 };
        Self {
            min_value: min,
            max_value: max,
            ..Default::default()
        }
    }
}

/// Smallest and largest value in the map, ignoring padding.
pub fn value_range(map: &NoiseMap) -> (f32, f32) {
    map.rows()
        .flatten()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

fn png_dimensions(width: usize, height: usize) -> Result<(u32, u32), PngExportError> {
    if width == 0 || height == 0 {
        return Err(PngExportError::EmptyRaster);
    }
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(PngExportError::TooLarge(width, height)),
    }
}

/// Writes an image as an 8-bit RGBA PNG.
pub fn write_image_png(image: &Image, path: &Path) -> Result<(), PngExportError> {
    let (width, height) = png_dimensions(image.width(), image.height())?;

    let mut img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::new(width, height);
    for (y, row) in image.rows().enumerate() {
        for (x, color) in row.iter().enumerate() {
            img.put_pixel(x as u32, y as u32, Rgba(color.to_array()));
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
    encoder.write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)?;

    Ok(())
}

/// Writes a noise map as a 16-bit grayscale PNG.
///
/// Values are mapped linearly from `[min_value, max_value]` to
/// `[0, 65535]` and clamped.
pub fn write_noise_map_png16(
    map: &NoiseMap,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let min = options.min_value;
    let max = options.max_value;
    if !(min < max) {
        return Err(PngExportError::InvalidValueRange(min, max));
    }
    let (width, height) = png_dimensions(map.width(), map.height())?;

    let range = max - min;
    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(width, height);
    for (y, row) in map.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            let normalized = ((v - min) / range).clamp(0.0, 1.0);
            img.put_pixel(x as u32, y as u32, Luma([(normalized * 65535.0) as u16]));
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(byte_slice, width, height, image::ExtendedColorType::L16)?;

    Ok(())
}
