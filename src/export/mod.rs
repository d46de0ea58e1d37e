//! Export of noise maps and rendered images to files.
//!
//! Supports 8-bit RGBA PNG for rendered images, 16-bit grayscale PNG for
//! noise maps, and RAW formats for game engine imports. Writers only read
//! the width, height and row-major values of a raster.

mod png;
mod raw;

pub use png::{
    value_range, write_image_png, write_noise_map_png16, PngExportError, PngExportOptions,
};
pub use raw::{expected_file_size, write_noise_map_raw, RawExportError, RawFormat};
