//! RAW export of noise maps for game engines and height-field tools.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::raster::NoiseMap;

/// Errors that can occur during RAW export.
#[derive(Error, Debug)]
pub enum RawExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid value range: min ({0}) >= max ({1})")]
    InvalidValueRange(f32, f32),
    #[error("Cannot export an empty noise map")]
    EmptyRaster,
}

/// RAW export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawFormat {
    /// 16-bit unsigned integer, little-endian.
    #[default]
    R16LittleEndian,
    /// 16-bit unsigned integer, big-endian.
    R16BigEndian,
    /// 32-bit float, little-endian. Values are written unscaled.
    R32Float,
}

impl RawFormat {
    pub fn bytes_per_sample(self) -> u64 {
        match self {
            RawFormat::R16LittleEndian | RawFormat::R16BigEndian => 2,
            RawFormat::R32Float => 4,
        }
    }
}

/// Writes the map's `width * height` values row by row, without padding.
///
/// The R16 formats map `[min_value, max_value]` to `[0, 65535]` and clamp;
/// the range is ignored for `R32Float`.
pub fn write_noise_map_raw(
    map: &NoiseMap,
    path: &Path,
    format: RawFormat,
    min_value: f32,
    max_value: f32,
) -> Result<(), RawExportError> {
    if format != RawFormat::R32Float && !(min_value < max_value) {
        return Err(RawExportError::InvalidValueRange(min_value, max_value));
    }
    if map.width() == 0 || map.height() == 0 {
        return Err(RawExportError::EmptyRaster);
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let range = max_value - min_value;
    let to_u16 = |v: f32| (((v - min_value) / range).clamp(0.0, 1.0) * 65535.0) as u16;

    for &value in map.rows().flatten() {
        match format {
            RawFormat::R16LittleEndian => writer.write_all(&to_u16(value).to_le_bytes())?,
            RawFormat::R16BigEndian => writer.write_all(&to_u16(value).to_be_bytes())?,
            RawFormat::R32Float => writer.write_all(&value.to_le_bytes())?,
        }
    }

    writer.flush()?;
    Ok(())
}

/// Returns the expected file size for a RAW export.
pub fn expected_file_size(width: usize, height: usize, format: RawFormat) -> u64 {
    (width as u64) * (height as u64) * format.bytes_per_sample()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ramp(width: usize, height: usize) -> NoiseMap {
        let mut map = NoiseMap::with_size(width, height).unwrap();
        let count = (width * height) as f32;
        for y in 0..height {
            for x in 0..width {
                map.set_value(x as isize, y as isize, (x + y * width) as f32 / count * 2.0 - 1.0);
            }
        }
        map
    }

    #[test]
    fn test_raw_r16_size_skips_padding() {
        // Width 5 has stride 8; padding must not reach the file.
        let map = ramp(5, 7);
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.raw");

        write_noise_map_raw(&map, &path, RawFormat::R16LittleEndian, -1.0, 1.0).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert_eq!(metadata.len(), expected_file_size(5, 7, RawFormat::R16LittleEndian));
        assert_eq!(metadata.len(), 70);
    }

    #[test]
    fn test_raw_r32_roundtrips_values() {
        let map = ramp(3, 2);
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.raw");

        write_noise_map_raw(&map, &path, RawFormat::R32Float, 0.0, 0.0).unwrap();

        let data = std::fs::read(&path).unwrap();
        assert_eq!(data.len() as u64, expected_file_size(3, 2, RawFormat::R32Float));
        let last = f32::from_le_bytes([data[20], data[21], data[22], data[23]]);
        assert_eq!(last, map.value(2, 1));
    }

    #[test]
    fn test_raw_content_correctness() {
        let mut map = NoiseMap::with_size(2, 2).unwrap();
        map.set_value(0, 0, -1.0);
        map.set_value(1, 0, 0.0);
        map.set_value(0, 1, 0.5);
        map.set_value(1, 1, 1.0);

        let dir = tempdir().unwrap();
        let le_path = dir.path().join("le.raw");
        let be_path = dir.path().join("be.raw");
        write_noise_map_raw(&map, &le_path, RawFormat::R16LittleEndian, -1.0, 1.0).unwrap();
        write_noise_map_raw(&map, &be_path, RawFormat::R16BigEndian, -1.0, 1.0).unwrap();

        let le = std::fs::read(&le_path).unwrap();
        let be = std::fs::read(&be_path).unwrap();
        assert_eq!(le.len(), 8);

        assert_eq!(u16::from_le_bytes([le[0], le[1]]), 0);
        assert!((u16::from_le_bytes([le[2], le[3]]) as i32 - 32767).abs() < 2);
        assert_eq!(u16::from_le_bytes([le[6], le[7]]), 65535);
        for i in 0..4 {
            assert_eq!(
                u16::from_le_bytes([le[2 * i], le[2 * i + 1]]),
                u16::from_be_bytes([be[2 * i], be[2 * i + 1]])
            );
        }
    }

    #[test]
    fn test_invalid_range_and_empty_map() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.raw");
        let result = write_noise_map_raw(&ramp(2, 2), &path, RawFormat::R16BigEndian, 1.0, -1.0);
        assert!(matches!(result, Err(RawExportError::InvalidValueRange(_, _))));

        let result = write_noise_map_raw(&NoiseMap::new(), &path, RawFormat::R32Float, 0.0, 1.0);
        assert!(matches!(result, Err(RawExportError::EmptyRaster)));
    }

    #[test]
    fn test_expected_file_size() {
        assert_eq!(expected_file_size(256, 128, RawFormat::R16LittleEndian), 256 * 128 * 2);
        assert_eq!(expected_file_size(256, 128, RawFormat::R32Float), 256 * 128 * 4);
    }
}
