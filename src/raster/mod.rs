//! Two-dimensional buffers for noise values and colors.
//!
//! Both buffers share one contract: row-major storage, a stride rounded up
//! to a multiple of [`RASTER_STRIDE_BOUNDARY`] elements, and a border value
//! returned for any coordinate outside the buffer.

mod color;

use crate::error::NoiseError;

pub use color::{blend_channel, linear_interp_color, Color};

/// Row strides are rounded up to a multiple of this many elements.
pub const RASTER_STRIDE_BOUNDARY: usize = 4;
/// Maximum width of a raster, in elements.
pub const RASTER_MAX_WIDTH: usize = 32767;
/// Maximum height of a raster, in elements.
pub const RASTER_MAX_HEIGHT: usize = 32767;

/// A 2D array of noise values.
pub type NoiseMap = Raster<f32>;
/// A 2D array of colors.
pub type Image = Raster<Color>;

/// Returns the stride for a row of `width` elements.
#[inline]
pub fn calc_stride(width: usize) -> usize {
    width.div_ceil(RASTER_STRIDE_BOUNDARY) * RASTER_STRIDE_BOUNDARY
}

/// Row-major 2D buffer with a padded stride and a border value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Raster<T> {
    width: usize,
    height: usize,
    stride: usize,
    border_value: T,
    data: Vec<T>,
}

impl<T: Copy + Default> Raster<T> {
    /// Creates an empty raster.
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            stride: 0,
            border_value: T::default(),
            data: Vec::new(),
        }
    }

    /// Creates a raster of the given size.
    pub fn with_size(width: usize, height: usize) -> Result<Self, NoiseError> {
        let mut raster = Self::new();
        raster.set_size(width, height)?;
        Ok(raster)
    }

    /// Resizes the raster.
    ///
    /// Contents are unspecified afterwards until filled. A zero dimension
    /// empties the raster. The existing allocation is reused when it is large
    /// enough. Dimensions beyond the maximum fail with `InvalidParam` and
    /// leave the raster untouched; an allocation failure empties the raster
    /// and returns `OutOfMemory`.
    pub fn set_size(&mut self, width: usize, height: usize) -> Result<(), NoiseError> {
        if width > RASTER_MAX_WIDTH || height > RASTER_MAX_HEIGHT {
            return Err(NoiseError::invalid(format!(
                "raster size {}x{} exceeds {}x{}",
                width, height, RASTER_MAX_WIDTH, RASTER_MAX_HEIGHT
            )));
        }
        if width == 0 || height == 0 {
            self.reset();
            return Ok(());
        }

        let stride = calc_stride(width);
        let needed = stride * height;
        if self.data.len() < needed {
            self.reset();
            if self.data.try_reserve_exact(needed).is_err() {
                return Err(NoiseError::OutOfMemory);
            }
            self.data.resize(needed, T::default());
        }
        self.width = width;
        self.height = height;
        self.stride = stride;
        Ok(())
    }

    fn reset(&mut self) {
        self.data = Vec::new();
        self.width = 0;
        self.height = 0;
        self.stride = 0;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of elements between the starts of two consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of elements currently allocated.
    pub fn mem_used(&self) -> usize {
        self.data.len()
    }

    pub fn border_value(&self) -> T {
        self.border_value
    }

    pub fn set_border_value(&mut self, border_value: T) {
        self.border_value = border_value;
    }

    /// Buffer index of `(x, y)`, or `None` outside the raster.
    #[inline]
    fn index(&self, x: isize, y: isize) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| x + y * self.stride)
    }

    /// Returns the value at `(x, y)`, or the border value outside the raster,
    /// including negative coordinates.
    #[inline]
    pub fn value(&self, x: isize, y: isize) -> T {
        match self.index(x, y) {
            Some(i) => self.data[i],
            None => self.border_value,
        }
    }

    /// Sets the value at `(x, y)`; coordinates outside the raster are ignored.
    #[inline]
    pub fn set_value(&mut self, x: isize, y: isize, value: T) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = value;
        }
    }

    /// Returns the `width` values of row `y`, or `None` outside the raster.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        if y < self.height {
            let start = y * self.stride;
            Some(&self.data[start..start + self.width])
        } else {
            None
        }
    }

    /// Mutable form of [`Raster::row`].
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [T]> {
        if y < self.height {
            let start = y * self.stride;
            Some(&mut self.data[start..start + self.width])
        } else {
            None
        }
    }

    /// Iterates over the rows, each `width` elements long.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        let width = self.width;
        self.as_slice()
            .chunks(self.stride.max(1))
            .map(move |row| &row[..width])
    }

    /// The row-major buffer, `stride * height` elements including padding.
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.stride * self.height]
    }

    /// Mutable form of [`Raster::as_slice`].
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.stride * self.height;
        &mut self.data[..len]
    }

    /// Sets every in-bounds element to `value`.
    pub fn clear(&mut self, value: T) {
        let width = self.width;
        let stride = self.stride.max(1);
        for row in self.as_mut_slice().chunks_mut(stride) {
            row[..width].fill(value);
        }
    }

    /// Shrinks the allocation to the minimum the current size needs.
    pub fn reclaim_mem(&mut self) {
        let needed = self.stride * self.height;
        if self.data.len() > needed {
            self.data.truncate(needed);
            self.data.shrink_to_fit();
        }
    }

    /// Moves the contents of `source` into this raster, leaving `source`
    /// empty.
    pub fn take_ownership(&mut self, source: &mut Self) {
        *self = std::mem::replace(source, Self::new());
    }
}
