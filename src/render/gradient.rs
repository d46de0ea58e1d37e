//! Piecewise-linear color gradients.

use crate::error::NoiseError;
use crate::raster::{linear_interp_color, Color};

/// A `(position, color)` anchor of a [`GradientColor`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GradientPoint {
    pub pos: f64,
    pub color: Color,
}

/// Color ramp over a 1D parameter, kept sorted by position.
///
/// Positions outside the table clamp to the nearest endpoint's color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradientColor {
    points: Vec<GradientPoint>,
}

impl GradientColor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a gradient from `(position, color)` pairs given in any order.
    pub fn from_points(points: &[(f64, Color)]) -> Result<Self, NoiseError> {
        let mut gradient = Self::new();
        for &(pos, color) in points {
            gradient.add_gradient_point(pos, color)?;
        }
        Ok(gradient)
    }

    /// Builds a gradient from points whose positions strictly increase.
    pub(crate) fn from_sorted(points: &[(f64, Color)]) -> Self {
        debug_assert!(points.windows(2).all(|pair| pair[0].0 < pair[1].0));
        Self {
            points: points
                .iter()
                .map(|&(pos, color)| GradientPoint { pos, color })
                .collect(),
        }
    }

    /// Inserts a point, keeping the table sorted by position.
    ///
    /// Fails with `InvalidParam` if `pos` is NaN or already present; the
    /// table is unchanged on failure.
    pub fn add_gradient_point(&mut self, pos: f64, color: Color) -> Result<(), NoiseError> {
        if pos.is_nan() {
            return Err(NoiseError::invalid("gradient position is NaN"));
        }
        let index = self.points.partition_point(|p| p.pos < pos);
        if self.points.get(index).is_some_and(|p| p.pos == pos) {
            return Err(NoiseError::invalid(format!(
                "gradient already has a point at {}",
                pos
            )));
        }
        self.points.insert(index, GradientPoint { pos, color });
        Ok(())
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn gradient_points(&self) -> &[GradientPoint] {
        &self.points
    }

    pub fn gradient_point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns the color at `pos`.
    ///
    /// Fails with `InvalidParam` while the table has fewer than two points.
    pub fn color(&self, pos: f64) -> Result<Color, NoiseError> {
        if self.points.len() < 2 {
            return Err(NoiseError::invalid(format!(
                "gradient needs at least 2 points, has {}",
                self.points.len()
            )));
        }
        Ok(self.interpolate(pos))
    }

    /// Lookup without the point-count check. An empty table yields the
    /// default color.
    pub(crate) fn interpolate(&self, pos: f64) -> Color {
        let last = match self.points.len() {
            0 => return Color::default(),
            n => n - 1,
        };

        // First point strictly greater than `pos`.
        let upper = self.points.partition_point(|p| p.pos <= pos);
        let index0 = upper.saturating_sub(1).min(last);
        let index1 = upper.min(last);
        if index0 == index1 {
            return self.points[index1].color;
        }

        let p0 = self.points[index0];
        let p1 = self.points[index1];
        let alpha = (pos - p0.pos) / (p1.pos - p0.pos);
        linear_interp_color(p0.color, p1.color, alpha as f32)
    }
}
