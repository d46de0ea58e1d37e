//! Renders noise maps into color images.

use std::time::Instant;

use rayon::prelude::*;

use super::gradient::GradientColor;
use super::light::{LightSettings, LightState};
use crate::error::NoiseError;
use crate::noise::linear_interp;
use crate::raster::{Color, Image, NoiseMap};

/// Stops of the built-in terrain gradient: deep water through snow.
const TERRAIN_GRADIENT: [(f64, Color); 9] = [
    (-1.00, Color::rgba(0, 0, 128, 255)),
    (-0.20, Color::rgba(32, 64, 128, 255)),
    (-0.04, Color::rgba(64, 96, 192, 255)),
    (-0.02, Color::rgba(192, 192, 128, 255)),
    (0.00, Color::rgba(0, 192, 0, 255)),
    (0.25, Color::rgba(192, 192, 0, 255)),
    (0.50, Color::rgba(160, 96, 64, 255)),
    (0.75, Color::rgba(128, 255, 255, 255)),
    (1.00, Color::rgba(255, 255, 255, 255)),
];

const GRAYSCALE_GRADIENT: [(f64, Color); 2] = [(-1.0, Color::BLACK), (1.0, Color::WHITE)];

/// What the rendered colors are blended over.
#[derive(Debug, Clone, Copy, Default)]
pub enum Background<'a> {
    /// Opaque white.
    #[default]
    None,
    /// A separate image with the same size as the source map.
    Image(&'a Image),
    /// The destination image's own current contents. The destination is not
    /// resized and must already match the source map's size.
    Destination,
}

/// Maps noise values to colors through a [`GradientColor`], with optional
/// bump-mapped lighting.
///
/// Defaults: grayscale gradient, lighting and wrapping disabled, light from
/// 45° azimuth and 45° elevation, contrast/brightness/intensity 1, white
/// light.
pub struct ImageRenderer<'a> {
    source: Option<&'a NoiseMap>,
    dest: Option<&'a mut Image>,
    background: Background<'a>,
    gradient: GradientColor,
    light_enabled: bool,
    wrap_enabled: bool,
    light: LightSettings,
    light_state: LightState,
}

impl<'a> Default for ImageRenderer<'a> {
    fn default() -> Self {
        let light = LightSettings::default();
        let mut renderer = Self {
            source: None,
            dest: None,
            background: Background::None,
            gradient: GradientColor::new(),
            light_enabled: false,
            wrap_enabled: false,
            light,
            light_state: LightState::derive(&light),
        };
        renderer.build_grayscale_gradient();
        renderer
    }
}

impl<'a> ImageRenderer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_source_noise_map(&mut self, map: &'a NoiseMap) {
        self.source = Some(map);
    }

    pub fn set_dest_image(&mut self, image: &'a mut Image) {
        self.dest = Some(image);
    }

    /// Blends rendered colors over `image`, which must match the source size.
    pub fn set_background_image(&mut self, image: &'a Image) {
        self.background = Background::Image(image);
    }

    pub fn set_background(&mut self, background: Background<'a>) {
        self.background = background;
    }

    pub fn background(&self) -> Background<'a> {
        self.background
    }

    /// The destination image, for reading results back.
    pub fn dest_image(&self) -> Option<&Image> {
        self.dest.as_deref()
    }

    // Gradient

    pub fn gradient(&self) -> &GradientColor {
        &self.gradient
    }

    pub fn add_gradient_point(&mut self, pos: f64, color: Color) -> Result<(), NoiseError> {
        self.gradient.add_gradient_point(pos, color)
    }

    pub fn clear_gradient(&mut self) {
        self.gradient.clear();
    }

    /// Replaces the gradient with black at -1 to white at +1.
    pub fn build_grayscale_gradient(&mut self) {
        self.gradient = GradientColor::from_sorted(&GRAYSCALE_GRADIENT);
    }

    /// Replaces the gradient with a water/land/snow terrain ramp.
    pub fn build_terrain_gradient(&mut self) {
        self.gradient = GradientColor::from_sorted(&TERRAIN_GRADIENT);
    }

    // Lighting

    pub fn enable_light(&mut self, enable: bool) {
        self.light_enabled = enable;
    }

    pub fn is_light_enabled(&self) -> bool {
        self.light_enabled
    }

    /// Wrap neighbour lookups around the map edges instead of clamping.
    pub fn enable_wrap(&mut self, enable: bool) {
        self.wrap_enabled = enable;
    }

    pub fn is_wrap_enabled(&self) -> bool {
        self.wrap_enabled
    }

    pub fn light_settings(&self) -> LightSettings {
        self.light
    }

    /// Replaces every light parameter at once, validating contrast and
    /// intensity like the individual setters.
    pub fn set_light_settings(&mut self, settings: LightSettings) -> Result<(), NoiseError> {
        check_contrast(settings.contrast)?;
        check_intensity(settings.intensity)?;
        self.light = settings;
        self.light_state = LightState::derive(&self.light);
        Ok(())
    }

    pub fn light_azimuth(&self) -> f64 {
        self.light.azimuth
    }

    pub fn set_light_azimuth(&mut self, azimuth: f64) {
        self.light.azimuth = azimuth;
        self.light_state = LightState::derive(&self.light);
    }

    pub fn light_elevation(&self) -> f64 {
        self.light.elevation
    }

    pub fn set_light_elevation(&mut self, elevation: f64) {
        self.light.elevation = elevation;
        self.light_state = LightState::derive(&self.light);
    }

    pub fn light_contrast(&self) -> f64 {
        self.light.contrast
    }

    /// Fails with `InvalidParam` unless `contrast > 0`.
    pub fn set_light_contrast(&mut self, contrast: f64) -> Result<(), NoiseError> {
        check_contrast(contrast)?;
        self.light.contrast = contrast;
        self.light_state = LightState::derive(&self.light);
        Ok(())
    }

    pub fn light_brightness(&self) -> f64 {
        self.light.brightness
    }

    pub fn set_light_brightness(&mut self, brightness: f64) {
        self.light.brightness = brightness;
    }

    pub fn light_intensity(&self) -> f64 {
        self.light.intensity
    }

    /// Fails with `InvalidParam` if `intensity < 0`.
    pub fn set_light_intensity(&mut self, intensity: f64) -> Result<(), NoiseError> {
        check_intensity(intensity)?;
        self.light.intensity = intensity;
        Ok(())
    }

    pub fn light_color(&self) -> Color {
        self.light.color
    }

    pub fn set_light_color(&mut self, color: Color) {
        self.light.color = color;
    }

    fn validate(&self) -> Result<(&'a NoiseMap, usize, usize), NoiseError> {
        let source = self
            .source
            .ok_or_else(|| NoiseError::invalid("no source noise map set"))?;
        let (width, height) = (source.width(), source.height());
        if width == 0 || height == 0 {
            return Err(NoiseError::invalid("source noise map is empty"));
        }
        let dest = self
            .dest
            .as_deref()
            .ok_or_else(|| NoiseError::invalid("no destination image set"))?;
        if self.gradient.gradient_point_count() < 2 {
            return Err(NoiseError::invalid(format!(
                "gradient needs at least 2 points, has {}",
                self.gradient.gradient_point_count()
            )));
        }
        let background_size = match self.background {
            Background::None => None,
            Background::Image(image) => Some((image.width(), image.height())),
            Background::Destination => Some((dest.width(), dest.height())),
        };
        if let Some((bg_width, bg_height)) = background_size {
            if (bg_width, bg_height) != (width, height) {
                return Err(NoiseError::invalid(format!(
                    "background is {}x{} but the source map is {}x{}",
                    bg_width, bg_height, width, height
                )));
            }
        }
        Ok((source, width, height))
    }

    /// Renders the source map into the destination image.
    ///
    /// Fails with `InvalidParam`, leaving the destination untouched, if the
    /// source or destination is missing, the source is empty, the gradient
    /// has fewer than two points, or the background size differs from the
    /// source. Otherwise the destination is resized (unless it is the
    /// background) and every pixel is overwritten.
    pub fn render(&mut self) -> Result<(), NoiseError> {
        let (source, width, height) = self.validate()?;
        let start = Instant::now();

        let background = self.background;
        let gradient = &self.gradient;
        let light = self.light;
        let light_state = self.light_state;
        let light_enabled = self.light_enabled;
        let wrap = self.wrap_enabled;

        let dest = self
            .dest
            .as_deref_mut()
            .ok_or_else(|| NoiseError::invalid("no destination image set"))?;
        if !matches!(background, Background::Destination) {
            dest.set_size(width, height)?;
        }
        let stride = dest.stride();

        dest.as_mut_slice()
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| {
                let at = |x: usize, y: usize| source.value(x as isize, y as isize) as f64;
                for (x, pixel) in row[..width].iter_mut().enumerate() {
                    let value = at(x, y);
                    let source_color = gradient.interpolate(value);

                    let intensity = if light_enabled {
                        let (left, right) = neighbours(x, width, wrap);
                        let (down, up) = neighbours(y, height, wrap);
                        light_state.intensity(
                            at(left, y),
                            at(right, y),
                            at(x, down),
                            at(x, up),
                            light.brightness,
                        )
                    } else {
                        1.0
                    };

                    let background_color = match background {
                        Background::None => Color::WHITE,
                        Background::Image(image) => image.value(x as isize, y as isize),
                        Background::Destination => *pixel,
                    };

                    *pixel = dest_color(
                        source_color,
                        background_color,
                        light_enabled.then_some((intensity, light.color)),
                    );
                }
            });

        log::debug!(
            "rendered {}x{} image in {:.2?}",
            width,
            height,
            start.elapsed()
        );
        Ok(())
    }
}

fn check_contrast(contrast: f64) -> Result<(), NoiseError> {
    if !(contrast > 0.0) {
        return Err(NoiseError::invalid(format!(
            "light contrast {} must be positive",
            contrast
        )));
    }
    Ok(())
}

fn check_intensity(intensity: f64) -> Result<(), NoiseError> {
    if !(intensity >= 0.0) {
        return Err(NoiseError::invalid(format!(
            "light intensity {} must not be negative",
            intensity
        )));
    }
    Ok(())
}

/// Indices of the previous and next element along an axis of `len`.
#[inline]
fn neighbours(i: usize, len: usize, wrap: bool) -> (usize, usize) {
    if wrap {
        ((i + len - 1) % len, (i + 1) % len)
    } else {
        (i.saturating_sub(1), (i + 1).min(len - 1))
    }
}

/// Blends `source` over `background` by the source alpha, then applies the
/// light.
fn dest_color(source: Color, background: Color, light: Option<(f64, Color)>) -> Color {
    let channel = |c: u8| c as f64 / 255.0;
    let source_alpha = channel(source.alpha);

    let mut rgb = [
        linear_interp(channel(background.red), channel(source.red), source_alpha),
        linear_interp(channel(background.green), channel(source.green), source_alpha),
        linear_interp(channel(background.blue), channel(source.blue), source_alpha),
    ];

    if let Some((intensity, color)) = light {
        rgb[0] *= intensity * channel(color.red);
        rgb[1] *= intensity * channel(color.green);
        rgb[2] *= intensity * channel(color.blue);
    }

    let [red, green, blue] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8);
    Color {
        red,
        green,
        blue,
        alpha: source.alpha.max(background.alpha),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_map(width: usize, height: usize, value: f32) -> NoiseMap {
        let mut map = NoiseMap::with_size(width, height).unwrap();
        map.clear(value);
        map
    }

    fn filled_image(width: usize, height: usize, color: Color) -> Image {
        let mut image = Image::with_size(width, height).unwrap();
        image.clear(color);
        image
    }

    #[test]
    fn test_defaults() {
        let renderer = ImageRenderer::new();
        assert!(!renderer.is_light_enabled());
        assert!(!renderer.is_wrap_enabled());
        assert_eq!(renderer.light_azimuth(), 45.0);
        assert_eq!(renderer.light_elevation(), 45.0);
        assert_eq!(renderer.light_contrast(), 1.0);
        assert_eq!(renderer.light_brightness(), 1.0);
        assert_eq!(renderer.light_intensity(), 1.0);
        assert_eq!(renderer.light_color(), Color::WHITE);
        assert_eq!(renderer.gradient().gradient_point_count(), 2);
        assert!(matches!(renderer.background(), Background::None));
    }

    #[test]
    fn test_grayscale_render() {
        let map = flat_map(5, 3, 0.0);
        let mut image = Image::new();
        {
            let mut renderer = ImageRenderer::new();
            renderer.set_source_noise_map(&map);
            renderer.set_dest_image(&mut image);
            renderer.render().unwrap();
        }
        assert_eq!((image.width(), image.height()), (5, 3));
        assert!(image
            .rows()
            .flatten()
            .all(|&c| c == Color::rgba(127, 127, 127, 255)));
    }

    #[test]
    fn test_terrain_gradient_endpoints() {
        let mut renderer = ImageRenderer::new();
        renderer.build_terrain_gradient();
        let gradient = renderer.gradient();
        assert_eq!(gradient.gradient_point_count(), 9);
        assert_eq!(gradient.color(-2.0).unwrap(), Color::rgba(0, 0, 128, 255));
        assert_eq!(gradient.color(0.0).unwrap(), Color::rgba(0, 192, 0, 255));
        assert_eq!(gradient.color(2.0).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_builtin_gradients_are_strictly_sorted() {
        for table in [&GRAYSCALE_GRADIENT[..], &TERRAIN_GRADIENT[..]] {
            assert!(table.windows(2).all(|pair| pair[0].0 < pair[1].0));
            let expected = GradientColor::from_points(table).unwrap();
            assert_eq!(GradientColor::from_sorted(table), expected);
        }

        let mut renderer = ImageRenderer::new();
        renderer.build_terrain_gradient();
        assert_eq!(
            renderer.gradient(),
            &GradientColor::from_points(&TERRAIN_GRADIENT).unwrap()
        );
    }

    #[test]
    fn test_validation_leaves_dest_untouched() {
        let marker = Color::rgba(1, 2, 3, 4);
        let map = flat_map(4, 4, 0.0);
        let empty = NoiseMap::new();
        let small_bg = filled_image(2, 2, Color::BLACK);
        let mut image = filled_image(3, 3, marker);
        {
            let mut renderer = ImageRenderer::new();
            renderer.set_dest_image(&mut image);
            assert!(matches!(renderer.render(), Err(NoiseError::InvalidParam(_))));

            renderer.set_source_noise_map(&empty);
            assert!(renderer.render().is_err());

            renderer.set_source_noise_map(&map);
            renderer.set_background_image(&small_bg);
            assert!(renderer.render().is_err());

            renderer.set_background(Background::Destination);
            assert!(renderer.render().is_err());

            renderer.set_background(Background::None);
            renderer.clear_gradient();
            renderer.add_gradient_point(0.0, Color::WHITE).unwrap();
            assert!(renderer.render().is_err());
        }
        assert_eq!((image.width(), image.height()), (3, 3));
        assert!(image.rows().flatten().all(|&c| c == marker));
    }

    #[test]
    fn test_missing_dest_fails() {
        let map = flat_map(2, 2, 0.0);
        let mut renderer = ImageRenderer::new();
        renderer.set_source_noise_map(&map);
        assert!(matches!(renderer.render(), Err(NoiseError::InvalidParam(_))));
    }

    #[test]
    fn test_flat_lit_surface() {
        let map = flat_map(4, 4, 1.0);
        let mut image = Image::new();
        {
            let mut renderer = ImageRenderer::new();
            renderer.set_source_noise_map(&map);
            renderer.set_dest_image(&mut image);
            renderer.enable_light(true);
            renderer.render().unwrap();
        }
        // Flat terrain only receives the ambient term, 0.5 at 45° elevation.
        assert!(image
            .rows()
            .flatten()
            .all(|&c| c == Color::rgba(127, 127, 127, 255)));
    }

    #[test]
    fn test_light_color_tints() {
        let map = flat_map(2, 2, 1.0);
        let mut image = Image::new();
        {
            let mut renderer = ImageRenderer::new();
            renderer.set_source_noise_map(&map);
            renderer.set_dest_image(&mut image);
            renderer.enable_light(true);
            renderer.set_light_elevation(90.0);
            renderer.set_light_brightness(2.0);
            renderer.set_light_color(Color::rgba(255, 0, 0, 255));
            renderer.render().unwrap();
        }
        // io = sqrt(2)/2 at 90°, doubled by brightness, then clamped.
        assert_eq!(image.value(0, 0), Color::rgba(255, 0, 0, 255));
    }

    #[test]
    fn test_wrap_changes_edge_lighting() {
        let mut map = NoiseMap::with_size(4, 1).unwrap();
        map.set_value(3, 0, 1.0);

        let render = |wrap: bool| {
            let mut image = Image::new();
            {
                let mut renderer = ImageRenderer::new();
                renderer.set_source_noise_map(&map);
                renderer.set_dest_image(&mut image);
                renderer.enable_light(true);
                renderer.enable_wrap(wrap);
                renderer.render().unwrap();
            }
            image.value(0, 0)
        };

        // Clamped: both neighbours of x=0 are flat, ambient only.
        assert_eq!(render(false).red, 63);
        // Wrapped: the left neighbour is the raised x=3 column.
        assert_eq!(render(true).red, 108);
    }

    #[test]
    fn test_neighbours() {
        assert_eq!(neighbours(0, 4, false), (0, 1));
        assert_eq!(neighbours(3, 4, false), (2, 3));
        assert_eq!(neighbours(0, 4, true), (3, 1));
        assert_eq!(neighbours(3, 4, true), (2, 0));
        assert_eq!(neighbours(0, 1, false), (0, 0));
        assert_eq!(neighbours(0, 1, true), (0, 0));
    }

    #[test]
    fn test_transparent_gradient_shows_background() {
        let map = flat_map(3, 2, 0.0);
        let background = filled_image(3, 2, Color::rgba(200, 10, 20, 255));
        let mut image = Image::new();
        {
            let mut renderer = ImageRenderer::new();
            renderer.clear_gradient();
            renderer.add_gradient_point(-1.0, Color::TRANSPARENT).unwrap();
            renderer.add_gradient_point(1.0, Color::TRANSPARENT).unwrap();
            renderer.set_source_noise_map(&map);
            renderer.set_background_image(&background);
            renderer.set_dest_image(&mut image);
            renderer.render().unwrap();
        }
        assert!(image
            .rows()
            .flatten()
            .all(|&c| c == Color::rgba(200, 10, 20, 255)));
    }

    #[test]
    fn test_no_background_blends_over_white() {
        let map = flat_map(1, 1, 0.0);
        let mut image = Image::new();
        {
            let mut renderer = ImageRenderer::new();
            renderer.clear_gradient();
            renderer.add_gradient_point(-1.0, Color::TRANSPARENT).unwrap();
            renderer.add_gradient_point(1.0, Color::TRANSPARENT).unwrap();
            renderer.set_source_noise_map(&map);
            renderer.set_dest_image(&mut image);
            renderer.render().unwrap();
        }
        assert_eq!(image.value(0, 0), Color::WHITE);
    }

    #[test]
    fn test_alpha_is_max_of_inputs() {
        assert_eq!(
            dest_color(Color::rgba(0, 0, 0, 255), Color::rgba(0, 0, 0, 0), None).alpha,
            255
        );
        assert_eq!(
            dest_color(Color::rgba(0, 0, 0, 10), Color::rgba(0, 0, 0, 90), None).alpha,
            90
        );
    }

    #[test]
    fn test_destination_as_background() {
        let map = flat_map(2, 2, 0.0);
        let mut image = filled_image(2, 2, Color::rgba(40, 50, 60, 255));
        {
            let mut renderer = ImageRenderer::new();
            renderer.clear_gradient();
            renderer.add_gradient_point(-1.0, Color::TRANSPARENT).unwrap();
            renderer.add_gradient_point(1.0, Color::TRANSPARENT).unwrap();
            renderer.set_source_noise_map(&map);
            renderer.set_background(Background::Destination);
            renderer.set_dest_image(&mut image);
            renderer.render().unwrap();
        }
        assert!(image
            .rows()
            .flatten()
            .all(|&c| c == Color::rgba(40, 50, 60, 255)));
    }

    #[test]
    fn test_invalid_light_params_rejected() {
        let mut renderer = ImageRenderer::new();
        assert!(matches!(renderer.set_light_contrast(0.0), Err(NoiseError::InvalidParam(_))));
        assert!(renderer.set_light_contrast(-1.0).is_err());
        assert!(renderer.set_light_intensity(-0.5).is_err());
        assert_eq!(renderer.light_contrast(), 1.0);
        assert_eq!(renderer.light_intensity(), 1.0);

        renderer.set_light_intensity(0.0).unwrap();
        renderer.set_light_contrast(3.0).unwrap();
        assert_eq!(renderer.light_contrast(), 3.0);

        let bad = LightSettings {
            contrast: 0.0,
            ..Default::default()
        };
        assert!(renderer.set_light_settings(bad).is_err());
        assert_eq!(renderer.light_settings().contrast, 3.0);
    }

    #[test]
    fn test_setters_refresh_light_state() {
        let mut renderer = ImageRenderer::new();
        renderer.set_light_azimuth(90.0);
        renderer.set_light_contrast(2.0).unwrap();
        let expected = LightState::derive(&LightSettings {
            azimuth: 90.0,
            contrast: 2.0,
            ..Default::default()
        });
        assert_eq!(renderer.light_state, expected);
    }
}
