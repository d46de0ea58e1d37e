//! Noisemap CLI - build and render coherent-noise maps.
//!
//! Generates Perlin noise over a plane or a sphere, renders it through a
//! color gradient with optional lighting, and writes PNG/RAW output.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Instant;

use noisemap::builder::{NoiseMapBuilder, PlaneMapBuilder, SphereMapBuilder};
use noisemap::export::{
    expected_file_size, write_image_png, write_noise_map_png16, write_noise_map_raw,
    PngExportOptions, RawFormat,
};
use noisemap::module::{Module, NoiseModule, Perlin, PerlinConfig};
use noisemap::noise::NoiseQuality;
use noisemap::raster::{Image, NoiseMap};
use noisemap::render::{ImageRenderer, LightSettings};

/// Coherent noise map builder and renderer.
#[derive(Parser)]
#[command(name = "noisemap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a noise map from a rectangle of the y = 0 plane.
    Plane {
        #[arg(long, default_value = "2.0", allow_hyphen_values = true)]
        lower_x: f64,
        #[arg(long, default_value = "6.0", allow_hyphen_values = true)]
        upper_x: f64,
        #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
        lower_z: f64,
        #[arg(long, default_value = "5.0", allow_hyphen_values = true)]
        upper_z: f64,

        /// Blend the edges so the output tiles seamlessly.
        #[arg(long)]
        seamless: bool,

        #[command(flatten)]
        noise: NoiseArgs,
        #[command(flatten)]
        render: RenderArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build an equirectangular noise map from the surface of a sphere.
    Sphere {
        /// Southern latitude bound in degrees.
        #[arg(long, default_value = "-90.0", allow_hyphen_values = true)]
        south: f64,
        /// Northern latitude bound in degrees.
        #[arg(long, default_value = "90.0", allow_hyphen_values = true)]
        north: f64,
        /// Western longitude bound in degrees.
        #[arg(long, default_value = "-180.0", allow_hyphen_values = true)]
        west: f64,
        /// Eastern longitude bound in degrees.
        #[arg(long, default_value = "180.0", allow_hyphen_values = true)]
        east: f64,

        #[command(flatten)]
        noise: NoiseArgs,
        #[command(flatten)]
        render: RenderArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the generator value at a single point.
    Sample {
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
        #[arg(allow_hyphen_values = true)]
        z: f64,

        #[command(flatten)]
        noise: NoiseArgs,
    },
}

/// Perlin generator parameters.
#[derive(Args)]
struct NoiseArgs {
    /// Frequency of the first octave.
    #[arg(long, default_value = "1.0")]
    frequency: f64,

    /// Frequency multiplier between successive octaves.
    #[arg(long, default_value = "2.0")]
    lacunarity: f64,

    /// Number of octaves (1-30).
    #[arg(long, default_value = "6")]
    octaves: u32,

    /// Amplitude multiplier between successive octaves.
    #[arg(long, default_value = "0.5")]
    persistence: f64,

    /// Seed of the first octave.
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    seed: i32,

    /// Interpolation quality.
    #[arg(long, default_value = "standard")]
    quality: QualityArg,
}

impl NoiseArgs {
    fn config(&self) -> PerlinConfig {
        PerlinConfig {
            frequency: self.frequency,
            lacunarity: self.lacunarity,
            octave_count: self.octaves,
            persistence: self.persistence,
            seed: self.seed,
            quality: self.quality.into(),
        }
    }
}

/// Rendering parameters.
#[derive(Args)]
struct RenderArgs {
    /// Color gradient.
    #[arg(long, default_value = "terrain")]
    gradient: GradientArg,

    /// Enable bump-mapped lighting.
    #[arg(long)]
    light: bool,

    /// Wrap lighting neighbours around the map edges.
    #[arg(long)]
    wrap: bool,

    /// Light azimuth in degrees.
    #[arg(long, default_value = "45.0", allow_hyphen_values = true)]
    azimuth: f64,

    /// Light elevation in degrees.
    #[arg(long, default_value = "45.0", allow_hyphen_values = true)]
    elevation: f64,

    /// Light contrast (> 0).
    #[arg(long, default_value = "1.0")]
    contrast: f64,

    /// Light brightness.
    #[arg(long, default_value = "1.0")]
    brightness: f64,
}

/// Output parameters.
#[derive(Args)]
struct OutputArgs {
    /// Map width in pixels.
    #[arg(long, default_value = "512")]
    width: usize,

    /// Map height in pixels.
    #[arg(long, default_value = "256")]
    height: usize,

    /// Output directory.
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Base name for output files.
    #[arg(short, long, default_value = "noise")]
    name: String,

    /// Formats to write the raw noise map in, besides the rendered image.
    #[arg(short, long, default_value = "none")]
    format: MapFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum QualityArg {
    Fast,
    Standard,
    Best,
}

impl From<QualityArg> for NoiseQuality {
    fn from(quality: QualityArg) -> Self {
        match quality {
            QualityArg::Fast => NoiseQuality::Fast,
            QualityArg::Standard => NoiseQuality::Standard,
            QualityArg::Best => NoiseQuality::Best,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GradientArg {
    Grayscale,
    Terrain,
}

#[derive(Clone, Copy, ValueEnum)]
enum MapFormat {
    /// Rendered image only.
    None,
    /// 16-bit grayscale PNG.
    Png16,
    /// 16-bit RAW (little-endian).
    R16,
    /// 32-bit float RAW.
    R32,
    /// Every noise map format.
    All,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Plane {
            lower_x,
            upper_x,
            lower_z,
            upper_z,
            seamless,
            noise,
            render,
            output,
        } => {
            let module = make_module(&noise);
            let mut map = NoiseMap::new();
            let start = Instant::now();
            {
                let mut builder = PlaneMapBuilder::new();
                if let Err(e) = builder.set_bounds(lower_x, upper_x, lower_z, upper_z) {
                    fail("invalid plane bounds", e);
                }
                builder.enable_seamless(seamless);
                builder.set_source_module(&module);
                builder.set_dest_noise_map(&mut map);
                builder.set_dest_size(output.width, output.height);
                if let Err(e) = builder.build() {
                    fail("building noise map", e);
                }
            }
            log::info!("plane map built in {:.2?}", start.elapsed());
            finish(&map, &render, &output);
        }
        Commands::Sphere {
            south,
            north,
            west,
            east,
            noise,
            render,
            output,
        } => {
            let module = make_module(&noise);
            let mut map = NoiseMap::new();
            let start = Instant::now();
            {
                let mut builder = SphereMapBuilder::new();
                if let Err(e) = builder.set_bounds(south, north, west, east) {
                    fail("invalid sphere bounds", e);
                }
                builder.set_source_module(&module);
                builder.set_dest_noise_map(&mut map);
                builder.set_dest_size(output.width, output.height);
                if let Err(e) = builder.build() {
                    fail("building noise map", e);
                }
            }
            log::info!("sphere map built in {:.2?}", start.elapsed());
            finish(&map, &render, &output);
        }
        Commands::Sample { x, y, z, noise } => {
            let module = make_module(&noise);
            println!("{:.6}", module.get_value(x, y, z));
        }
    }
}

fn fail(context: &str, err: impl Display) -> ! {
    eprintln!("Error {}: {}", context, err);
    std::process::exit(1);
}

fn make_module(args: &NoiseArgs) -> Module {
    match Perlin::from_config(&args.config()) {
        Ok(perlin) => Module::from(perlin),
        Err(e) => fail("configuring generator", e),
    }
}

/// Renders the map and writes every requested output file.
fn finish(map: &NoiseMap, render: &RenderArgs, output: &OutputArgs) {
    println!("Noisemap");
    println!("========");
    println!("Size: {}x{}", map.width(), map.height());
    println!("Output: {}", output.output.display());

    let start = Instant::now();
    let mut image = Image::new();
    {
        let mut renderer = ImageRenderer::new();
        match render.gradient {
            GradientArg::Grayscale => renderer.build_grayscale_gradient(),
            GradientArg::Terrain => renderer.build_terrain_gradient(),
        }
        let light = LightSettings {
            azimuth: render.azimuth,
            elevation: render.elevation,
            contrast: render.contrast,
            brightness: render.brightness,
            ..Default::default()
        };
        if let Err(e) = renderer.set_light_settings(light) {
            fail("invalid light settings", e);
        }
        renderer.enable_light(render.light);
        renderer.enable_wrap(render.wrap);
        renderer.set_source_noise_map(map);
        renderer.set_dest_image(&mut image);
        if let Err(e) = renderer.render() {
            fail("rendering image", e);
        }
    }
    log::info!("image rendered in {:.2?}", start.elapsed());

    if let Err(e) = std::fs::create_dir_all(&output.output) {
        fail("creating output directory", e);
    }

    let image_path = output.output.join(format!("{}.png", output.name));
    if let Err(e) = write_image_png(&image, &image_path) {
        fail("exporting image", e);
    }
    println!("Wrote {}", image_path.display());

    let options = PngExportOptions::auto_range(map);
    println!(
        "Value range: [{:.4}, {:.4}]",
        options.min_value, options.max_value
    );

    let (png16, r16, r32) = match output.format {
        MapFormat::None => (false, false, false),
        MapFormat::Png16 => (true, false, false),
        MapFormat::R16 => (false, true, false),
        MapFormat::R32 => (false, false, true),
        MapFormat::All => (true, true, true),
    };

    if png16 {
        let path = output.output.join(format!("{}_map.png", output.name));
        if let Err(e) = write_noise_map_png16(map, &path, &options) {
            fail("exporting noise map PNG", e);
        }
        println!("Wrote {}", path.display());
    }
    if r16 {
        write_raw(map, &output.output, &output.name, RawFormat::R16LittleEndian, &options);
    }
    if r32 {
        write_raw(map, &output.output, &output.name, RawFormat::R32Float, &options);
    }
}

fn write_raw(map: &NoiseMap, dir: &Path, name: &str, format: RawFormat, range: &PngExportOptions) {
    let suffix = match format {
        RawFormat::R32Float => "r32",
        _ => "r16",
    };
    let path = dir.join(format!("{}.{}.raw", name, suffix));
    if let Err(e) = write_noise_map_raw(map, &path, format, range.min_value, range.max_value) {
        fail("exporting RAW", e);
    }
    println!(
        "Wrote {} ({} bytes)",
        path.display(),
        expected_file_size(map.width(), map.height(), format)
    );
}
