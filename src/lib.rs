//! Coherent noise generation, noise-map building and image rendering.
//!
//! This crate generates deterministic gradient (Perlin) noise, samples it
//! over planar or spherical domains into 2D noise maps, and renders those
//! maps into color images with optional bump-mapped lighting.

pub mod builder;
pub mod error;
pub mod export;
pub mod model;
pub mod module;
pub mod noise;
pub mod raster;
pub mod render;

pub use builder::{NoiseMapBuilder, PlaneMapBuilder, SphereMapBuilder};
pub use error::NoiseError;
pub use module::{Module, NoiseModule, Perlin, PerlinConfig};
pub use noise::NoiseQuality;
pub use raster::{Color, Image, NoiseMap};
pub use render::{Background, GradientColor, ImageRenderer, LightSettings};
