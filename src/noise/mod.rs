//! Coherent-noise primitives.
//!
//! Lattice hashing, gradient and value noise, and the interpolation curves
//! they are smoothed with. Every generator module is built on these.

mod gen;
mod interp;
mod quality;
mod vector_table;

pub use gen::{
    gradient_coherent_noise_3d, gradient_noise_3d, int_value_noise_3d, make_int32_range,
    value_coherent_noise_3d, value_noise_3d,
};
pub use interp::{cubic_interp, linear_interp, s_curve3, s_curve5};
pub use quality::NoiseQuality;
