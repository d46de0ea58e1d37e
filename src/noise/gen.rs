//! Integer hashing, gradient noise and value noise over a 3D lattice.
//!
//! All functions are pure: identical inputs always produce bit-identical
//! outputs. Integer arithmetic wraps on overflow.

use super::interp::{linear_interp, s_curve3, s_curve5};
use super::quality::NoiseQuality;
use super::vector_table::RANDOM_VECTORS;

// Prime multipliers; the hash depends on them staying prime.
const X_NOISE_GEN: i32 = 1619;
const Y_NOISE_GEN: i32 = 31337;
const Z_NOISE_GEN: i32 = 6971;
const SEED_NOISE_GEN: i32 = 1013;
const SHIFT_NOISE_GEN: u32 = 8;

/// Keeps gradient noise inside [-1, 1] for displacements of length <= 1.
const GRADIENT_SCALE: f64 = 2.12;

#[inline]
fn lattice_hash(x: i32, y: i32, z: i32, seed: i32) -> i32 {
    X_NOISE_GEN
        .wrapping_mul(x)
        .wrapping_add(Y_NOISE_GEN.wrapping_mul(y))
        .wrapping_add(Z_NOISE_GEN.wrapping_mul(z))
        .wrapping_add(SEED_NOISE_GEN.wrapping_mul(seed))
}

/// Lower lattice coordinate of the unit cell containing `v`.
///
/// Exactly zero maps to -1, which keeps the reference outputs stable.
#[inline]
fn lattice_floor(v: f64) -> i32 {
    if v > 0.0 {
        v as i32
    } else {
        (v as i32).wrapping_sub(1)
    }
}

#[inline]
fn smooth(t: f64, quality: NoiseQuality) -> f64 {
    match quality {
        NoiseQuality::Fast => t,
        NoiseQuality::Standard => s_curve3(t),
        NoiseQuality::Best => s_curve5(t),
    }
}

/// Generates an integer-noise value in `[0, 2^31 - 1)` from lattice
/// coordinates and a seed.
pub fn int_value_noise_3d(x: i32, y: i32, z: i32, seed: i32) -> i32 {
    let mut n = lattice_hash(x, y, z, seed) & 0x7fff_ffff;
    n ^= n >> 13;
    n.wrapping_mul(n.wrapping_mul(n).wrapping_mul(60493).wrapping_add(19_990_303))
        .wrapping_add(1_376_312_589)
        & 0x7fff_ffff
}

/// Generates a value-noise value in `[-1, 1]` at a lattice point.
pub fn value_noise_3d(x: i32, y: i32, z: i32, seed: i32) -> f64 {
    1.0 - (int_value_noise_3d(x, y, z, seed) as f64 / 1_073_741_824.0)
}

/// Generates a gradient-noise value from a point and a nearby lattice point.
///
/// A pseudorandom unit vector is chosen from the lattice point and seed and
/// dotted with the displacement `(fx - ix, fy - iy, fz - iz)`.
///
/// Each displacement component must have a magnitude of at most 1; outside
/// that range the result may leave [-1, 1].
pub fn gradient_noise_3d(fx: f64, fy: f64, fz: f64, ix: i32, iy: i32, iz: i32, seed: i32) -> f64 {
    let mut vector_index = lattice_hash(ix, iy, iz, seed);
    vector_index ^= vector_index >> SHIFT_NOISE_GEN;
    let gradient = &RANDOM_VECTORS[(vector_index & 0xff) as usize];

    let xv_point = fx - ix as f64;
    let yv_point = fy - iy as f64;
    let zv_point = fz - iz as f64;

    ((gradient[0] * xv_point) + (gradient[1] * yv_point) + (gradient[2] * zv_point))
        * GRADIENT_SCALE
}

/// Interpolates per-corner samples of the unit cube around `(x, y, z)`.
///
/// Corners are combined along x, then y, then z.
#[inline]
fn trilinear<F>(x: f64, y: f64, z: f64, quality: NoiseQuality, corner: F) -> f64
where
    F: Fn(i32, i32, i32) -> f64,
{
    let x0 = lattice_floor(x);
    let x1 = x0.wrapping_add(1);
    let y0 = lattice_floor(y);
    let y1 = y0.wrapping_add(1);
    let z0 = lattice_floor(z);
    let z1 = z0.wrapping_add(1);

    let xs = smooth(x - x0 as f64, quality);
    let ys = smooth(y - y0 as f64, quality);
    let zs = smooth(z - z0 as f64, quality);

    let ix0 = linear_interp(corner(x0, y0, z0), corner(x1, y0, z0), xs);
    let ix1 = linear_interp(corner(x0, y1, z0), corner(x1, y1, z0), xs);
    let iy0 = linear_interp(ix0, ix1, ys);
    let ix0 = linear_interp(corner(x0, y0, z1), corner(x1, y0, z1), xs);
    let ix1 = linear_interp(corner(x0, y1, z1), corner(x1, y1, z1), xs);
    let iy1 = linear_interp(ix0, ix1, ys);

    linear_interp(iy0, iy1, zs)
}

/// Generates a gradient-coherent-noise value, roughly in [-1, 1].
pub fn gradient_coherent_noise_3d(x: f64, y: f64, z: f64, seed: i32, quality: NoiseQuality) -> f64 {
    trilinear(x, y, z, quality, |ix, iy, iz| {
        gradient_noise_3d(x, y, z, ix, iy, iz, seed)
    })
}

/// Generates a value-coherent-noise value in [-1, 1].
///
/// Cheaper than gradient noise but blockier.
pub fn value_coherent_noise_3d(x: f64, y: f64, z: f64, seed: i32, quality: NoiseQuality) -> f64 {
    trilinear(x, y, z, quality, |ix, iy, iz| value_noise_3d(ix, iy, iz, seed))
}

/// Folds a coordinate into the range a 32-bit lattice index can represent.
///
/// Values inside ±2^30 are returned unchanged.
pub fn make_int32_range(n: f64) -> f64 {
    const LIMIT: f64 = 1_073_741_824.0;
    if n >= LIMIT {
        (2.0 * (n % LIMIT)) - LIMIT
    } else if n <= -LIMIT {
        (2.0 * (n % LIMIT)) + LIMIT
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_value_noise_known_values() {
        assert_eq!(int_value_noise_3d(0, 0, 0, 0), 1_376_312_589);
        assert_eq!(int_value_noise_3d(1, 2, 3, 0), 448_794_225);
        assert_eq!(int_value_noise_3d(-5, 7, 11, 42), 1_636_481_513);
    }

    #[test]
    fn test_int_value_noise_range() {
        for x in -20..20 {
            for seed in [0, 1, -7, i32::MAX, i32::MIN] {
                let n = int_value_noise_3d(x, x * 3, -x, seed);
                assert!((0..i32::MAX).contains(&n));
            }
        }
    }

    #[test]
    fn test_value_noise_range() {
        assert!((value_noise_3d(1, 2, 3, 0) - 0.582_027_806_900_441_6).abs() < 1e-12);
        for x in -10..10 {
            let v = value_noise_3d(x, 2 * x, 5, 9);
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_gradient_noise_vanishes_at_lattice_point() {
        assert_eq!(gradient_noise_3d(3.0, -2.0, 5.0, 3, -2, 5, 11), 0.0);
    }

    #[test]
    fn test_gradient_coherent_noise_known_values() {
        let a = gradient_coherent_noise_3d(1.25, 0.75, 0.5, 0, NoiseQuality::Standard);
        assert!((a - 0.600_897_126).abs() < 1e-8, "got {}", a);
        let b = gradient_coherent_noise_3d(-3.7, 2.2, 0.35, 7, NoiseQuality::Standard);
        assert!((b + 0.286_723_800).abs() < 1e-8, "got {}", b);
    }

    #[test]
    fn test_gradient_coherent_noise_is_deterministic() {
        for quality in [NoiseQuality::Fast, NoiseQuality::Standard, NoiseQuality::Best] {
            let a = gradient_coherent_noise_3d(12.3, -4.56, 7.89, 1234, quality);
            let b = gradient_coherent_noise_3d(12.3, -4.56, 7.89, 1234, quality);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_gradient_coherent_noise_zero_on_positive_lattice() {
        let v = gradient_coherent_noise_3d(1.0, 2.0, 3.0, 5, NoiseQuality::Best);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_quality_changes_output_between_lattice_points() {
        let fast = gradient_coherent_noise_3d(0.3, 0.6, 0.2, 0, NoiseQuality::Fast);
        let best = gradient_coherent_noise_3d(0.3, 0.6, 0.2, 0, NoiseQuality::Best);
        assert_ne!(fast, best);
    }

    #[test]
    fn test_seed_changes_output() {
        let a = gradient_coherent_noise_3d(0.3, 0.6, 0.2, 0, NoiseQuality::Standard);
        let b = gradient_coherent_noise_3d(0.3, 0.6, 0.2, 1, NoiseQuality::Standard);
        assert_ne!(a, b);
    }

    #[test]
    fn test_value_coherent_noise_matches_corner_on_lattice() {
        let v = value_coherent_noise_3d(4.0, 5.0, 6.0, 3, NoiseQuality::Standard);
        assert!((v - value_noise_3d(4, 5, 6, 3)).abs() < 1e-12);
    }

    #[test]
    fn test_make_int32_range() {
        assert_eq!(make_int32_range(12.5), 12.5);
        assert_eq!(make_int32_range(-12.5), -12.5);
        let folded = make_int32_range(3.0e9);
        assert!(folded.abs() < 1_073_741_824.0);
    }
}
