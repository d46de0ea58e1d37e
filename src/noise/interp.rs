//! Interpolation helpers and S-curves.

/// Linear interpolation between `n0` and `n1`.
///
/// `a` should range from 0.0 to 1.0; 0.0 returns `n0` and 1.0 returns `n1`.
#[inline]
pub fn linear_interp(n0: f64, n1: f64, a: f64) -> f64 {
    ((1.0 - a) * n0) + (a * n1)
}

/// Cubic interpolation between `n1` and `n2`, using `n0` and `n3` as the
/// outer control points.
#[inline]
pub fn cubic_interp(n0: f64, n1: f64, n2: f64, n3: f64, a: f64) -> f64 {
    let p = (n3 - n2) - (n0 - n1);
    let q = (n0 - n1) - p;
    let r = n2 - n0;
    let s = n1;
    p * a * a * a + q * a * a + r * a + s
}

/// Maps `a` onto the cubic S-curve `3a² - 2a³`.
#[inline]
pub fn s_curve3(a: f64) -> f64 {
    a * a * (3.0 - 2.0 * a)
}

/// Maps `a` onto the quintic S-curve `6a⁵ - 15a⁴ + 10a³`.
#[inline]
pub fn s_curve5(a: f64) -> f64 {
    let a3 = a * a * a;
    let a4 = a3 * a;
    let a5 = a4 * a;
    (6.0 * a5) - (15.0 * a4) + (10.0 * a3)
}
