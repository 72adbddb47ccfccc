//! Interpolation helpers:
//! - lerp_f32 (scalar blend)
//! - approximately (fixed absolute tolerance)
//! - hermite (cubic Hermite over a segment of span `h`)
//! - secant_slope (guarded finite difference between two keyframes)

use crate::constants::APPROX_TOLERANCE;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Absolute-tolerance comparison used for span and loop-range checks.
#[inline]
pub fn approximately(a: f32, b: f32) -> bool {
    (a - b).abs() < APPROX_TOLERANCE
}

/// Hermite basis weights `(h00, h10, h01, h11)` at normalized parameter `s`.
#[inline]
pub fn hermite_basis(s: f32) -> (f32, f32, f32, f32) {
    let s2 = s * s;
    let s3 = s2 * s;
    (
        2.0 * s3 - 3.0 * s2 + 1.0,
        s3 - 2.0 * s2 + s,
        -2.0 * s3 + 3.0 * s2,
        s3 - s2,
    )
}

/// Cubic Hermite between `v0` and `v1` with slopes `m0`/`m1` over a span `h`.
///
/// The slopes are in value-per-time units, so they are scaled by `h` before
/// entering the unit-interval basis.
#[inline]
pub fn hermite(v0: f32, v1: f32, m0: f32, m1: f32, s: f32, h: f32) -> f32 {
    let (h00, h10, h01, h11) = hermite_basis(s);
    h00 * v0 + h10 * h * m0 + h01 * v1 + h11 * h * m1
}

/// Slope between `(t0, v0)` and `(t1, v1)`; `None` when the time delta is below `min_dt`.
#[inline]
pub fn secant_slope(t0: f32, v0: f32, t1: f32, v1: f32, min_dt: f32) -> Option<f32> {
    let dt = t1 - t0;
    if dt < min_dt {
        return None;
    }
    Some((v1 - v0) / dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_partitions_unity_for_values() {
        for i in 0..=10 {
            let s = i as f32 / 10.0;
            let (h00, _, h01, _) = hermite_basis(s);
            assert!((h00 + h01 - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn hermite_hits_endpoints() {
        assert_eq!(hermite(2.0, 5.0, 3.0, -1.0, 0.0, 4.0), 2.0);
        assert_eq!(hermite(2.0, 5.0, 3.0, -1.0, 1.0, 4.0), 5.0);
    }

    #[test]
    fn hermite_with_secant_slopes_is_linear() {
        // slope 0.5 over [0, 4], values 0 -> 2
        let v = hermite(0.0, 2.0, 0.5, 0.5, 0.25, 4.0);
        assert!((v - 0.5).abs() < 1e-6);
    }

    #[test]
    fn approximately_uses_fixed_tolerance() {
        assert!(approximately(1.0, 1.00005));
        assert!(!approximately(1.0, 1.0002));
    }

    #[test]
    fn secant_slope_guards_small_deltas() {
        assert_eq!(secant_slope(0.0, 0.0, 2.0, 1.0, 1e-4), Some(0.5));
        assert_eq!(secant_slope(0.0, 0.0, 0.00001, 1.0, 1e-4), None);
        assert_eq!(secant_slope(1.0, 0.0, 0.0, 1.0, 1e-4), None);
    }
}
