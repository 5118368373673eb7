//! Scalar tolerance helpers shared by the intersection kernels and shading.

/// Magnitudes below this are treated as zero throughout the engine.
pub const EPSILON: f32 = 1e-4;

/// Returns true if `x` is within `EPSILON` of zero.
#[inline]
pub fn near_zero(x: f32) -> bool {
    x.abs() < EPSILON
}

/// Snaps near-zero values to exactly 0.0, leaving everything else untouched.
///
/// Sign tests on ray parameters and dot products go through this first so
/// that rounding noise around a boundary cannot flip the decision.
#[inline]
pub fn snap_zero(x: f32) -> f32 {
    if near_zero(x) {
        0.0
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_zero() {
        assert!(near_zero(0.0));
        assert!(near_zero(EPSILON / 2.0));
        assert!(near_zero(-EPSILON / 2.0));
        assert!(!near_zero(EPSILON));
        assert!(!near_zero(1.0));
    }

    #[test]
    fn test_snap_zero() {
        assert_eq!(snap_zero(0.0), 0.0);
        assert_eq!(snap_zero(EPSILON / 10.0), 0.0);
        assert_eq!(snap_zero(-EPSILON / 10.0), 0.0);
        assert_eq!(snap_zero(0.5), 0.5);
        assert_eq!(snap_zero(-0.5), -0.5);
    }
}
