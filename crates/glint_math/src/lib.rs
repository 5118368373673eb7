// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod float;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use float::{near_zero, snap_zero, EPSILON};
pub use interval::Interval;
pub use ray::{Ray, DELTA};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_reexport() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_any_orthonormal() {
        // the shadow sampler relies on this glam helper for disk bases
        let d = Vec3::new(0.3, -0.7, 0.648).normalize();
        let o = d.any_orthonormal_vector();
        assert!(d.dot(o).abs() < 1e-6);
        assert!((o.length() - 1.0).abs() < 1e-6);
    }
}
