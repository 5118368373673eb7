use crate::Vec3;

/// Offset applied to secondary-ray origins along the surface normal, so a
/// reflection, refraction or shadow ray never re-hits the surface it left.
pub const DELTA: f32 = 1e-2;

/// A ray in 3D space: origin plus unit direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. `direction` must be non-zero; it is normalized here.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a secondary ray leaving a surface point.
    ///
    /// The origin is nudged `DELTA` along the normal, on whichever side the
    /// direction points to (a refraction ray passing through gets pushed to
    /// the far side, a reflection or shadow ray stays on the near side).
    pub fn offset(point: Vec3, direction: Vec3, normal: Vec3) -> Self {
        let step = if direction.dot(normal) > 0.0 {
            DELTA
        } else {
            -DELTA
        };
        Self::new(point + normal * step, direction)
    }

    /// Get the point along the ray at parameter t.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(ray.direction, Vec3::Z);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::X);
        assert_eq!(ray.at(0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ray.at(2.0), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::ZERO);
    }

    #[test]
    fn test_offset_follows_direction_side() {
        let point = Vec3::ZERO;
        let normal = Vec3::Y;

        // Direction leaving along the normal side: origin nudged up.
        let up = Ray::offset(point, Vec3::new(1.0, 1.0, 0.0), normal);
        assert_eq!(up.origin, Vec3::new(0.0, DELTA, 0.0));

        // Direction into the surface: origin nudged below.
        let down = Ray::offset(point, Vec3::new(1.0, -1.0, 0.0), normal);
        assert_eq!(down.origin, Vec3::new(0.0, -DELTA, 0.0));

        // Grazing direction counts as the far side.
        let grazing = Ray::offset(point, Vec3::X, normal);
        assert_eq!(grazing.origin, Vec3::new(0.0, -DELTA, 0.0));
    }
}
