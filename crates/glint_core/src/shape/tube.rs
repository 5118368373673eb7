//! Infinite tube kernel.

use super::SurfaceHits;
use crate::error::{SceneError, SceneResult};
use glint_math::{near_zero, snap_zero, Interval, Ray, Vec3};

/// An infinite cylinder of `radius` around the line through `origin`
/// along the unit `axis`.
#[derive(Clone, Copy, Debug)]
pub struct Tube {
    origin: Vec3,
    axis: Vec3,
    radius: f32,
}

impl Tube {
    pub fn new(origin: Vec3, axis: Vec3, radius: f32) -> SceneResult<Self> {
        let axis = axis.try_normalize().ok_or(SceneError::ZeroDirection)?;
        Ok(Self {
            origin,
            axis,
            radius,
        })
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Quadratic on the ray components orthogonal to the axis.
    ///
    /// A ray parallel to the axis never crosses the wall, and a tangent
    /// ray does not count as a hit.
    pub fn intersections(&self, ray: &Ray, limit: Interval) -> SurfaceHits {
        let dp = ray.origin - self.origin;
        let d_perp = ray.direction - ray.direction.dot(self.axis) * self.axis;
        let dp_perp = dp - dp.dot(self.axis) * self.axis;

        let a = d_perp.length_squared();
        if near_zero(a) {
            return SurfaceHits::NONE;
        }
        let b = 2.0 * d_perp.dot(dp_perp);
        let c = dp_perp.length_squared() - self.radius * self.radius;

        let disc = b * b - 4.0 * a * c;
        if snap_zero(disc) <= 0.0 {
            return SurfaceHits::NONE;
        }
        let sq = disc.sqrt();

        let mut hits = SurfaceHits::NONE;
        for t in [
            snap_zero((-b - sq) / (2.0 * a)),
            snap_zero((-b + sq) / (2.0 * a)),
        ] {
            if limit.admits(t) {
                hits.push(t);
            }
        }
        hits
    }

    /// Radial unit normal at a wall point.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        let w = point - self.origin;
        (w - w.dot(self.axis) * self.axis).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_is_radial() {
        let tube = Tube::new(Vec3::ZERO, Vec3::X, 3.0).unwrap();
        assert!((tube.normal_at(Vec3::new(0.0, 3.0, 0.0)) - Vec3::Y).length() < 1e-4);

        // Axial position does not matter.
        assert!((tube.normal_at(Vec3::new(7.0, 3.0, 0.0)) - Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn test_perpendicular_ray_hits_twice() {
        let tube = Tube::new(Vec3::ZERO, Vec3::Z, 1.0).unwrap();
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 3.0), Vec3::X);

        let hits: Vec<f32> = tube.intersections(&ray, Interval::FORWARD).iter().collect();
        assert_eq!(hits.len(), 2);
        assert!((hits[0] - 4.0).abs() < 1e-4);
        assert!((hits[1] - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_ray_from_inside_hits_once() {
        let tube = Tube::new(Vec3::ZERO, Vec3::Z, 1.0).unwrap();
        let ray = Ray::new(Vec3::new(0.5, 0.0, 0.0), Vec3::X);

        let hits: Vec<f32> = tube.intersections(&ray, Interval::FORWARD).iter().collect();
        assert_eq!(hits.len(), 1);
        assert!((hits[0] - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_tangent_ray_misses() {
        let tube = Tube::new(Vec3::ZERO, Vec3::Z, 1.0).unwrap();
        let ray = Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);
        assert!(tube.intersections(&ray, Interval::FORWARD).is_empty());
    }

    #[test]
    fn test_axis_parallel_ray_misses() {
        let tube = Tube::new(Vec3::ZERO, Vec3::Z, 1.0).unwrap();

        // Inside or outside the wall, a parallel ray never crosses it.
        let inside = Ray::new(Vec3::new(0.5, 0.0, -4.0), Vec3::Z);
        let outside = Ray::new(Vec3::new(5.0, 0.0, -4.0), Vec3::Z);
        assert!(tube.intersections(&inside, Interval::FORWARD).is_empty());
        assert!(tube.intersections(&outside, Interval::FORWARD).is_empty());
    }

    #[test]
    fn test_zero_axis_rejected() {
        assert_eq!(
            Tube::new(Vec3::ZERO, Vec3::ZERO, 1.0).unwrap_err(),
            SceneError::ZeroDirection
        );
    }
}
