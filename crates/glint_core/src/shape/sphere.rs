//! Sphere kernel.

use super::SurfaceHits;
use glint_math::{snap_zero, Aabb, Interval, Ray, Vec3};

/// A sphere described by center and radius.
#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Geometric ray/sphere test.
    ///
    /// Projects the center onto the ray and solves for the half chord.
    /// A tangent ray does not count as a hit, and a root at the ray
    /// origin is culled by the admission interval.
    pub fn intersections(&self, ray: &Ray, limit: Interval) -> SurfaceHits {
        let u = self.center - ray.origin;
        let tm = u.dot(ray.direction);
        let d2 = u.length_squared() - tm * tm;
        let r2 = self.radius * self.radius;
        if snap_zero(d2 - r2) >= 0.0 {
            return SurfaceHits::NONE;
        }
        let th = (r2 - d2).sqrt();

        let mut hits = SurfaceHits::NONE;
        for t in [snap_zero(tm - th), snap_zero(tm + th)] {
            if limit.admits(t) {
                hits.push(t);
            }
        }
        hits
    }

    /// Outward unit normal at a surface point.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center) / self.radius
    }

    pub fn bounding_box(&self) -> Aabb {
        let rvec = Vec3::splat(self.radius);
        Aabb::from_points(self.center - rvec, self.center + rvec)
    }
}
