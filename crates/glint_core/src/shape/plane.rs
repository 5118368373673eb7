//! Infinite plane kernel.

use super::SurfaceHits;
use crate::error::{SceneError, SceneResult};
use glint_math::{near_zero, snap_zero, Interval, Ray, Vec3};

/// An infinite plane through a point, with a unit normal.
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Create a plane from a point on it and a normal direction (any
    /// length).
    pub fn new(point: Vec3, normal: Vec3) -> SceneResult<Self> {
        let normal = normal.try_normalize().ok_or(SceneError::ZeroDirection)?;
        Ok(Self { point, normal })
    }

    /// Create the plane spanned by three points.
    ///
    /// Repeated or collinear points leave no normal to speak of and are
    /// rejected.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> SceneResult<Self> {
        let normal = (b - a)
            .cross(c - a)
            .try_normalize()
            .ok_or(SceneError::ZeroDirection)?;
        Ok(Self { point: a, normal })
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// The unit normal (the same on both faces).
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn intersections(&self, ray: &Ray, limit: Interval) -> SurfaceHits {
        let denom = self.normal.dot(ray.direction);
        if near_zero(denom) {
            // Parallel ray, whether beside the plane or contained in it.
            return SurfaceHits::NONE;
        }
        let t = snap_zero(self.normal.dot(self.point - ray.origin) / denom);
        if limit.admits(t) {
            SurfaceHits::one(t)
        } else {
            SurfaceHits::NONE
        }
    }

    pub fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }
}
