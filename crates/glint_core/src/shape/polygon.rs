//! Triangle and convex polygon kernels.
//!
//! Both intersect their supporting plane first and then run the same
//! containment test on the ray, so a polygon hit costs one plane kernel
//! plus one cross product per edge.

use super::{Plane, SurfaceHits};
use crate::error::{SceneError, SceneResult};
use glint_math::{near_zero, snap_zero, Aabb, Interval, Ray, Vec3};

/// Containment test shared by triangles and polygons.
///
/// The ray origin and each edge span a pyramid face with normal
/// `normalize(vi x vi+1)`. The ray pierces the interior iff its
/// direction leaves every face on the same strict side. A zero sign
/// means the ray grazes an edge, a vertex or an edge continuation, and
/// that does not count as a hit; nor does an origin collinear with an
/// edge (the face normal vanishes).
fn encloses(vertices: &[Vec3], ray: &Ray) -> bool {
    let n = vertices.len();
    let mut last_sign = 0.0f32;
    for i in 0..n {
        let vi = vertices[i] - ray.origin;
        let vj = vertices[(i + 1) % n] - ray.origin;
        let face_normal = match vi.cross(vj).try_normalize() {
            Some(normal) => normal,
            None => return false,
        };
        let sign = snap_zero(ray.direction.dot(face_normal));
        if sign == 0.0 || sign * last_sign < 0.0 {
            return false;
        }
        last_sign = sign;
    }
    true
}

fn hull(vertices: &[Vec3]) -> Aabb {
    let mut min = vertices[0];
    let mut max = vertices[0];
    for &v in &vertices[1..] {
        min = min.min(v);
        max = max.max(v);
    }
    Aabb::from_points(min, max)
}

/// A triangle over three non-collinear corners.
#[derive(Clone, Copy, Debug)]
pub struct Triangle {
    vertices: [Vec3; 3],
    plane: Plane,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> SceneResult<Self> {
        let plane = Plane::from_points(a, b, c)?;
        Ok(Self {
            vertices: [a, b, c],
            plane,
        })
    }

    pub fn vertices(&self) -> &[Vec3; 3] {
        &self.vertices
    }

    pub fn intersections(&self, ray: &Ray, limit: Interval) -> SurfaceHits {
        let hits = self.plane.intersections(ray, limit);
        if hits.is_empty() || !encloses(&self.vertices, ray) {
            return SurfaceHits::NONE;
        }
        hits
    }

    pub fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.plane.normal()
    }

    pub fn bounding_box(&self) -> Aabb {
        hull(&self.vertices)
    }
}

/// A convex planar polygon over an ordered vertex loop.
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<Vec3>,
    plane: Plane,
}

impl Polygon {
    /// Validate and build a polygon.
    ///
    /// The loop must have at least three corners, no two consecutive
    /// corners may coincide, every corner must lie on the supporting
    /// plane of the first three, and walking the loop must always turn
    /// the same way (convex, consistently ordered).
    pub fn new(vertices: Vec<Vec3>) -> SceneResult<Self> {
        let n = vertices.len();
        if n < 3 {
            return Err(SceneError::TooFewVertices { got: n });
        }
        for i in 0..n {
            if near_zero((vertices[(i + 1) % n] - vertices[i]).length()) {
                return Err(SceneError::RepeatedVertex);
            }
        }
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        if n > 3 {
            let normal = plane.normal();
            for &v in &vertices[3..] {
                if !near_zero((v - vertices[0]).dot(normal)) {
                    return Err(SceneError::NonCoplanarVertex);
                }
            }
            let mut reference = 0.0f32;
            for i in 0..n {
                let prev = vertices[i] - vertices[(i + n - 1) % n];
                let next = vertices[(i + 1) % n] - vertices[i];
                let turn = snap_zero(prev.cross(next).dot(normal));
                if turn == 0.0 || turn * reference < 0.0 {
                    return Err(SceneError::NonConvexPolygon);
                }
                reference = turn;
            }
        }
        Ok(Self { vertices, plane })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn intersections(&self, ray: &Ray, limit: Interval) -> SurfaceHits {
        let hits = self.plane.intersections(ray, limit);
        if hits.is_empty() || !encloses(&self.vertices, ray) {
            return SurfaceHits::NONE;
        }
        hits
    }

    pub fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.plane.normal()
    }

    pub fn bounding_box(&self) -> Aabb {
        hull(&self.vertices)
    }
}
