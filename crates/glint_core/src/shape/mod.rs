//! Geometric surfaces and the shapes that wear them.
//!
//! Each kernel lives in its own file and answers three questions: where
//! does a ray cross the surface, what is the normal at a surface point,
//! and how large is the surface. `Surface` ties the kernels together as
//! a closed enum so the aggregate never dispatches through a vtable.

mod cylinder;
mod plane;
mod polygon;
mod sphere;
mod tube;

pub use cylinder::Cylinder;
pub use plane::Plane;
pub use polygon::{Polygon, Triangle};
pub use sphere::Sphere;
pub use tube::Tube;

use crate::error::SceneResult;
use crate::material::{Color, Material};
use glint_math::{Aabb, Interval, Ray, Vec3};

/// Up to two parametric distances reported by a surface kernel.
///
/// Every surface here is a plane, a convex quadric or a convex solid, so
/// a ray crosses it at most twice and the result fits a fixed buffer.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceHits {
    t: [f32; 2],
    len: u8,
}

impl SurfaceHits {
    /// No intersection.
    pub const NONE: Self = Self { t: [0.0; 2], len: 0 };

    pub fn one(t: f32) -> Self {
        Self { t: [t, 0.0], len: 1 }
    }

    pub fn push(&mut self, t: f32) {
        debug_assert!((self.len as usize) < self.t.len());
        self.t[self.len as usize] = t;
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The recorded distances in kernel order (ascending for two-root
    /// kernels).
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.t[..self.len as usize].iter().copied()
    }
}

/// The closed set of surface geometries the tracer understands.
#[derive(Clone, Debug)]
pub enum Surface {
    Plane(Plane),
    Sphere(Sphere),
    Triangle(Triangle),
    Polygon(Polygon),
    Tube(Tube),
    Cylinder(Cylinder),
}

impl Surface {
    /// Sphere of `radius` around `center`.
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Sphere::new(center, radius).into()
    }

    /// Plane through `point` facing `normal`.
    pub fn plane(point: Vec3, normal: Vec3) -> SceneResult<Self> {
        Ok(Plane::new(point, normal)?.into())
    }

    /// Plane spanned by three non-collinear points.
    pub fn plane_from_points(a: Vec3, b: Vec3, c: Vec3) -> SceneResult<Self> {
        Ok(Plane::from_points(a, b, c)?.into())
    }

    /// Triangle over three non-collinear corners.
    pub fn triangle(a: Vec3, b: Vec3, c: Vec3) -> SceneResult<Self> {
        Ok(Triangle::new(a, b, c)?.into())
    }

    /// Convex planar polygon over an ordered vertex loop.
    pub fn polygon(vertices: Vec<Vec3>) -> SceneResult<Self> {
        Ok(Polygon::new(vertices)?.into())
    }

    /// Infinite cylinder of `radius` around the line through `origin`
    /// along `axis`.
    pub fn tube(origin: Vec3, axis: Vec3, radius: f32) -> SceneResult<Self> {
        Ok(Tube::new(origin, axis, radius)?.into())
    }

    /// Capped cylinder growing `height` above `origin` along `axis`.
    pub fn cylinder(origin: Vec3, axis: Vec3, radius: f32, height: f32) -> SceneResult<Self> {
        Ok(Cylinder::new(origin, axis, radius, height)?.into())
    }

    /// Parametric distances at which `ray` crosses the surface within
    /// `limit`.
    pub fn intersections(&self, ray: &Ray, limit: Interval) -> SurfaceHits {
        match self {
            Surface::Plane(plane) => plane.intersections(ray, limit),
            Surface::Sphere(sphere) => sphere.intersections(ray, limit),
            Surface::Triangle(triangle) => triangle.intersections(ray, limit),
            Surface::Polygon(polygon) => polygon.intersections(ray, limit),
            Surface::Tube(tube) => tube.intersections(ray, limit),
            Surface::Cylinder(cylinder) => cylinder.intersections(ray, limit),
        }
    }

    /// Unit normal at a point assumed to lie on the surface.
    ///
    /// The orientation is geometric, not view-dependent; shading treats
    /// both faces alike.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        match self {
            Surface::Plane(plane) => plane.normal_at(point),
            Surface::Sphere(sphere) => sphere.normal_at(point),
            Surface::Triangle(triangle) => triangle.normal_at(point),
            Surface::Polygon(polygon) => polygon.normal_at(point),
            Surface::Tube(tube) => tube.normal_at(point),
            Surface::Cylinder(cylinder) => cylinder.normal_at(point),
        }
    }

    /// Axis-aligned bounds, or `None` for surfaces of infinite extent.
    pub fn bounding_box(&self) -> Option<Aabb> {
        match self {
            Surface::Plane(_) | Surface::Tube(_) => None,
            Surface::Sphere(sphere) => Some(sphere.bounding_box()),
            Surface::Triangle(triangle) => Some(triangle.bounding_box()),
            Surface::Polygon(polygon) => Some(polygon.bounding_box()),
            Surface::Cylinder(cylinder) => Some(cylinder.bounding_box()),
        }
    }
}

impl From<Plane> for Surface {
    fn from(plane: Plane) -> Self {
        Surface::Plane(plane)
    }
}

impl From<Sphere> for Surface {
    fn from(sphere: Sphere) -> Self {
        Surface::Sphere(sphere)
    }
}

impl From<Triangle> for Surface {
    fn from(triangle: Triangle) -> Self {
        Surface::Triangle(triangle)
    }
}

impl From<Polygon> for Surface {
    fn from(polygon: Polygon) -> Self {
        Surface::Polygon(polygon)
    }
}

impl From<Tube> for Surface {
    fn from(tube: Tube) -> Self {
        Surface::Tube(tube)
    }
}

impl From<Cylinder> for Surface {
    fn from(cylinder: Cylinder) -> Self {
        Surface::Cylinder(cylinder)
    }
}

/// A renderable object: a surface plus its appearance.
#[derive(Clone, Debug)]
pub struct Shape {
    pub surface: Surface,
    /// Self-luminous color, added once per shading event.
    pub emission: Color,
    pub material: Material,
}

impl Shape {
    pub fn new(surface: impl Into<Surface>, emission: Color, material: Material) -> Self {
        Self {
            surface: surface.into(),
            emission,
            material,
        }
    }

    /// Append every admissible intersection of `ray` with this shape to
    /// `out`.
    pub fn append_intersections<'a>(
        &'a self,
        ray: &Ray,
        limit: Interval,
        out: &mut Vec<GeoPoint<'a>>,
    ) {
        for t in self.surface.intersections(ray, limit).iter() {
            out.push(GeoPoint {
                shape: self,
                point: ray.at(t),
                t,
            });
        }
    }

    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        self.surface.normal_at(point)
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        self.surface.bounding_box()
    }
}

/// An intersection on a concrete shape.
///
/// The shape reference is how shading reaches the material and emission
/// behind a hit.
#[derive(Clone, Copy, Debug)]
pub struct GeoPoint<'a> {
    pub shape: &'a Shape,
    pub point: Vec3,
    pub t: f32,
}

/// Two records are the same hit when they name the same shape object and
/// the same point on it.
impl PartialEq for GeoPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.shape, other.shape) && self.point == other.point
    }
}
