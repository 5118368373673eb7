use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box: one interval per axis.
///
/// Boxes are conservative helpers for pruning; a shape with no finite box
/// (plane, tube) simply never gets one and is always tested directly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals, padding degenerate axes.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self::new(
            Interval::new(a.x.min(b.x), a.x.max(b.x)),
            Interval::new(a.y.min(b.y), a.y.max(b.y)),
            Interval::new(a.z.min(b.z), a.z.max(b.z)),
        )
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&a.x, &b.x),
            y: Interval::surrounding(&a.y, &b.y),
            z: Interval::surrounding(&a.z, &b.z),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Slab test: does the ray pass through this box within `ray_t`?
    ///
    /// Per axis the entry/exit parameters shrink a running interval; the
    /// box is missed as soon as that interval empties. A zero direction
    /// component yields infinite slab parameters, which fall out correctly.
    pub fn hit(&self, ray: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let origin = ray.origin[axis];
            let adinv = 1.0 / ray.direction[axis];

            let mut t0 = (slab.min - origin) * adinv;
            let mut t1 = (slab.max - origin) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    /// The worst-axis gap between two boxes.
    ///
    /// Positive: the boxes are separated by at least that much on some
    /// axis. Zero or negative: they touch or overlap on every axis. The
    /// hierarchy builder merges the pair with the smallest value first.
    pub fn separation(&self, other: &Aabb) -> f32 {
        let mut worst = f32::NEG_INFINITY;
        for axis in 0..3 {
            let a = self.axis_interval(axis);
            let b = other.axis_interval(axis);
            let gap = (a.min - b.max).max(b.min - a.max);
            worst = worst.max(gap);
        }
        worst
    }

    /// Adjust so no axis is narrower than a small delta.
    ///
    /// Flat geometry (an axis-aligned polygon) would otherwise produce a
    /// zero-thickness slab that the `<=` rejection in `hit` can never pass.
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_points(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn test_from_points_orders_corners() {
        let aabb = Aabb::from_points(Vec3::new(2.0, -1.0, 5.0), Vec3::new(-2.0, 3.0, 1.0));
        assert_eq!(aabb.x.min, -2.0);
        assert_eq!(aabb.x.max, 2.0);
        assert_eq!(aabb.y.min, -1.0);
        assert_eq!(aabb.y.max, 3.0);
        assert_eq!(aabb.z.min, 1.0);
        assert_eq!(aabb.z.max, 5.0);
    }

    #[test]
    fn test_hit_through_center() {
        let ray = Ray::new(Vec3::new(0.5, 0.5, -2.0), Vec3::Z);
        assert!(unit_box().hit(&ray, Interval::FORWARD));
    }

    #[test]
    fn test_hit_miss_to_the_side() {
        let ray = Ray::new(Vec3::new(2.0, 0.5, -2.0), Vec3::Z);
        assert!(!unit_box().hit(&ray, Interval::FORWARD));
    }

    #[test]
    fn test_hit_behind_origin() {
        // Box entirely behind the ray: interval [0, inf) rejects it.
        let ray = Ray::new(Vec3::new(0.5, 0.5, 3.0), Vec3::Z);
        assert!(!unit_box().hit(&ray, Interval::FORWARD));
    }

    #[test]
    fn test_hit_limited_range() {
        let ray = Ray::new(Vec3::new(0.5, 0.5, -2.0), Vec3::Z);
        // Box starts 2 units ahead but the range stops short of it.
        assert!(!unit_box().hit(&ray, Interval::new(0.0, 1.0)));
        assert!(unit_box().hit(&ray, Interval::new(0.0, 2.5)));
    }

    #[test]
    fn test_hit_axis_parallel_inside_slab() {
        // Direction has a zero x component, origin inside the x slab.
        let ray = Ray::new(Vec3::new(0.5, 0.5, -2.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(unit_box().hit(&ray, Interval::FORWARD));

        // Origin outside the x slab, same direction: infinite slab params miss.
        let ray = Ray::new(Vec3::new(5.0, 0.5, -2.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!unit_box().hit(&ray, Interval::FORWARD));
    }

    #[test]
    fn test_flat_box_still_hittable() {
        // Zero-thickness box in z, padded at construction.
        let flat = Aabb::from_points(Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::new(0.5, 0.5, -1.0), Vec3::Z);
        assert!(flat.hit(&ray, Interval::FORWARD));
    }

    #[test]
    fn test_surrounding_covers_both() {
        let a = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_points(Vec3::new(2.0, 2.0, 2.0), Vec3::new(3.0, 3.0, 3.0));
        let hull = Aabb::surrounding(&a, &b);
        assert_eq!(hull.x.min, 0.0);
        assert_eq!(hull.x.max, 3.0);
        assert_eq!(hull.z.max, 3.0);
    }

    #[test]
    fn test_separation_sign() {
        let a = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_points(Vec3::new(3.0, 0.0, 0.0), Vec3::new(4.0, 1.0, 1.0));
        let c = Aabb::from_points(Vec3::new(0.5, 0.5, 0.5), Vec3::new(1.5, 1.5, 1.5));

        // Two units of clear space along x.
        assert!((a.separation(&b) - 2.0).abs() < 1e-6);
        assert_eq!(a.separation(&b), b.separation(&a));

        // Overlapping boxes report a non-positive gap.
        assert!(a.separation(&c) <= 0.0);

        // Closer pair has the smaller metric.
        assert!(a.separation(&c) < a.separation(&b));
    }
}
