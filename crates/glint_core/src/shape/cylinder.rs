//! Capped cylinder kernel.

use super::{SurfaceHits, Tube};
use crate::error::SceneResult;
use glint_math::{near_zero, snap_zero, Aabb, Interval, Ray, Vec3};

/// A finite cylinder: a tube wall closed by two cap disks.
///
/// The wall owns the open axial band between the caps; the rim circles
/// belong to the caps, which is what the cap normals report.
#[derive(Clone, Copy, Debug)]
pub struct Cylinder {
    tube: Tube,
    height: f32,
}

impl Cylinder {
    pub fn new(origin: Vec3, axis: Vec3, radius: f32, height: f32) -> SceneResult<Self> {
        Ok(Self {
            tube: Tube::new(origin, axis, radius)?,
            height,
        })
    }

    pub fn tube(&self) -> &Tube {
        &self.tube
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Signed distance of `point` above the base cap, along the axis.
    fn axial_offset(&self, point: Vec3) -> f32 {
        self.tube.axis().dot(point - self.tube.origin())
    }

    /// Where `ray` crosses the cap disk centered at `center`, if it
    /// does so strictly inside the rim.
    fn cap_hit(&self, ray: &Ray, limit: Interval, center: Vec3) -> Option<f32> {
        let axis = self.tube.axis();
        let denom = axis.dot(ray.direction);
        if near_zero(denom) {
            return None;
        }
        let t = snap_zero(axis.dot(center - ray.origin) / denom);
        if !limit.admits(t) {
            return None;
        }
        let d2 = (ray.at(t) - center).length_squared();
        let r2 = self.tube.radius() * self.tube.radius();
        if snap_zero(d2 - r2) < 0.0 {
            Some(t)
        } else {
            None
        }
    }

    pub fn intersections(&self, ray: &Ray, limit: Interval) -> SurfaceHits {
        let mut hits = SurfaceHits::NONE;
        for t in self.tube.intersections(ray, limit).iter() {
            let axial = self.axial_offset(ray.at(t));
            if snap_zero(axial) > 0.0 && snap_zero(axial - self.height) < 0.0 {
                hits.push(t);
            }
        }

        let base = self.tube.origin();
        let top = base + self.tube.axis() * self.height;
        for center in [base, top] {
            // A convex solid yields at most two crossings.
            if hits.len() == 2 {
                break;
            }
            if let Some(t) = self.cap_hit(ray, limit, center) {
                hits.push(t);
            }
        }
        hits
    }

    /// Cap normal on (and at the rim of) either cap, tube normal on the
    /// wall.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        let axial = self.axial_offset(point);
        if near_zero(axial) {
            return -self.tube.axis();
        }
        if near_zero(axial - self.height) {
            return self.tube.axis();
        }
        self.tube.normal_at(point)
    }

    pub fn bounding_box(&self) -> Aabb {
        let axis = self.tube.axis();
        let base = self.tube.origin();
        let top = base + axis * self.height;
        let extent = Vec3::new(
            (1.0 - axis.x * axis.x).max(0.0).sqrt(),
            (1.0 - axis.y * axis.y).max(0.0).sqrt(),
            (1.0 - axis.z * axis.z).max(0.0).sqrt(),
        ) * self.tube.radius();
        Aabb::surrounding(
            &Aabb::from_points(base - extent, base + extent),
            &Aabb::from_points(top - extent, top + extent),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Cylinder {
        Cylinder::new(Vec3::new(2.0, 2.0, 2.0), Vec3::Z, 2.5, 10.0).unwrap()
    }

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a} != {b}");
    }

    #[test]
    fn test_normal_on_wall_and_caps() {
        let cylinder = fixture();

        // Wall.
        assert_close(cylinder.normal_at(Vec3::new(2.0, 4.5, 5.0)), Vec3::Y);
        // Top cap.
        assert_close(cylinder.normal_at(Vec3::new(1.0, 4.0, 12.0)), Vec3::Z);
        // Base cap.
        assert_close(cylinder.normal_at(Vec3::new(3.0, 2.5, 2.0)), -Vec3::Z);
    }

    #[test]
    fn test_rim_points_take_cap_normals() {
        let cylinder = fixture();
        assert_close(cylinder.normal_at(Vec3::new(2.0, 4.5, 12.0)), Vec3::Z);
        assert_close(cylinder.normal_at(Vec3::new(0.0, 2.0, 2.0)), -Vec3::Z);
    }

    #[test]
    fn test_wall_hits() {
        let cylinder = Cylinder::new(Vec3::ZERO, Vec3::Z, 1.0, 2.0).unwrap();
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 1.0), Vec3::X);

        let hits: Vec<f32> = cylinder
            .intersections(&ray, Interval::FORWARD)
            .iter()
            .collect();
        assert_eq!(hits.len(), 2);
        assert!((hits[0] - 4.0).abs() < 1e-4);
        assert!((hits[1] - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_cap_hits() {
        let cylinder = Cylinder::new(Vec3::ZERO, Vec3::Z, 1.0, 2.0).unwrap();
        let ray = Ray::new(Vec3::new(0.5, 0.0, -5.0), Vec3::Z);

        let hits: Vec<f32> = cylinder
            .intersections(&ray, Interval::FORWARD)
            .iter()
            .collect();
        assert_eq!(hits.len(), 2);
        assert!((hits[0] - 5.0).abs() < 1e-4);
        assert!((hits[1] - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_wall_beyond_height_misses() {
        let cylinder = Cylinder::new(Vec3::ZERO, Vec3::Z, 1.0, 2.0).unwrap();

        let above = Ray::new(Vec3::new(-5.0, 0.0, 2.5), Vec3::X);
        assert!(cylinder.intersections(&above, Interval::FORWARD).is_empty());

        let below = Ray::new(Vec3::new(-5.0, 0.0, -0.5), Vec3::X);
        assert!(cylinder.intersections(&below, Interval::FORWARD).is_empty());
    }

    #[test]
    fn test_ray_beside_cap_misses() {
        let cylinder = Cylinder::new(Vec3::ZERO, Vec3::Z, 1.0, 2.0).unwrap();
        let ray = Ray::new(Vec3::new(1.5, 0.0, -5.0), Vec3::Z);
        assert!(cylinder.intersections(&ray, Interval::FORWARD).is_empty());
    }

    #[test]
    fn test_bounding_box_wraps_caps() {
        let cylinder = Cylinder::new(Vec3::ZERO, Vec3::Z, 1.0, 2.0).unwrap();
        let bbox = cylinder.bounding_box();

        let through = Ray::new(Vec3::new(-5.0, 0.0, 1.0), Vec3::X);
        assert!(bbox.hit(&through, Interval::FORWARD));

        let above = Ray::new(Vec3::new(-5.0, 0.0, 3.0), Vec3::X);
        assert!(!bbox.hit(&above, Interval::FORWARD));
    }
}
