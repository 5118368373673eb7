//! Whitted shading with recursive reflection and refraction.
//!
//! Each intersection gathers emission and per-light Phong terms gated by
//! shadow transparency, then spawns reflected and refracted rays while
//! the accumulated attenuation stays above a cutoff weight.

use glint_core::{Color, GeoPoint, Light, Scene};
use glint_math::{near_zero, Interval, Ray, Vec3};
use rand::RngCore;

use crate::sampler::random_in_disk;

/// Shades intersections against a scene.
pub struct Integrator<'a> {
    scene: &'a Scene,
    max_depth: u32,
    min_weight: f32,
    shadow_rays: usize,
}

impl<'a> Integrator<'a> {
    pub fn new(scene: &'a Scene, max_depth: u32, min_weight: f32, shadow_rays: usize) -> Self {
        Self {
            scene,
            max_depth,
            min_weight,
            shadow_rays,
        }
    }

    /// Average color over a pixel's primary rays.
    ///
    /// Rays that cross the whole scene contribute the background color.
    pub fn trace(&self, rays: &[Ray], rng: &mut dyn RngCore) -> Color {
        debug_assert!(!rays.is_empty());
        let mut color = Color::ZERO;
        for ray in rays {
            color += match self.closest_hit(ray, Interval::FORWARD) {
                Some(hit) => self.shade(&hit, ray, rng),
                None => self.scene.background,
            };
        }
        color / rays.len() as f32
    }

    /// Color of a single intersection, ambient light included.
    fn shade(&self, hit: &GeoPoint<'_>, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        self.shade_at(hit, ray, self.max_depth, 1.0, rng) + self.scene.ambient.intensity()
    }

    fn shade_at(
        &self,
        hit: &GeoPoint<'_>,
        ray: &Ray,
        level: u32,
        weight: f32,
        rng: &mut dyn RngCore,
    ) -> Color {
        if level == 0 {
            return Color::ZERO;
        }
        let point = hit.point;
        let normal = hit.shape.normal_at(point);
        let v = (point - self.scene.camera.origin).normalize();
        let material = hit.shape.material;

        let mut color = hit.shape.emission;

        for light in &self.scene.lights {
            let l = light.direction_to(point);
            // The light and the viewer must see the surface from the same
            // side, otherwise neither Phong term reflects toward the camera.
            if l.dot(normal) * v.dot(normal) <= 0.0 {
                continue;
            }
            let ktr = self.transparency(light, l, normal, hit, rng);
            if ktr * weight <= self.min_weight {
                continue;
            }
            let intensity = light.intensity_at(point) * ktr;
            color += diffuse(material.kd, l, normal, intensity)
                + specular(material.ks, l, normal, v, material.shininess, intensity);
        }

        let reflect_weight = weight * material.kr;
        if reflect_weight > self.min_weight {
            let direction = ray.direction - normal * (2.0 * normal.dot(ray.direction));
            let reflected = Ray::offset(point, direction, normal);
            if let Some(next) = self.closest_hit(&reflected, Interval::FORWARD) {
                color +=
                    self.shade_at(&next, &reflected, level - 1, reflect_weight, rng) * material.kr;
            }
        }

        let refract_weight = weight * material.kt;
        if refract_weight > self.min_weight {
            // The refracted ray keeps its direction; the offset moves its
            // origin through to the far side of the surface.
            let refracted = Ray::offset(point, ray.direction, normal);
            if let Some(next) = self.closest_hit(&refracted, Interval::FORWARD) {
                color +=
                    self.shade_at(&next, &refracted, level - 1, refract_weight, rng) * material.kt;
            }
        }

        color
    }

    /// The nearest admitted intersection along `ray`.
    ///
    /// Ties on distance keep the hit found first, which follows the
    /// query's shape order.
    fn closest_hit(&self, ray: &Ray, limit: Interval) -> Option<GeoPoint<'a>> {
        let mut nearest: Option<GeoPoint<'a>> = None;
        for hit in self.scene.geometry.intersections(ray, limit) {
            if nearest.map_or(true, |best| hit.t < best.t) {
                nearest = Some(hit);
            }
        }
        nearest
    }

    /// Average transmission along shadow rays from `hit` toward `light`.
    ///
    /// Lights with a radius spread the rays over their disk, which grades
    /// the shadow edge instead of cutting it sharply.
    fn transparency(
        &self,
        light: &Light,
        l: Vec3,
        normal: Vec3,
        hit: &GeoPoint<'_>,
        rng: &mut dyn RngCore,
    ) -> f32 {
        let toward_light = -l;
        let center = Ray::offset(hit.point, toward_light, normal);
        let light_distance = light.distance_to(hit.point);

        let mut rays = vec![center];
        let radius = light.radius();
        if radius > 0.0 && light_distance.is_finite() && self.shadow_rays > 1 {
            let right = toward_light.any_orthonormal_vector();
            let up = toward_light.cross(right);
            let disk_center = center.at(light_distance);
            for _ in 1..self.shadow_rays {
                let (du, dv) = random_in_disk(radius, rng);
                let target = disk_center + right * du + up * dv;
                rays.push(Ray::new(center.origin, target - center.origin));
            }
        }

        let limit = Interval::new(0.0, light_distance);
        let mut total = 0.0;
        for ray in &rays {
            total += self.transmission(ray, limit);
        }
        total / rays.len() as f32
    }

    /// Product of transmission coefficients over blockers along one ray.
    fn transmission(&self, ray: &Ray, limit: Interval) -> f32 {
        let mut factor = 1.0;
        for blocker in self.scene.geometry.intersections(ray, limit) {
            factor *= blocker.shape.material.kt;
            if factor < self.min_weight {
                break;
            }
        }
        factor
    }
}

/// Diffuse term: light scattered evenly regardless of view direction.
fn diffuse(kd: f32, l: Vec3, normal: Vec3, intensity: Color) -> Color {
    let ln = l.dot(normal);
    if near_zero(ln) {
        return Color::ZERO;
    }
    intensity * (kd * ln.abs())
}

/// Specular term: the mirror highlight around the reflected light direction.
fn specular(ks: f32, l: Vec3, normal: Vec3, v: Vec3, shininess: i32, intensity: Color) -> Color {
    let ln = l.dot(normal);
    if near_zero(ln) {
        return Color::ZERO;
    }
    let r = l - normal * (2.0 * ln);
    intensity * (ks * (-v.dot(r)).max(0.0).powi(shininess))
}
