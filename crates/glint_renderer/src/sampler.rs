//! Primary ray generation for the view plane.

use glint_core::Camera;
use glint_math::{near_zero, Ray, Vec3};
use rand::RngCore;

use crate::gen_f32;

/// Thin lens parameters for depth of field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthOfField {
    /// Rays per aperture bundle, the focused base ray included.
    pub rays: usize,
    /// Distance from the camera to the surface in perfect focus.
    pub focal_distance: f32,
    /// Aperture disk area, in units of pixel area on the view plane.
    pub aperture: f32,
}

/// Generates the primary rays for every pixel of the view plane.
///
/// The view plane sits `distance` in front of the camera and covers
/// `width` by `height` scene units split into `nx` by `ny` pixels.
/// Pixel `(0, 0)` is the top-left corner as seen along the camera's
/// forward axis.
pub struct PixelSampler<'a> {
    camera: &'a Camera,
    nx: usize,
    ny: usize,
    pixel_width: f32,
    pixel_height: f32,
    distance: f32,
    samples: usize,
    depth_of_field: Option<DepthOfField>,
}

impl<'a> PixelSampler<'a> {
    /// Sampler producing one centered ray per pixel.
    pub fn new(
        camera: &'a Camera,
        nx: usize,
        ny: usize,
        width: f32,
        height: f32,
        distance: f32,
    ) -> Self {
        Self {
            camera,
            nx,
            ny,
            pixel_width: width / nx as f32,
            pixel_height: height / ny as f32,
            distance,
            samples: 1,
            depth_of_field: None,
        }
    }

    /// Anti-aliasing rays per pixel; must be a perfect square.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Replace every primary ray with a bundle over the aperture disk.
    pub fn with_depth_of_field(mut self, lens: DepthOfField) -> Self {
        self.depth_of_field = Some(lens);
        self
    }

    /// Center of pixel `(col, row)` on the view plane.
    ///
    /// Offsets that land exactly on the plane center are skipped so no
    /// zero-length basis vector is ever scaled.
    fn pixel_point(&self, col: usize, row: usize) -> Vec3 {
        let camera = self.camera;
        let mut point = camera.origin + camera.forward * self.distance;
        let x = (col as f32 - self.nx as f32 / 2.0) * self.pixel_width + self.pixel_width / 2.0;
        let y = (row as f32 - self.ny as f32 / 2.0) * self.pixel_height + self.pixel_height / 2.0;
        if !near_zero(x) {
            point += camera.right * x;
        }
        if !near_zero(y) {
            point -= camera.up * y;
        }
        point
    }

    /// The ray from the camera through the center of pixel `(col, row)`.
    pub fn center_ray(&self, col: usize, row: usize) -> Ray {
        let origin = self.camera.origin;
        Ray::new(origin, self.pixel_point(col, row) - origin)
    }

    /// All primary rays for pixel `(col, row)`.
    ///
    /// With one sample this is the single centered ray; otherwise a
    /// jittered square grid across the pixel replaces it. Depth of field
    /// then spreads every ray into its aperture bundle.
    pub fn rays_through_pixel(&self, col: usize, row: usize, rng: &mut dyn RngCore) -> Vec<Ray> {
        let rays = if self.samples == 1 {
            vec![self.center_ray(col, row)]
        } else {
            self.grid_rays(col, row, rng)
        };
        match &self.depth_of_field {
            Some(lens) if lens.rays > 1 => {
                let mut bundled = Vec::with_capacity(rays.len() * lens.rays);
                for ray in &rays {
                    self.aperture_bundle(ray, lens, rng, &mut bundled);
                }
                bundled
            }
            _ => rays,
        }
    }

    /// One jittered ray through each cell of a square grid over the pixel.
    fn grid_rays(&self, col: usize, row: usize, rng: &mut dyn RngCore) -> Vec<Ray> {
        let camera = self.camera;
        let center = self.pixel_point(col, row);
        let side = (self.samples as f32).sqrt().round() as usize;
        let cell_width = self.pixel_width / side as f32;
        let cell_height = self.pixel_height / side as f32;
        let mut rays = Vec::with_capacity(self.samples);
        for a in 0..side {
            for b in 0..side {
                let x = (a as f32 + gen_f32(rng)) * cell_width - self.pixel_width / 2.0;
                let y = (b as f32 + gen_f32(rng)) * cell_height - self.pixel_height / 2.0;
                let point = center + camera.right * x - camera.up * y;
                rays.push(Ray::new(camera.origin, point - camera.origin));
            }
        }
        rays
    }

    /// The base ray plus rays from random aperture points toward its focal
    /// point. Objects at the focal distance stay sharp while everything
    /// nearer or farther spreads across the bundle.
    fn aperture_bundle(
        &self,
        base: &Ray,
        lens: &DepthOfField,
        rng: &mut dyn RngCore,
        out: &mut Vec<Ray>,
    ) {
        let camera = self.camera;
        let focal_point = base.at(lens.focal_distance);
        let radius = (lens.aperture * self.pixel_width * self.pixel_height).sqrt() / 2.0;
        out.push(*base);
        for _ in 1..lens.rays {
            let (dx, dy) = random_in_disk(radius, rng);
            let origin = base.origin + camera.right * dx + camera.up * dy;
            out.push(Ray::new(origin, focal_point - origin));
        }
    }
}

/// Uniform random offsets within a disk of `radius`, by rejection.
pub(crate) fn random_in_disk(radius: f32, rng: &mut dyn RngCore) -> (f32, f32) {
    loop {
        let u = gen_f32(rng) * 2.0 - 1.0;
        let v = gen_f32(rng) * 2.0 - 1.0;
        if u * u + v * v < 1.0 {
            return (u * radius, v * radius);
        }
    }
}
