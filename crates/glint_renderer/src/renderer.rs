//! Render entry point and configuration.

use std::num::NonZeroUsize;
use std::thread;

use glint_core::Scene;
use thiserror::Error;

use crate::sampler::{DepthOfField, PixelSampler};
use crate::scheduler::{PixelCursor, SharedPixels};
use crate::{Framebuffer, Integrator};

/// Cores left to the rest of the machine when picking a thread count.
const SPARE_THREADS: usize = 2;

/// Errors raised by [`RenderConfig::render`] before any pixel is traced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("anti-aliasing sample count must be a positive perfect square, got {got}")]
    SamplesNotSquare { got: usize },
    #[error("depth of field needs at least one aperture ray")]
    ZeroApertureRays,
    #[error("aperture area must be non-negative, got {got}")]
    NegativeAperture { got: f32 },
    #[error("focal distance must be positive and finite, got {got}")]
    InvalidFocalDistance { got: f32 },
    #[error("soft shadows need at least one shadow ray")]
    ZeroShadowRays,
    #[error("image must be at least one pixel in each dimension")]
    EmptyImage,
    #[error("view distance must be positive and finite, got {got}")]
    InvalidViewDistance { got: f32 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Anti-aliasing rays per pixel; must be a perfect square
    pub samples: usize,
    /// Lens simulation; `None` keeps the pinhole camera
    pub depth_of_field: Option<DepthOfField>,
    /// Shadow rays per light for lights with a radius
    pub shadow_rays: usize,
    /// Worker threads; zero picks a count from the machine
    pub threads: usize,
    /// Maximum recursion depth for reflection and refraction
    pub max_depth: u32,
    /// Attenuation below which recursive contributions are dropped
    pub min_weight: f32,
    /// Log progress while rendering
    pub progress: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples: 1,
            depth_of_field: None,
            shadow_rays: 1,
            threads: 0,
            max_depth: 10,
            min_weight: 0.01,
            progress: false,
        }
    }
}

impl RenderConfig {
    /// Set the anti-aliasing rays per pixel.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Enable depth of field.
    pub fn with_depth_of_field(mut self, lens: DepthOfField) -> Self {
        self.depth_of_field = Some(lens);
        self
    }

    /// Set the shadow rays per light.
    pub fn with_shadow_rays(mut self, rays: usize) -> Self {
        self.shadow_rays = rays;
        self
    }

    /// Set an explicit worker thread count; zero selects automatically.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Log progress while rendering.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Render `scene` into an `nx` by `ny` image whose view plane covers
    /// `width` by `height` scene units.
    pub fn render(
        &self,
        scene: &Scene,
        nx: usize,
        ny: usize,
        width: f32,
        height: f32,
    ) -> ConfigResult<Framebuffer> {
        self.validate(scene, nx, ny, width, height)?;

        let mut sampler =
            PixelSampler::new(&scene.camera, nx, ny, width, height, scene.view_distance)
                .with_samples(self.samples);
        if let Some(lens) = self.depth_of_field {
            sampler = sampler.with_depth_of_field(lens);
        }
        let integrator = Integrator::new(scene, self.max_depth, self.min_weight, self.shadow_rays);
        let cursor = PixelCursor::new(nx, ny, self.progress);
        let workers = self.worker_threads();
        log::info!("Rendering {}x{} pixels on {} threads", nx, ny, workers);

        let mut image = Framebuffer::new(nx, ny);
        {
            let slots = SharedPixels::new(&mut image.pixels);
            thread::scope(|scope| {
                for _ in 0..workers {
                    scope.spawn(|| {
                        let mut rng = rand::thread_rng();
                        while let Some((row, col)) = cursor.claim() {
                            let rays = sampler.rays_through_pixel(col, row, &mut rng);
                            slots.write(row * nx + col, integrator.trace(&rays, &mut rng));
                        }
                    });
                }
            });
        }
        log::info!("Finished rendering {} pixels", nx * ny);
        Ok(image)
    }

    fn validate(
        &self,
        scene: &Scene,
        nx: usize,
        ny: usize,
        width: f32,
        height: f32,
    ) -> ConfigResult<()> {
        if nx == 0 || ny == 0 || width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::EmptyImage);
        }
        if self.samples == 0 || !is_square(self.samples) {
            return Err(ConfigError::SamplesNotSquare { got: self.samples });
        }
        if self.shadow_rays == 0 {
            return Err(ConfigError::ZeroShadowRays);
        }
        if let Some(lens) = &self.depth_of_field {
            if lens.rays == 0 {
                return Err(ConfigError::ZeroApertureRays);
            }
            if lens.aperture < 0.0 {
                return Err(ConfigError::NegativeAperture { got: lens.aperture });
            }
            if lens.focal_distance <= 0.0 || !lens.focal_distance.is_finite() {
                return Err(ConfigError::InvalidFocalDistance {
                    got: lens.focal_distance,
                });
            }
        }
        if scene.view_distance <= 0.0 || !scene.view_distance.is_finite() {
            return Err(ConfigError::InvalidViewDistance {
                got: scene.view_distance,
            });
        }
        Ok(())
    }

    /// Worker count: an explicit setting wins, otherwise the machine's
    /// cores minus a spare for the rest of the system.
    fn worker_threads(&self) -> usize {
        if self.threads != 0 {
            return self.threads;
        }
        let cores = thread::available_parallelism()
            .map_or(1, NonZeroUsize::get)
            .saturating_sub(SPARE_THREADS);
        if cores <= 2 {
            1
        } else {
            cores
        }
    }
}

fn is_square(n: usize) -> bool {
    let root = (n as f64).sqrt().round() as usize;
    root * root == n
}
