//! Glint Renderer - recursive CPU ray tracing.
//!
//! A Whitted-style renderer over the `glint_core` scene model:
//! - Phong shading with recursive reflection and refraction
//! - Soft shadows from lights with a physical radius
//! - Anti-aliasing and depth of field via distributed rays
//! - A lock-free pixel cursor feeding a worker pool
//!
//! # Example
//!
//! ```ignore
//! use glint_renderer::RenderConfig;
//!
//! let image = RenderConfig::default()
//!     .with_samples(9)
//!     .with_shadow_rays(16)
//!     .render(&scene, 500, 500, 150.0, 150.0)?;
//! image.save_png("render.png")?;
//! ```

mod framebuffer;
mod integrator;
mod renderer;
mod sampler;
mod scheduler;

pub use framebuffer::Framebuffer;
pub use integrator::Integrator;
pub use renderer::{ConfigError, ConfigResult, RenderConfig};
pub use sampler::{DepthOfField, PixelSampler};

use rand::{Rng, RngCore};

/// Re-export common math types from glint_math
pub use glint_math::{Interval, Ray, Vec3};

/// Uniform random value in `[0, 1)`.
pub(crate) fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}
