//! Glint Core - Scene model for the glint ray tracer.
//!
//! This crate provides:
//!
//! - **Materials and lights**: `Material`, `AmbientLight`, `Light`
//! - **Shape kernels**: `Shape`/`Surface` (plane, sphere, triangle,
//!   polygon, tube, cylinder) with exact ray intersection routines
//! - **Aggregation**: `Composite` with an optional bounding-volume
//!   hierarchy built by pairwise agglomeration
//! - **Scene assembly**: `Camera`, `Scene`
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{Camera, Scene, Shape, Surface, Material};
//! use glint_math::Vec3;
//!
//! let camera = Camera::new(Vec3::ZERO, Vec3::Z, Vec3::Y)?;
//! let mut scene = Scene::new(camera, 1000.0);
//! scene.add_shape(Shape::new(
//!     Surface::sphere(Vec3::new(0.0, 0.0, 50.0), 25.0),
//!     Vec3::new(0.0, 0.0, 0.5),
//!     Material::new(0.5, 0.5, 100),
//! ));
//! scene.build_hierarchy();
//! ```

pub mod camera;
pub mod composite;
pub mod error;
pub mod light;
pub mod material;
pub mod scene;
pub mod shape;

// Re-export commonly used types
pub use camera::Camera;
pub use composite::Composite;
pub use error::{SceneError, SceneResult};
pub use light::{AmbientLight, Attenuation, Light};
pub use material::{Color, Material};
pub use scene::Scene;
pub use shape::{GeoPoint, Shape, Surface};
