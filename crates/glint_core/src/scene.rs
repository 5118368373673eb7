//! Scene assembly.

use crate::camera::Camera;
use crate::composite::Composite;
use crate::light::{AmbientLight, Light};
use crate::material::Color;
use crate::shape::Shape;

/// Everything the renderer needs to shade a frame.
///
/// Scenes are assembled in code: construct, add shapes and lights, then
/// build the hierarchy once the geometry is complete.
#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,

    /// All geometry, behind the optional acceleration tree.
    pub geometry: Composite,

    pub lights: Vec<Light>,

    /// Ambient term, applied once at the primary hit.
    pub ambient: AmbientLight,

    /// Color of primary rays that escape the scene.
    pub background: Color,

    /// Distance from the camera to the simulated view plane.
    pub view_distance: f32,
}

impl Scene {
    pub fn new(camera: Camera, view_distance: f32) -> Self {
        Self {
            camera,
            geometry: Composite::new(),
            lights: Vec::new(),
            ambient: AmbientLight::NONE,
            background: Color::ZERO,
            view_distance,
        }
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.geometry.add(shape);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Build the acceleration tree over everything added so far.
    pub fn build_hierarchy(&mut self) {
        self.geometry.build_hierarchy();
    }
}
