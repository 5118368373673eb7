use glint_math::Vec3;

/// RGB color with linear f32 channels.
///
/// Nominally 0..1 per channel, but shading accumulates unbounded energy;
/// values are clamped only when written out to an image.
pub type Color = Vec3;

/// Phong material coefficients.
///
/// `kd`/`ks` weight the diffuse and specular terms, `kt`/`kr` the
/// transparency and reflection recursion. The weights are the scene
/// author's responsibility; nothing enforces an energy budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub kd: f32,
    pub ks: f32,
    pub shininess: i32,
    pub kt: f32,
    pub kr: f32,
}

impl Material {
    /// An opaque, non-reflective material.
    pub fn new(kd: f32, ks: f32, shininess: i32) -> Self {
        Self {
            kd,
            ks,
            shininess,
            kt: 0.0,
            kr: 0.0,
        }
    }

    /// Full set of coefficients, including transparency and reflection.
    pub fn with_transmission(kd: f32, ks: f32, shininess: i32, kt: f32, kr: f32) -> Self {
        Self {
            kd,
            ks,
            shininess,
            kt,
            kr,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0)
    }
}
