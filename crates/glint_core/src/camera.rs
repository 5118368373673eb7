use glint_math::{near_zero, Vec3};

use crate::error::{SceneError, SceneResult};

/// Camera position and orientation.
///
/// Holds the orthonormal basis the sampler builds pixel rays from; the
/// view-plane geometry (distance, size, resolution) lives with the
/// renderer. `right` is derived as `forward x up`, so with `forward = +Z`
/// and `up = -Y` the image x axis runs along `+X`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub origin: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,
}

impl Camera {
    /// Build a camera at `origin` looking along `forward` with `up` above.
    ///
    /// Both direction vectors are normalized here; they must be non-zero
    /// and orthogonal to each other.
    pub fn new(origin: Vec3, forward: Vec3, up: Vec3) -> SceneResult<Self> {
        let forward = forward.try_normalize().ok_or(SceneError::ZeroDirection)?;
        let up = up.try_normalize().ok_or(SceneError::ZeroDirection)?;
        if !near_zero(forward.dot(up)) {
            return Err(SceneError::SkewedBasis);
        }
        Ok(Self {
            origin,
            forward,
            up,
            right: forward.cross(up),
        })
    }
}
