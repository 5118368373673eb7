use thiserror::Error;

/// Errors raised while assembling a scene.
///
/// These are all construction-time failures: a malformed shape, light or
/// camera is rejected before rendering starts. Per-ray numerical
/// degeneracies are never errors; the kernels absorb them as misses.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("direction vector has zero length")]
    ZeroDirection,

    #[error("camera forward and up vectors are not orthogonal")]
    SkewedBasis,

    #[error("polygon needs at least 3 vertices, got {got}")]
    TooFewVertices { got: usize },

    #[error("polygon has two consecutive identical vertices")]
    RepeatedVertex,

    #[error("polygon vertex lies outside the supporting plane")]
    NonCoplanarVertex,

    #[error("polygon is not convex or its vertices are not ordered")]
    NonConvexPolygon,
}

pub type SceneResult<T> = Result<T, SceneError>;
