use glint_math::Vec3;

use crate::error::{SceneError, SceneResult};
use crate::material::Color;

/// Ambient light: a constant term added exactly once per primary ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// Build from a base color and the ambient coefficient `ka`.
    pub fn new(color: Color, ka: f32) -> Self {
        Self {
            intensity: color * ka,
        }
    }

    /// No ambient contribution at all.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Vec3::ZERO,
    };

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

/// Distance attenuation for positional lights:
/// `intensity / (constant + linear*d + quadratic*d^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    pub fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    /// No falloff with distance.
    pub const NONE: Attenuation = Attenuation {
        constant: 1.0,
        linear: 0.0,
        quadratic: 0.0,
    };

    fn factor(&self, distance: f32) -> f32 {
        self.constant + self.linear * distance + self.quadratic * distance * distance
    }
}

/// A light source. The set of kinds is closed; shading dispatches on the
/// variant through the query methods below.
///
/// A positive `radius` turns a positional light into an area light: shadow
/// rays sample a disk of that radius perpendicular to the shadow direction,
/// which is what produces penumbras. Directional lights have no surface and
/// therefore no radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Directional {
        intensity: Color,
        direction: Vec3,
    },
    Point {
        intensity: Color,
        position: Vec3,
        attenuation: Attenuation,
        radius: f32,
    },
    Spot {
        intensity: Color,
        position: Vec3,
        direction: Vec3,
        attenuation: Attenuation,
        radius: f32,
    },
}

impl Light {
    /// A light infinitely far away, shining uniformly along `direction`.
    pub fn directional(intensity: Color, direction: Vec3) -> SceneResult<Self> {
        let direction = direction
            .try_normalize()
            .ok_or(SceneError::ZeroDirection)?;
        Ok(Self::Directional {
            intensity,
            direction,
        })
    }

    /// An omnidirectional light at `position`.
    pub fn point(intensity: Color, position: Vec3, attenuation: Attenuation) -> Self {
        Self::Point {
            intensity,
            position,
            attenuation,
            radius: 0.0,
        }
    }

    /// A point light concentrated along `direction`; intensity scales with
    /// the cosine between the beam axis and the lit point.
    pub fn spot(
        intensity: Color,
        position: Vec3,
        direction: Vec3,
        attenuation: Attenuation,
    ) -> SceneResult<Self> {
        let direction = direction
            .try_normalize()
            .ok_or(SceneError::ZeroDirection)?;
        Ok(Self::Spot {
            intensity,
            position,
            direction,
            attenuation,
            radius: 0.0,
        })
    }

    /// Give a positional light a physical radius for soft shadows.
    /// Has no effect on directional lights.
    pub fn with_radius(mut self, r: f32) -> Self {
        match &mut self {
            Self::Point { radius, .. } | Self::Spot { radius, .. } => *radius = r,
            Self::Directional { .. } => {}
        }
        self
    }

    /// Light arriving at `point`, after attenuation and beam falloff.
    pub fn intensity_at(&self, point: Vec3) -> Color {
        match self {
            Self::Directional { intensity, .. } => *intensity,
            Self::Point {
                intensity,
                position,
                attenuation,
                ..
            } => *intensity / attenuation.factor(position.distance(point)),
            Self::Spot {
                intensity,
                position,
                direction,
                attenuation,
                ..
            } => {
                let beam = direction.dot(self.direction_to(point)).max(0.0);
                *intensity * beam / attenuation.factor(position.distance(point))
            }
        }
    }

    /// Unit vector from the light toward `point`.
    pub fn direction_to(&self, point: Vec3) -> Vec3 {
        match self {
            Self::Directional { direction, .. } => *direction,
            Self::Point { position, .. } | Self::Spot { position, .. } => {
                (point - *position).normalize()
            }
        }
    }

    /// Distance from the light to `point`; infinite for directional lights,
    /// so every blocker along a shadow ray counts.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        match self {
            Self::Directional { .. } => f32::INFINITY,
            Self::Point { position, .. } | Self::Spot { position, .. } => {
                position.distance(point)
            }
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            Self::Directional { .. } => 0.0,
            Self::Point { radius, .. } | Self::Spot { radius, .. } => *radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambient_scales_by_ka() {
        let ambient = AmbientLight::new(Vec3::new(1.0, 0.8, 0.6), 0.5);
        assert_eq!(ambient.intensity(), Vec3::new(0.5, 0.4, 0.3));
        assert_eq!(AmbientLight::NONE.intensity(), Vec3::ZERO);
    }

    #[test]
    fn test_directional_is_uniform() {
        let light = Light::directional(Vec3::ONE, Vec3::new(0.0, 0.0, 2.0)).unwrap();
        assert_eq!(light.direction_to(Vec3::ZERO), Vec3::Z);
        assert_eq!(light.direction_to(Vec3::new(5.0, -3.0, 8.0)), Vec3::Z);
        assert_eq!(light.intensity_at(Vec3::new(100.0, 0.0, 0.0)), Vec3::ONE);
        assert_eq!(light.distance_to(Vec3::ZERO), f32::INFINITY);
        assert_eq!(light.radius(), 0.0);
    }

    #[test]
    fn test_directional_rejects_zero_direction() {
        assert_eq!(
            Light::directional(Vec3::ONE, Vec3::ZERO),
            Err(SceneError::ZeroDirection)
        );
    }

    #[test]
    fn test_point_attenuation() {
        let light = Light::point(
            Vec3::splat(8.0),
            Vec3::ZERO,
            Attenuation::new(1.0, 0.0, 1.0),
        );
        // d = 0: factor 1.
        assert_eq!(light.intensity_at(Vec3::ZERO), Vec3::splat(8.0));
        // d = 1: factor 1 + 1 = 2.
        assert_eq!(light.intensity_at(Vec3::X), Vec3::splat(4.0));
        // d = 3: factor 1 + 9 = 10.
        let at3 = light.intensity_at(Vec3::new(3.0, 0.0, 0.0));
        assert!((at3.x - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_point_direction_and_distance() {
        let light = Light::point(Vec3::ONE, Vec3::new(0.0, 4.0, 0.0), Attenuation::NONE);
        assert_eq!(light.direction_to(Vec3::ZERO), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(light.distance_to(Vec3::ZERO), 4.0);
    }

    #[test]
    fn test_spot_beam_falloff() {
        let light = Light::spot(Vec3::splat(2.0), Vec3::ZERO, Vec3::Z, Attenuation::NONE)
            .unwrap();

        // On the beam axis: full intensity.
        let on_axis = light.intensity_at(Vec3::new(0.0, 0.0, 5.0));
        assert!((on_axis.x - 2.0).abs() < 1e-6);

        // 45 degrees off-axis: scaled by cos(45).
        let off = light.intensity_at(Vec3::new(5.0, 0.0, 5.0));
        assert!((off.x - 2.0 * std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);

        // Behind the light: clamped to black.
        let behind = light.intensity_at(Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(behind, Vec3::ZERO);
    }

    #[test]
    fn test_with_radius() {
        let area = Light::point(Vec3::ONE, Vec3::ZERO, Attenuation::NONE).with_radius(20.0);
        assert_eq!(area.radius(), 20.0);

        let sun = Light::directional(Vec3::ONE, Vec3::Z).unwrap().with_radius(5.0);
        assert_eq!(sun.radius(), 0.0);
    }
}
