// extensions/easing.rs
//
// Easing curves applied to the blend factor before positions are mixed.
// No dependencies on controllers, just math.

use glam::Vec3;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Cubic slow start and end: `4t³` then `1 - (-2t + 2)³ / 2`.
    CubicInOut,
    /// Hermite smoothstep `t²(3 - 2t)`. Flatter at the ends than CubicInOut
    /// in the middle, steeper near the extremes.
    SmoothStep,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Input is clamped, so the result is always in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec3 values.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Interpolate Vec3 with easing.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}

/// GLSL-style `smoothstep(edge0, edge1, x)`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 == edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    Easing::SmoothStep.apply((x - edge0) / (edge1 - edge0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_endpoints() {
        assert_eq!(Easing::Linear.apply(0.0), 0.0);
        assert_eq!(Easing::Linear.apply(1.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
    }

    #[test]
    fn curves_hit_endpoints_exactly() {
        for easing in [Easing::CubicInOut, Easing::SmoothStep] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert!((easing.apply(0.5) - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn cubic_is_slower_than_smoothstep_near_start() {
        let cubic = Easing::CubicInOut.apply(0.2);
        let smooth = Easing::SmoothStep.apply(0.2);
        assert!((cubic - 0.032).abs() < 1e-5);
        assert!((smooth - 0.104).abs() < 1e-5);
        assert!(cubic < smooth);
    }

    #[test]
    fn apply_clamps_input() {
        assert_eq!(Easing::CubicInOut.apply(-3.0), 0.0);
        assert_eq!(Easing::SmoothStep.apply(7.0), 1.0);
    }

    #[test]
    fn ease_vec3_interpolates() {
        let a = Vec3::ZERO;
        let b = Vec3::new(2.0, 4.0, -6.0);
        assert_eq!(ease_vec3(a, b, 0.5, Easing::Linear), Vec3::new(1.0, 2.0, -3.0));
        assert_eq!(ease_vec3(a, b, 1.0, Easing::SmoothStep), b);
    }

    #[test]
    fn smoothstep_edges() {
        assert_eq!(smoothstep(0.4, 0.5, 0.3), 0.0);
        assert_eq!(smoothstep(0.4, 0.5, 0.6), 1.0);
        assert!((smoothstep(0.0, 0.5, 0.25) - 0.5).abs() < 1e-6);
    }
}
