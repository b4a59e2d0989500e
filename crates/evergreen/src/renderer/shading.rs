//! Point-sprite shading contract for the foliage pass.
//!
//! The renderer draws each particle as a round sprite: a radial gradient from
//! `core` to `rim`, a soft edge, and the per-particle twinkle alpha. These
//! functions are the CPU reference of that shader so hosts without a custom
//! point shader (and tests) get identical results.

use super::palette::{Color, EMERALD_LIGHT, GOLD_METALLIC};
use crate::extensions::easing::{lerp, smoothstep};

/// Numerator of the perspective size attenuation (`size * K / depth`).
pub const SIZE_ATTENUATION: f32 = 300.0;

/// Uniform values for the foliage point shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoliageShading {
    pub core: Color,
    pub rim: Color,
}

impl Default for FoliageShading {
    fn default() -> Self {
        Self {
            core: EMERALD_LIGHT,
            rim: GOLD_METALLIC,
        }
    }
}

impl FoliageShading {
    /// Color at distance `dist` from the sprite center (0.0 center, 0.5 edge).
    /// The squared gradient keeps most of the sprite on the core color.
    pub fn radial_color(&self, dist: f32) -> Color {
        let g = smoothstep(0.0, 0.5, dist);
        let t = g * g;
        Color::new(
            lerp(self.core.r, self.rim.r, t),
            lerp(self.core.g, self.rim.g, t),
            lerp(self.core.b, self.rim.b, t),
        )
    }
}

/// Alpha at distance `dist` from the sprite center; 0 outside the disc.
pub fn radial_alpha(dist: f32, twinkle: f32) -> f32 {
    if dist > 0.5 {
        return 0.0;
    }
    (1.0 - smoothstep(0.4, 0.5, dist)) * twinkle
}

/// On-screen point size for a particle of `base_size` at `view_depth`
/// units in front of the camera. Points at or behind the camera get 0.
pub fn point_size(base_size: f32, view_depth: f32) -> f32 {
    if view_depth <= 0.0 || !view_depth.is_finite() {
        return 0.0;
    }
    base_size * SIZE_ATTENUATION / view_depth
}
