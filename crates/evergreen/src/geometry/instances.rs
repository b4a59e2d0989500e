//! Paired tree/scatter targets for instanced ornaments.

use std::f32::consts::PI;

use glam::Vec3;

use super::rng::RandomSource;
use super::sampling::{sample_cone_volume, sample_sphere_volume};

pub const MIN_SCALE: f32 = 0.5;
pub const SCALE_SPAN: f32 = 0.8;
/// Per-axis spin speed lies in [-MAX_SPIN, MAX_SPIN] radians per frame.
pub const MAX_SPIN: f32 = 0.01;

/// Sizes of the two target volumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub tree_height: f32,
    pub tree_base_radius: f32,
    pub scatter_radius: f32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            tree_height: 12.0,
            tree_base_radius: 5.0,
            scatter_radius: 25.0,
        }
    }
}

impl Dimensions {
    pub fn sample_tree<R: RandomSource>(&self, rng: &mut R) -> Vec3 {
        sample_cone_volume(rng, self.tree_height, self.tree_base_radius)
    }

    pub fn sample_scatter<R: RandomSource>(&self, rng: &mut R) -> Vec3 {
        sample_sphere_volume(rng, self.scatter_radius)
    }
}

/// Generated parameters for one ornament.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnamentSeed {
    pub tree_position: Vec3,
    pub scatter_position: Vec3,
    /// Initial XYZ euler angles in radians.
    pub rotation: Vec3,
    /// Per-axis angular velocity in radians per frame.
    pub rotation_speed: Vec3,
    /// Uniform scale in [0.5, 1.3).
    pub scale: f32,
    /// Oscillation phase in [0, 2π).
    pub phase_offset: f32,
}

impl OrnamentSeed {
    pub fn generate<R: RandomSource>(rng: &mut R, dims: &Dimensions) -> Self {
        let tree_position = dims.sample_tree(rng);
        let scatter_position = dims.sample_scatter(rng);
        let rotation = Vec3::new(rng.next_f32() * PI, rng.next_f32() * PI, 0.0);
        let scale = MIN_SCALE + rng.next_f32() * SCALE_SPAN;
        let rotation_speed = Vec3::new(
            rng.range(-MAX_SPIN, MAX_SPIN),
            rng.range(-MAX_SPIN, MAX_SPIN),
            rng.range(-MAX_SPIN, MAX_SPIN),
        );
        let phase_offset = rng.angle();
        Self {
            tree_position,
            scatter_position,
            rotation,
            rotation_speed,
            scale,
            phase_offset,
        }
    }
}

/// Generate `count` ornaments, each with a cone target and a sphere target.
pub fn generate_paired_instances<R: RandomSource>(
    rng: &mut R,
    count: usize,
    dims: &Dimensions,
) -> Vec<OrnamentSeed> {
    (0..count).map(|_| OrnamentSeed::generate(&mut *rng, dims)).collect()
}
