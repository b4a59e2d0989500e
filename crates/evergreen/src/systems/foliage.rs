//! Foliage particle field.
//!
//! Thousands of point sprites, each with a fixed tree target and scatter
//! target. Every frame the shared blend factor is eased and every particle's
//! rendered position and twinkle alpha are rewritten in full.

use glam::Vec3;

use crate::api::types::TreeState;
use crate::core::blend::BlendState;
use crate::extensions::easing::{lerp_vec3, Easing};
use crate::geometry::{Dimensions, RandomSource};

/// One foliage particle. Never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRecord {
    pub tree_position: Vec3,
    pub scatter_position: Vec3,
    /// Base point size before perspective attenuation.
    pub size: f32,
    /// Time offset in [0, 2π) so particles do not move in lockstep.
    pub phase: f32,
}

impl ParticleRecord {
    /// Point size of the occasional large sparkle.
    pub const LARGE_SIZE: f32 = 0.3;
    pub const SMALL_SIZE: f32 = 0.15;
    /// Chance that a particle is a large sparkle.
    pub const LARGE_CHANCE: f32 = 0.1;

    pub fn generate<R: RandomSource>(rng: &mut R, dims: &Dimensions) -> Self {
        let tree_position = dims.sample_tree(rng);
        let scatter_position = dims.sample_scatter(rng);
        let size = if rng.chance(Self::LARGE_CHANCE) {
            Self::LARGE_SIZE
        } else {
            Self::SMALL_SIZE
        };
        let phase = rng.angle();
        Self {
            tree_position,
            scatter_position,
            size,
            phase,
        }
    }

    /// Rendered position for eased blend `t`, with `amplitude` of floating noise.
    pub fn position_at(&self, t: f32, amplitude: f32, elapsed: f32) -> Vec3 {
        let mut pos = lerp_vec3(self.scatter_position, self.tree_position, t);
        if amplitude > 0.0 {
            let time = elapsed * FoliageField::NOISE_FREQUENCY;
            pos.x += (time + self.phase).sin() * amplitude;
            pos.y += (time + self.phase * 0.5).cos() * amplitude;
            pos.z += (time * 0.8 + self.phase).sin() * amplitude;
        }
        pos
    }

    /// Twinkle alpha; independent of the blend state.
    pub fn twinkle(&self, elapsed: f32) -> f32 {
        0.6 + 0.4 * (elapsed * 2.0 + self.phase).sin()
    }
}

/// Particle field controller. Owns its particles and output buffers.
///
/// Output buffers are always `len()` long and are fully rewritten on every
/// `advance`; the renderer only ever reads them.
pub struct FoliageField {
    records: Vec<ParticleRecord>,
    blend: BlendState,
    animation_speed: f32,
    easing: Easing,
    positions: Vec<Vec3>,
    alphas: Vec<f32>,
    sizes: Vec<f32>,
}

impl FoliageField {
    pub const NOISE_FREQUENCY: f32 = 0.5;
    pub const NOISE_AMPLITUDE: f32 = 0.5;
    /// Above this blend factor the field is considered formed and noise stops.
    pub const NOISE_CUTOFF: f32 = 0.99;

    pub fn new<R: RandomSource>(
        rng: &mut R,
        count: usize,
        dims: &Dimensions,
        animation_speed: f32,
    ) -> Self {
        let records = (0..count)
            .map(|_| ParticleRecord::generate(&mut *rng, dims))
            .collect();
        Self::from_records(records, animation_speed)
    }

    pub fn from_records(records: Vec<ParticleRecord>, animation_speed: f32) -> Self {
        let count = records.len();
        let sizes = records.iter().map(|r| r.size).collect();
        let mut field = Self {
            records,
            blend: BlendState::new(),
            animation_speed,
            easing: Easing::CubicInOut,
            positions: vec![Vec3::ZERO; count],
            alphas: vec![0.0; count],
            sizes,
        };
        field.write_outputs(0.0);
        field
    }

    // -- Builder pattern --

    /// Start converged on `state` instead of scattered.
    pub fn with_state(mut self, state: TreeState) -> Self {
        self.blend = BlendState::settled(state);
        self.write_outputs(0.0);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self.write_outputs(0.0);
        self
    }

    /// Amplitude of the floating noise for a given blend factor.
    pub fn noise_amplitude(&self, blend: f32) -> f32 {
        if blend >= Self::NOISE_CUTOFF {
            0.0
        } else {
            Self::NOISE_AMPLITUDE * (1.0 - self.easing.apply(blend))
        }
    }

    /// Advance one frame. Returns the updated blend factor.
    pub fn advance(&mut self, target_is_tree: bool, elapsed: f32, dt: f32) -> f32 {
        let target = TreeState::from_bool(target_is_tree);
        self.blend.advance(target, self.animation_speed, dt);
        self.write_outputs(elapsed);
        self.blend.factor()
    }

    fn write_outputs(&mut self, elapsed: f32) {
        let blend = self.blend.factor();
        let t = self.easing.apply(blend);
        let amplitude = self.noise_amplitude(blend);

        for ((record, pos), alpha) in self
            .records
            .iter()
            .zip(self.positions.iter_mut())
            .zip(self.alphas.iter_mut())
        {
            *pos = record.position_at(t, amplitude, elapsed);
            *alpha = record.twinkle(elapsed);
        }
    }

    // -- Accessors --

    pub fn blend_factor(&self) -> f32 {
        self.blend.factor()
    }

    pub fn records(&self) -> &[ParticleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Positions as a flat `[x, y, z, x, y, z, ...]` slice for upload.
    pub fn position_floats(&self) -> &[f32] {
        bytemuck::cast_slice(self.positions.as_slice())
    }

    pub fn alphas(&self) -> &[f32] {
        &self.alphas
    }

    /// Static per-particle base sizes.
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }
}
