//! Instanced ornament groups.
//!
//! Each group is one instanced mesh (spheres or boxes). Positions blend
//! between the paired targets like the foliage does, but with a smoothstep
//! curve, a gentler float, and a persistent per-instance spin.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::api::types::TreeState;
use crate::core::blend::BlendState;
use crate::extensions::easing::{lerp_vec3, Easing};
use crate::geometry::{generate_paired_instances, Dimensions, OrnamentSeed, RandomSource};
use crate::renderer::palette::{Color, OrnamentPalette};

/// Mesh the renderer instantiates for a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrnamentMesh {
    Sphere { radius: f32, width_segments: u32, height_segments: u32 },
    Cube { size: f32 },
}

impl OrnamentMesh {
    /// Flat descriptor for hosts: `[radius, width_segments, height_segments]`
    /// for spheres, `[size, size, size]` for cubes.
    pub fn descriptor(self) -> [f32; 3] {
        match self {
            OrnamentMesh::Sphere { radius, width_segments, height_segments } => {
                [radius, width_segments as f32, height_segments as f32]
            }
            OrnamentMesh::Cube { size } => [size; 3],
        }
    }
}

/// Which shape a group instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrnamentShape {
    Sphere,
    Box,
}

impl OrnamentShape {
    pub const ALL: [OrnamentShape; 2] = [OrnamentShape::Sphere, OrnamentShape::Box];

    pub fn mesh(self) -> OrnamentMesh {
        match self {
            OrnamentShape::Sphere => OrnamentMesh::Sphere {
                radius: 0.2,
                width_segments: 16,
                height_segments: 16,
            },
            OrnamentShape::Box => OrnamentMesh::Cube { size: 0.3 },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OrnamentShape::Sphere => "sphere",
            OrnamentShape::Box => "box",
        }
    }
}

/// One ornament. `rotation` is the only field that changes after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnamentInstance {
    pub tree_position: Vec3,
    pub scatter_position: Vec3,
    /// Accumulated XYZ euler angles in radians.
    pub rotation: Vec3,
    pub rotation_speed: Vec3,
    pub scale: f32,
    pub phase_offset: f32,
    pub color: Color,
}

impl OrnamentInstance {
    pub fn from_seed(seed: OrnamentSeed, color: Color) -> Self {
        Self {
            tree_position: seed.tree_position,
            scatter_position: seed.scatter_position,
            rotation: seed.rotation,
            rotation_speed: seed.rotation_speed,
            scale: seed.scale,
            phase_offset: seed.phase_offset,
            color,
        }
    }

    /// Rendered position for eased blend `smooth_t` and raw blend factor `blend`.
    pub fn position_at(&self, smooth_t: f32, blend: f32, elapsed: f32) -> Vec3 {
        let mut pos = lerp_vec3(self.scatter_position, self.tree_position, smooth_t);
        let amplitude = OrnamentGroup::float_amplitude(blend);
        if amplitude > 0.0 {
            pos.y += (elapsed + self.phase_offset).sin() * amplitude;
            pos.x += (elapsed * 0.5 + self.phase_offset).cos() * amplitude;
        }
        pos
    }

    /// Advance the spin by one frame. Scattered ornaments spin at twice
    /// their base rate, formed ones at the base rate.
    pub fn spin(&mut self, blend: f32) {
        self.rotation += self.rotation_speed * (2.0 - blend);
    }

    pub fn transform(&self, position: Vec3) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, position)
    }
}

/// Pick the gold or accent color and nudge its lightness.
pub fn pick_color<R: RandomSource>(rng: &mut R, palette: &OrnamentPalette) -> Color {
    let base = if rng.chance(palette.gold_probability) {
        palette.gold
    } else {
        palette.accent
    };
    base.offset_lightness((rng.next_f32() - 0.5) * palette.lightness_jitter)
}

/// Ornament group controller. Owns its instances and instance buffers.
///
/// `transforms` is rewritten in full on every `advance` and `version` bumps
/// each time so the host knows to re-upload. `colors` is written once.
pub struct OrnamentGroup {
    shape: OrnamentShape,
    instances: Vec<OrnamentInstance>,
    blend: BlendState,
    animation_speed: f32,
    easing: Easing,
    transforms: Vec<Mat4>,
    colors: Vec<[f32; 3]>,
    version: u64,
}

impl OrnamentGroup {
    /// Below this blend factor ornaments float; above it they sit still.
    pub const FLOAT_CUTOFF: f32 = 0.95;
    pub const FLOAT_SCALE: f32 = 0.05;

    pub fn new<R: RandomSource>(
        rng: &mut R,
        shape: OrnamentShape,
        count: usize,
        dims: &Dimensions,
        palette: &OrnamentPalette,
        animation_speed: f32,
    ) -> Self {
        let seeds = generate_paired_instances(rng, count, dims);
        let instances = seeds
            .into_iter()
            .map(|seed| OrnamentInstance::from_seed(seed, pick_color(&mut *rng, palette)))
            .collect();
        Self::from_instances(shape, instances, animation_speed)
    }

    pub fn from_instances(
        shape: OrnamentShape,
        instances: Vec<OrnamentInstance>,
        animation_speed: f32,
    ) -> Self {
        let colors = instances.iter().map(|i| i.color.to_array()).collect();
        let mut group = Self {
            shape,
            transforms: vec![Mat4::IDENTITY; instances.len()],
            instances,
            blend: BlendState::new(),
            animation_speed,
            easing: Easing::SmoothStep,
            colors,
            version: 0,
        };
        group.write_transforms(0.0);
        group
    }

    // -- Builder pattern --

    /// Start converged on `state` instead of scattered.
    pub fn with_state(mut self, state: TreeState) -> Self {
        self.blend = BlendState::settled(state);
        self.write_transforms(0.0);
        self
    }

    /// Float offset amplitude for a raw blend factor.
    pub fn float_amplitude(blend: f32) -> f32 {
        if blend >= Self::FLOAT_CUTOFF {
            0.0
        } else {
            (1.0 - blend) * 0.5 * Self::FLOAT_SCALE
        }
    }

    /// Advance one frame. Returns the updated blend factor.
    pub fn advance(&mut self, target_is_tree: bool, elapsed: f32, dt: f32) -> f32 {
        let target = TreeState::from_bool(target_is_tree);
        let blend = self.blend.advance(target, self.animation_speed, dt);
        for instance in &mut self.instances {
            instance.spin(blend);
        }
        self.write_transforms(elapsed);
        blend
    }

    fn write_transforms(&mut self, elapsed: f32) {
        let blend = self.blend.factor();
        let smooth_t = self.easing.apply(blend);
        for (instance, slot) in self.instances.iter().zip(self.transforms.iter_mut()) {
            let position = instance.position_at(smooth_t, blend, elapsed);
            *slot = instance.transform(position);
        }
        self.version = self.version.wrapping_add(1);
    }

    // -- Accessors --

    pub fn shape(&self) -> OrnamentShape {
        self.shape
    }

    pub fn blend_factor(&self) -> f32 {
        self.blend.factor()
    }

    pub fn instances(&self) -> &[OrnamentInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn transforms(&self) -> &[Mat4] {
        &self.transforms
    }

    /// Column-major 4×4 matrices, 16 floats per instance.
    pub fn transform_floats(&self) -> &[f32] {
        bytemuck::cast_slice(self.transforms.as_slice())
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn color_floats(&self) -> &[f32] {
        bytemuck::cast_slice(self.colors.as_slice())
    }

    /// Bumped every time the transform buffer is rewritten.
    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rng;
    use crate::renderer::palette::{GOLD_METALLIC, RED_LUXURY};

    const SPEED: f32 = 2.5;

    fn group(count: usize) -> OrnamentGroup {
        OrnamentGroup::new(
            &mut Rng::new(7),
            OrnamentShape::Sphere,
            count,
            &Dimensions::default(),
            &OrnamentPalette::default(),
            SPEED,
        )
    }

    #[test]
    fn buffers_match_instance_count() {
        let g = group(250);
        assert_eq!(g.len(), 250);
        assert_eq!(g.transforms().len(), 250);
        assert_eq!(g.transform_floats().len(), 250 * 16);
        assert_eq!(g.color_floats().len(), 250 * 3);
    }

    #[test]
    fn empty_group_is_fine() {
        let mut g = group(0);
        assert!(g.is_empty());
        g.advance(true, 1.0, 0.016);
        assert!(g.transforms().is_empty());
    }

    #[test]
    fn one_second_step_forms_tree_without_float() {
        let mut g = group(40);
        let blend = g.advance(true, 1.0, 1.0);
        assert_eq!(blend, 1.0);
        assert_eq!(OrnamentGroup::float_amplitude(blend), 0.0);
        for (instance, m) in g.instances().iter().zip(g.transforms()) {
            let (scale, _, translation) = m.to_scale_rotation_translation();
            assert!((translation - instance.tree_position).length() < 1e-4);
            assert!((scale - Vec3::splat(instance.scale)).length() < 1e-4);
        }
    }

    #[test]
    fn scattered_ornaments_float_gently() {
        let mut g = group(40);
        g.advance(false, 2.0, 0.016);
        let max = OrnamentGroup::float_amplitude(0.0) * 2f32.sqrt() + 1e-4;
        for (instance, m) in g.instances().iter().zip(g.transforms()) {
            let translation = m.w_axis.truncate();
            let offset = translation - instance.scatter_position;
            assert!(offset.length() <= max, "offset {}", offset.length());
            assert!(offset.z.abs() < 1e-5);
        }
    }

    #[test]
    fn float_amplitude_profile() {
        assert!((OrnamentGroup::float_amplitude(0.0) - 0.025).abs() < 1e-7);
        assert!(OrnamentGroup::float_amplitude(0.5) < OrnamentGroup::float_amplitude(0.1));
        assert_eq!(OrnamentGroup::float_amplitude(0.95), 0.0);
        assert_eq!(OrnamentGroup::float_amplitude(1.0), 0.0);
    }

    #[test]
    fn scattered_spin_is_double_rate() {
        let mut g = group(10);
        let start: Vec<Vec3> = g.instances().iter().map(|i| i.rotation).collect();
        for frame in 0..30 {
            g.advance(false, frame as f32 / 60.0, 1.0 / 60.0);
        }
        for (instance, r0) in g.instances().iter().zip(start) {
            let expected = r0 + instance.rotation_speed * 2.0 * 30.0;
            assert!((instance.rotation - expected).length() < 1e-4);
        }
    }

    #[test]
    fn formed_spin_is_base_rate_and_never_stops() {
        let mut g = group(10).with_state(TreeState::Tree);
        let start: Vec<Vec3> = g.instances().iter().map(|i| i.rotation).collect();
        let mut last_travel = vec![0.0f32; g.len()];
        for frame in 0..30 {
            g.advance(true, frame as f32, 1.0 / 60.0);
            for ((instance, r0), last) in g.instances().iter().zip(&start).zip(&mut last_travel) {
                let travel = (instance.rotation - *r0).length();
                if instance.rotation_speed != Vec3::ZERO {
                    assert!(travel > *last, "rotation froze");
                }
                *last = travel;
            }
        }
        for (instance, r0) in g.instances().iter().zip(start) {
            let expected = r0 + instance.rotation_speed * 30.0;
            assert!((instance.rotation - expected).length() < 1e-4);
        }
    }

    #[test]
    fn version_bumps_every_frame() {
        let mut g = group(3);
        let v0 = g.version();
        g.advance(false, 0.0, 0.0);
        g.advance(false, 0.0, 0.0);
        assert_eq!(g.version(), v0 + 2);
    }

    #[test]
    fn colors_are_fixed_after_construction() {
        let mut g = group(50);
        let before = g.colors().to_vec();
        for frame in 0..10 {
            g.advance(frame % 2 == 0, frame as f32, 0.1);
        }
        assert_eq!(g.colors(), before.as_slice());
    }

    #[test]
    fn color_split_follows_gold_probability() {
        let g = OrnamentGroup::new(
            &mut Rng::new(21),
            OrnamentShape::Box,
            2000,
            &Dimensions::default(),
            &OrnamentPalette::default().with_gold_probability(0.4),
            SPEED,
        );
        let (gold_h, _, gold_l) = GOLD_METALLIC.to_hsl();
        let (red_h, _, red_l) = RED_LUXURY.to_hsl();
        let mut gold = 0;
        for c in g.colors() {
            let (h, _, l) = Color::new(c[0], c[1], c[2]).to_hsl();
            if (h - gold_h).abs() < 0.02 {
                gold += 1;
                assert!((l - gold_l).abs() <= 0.05 + 1e-3);
            } else {
                assert!((h - red_h).abs() < 0.02, "unexpected hue {}", h);
                assert!((l - red_l).abs() <= 0.05 + 1e-3);
            }
        }
        let ratio = gold as f32 / 2000.0;
        assert!((ratio - 0.4).abs() < 0.04, "gold ratio {}", ratio);
    }

    #[test]
    fn shapes_have_distinct_meshes() {
        assert_ne!(OrnamentShape::Sphere.mesh(), OrnamentShape::Box.mesh());
        assert_eq!(OrnamentShape::Box.mesh(), OrnamentMesh::Cube { size: 0.3 });
        assert_eq!(OrnamentShape::Sphere.mesh().descriptor(), [0.2, 16.0, 16.0]);
        assert_eq!(OrnamentShape::Box.mesh().descriptor(), [0.3; 3]);
        assert_eq!(OrnamentShape::Sphere.name(), "sphere");
    }
}
