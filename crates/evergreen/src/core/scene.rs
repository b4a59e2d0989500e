use crate::api::config::SceneConfig;
use crate::api::types::{FrameTick, TreeState};
use crate::core::time::FrameClock;
use crate::geometry::{RandomSource, Rng};
use crate::renderer::palette::OrnamentPalette;
use crate::renderer::shading::FoliageShading;
use crate::renderer::traits::{FrameData, OrnamentBatch};
use crate::systems::foliage::FoliageField;
use crate::systems::ornaments::{OrnamentGroup, OrnamentShape};

/// The whole morphing tree: one foliage field plus one ornament group per shape.
///
/// Controllers never share mutable state; the scene only hands each of them
/// the same tick and target snapshot once per frame.
pub struct TreeScene {
    config: SceneConfig,
    foliage: FoliageField,
    ornaments: Vec<OrnamentGroup>,
    clock: FrameClock,
    target: TreeState,
    shading: FoliageShading,
    last_tick: FrameTick,
}

impl TreeScene {
    /// Build a scene seeded from `config.seed`.
    pub fn new(config: SceneConfig) -> Self {
        let mut rng = Rng::new(config.seed);
        Self::with_rng(config, &mut rng)
    }

    /// Build a scene drawing all procedural values from `rng`.
    pub fn with_rng<R: RandomSource>(config: SceneConfig, rng: &mut R) -> Self {
        let config = config.sanitized();
        let dims = config.dimensions();
        let target = TreeState::from_bool(config.start_as_tree);
        let palette = OrnamentPalette::default().with_gold_probability(config.gold_probability);

        let foliage = FoliageField::new(rng, config.foliage_count, &dims, config.animation_speed)
            .with_state(target);

        let ornaments = OrnamentShape::ALL
            .iter()
            .map(|&shape| {
                let count = match shape {
                    OrnamentShape::Sphere => config.sphere_count,
                    OrnamentShape::Box => config.box_count,
                };
                OrnamentGroup::new(&mut *rng, shape, count, &dims, &palette, config.animation_speed)
                    .with_state(target)
            })
            .collect();

        log::info!(
            "scene: {} foliage, {} spheres, {} boxes, starting {:?}",
            config.foliage_count,
            config.sphere_count,
            config.box_count,
            target
        );

        Self {
            clock: FrameClock::new(config.max_frame_delta),
            config,
            foliage,
            ornaments,
            target,
            shading: FoliageShading::default(),
            last_tick: FrameTick::default(),
        }
    }

    // -- Target --

    pub fn target(&self) -> TreeState {
        self.target
    }

    pub fn set_target(&mut self, target: TreeState) {
        if target != self.target {
            log::debug!("scene: target {:?} -> {:?}", self.target, target);
        }
        self.target = target;
    }

    pub fn toggle(&mut self) -> TreeState {
        self.set_target(self.target.toggled());
        self.target
    }

    /// Advance every controller by one frame of `frame_dt` seconds.
    pub fn tick(&mut self, frame_dt: f32) -> FrameTick {
        let tick = self.clock.accumulate(frame_dt);
        self.advance(tick);
        tick
    }

    /// Advance every controller with an externally supplied tick.
    pub fn advance(&mut self, tick: FrameTick) {
        let is_tree = self.target.is_tree();
        self.foliage.advance(is_tree, tick.elapsed, tick.delta);
        for group in &mut self.ornaments {
            group.advance(is_tree, tick.elapsed, tick.delta);
        }
        self.last_tick = tick;
    }

    // -- Accessors --

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn foliage(&self) -> &FoliageField {
        &self.foliage
    }

    pub fn ornaments(&self) -> &[OrnamentGroup] {
        &self.ornaments
    }

    pub fn ornament_group(&self, shape: OrnamentShape) -> Option<&OrnamentGroup> {
        self.ornaments.iter().find(|g| g.shape() == shape)
    }

    pub fn shading(&self) -> &FoliageShading {
        &self.shading
    }

    pub fn last_tick(&self) -> FrameTick {
        self.last_tick
    }

    pub fn frame_count(&self) -> u64 {
        self.clock.frames()
    }

    /// Borrowed view of everything the renderer needs for this frame.
    pub fn frame_data(&self) -> FrameData<'_> {
        FrameData {
            foliage_positions: self.foliage.position_floats(),
            foliage_alphas: self.foliage.alphas(),
            foliage_sizes: self.foliage.sizes(),
            shading: self.shading,
            ornaments: self
                .ornaments
                .iter()
                .map(|g| OrnamentBatch {
                    shape: g.shape(),
                    transforms: g.transform_floats(),
                    colors: g.color_floats(),
                    version: g.version(),
                })
                .collect(),
            elapsed: self.last_tick.elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SceneConfig {
        SceneConfig {
            foliage_count: 200,
            sphere_count: 30,
            box_count: 12,
            ..SceneConfig::default()
        }
    }

    #[test]
    fn builds_all_groups_with_configured_counts() {
        let scene = TreeScene::new(small_config());
        assert_eq!(scene.foliage().len(), 200);
        assert_eq!(scene.ornaments().len(), 2);
        assert_eq!(scene.ornament_group(OrnamentShape::Sphere).unwrap().len(), 30);
        assert_eq!(scene.ornament_group(OrnamentShape::Box).unwrap().len(), 12);
    }

    #[test]
    fn same_seed_same_scene() {
        let a = TreeScene::new(small_config());
        let b = TreeScene::new(small_config());
        assert_eq!(a.foliage().records(), b.foliage().records());
        assert_eq!(a.ornaments()[1].instances(), b.ornaments()[1].instances());
    }

    #[test]
    fn toggle_flips_target() {
        let mut scene = TreeScene::new(small_config());
        assert_eq!(scene.target(), TreeState::Scattered);
        assert_eq!(scene.toggle(), TreeState::Tree);
        assert_eq!(scene.toggle(), TreeState::Scattered);
    }

    #[test]
    fn all_controllers_converge_to_the_same_target() {
        let mut scene = TreeScene::new(small_config());
        scene.set_target(TreeState::Tree);
        for _ in 0..600 {
            scene.tick(1.0 / 60.0);
        }
        assert!(1.0 - scene.foliage().blend_factor() < 1e-4);
        for group in scene.ornaments() {
            assert!(1.0 - group.blend_factor() < 1e-4);
        }
    }

    #[test]
    fn start_as_tree_config() {
        let config = SceneConfig {
            start_as_tree: true,
            ..small_config()
        };
        let scene = TreeScene::new(config);
        assert_eq!(scene.target(), TreeState::Tree);
        assert_eq!(scene.foliage().blend_factor(), 1.0);
        assert!(scene.ornaments().iter().all(|g| g.blend_factor() == 1.0));
    }

    #[test]
    fn zero_counts_build_an_empty_scene() {
        let config = SceneConfig {
            foliage_count: 0,
            sphere_count: 0,
            box_count: 0,
            ..SceneConfig::default()
        };
        let mut scene = TreeScene::new(config);
        scene.tick(0.016);
        let frame = scene.frame_data();
        assert!(frame.foliage_positions.is_empty());
        assert!(frame.ornaments.iter().all(|b| b.transforms.is_empty()));
    }

    #[test]
    fn frame_data_views_match_controllers() {
        let mut scene = TreeScene::new(small_config());
        scene.tick(0.016);
        let frame = scene.frame_data();
        assert_eq!(frame.foliage_positions.len(), 200 * 3);
        assert_eq!(frame.foliage_alphas.len(), 200);
        assert_eq!(frame.foliage_sizes.len(), 200);
        assert_eq!(frame.ornaments.len(), 2);
        assert_eq!(frame.ornaments[0].transforms.len(), 30 * 16);
        assert_eq!(frame.ornaments[1].colors.len(), 12 * 3);
        assert!((frame.elapsed - 0.016).abs() < 1e-6);
    }

    #[test]
    fn stalled_frame_is_capped() {
        let mut scene = TreeScene::new(small_config());
        scene.set_target(TreeState::Tree);
        let tick = scene.tick(10.0);
        assert_eq!(tick.delta, 0.25);
        // 2.5 * 0.25 = 0.625 of the way there, not a snap.
        assert!((scene.foliage().blend_factor() - 0.625).abs() < 1e-6);
    }
}
