//! Renderer trait for GPU backends.
//!
//! In the browser, drawing happens in TypeScript: it reads the packed frame
//! buffer (see `bridge::protocol`). Native backends implement `Renderer`
//! and consume `FrameData` directly.

use super::shading::FoliageShading;
use crate::systems::ornaments::OrnamentShape;

/// One instanced-mesh draw: a group's transforms and colors.
#[derive(Debug, Clone, Copy)]
pub struct OrnamentBatch<'a> {
    pub shape: OrnamentShape,
    /// Column-major 4×4 matrices, 16 floats per instance. Rewritten every frame.
    pub transforms: &'a [f32],
    /// RGB, 3 floats per instance. Written once at construction.
    pub colors: &'a [f32],
    /// Bumped each time `transforms` is rewritten.
    pub version: u64,
}

impl OrnamentBatch<'_> {
    pub fn instance_count(&self) -> usize {
        self.transforms.len() / 16
    }
}

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    /// Foliage positions, 3 floats per particle.
    pub foliage_positions: &'a [f32],
    /// Foliage twinkle alpha, 1 float per particle.
    pub foliage_alphas: &'a [f32],
    /// Static foliage base sizes, 1 float per particle.
    pub foliage_sizes: &'a [f32],
    /// Point shader uniforms.
    pub shading: FoliageShading,
    /// One batch per ornament group.
    pub ornaments: Vec<OrnamentBatch<'a>>,
    /// Seconds since the scene started.
    pub elapsed: f32,
}

impl FrameData<'_> {
    pub fn particle_count(&self) -> usize {
        self.foliage_alphas.len()
    }
}

/// Contract for a rendering backend.
///
/// # Example Implementation
///
/// ```ignore
/// struct WgpuRenderer { /* device, queue, pipelines... */ }
///
/// impl Renderer for WgpuRenderer {
///     fn backend(&self) -> &'static str { "wgpu" }
///
///     fn draw(&mut self, frame: &FrameData) {
///         // queue.write_buffer(&self.points, 0, bytemuck::cast_slice(frame.foliage_positions));
///         // ...
///     }
///
///     fn resize(&mut self, width: u32, height: u32) {
///         // Recreate surface config...
///     }
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g., "webgl", "webgpu", "wgpu").
    fn backend(&self) -> &'static str;

    /// Upload and draw one frame.
    fn draw(&mut self, frame: &FrameData);

    /// Handle surface resize.
    fn resize(&mut self, width: u32, height: u32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SceneConfig;
    use crate::core::scene::TreeScene;

    /// Records what it was asked to draw.
    #[derive(Default)]
    struct RecordingRenderer {
        frames: usize,
        particles: usize,
        instances: Vec<usize>,
        versions: Vec<u64>,
        size: (u32, u32),
    }

    impl Renderer for RecordingRenderer {
        fn backend(&self) -> &'static str {
            "recording"
        }

        fn draw(&mut self, frame: &FrameData) {
            self.frames += 1;
            self.particles = frame.particle_count();
            self.instances = frame.ornaments.iter().map(|b| b.instance_count()).collect();
            self.versions = frame.ornaments.iter().map(|b| b.version).collect();
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
    }

    #[test]
    fn renderer_receives_full_frames() {
        let config = SceneConfig {
            foliage_count: 64,
            sphere_count: 8,
            box_count: 4,
            ..SceneConfig::default()
        };
        let mut scene = TreeScene::new(config);
        let mut renderer = RecordingRenderer::default();
        renderer.resize(800, 600);

        scene.tick(0.016);
        renderer.draw(&scene.frame_data());
        let first = renderer.versions.clone();
        scene.tick(0.016);
        renderer.draw(&scene.frame_data());

        assert_eq!(renderer.backend(), "recording");
        assert_eq!(renderer.frames, 2);
        assert_eq!(renderer.particles, 64);
        assert_eq!(renderer.instances, vec![8, 4]);
        assert!(renderer.versions.iter().zip(&first).all(|(now, before)| now > before));
        assert_eq!(renderer.size, (800, 600));
    }
}
