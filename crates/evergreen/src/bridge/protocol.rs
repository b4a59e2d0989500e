/// Packed frame buffer layout.
/// Must stay in sync with the TypeScript reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Foliage positions: foliage × 3]      rewritten every frame
/// [Foliage alphas: foliage × 1]         rewritten every frame
/// [Sphere transforms: spheres × 16]     rewritten every frame
/// [Box transforms: boxes × 16]          rewritten every frame
/// [Foliage sizes: foliage × 1]          written once
/// [Sphere colors: spheres × 3]          written once
/// [Box colors: boxes × 3]               written once
/// ```
///
/// Counts are written into the header; the reader computes offsets from them.

use crate::api::config::SceneConfig;
use crate::core::scene::TreeScene;
use crate::systems::ornaments::OrnamentShape;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_TARGET: usize = 2;
pub const HEADER_ELAPSED: usize = 3;
pub const HEADER_FOLIAGE_COUNT: usize = 4;
pub const HEADER_FOLIAGE_BLEND: usize = 5;
pub const HEADER_SPHERE_COUNT: usize = 6;
pub const HEADER_SPHERE_BLEND: usize = 7;
pub const HEADER_BOX_COUNT: usize = 8;
pub const HEADER_BOX_BLEND: usize = 9;
/// Foliage core color, 3 floats.
pub const HEADER_CORE_COLOR: usize = 10;
/// Foliage rim color, 3 floats.
pub const HEADER_RIM_COLOR: usize = 13;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per foliage position: x, y, z (fixed wire format).
pub const POSITION_FLOATS: usize = 3;

/// Floats per instance transform: column-major 4×4 (fixed wire format).
pub const TRANSFORM_FLOATS: usize = 16;

/// Floats per instance color: r, g, b (fixed wire format).
pub const COLOR_FLOATS: usize = 3;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub foliage_count: usize,
    pub sphere_count: usize,
    pub box_count: usize,

    /// Offset (in floats) where foliage positions begin.
    pub foliage_position_offset: usize,
    /// Offset (in floats) where foliage alphas begin.
    pub foliage_alpha_offset: usize,
    /// Offset (in floats) where sphere transforms begin.
    pub sphere_transform_offset: usize,
    /// Offset (in floats) where box transforms begin.
    pub box_transform_offset: usize,
    /// Offset (in floats) where foliage sizes begin.
    pub foliage_size_offset: usize,
    /// Offset (in floats) where sphere colors begin.
    pub sphere_color_offset: usize,
    /// Offset (in floats) where box colors begin.
    pub box_color_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from element counts.
    pub fn new(foliage_count: usize, sphere_count: usize, box_count: usize) -> Self {
        let foliage_position_offset = HEADER_FLOATS;
        let foliage_alpha_offset = foliage_position_offset + foliage_count * POSITION_FLOATS;
        let sphere_transform_offset = foliage_alpha_offset + foliage_count;
        let box_transform_offset = sphere_transform_offset + sphere_count * TRANSFORM_FLOATS;
        let foliage_size_offset = box_transform_offset + box_count * TRANSFORM_FLOATS;
        let sphere_color_offset = foliage_size_offset + foliage_count;
        let box_color_offset = sphere_color_offset + sphere_count * COLOR_FLOATS;

        let buffer_total_floats = box_color_offset + box_count * COLOR_FLOATS;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            foliage_count,
            sphere_count,
            box_count,
            foliage_position_offset,
            foliage_alpha_offset,
            sphere_transform_offset,
            box_transform_offset,
            foliage_size_offset,
            sphere_color_offset,
            box_color_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a SceneConfig.
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.foliage_count, config.sphere_count, config.box_count)
    }

    /// Floats rewritten on every frame (header through box transforms).
    pub fn dynamic_floats(&self) -> usize {
        self.foliage_size_offset
    }

    fn transform_offset(&self, shape: OrnamentShape) -> usize {
        match shape {
            OrnamentShape::Sphere => self.sphere_transform_offset,
            OrnamentShape::Box => self.box_transform_offset,
        }
    }

    fn color_offset(&self, shape: OrnamentShape) -> usize {
        match shape {
            OrnamentShape::Sphere => self.sphere_color_offset,
            OrnamentShape::Box => self.box_color_offset,
        }
    }

    /// Layout matching the scene's controllers.
    pub fn for_scene(scene: &TreeScene) -> Self {
        Self::new(
            scene.foliage().len(),
            group_len(scene, OrnamentShape::Sphere),
            group_len(scene, OrnamentShape::Box),
        )
    }
}

/// Pack the header and every per-frame section of `scene` into `out`.
/// Sections that do not fit in `out` are truncated.
pub fn write_frame(scene: &TreeScene, out: &mut [f32]) {
    let layout = ProtocolLayout::for_scene(scene);
    write_frame_with(scene, &layout, out);
}

/// Pack sizes and colors. These never change after construction.
pub fn write_static(scene: &TreeScene, out: &mut [f32]) {
    let layout = ProtocolLayout::for_scene(scene);
    write_static_with(scene, &layout, out);
}

fn write_frame_with(scene: &TreeScene, layout: &ProtocolLayout, out: &mut [f32]) {
    if out.len() < HEADER_FLOATS {
        log::warn!("protocol: frame buffer shorter than header ({} floats)", out.len());
        return;
    }
    let foliage = scene.foliage();
    let shading = scene.shading();
    let header = &mut out[..HEADER_FLOATS];

    header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    header[HEADER_FRAME_COUNTER] = scene.frame_count() as f32;
    header[HEADER_TARGET] = scene.target().target_value();
    header[HEADER_ELAPSED] = scene.last_tick().elapsed;
    header[HEADER_FOLIAGE_COUNT] = layout.foliage_count as f32;
    header[HEADER_FOLIAGE_BLEND] = foliage.blend_factor();
    header[HEADER_SPHERE_COUNT] = layout.sphere_count as f32;
    header[HEADER_SPHERE_BLEND] = group_blend(scene, OrnamentShape::Sphere);
    header[HEADER_BOX_COUNT] = layout.box_count as f32;
    header[HEADER_BOX_BLEND] = group_blend(scene, OrnamentShape::Box);
    header[HEADER_CORE_COLOR..HEADER_CORE_COLOR + 3].copy_from_slice(&shading.core.to_array());
    header[HEADER_RIM_COLOR..HEADER_RIM_COLOR + 3].copy_from_slice(&shading.rim.to_array());

    copy_into(out, layout.foliage_position_offset, foliage.position_floats());
    copy_into(out, layout.foliage_alpha_offset, foliage.alphas());
    for group in scene.ornaments() {
        copy_into(out, layout.transform_offset(group.shape()), group.transform_floats());
    }
}

fn write_static_with(scene: &TreeScene, layout: &ProtocolLayout, out: &mut [f32]) {
    copy_into(out, layout.foliage_size_offset, scene.foliage().sizes());
    for group in scene.ornaments() {
        copy_into(out, layout.color_offset(group.shape()), group.color_floats());
    }
}

/// Owned packed buffer the host reads through a raw pointer.
pub struct FrameBuffer {
    layout: ProtocolLayout,
    data: Vec<f32>,
}

impl FrameBuffer {
    /// Allocate for `scene` and fill every section, static ones included.
    pub fn for_scene(scene: &TreeScene) -> Self {
        let layout = ProtocolLayout::for_scene(scene);
        let mut buffer = Self {
            data: vec![0.0; layout.buffer_total_floats],
            layout,
        };
        write_static_with(scene, &buffer.layout, &mut buffer.data);
        buffer.write_frame(scene);
        buffer
    }

    pub fn write_frame(&mut self, scene: &TreeScene) {
        write_frame_with(scene, &self.layout, &mut self.data);
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Raw pointer for host-side reads.
    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }
}

fn group_len(scene: &TreeScene, shape: OrnamentShape) -> usize {
    scene.ornament_group(shape).map_or(0, |g| g.len())
}

fn group_blend(scene: &TreeScene, shape: OrnamentShape) -> f32 {
    scene.ornament_group(shape).map_or(0.0, |g| g.blend_factor())
}

/// Copy `src` into `dst` at `offset`, truncating if the section is short.
fn copy_into(dst: &mut [f32], offset: usize, src: &[f32]) {
    let end = (offset + src.len()).min(dst.len());
    if offset >= end {
        return;
    }
    dst[offset..end].copy_from_slice(&src[..end - offset]);
}
