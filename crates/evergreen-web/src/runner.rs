use evergreen::bridge::protocol::{FrameBuffer, ProtocolLayout};
use evergreen::{InputEvent, InputQueue, SceneConfig, TreeScene};

/// Scene runner that wires the animation core to the browser.
///
/// `lib.rs` keeps one runner in a `thread_local!` and exports free functions
/// via `#[wasm_bindgen]`; the host reads the packed frame through raw pointers.
pub struct SceneRunner {
    scene: TreeScene,
    input: InputQueue,
    frame: FrameBuffer,
}

impl SceneRunner {
    pub fn new(config: SceneConfig) -> Self {
        let scene = TreeScene::new(config);
        let frame = FrameBuffer::for_scene(&scene);
        Self {
            scene,
            input: InputQueue::new(),
            frame,
        }
    }

    /// Build from JSON, falling back to the default config when it does not parse.
    /// `seed_override` replaces the configured seed when present.
    pub fn from_json(json: &str, seed_override: Option<u64>) -> Self {
        let mut config = if json.trim().is_empty() {
            SceneConfig::default()
        } else {
            SceneConfig::from_json(json).unwrap_or_else(|e| {
                log::warn!("evergreen: invalid config ({}), using defaults", e);
                SceneConfig::default()
            })
        };
        if let Some(seed) = seed_override {
            config.seed = seed;
        }
        Self::new(config)
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: resolve input, advance every controller, pack the frame.
    pub fn tick(&mut self, dt: f32) {
        let target = self.input.resolve(self.scene.target());
        self.scene.set_target(target);
        self.scene.tick(dt);
        self.frame.write_frame(&self.scene);
    }

    pub fn scene(&self) -> &TreeScene {
        &self.scene
    }

    pub fn layout(&self) -> &ProtocolLayout {
        self.frame.layout()
    }

    // ---- Pointer accessors for host reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout().buffer_total_floats as u32
    }

    pub fn foliage_size_offset(&self) -> u32 {
        self.layout().foliage_size_offset as u32
    }

    pub fn sphere_color_offset(&self) -> u32 {
        self.layout().sphere_color_offset as u32
    }

    pub fn box_color_offset(&self) -> u32 {
        self.layout().box_color_offset as u32
    }

    // ---- Scene state ----

    pub fn foliage_count(&self) -> u32 {
        self.layout().foliage_count as u32
    }

    pub fn sphere_count(&self) -> u32 {
        self.layout().sphere_count as u32
    }

    pub fn box_count(&self) -> u32 {
        self.layout().box_count as u32
    }

    pub fn is_tree(&self) -> bool {
        self.scene.target().is_tree()
    }

    pub fn foliage_blend(&self) -> f32 {
        self.scene.foliage().blend_factor()
    }

    pub fn tree_top_y(&self) -> f32 {
        self.scene.config().tree_top().y
    }
}
