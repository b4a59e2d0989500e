pub mod runner;

pub use runner::SceneRunner;

use std::cell::RefCell;

use evergreen::{InputEvent, OrnamentShape, TreeState};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. Returns `None` before `scene_init()`.
fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("evergreen: scene not initialized, call scene_init() first");
                None
            }
        }
    })
}

fn install(runner: SceneRunner) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let counts = (runner.foliage_count(), runner.sphere_count(), runner.box_count());
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!(
        "evergreen: initialized ({} foliage, {} spheres, {} boxes)",
        counts.0,
        counts.1,
        counts.2
    );
}

/// Build the scene from a JSON config, seeding the generators from the host clock.
/// An empty string or unparseable JSON falls back to the defaults.
#[wasm_bindgen]
pub fn scene_init(config_json: &str) {
    let seed = js_sys::Date::now() as u64;
    install(SceneRunner::from_json(config_json, Some(seed)));
}

/// Build the scene using the seed from the config (reproducible layouts).
#[wasm_bindgen]
pub fn scene_init_seeded(config_json: &str) {
    install(SceneRunner::from_json(config_json, None));
}

#[wasm_bindgen]
pub fn scene_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn scene_set_tree(is_tree: bool) {
    with_runner(|r| r.push_input(InputEvent::SetTarget(TreeState::from_bool(is_tree))));
}

#[wasm_bindgen]
pub fn scene_toggle() {
    with_runner(|r| r.push_input(InputEvent::Toggle));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_foliage_size_offset() -> u32 {
    with_runner(|r| r.foliage_size_offset()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_sphere_color_offset() -> u32 {
    with_runner(|r| r.sphere_color_offset()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_box_color_offset() -> u32 {
    with_runner(|r| r.box_color_offset()).unwrap_or(0)
}

// ---- Scene state accessors ----

#[wasm_bindgen]
pub fn get_foliage_count() -> u32 {
    with_runner(|r| r.foliage_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_sphere_count() -> u32 {
    with_runner(|r| r.sphere_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_box_count() -> u32 {
    with_runner(|r| r.box_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_is_tree() -> bool {
    with_runner(|r| r.is_tree()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn get_foliage_blend() -> f32 {
    with_runner(|r| r.foliage_blend()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_tree_top_y() -> f32 {
    with_runner(|r| r.tree_top_y()).unwrap_or(0.0)
}

// ---- Mesh descriptors ----

/// `[radius, width_segments, height_segments]` for shape 0 (sphere),
/// `[size, size, size]` for shape 1 (box). Empty for unknown shapes.
#[wasm_bindgen]
pub fn get_mesh_descriptor(shape: u32) -> Vec<f32> {
    OrnamentShape::ALL
        .get(shape as usize)
        .map(|s| s.mesh().descriptor().to_vec())
        .unwrap_or_default()
}
