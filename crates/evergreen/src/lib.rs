pub mod api;
pub mod core;
pub mod geometry;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::SceneConfig;
pub use api::types::{FrameTick, TreeState};
pub use crate::core::blend::BlendState;
pub use crate::core::scene::TreeScene;
pub use crate::core::time::FrameClock;
pub use geometry::{Dimensions, OrnamentSeed, RandomSource, Rng};
pub use systems::foliage::{FoliageField, ParticleRecord};
pub use systems::ornaments::{OrnamentGroup, OrnamentInstance, OrnamentMesh, OrnamentShape};
pub use renderer::palette::{Color, OrnamentPalette};
pub use renderer::shading::FoliageShading;
pub use renderer::traits::{FrameData, OrnamentBatch, Renderer};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::{FrameBuffer, ProtocolLayout};

// Extensions: decoupled math helpers
pub use extensions::{Easing, lerp, lerp_vec3, ease_vec3, smoothstep};
