// extensions/mod.rs
//
// Math helpers shared by the controllers and the shading reference.

pub mod easing;

pub use easing::{Easing, lerp, lerp_vec3, ease_vec3, smoothstep};
