pub mod palette;
pub mod shading;
pub mod traits;

// Re-export key types for convenient access
pub use palette::{Color, OrnamentPalette};
pub use shading::{FoliageShading, SIZE_ATTENUATION};
pub use traits::{FrameData, OrnamentBatch, Renderer};
