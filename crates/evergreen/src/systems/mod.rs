pub mod foliage;
pub mod ornaments;

pub use foliage::{FoliageField, ParticleRecord};
pub use ornaments::{OrnamentGroup, OrnamentInstance, OrnamentMesh, OrnamentShape};
