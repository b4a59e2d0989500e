//! Procedural point distributions: sphere scatter, cone tree, paired instances.

pub mod rng;
pub mod sampling;
pub mod instances;

pub use rng::{RandomSource, Rng};
pub use sampling::{sample_sphere_volume, sample_cone_volume, cone_radius_at};
pub use instances::{Dimensions, OrnamentSeed, generate_paired_instances};
