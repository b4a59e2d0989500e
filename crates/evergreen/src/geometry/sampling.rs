//! Volume samplers for the two target arrangements.

use std::f32::consts::TAU;

use glam::Vec3;

use super::rng::RandomSource;

/// Uniform point inside a sphere of `radius` centered on the origin.
///
/// The polar angle comes from `acos(2v - 1)` so points do not bunch at the
/// poles, and the radial distance is `radius * cbrt(w)` so density is uniform
/// by volume rather than by radius.
pub fn sample_sphere_volume<R: RandomSource>(rng: &mut R, radius: f32) -> Vec3 {
    let radius = radius.max(0.0);
    let theta = TAU * rng.next_f32();
    let phi = (2.0 * rng.next_f32() - 1.0).clamp(-1.0, 1.0).acos();
    let r = rng.next_f32().cbrt() * radius;
    let sin_phi = phi.sin();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * sin_phi * theta.sin(),
        r * phi.cos(),
    )
}

/// Point inside an upright cone standing on a disc of `base_radius`.
///
/// The cone is centered vertically: base at `-height / 2`, apex at
/// `+height / 2`. Radial offsets use `sqrt(w)` so needles spread evenly
/// across each horizontal slice.
pub fn sample_cone_volume<R: RandomSource>(rng: &mut R, height: f32, base_radius: f32) -> Vec3 {
    let height = height.max(0.0);
    let base_radius = base_radius.max(0.0);

    let y = rng.next_f32() * height;
    let normalized_y = if height > 0.0 { y / height } else { 0.0 };
    let current_radius = base_radius * (1.0 - normalized_y);

    let angle = rng.next_f32() * TAU;
    let r = rng.next_f32().sqrt() * current_radius;

    Vec3::new(r * angle.cos(), y - height / 2.0, r * angle.sin())
}

/// Largest radial distance a cone sample may have at height `y`.
pub fn cone_radius_at(y: f32, height: f32, base_radius: f32) -> f32 {
    if height <= 0.0 {
        return base_radius.max(0.0);
    }
    let normalized = ((y + height / 2.0) / height).clamp(0.0, 1.0);
    base_radius.max(0.0) * (1.0 - normalized)
}
