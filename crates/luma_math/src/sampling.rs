//! Warps from the unit square to directions.
//!
//! All warps take a seed in `[0, 1)^2` and return unit vectors in a local
//! frame where `+Z` is the hemisphere axis.

use crate::{Vec2, Vec3};
use std::f32::consts::PI;

/// 1 / (4π), the density of a uniform direction on the sphere.
pub const INV_FOUR_PI: f32 = 0.25 * std::f32::consts::FRAC_1_PI;

/// Smallest distance kept between a 1D seed and the ends of `(0, 1)`.
pub const SEED_EPSILON: f32 = 1e-6;

/// Keep a seed strictly inside `(0, 1)`.
///
/// Samples drawn from `[0, 1)` can hit exactly zero, which sends
/// logarithmic warps such as free-flight sampling to infinity.
#[inline]
pub fn clamp_seed(seed: f32) -> f32 {
    seed.clamp(SEED_EPSILON, 1.0 - SEED_EPSILON)
}

/// Uniform direction on the unit sphere (density `1/4π`).
pub fn square_to_sphere(seed: Vec2) -> Vec3 {
    let z = 1.0 - 2.0 * seed.x;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * seed.y;
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Uniform direction on the `+Z` hemisphere (density `1/2π`).
pub fn square_to_hemisphere(seed: Vec2) -> Vec3 {
    let z = seed.x;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * seed.y;
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Direction on the `+Z` hemisphere distributed uniformly with respect to
/// projected solid angle, i.e. with solid-angle density `cosθ / π`.
pub fn square_to_psa_hemisphere(seed: Vec2) -> Vec3 {
    let r = seed.x.sqrt();
    let phi = 2.0 * PI * seed.y;
    let z = (1.0 - seed.x).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}
