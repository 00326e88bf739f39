//! Participating media and phase functions.

mod homogeneous;
mod phase;

pub use homogeneous::HomogeneousMedium;
pub use phase::{IsotropicPhaseFunction, PhaseFunction, PhaseSample};

use crate::Color;
use luma_math::{Ray, Vec3};

/// Result of sampling or querying a medium.
///
/// Consumed immediately by the caller, never retained.
#[derive(Clone, Copy)]
pub struct MediumSamplingRecord<'a> {
    /// Where the interaction happens
    pub interaction_point: Vec3,
    /// Transmittance from the segment start to the interaction point
    pub attenuation: Color,
    /// Density of having sampled this interaction
    pub pdf: f32,
    /// Absorption coefficient at the interaction point
    pub absorption: Color,
    /// Scattering coefficient at the interaction point
    pub scattering: Color,
    /// Phase function at the interaction point
    pub phase_function: &'a dyn PhaseFunction,
}

/// A volume that absorbs and scatters light along rays.
///
/// Every ray handed to a medium must have a unit-length direction.
pub trait Medium: Send + Sync {
    /// Narrow the ray's segment to its overlap with the medium.
    ///
    /// Returns false, leaving the ray unchanged, when there is no overlap.
    fn clip(&self, ray: &mut Ray) -> bool;

    /// Transmittance along the ray's segment.
    fn attenuation(&self, ray: &Ray) -> Color;

    /// Sample a free-flight distance along the ray's segment with a seed in
    /// `(0, 1)`. `None` means the ray passes through without interacting.
    fn select_distance(&self, ray: &Ray, seed: f32) -> Option<MediumSamplingRecord<'_>>;

    /// Coefficients and phase function at a point.
    ///
    /// `attenuation` and `pdf` are zero: they have no meaning for a point query.
    fn properties_at(&self, point: Vec3) -> MediumSamplingRecord<'_>;

    /// Probability that `select_distance` reports no interaction on the segment.
    fn pass_through_probability(&self, ray: &Ray) -> f32;
}
