//! Radiance estimators.
//!
//! Each estimator turns a camera ray into a single-sample Monte Carlo
//! estimate of the radiance arriving along it. Estimators are pure: all
//! randomness comes from the caller's sampler, so they can run concurrently
//! with one sampler per task.

mod ambient_occlusion;
mod direct;
mod path;

pub use ambient_occlusion::AmbientOcclusion;
pub use direct::{direct_illumination, DirectIllumination};
pub use path::{PathTracer, Termination, DEFAULT_DEPTH_LIMIT, MAX_ROULETTE_DEPTH};

use crate::{Color, HitRecord, LuminaireSamplingRecord, Sampler, Scene};
use luma_math::{Ray, Vec3};

/// The estimator a render uses, chosen by configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimator {
    AmbientOcclusion(AmbientOcclusion),
    DirectIllumination(DirectIllumination),
    PathTracer(PathTracer),
}

impl Estimator {
    /// Estimate the radiance arriving at the camera along `ray`.
    pub fn radiance(&self, scene: &Scene, ray: &Ray, sampler: &mut dyn Sampler) -> Color {
        match self {
            Estimator::AmbientOcclusion(ao) => ao.radiance(scene, ray, sampler),
            Estimator::DirectIllumination(direct) => direct.radiance(scene, ray, sampler),
            Estimator::PathTracer(tracer) => tracer.radiance(scene, ray, sampler),
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Estimator::AmbientOcclusion(_) => "ambient occlusion",
            Estimator::DirectIllumination(_) => "direct illumination",
            Estimator::PathTracer(tracer) => match tracer.termination {
                Termination::FixedDepth { .. } => "path tracer (fixed depth)",
                Termination::RussianRoulette { .. } => "path tracer (russian roulette)",
            },
        }
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Estimator::PathTracer(PathTracer::default())
    }
}

/// Radiance a hit surface emits back along `-ray_dir`; zero for non-emitters.
pub(crate) fn emitted_radiance(hit: &HitRecord<'_>, ray_dir: Vec3) -> Color {
    if !hit.material.is_emitter() {
        return Color::ZERO;
    }
    let rec = LuminaireSamplingRecord::new(hit.frame, -ray_dir);
    hit.material.emitted_radiance(&rec)
}

/// Medium transmittance along `ray` from its start up to `end`.
pub(crate) fn segment_transmittance(scene: &Scene, ray: &Ray, end: f32) -> Color {
    match scene.medium() {
        Some(medium) => {
            let segment = Ray::with_segment(ray.origin, ray.direction, ray.start, end);
            medium.attenuation(&segment)
        }
        None => Color::ONE,
    }
}
