use super::emitted_radiance;
use crate::{Color, ConfigError, ConfigResult, HitRecord, MediumSamplingRecord, Sampler, Scene};
use luma_math::sampling::clamp_seed;
use luma_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Default bounce limit for fixed-depth termination.
pub const DEFAULT_DEPTH_LIMIT: u32 = 5;

/// Absolute bounce cap for Russian Roulette, bounding stack depth.
pub const MAX_ROULETTE_DEPTH: u32 = 256;

/// When a path stops gathering indirect light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Termination {
    /// Gather at bounce levels `0..=limit`, then stop.
    FixedDepth {
        #[serde(default = "default_depth_limit")]
        limit: u32,
    },
    /// Continue each bounce with probability `survival_probability`,
    /// dividing survivors by it.
    RussianRoulette { survival_probability: f32 },
}

fn default_depth_limit() -> u32 {
    DEFAULT_DEPTH_LIMIT
}

impl Termination {
    pub fn validate(&self) -> ConfigResult<()> {
        match *self {
            Termination::FixedDepth { .. } => Ok(()),
            Termination::RussianRoulette { survival_probability: p } => {
                if p > 0.0 && p <= 1.0 {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidSurvivalProbability(p))
                }
            }
        }
    }

    /// Decide whether the bounce at `level` happens.
    ///
    /// `None` terminates the path; `Some(w)` continues with the bounce's
    /// contribution scaled by `w`.
    pub fn continue_weight(&self, level: u32, sampler: &mut dyn Sampler) -> Option<f32> {
        match *self {
            Termination::FixedDepth { limit } => (level <= limit).then_some(1.0),
            Termination::RussianRoulette { survival_probability: p } => {
                if level >= MAX_ROULETTE_DEPTH {
                    return None;
                }
                let u = sampler.next_1d();
                if u < 1.0 - p {
                    None
                } else {
                    Some(1.0 / p)
                }
            }
        }
    }
}

impl Default for Termination {
    fn default() -> Self {
        Termination::FixedDepth {
            limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}

/// Recursive path tracer with pluggable termination.
///
/// Surfaces are sampled by BRDF importance; with a medium in the scene,
/// every traced segment first samples a free-flight distance and may
/// scatter inside the volume instead of reaching the surface.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PathTracer {
    pub termination: Termination,
    /// Let indirect rays that escape the scene pick up the background.
    pub background_illumination: bool,
}

impl PathTracer {
    pub fn new(termination: Termination) -> Self {
        Self {
            termination,
            background_illumination: false,
        }
    }

    pub fn with_background_illumination(mut self, enabled: bool) -> Self {
        self.background_illumination = enabled;
        self
    }

    pub fn radiance(&self, scene: &Scene, ray: &Ray, sampler: &mut dyn Sampler) -> Color {
        self.arriving(scene, ray, 0, sampler)
    }

    /// Radiance arriving along `ray` from whatever it meets first.
    fn arriving(&self, scene: &Scene, ray: &Ray, level: u32, sampler: &mut dyn Sampler) -> Color {
        let hit = scene.first_intersection(ray);

        let mut weight = Color::ONE;
        if let Some(medium) = scene.medium() {
            let end = hit.as_ref().map_or(ray.end, |h| h.t);
            let segment = Ray::with_segment(ray.origin, ray.direction, ray.start, end);

            let seed = clamp_seed(sampler.next_1d());
            if let Some(event) = medium.select_distance(&segment, seed) {
                return self.in_scattered(scene, &event, ray.direction, level, sampler);
            }

            let pass = medium.pass_through_probability(&segment);
            if pass <= 0.0 {
                return Color::ZERO;
            }
            weight = medium.attenuation(&segment) / pass;
        }

        let surface = match hit {
            Some(hit) => {
                emitted_radiance(&hit, ray.direction) + self.gather(scene, &hit, -ray.direction, level, sampler)
            }
            None if level == 0 || self.background_illumination => scene.background(ray.direction),
            None => Color::ZERO,
        };

        weight * surface
    }

    /// Indirect light reflected at `hit` toward `outgoing`.
    fn gather(
        &self,
        scene: &Scene,
        hit: &HitRecord<'_>,
        outgoing: Vec3,
        level: u32,
        sampler: &mut dyn Sampler,
    ) -> Color {
        let Some(survival_weight) = self.termination.continue_weight(level, sampler) else {
            return Color::ZERO;
        };

        let brdf = hit.material.brdf();
        let incident = brdf.generate(&hit.frame, outgoing, sampler.next_2d());

        let pdf = brdf.pdf(&hit.frame, incident, outgoing);
        if pdf <= 0.0 {
            return Color::ZERO;
        }
        let value = brdf.evaluate(&hit.frame, incident, outgoing);
        if value == Color::ZERO {
            return Color::ZERO;
        }

        let incoming = self.arriving(scene, &hit.spawn_ray(incident), level + 1, sampler);
        let cos_theta = hit.frame.cos_theta(incident);

        incoming * value * (cos_theta / pdf * survival_weight)
    }

    /// Light scattered toward `-ray_dir` at a medium interaction.
    fn in_scattered(
        &self,
        scene: &Scene,
        event: &MediumSamplingRecord<'_>,
        ray_dir: Vec3,
        level: u32,
        sampler: &mut dyn Sampler,
    ) -> Color {
        let Some(survival_weight) = self.termination.continue_weight(level, sampler) else {
            return Color::ZERO;
        };

        let sample = event.phase_function.generate(-ray_dir, sampler.next_2d());
        let next = Ray::new(event.interaction_point, sample.direction);
        let incoming = self.arriving(scene, &next, level + 1, sampler);

        event.attenuation * event.scattering * sample.weight * incoming * (survival_weight / event.pdf)
    }
}
