use super::{emitted_radiance, segment_transmittance};
use crate::{Color, HitRecord, Sampler, Scene};
use luma_math::{Ray, Vec2, Vec3};

/// Emitted plus directly reflected light: one bounce, no recursion.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DirectIllumination;

impl DirectIllumination {
    pub fn radiance(&self, scene: &Scene, ray: &Ray, sampler: &mut dyn Sampler) -> Color {
        let Some(hit) = scene.first_intersection(ray) else {
            return scene.background(ray.direction) * segment_transmittance(scene, ray, ray.end);
        };

        let outgoing = -ray.direction;
        let surface = emitted_radiance(&hit, ray.direction)
            + direct_illumination(scene, &hit, outgoing, sampler.next_2d());

        surface * segment_transmittance(scene, ray, hit.t)
    }
}

/// Single-sample estimate of direct light reflected at `hit` toward `outgoing`.
///
/// Draws an incident direction from the BRDF (projected solid angle for
/// diffuse surfaces) and returns `Le · brdf · cosθ / pdf` when the offset
/// ray along it reaches an emitter, zero otherwise.
pub fn direct_illumination(scene: &Scene, hit: &HitRecord<'_>, outgoing: Vec3, seed: Vec2) -> Color {
    let brdf = hit.material.brdf();
    let incident = brdf.generate(&hit.frame, outgoing, seed);

    let pdf = brdf.pdf(&hit.frame, incident, outgoing);
    if pdf <= 0.0 {
        return Color::ZERO;
    }

    let value = brdf.evaluate(&hit.frame, incident, outgoing);
    if value == Color::ZERO {
        return Color::ZERO;
    }

    let shadow_ray = hit.spawn_ray(incident);
    let Some(light) = scene.first_intersection(&shadow_ray) else {
        return Color::ZERO;
    };

    let emitted = emitted_radiance(&light, incident);
    if emitted == Color::ZERO {
        return Color::ZERO;
    }

    let cos_theta = hit.frame.cos_theta(incident);
    emitted * value * (cos_theta / pdf) * segment_transmittance(scene, &shadow_ray, light.t)
}
