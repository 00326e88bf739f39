//! Materials: surface scattering (BRDFs) and emission.
//!
//! Directions follow one convention throughout: both `incident` and
//! `outgoing` point away from the surface. `incident` is where light comes
//! from; `outgoing` is toward the viewer.

use crate::Color;
use luma_math::sampling::square_to_psa_hemisphere;
use luma_math::{Frame, Vec2, Vec3};
use std::f32::consts::FRAC_1_PI;

/// Bidirectional reflectance distribution function.
pub trait Brdf: Send + Sync {
    /// Reflectance for a pair of directions.
    fn evaluate(&self, frame: &Frame, incident: Vec3, outgoing: Vec3) -> Color;

    /// Importance-sample an incident direction for the given outgoing one.
    fn generate(&self, frame: &Frame, outgoing: Vec3, seed: Vec2) -> Vec3;

    /// Solid-angle density of `generate` producing `incident`.
    fn pdf(&self, frame: &Frame, incident: Vec3, outgoing: Vec3) -> f32;
}

/// Emission query: the point's frame plus the direction light leaves in.
#[derive(Debug, Clone, Copy)]
pub struct LuminaireSamplingRecord {
    pub frame: Frame,
    pub emit_dir: Vec3,
}

impl LuminaireSamplingRecord {
    pub fn new(frame: Frame, emit_dir: Vec3) -> Self {
        Self { frame, emit_dir }
    }
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scattering response of the surface.
    fn brdf(&self) -> &dyn Brdf;

    /// Whether the surface emits light.
    fn is_emitter(&self) -> bool {
        false
    }

    /// Radiance emitted along the record's direction.
    ///
    /// Most materials return black (no emission).
    fn emitted_radiance(&self, _rec: &LuminaireSamplingRecord) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Brdf for Lambertian {
    fn evaluate(&self, frame: &Frame, incident: Vec3, outgoing: Vec3) -> Color {
        if frame.cos_theta(incident) <= 0.0 || frame.cos_theta(outgoing) <= 0.0 {
            return Color::ZERO;
        }
        self.albedo * FRAC_1_PI
    }

    fn generate(&self, frame: &Frame, _outgoing: Vec3, seed: Vec2) -> Vec3 {
        frame.to_world(square_to_psa_hemisphere(seed))
    }

    fn pdf(&self, frame: &Frame, incident: Vec3, _outgoing: Vec3) -> f32 {
        frame.cos_theta(incident).max(0.0) * FRAC_1_PI
    }
}

impl Material for Lambertian {
    fn brdf(&self) -> &dyn Brdf {
        self
    }
}

/// Diffuse area light: constant radiance from both faces, plus an
/// optional diffuse reflectance (black by default).
#[derive(Debug, Clone, Copy)]
pub struct DiffuseLight {
    emit: Color,
    reflectance: Lambertian,
}

impl DiffuseLight {
    /// Create a new diffuse light that absorbs everything it doesn't emit.
    pub fn new(emit: Color) -> Self {
        Self::with_reflectance(emit, Color::ZERO)
    }

    /// Create a diffuse light that also reflects light with `albedo`.
    pub fn with_reflectance(emit: Color, albedo: Color) -> Self {
        Self {
            emit,
            reflectance: Lambertian::new(albedo),
        }
    }
}

impl Material for DiffuseLight {
    fn brdf(&self) -> &dyn Brdf {
        &self.reflectance
    }

    fn is_emitter(&self) -> bool {
        true
    }

    fn emitted_radiance(&self, rec: &LuminaireSamplingRecord) -> Color {
        // The shading frame faces the viewer, so any visible side emits
        if rec.frame.cos_theta(rec.emit_dir) > 0.0 {
            self.emit
        } else {
            Color::ZERO
        }
    }
}
