use super::{IsotropicPhaseFunction, Medium, MediumSamplingRecord, PhaseFunction};
use crate::color::transmittance;
use crate::{channel_avg, Color, ConfigError, ConfigResult};
use luma_math::{Aabb, Ray, Vec3};

/// A medium with constant coefficients inside an axis-aligned box.
pub struct HomogeneousMedium {
    absorption: Color,
    scattering: Color,
    extinction: Color,
    phase_function: Box<dyn PhaseFunction>,
    bounds: Aabb,
}

impl HomogeneousMedium {
    /// Create an unbounded isotropic medium.
    ///
    /// Coefficients must be finite and non-negative in every channel.
    pub fn new(absorption: Color, scattering: Color) -> ConfigResult<Self> {
        validate_coefficient("absorption", absorption)?;
        validate_coefficient("scattering", scattering)?;

        Ok(Self {
            absorption,
            scattering,
            extinction: absorption + scattering,
            phase_function: Box::new(IsotropicPhaseFunction),
            bounds: Aabb::UNIVERSE,
        })
    }

    /// Restrict the medium to a box.
    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = bounds;
        self
    }

    /// Replace the phase function.
    pub fn with_phase_function(mut self, phase_function: Box<dyn PhaseFunction>) -> Self {
        self.phase_function = phase_function;
        self
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Channel-averaged extinction, the rate free flights are sampled with.
    fn avg_extinction(&self) -> f32 {
        channel_avg(self.extinction)
    }

    fn record_at(&self, point: Vec3, attenuation: Color, pdf: f32) -> MediumSamplingRecord<'_> {
        MediumSamplingRecord {
            interaction_point: point,
            attenuation,
            pdf,
            absorption: self.absorption,
            scattering: self.scattering,
            phase_function: self.phase_function.as_ref(),
        }
    }
}

fn validate_coefficient(name: &'static str, value: Color) -> ConfigResult<()> {
    for channel in value.to_array() {
        if !channel.is_finite() || channel < 0.0 {
            return Err(ConfigError::InvalidCoefficient { name, value: channel });
        }
    }
    Ok(())
}

impl Medium for HomogeneousMedium {
    fn clip(&self, ray: &mut Ray) -> bool {
        self.bounds.clip(ray)
    }

    fn attenuation(&self, ray: &Ray) -> Color {
        let mut segment = *ray;
        if !self.clip(&mut segment) {
            return Color::ONE;
        }
        debug_assert!((segment.direction.length() - 1.0).abs() < 1e-3);

        transmittance(self.extinction, segment.segment_length())
    }

    fn select_distance(&self, ray: &Ray, seed: f32) -> Option<MediumSamplingRecord<'_>> {
        if !(seed > 0.0 && seed < 1.0) {
            log::trace!("Rejecting free-flight seed {seed} outside (0, 1)");
            return None;
        }

        let sigma = self.avg_extinction();
        if sigma <= 0.0 {
            return None;
        }

        let mut segment = *ray;
        if !self.clip(&mut segment) {
            return None;
        }
        debug_assert!((segment.direction.length() - 1.0).abs() < 1e-3);

        let distance = -seed.ln() / sigma;
        if distance >= segment.segment_length() {
            return None;
        }

        let point = segment.at(segment.start + distance);
        let attenuation = transmittance(self.extinction, distance);
        Some(self.record_at(point, attenuation, seed * sigma))
    }

    fn properties_at(&self, point: Vec3) -> MediumSamplingRecord<'_> {
        self.record_at(point, Color::ZERO, 0.0)
    }

    fn pass_through_probability(&self, ray: &Ray) -> f32 {
        let mut segment = *ray;
        let sigma = self.avg_extinction();
        if sigma <= 0.0 || !self.clip(&mut segment) {
            return 1.0;
        }
        (-sigma * segment.segment_length()).exp()
    }
}
