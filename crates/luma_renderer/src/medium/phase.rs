use crate::Color;
use luma_math::sampling::{square_to_sphere, INV_FOUR_PI};
use luma_math::{Vec2, Vec3};

/// A sampled scattering direction and its weight `phase / pdf`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSample {
    pub direction: Vec3,
    pub weight: Color,
}

/// Angular distribution of light scattered inside a medium.
pub trait PhaseFunction: Send + Sync {
    /// Value for light arriving along `incident` and leaving along `scattered`.
    fn evaluate(&self, incident: Vec3, scattered: Vec3) -> Color;

    /// Sample a scattered direction given the fixed one.
    fn generate(&self, fixed: Vec3, seed: Vec2) -> PhaseSample;

    /// Solid-angle density of `generate` producing `direction`.
    fn pdf(&self, fixed: Vec3, direction: Vec3) -> f32;
}

/// Scatters uniformly in all directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsotropicPhaseFunction;

impl PhaseFunction for IsotropicPhaseFunction {
    fn evaluate(&self, _incident: Vec3, _scattered: Vec3) -> Color {
        Color::splat(INV_FOUR_PI)
    }

    fn generate(&self, _fixed: Vec3, seed: Vec2) -> PhaseSample {
        PhaseSample {
            direction: square_to_sphere(seed),
            weight: Color::ONE,
        }
    }

    fn pdf(&self, _fixed: Vec3, _direction: Vec3) -> f32 {
        INV_FOUR_PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_direction(rng: &mut StdRng) -> Vec3 {
        square_to_sphere(Vec2::new(rng.gen(), rng.gen()))
    }

    #[test]
    fn test_isotropic_is_reciprocal() {
        let phase = IsotropicPhaseFunction;
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let a = random_direction(&mut rng);
            let b = random_direction(&mut rng);
            assert_eq!(phase.evaluate(a, b), phase.evaluate(b, a));
            assert_eq!(phase.pdf(a, b), phase.pdf(b, a));
        }
    }

    #[test]
    fn test_isotropic_weight_matches_value_over_pdf() {
        let phase = IsotropicPhaseFunction;
        let fixed = Vec3::X;
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let sample = phase.generate(fixed, Vec2::new(rng.gen(), rng.gen()));
            assert!((sample.direction.length() - 1.0).abs() < 1e-4);
            let expected = phase.evaluate(fixed, sample.direction) / phase.pdf(fixed, sample.direction);
            assert!((sample.weight - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_isotropic_pdf_integrates_to_one() {
        // ∫ pdf dω ≈ 4π · mean(pdf) over uniform sphere directions
        let phase = IsotropicPhaseFunction;
        let mut rng = StdRng::seed_from_u64(42);
        let fixed = Vec3::new(0.3, -0.4, 0.866).normalize();
        let n = 10_000;

        let mean: f32 = (0..n)
            .map(|_| phase.pdf(fixed, random_direction(&mut rng)))
            .sum::<f32>()
            / n as f32;
        let integral = 4.0 * std::f32::consts::PI * mean;
        assert!((integral - 1.0).abs() < 1e-3, "got {integral}");
    }

    #[test]
    fn test_isotropic_samples_follow_pdf() {
        // The cap z > 0.5 covers solid angle π, so it should hold
        // pdf · π = 1/4 of the generated directions
        let phase = IsotropicPhaseFunction;
        let mut rng = StdRng::seed_from_u64(11);
        let fixed = Vec3::X;
        let n = 20_000;

        let in_cap = (0..n)
            .filter(|_| {
                let sample = phase.generate(fixed, Vec2::new(rng.gen(), rng.gen()));
                sample.direction.z > 0.5
            })
            .count();
        let fraction = in_cap as f32 / n as f32;
        let expected = phase.pdf(fixed, Vec3::Z) * std::f32::consts::PI;
        assert!((expected - 0.25).abs() < 1e-6);
        assert!((fraction - expected).abs() < 0.015, "got {fraction}");

        // Opposite hemispheres are equally likely
        let upper = (0..n)
            .filter(|_| phase.generate(fixed, Vec2::new(rng.gen(), rng.gen())).direction.y > 0.0)
            .count();
        assert!((upper as f32 / n as f32 - 0.5).abs() < 0.015);
    }
}
