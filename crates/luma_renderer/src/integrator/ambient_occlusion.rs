use crate::{Color, Sampler, Scene};
use luma_math::sampling::square_to_hemisphere;
use luma_math::Ray;

/// Shade of an unoccluded direction.
const UNOCCLUDED: f32 = 0.8;

/// Ambient occlusion: grey where a random hemisphere direction escapes
/// nearby geometry, black where it is blocked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientOcclusion {
    /// Occlusion radius as a fraction of the scene's bounding-box diagonal
    pub length: f32,
}

impl AmbientOcclusion {
    pub fn new(length: f32) -> Self {
        Self { length }
    }

    pub fn radiance(&self, scene: &Scene, ray: &Ray, sampler: &mut dyn Sampler) -> Color {
        let Some(hit) = scene.first_intersection(ray) else {
            return scene.background(ray.direction);
        };

        let direction = hit.frame.to_world(square_to_hemisphere(sampler.next_2d()));
        let occlusion_ray = hit.spawn_ray(direction);
        let max_distance = self.length * scene.bounding_extents().length();

        match scene.first_intersection(&occlusion_ray) {
            Some(blocker) if blocker.t <= max_distance => Color::ZERO,
            _ => Color::splat(UNOCCLUDED),
        }
    }
}

impl Default for AmbientOcclusion {
    fn default() -> Self {
        Self { length: 0.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_scenes::*;
    use super::*;
    use crate::{HittableList, IndependentSampler, Lambertian, Quad};
    use luma_math::Vec3;

    #[test]
    fn test_open_floor_is_unoccluded() {
        let mut world = HittableList::new();
        world.add(Box::new(Quad::new(
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(2.0, 0.0, 0.0),
            Lambertian::new(Color::ONE),
        )));
        let scene = Scene::new(world);
        let mut sampler = IndependentSampler::new(1, 0);
        sampler.start_pixel(0, 0);

        for _ in 0..100 {
            let l = AmbientOcclusion::default().radiance(&scene, &floor_ray(), &mut sampler);
            assert_eq!(l, Color::splat(0.8));
        }
    }

    #[test]
    fn test_occlusion_depends_on_length() {
        // Plates one unit apart in a scene whose diagonal is ~2800 units
        let scene = parallel_plates(0.0, 0.5, 0.5);
        let ray = floor_ray();
        let mut sampler = IndependentSampler::new(1, 0);
        sampler.start_pixel(0, 0);

        let mut count_dark = |ao: AmbientOcclusion| {
            (0..200)
                .filter(|_| ao.radiance(&scene, &ray, &mut sampler) == Color::ZERO)
                .count()
        };

        // The ceiling is always farther than 0.03
        assert_eq!(count_dark(AmbientOcclusion::new(1e-5)), 0);
        // Within 280 units unless the direction is nearly horizontal
        assert!(count_dark(AmbientOcclusion::new(0.1)) >= 190);
    }
}
