//! Scene: surfaces, background radiance, and an optional medium.

use crate::{Color, HitRecord, Hittable, HittableList, Medium};
use luma_math::{Ray, Vec3};

/// Everything the estimators query while rendering.
///
/// Read-only during a render and shared by every worker.
pub struct Scene {
    world: HittableList,
    background: Color,
    medium: Option<Box<dyn Medium>>,
}

impl Scene {
    /// Create a scene over the given surfaces with a black background.
    pub fn new(world: HittableList) -> Self {
        Self {
            world,
            background: Color::ZERO,
            medium: None,
        }
    }

    /// Set a constant background radiance.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Fill the scene with a participating medium.
    pub fn with_medium(mut self, medium: Box<dyn Medium>) -> Self {
        self.medium = Some(medium);
        self
    }

    /// Closest surface hit inside the ray's segment.
    pub fn first_intersection(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        self.world.hit(ray, ray.segment())
    }

    /// Radiance arriving from infinitely far away along `_direction`.
    pub fn background(&self, _direction: Vec3) -> Color {
        self.background
    }

    /// Edge lengths of the box bounding every surface.
    pub fn bounding_extents(&self) -> Vec3 {
        if self.world.is_empty() {
            return Vec3::ZERO;
        }
        self.world.bounding_box().extents()
    }

    pub fn medium(&self) -> Option<&dyn Medium> {
        self.medium.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HomogeneousMedium, Lambertian, Sphere};

    #[test]
    fn test_scene_queries() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, Lambertian::new(Color::ONE))));
        world.add(Box::new(Sphere::new(Vec3::new(4.0, 0.0, -3.0), 1.0, Lambertian::new(Color::ONE))));
        let scene = Scene::new(world).with_background(Color::splat(0.25));

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let hit = scene.first_intersection(&ray).expect("should hit");
        assert!((hit.t - 2.0).abs() < 1e-5);

        // A segment ending before the sphere sees nothing
        let short = Ray::with_segment(Vec3::ZERO, -Vec3::Z, 0.0, 1.5);
        assert!(scene.first_intersection(&short).is_none());

        assert_eq!(scene.background(Vec3::Y), Color::splat(0.25));
        assert_eq!(scene.bounding_extents(), Vec3::new(6.0, 2.0, 2.0));
        assert!(scene.medium().is_none());
    }

    #[test]
    fn test_empty_scene() {
        let medium = HomogeneousMedium::new(Color::splat(0.1), Color::ZERO).expect("valid");
        let scene = Scene::new(HittableList::new()).with_medium(Box::new(medium));

        assert_eq!(scene.bounding_extents(), Vec3::ZERO);
        assert!(scene.first_intersection(&Ray::new(Vec3::ZERO, Vec3::X)).is_none());
        assert!(scene.medium().is_some());
    }
}
