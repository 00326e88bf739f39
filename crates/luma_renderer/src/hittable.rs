//! Hittable trait and HitRecord for ray-surface intersection.

use crate::Material;
use luma_math::{Aabb, Frame, Interval, Ray, Vec3};

/// Record of a ray-surface intersection.
///
/// Produced fresh by every query and never cached.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Shading frame at the hit point; `w` is the normal facing the ray
    pub frame: Frame,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material of the surface that was hit
    pub material: &'a dyn Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record from a hit at `t` with the surface's outward normal.
    ///
    /// The stored normal always points against the ray direction, so we
    /// track whether we hit the front or back face.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a dyn Material) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            t,
            frame: Frame::from_normal(ray.at(t), normal),
            front_face,
            material,
        }
    }

    /// Hit point.
    #[inline]
    pub fn p(&self) -> Vec3 {
        self.frame.o
    }

    /// Shading normal (facing the incoming ray).
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.frame.w
    }

    /// A ray leaving the hit point along `direction`, offset off the surface.
    pub fn spawn_ray(&self, direction: Vec3) -> Ray {
        let mut ray = Ray::new(self.p(), direction);
        ray.offset(self.normal());
        ray
    }
}

/// Trait for surfaces that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Closest hit with `t` strictly inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Get the axis-aligned bounding box of this surface.
    fn bounding_box(&self) -> Aabb;
}

/// A list of hittable surfaces, tested linearly.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add a surface to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    /// Get the number of surfaces.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
