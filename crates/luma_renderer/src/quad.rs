//! Parallelogram primitive spanned by two edge vectors.

use crate::hittable::{HitRecord, Hittable};
use crate::Material;
use luma_math::{Aabb, Interval, Ray, Vec3};

/// A parallelogram with corner `q` and edges `u` and `v`.
///
/// The outward normal is `u × v`.
pub struct Quad<M: Material> {
    q: Vec3,
    u: Vec3,
    v: Vec3,
    normal: Vec3,
    d: f32,
    w: Vec3,
    material: M,
    bbox: Aabb,
}

impl<M: Material> Quad<M> {
    /// Create a new quad.
    pub fn new(q: Vec3, u: Vec3, v: Vec3, material: M) -> Self {
        let n = u.cross(v);
        let normal = n.normalize();
        let d = normal.dot(q);
        let w = n / n.dot(n);

        let bbox = Aabb::surrounding(
            &Aabb::from_points(q, q + u + v),
            &Aabb::from_points(q + u, q + v),
        );

        Self {
            q,
            u,
            v,
            normal,
            d,
            w,
            material,
            bbox,
        }
    }
}

impl<M: Material> Hittable for Quad<M> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denom = self.normal.dot(ray.direction);

        // Parallel to the plane
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.d - self.normal.dot(ray.origin)) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        let planar = ray.at(t) - self.q;
        let alpha = self.w.dot(planar.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar));

        let unit = Interval::new(0.0, 1.0);
        if !unit.contains(alpha) || !unit.contains(beta) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal, &self.material))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
