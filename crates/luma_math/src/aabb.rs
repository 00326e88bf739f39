use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box bounding surfaces and participating media.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Parametric range over which the ray is inside the box, ignoring the
    /// ray's own segment. `None` when some slab is never entered.
    ///
    /// Slab method: per axis the entry/exit pair is swapped for negative
    /// direction components. A zero component never divides; it either
    /// leaves the range untouched (origin inside the slab) or rejects the ray.
    fn slab_range(&self, ray: &Ray) -> Option<Interval> {
        let mut range = Interval::UNIVERSE;

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let o = ray.origin[axis];
            let d = ray.direction[axis];

            if d == 0.0 {
                if o < slab.min || o > slab.max {
                    return None;
                }
                continue;
            }

            let (t0, t1) = if d > 0.0 {
                ((slab.min - o) / d, (slab.max - o) / d)
            } else {
                ((slab.max - o) / d, (slab.min - o) / d)
            };

            if range.min > t1 || t0 > range.max {
                return None;
            }
            range = range.intersect(&Interval::new(t0, t1));
        }

        Some(range)
    }

    /// Clip a ray to its overlap with this box.
    ///
    /// Narrows `[start, end)` in place and returns true when any overlap
    /// remains; on false the ray is left unchanged.
    pub fn clip(&self, ray: &mut Ray) -> bool {
        let Some(range) = self.slab_range(ray) else {
            return false;
        };

        let clipped = range.intersect(&ray.segment());
        if clipped.is_empty() || clipped.size() <= 0.0 {
            return false;
        }

        ray.start = clipped.min;
        ray.end = clipped.max;
        true
    }

    /// Test if a ray intersects this AABB within the given interval.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> bool {
        match self.slab_range(r) {
            Some(range) => {
                let overlap = range.intersect(&ray_t);
                !overlap.is_empty() && overlap.size() > 0.0
            }
            None => false,
        }
    }

    /// True when the point lies inside the box (boundary included).
    pub fn contains(&self, p: Vec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    /// Edge lengths of the box.
    pub fn extents(&self) -> Vec3 {
        Vec3::new(self.x.size(), self.y.size(), self.z.size())
    }

    /// Static constants
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 10.0), Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.x.min, 0.0);
        assert_eq!(aabb.x.max, 10.0);
        assert_eq!(aabb.y.min, 0.0);
        assert_eq!(aabb.y.max, 10.0);
        assert_eq!(aabb.z.min, 0.0);
        assert_eq!(aabb.z.max, 10.0);
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let box2 = Aabb::from_points(Vec3::new(3.0, 3.0, 3.0), Vec3::new(10.0, 10.0, 10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.x.min, 0.0);
        assert_eq!(surrounding.x.max, 10.0);
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = unit_box();

        // Ray pointing at center
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_clip_narrows_segment() {
        let mut ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(unit_box().clip(&mut ray));
        assert!((ray.start - 4.0).abs() < 1e-6);
        assert!((ray.end - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_clip_respects_existing_segment() {
        // Ray ends halfway through the box
        let mut ray = Ray::with_segment(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, 0.0, 5.0);
        assert!(unit_box().clip(&mut ray));
        assert!((ray.start - 4.0).abs() < 1e-6);
        assert_eq!(ray.end, 5.0);

        // Ray starting inside keeps its start
        let mut inside = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(unit_box().clip(&mut inside));
        assert_eq!(inside.start, 0.0);
        assert!((inside.end - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clip_negative_direction() {
        let mut ray = Ray::new(Vec3::new(5.0, 0.5, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        assert!(unit_box().clip(&mut ray));
        assert!((ray.start - 4.0).abs() < 1e-6);
        assert!((ray.end - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_clip_zero_direction_components() {
        // Axis-aligned ray outside the x slab never enters
        let original = Ray::new(Vec3::new(2.0, 0.0, -5.0), Vec3::Z);
        let mut ray = original;
        assert!(!unit_box().clip(&mut ray));
        assert_eq!(ray, original);

        // Origin exactly on a slab boundary with zero component stays finite
        let mut grazing = Ray::new(Vec3::new(1.0, 0.0, -5.0), Vec3::Z);
        assert!(unit_box().clip(&mut grazing));
        assert!(grazing.start.is_finite() && grazing.end.is_finite());
    }

    #[test]
    fn test_clip_box_behind_ray() {
        let original = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        let mut ray = original;
        assert!(!unit_box().clip(&mut ray));
        assert_eq!(ray, original);
    }

    #[test]
    fn test_clip_universe_keeps_segment() {
        let mut ray = Ray::with_segment(Vec3::ZERO, Vec3::Y, 0.5, 3.0);
        assert!(Aabb::UNIVERSE.clip(&mut ray));
        assert_eq!(ray.start, 0.5);
        assert_eq!(ray.end, 3.0);
    }

    #[test]
    fn test_aabb_extents_and_contains() {
        let aabb = Aabb::from_points(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 4.0, 2.0));

        assert_eq!(aabb.extents(), Vec3::new(10.0, 4.0, 2.0));
        assert!(aabb.contains(Vec3::new(1.0, 1.0, 1.0)));
        assert!(!aabb.contains(Vec3::new(-1.0, 1.0, 1.0)));
    }
}
