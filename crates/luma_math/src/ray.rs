use crate::{Interval, Vec3};

/// Relative distance a spawned ray's origin is pushed off the surface it
/// leaves, scaled by the origin's largest coordinate (at least 1).
pub const RAY_EPSILON: f32 = 1e-4;

/// A ray with origin, direction, and a valid parametric segment `[start, end)`.
///
/// Directions handed to media must be unit length. Clipping against a volume
/// narrows the segment in place, so callers clip a copy when the original is
/// still needed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub start: f32,
    pub end: f32,
}

impl Ray {
    /// Create a ray valid over `[0, inf)`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_segment(origin, direction, 0.0, f32::INFINITY)
    }

    /// Create a ray valid over `[start, end)`.
    pub fn with_segment(origin: Vec3, direction: Vec3, start: f32, end: f32) -> Self {
        Self {
            origin,
            direction,
            start,
            end,
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// The valid segment as an interval, for intersection queries.
    #[inline]
    pub fn segment(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    /// Length of the valid segment, measured along the (unit) direction.
    #[inline]
    pub fn segment_length(&self) -> f32 {
        self.end - self.start
    }

    /// Push the origin off a surface with the given normal, toward the side
    /// the direction travels into.
    ///
    /// The push grows with the origin's magnitude so it stays well above
    /// the f32 spacing of the coordinates it is added to.
    pub fn offset(&mut self, normal: Vec3) {
        let side = if self.direction.dot(normal) < 0.0 { -1.0 } else { 1.0 };
        let scale = self.origin.abs().max_element().max(1.0);
        self.origin += normal * (side * RAY_EPSILON * scale);
    }
}
