use crate::Vec3;

/// A local shading frame: an origin plus an orthonormal basis `(u, v, w)`.
///
/// At a surface hit `w` is the shading normal, so local directions with a
/// positive z component lie in the hemisphere above the surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub o: Vec3,
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl Frame {
    /// Build a frame around a unit normal.
    ///
    /// Uses the branchless basis construction of Duff et al. (2017), which
    /// stays well-conditioned for every normal direction.
    pub fn from_normal(o: Vec3, w: Vec3) -> Self {
        let sign = 1.0_f32.copysign(w.z);
        let a = -1.0 / (sign + w.z);
        let b = w.x * w.y * a;
        let u = Vec3::new(1.0 + sign * w.x * w.x * a, sign * b, -sign * w.x);
        let v = Vec3::new(b, sign + w.y * w.y * a, -w.y);

        Self { o, u, v, w }
    }

    /// Express a local direction in world (canonical) coordinates.
    #[inline]
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.u * local.x + self.v * local.y + self.w * local.z
    }

    /// Cosine between a world direction and the frame normal.
    #[inline]
    pub fn cos_theta(&self, world: Vec3) -> f32 {
        world.dot(self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(frame: &Frame) {
        assert!((frame.u.length() - 1.0).abs() < 1e-5);
        assert!((frame.v.length() - 1.0).abs() < 1e-5);
        assert!((frame.w.length() - 1.0).abs() < 1e-5);
        assert!(frame.u.dot(frame.v).abs() < 1e-5);
        assert!(frame.u.dot(frame.w).abs() < 1e-5);
        assert!(frame.v.dot(frame.w).abs() < 1e-5);
    }

    #[test]
    fn test_frame_orthonormal_for_many_normals() {
        let normals = [
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            -Vec3::X,
            -Vec3::Y,
            -Vec3::Z,
            Vec3::new(1.0, 2.0, 3.0).normalize(),
            Vec3::new(-0.3, 0.1, -0.9).normalize(),
        ];

        for n in normals {
            assert_orthonormal(&Frame::from_normal(Vec3::ZERO, n));
        }
    }

    #[test]
    fn test_to_world_keeps_length_and_elevation() {
        let frame = Frame::from_normal(Vec3::ONE, Vec3::new(0.2, -0.7, 0.4).normalize());
        let local = Vec3::new(0.3, 0.5, -0.8).normalize();

        let world = frame.to_world(local);
        assert!((world.length() - 1.0).abs() < 1e-5);
        assert!((frame.cos_theta(world) - local.z).abs() < 1e-5);
    }

    #[test]
    fn test_local_z_maps_to_normal() {
        let n = Vec3::new(0.0, -1.0, 0.0);
        let frame = Frame::from_normal(Vec3::ZERO, n);

        assert!((frame.to_world(Vec3::Z) - n).length() < 1e-6);
        assert!((frame.cos_theta(n) - 1.0).abs() < 1e-6);
    }
}
