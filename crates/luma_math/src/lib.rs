// Re-export glam for convenience
pub use glam::*;

// Luma math types
mod aabb;
mod frame;
mod interval;
mod ray;
pub mod sampling;

pub use aabb::Aabb;
pub use frame::Frame;
pub use interval::Interval;
pub use ray::{Ray, RAY_EPSILON};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_componentwise_product() {
        // Colors lean on component-wise Vec3 products throughout the renderer
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
    }
}
