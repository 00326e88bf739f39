//! Pinhole camera for ray generation.

use luma_math::{Ray, Vec3};

/// Pinhole camera for generating primary rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    /// Vertical field of view in degrees
    vfov: f32,

    // Cached computed values (set by initialize())
    center: Vec3,
    upper_left: Vec3,
    viewport_u: Vec3,
    viewport_v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 800,
            image_height: 450,
            look_from: Vec3::new(0.0, 0.0, 0.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            center: Vec3::ZERO,
            upper_left: Vec3::ZERO,
            viewport_u: Vec3::ZERO,
            viewport_v: Vec3::ZERO,
            w: Vec3::Z,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        self.center = self.look_from;

        let theta = self.vfov.to_radians();
        let viewport_height = 2.0 * (theta / 2.0).tan();
        let aspect = self.image_width.max(1) as f32 / self.image_height.max(1) as f32;
        let viewport_width = viewport_height * aspect;

        // Camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(self.w).normalize();
        let v = self.w.cross(u);

        // Image x grows right, image y grows down
        self.viewport_u = viewport_width * u;
        self.viewport_v = -viewport_height * v;
        self.upper_left = self.center - self.w - self.viewport_u / 2.0 - self.viewport_v / 2.0;
    }

    /// Generate a ray through normalized image coordinates.
    ///
    /// `(0, 0)` is the upper-left corner of the image and `(1, 1)` the
    /// lower-right. The returned direction is unit length.
    pub fn get_ray(&self, s: f32, t: f32) -> Ray {
        let target = self.upper_left + s * self.viewport_u + t * self.viewport_v;
        Ray::new(self.center, (target - self.center).normalize())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
