//! Per-pixel rendering and the output image.
//!
//! Implements:
//! - Multi-sampled pixels with jittered camera rays
//! - Gamma correction and clamping at the pixel write
//! - A single-threaded full-frame render used as a reference

use crate::{
    clamp_01, color_to_rgba, gamma_correct, Bucket, Camera, Color, Estimator, IndependentSampler,
    RenderConfig, RenderResult, Sampler, Scene,
};
use std::path::Path;

/// Render a single pixel with multi-sampling.
///
/// Restarts the sampler's stream for (x, y), averages
/// `sampler.samples_per_pixel()` estimates through jittered camera rays, then
/// gamma-corrects and clamps the result.
pub fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    estimator: &Estimator,
    x: u32,
    y: u32,
    gamma: f32,
    sampler: &mut dyn Sampler,
) -> Color {
    sampler.start_pixel(x, y);

    let samples = sampler.samples_per_pixel().max(1);
    let width = camera.image_width as f32;
    let height = camera.image_height as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let jitter = sampler.next_2d();
        let s = (x as f32 + jitter.x) / width;
        let t = (y as f32 + jitter.y) / height;
        let ray = camera.get_ray(s, t);
        pixel_color += estimator.radiance(scene, &ray, sampler);
    }

    clamp_01(gamma_correct(pixel_color / samples as f32, gamma))
}

/// Display-ready image: gamma-corrected colors in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Copy a bucket's row-major pixels into place.
    pub fn write_bucket(&mut self, bucket: &Bucket, pixels: &[Color]) {
        debug_assert_eq!(pixels.len(), bucket.pixel_count() as usize);
        for (row, line) in pixels.chunks(bucket.width.max(1) as usize).enumerate() {
            let start = self.index(bucket.x, bucket.y + row as u32);
            self.pixels[start..start + line.len()].copy_from_slice(line);
        }
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Save as an 8-bit image; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        image::save_buffer(
            path,
            &self.to_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )?;
        Ok(())
    }
}

/// Render the entire scene to an image buffer.
///
/// This is a simple single-threaded renderer for testing. Because every
/// pixel reseeds its own stream, it produces exactly the image a
/// [`RenderSession`](crate::RenderSession) does with the same config.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    config.validate()?;
    let estimator = config.estimator()?;
    let mut sampler = IndependentSampler::new(config.samples_per_pixel, config.seed);
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);

    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let color = render_pixel(scene, camera, &estimator, x, y, config.gamma, &mut sampler);
            image.set(x, y, color);
        }
    }

    Ok(image)
}
