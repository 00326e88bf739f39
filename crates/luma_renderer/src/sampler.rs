//! Sample generators.
//!
//! A sampler is not shared between threads: every bucket task works on its
//! own clone. Each pixel's stream is reseeded from `(seed, x, y)`, so a
//! pixel's value never depends on which task or thread rendered it.

use luma_math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform samples in `[0, 1)`.
pub trait Sampler: Send {
    /// Number of samples taken per pixel.
    fn samples_per_pixel(&self) -> u32;

    /// Restart the stream for the pixel at (x, y).
    fn start_pixel(&mut self, x: u32, y: u32);

    /// Next 1D sample in `[0, 1)`.
    fn next_1d(&mut self) -> f32;

    /// Next 2D sample in `[0, 1)^2`.
    fn next_2d(&mut self) -> Vec2 {
        let x = self.next_1d();
        let y = self.next_1d();
        Vec2::new(x, y)
    }
}

/// Independent uniform random samples from a seeded `StdRng`.
#[derive(Clone, Debug)]
pub struct IndependentSampler {
    samples_per_pixel: u32,
    seed: u64,
    rng: StdRng,
}

impl IndependentSampler {
    /// Create a sampler taking `samples_per_pixel` samples with a base seed.
    pub fn new(samples_per_pixel: u32, seed: u64) -> Self {
        Self {
            samples_per_pixel,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Base seed the per-pixel streams are derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// SplitMix64 finalizer.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl Sampler for IndependentSampler {
    fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    fn start_pixel(&mut self, x: u32, y: u32) {
        let pixel = (u64::from(y) << 32) | u64::from(x);
        self.rng = StdRng::seed_from_u64(mix(self.seed ^ mix(pixel)));
    }

    fn next_1d(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }
}
