//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and visited in a square spiral from the center of the image outward.

use crate::renderer::render_pixel;
use crate::{Camera, Color, Estimator, Sampler, Scene};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Steps of the spiral walk in grid coordinates: +Y, +X, -Y, -X.
const DIRECTIONS: [(i64, i64); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Square spiral over a grid of buckets, yielding `(column, row)`.
///
/// The walk starts on the center cell and widens by one cell every two
/// turns. Cells outside the grid are stepped over, so every cell is
/// produced exactly once whatever the grid's aspect ratio.
#[derive(Debug, Clone)]
pub struct Spiral {
    num_x: u32,
    num_y: u32,
    x: i64,
    y: i64,
    direction: usize,
    moves_left: u32,
    move_length: u32,
    remaining: u64,
}

impl Spiral {
    /// Spiral over the buckets covering a `width` x `height` image.
    pub fn new(width: u32, height: u32, bucket_width: u32, bucket_height: u32) -> Self {
        let num_x = blocks_along(width, bucket_width);
        let num_y = blocks_along(height, bucket_height);

        // One step before the center: the first move lands on it
        Self {
            num_x,
            num_y,
            x: (i64::from(num_x) - 1) / 2,
            y: (i64::from(num_y) - 1) / 2 - 1,
            direction: 0,
            moves_left: 2,
            move_length: 1,
            remaining: u64::from(num_x) * u64::from(num_y),
        }
    }

    /// Grid size in buckets.
    pub fn grid(&self) -> (u32, u32) {
        (self.num_x, self.num_y)
    }

    fn step(&mut self) {
        if self.moves_left == 0 {
            self.direction = (self.direction + 1) % DIRECTIONS.len();
            // Legs grow on every turn into +Y or -Y
            if self.direction % 2 == 0 {
                self.move_length += 1;
            }
            self.moves_left = self.move_length;
        }

        let (dx, dy) = DIRECTIONS[self.direction];
        self.x += dx;
        self.y += dy;
        self.moves_left -= 1;
    }

    fn in_grid(&self) -> bool {
        (0..i64::from(self.num_x)).contains(&self.x) && (0..i64::from(self.num_y)).contains(&self.y)
    }
}

fn blocks_along(pixels: u32, block: u32) -> u32 {
    if pixels == 0 {
        0
    } else {
        (pixels - 1) / block.max(1) + 1
    }
}

impl Iterator for Spiral {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        loop {
            self.step();
            if self.in_grid() {
                self.remaining -= 1;
                return Some((self.x as u32, self.y as u32));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

/// Generate buckets for an image in spiral order from the center.
///
/// Edge buckets are clipped to the image; an empty image has no buckets.
pub fn generate_buckets(width: u32, height: u32, bucket_width: u32, bucket_height: u32) -> Vec<Bucket> {
    let bucket_width = bucket_width.max(1);
    let bucket_height = bucket_height.max(1);

    Spiral::new(width, height, bucket_width, bucket_height)
        .enumerate()
        .map(|(index, (bx, by))| {
            let x = bx * bucket_width;
            let y = by * bucket_height;
            let bw = bucket_width.min(width - x);
            let bh = bucket_height.min(height - y);
            Bucket::new(x, y, bw, bh, index)
        })
        .collect()
}

/// Render a single bucket to a vector of colors.
///
/// Returns display-ready pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    scene: &Scene,
    camera: &Camera,
    estimator: &Estimator,
    gamma: f32,
    sampler: &mut dyn Sampler,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(scene, camera, estimator, global_x, global_y, gamma, sampler));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_covers_grid(width: u32, height: u32, bw: u32, bh: u32) {
        let spiral = Spiral::new(width, height, bw, bh);
        let (nx, ny) = spiral.grid();
        let cells: Vec<_> = spiral.collect();
        let unique: HashSet<_> = cells.iter().copied().collect();

        assert_eq!(cells.len(), (nx * ny) as usize, "{width}x{height} / {bw}x{bh}");
        assert_eq!(unique.len(), cells.len(), "duplicate cell for {width}x{height} / {bw}x{bh}");
        assert!(cells.iter().all(|&(x, y)| x < nx && y < ny));
    }

    #[test]
    fn test_spiral_visits_every_cell_once() {
        for width in (1..=40).chain([100, 333, 640]) {
            for height in (1..=40).chain([100, 333, 480]) {
                for block in [1, 3, 7, 32] {
                    assert_covers_grid(width, height, block, block);
                }
            }
        }
        // Non-square blocks and extreme aspect ratios
        assert_covers_grid(1920, 1080, 64, 16);
        assert_covers_grid(2000, 3, 1, 1);
        assert_covers_grid(3, 2000, 2, 5);
    }

    #[test]
    fn test_spiral_empty_image() {
        assert_eq!(Spiral::new(0, 100, 32, 32).next(), None);
        assert_eq!(Spiral::new(100, 0, 32, 32).next(), None);
        assert!(generate_buckets(0, 0, 32, 32).is_empty());
    }

    #[test]
    fn test_spiral_starts_at_center() {
        let cells: Vec<_> = Spiral::new(96, 96, 32, 32).collect();
        assert_eq!(&cells[..3], &[(1, 1), (1, 2), (2, 2)]);
        assert_eq!(Spiral::new(10, 10, 32, 32).collect::<Vec<_>>(), vec![(0, 0)]);
    }

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        // Total pixels should equal image size
        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 32, 32);
        assert_eq!(buckets.len(), 12); // 4x3 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 70);
        assert!(buckets.iter().all(|b| b.x + b.width <= 100 && b.y + b.height <= 70));

        for (i, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.index, i);
        }
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        // First bucket should be the center one
        let first = &buckets[0];
        assert_eq!(first.x, 64);
        assert_eq!(first.y, 64);
    }
}
