//! Parallel render sessions.
//!
//! A [`RenderSession`] owns the settings and a rayon worker pool. Buckets
//! are submitted in spiral order, one task each, with a private sampler
//! clone per task. Finished buckets travel over a channel back to the
//! calling thread, which is the only writer of the image and the only
//! caller of the display.

use crate::{
    generate_buckets, render_bucket, Bucket, BucketResult, Camera, Estimator, ImageBuffer,
    IndependentSampler, RenderConfig, RenderError, RenderResult, Scene,
};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use crossbeam::channel;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Receives the image as buckets complete.
pub trait Display {
    /// Called after `bucket`'s pixels have been written into `image`.
    fn update(&mut self, image: &ImageBuffer, bucket: &Bucket);
}

/// Display that logs completion milestones instead of drawing.
#[derive(Debug, Clone)]
pub struct ProgressDisplay {
    total: usize,
    completed: usize,
    next_milestone: usize,
}

impl ProgressDisplay {
    /// Percent step between log lines.
    const STEP: usize = 10;

    pub fn new(total_buckets: usize) -> Self {
        Self {
            total: total_buckets,
            completed: 0,
            next_milestone: Self::STEP,
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }
}

impl Display for ProgressDisplay {
    fn update(&mut self, _image: &ImageBuffer, _bucket: &Bucket) {
        self.completed += 1;
        let percent = self.completed * 100 / self.total.max(1);
        if percent >= self.next_milestone {
            log::info!("Progress: {}% ({}/{} buckets)", percent, self.completed, self.total);
            self.next_milestone = (percent / Self::STEP + 1) * Self::STEP;
        }
    }
}

type BucketMessage = Result<BucketResult, (Bucket, String)>;

/// Render context: settings, estimator and worker pool.
pub struct RenderSession {
    config: RenderConfig,
    estimator: Estimator,
    pool: rayon::ThreadPool,
}

impl RenderSession {
    /// Validate the settings and build the worker pool.
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        let estimator = config.estimator()?;

        let threads = config.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("luma-worker-{i}"))
            .build()?;

        Ok(Self {
            config,
            estimator,
            pool,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Render the scene, blocking until every bucket has finished.
    ///
    /// A panic inside any bucket stops new buckets from starting and is
    /// reported as [`RenderError::BucketFailed`]; a partial image is never
    /// returned.
    pub fn render(
        &self,
        scene: &Scene,
        camera: &Camera,
        mut display: Option<&mut dyn Display>,
    ) -> RenderResult<ImageBuffer> {
        let config = &self.config;
        let buckets = generate_buckets(
            camera.image_width,
            camera.image_height,
            config.bucket_width,
            config.bucket_height,
        );

        log::info!(
            "Rendering {}x{} ({} buckets of {}x{}) with {} on {} threads, {} spp",
            camera.image_width,
            camera.image_height,
            buckets.len(),
            config.bucket_width,
            config.bucket_height,
            self.estimator.name(),
            self.threads(),
            config.samples_per_pixel,
        );
        let start = Instant::now();

        let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
        let mut failure: Option<RenderError> = None;
        let abort = AtomicBool::new(false);
        let sampler = IndependentSampler::new(config.samples_per_pixel, config.seed);
        let estimator = self.estimator;
        let gamma = config.gamma;
        let (tx, rx) = channel::unbounded::<BucketMessage>();

        crossbeam::scope(|s| {
            let abort = &abort;
            let buckets = &buckets;
            let sampler = &sampler;

            s.spawn(move |_| {
                self.pool.scope_fifo(move |pool| {
                    for bucket in buckets {
                        let tx = tx.clone();
                        let mut sampler = sampler.clone();
                        pool.spawn_fifo(move |_| {
                            if abort.load(Ordering::Relaxed) {
                                return;
                            }
                            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                                render_bucket(bucket, scene, camera, &estimator, gamma, &mut sampler)
                            }));
                            let message = match outcome {
                                Ok(pixels) => Ok(BucketResult::new(*bucket, pixels)),
                                Err(payload) => {
                                    abort.store(true, Ordering::Relaxed);
                                    Err((*bucket, panic_message(payload.as_ref())))
                                }
                            };
                            // The receiver outlives every task
                            let _ = tx.send(message);
                        });
                    }
                });
            });

            // Ends once the dispatcher and every task have dropped their senders
            for message in rx {
                match message {
                    Ok(result) => {
                        image.write_bucket(&result.bucket, &result.pixels);
                        log::debug!(
                            "Bucket {} at ({}, {}) done",
                            result.bucket.index,
                            result.bucket.x,
                            result.bucket.y
                        );
                        if let Some(display) = display.as_deref_mut() {
                            display.update(&image, &result.bucket);
                        }
                    }
                    Err((bucket, message)) => {
                        log::error!(
                            "Bucket {} at ({}, {}) failed: {}",
                            bucket.index,
                            bucket.x,
                            bucket.y,
                            message
                        );
                        failure.get_or_insert(RenderError::BucketFailed {
                            x: bucket.x,
                            y: bucket.y,
                            width: bucket.width,
                            height: bucket.height,
                            message,
                        });
                    }
                }
            }
        })
        .map_err(|payload| RenderError::Dispatch(panic_message(payload.as_ref())))?;

        if let Some(err) = failure {
            return Err(err);
        }

        log::info!("Render finished in {:.2?}", start.elapsed());
        Ok(image)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        render, Color, DiffuseLight, EstimatorConfig, HitRecord, Hittable, HittableList, Lambertian,
        Quad, Sphere,
    };
    use luma_math::{Aabb, Interval, Ray, Vec3};

    fn test_scene() -> (Scene, Camera) {
        let mut world = HittableList::new();
        world.add(Box::new(Quad::new(
            Vec3::new(-5.0, -1.0, -5.0),
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, 0.0),
            Lambertian::new(Color::splat(0.6)),
        )));
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.7, Lambertian::new(Color::new(0.8, 0.3, 0.3)))));
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 4.0, -2.0),
            1.5,
            DiffuseLight::new(Color::splat(4.0)),
        )));

        let mut camera = Camera::new()
            .with_resolution(24, 17)
            .with_position(Vec3::new(0.0, 0.5, 1.0), Vec3::new(0.0, 0.0, -2.0), Vec3::Y)
            .with_fov(60.0);
        camera.initialize();

        (Scene::new(world).with_background(Color::splat(0.1)), camera)
    }

    fn small_config(threads: usize) -> RenderConfig {
        RenderConfig {
            samples_per_pixel: 4,
            bucket_width: 5,
            bucket_height: 4,
            threads: Some(threads),
            seed: 11,
            ..Default::default()
        }
    }

    struct Recorder {
        buckets: Vec<usize>,
    }

    impl Display for Recorder {
        fn update(&mut self, image: &ImageBuffer, bucket: &Bucket) {
            assert_eq!(image.width, 24);
            self.buckets.push(bucket.index);
        }
    }

    struct Exploding;

    impl Hittable for Exploding {
        fn hit(&self, _ray: &Ray, _ray_t: Interval) -> Option<HitRecord<'_>> {
            panic!("surface exploded");
        }

        fn bounding_box(&self) -> Aabb {
            Aabb::EMPTY
        }
    }

    #[test]
    fn test_parallel_matches_single_threaded() {
        let (scene, camera) = test_scene();
        let config = small_config(4);

        let session = RenderSession::new(config.clone()).expect("session");
        assert_eq!(session.threads(), 4);
        let parallel = session.render(&scene, &camera, None).expect("render");
        let reference = render(&scene, &camera, &config).expect("render");

        assert_eq!(parallel, reference);
        assert!(parallel.pixels.iter().any(|p| p.length() > 0.0));
    }

    #[test]
    fn test_thread_count_does_not_change_image() {
        let (scene, camera) = test_scene();
        let one = RenderSession::new(small_config(1)).expect("session");
        let many = RenderSession::new(small_config(3)).expect("session");

        let a = one.render(&scene, &camera, None).expect("render");
        let b = many.render(&scene, &camera, None).expect("render");
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_sees_every_bucket() {
        let (scene, camera) = test_scene();
        let session = RenderSession::new(small_config(2)).expect("session");
        let mut recorder = Recorder { buckets: Vec::new() };

        session.render(&scene, &camera, Some(&mut recorder)).expect("render");

        // 24x17 in 5x4 buckets: 5 columns, 5 rows
        let mut seen = recorder.buckets.clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_progress_display_counts() {
        let (scene, camera) = test_scene();
        let session = RenderSession::new(small_config(2)).expect("session");
        let mut progress = ProgressDisplay::new(25);

        session.render(&scene, &camera, Some(&mut progress)).expect("render");
        assert_eq!(progress.completed(), 25);
    }

    #[test]
    fn test_panicking_bucket_fails_render() {
        let mut world = HittableList::new();
        world.add(Box::new(Exploding));
        let scene = Scene::new(world);
        let (_, camera) = test_scene();

        let session = RenderSession::new(small_config(2)).expect("session");
        match session.render(&scene, &camera, None) {
            Err(RenderError::BucketFailed { width, height, message, .. }) => {
                assert!(width > 0 && height > 0);
                assert!(message.contains("surface exploded"), "message: {message}");
            }
            other => panic!("expected a bucket failure, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = RenderConfig {
            threads: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            RenderSession::new(config),
            Err(RenderError::Config(crate::ConfigError::ZeroThreads))
        ));
    }

    #[test]
    fn test_single_pixel_emitter_end_to_end() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -3.0),
            1.0,
            DiffuseLight::new(Color::splat(0.5)),
        )));
        let scene = Scene::new(world);
        let mut camera = Camera::new()
            .with_resolution(1, 1)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_fov(10.0);
        camera.initialize();

        for estimator in [EstimatorConfig::DirectIllumination, EstimatorConfig::default()] {
            let session = RenderSession::new(RenderConfig {
                samples_per_pixel: 16,
                threads: Some(1),
                estimator,
                ..Default::default()
            })
            .expect("session");

            let image = session.render(&scene, &camera, None).expect("render");
            let expected = 0.5_f32.powf(1.0 / 2.2);
            assert!((image.get(0, 0).x - expected).abs() < 1e-4);
        }
    }
}
