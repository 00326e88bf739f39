//! Luma renderer - CPU Monte Carlo light transport
//!
//! Estimates per-pixel radiance by sampling light paths:
//! - Direct illumination by projected-solid-angle sampling
//! - Recursive path tracing with fixed-depth or Russian Roulette termination
//! - Homogeneous participating media with free-flight sampling
//!
//! Pixels are rendered in buckets visited in a center-out spiral and
//! dispatched across a rayon worker pool by a [`RenderSession`].

mod bucket;
mod camera;
mod color;
mod config;
mod error;
mod hittable;
mod integrator;
mod material;
mod medium;
mod quad;
mod renderer;
mod sampler;
mod scene;
mod session;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, Spiral, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use color::{channel_avg, clamp_01, color_to_rgba, gamma_correct, Color, DEFAULT_GAMMA};
pub use config::{EstimatorConfig, RenderConfig};
pub use error::{ConfigError, ConfigResult, RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use integrator::{
    direct_illumination, AmbientOcclusion, DirectIllumination, Estimator, PathTracer,
    Termination, DEFAULT_DEPTH_LIMIT, MAX_ROULETTE_DEPTH,
};
pub use material::{Brdf, DiffuseLight, Lambertian, LuminaireSamplingRecord, Material};
pub use medium::{
    HomogeneousMedium, IsotropicPhaseFunction, Medium, MediumSamplingRecord, PhaseFunction,
    PhaseSample,
};
pub use quad::Quad;
pub use renderer::{render, render_pixel, ImageBuffer};
pub use sampler::{IndependentSampler, Sampler};
pub use scene::Scene;
pub use session::{Display, ProgressDisplay, RenderSession};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from luma_math
pub use luma_math::{Aabb, Frame, Interval, Ray, Vec2, Vec3};
