//! Error types for configuration and rendering.

use thiserror::Error;

/// Errors raised while validating render settings or scene parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Survival probability must be in (0, 1], got {0}")]
    InvalidSurvivalProbability(f32),

    #[error("Bucket size must be non-zero, got {width}x{height}")]
    ZeroBucketSize { width: u32, height: u32 },

    #[error("Thread count must be non-zero")]
    ZeroThreads,

    #[error("Samples per pixel must be non-zero")]
    ZeroSamples,

    #[error("Medium {name} coefficient must be finite and non-negative, got {value}")]
    InvalidCoefficient { name: &'static str, value: f32 },

    #[error("Gamma must be finite and positive, got {0}")]
    InvalidGamma(f32),

    #[error("Ambient occlusion length must be finite and positive, got {0}")]
    InvalidOcclusionLength(f32),
}

/// Result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by a render session.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Bucket at ({x}, {y}) size {width}x{height} failed: {message}")]
    BucketFailed {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        message: String,
    },

    #[error("Bucket dispatch failed: {0}")]
    Dispatch(String),

    #[error("Image output failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;
