//! Render settings, loadable from JSON.

use crate::integrator::{AmbientOcclusion, DirectIllumination, Estimator, PathTracer, Termination};
use crate::{ConfigError, ConfigResult, DEFAULT_BUCKET_SIZE, DEFAULT_GAMMA};
use serde::{Deserialize, Serialize};

/// Render configuration.
///
/// Every field has a default, so a settings file only names what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel
    pub samples_per_pixel: u32,
    /// Bucket width in pixels
    pub bucket_width: u32,
    /// Bucket height in pixels
    pub bucket_height: u32,
    /// Worker threads; `None` uses the available hardware concurrency
    pub threads: Option<usize>,
    /// Display gamma applied when writing pixels
    pub gamma: f32,
    /// Base seed for every pixel's sample stream
    pub seed: u64,
    /// Radiance estimator
    pub estimator: EstimatorConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 16,
            bucket_width: DEFAULT_BUCKET_SIZE,
            bucket_height: DEFAULT_BUCKET_SIZE,
            threads: None,
            gamma: DEFAULT_GAMMA,
            seed: 0,
            estimator: EstimatorConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Check every setting, reporting the first problem found.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.bucket_width == 0 || self.bucket_height == 0 {
            return Err(ConfigError::ZeroBucketSize {
                width: self.bucket_width,
                height: self.bucket_height,
            });
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(ConfigError::InvalidGamma(self.gamma));
        }
        self.estimator()?;
        Ok(())
    }

    /// Build the runtime estimator.
    pub fn estimator(&self) -> ConfigResult<Estimator> {
        self.estimator.build()
    }
}

/// Which estimator to render with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EstimatorConfig {
    AmbientOcclusion {
        #[serde(default = "default_occlusion_length")]
        length: f32,
    },
    DirectIllumination,
    PathTracer {
        #[serde(default)]
        termination: Termination,
        #[serde(default)]
        background_illumination: bool,
    },
}

fn default_occlusion_length() -> f32 {
    AmbientOcclusion::default().length
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig::PathTracer {
            termination: Termination::default(),
            background_illumination: false,
        }
    }
}

impl EstimatorConfig {
    pub fn build(&self) -> ConfigResult<Estimator> {
        match *self {
            EstimatorConfig::AmbientOcclusion { length } => {
                if !(length.is_finite() && length > 0.0) {
                    return Err(ConfigError::InvalidOcclusionLength(length));
                }
                Ok(Estimator::AmbientOcclusion(AmbientOcclusion::new(length)))
            }
            EstimatorConfig::DirectIllumination => Ok(Estimator::DirectIllumination(DirectIllumination)),
            EstimatorConfig::PathTracer {
                termination,
                background_illumination,
            } => {
                termination.validate()?;
                Ok(Estimator::PathTracer(
                    PathTracer::new(termination).with_background_illumination(background_illumination),
                ))
            }
        }
    }
}
