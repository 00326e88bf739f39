use clap::{Parser, ValueEnum};
use log::LevelFilter;
use luma_renderer::RenderConfig;
use std::path::PathBuf;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in demo scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneName {
    /// Closed box with colored walls, two spheres and a ceiling light
    Cornell,
    /// The Cornell box filled with a scattering medium
    Fog,
    /// Inside an emitting, reflecting sphere
    Furnace,
}

#[derive(Debug, Parser)]
#[command(name = "luma")]
#[command(about = "Offline Monte Carlo light-transport renderer")]
pub struct Args {
    /// Scene to render
    #[arg(value_enum, default_value = "cornell")]
    pub scene: SceneName,

    /// JSON render settings; command line flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Worker threads (defaults to the available hardware concurrency)
    #[arg(short = 's', long)]
    pub threads: Option<usize>,

    /// Samples per pixel
    #[arg(long)]
    pub spp: Option<u32>,

    /// Image width in pixels
    #[arg(long, default_value_t = 512)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 512)]
    pub height: u32,

    /// Output image path (format from the extension)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Base seed for the per-pixel sample streams
    #[arg(long)]
    pub seed: Option<u64>,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply the flags that were given on top of loaded settings.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        if let Some(threads) = self.threads {
            config.threads = Some(threads);
        }
        if let Some(spp) = self.spp {
            config.samples_per_pixel = spp;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }
}
