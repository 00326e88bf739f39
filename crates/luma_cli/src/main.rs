mod cli;
mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use luma_renderer::{generate_buckets, ProgressDisplay, RenderConfig, RenderSession};
use std::path::Path;
use std::time::Instant;

fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    let Some(path) = path else {
        return Ok(RenderConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
    log::info!("Loaded settings from {}", path.display());
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Luma");

    let mut config = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut config);

    let (scene, camera) = scenes::build(args.scene, args.width, args.height)?;
    log::info!("Built {:?} scene", args.scene);

    let session = RenderSession::new(config).context("Failed to start render session")?;
    let config = session.config();
    let total = generate_buckets(
        camera.image_width,
        camera.image_height,
        config.bucket_width,
        config.bucket_height,
    )
    .len();
    let mut progress = ProgressDisplay::new(total);

    let start = Instant::now();
    let image = session
        .render(&scene, &camera, Some(&mut progress))
        .context("Render failed")?;
    let elapsed = start.elapsed();

    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!(
        "Rendered {}x{} in {:.2?}, saved to {}",
        image.width,
        image.height,
        elapsed,
        args.output.display()
    );

    Ok(())
}
