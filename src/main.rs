//! Render a YAML scene to a PPM or PNG image
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use tracing::info;
use tracing_subscriber::EnvFilter;
use whitted::scene::Scene;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Scene description
    #[arg(short, long)]
    scene: PathBuf,

    /// Output image; `.ppm` is written as plain text, anything else goes through `image`
    #[arg(short, long)]
    output: PathBuf,

    /// Reflection/refraction bounces per camera ray, overriding the scene's `max_depth`
    #[arg(short, long)]
    depth: Option<u32>,

    #[arg(long, requires = "height")]
    width: Option<usize>,

    #[arg(long, requires = "width")]
    height: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut scene = Scene::load(&args.scene)
        .with_context(|| format!("loading {}", args.scene.display()))?;
    if let Some(depth) = args.depth {
        scene.max_depth = depth;
    }
    if let (Some(width), Some(height)) = (args.width, args.height) {
        scene.camera = scene.camera.resized(width, height);
    }

    // Render
    let camera = &scene.camera;
    let bar = ProgressBar::new((camera.hsize() * camera.vsize()) as u64);
    let image = camera.render_with(&scene.world(), scene.max_depth, |_| bar.inc(1));
    bar.finish();

    let is_ppm = args
        .output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));
    if is_ppm {
        fs::write(&args.output, image.to_ppm())
            .with_context(|| format!("writing {}", args.output.display()))?;
    } else {
        image
            .to_rgb_image()
            .save(&args.output)
            .with_context(|| format!("writing {}", args.output.display()))?;
    }

    info!(output = %args.output.display(), "image written");
    Ok(())
}
