//! ember - CPU Monte Carlo path tracer.
//!
//! Renders a built-in scene to a plain-text PPM stream on stdout or into
//! a file.

mod scenes;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ember_renderer::{render, RenderConfig};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scene {
    /// Bouncing spheres on a checkered ground, with motion blur and defocus
    Spheres,
    /// A globe wrapped in an image texture
    Earth,
    /// The Cornell box with an area light and two rotated boxes
    Cornell,
}

#[derive(Debug, Parser)]
#[command(name = "ember", about = "CPU Monte Carlo path tracer", version)]
struct Args {
    /// Built-in scene to render
    #[arg(long, value_enum, default_value = "spheres")]
    scene: Scene,

    /// Output image width in pixels
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Samples per pixel
    #[arg(long, default_value_t = 100)]
    samples: u32,

    /// Maximum ray bounce depth
    #[arg(long, default_value_t = 50)]
    depth: u32,

    /// Worker thread count (defaults to available parallelism)
    #[arg(long)]
    threads: Option<usize>,

    /// Base RNG seed; with a fixed seed and thread count a render repeats exactly
    #[arg(long)]
    seed: Option<u64>,

    /// Output PPM file; writes to stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scene = match args.scene {
        Scene::Spheres => scenes::bouncing_spheres(args.width),
        Scene::Earth => scenes::earth(args.width),
        Scene::Cornell => scenes::cornell_box(args.width),
    };

    let config = RenderConfig {
        samples_per_pixel: args.samples.max(1),
        max_depth: args.depth.max(1),
        background: scene.background,
        threads: args.threads,
        seed: args.seed,
    };

    let frame = render(&scene.camera, &config, &scene.world);

    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut out = BufWriter::new(file);
            frame.write_ppm(&mut out, config.samples_per_pixel)?;
            out.flush()?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            frame.write_ppm(&mut out, config.samples_per_pixel)?;
            out.flush()?;
        }
    }

    Ok(())
}
