//! Wind particle animation demo driver.
//!
//! Loads a JSON array of station observations, builds the dense wind field
//! in cooperative slices, then runs the particle animation and writes one
//! PNG per frame. Everything runs on a current-thread runtime: the build
//! and the animation are sequenced, never concurrent.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use animator::pipeline::build_field;
use particles::{render_frame, CancelFlag, ParticleSettings, ParticleSystem, TickPacer};
use trail_renderer::{PixmapSurface, TrailPalette};
use wind_common::{Bounds, Observation};

#[derive(Parser, Debug)]
#[command(name = "animator")]
#[command(about = "Render a wind observation file as an animated particle flow")]
struct Args {
    /// Observation JSON file (array of station records)
    samples: PathBuf,

    /// Directory PNG frames are written to
    #[arg(short, long, default_value = "frames")]
    out_dir: PathBuf,

    /// Number of frames to render
    #[arg(short, long, default_value_t = 120)]
    frames: u32,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Number of live particles
    #[arg(long, default_value_t = 5000)]
    particles: usize,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let raw = fs::read_to_string(&args.samples)
        .with_context(|| format!("reading {}", args.samples.display()))?;
    let observations: Vec<Observation> =
        serde_json::from_str(&raw).context("parsing observation records")?;
    info!(records = observations.len(), "loaded observations");
    if let Some(first) = observations.first() {
        info!(date = %first.date, "observation cycle");
    }

    let bounds = Bounds::new(args.width, args.height);
    let field = build_field(&observations, bounds).await?;

    let cancel = CancelFlag::new();
    let ctrl_c_flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing current frame");
            ctrl_c_flag.cancel();
        }
    });

    animate(&args, field, cancel).await
}

async fn animate(args: &Args, field: wind_field::Field, cancel: CancelFlag) -> Result<()> {
    let settings = ParticleSettings {
        count: args.particles,
        ..ParticleSettings::default()
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut system = ParticleSystem::new(&field, settings.clone(), &mut rng)?;
    let palette = TrailPalette::grayscale(settings.style_count);
    let mut surface = PixmapSurface::new(field.bounds(), palette, settings.line_width)?;
    let pacer = TickPacer::new(settings.frame_interval);

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let run_start = Instant::now();
    let mut rendered = 0;
    for frame in 0..args.frames {
        if cancel.is_cancelled() {
            break;
        }
        let tick_start = Instant::now();

        let batches = system.tick(&field, &mut rng);
        render_frame(&mut surface, batches, settings.fade_retain);
        let path = args.out_dir.join(format!("frame_{frame:04}.png"));
        surface.save_png(&path)?;
        rendered += 1;

        let elapsed = tick_start.elapsed();
        if elapsed > pacer.rate() {
            warn!(frame, elapsed_ms = elapsed.as_millis() as u64, "tick overran");
        }
        tokio::time::sleep(pacer.delay_after(elapsed)).await;
    }

    info!(
        frames = rendered,
        elapsed_ms = run_start.elapsed().as_millis() as u64,
        "animation finished"
    );
    Ok(())
}
