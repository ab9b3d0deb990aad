// stardust-sim - Run the night-sky engine headless
//
// Scripts a page visit: the pointer sweeps across the sky, presses now and
// then, scrolls the letter section into view and opens/closes the modal.
// Each frame is encoded into the command buffer; population stats are
// logged as the run goes.
//
// Usage: cargo run --bin stardust-sim -- --frames 1200 --seed 7 --log-level debug

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use stardust_engine::{Config, Encoder, Rect, Renderer, Viewport, World};

/// Headless driver for the stardust engine
#[derive(Parser, Debug)]
#[command(name = "stardust-sim")]
#[command(version, about = "Simulate the animated night sky without a browser", long_about = None)]
struct Cli {
    /// Viewport width in CSS pixels
    #[arg(long, default_value = "1280")]
    width: f32,

    /// Viewport height in CSS pixels
    #[arg(long, default_value = "720")]
    height: f32,

    /// Device pixel ratio
    #[arg(long, default_value = "1")]
    dpr: f32,

    /// Number of frames to run
    #[arg(short, long, default_value = "600")]
    frames: u32,

    /// Host frame interval in milliseconds
    #[arg(long, default_value = "16.6667")]
    frame_ms: f64,

    /// RNG seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start with reduced motion
    #[arg(long)]
    reduced_motion: bool,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Config::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => Config::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if config.seed.is_none() {
        config.seed = Some(stardust_engine::sim::DEFAULT_SEED);
    }
    config.reduced_motion |= cli.reduced_motion;
    Ok(config)
}

/// Unknown names fall back to info.
fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(parse_level(&cli.log_level).as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(&cli)?;
    let viewport = Viewport::new(cli.width, cli.height, cli.dpr);
    let mut world = World::new(viewport, config).context("building world")?;
    info!(
        "stardust-sim v{} {}x{}, {} stars, {} particles",
        env!("CARGO_PKG_VERSION"),
        viewport.width,
        viewport.height,
        world.stars().len(),
        world.particles().len()
    );

    let (w, h) = (viewport.width, viewport.height);
    let modal = Rect::new(w * 0.3, h * 0.25, w * 0.4, h * 0.5);
    let mut renderer = Renderer::new();
    let mut encoder = Encoder::new();
    let mut stamp = 0.0;
    let mut commands = 0usize;

    // Script marks as fractions of the run
    let frames = cli.frames.max(1);
    let visible_at = frames / 4;
    let open_at = frames / 3;
    let close_at = frames * 3 / 4;

    for frame in 0..frames {
        let t = frame as f32 / frames as f32;
        world.pointer_move(w * t, h * (0.5 + 0.3 * (t * 12.0).sin()));
        if frame % 90 == 45 {
            if let Some(p) = world.pointer().pos {
                world.pointer_down(p.x, p.y);
            }
        } else if frame % 90 == 50 {
            world.pointer_up();
        }

        if frame == visible_at {
            world.set_section_visible(true);
        }
        if frame == open_at {
            world.open_modal();
        }
        if frame == close_at {
            world.close_modal();
        }

        stamp += cli.frame_ms;
        world.tick(stamp, &modal);

        encoder.reset();
        match renderer.render(&world, &mut encoder) {
            Ok(()) => {}
            Err(never) => match never {},
        }
        commands += encoder.len();

        if frame % 60 == 0 {
            info!(
                "frame {frame}: {} traces, {} comets, {} particles, {} letter hearts",
                world.traces().len(),
                world.comets().len(),
                world.particles().len(),
                world.letter_hearts().len()
            );
        }
        debug!("frame {frame}: {} floats encoded", encoder.len());
    }

    info!(
        "done: {frames} frames, {:.1} s simulated, {} floats encoded",
        world.now() / 1000.0,
        commands
    );
    Ok(())
}
