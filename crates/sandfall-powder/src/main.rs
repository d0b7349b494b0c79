//! Sandfall Powder - headless falling-sand runner

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use sandfall_powder::{App, PowderConfig, Scene, app::render_text};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of ticks to simulate (overrides run.ticks)
    #[arg(long)]
    ticks: Option<u64>,

    /// RNG seed for a reproducible run (overrides sim.seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Scene file (RON); the built-in demo scene is used when omitted
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Configuration file (RON) to use instead of ./sandfall.ron
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pace ticks at sim.tick_rate_hz
    #[arg(long)]
    realtime: bool,

    /// Print the final grid as text
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = PowderConfig::load_from(args.config.as_deref())?;
    if let Some(ticks) = args.ticks {
        config.run.ticks = ticks;
    }
    if let Some(seed) = args.seed {
        config.sim.seed = Some(seed);
    }
    if args.realtime {
        config.run.realtime = true;
    }

    log::info!("Starting Sandfall Powder");

    let scene = match &args.scene {
        Some(path) => Scene::load(path)?,
        None => Scene::demo(config.grid.width, config.grid.height),
    };

    let mut app = App::new(config, scene)?;
    app.run()?;

    if args.dump {
        print!("{}", render_text(app.world()));
    }

    Ok(())
}
