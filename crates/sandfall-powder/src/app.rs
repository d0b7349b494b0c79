//! Application state and the fixed-rate run loop

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::time::Duration;
use web_time::Instant;

use sandfall_core::{Kind, TickStats, World};

use crate::config::PowderConfig;
use crate::scene::Scene;

/// Outcome of a finished run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Counters summed over every tick
    pub totals: TickStats,
    /// Cells changed by scene strokes
    pub painted: usize,
    pub particles: usize,
    pub elapsed: Duration,
}

/// Main application state
pub struct App {
    world: World,
    scene: Scene,
    config: PowderConfig,
    totals: TickStats,
    painted: usize,
}

impl App {
    /// Create the world described by `config` and attach `scene`
    pub fn new(config: PowderConfig, scene: Scene) -> Result<Self> {
        let world = match config.sim.seed {
            Some(seed) => World::with_seed(config.grid.width, config.grid.height, seed),
            None => World::new(config.grid.width, config.grid.height),
        }
        .context("Failed to create world")?;

        log::info!(
            "Loaded scene '{}' ({} strokes)",
            scene.name,
            scene.strokes.len()
        );

        Ok(Self {
            world,
            scene,
            config,
            totals: TickStats::default(),
            painted: 0,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Paint this tick's strokes, then advance the world by one tick
    pub fn tick(&mut self) -> Result<TickStats> {
        let next = self.world.tick() + 1;
        self.painted += self
            .scene
            .paint(&mut self.world, next, &self.config.brush)
            .with_context(|| format!("Failed to paint scene at tick {next}"))?;

        let stats = self.world.step();
        self.totals.accumulate(&stats);
        Ok(stats)
    }

    /// Run `run.ticks` ticks, pacing them when `run.realtime` is set
    pub fn run(&mut self) -> Result<RunSummary> {
        let run = self.config.run.clone();
        let frame_time = Duration::from_secs_f64(1.0 / self.config.sim.tick_rate_hz as f64);
        let started = Instant::now();

        log::info!(
            "Running {} ticks on a {}x{} grid{}",
            run.ticks,
            self.world.width(),
            self.world.height(),
            if run.realtime { " in real time" } else { "" }
        );

        for _ in 0..run.ticks {
            let tick_start = Instant::now();
            let stats = self.tick()?;

            if run.log_every > 0 && stats.tick % run.log_every == 0 {
                log::info!(
                    "{} | {} particles | {}",
                    stats,
                    self.world.particle_count(),
                    format_counts(&self.world)
                );
            }

            if run.realtime {
                let spent = tick_start.elapsed();
                if spent < frame_time {
                    std::thread::sleep(frame_time - spent);
                } else {
                    log::debug!("Tick {} overran its budget by {:?}", stats.tick, spent - frame_time);
                }
            }
        }

        let summary = RunSummary {
            totals: self.totals,
            painted: self.painted,
            particles: self.world.particle_count(),
            elapsed: started.elapsed(),
        };

        log::info!(
            "Finished {} ticks in {:.2?}: {} particles, {} cells painted, {} swaps, {} transmutations",
            summary.totals.tick,
            summary.elapsed,
            summary.particles,
            summary.painted,
            summary.totals.swaps,
            summary.totals.transmutations
        );

        Ok(summary)
    }
}

/// "sand=12 water=40 ..." for every kind present
pub fn format_counts(world: &World) -> String {
    let mut out = String::new();
    for (kind, count) in world.kind_counts() {
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "{kind}={count}");
    }
    out
}

/// Text frame: one glyph per cell, one line per row
pub fn render_text(world: &World) -> String {
    let materials = world.materials();
    let width = world.width() as i32;
    let height = world.height() as i32;

    let mut out = String::with_capacity(((width + 1) * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let kind = world.kind_at(x, y).unwrap_or(Kind::Empty);
            out.push(materials.get(kind).glyph);
        }
        out.push('\n');
    }
    out
}
