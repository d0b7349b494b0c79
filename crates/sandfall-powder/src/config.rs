//! Configuration for Sandfall Powder
//!
//! Loaded in layers with the `config` crate:
//! 1. Compiled defaults
//! 2. `sandfall.ron` in the working directory (optional), or an explicit file
//! 3. Environment variables prefixed with `SANDFALL_`
//!
//! Example environment variable: `SANDFALL_GRID__WIDTH=200`

use anyhow::{Context, Result, ensure};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the powder runner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowderConfig {
    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub sim: SimConfig,

    #[serde(default)]
    pub brush: BrushConfig,

    #[serde(default)]
    pub run: RunConfig,
}

/// Grid dimensions in cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
        }
    }
}

/// Simulation clock and random source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Target ticks per second when running in real time
    pub tick_rate_hz: u32,
    /// Fixed RNG seed; drawn from entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 30,
            seed: None,
        }
    }
}

/// Default brush used by scene strokes that do not set their own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Half-width of the painted square
    pub size: u32,
    /// Overwrite occupied cells instead of only filling empty ones
    pub replace: bool,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: 2,
            replace: false,
        }
    }
}

/// Headless run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of ticks to simulate
    pub ticks: u64,
    /// Pace ticks at `sim.tick_rate_hz` instead of running flat out
    pub realtime: bool,
    /// Log a progress line every N ticks (0 disables)
    pub log_every: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: 300,
            realtime: false,
            log_every: 30,
        }
    }
}

impl PowderConfig {
    /// Load configuration from defaults, a file and the environment.
    ///
    /// `path` must exist when given; otherwise `sandfall.ron` is read if present.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Ron).required(true),
            None => File::with_name("sandfall")
                .format(FileFormat::Ron)
                .required(false),
        };

        let config = Self::defaults()?
            .add_source(file)
            .add_source(Self::environment())
            .build()
            .context("Failed to build configuration")?;

        Self::finish(config)
    }

    /// Parse a RON document layered over the defaults (no environment)
    pub fn from_ron_str(source: &str) -> Result<Self> {
        let config = Self::defaults()?
            .add_source(File::from_str(source, FileFormat::Ron))
            .build()
            .context("Failed to build configuration")?;

        Self::finish(config)
    }

    /// Layer 1: compiled defaults
    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let defaults = Self::default();
        let builder = Config::builder()
            .set_default("grid.width", defaults.grid.width as i64)?
            .set_default("grid.height", defaults.grid.height as i64)?
            .set_default("sim.tick_rate_hz", defaults.sim.tick_rate_hz as i64)?
            .set_default("brush.size", defaults.brush.size as i64)?
            .set_default("brush.replace", defaults.brush.replace)?
            .set_default("run.ticks", defaults.run.ticks as i64)?
            .set_default("run.realtime", defaults.run.realtime)?
            .set_default("run.log_every", defaults.run.log_every as i64)?;
        Ok(builder)
    }

    /// Layer 3: SANDFALL_GRID__WIDTH, SANDFALL_SIM__SEED, ...
    fn environment() -> Environment {
        Environment::with_prefix("SANDFALL")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn finish(config: Config) -> Result<Self> {
        let loaded: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings the runner cannot work with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid.width > 0 && self.grid.height > 0,
            "grid must be at least 1x1, got {}x{}",
            self.grid.width,
            self.grid.height
        );
        ensure!(self.sim.tick_rate_hz > 0, "sim.tick_rate_hz must be positive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PowderConfig::default();
        assert_eq!(config.grid.width, 300);
        assert_eq!(config.grid.height, 300);
        assert_eq!(config.sim.tick_rate_hz, 30);
        assert_eq!(config.sim.seed, None);
        assert_eq!(config.brush.size, 2);
        assert!(!config.brush.replace);
        assert_eq!(config.run.ticks, 300);
        assert!(!config.run.realtime);
        assert_eq!(config.run.log_every, 30);
    }

    #[test]
    fn test_restating_defaults_changes_nothing() {
        let config = PowderConfig::from_ron_str("(run: (ticks: 300), brush: (size: 2))").unwrap();
        assert_eq!(config, PowderConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = PowderConfig::from_ron_str(
            "(grid: (width: 120, height: 80), sim: (seed: 7), run: (realtime: true))",
        )
        .unwrap();

        assert_eq!(config.grid.width, 120);
        assert_eq!(config.grid.height, 80);
        assert_eq!(config.sim.seed, Some(7));
        assert_eq!(config.sim.tick_rate_hz, 30);
        assert!(config.run.realtime);
        assert_eq!(config.run.ticks, 300);
    }

    #[test]
    fn test_rejects_zero_sized_grid() {
        assert!(PowderConfig::from_ron_str("(grid: (width: 0, height: 10))").is_err());
    }

    #[test]
    fn test_environment_overrides() {
        let vars = config::Map::from([
            ("SANDFALL_GRID__WIDTH".to_string(), "123".to_string()),
            ("SANDFALL_RUN__LOG_EVERY".to_string(), "7".to_string()),
            ("SANDFALL_SIM__SEED".to_string(), "99".to_string()),
            ("OTHER_GRID__HEIGHT".to_string(), "5".to_string()),
        ]);
        let built = PowderConfig::defaults()
            .unwrap()
            .add_source(PowderConfig::environment().source(Some(vars)))
            .build()
            .unwrap();

        let config = PowderConfig::finish(built).unwrap();

        assert_eq!(config.grid.width, 123);
        assert_eq!(config.grid.height, 300);
        assert_eq!(config.run.log_every, 7);
        assert_eq!(config.sim.seed, Some(99));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(PowderConfig::load_from(Some(Path::new("does-not-exist.ron"))).is_err());
    }
}
