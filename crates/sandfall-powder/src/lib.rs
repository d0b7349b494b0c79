//! # Sandfall Powder - headless Powder Game runner
//!
//! Drives the Sandfall engine at a fixed tick rate from a scripted scene,
//! logging progress and optionally dumping the final grid as text.

pub mod app;
pub mod config;
pub mod scene;
pub mod tools;

pub use app::{App, RunSummary};
pub use config::PowderConfig;
pub use scene::{Scene, Stroke};
