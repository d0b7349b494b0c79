//! Scripted scenes
//!
//! A scene is a list of brush strokes, each held down for a window of ticks.
//! It stands in for the pointer input of an interactive front end.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use sandfall_core::{Kind, World, WorldError};

use crate::config::BrushConfig;
use crate::tools::{PenTool, Tool};

/// One brush stroke, painted at the start of every tick in its window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub kind: Kind,
    pub x: i32,
    pub y: i32,
    /// Brush half-width; falls back to `brush.size` from the config
    #[serde(default)]
    pub size: Option<u32>,
    /// Overwrite occupied cells; falls back to `brush.replace`
    #[serde(default)]
    pub replace: Option<bool>,
    /// First tick (1-based) the stroke is painted
    #[serde(default = "first_tick")]
    pub from_tick: u64,
    /// Last tick painted, inclusive; a single tick when absent
    #[serde(default)]
    pub until_tick: Option<u64>,
}

fn first_tick() -> u64 {
    1
}

impl Stroke {
    /// A one-tick stroke at tick 1 with the configured brush
    pub fn at(kind: Kind, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            size: None,
            replace: None,
            from_tick: first_tick(),
            until_tick: None,
        }
    }

    pub fn sized(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn replacing(mut self) -> Self {
        self.replace = Some(true);
        self
    }

    /// Hold the stroke from `from` through `until`
    pub fn during(mut self, from: u64, until: u64) -> Self {
        self.from_tick = from;
        self.until_tick = Some(until);
        self
    }

    pub fn is_active(&self, tick: u64) -> bool {
        tick >= self.from_tick && tick <= self.until_tick.unwrap_or(self.from_tick)
    }
}

/// An ordered list of strokes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub name: String,
    pub strokes: Vec<Stroke>,
}

impl Scene {
    /// Read a scene from a RON file
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene {}", path.display()))?;
        Self::from_ron_str(&source).with_context(|| format!("Invalid scene {}", path.display()))
    }

    pub fn from_ron_str(source: &str) -> Result<Self> {
        ron::from_str(source).context("Failed to parse scene")
    }

    /// Built-in demo: a sand pile, a lake, an oil slick and a steam cloud,
    /// scaled to the grid
    pub fn demo(width: u32, height: u32) -> Self {
        let w = width as i32;
        let h = height as i32;
        let at = |fx: i32, fy: i32| (w * fx / 100, h * fy / 100);

        let mut strokes = Vec::new();

        // Floor and a basin on the right
        for step in 0..10 {
            let (x, y) = at(5 + step * 10, 90);
            strokes.push(Stroke::at(Kind::Wall, x, y).sized(5));
        }
        let (x, y) = at(60, 80);
        strokes.push(Stroke::at(Kind::Wall, x, y).sized(4));
        let (x, y) = at(95, 80);
        strokes.push(Stroke::at(Kind::Wall, x, y).sized(4));

        // Lake in the basin with an oil slick on top
        let (x, y) = at(78, 70);
        strokes.push(Stroke::at(Kind::Water, x, y).sized(6).during(1, 40));
        let (x, y) = at(78, 50);
        strokes.push(Stroke::at(Kind::Oil, x, y).sized(3).during(60, 70));

        // Sand pouring on the left, salt sprinkled into the lake
        let (x, y) = at(25, 20);
        strokes.push(Stroke::at(Kind::Sand, x, y).sized(3).during(1, 120));
        let (x, y) = at(70, 30);
        strokes.push(Stroke::at(Kind::Salt, x, y).sized(1).during(90, 100));

        // Wood post set on fire
        let (x, y) = at(45, 75);
        strokes.push(Stroke::at(Kind::Wood, x, y).sized(3));
        let (x, y) = at(45, 68);
        strokes.push(Stroke::at(Kind::Fire, x, y).sized(1).during(80, 82));

        // Lava drip and a steam cloud up top
        let (x, y) = at(10, 40);
        strokes.push(Stroke::at(Kind::Lava, x, y).sized(2).during(150, 160));
        let (x, y) = at(50, 15);
        strokes.push(Stroke::at(Kind::Steam, x, y).sized(6).during(20, 30));

        Self {
            name: "demo".to_string(),
            strokes,
        }
    }

    /// Paint every stroke active at `tick`; returns the number of cells changed
    pub fn paint(
        &self,
        world: &mut World,
        tick: u64,
        brush: &BrushConfig,
    ) -> Result<usize, WorldError> {
        let mut painted = 0;
        for stroke in self.strokes.iter().filter(|s| s.is_active(tick)) {
            let pen = PenTool::new(stroke.kind, stroke.replace.unwrap_or(brush.replace));
            let size = stroke.size.unwrap_or(brush.size);
            let changed = pen.apply(world, stroke.x, stroke.y, size)?;
            log::trace!(
                "{} {} at ({}, {}): {changed} cells",
                pen.name(),
                stroke.kind,
                stroke.x,
                stroke.y
            );
            painted += changed;
        }
        Ok(painted)
    }

    /// Last tick any stroke is painted
    pub fn last_tick(&self) -> u64 {
        self.strokes
            .iter()
            .map(|s| s.until_tick.unwrap_or(s.from_tick))
            .max()
            .unwrap_or(0)
    }
}
