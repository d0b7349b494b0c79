//! Deterministic RNG stubs for unit tests

use std::collections::VecDeque;

use super::rng_trait::WorldRng;
use super::world::World;
use crate::simulation::Kind;

/// Replays a fixed list of draws, then sticks to one end of every range.
///
/// Scripted values are clamped into the requested range.
pub(crate) struct ScriptedRng {
    script: VecDeque<i32>,
    prefer_max: bool,
}

impl ScriptedRng {
    /// Always the low end: first list entry, every roll succeeds
    pub(crate) fn low() -> Self {
        Self::script([], false)
    }

    /// Always the high end: last list entry, every roll fails
    pub(crate) fn high() -> Self {
        Self::script([], true)
    }

    pub(crate) fn script(values: impl IntoIterator<Item = i32>, prefer_max: bool) -> Self {
        Self {
            script: values.into_iter().collect(),
            prefer_max,
        }
    }

    /// Draws still queued
    pub(crate) fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl WorldRng for ScriptedRng {
    fn random_int(&mut self, min: i32, max: i32) -> i32 {
        match self.script.pop_front() {
            Some(value) => value.clamp(min, max.max(min)),
            None if self.prefer_max => max.max(min),
            None => min,
        }
    }
}

/// Build a world, place `cells` in order, then install `rng`.
///
/// Placement draws (fire and steam jitter) come from a low stub, so the
/// script only has to cover the tick itself.
pub(crate) fn world_with(
    width: u32,
    height: u32,
    rng: ScriptedRng,
    cells: &[(i32, i32, Kind)],
) -> World<ScriptedRng> {
    let mut world = World::with_rng(width, height, ScriptedRng::low()).unwrap();
    for &(x, y, kind) in cells {
        world.create_particle(x, y, kind).unwrap();
    }
    world.rng = rng;
    world
}
