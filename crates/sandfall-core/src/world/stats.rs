//! Per-tick simulation statistics

use std::fmt;

/// Counters collected while advancing the world by one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Tick number these counters belong to (last tick when accumulated)
    pub tick: u64,
    /// Particles whose behavior ran
    pub visited: usize,
    /// Cell swaps performed by movement and flinging
    pub swaps: usize,
    /// Transmutations (creations, replacements, deletions)
    pub transmutations: usize,
}

impl TickStats {
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            ..Default::default()
        }
    }

    pub fn record_visit(&mut self) {
        self.visited += 1;
    }

    pub fn record_swap(&mut self) {
        self.swaps += 1;
    }

    pub fn record_transmutation(&mut self) {
        self.transmutations += 1;
    }

    /// Fold another tick's counters into a running total
    pub fn accumulate(&mut self, other: &TickStats) {
        self.tick = self.tick.max(other.tick);
        self.visited += other.visited;
        self.swaps += other.swaps;
        self.transmutations += other.transmutations;
    }
}

impl fmt::Display for TickStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {}: {} visited, {} swaps, {} transmutations",
            self.tick, self.visited, self.swaps, self.transmutations
        )
    }
}
