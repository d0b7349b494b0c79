//! World - owns the grid, the particle registry and the random source
//!
//! The world is the only place that creates, moves or destroys particles, so
//! it is also the only place that has to keep the grid and the registry in
//! lock-step.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use std::collections::BTreeMap;

use super::error::{ConsistencyError, WorldError};
use super::grid::{Cell, Grid};
use super::neighbor_queries::Neighbor;
use super::registry::ParticleRegistry;
use super::rng_trait::WorldRng;
use super::stats::TickStats;
use crate::simulation::{
    FireState, Kind, Materials, Particle, ParticleId, ParticleState, SteamState, behaviors,
};

/// Ticks a fire burns before its random cap is added
const FIRE_BASE_LIFETIME: i32 = 30;
/// Percent chance per tick that fire rises
const FIRE_CHANCE_TO_RISE: i32 = 60;
/// Percent (near the top) / per-mille (when crowded) for steam to condense
const STEAM_CHANCE_TO_RAIN: i32 = 1;

/// The simulation context: grid, registry, materials and RNG
pub struct World<R = Xoshiro256StarStar> {
    pub(crate) grid: Grid,
    pub(crate) registry: ParticleRegistry,
    pub(crate) materials: Materials,
    pub(crate) rng: R,
    pub(crate) stats: TickStats,
    next_id: u64,
    tick: u64,
    /// Reused snapshot buffer for the step driver
    update_queue: Vec<ParticleId>,
}

impl World<Xoshiro256StarStar> {
    /// Create an empty world seeded from system entropy
    pub fn new(width: u32, height: u32) -> Result<Self, WorldError> {
        Self::with_seed(width, height, rand::random())
    }

    /// Create an empty world with a reproducible random stream
    pub fn with_seed(width: u32, height: u32, seed: u64) -> Result<Self, WorldError> {
        log::debug!("Seeding world RNG with {seed}");
        Self::with_rng(width, height, Xoshiro256StarStar::seed_from_u64(seed))
    }
}

impl<R: WorldRng> World<R> {
    /// Create an empty world driven by the given random source
    pub fn with_rng(width: u32, height: u32, rng: R) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }

        log::info!("Created {width}x{height} world");

        Ok(Self {
            grid: Grid::new(width, height),
            registry: ParticleRegistry::new(),
            materials: Materials::new(),
            rng,
            stats: TickStats::default(),
            next_id: 0,
            tick: 0,
            update_queue: Vec::new(),
        })
    }

    // === Dimensions ===

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Number of completed ticks since creation
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn materials(&self) -> &Materials {
        &self.materials
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    // === Read access ===

    /// Occupant at (x, y), `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.grid.get(x, y)
    }

    /// Kind at (x, y), `None` outside the grid
    pub fn kind_at(&self, x: i32, y: i32) -> Option<Kind> {
        self.grid.get(x, y).map(Cell::kind)
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.registry.get(id)
    }

    pub fn particle_at(&self, x: i32, y: i32) -> Option<&Particle> {
        self.grid
            .get(x, y)
            .and_then(Cell::id)
            .and_then(|id| self.registry.get(id))
    }

    /// All live particles in registry order
    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.registry.iter()
    }

    pub fn particle_count(&self) -> usize {
        self.registry.len()
    }

    /// Live particle count per kind
    pub fn kind_counts(&self) -> BTreeMap<Kind, usize> {
        let mut counts = BTreeMap::new();
        for particle in self.registry.iter() {
            *counts.entry(particle.kind).or_insert(0) += 1;
        }
        counts
    }

    /// RGBA framebuffer (row-major, 4 bytes per cell) for a renderer
    pub fn frame_rgba(&self) -> Vec<u8> {
        let background = self.materials.get_color(Kind::Empty);
        let width = self.width() as usize;
        let mut frame = background.repeat(width * self.height() as usize);

        for particle in self.registry.iter() {
            let offset = (particle.y as usize * width + particle.x as usize) * 4;
            frame[offset..offset + 4].copy_from_slice(&particle.color);
        }

        frame
    }

    // === Public mutation ===

    /// Place a new particle on an empty cell.
    ///
    /// Returns the new particle's id (`None` when placing `Kind::Empty`).
    pub fn create_particle(
        &mut self,
        x: i32,
        y: i32,
        kind: Kind,
    ) -> Result<Option<ParticleId>, WorldError> {
        let cell = self.checked_cell(x, y)?;
        if !cell.is_empty() {
            return Err(WorldError::CellOccupied {
                x,
                y,
                kind: cell.kind(),
            });
        }
        Ok(self.transmute_cell(x, y, kind))
    }

    /// Replace whatever occupies (x, y) with a fresh particle of `kind`.
    ///
    /// Transmuting to `Kind::Empty` deletes the occupant.
    pub fn transmute(
        &mut self,
        x: i32,
        y: i32,
        kind: Kind,
    ) -> Result<Option<ParticleId>, WorldError> {
        self.checked_cell(x, y)?;
        Ok(self.transmute_cell(x, y, kind))
    }

    /// Drop every particle and refill the grid with empty cells
    pub fn reset(&mut self) {
        log::info!(
            "Resetting world ({} particles removed)",
            self.registry.len()
        );
        self.registry.clear();
        self.grid.clear();
    }

    /// Advance the simulation by one tick.
    ///
    /// The registry is snapshotted first and exactly that snapshot is
    /// processed in order: particles created during the tick wait for the
    /// next one, particles destroyed before their turn are skipped.
    pub fn step(&mut self) -> TickStats {
        self.tick += 1;
        self.stats = TickStats::new(self.tick);

        let mut queue = std::mem::take(&mut self.update_queue);
        queue.clear();
        queue.extend(self.registry.ids());

        for &id in &queue {
            if !self.registry.contains(id) {
                continue;
            }
            self.stats.record_visit();
            behaviors::update_particle(self, id);
        }

        self.update_queue = queue;

        #[cfg(debug_assertions)]
        {
            if let Err(err) = self.check_consistency() {
                panic!("grid/registry out of sync after tick {}: {err}", self.tick);
            }
        }

        log::debug!("{}", self.stats);
        self.stats
    }

    /// Verify the grid <-> registry bijection
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        let mut on_grid = 0;

        for (x, y, id, kind) in self.grid.occupied() {
            on_grid += 1;
            let particle = self
                .registry
                .get(id)
                .ok_or(ConsistencyError::Unregistered { id, x, y })?;
            if particle.position() != (x, y) {
                return Err(ConsistencyError::PositionMismatch {
                    id,
                    x,
                    y,
                    px: particle.x,
                    py: particle.y,
                });
            }
            if particle.kind != kind {
                return Err(ConsistencyError::KindMismatch {
                    id,
                    cell: kind,
                    particle: particle.kind,
                });
            }
        }

        // Every grid reference resolved to a distinct registered particle,
        // so equal counts leave no orphan in the registry.
        if on_grid != self.registry.len() {
            return Err(ConsistencyError::CountMismatch {
                registered: self.registry.len(),
                on_grid,
            });
        }

        Ok(())
    }

    // === Engine internals ===

    fn checked_cell(&self, x: i32, y: i32) -> Result<Cell, WorldError> {
        self.grid.get(x, y).ok_or(WorldError::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        })
    }

    pub(crate) fn position_of(&self, id: ParticleId) -> Option<(i32, i32)> {
        self.registry.get(id).map(Particle::position)
    }

    pub(crate) fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.registry.get_mut(id)
    }

    /// Whether the cell a neighbor query reported still holds the same occupant
    pub(crate) fn still_holds(&self, neighbor: &Neighbor) -> bool {
        self.grid.get(neighbor.x, neighbor.y) == Some(neighbor.cell)
    }

    /// Exchange the occupants of two cells, updating particle positions.
    ///
    /// The registry is untouched: swapping moves particles, it never creates
    /// or destroys them.
    pub(crate) fn swap_cells(&mut self, a: (i32, i32), b: (i32, i32)) -> bool {
        let (Some(cell_a), Some(cell_b)) = (self.grid.get(a.0, a.1), self.grid.get(b.0, b.1))
        else {
            return false;
        };

        self.grid.set(a.0, a.1, cell_b);
        self.grid.set(b.0, b.1, cell_a);

        if let Some(particle) = cell_a.id().and_then(|id| self.registry.get_mut(id)) {
            particle.x = b.0;
            particle.y = b.1;
        }
        if let Some(particle) = cell_b.id().and_then(|id| self.registry.get_mut(id)) {
            particle.x = a.0;
            particle.y = a.1;
        }

        self.stats.record_swap();
        true
    }

    /// Transmute a live particle wherever it currently is
    pub(crate) fn transmute_particle(&mut self, id: ParticleId, kind: Kind) -> Option<ParticleId> {
        let (x, y) = self.position_of(id)?;
        self.transmute_cell(x, y, kind)
    }

    /// Transmute a neighbor, provided its cell still holds what the query saw
    pub(crate) fn transmute_neighbor(
        &mut self,
        neighbor: &Neighbor,
        kind: Kind,
    ) -> Option<ParticleId> {
        if !self.still_holds(neighbor) {
            return None;
        }
        self.transmute_cell(neighbor.x, neighbor.y, kind)
    }

    /// The transmutation operator: unregister the current occupant, build a
    /// replacement, write it to the grid and register it unless it is empty.
    pub(crate) fn transmute_cell(&mut self, x: i32, y: i32, kind: Kind) -> Option<ParticleId> {
        let current = self.grid.get(x, y)?;
        if let Some(old) = current.id() {
            let removed = self.registry.remove(old);
            debug_assert!(removed.is_some(), "cell ({x}, {y}) held unregistered {old:?}");
        }
        self.stats.record_transmutation();
        log::trace!("({x}, {y}) {} -> {kind}", current.kind());

        if kind.is_empty() {
            self.grid.set(x, y, Cell::Empty);
            return None;
        }

        let particle = self.spawn(x, y, kind);
        let id = particle.id;
        self.grid.set(x, y, Cell::Occupied { id, kind });
        self.registry.insert(particle);
        Some(id)
    }

    /// Build a particle with kind defaults and per-instance jitter
    fn spawn(&mut self, x: i32, y: i32, kind: Kind) -> Particle {
        let id = ParticleId::from_raw(self.next_id);
        self.next_id += 1;

        let mut color = self.materials.get_color(kind);
        match kind {
            Kind::Fire => {
                color[0] = jitter(color[0], self.rng.random_int(-20, 15));
                color[1] = jitter(color[1], self.rng.random_int(-30, 20));
                color[2] = jitter(color[2], self.rng.random_int(-5, 30));
                let max_lifetime = FIRE_BASE_LIFETIME + self.rng.random_int(-5, 15);

                Particle::new(id, x, y, kind, color).with_state(ParticleState::Fire(FireState {
                    lifetime: 0,
                    max_lifetime: max_lifetime.max(0) as u32,
                    chance_to_rise: FIRE_CHANCE_TO_RISE,
                }))
            }
            Kind::Steam => {
                let offset = self.rng.random_int(-20, 20);
                for channel in &mut color[..3] {
                    *channel = jitter(*channel, offset);
                }

                Particle::new(id, x, y, kind, color).with_state(ParticleState::Steam(SteamState {
                    chance_to_rain: STEAM_CHANCE_TO_RAIN,
                }))
            }
            _ => Particle::new(id, x, y, kind, color),
        }
    }
}

fn jitter(channel: u8, offset: i32) -> u8 {
    (channel as i32 + offset).clamp(0, 255) as u8
}
