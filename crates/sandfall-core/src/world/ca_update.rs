//! Cellular automata update logic - material movement physics
//!
//! Each primitive looks at the mover's immediate neighborhood and performs at
//! most one swap. They return whether a swap happened.

use super::neighbor_queries::{Neighbor, NeighborQueries};
use super::rng_trait::WorldRng;
use super::world::World;
use crate::simulation::ParticleId;

/// Cellular automata updater - handles material movement physics
pub struct CellularAutomataUpdater;

impl CellularAutomataUpdater {
    /// Powder falling: straight down into empty space, or sink into a random
    /// cell of the row below when resting on a liquid
    pub fn fall_solid<R: WorldRng>(world: &mut World<R>, id: ParticleId) -> bool {
        let Some((x, y, _)) = Self::mover(world, id) else {
            return false;
        };
        if Self::at_bottom_margin(world, y) {
            return false;
        }

        let Some(below) = NeighborQueries::below(&world.grid, x, y) else {
            return false;
        };

        if below.is_empty() {
            return world.swap_cells((x, y), below.position());
        }

        if world.materials.get(below.kind()).liquid {
            let all_below = NeighborQueries::below_adjacent(&world.grid, x, y);
            if all_below.is_empty() {
                return false;
            }
            let target = all_below[world.rng.pick_index(all_below.len())];
            return world.swap_cells((x, y), target.position());
        }

        false
    }

    /// Liquid falling: down, then sideways, then sink through lighter liquid,
    /// then mix sideways with any liquid
    pub fn fall_liquid<R: WorldRng>(world: &mut World<R>, id: ParticleId) -> bool {
        let Some((x, y, density)) = Self::mover(world, id) else {
            return false;
        };
        if Self::at_bottom_margin(world, y) {
            return false;
        }

        let all_below = NeighborQueries::below_adjacent(&world.grid, x, y);
        if all_below.is_empty() {
            return false;
        }
        let down = all_below[world.rng.pick_index(all_below.len())];
        let side = Self::random_side(world, x, y);

        if down.is_empty() {
            return world.swap_cells((x, y), down.position());
        }
        if let Some(side) = side.filter(Neighbor::is_empty) {
            return world.swap_cells((x, y), side.position());
        }

        let down_def = world.materials.get(down.kind());
        if down_def.liquid {
            if density > down_def.density {
                return world.swap_cells((x, y), down.position());
            }
            return false;
        }

        // Lateral mixing has no density gate
        if let Some(side) = side.filter(|n| world.materials.get(n.kind()).liquid) {
            return world.swap_cells((x, y), side.position());
        }

        false
    }

    /// Lightning falling: a random lower diagonal if empty, else straight down
    pub fn fall_lightning<R: WorldRng>(world: &mut World<R>, id: ParticleId) -> bool {
        let Some((x, y, _)) = Self::mover(world, id) else {
            return false;
        };
        if Self::at_bottom_margin(world, y) {
            return false;
        }

        let diagonal = NeighborQueries::below_diagonal(&world.grid, x, y);
        if diagonal.is_empty() {
            return false;
        }
        let target = diagonal[world.rng.pick_index(diagonal.len())];

        if target.is_empty() {
            return world.swap_cells((x, y), target.position());
        }
        if let Some(below) = NeighborQueries::below(&world.grid, x, y).filter(Neighbor::is_empty) {
            return world.swap_cells((x, y), below.position());
        }

        false
    }

    /// Gas rising: a random upper diagonal if empty, through a lighter gas,
    /// or sideways into empty space
    pub fn rise_gas<R: WorldRng>(world: &mut World<R>, id: ParticleId) -> bool {
        let Some((x, y, density)) = Self::mover(world, id) else {
            return false;
        };
        if y <= 2 {
            return false;
        }

        let diagonal = NeighborQueries::above_diagonal(&world.grid, x, y);
        if diagonal.is_empty() {
            return false;
        }
        let up = diagonal[world.rng.pick_index(diagonal.len())];
        let side = Self::random_side(world, x, y);

        if up.is_empty() {
            return world.swap_cells((x, y), up.position());
        }

        let up_def = world.materials.get(up.kind());
        if up_def.gaseous {
            if density > up_def.density {
                return world.swap_cells((x, y), up.position());
            }
            return false;
        }

        if let Some(side) = side.filter(Neighbor::is_empty) {
            return world.swap_cells((x, y), side.position());
        }

        false
    }

    /// Exchange a particle with whatever occupies `target`
    pub fn swap<R: WorldRng>(world: &mut World<R>, id: ParticleId, target: (i32, i32)) -> bool {
        match world.position_of(id) {
            Some(from) => world.swap_cells(from, target),
            None => false,
        }
    }

    /// Position and density of a live particle
    fn mover<R: WorldRng>(world: &World<R>, id: ParticleId) -> Option<(i32, i32, i32)> {
        let particle = world.particle(id)?;
        let density = world.materials.get(particle.kind).density;
        Some((particle.x, particle.y, density))
    }

    fn at_bottom_margin<R: WorldRng>(world: &World<R>, y: i32) -> bool {
        y >= world.height() as i32 - 2
    }

    /// Left or right with equal odds; `None` past the grid edge
    fn random_side<R: WorldRng>(world: &mut World<R>, x: i32, y: i32) -> Option<Neighbor> {
        let sides = [
            NeighborQueries::left(&world.grid, x, y),
            NeighborQueries::right(&world.grid, x, y),
        ];
        sides[world.rng.pick_index(sides.len())]
    }
}
