//! Lightning strikes
//!
//! A bolt only ever reacts with the first cell of the row below it. Most
//! strikes use the bolt up; fire is cut through and sand is fused without
//! consuming it.

use super::{Kind, ParticleId};
use crate::world::{Cell, Neighbor, NeighborQueries, World, WorldRng};

pub(crate) fn react_lightning<R: WorldRng>(world: &mut World<R>, id: ParticleId) {
    let Some((x, y)) = world.position_of(id) else {
        return;
    };

    if y > world.height() as i32 - 3 {
        world.transmute_particle(id, Kind::Empty);
        return;
    }

    let Some(struck) = NeighborQueries::below_adjacent(&world.grid, x, y)
        .first()
        .copied()
    else {
        return;
    };

    match struck.kind() {
        Kind::Wood => {
            let roll = world.rng.random_int(0, 100);
            if roll < 40 {
                world.transmute_neighbor(&struck, Kind::Fire);
            } else if roll < 65 {
                world.transmute_neighbor(&struck, Kind::Mud);
            }
            world.transmute_particle(id, Kind::Empty);
        }
        Kind::Water | Kind::Stone => {
            fling_surroundings(world, &struck);
            world.transmute_particle(id, Kind::Empty);
        }
        Kind::Oil => {
            world.transmute_neighbor(&struck, Kind::Fire);
            world.transmute_particle(id, Kind::Empty);
        }
        Kind::Fire => {
            world.transmute_neighbor(&struck, Kind::Empty);
        }
        Kind::Sand => fuse_sand(world, struck.position()),
        Kind::Steam | Kind::Empty | Kind::Lightning => {}
        _ => {
            world.transmute_particle(id, Kind::Empty);
        }
    }
}

/// Half the time, hurl whatever surrounds the struck cell up and sideways.
///
/// One offset is drawn per strike and applied to every orthogonal neighbor;
/// a neighbor only moves if its landing cell is inside the grid and empty.
fn fling_surroundings<R: WorldRng>(world: &mut World<R>, struck: &Neighbor) {
    if !world.rng.roll_percent(50) {
        return;
    }

    let dx = world.rng.random_int(-10, 10);
    let dy = world.rng.random_int(3, 20);

    for neighbor in NeighborQueries::strict_adjacent(&world.grid, struck.x, struck.y)
        .into_iter()
        .flatten()
    {
        if neighbor.is_empty() || !world.still_holds(&neighbor) {
            continue;
        }
        let landing = (neighbor.x + dx, neighbor.y - dy);
        if world.get(landing.0, landing.1) == Some(Cell::Empty) {
            world.swap_cells(neighbor.position(), landing);
        }
    }
}

/// 26% chance to turn the orthogonal sand around `at` into glass, repeating
/// from every converted cell
fn fuse_sand<R: WorldRng>(world: &mut World<R>, at: (i32, i32)) {
    if !world.rng.roll_percent(26) {
        return;
    }

    for neighbor in NeighborQueries::strict_adjacent(&world.grid, at.0, at.1)
        .into_iter()
        .flatten()
    {
        // An earlier branch of the chain may already have fused this cell
        if neighbor.kind() != Kind::Sand || !world.still_holds(&neighbor) {
            continue;
        }
        world.transmute_neighbor(&neighbor, Kind::Glass);
        fuse_sand(world, neighbor.position());
    }
}
