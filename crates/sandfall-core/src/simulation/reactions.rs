//! Reaction rules for sand, mud, salt, fire, lava and steam
//!
//! A reaction looks at the particle's neighborhood after it moved and issues
//! probability-gated transmutations. Neighbor lists are captured once per
//! scan, so every neighbor is checked against the grid before it is touched.

use super::{Kind, ParticleId};
use crate::world::{Neighbor, NeighborQueries, World, WorldRng};

/// Sand soaks up adjacent water (or saltwater) and turns into mud
pub(crate) fn react_sand<R: WorldRng>(world: &mut World<R>, id: ParticleId) {
    let Some((x, y)) = world.position_of(id) else {
        return;
    };

    let neighbors = NeighborQueries::all_adjacent(&world.grid, x, y);
    if let Some(water) = neighbors.iter().find(|n| n.kind().is_watery()) {
        world.transmute_particle(id, Kind::Mud);
        world.transmute_neighbor(water, Kind::Empty);
    }
}

/// Mud spreads into sand, using up water, when it touches both
pub(crate) fn react_mud<R: WorldRng>(world: &mut World<R>, id: ParticleId) {
    let Some((x, y)) = world.position_of(id) else {
        return;
    };

    let mut water: Option<Neighbor> = None;
    let mut sand: Option<Neighbor> = None;
    for neighbor in NeighborQueries::all_adjacent(&world.grid, x, y) {
        if water.is_none() && neighbor.kind().is_watery() {
            water = Some(neighbor);
        } else if sand.is_none() && neighbor.kind() == Kind::Sand {
            sand = Some(neighbor);
        }
    }

    if let (Some(water), Some(sand)) = (water, sand) {
        world.transmute_neighbor(&water, Kind::Empty);
        world.transmute_neighbor(&sand, Kind::Mud);
    }
}

/// Salt dissolves into the first plain water it touches and melts ice
pub(crate) fn react_salt<R: WorldRng>(world: &mut World<R>, id: ParticleId) {
    let Some((x, y)) = world.position_of(id) else {
        return;
    };

    for neighbor in NeighborQueries::strict_adjacent(&world.grid, x, y)
        .into_iter()
        .flatten()
    {
        match neighbor.kind() {
            Kind::Water => {
                world.transmute_neighbor(&neighbor, Kind::Empty);
                world.transmute_particle(id, Kind::Saltwater);
                return;
            }
            Kind::Ice => {
                if world.rng.roll_percent(22) {
                    world.transmute_neighbor(&neighbor, Kind::Water);
                }
            }
            _ => {}
        }
    }
}

/// Fire burns out at the end of its lifetime and ignites, boils, melts or
/// is tinted by its neighbors.
///
/// The neighbor scan runs even on the tick the fire burns out, from the cell
/// it last occupied.
pub(crate) fn react_fire<R: WorldRng>(world: &mut World<R>, id: ParticleId) {
    let Some(particle) = world.particle(id) else {
        return;
    };
    let (x, y) = particle.position();
    let expired = particle
        .fire_state()
        .is_some_and(|fire| fire.lifetime >= fire.max_lifetime);

    if expired {
        world.transmute_particle(id, Kind::Empty);
    }

    for neighbor in NeighborQueries::all_adjacent(&world.grid, x, y) {
        if !world.still_holds(&neighbor) {
            continue;
        }
        match neighbor.kind() {
            Kind::Wood => {
                if world.rng.roll_percent(8) {
                    world.transmute_neighbor(&neighbor, Kind::Fire);
                }
            }
            Kind::Water => {
                if world.rng.roll_percent(10) {
                    world.transmute_neighbor(&neighbor, Kind::Steam);
                    if let Some(fire) = world.particle_mut(id).and_then(|p| p.fire_state_mut()) {
                        fire.lifetime += 20;
                    }
                }
            }
            Kind::Salt => burn_salt(world, id, (x, y), &neighbor),
            Kind::Ice => {
                let melted = if world.rng.roll_percent(40) {
                    Kind::Water
                } else {
                    Kind::Empty
                };
                world.transmute_neighbor(&neighbor, melted);
            }
            Kind::Oil => {
                if world.rng.roll_percent(20) {
                    world.transmute_neighbor(&neighbor, Kind::Fire);
                }
            }
            _ => {}
        }
    }
}

/// Salt in a flame: occasionally consumed, always tints the flames green
fn burn_salt<R: WorldRng>(world: &mut World<R>, id: ParticleId, at: (i32, i32), salt: &Neighbor) {
    let flames: Vec<ParticleId> = NeighborQueries::all_adjacent(&world.grid, at.0, at.1)
        .iter()
        .filter(|n| n.kind() == Kind::Fire)
        .filter_map(|n| n.cell.id())
        .collect();

    if world.rng.roll_percent(5) {
        world.transmute_neighbor(salt, Kind::Empty);
    }

    if let Some(particle) = world.particle_mut(id) {
        particle.color[1] = 160;
    }
    for flame in flames {
        if let Some(particle) = world.particle_mut(flame) {
            particle.color[1] = 220;
        }
    }
}

/// Lava ignites, boils, melts or dissolves almost everything it touches
pub(crate) fn react_lava<R: WorldRng>(world: &mut World<R>, id: ParticleId) {
    let Some((x, y)) = world.position_of(id) else {
        return;
    };

    for neighbor in NeighborQueries::all_adjacent(&world.grid, x, y) {
        if !world.still_holds(&neighbor) {
            continue;
        }
        match neighbor.kind() {
            Kind::Wood => {
                if world.rng.roll_percent(50) {
                    world.transmute_neighbor(&neighbor, Kind::Fire);
                }
            }
            Kind::Water => {
                let boiled = if world.rng.roll_percent(15) {
                    Kind::Steam
                } else {
                    Kind::Empty
                };
                world.transmute_neighbor(&neighbor, boiled);
            }
            Kind::Oil => {
                world.transmute_neighbor(&neighbor, Kind::Fire);
            }
            Kind::Stone => {
                if world.rng.roll_percent(1) {
                    world.transmute_neighbor(&neighbor, Kind::Empty);
                }
            }
            Kind::Ice => {
                world.transmute_neighbor(&neighbor, Kind::Water);
            }
            Kind::Glass => {
                if world.rng.roll_percent(8) {
                    world.transmute_neighbor(&neighbor, Kind::Lava);
                }
            }
            Kind::Wall | Kind::Lava | Kind::Empty => {}
            _ => {
                world.transmute_neighbor(&neighbor, Kind::Empty);
            }
        }
    }
}

/// Crowded steam may spark lightning; steam near the top may rain
pub(crate) fn react_steam<R: WorldRng>(world: &mut World<R>, id: ParticleId) {
    let Some(particle) = world.particle(id) else {
        return;
    };
    let (x, y) = particle.position();
    let Some(chance) = particle.steam_state().map(|steam| steam.chance_to_rain) else {
        return;
    };

    let crowd = NeighborQueries::all_adjacent(&world.grid, x, y)
        .iter()
        .filter(|n| n.kind() == Kind::Steam)
        .count();

    if crowd >= 8 && world.rng.roll_permille(chance) {
        world.transmute_particle(id, Kind::Lightning);
        return;
    }

    if y < 7 && world.rng.roll_percent(chance) {
        world.transmute_particle(id, Kind::Water);
    }
}
