//! Per-kind behavior dispatch
//!
//! Every kind maps to a movement action and an optional reaction. The step
//! driver runs the action first and then, if the particle is still alive,
//! the reaction.

use super::{Kind, ParticleId, lightning, reactions};
use crate::world::{CellularAutomataUpdater, World, WorldRng};

/// Signature shared by actions and reactions
pub type RuleFn<R> = fn(&mut World<R>, ParticleId);

/// Action/reaction pair for one material kind
pub struct Behavior<R> {
    /// Movement for this tick (may do nothing)
    pub action: RuleFn<R>,
    /// Neighbor reaction run after `action`
    pub reaction: Option<RuleFn<R>>,
}

/// Dispatch table: the behavior of every kind
pub fn behavior_for<R: WorldRng>(kind: Kind) -> Behavior<R> {
    match kind {
        Kind::Sand => Behavior {
            action: fall_solid,
            reaction: Some(reactions::react_sand),
        },
        Kind::Mud => Behavior {
            action: fall_solid,
            reaction: Some(reactions::react_mud),
        },
        Kind::Salt => Behavior {
            action: fall_solid,
            reaction: Some(reactions::react_salt),
        },
        Kind::Stone => Behavior {
            action: fall_solid_twice,
            reaction: None,
        },
        Kind::Water | Kind::Saltwater | Kind::Oil => Behavior {
            action: fall_liquid,
            reaction: None,
        },
        Kind::Lava => Behavior {
            action: fall_liquid,
            reaction: Some(reactions::react_lava),
        },
        Kind::Fire => Behavior {
            action: burn,
            reaction: Some(reactions::react_fire),
        },
        Kind::Steam => Behavior {
            action: rise_gas,
            reaction: Some(reactions::react_steam),
        },
        Kind::Lightning => Behavior {
            action: fall_lightning,
            reaction: Some(lightning::react_lightning),
        },
        Kind::Wood | Kind::Ice | Kind::Glass | Kind::Wall | Kind::Empty => Behavior {
            action: stay,
            reaction: None,
        },
    }
}

/// Run one particle's turn
pub(crate) fn update_particle<R: WorldRng>(world: &mut World<R>, id: ParticleId) {
    let Some(kind) = world.particle(id).map(|p| p.kind) else {
        return;
    };

    let behavior = behavior_for::<R>(kind);
    (behavior.action)(world, id);

    if let Some(reaction) = behavior.reaction
        && world.particle(id).is_some()
    {
        reaction(world, id);
    }
}

fn stay<R: WorldRng>(_world: &mut World<R>, _id: ParticleId) {}

fn fall_solid<R: WorldRng>(world: &mut World<R>, id: ParticleId) {
    CellularAutomataUpdater::fall_solid(world, id);
}

// Stone falls faster than the other powders
fn fall_solid_twice<R: WorldRng>(world: &mut World<R>, id: ParticleId) {
    CellularAutomataUpdater::fall_solid(world, id);
    CellularAutomataUpdater::fall_solid(world, id);
}

fn fall_liquid<R: WorldRng>(world: &mut World<R>, id: ParticleId) {
    CellularAutomataUpdater::fall_liquid(world, id);
}

fn fall_lightning<R: WorldRng>(world: &mut World<R>, id: ParticleId) {
    CellularAutomataUpdater::fall_lightning(world, id);
}

fn rise_gas<R: WorldRng>(world: &mut World<R>, id: ParticleId) {
    CellularAutomataUpdater::rise_gas(world, id);
}

/// Fire: maybe rise, then age by one tick
fn burn<R: WorldRng>(world: &mut World<R>, id: ParticleId) {
    let Some(chance) = world
        .particle(id)
        .and_then(|p| p.fire_state())
        .map(|fire| fire.chance_to_rise)
    else {
        return;
    };

    if world.rng.roll_percent(chance) {
        CellularAutomataUpdater::rise_gas(world, id);
    }

    if let Some(fire) = world.particle_mut(id).and_then(|p| p.fire_state_mut()) {
        fire.lifetime += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::testing::{ScriptedRng, world_with};

    #[test]
    fn test_every_kind_has_a_behavior() {
        for kind in Kind::ALL {
            let _ = behavior_for::<ScriptedRng>(kind);
        }
    }

    #[test]
    fn test_passive_kinds_have_no_reaction() {
        for kind in [
            Kind::Water,
            Kind::Saltwater,
            Kind::Oil,
            Kind::Stone,
            Kind::Wood,
            Kind::Ice,
            Kind::Glass,
            Kind::Wall,
        ] {
            assert!(
                behavior_for::<ScriptedRng>(kind).reaction.is_none(),
                "{kind} should not react"
            );
        }
        for kind in [Kind::Sand, Kind::Mud, Kind::Salt, Kind::Fire, Kind::Lava] {
            assert!(behavior_for::<ScriptedRng>(kind).reaction.is_some());
        }
    }

    #[test]
    fn test_stone_falls_twice() {
        let mut world = world_with(3, 8, ScriptedRng::low(), &[(1, 0, Kind::Stone)]);
        let stone = world.get(1, 0).and_then(|c| c.id()).unwrap();

        update_particle(&mut world, stone);
        assert_eq!(world.particle(stone).unwrap().position(), (1, 2));
    }

    #[test]
    fn test_sand_falls_once() {
        let mut world = world_with(3, 8, ScriptedRng::low(), &[(1, 0, Kind::Sand)]);
        let sand = world.get(1, 0).and_then(|c| c.id()).unwrap();

        update_particle(&mut world, sand);
        assert_eq!(world.particle(sand).unwrap().position(), (1, 1));
    }

    #[test]
    fn test_fire_ages_even_when_it_does_not_rise() {
        let mut world = world_with(5, 8, ScriptedRng::high(), &[(2, 5, Kind::Fire)]);
        let fire = world.get(2, 5).and_then(|c| c.id()).unwrap();

        burn(&mut world, fire);

        let particle = world.particle(fire).unwrap();
        assert_eq!(particle.position(), (2, 5));
        assert_eq!(particle.fire_state().unwrap().lifetime, 1);
    }

    #[test]
    fn test_fire_rises_on_successful_roll() {
        // Rise roll 0, diagonal pick 1, side pick 0
        let mut world = world_with(
            5,
            8,
            ScriptedRng::script([0, 1, 0], false),
            &[(2, 5, Kind::Fire)],
        );
        let fire = world.get(2, 5).and_then(|c| c.id()).unwrap();

        burn(&mut world, fire);
        assert_eq!(world.particle(fire).unwrap().position(), (3, 4));
    }

    #[test]
    fn test_static_kinds_do_not_move() {
        let cells = [
            (1, 0, Kind::Wood),
            (2, 0, Kind::Ice),
            (3, 0, Kind::Glass),
            (4, 0, Kind::Wall),
        ];
        let mut world = world_with(6, 6, ScriptedRng::low(), &cells);
        let ids: Vec<_> = world.particles().map(|p| p.id).collect();

        for id in ids {
            update_particle(&mut world, id);
        }
        for (x, y, kind) in cells {
            assert_eq!(world.kind_at(x, y), Some(kind));
        }
    }
}
