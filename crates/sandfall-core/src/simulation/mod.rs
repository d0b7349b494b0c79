//! Material data and per-kind behavior rules

pub mod behaviors;
mod lightning;
mod reactions;

pub use behaviors::{Behavior, RuleFn, behavior_for};
pub use sandfall_simulation::{
    FireState, Kind, MaterialDef, Materials, ParseKindError, Particle, ParticleId, ParticleState,
    Rgba, SteamState,
};
