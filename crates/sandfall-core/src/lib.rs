//! Sandfall core - grid, particle registry and the per-tick rule engine
//!
//! - `world/`      - spatial index, registry, neighbor queries, movement, step driver
//! - `simulation/` - material data and the per-kind reaction rules

pub mod simulation;
pub mod world;

pub use simulation::{Kind, Particle, ParticleId};
pub use world::{Cell, ConsistencyError, TickStats, World, WorldError, WorldRng};
