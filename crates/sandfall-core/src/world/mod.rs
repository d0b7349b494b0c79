//! World management - grid, registry, movement and the step driver

mod ca_update;
mod error;
mod grid;
mod neighbor_queries;
mod registry;
pub mod rng_trait;
pub mod stats;
#[cfg(test)]
pub(crate) mod testing;
#[allow(clippy::module_inception)]
mod world;

pub use ca_update::CellularAutomataUpdater;
pub use error::{ConsistencyError, WorldError};
pub use grid::{Cell, Grid};
pub use neighbor_queries::{Neighbor, NeighborList, NeighborQueries};
pub use registry::ParticleRegistry;
pub use rng_trait::WorldRng;
pub use stats::TickStats;
pub use world::World;
