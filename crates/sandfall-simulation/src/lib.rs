//! Material simulation data for Sandfall
//!
//! This crate provides the foundational data types for the falling-sand engine:
//! - Material kinds and their physical definitions (Kind, MaterialDef, Materials)
//! - Particle records and kind-specific transient state (Particle, ParticleState)

mod materials;
mod particle;

pub use materials::{Kind, MaterialDef, Materials, ParseKindError, Rgba};
pub use particle::{FireState, Particle, ParticleId, ParticleState, SteamState};
