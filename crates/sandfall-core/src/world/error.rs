//! World error types

use thiserror::Error;

use crate::simulation::{Kind, ParticleId};

/// Errors returned by the public world mutators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    #[error("cell ({x}, {y}) is already occupied by {kind}")]
    CellOccupied { x: i32, y: i32, kind: Kind },
}

/// A broken link between the grid and the particle registry.
///
/// Any of these means the engine itself is defective; they are never
/// produced by valid use of the public API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("cell ({x}, {y}) references particle {id:?} which is not registered")]
    Unregistered { id: ParticleId, x: i32, y: i32 },

    #[error("particle {id:?} is at ({px}, {py}) but the grid holds it at ({x}, {y})")]
    PositionMismatch {
        id: ParticleId,
        x: i32,
        y: i32,
        px: i32,
        py: i32,
    },

    #[error("particle {id:?} is a {particle} but its cell says {cell}")]
    KindMismatch {
        id: ParticleId,
        cell: Kind,
        particle: Kind,
    },

    #[error("registry holds {registered} particles but the grid shows {on_grid}")]
    CountMismatch { registered: usize, on_grid: usize },
}
