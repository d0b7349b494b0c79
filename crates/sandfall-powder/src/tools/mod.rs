//! Drawing tools

mod pen;

pub use pen::PenTool;

use sandfall_core::{World, WorldError};

/// Trait for drawing tools
pub trait Tool {
    /// Tool display name
    fn name(&self) -> &str;

    /// Apply the tool centered on (x, y); returns how many cells changed
    fn apply(
        &self,
        world: &mut World,
        x: i32,
        y: i32,
        brush_size: u32,
    ) -> Result<usize, WorldError>;
}
