//! Pen tool for painting materials

use super::Tool;
use sandfall_core::{Cell, Kind, World, WorldError};

/// Pen tool that paints a square of one material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenTool {
    kind: Kind,
    replace: bool,
}

impl PenTool {
    /// Create a pen for `kind`; in replace mode it overwrites occupied cells
    pub fn new(kind: Kind, replace: bool) -> Self {
        Self { kind, replace }
    }
}

impl Tool for PenTool {
    fn name(&self) -> &str {
        "Pen"
    }

    /// Paint the square `[x - size, x + size) x [y - size, y + size)`.
    ///
    /// Centers too close to the border are ignored entirely, and cells on
    /// the outermost top and left lines are never painted.
    fn apply(
        &self,
        world: &mut World,
        x: i32,
        y: i32,
        brush_size: u32,
    ) -> Result<usize, WorldError> {
        let width = world.width() as i32;
        let height = world.height() as i32;
        if x < 2 || x > width - 2 || y < 2 || y > height - 3 {
            return Ok(0);
        }

        let size = brush_size as i32;
        let mut painted = 0;
        for dx in x - size..x + size {
            for dy in y - size..y + size {
                if dx < 1 || dx > width - 1 || dy < 1 || dy > height - 1 {
                    continue;
                }

                if self.replace || self.kind.is_empty() {
                    world.transmute(dx, dy, self.kind)?;
                    painted += 1;
                } else if world.get(dx, dy) == Some(Cell::Empty) {
                    world.create_particle(dx, dy, self.kind)?;
                    painted += 1;
                }
            }
        }

        Ok(painted)
    }
}
