//! Neighbor cell collection utilities
//!
//! Pure reads of the grid. Out-of-bounds positions are skipped (lists) or
//! reported as `None` (fixed slots), so edge particles just see fewer
//! neighbors.

use smallvec::SmallVec;

use super::grid::{Cell, Grid};
use crate::simulation::Kind;

/// A neighboring cell as it was when the query ran
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbor {
    pub x: i32,
    pub y: i32,
    pub cell: Cell,
}

impl Neighbor {
    pub fn kind(&self) -> Kind {
        self.cell.kind()
    }

    pub fn is_empty(&self) -> bool {
        self.cell.is_empty()
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// Up to eight neighbors, stored inline
pub type NeighborList = SmallVec<[Neighbor; 8]>;

/// Neighbor collection utilities - stateless methods for querying adjacent cells
pub struct NeighborQueries;

impl NeighborQueries {
    /// The cell at (x, y), if in bounds
    pub fn at(grid: &Grid, x: i32, y: i32) -> Option<Neighbor> {
        grid.get(x, y).map(|cell| Neighbor { x, y, cell })
    }

    pub fn left(grid: &Grid, x: i32, y: i32) -> Option<Neighbor> {
        Self::at(grid, x - 1, y)
    }

    pub fn right(grid: &Grid, x: i32, y: i32) -> Option<Neighbor> {
        Self::at(grid, x + 1, y)
    }

    pub fn above(grid: &Grid, x: i32, y: i32) -> Option<Neighbor> {
        Self::at(grid, x, y - 1)
    }

    pub fn below(grid: &Grid, x: i32, y: i32) -> Option<Neighbor> {
        Self::at(grid, x, y + 1)
    }

    /// The 4 orthogonal neighbors
    ///
    /// Order: left, right, above, below
    pub fn strict_adjacent(grid: &Grid, x: i32, y: i32) -> [Option<Neighbor>; 4] {
        [
            Self::left(grid, x, y),
            Self::right(grid, x, y),
            Self::above(grid, x, y),
            Self::below(grid, x, y),
        ]
    }

    /// The 8 surrounding cells
    ///
    /// Scans column by column (x-1, then x, then x+1; top to bottom within a
    /// column). The occupant of (x, y) itself is excluded by identity: a
    /// particle never appears in its own neighborhood.
    pub fn all_adjacent(grid: &Grid, x: i32, y: i32) -> NeighborList {
        let center = grid.get(x, y).and_then(Cell::id);
        let mut neighbors = NeighborList::new();

        for nx in x - 1..=x + 1 {
            for ny in y - 1..=y + 1 {
                let Some(cell) = grid.get(nx, ny) else {
                    continue;
                };
                let is_self = match center {
                    Some(id) => cell.id() == Some(id),
                    // Empty cells carry no identity
                    None => nx == x && ny == y,
                };
                if is_self {
                    continue;
                }
                neighbors.push(Neighbor { x: nx, y: ny, cell });
            }
        }

        neighbors
    }

    /// The 3 cells in the row below (left to right)
    pub fn below_adjacent(grid: &Grid, x: i32, y: i32) -> NeighborList {
        Self::row(grid, x, y + 1, true)
    }

    /// The 3 cells in the row above (left to right)
    pub fn above_adjacent(grid: &Grid, x: i32, y: i32) -> NeighborList {
        Self::row(grid, x, y - 1, true)
    }

    /// The 2 diagonal cells below (directly-below excluded)
    pub fn below_diagonal(grid: &Grid, x: i32, y: i32) -> NeighborList {
        Self::row(grid, x, y + 1, false)
    }

    /// The 2 diagonal cells above (directly-above excluded)
    pub fn above_diagonal(grid: &Grid, x: i32, y: i32) -> NeighborList {
        Self::row(grid, x, y - 1, false)
    }

    fn row(grid: &Grid, x: i32, row_y: i32, include_vertical: bool) -> NeighborList {
        let mut neighbors = NeighborList::new();
        for nx in x - 1..=x + 1 {
            if nx == x && !include_vertical {
                continue;
            }
            if let Some(neighbor) = Self::at(grid, nx, row_y) {
                neighbors.push(neighbor);
            }
        }
        neighbors
    }
}
