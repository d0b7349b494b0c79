//! Fixed-size grid - the authoritative spatial index
//!
//! Every in-bounds coordinate holds exactly one occupant: either the empty
//! sentinel or a reference to a live particle. Out-of-bounds reads return
//! `None`; they are a normal query outcome at the edges, not an error.

use crate::simulation::{Kind, ParticleId};

/// Occupant of a single grid cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    /// A live particle; its kind never changes while the id is alive
    Occupied { id: ParticleId, kind: Kind },
}

impl Cell {
    pub fn kind(self) -> Kind {
        match self {
            Cell::Empty => Kind::Empty,
            Cell::Occupied { kind, .. } => kind,
        }
    }

    pub fn id(self) -> Option<ParticleId> {
        match self {
            Cell::Empty => None,
            Cell::Occupied { id, .. } => Some(id),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Row-major grid of cells
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Occupant at (x, y), or `None` outside the grid
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Overwrite the occupant at (x, y). Returns false (and writes nothing)
    /// outside the grid.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Refill every cell with the empty sentinel
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// All non-empty cells with their coordinates, row by row
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32, ParticleId, Kind)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| match *cell {
                Cell::Empty => None,
                Cell::Occupied { id, kind } => {
                    Some(((idx % width) as i32, (idx / width) as i32, id, kind))
                }
            })
    }
}
