use std::fmt;

use crate::units::{ColumnsCount, RowsCount};

/// A grid cell position. Row 0 is the top row, column 0 the leftmost column.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

/// Neighbour candidates in the order they are handed to the shuffle: up, right, down, left.
pub const CARVE_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                   CompassPrimary::East,
                                                   CompassPrimary::South,
                                                   CompassPrimary::West];

impl Cell {
    pub fn new(row: usize, column: usize) -> Cell {
        Cell { row, column }
    }

    /// Creates a new `Cell` offset 1 cell away in the given direction.
    /// Returns None if that would leave the grid.
    pub fn offset(self, dir: CompassPrimary, rows: RowsCount, columns: ColumnsCount) -> Option<Cell> {
        let (RowsCount(rows), ColumnsCount(columns)) = (rows, columns);
        let Cell { row, column } = self;
        match dir {
            CompassPrimary::North => {
                if row > 0 {
                    Some(Cell::new(row - 1, column))
                } else {
                    None
                }
            }
            CompassPrimary::South => {
                if row + 1 < rows {
                    Some(Cell::new(row + 1, column))
                } else {
                    None
                }
            }
            CompassPrimary::East => {
                if column + 1 < columns {
                    Some(Cell::new(row, column + 1))
                } else {
                    None
                }
            }
            CompassPrimary::West => {
                if column > 0 {
                    Some(Cell::new(row, column - 1))
                } else {
                    None
                }
            }
        }
    }

    /// The direction from `self` to `other` if they are grid-adjacent.
    pub fn direction_to(self, other: Cell) -> Option<CompassPrimary> {
        if self.column == other.column {
            if other.row + 1 == self.row {
                return Some(CompassPrimary::North);
            } else if self.row + 1 == other.row {
                return Some(CompassPrimary::South);
            }
        } else if self.row == other.row {
            if self.column + 1 == other.column {
                return Some(CompassPrimary::East);
            } else if other.column + 1 == self.column {
                return Some(CompassPrimary::West);
            }
        }
        None
    }

    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.direction_to(other).is_some()
    }

    #[inline]
    pub fn row_major_index(self, columns: ColumnsCount) -> usize {
        self.row * columns.0 + self.column
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> Cell {
        Cell::new(index / columns.0, index % columns.0)
    }
}

impl From<(usize, usize)> for Cell {
    fn from(row_column_pair: (usize, usize)) -> Cell {
        Cell::new(row_column_pair.0, row_column_pair.1)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
