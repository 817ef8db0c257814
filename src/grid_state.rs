use bit_set::BitSet;
use error_chain::bail;

use crate::cells::{Cell, CompassPrimary};
use crate::errors::*;
use crate::maze::Maze;
use crate::units::{ColumnsCount, RowsCount};

/// Mutable carving state for a single generation run: visited flags plus the open/closed
/// state of every interior edge.
///
/// `horizontals[r][c]` is the edge between (r, c) and (r + 1, c).
/// `verticals[r][c]` is the edge between (r, c) and (r, c + 1).
#[derive(Debug, Clone)]
pub struct GridState {
    rows: RowsCount,
    columns: ColumnsCount,
    visited: BitSet,
    horizontals: Vec<Vec<bool>>,
    verticals: Vec<Vec<bool>>,
}

impl GridState {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<GridState> {
        let (RowsCount(r), ColumnsCount(c)) = (rows, columns);
        if r < 1 || c < 1 {
            bail!(ErrorKind::InvalidDimension(r, c));
        }

        Ok(GridState {
            rows,
            columns,
            visited: BitSet::with_capacity(r * c),
            horizontals: vec![vec![false; c]; r - 1],
            verticals: vec![vec![false; c - 1]; r],
        })
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows.0 && cell.column < self.columns.0
    }

    pub fn is_visited(&self, cell: Cell) -> Result<bool> {
        self.check_bounds(cell)?;
        Ok(self.visited.contains(cell.row_major_index(self.columns)))
    }

    pub fn mark_visited(&mut self, cell: Cell) -> Result<()> {
        self.check_bounds(cell)?;
        self.visited.insert(cell.row_major_index(self.columns));
        Ok(())
    }

    /// Open the edge shared by two grid-adjacent cells, in either order.
    pub fn open_edge(&mut self, a: Cell, b: Cell) -> Result<()> {
        self.check_bounds(a)?;
        self.check_bounds(b)?;
        match a.direction_to(b) {
            Some(CompassPrimary::North) => self.horizontals[b.row][b.column] = true,
            Some(CompassPrimary::South) => self.horizontals[a.row][a.column] = true,
            Some(CompassPrimary::West) => self.verticals[b.row][b.column] = true,
            Some(CompassPrimary::East) => self.verticals[a.row][a.column] = true,
            None => return Err(ErrorKind::InvalidEdge(a, b).into()),
        }
        Ok(())
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn open_edges_count(&self) -> usize {
        count_open(&self.horizontals) + count_open(&self.verticals)
    }

    /// Freeze the carved edges into a `Maze`.
    pub fn into_maze(self, start: Cell, goal: Cell) -> Maze {
        Maze::new(self.rows, self.columns, start, goal, self.horizontals, self.verticals)
    }

    fn check_bounds(&self, cell: Cell) -> Result<()> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(ErrorKind::OutOfBounds(cell, self.rows.0, self.columns.0).into())
        }
    }
}

pub(crate) fn count_open(edges: &[Vec<bool>]) -> usize {
    edges.iter().flat_map(|row| row.iter()).filter(|&&open| open).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(rows: usize, columns: usize) -> GridState {
        GridState::new(RowsCount(rows), ColumnsCount(columns)).expect("valid dimensions")
    }

    #[test]
    fn zero_dimensions_rejected() {
        for &(r, c) in &[(0, 3), (3, 0), (0, 0)] {
            let err = GridState::new(RowsCount(r), ColumnsCount(c)).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::InvalidDimension(..)));
        }
    }

    #[test]
    fn fresh_state_is_unvisited_and_closed() {
        let s = state(3, 4);
        assert_eq!(s.visited_count(), 0);
        assert_eq!(s.open_edges_count(), 0);
        assert_eq!(s.horizontals.len(), 2);
        assert!(s.horizontals.iter().all(|row| row.len() == 4));
        assert_eq!(s.verticals.len(), 3);
        assert!(s.verticals.iter().all(|row| row.len() == 3));
        assert!(!s.is_visited(Cell::new(2, 3)).unwrap());
    }

    #[test]
    fn single_cell_grid_has_no_edges() {
        let s = state(1, 1);
        assert!(s.horizontals.is_empty());
        assert_eq!(s.verticals, vec![Vec::<bool>::new()]);
    }

    #[test]
    fn mark_visited_is_idempotent() {
        let mut s = state(2, 2);
        let cell = Cell::new(1, 0);
        s.mark_visited(cell).unwrap();
        s.mark_visited(cell).unwrap();
        assert!(s.is_visited(cell).unwrap());
        assert!(!s.is_visited(Cell::new(0, 0)).unwrap());
        assert_eq!(s.visited_count(), 1);
    }

    #[test]
    fn out_of_bounds_queries_fail() {
        let mut s = state(2, 3);
        let outside = [Cell::new(2, 0), Cell::new(0, 3), Cell::new(usize::MAX, usize::MAX)];
        for &cell in &outside {
            assert!(matches!(s.is_visited(cell).unwrap_err().kind(), ErrorKind::OutOfBounds(..)));
            assert!(matches!(s.mark_visited(cell).unwrap_err().kind(), ErrorKind::OutOfBounds(..)));
        }
        let err = s.open_edge(Cell::new(1, 2), Cell::new(1, 3)).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OutOfBounds(..)));
    }

    #[test]
    fn opening_edges_in_either_order() {
        let mut s = state(2, 2);
        s.open_edge(Cell::new(0, 0), Cell::new(1, 0)).unwrap();
        assert!(s.horizontals[0][0]);
        s.open_edge(Cell::new(1, 1), Cell::new(0, 1)).unwrap();
        assert!(s.horizontals[0][1]);
        s.open_edge(Cell::new(0, 1), Cell::new(0, 0)).unwrap();
        assert!(s.verticals[0][0]);
        s.open_edge(Cell::new(1, 0), Cell::new(1, 1)).unwrap();
        assert!(s.verticals[1][0]);
        assert_eq!(s.open_edges_count(), 4);

        // reopening changes nothing
        s.open_edge(Cell::new(0, 0), Cell::new(1, 0)).unwrap();
        assert_eq!(s.open_edges_count(), 4);
    }

    #[test]
    fn non_adjacent_cells_have_no_edge() {
        let mut s = state(3, 3);
        let pairs = [(Cell::new(0, 0), Cell::new(1, 1)),
                     (Cell::new(0, 0), Cell::new(0, 2)),
                     (Cell::new(2, 1), Cell::new(0, 1)),
                     (Cell::new(1, 1), Cell::new(1, 1))];
        for &(a, b) in &pairs {
            let err = s.open_edge(a, b).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::InvalidEdge(..)));
        }
        assert_eq!(s.open_edges_count(), 0);
    }
}
