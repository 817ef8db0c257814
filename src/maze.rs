use std::fmt;

use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::{Cell, CompassPrimary, CARVE_DIRECTIONS};
use crate::grid_displays::GridDisplay;
use crate::grid_state::count_open;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

pub type CellSmallVec = SmallVec<[Cell; 4]>;

/// A carved maze: which interior edges of a `rows x columns` grid are open passages.
///
/// `horizontal_open()[r][c]` is the edge between (r, c) and (r + 1, c), so there are
/// `rows - 1` rows of `columns` entries. `vertical_open()[r][c]` is the edge between
/// (r, c) and (r, c + 1), so there are `rows` rows of `columns - 1` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    rows: RowsCount,
    columns: ColumnsCount,
    start: Cell,
    goal: Cell,
    horizontals: Vec<Vec<bool>>,
    verticals: Vec<Vec<bool>>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Orientation {
    /// Lies along a row boundary, between (r, c) and (r + 1, c).
    Horizontal,
    /// Lies along a column boundary, between (r, c) and (r, c + 1).
    Vertical,
}

/// A closed interior edge. `first` is the upper or left cell, `second` the lower or right one.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Wall {
    pub first: Cell,
    pub second: Cell,
    pub orientation: Orientation,
}

impl Maze {
    pub(crate) fn new(rows: RowsCount,
                      columns: ColumnsCount,
                      start: Cell,
                      goal: Cell,
                      horizontals: Vec<Vec<bool>>,
                      verticals: Vec<Vec<bool>>)
                      -> Maze {
        debug_assert_eq!(horizontals.len(), rows.0 - 1);
        debug_assert_eq!(verticals.len(), rows.0);
        Maze { rows, columns, start, goal, horizontals, verticals }
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
    pub fn size(&self) -> usize {
        self.rows.0 * self.columns.0
    }

    /// Where the movable actor is placed: the cell carving started from.
    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    /// Where the target is placed.
    #[inline]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    #[inline]
    pub fn horizontal_open(&self) -> &[Vec<bool>] {
        &self.horizontals
    }

    #[inline]
    pub fn vertical_open(&self) -> &[Vec<bool>] {
        &self.verticals
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows.0 && cell.column < self.columns.0
    }

    pub fn open_edges_count(&self) -> usize {
        count_open(&self.horizontals) + count_open(&self.verticals)
    }

    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        (NodesCount(self.size()), EdgesCount(self.open_edges_count()))
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> {
        let columns = self.columns;
        (0..self.size()).map(move |index| Cell::from_row_major_index(index, columns))
    }

    /// Are two cells joined by an open passage? Order does not matter.
    pub fn is_linked(&self, a: Cell, b: Cell) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        match a.direction_to(b) {
            Some(CompassPrimary::North) => self.horizontals[b.row][b.column],
            Some(CompassPrimary::South) => self.horizontals[a.row][a.column],
            Some(CompassPrimary::West) => self.verticals[b.row][b.column],
            Some(CompassPrimary::East) => self.verticals[a.row][a.column],
            None => false,
        }
    }

    pub fn is_neighbour_linked(&self, cell: Cell, direction: CompassPrimary) -> bool {
        cell.offset(direction, self.rows, self.columns)
            .map_or(false, |neighbour| self.is_linked(cell, neighbour))
    }

    /// Cells up, right, down or left of `cell` inside the grid, whether linked or not.
    pub fn neighbours(&self, cell: Cell) -> CellSmallVec {
        CARVE_DIRECTIONS.iter()
            .filter_map(|&dir| cell.offset(dir, self.rows, self.columns))
            .collect()
    }

    /// Cells reachable from `cell` in one step. None if `cell` is outside the grid.
    pub fn links(&self, cell: Cell) -> Option<CellSmallVec> {
        if !self.contains(cell) {
            return None;
        }
        Some(self.neighbours(cell)
            .into_iter()
            .filter(|&neighbour| self.is_linked(cell, neighbour))
            .collect())
    }

    /// Every open passage once, as (upper or left cell, lower or right cell), row-major.
    pub fn iter_links(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        self.iter().flat_map(move |cell| {
            [CompassPrimary::East, CompassPrimary::South]
                .iter()
                .filter_map(|&dir| cell.offset(dir, self.rows, self.columns))
                .filter(|&neighbour| self.is_linked(cell, neighbour))
                .map(|neighbour| (cell, neighbour))
                .collect::<SmallVec<[(Cell, Cell); 2]>>()
        })
    }

    /// Every closed interior edge. The outer boundary is always closed and not listed.
    pub fn walls(&self) -> Vec<Wall> {
        let horizontal_walls = self.horizontals.iter().enumerate().flat_map(|(row, edges)| {
            edges.iter()
                .enumerate()
                .filter(|&(_, &open)| !open)
                .map(move |(column, _)| Wall {
                    first: Cell::new(row, column),
                    second: Cell::new(row + 1, column),
                    orientation: Orientation::Horizontal,
                })
        });
        let vertical_walls = self.verticals.iter().enumerate().flat_map(|(row, edges)| {
            edges.iter()
                .enumerate()
                .filter(|&(_, &open)| !open)
                .map(move |(column, _)| Wall {
                    first: Cell::new(row, column),
                    second: Cell::new(row, column + 1),
                    orientation: Orientation::Vertical,
                })
        });
        horizontal_walls.chain(vertical_walls).collect()
    }

    /// Undirected graph with one node per cell, node index == row-major cell index, and one
    /// edge per open passage.
    pub fn passage_graph(&self) -> UnGraph<Cell, ()> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges);
        for cell in self.iter() {
            let _ = graph.add_node(cell);
        }
        for (a, b) in self.iter_links() {
            let a_index = NodeIndex::new(a.row_major_index(self.columns));
            let b_index = NodeIndex::new(b.row_major_index(self.columns));
            let _ = graph.add_edge(a_index, b_index, ());
        }
        graph
    }

    /// Serialize the passages as text: line 1 is `n m` (#vertices, #edges), each following
    /// line is an edge between two vertices using 1-based row-major indices.
    pub fn edge_list(&self) -> String {
        let header = format!("{} {}", self.size(), self.open_edges_count());
        let edges = self.iter_links().map(|(a, b)| {
            format!("{} {}",
                    a.row_major_index(self.columns) + 1,
                    b.row_major_index(self.columns) + 1)
        });
        let mut data = std::iter::once(header).chain(edges).join("\n");
        data.push('\n');
        data
    }

    /// Text rendering with cell bodies filled in by `display`.
    pub fn render(&self, display: &dyn GridDisplay) -> String {
        format!("{}", DisplayedMaze { maze: self, display })
    }

    fn write_grid<W: fmt::Write>(&self, out: &mut W, display: Option<&dyn GridDisplay>) -> fmt::Result {
        const CORNER: &str = "+";
        const WALL_LR_3: &str = "---";
        const OPEN_LR_3: &str = "   ";
        const WALL_UD: &str = "|";
        const OPEN_UD: &str = " ";

        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows, self.columns);

        // North boundary is always closed.
        out.write_str(CORNER)?;
        for _ in 0..columns {
            out.write_str(WALL_LR_3)?;
            out.write_str(CORNER)?;
        }
        out.write_char('\n')?;

        for row in 0..rows {
            // Each cell draws its body, its eastern boundary and, on the next line, its southern
            // boundary. The west boundary of the row and the north of the cell come from
            // neighbours already drawn.
            out.write_str(WALL_UD)?;
            for column in 0..columns {
                let cell = Cell::new(row, column);
                match display {
                    Some(d) => out.write_str(&d.render_cell_body(cell))?,
                    None => out.write_str(OPEN_LR_3)?,
                }
                let east_open = column + 1 < columns && self.verticals[row][column];
                out.write_str(if east_open { OPEN_UD } else { WALL_UD })?;
            }
            out.write_char('\n')?;

            out.write_str(CORNER)?;
            for column in 0..columns {
                let south_open = row + 1 < rows && self.horizontals[row][column];
                out.write_str(if south_open { OPEN_LR_3 } else { WALL_LR_3 })?;
                out.write_str(CORNER)?;
            }
            out.write_char('\n')?;
        }
        Ok(())
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_grid(f, None)
    }
}

struct DisplayedMaze<'a> {
    maze: &'a Maze,
    display: &'a dyn GridDisplay,
}

impl<'a> fmt::Display for DisplayedMaze<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.maze.write_grid(f, Some(self.display))
    }
}
