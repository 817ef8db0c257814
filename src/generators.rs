use error_chain::bail;
use log::{debug, trace};
use rand::Rng;

use crate::cells::{Cell, CompassPrimary, CARVE_DIRECTIONS};
use crate::errors::*;
use crate::grid_state::GridState;
use crate::maze::Maze;
use crate::shuffle::RandomOrdering;
use crate::units::{ColumnsCount, RowsCount};

/// Inputs of a generation run beyond the grid dimensions.
///
/// An omitted start coordinate is drawn uniformly (row first, then column) from the random
/// stream before any carving. The goal defaults to the far corner `(rows - 1, columns - 1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub start_row: Option<usize>,
    pub start_column: Option<usize>,
    pub goal: Option<Cell>,
    pub seed: Option<u64>,
}

impl GeneratorOptions {
    pub fn seeded(seed: u64) -> GeneratorOptions {
        GeneratorOptions { seed: Some(seed), ..Default::default() }
    }

    pub fn with_start(self, start: Cell) -> GeneratorOptions {
        GeneratorOptions {
            start_row: Some(start.row),
            start_column: Some(start.column),
            ..self
        }
    }
}

/// Carve a perfect maze: `generate(rows, columns, start_row, start_column, seed)`.
pub fn generate(rows: usize,
                columns: usize,
                start_row: Option<usize>,
                start_column: Option<usize>,
                seed: Option<u64>)
                -> Result<Maze> {
    let options = GeneratorOptions { start_row, start_column, goal: None, seed };
    recursive_backtracker(RowsCount(rows), ColumnsCount(columns), &options)
}

/// Apply the recursive backtracker maze generation algorithm to a fresh grid.
///
/// A randomized depth first walk: from the current cell, try the four neighbours in shuffled
/// order, carving into each one that is inside the grid and still unvisited and fully
/// exploring it before trying the next. Backtracking happens whenever a cell runs out of
/// candidates. Every cell is visited exactly once, so the carved passages form a spanning tree.
pub fn recursive_backtracker(rows: RowsCount,
                             columns: ColumnsCount,
                             options: &GeneratorOptions)
                             -> Result<Maze> {
    let mut ordering = RandomOrdering::new(options.seed);
    recursive_backtracker_with(rows, columns, options, &mut ordering)
}

/// As `recursive_backtracker`, drawing from a caller supplied random stream. The seed in
/// `options` is ignored.
pub fn recursive_backtracker_with<R: Rng>(rows: RowsCount,
                                          columns: ColumnsCount,
                                          options: &GeneratorOptions,
                                          ordering: &mut RandomOrdering<R>)
                                          -> Result<Maze> {
    let mut state = GridState::new(rows, columns)?;

    let start = Cell::new(options.start_row.unwrap_or_else(|| ordering.random_index(rows.0)),
                          options.start_column
                              .unwrap_or_else(|| ordering.random_index(columns.0)));
    let goal = options.goal.unwrap_or_else(|| Cell::new(rows.0 - 1, columns.0 - 1));
    for &cell in &[start, goal] {
        if !state.contains(cell) {
            bail!(ErrorKind::OutOfBounds(cell, rows.0, columns.0));
        }
    }
    debug!("Carving {}x{} maze from {} with seed {:?}", rows.0, columns.0, start, options.seed);

    // One frame per cell on the current branch. Each frame remembers its shuffled candidates
    // and how many it has tried, so resuming a frame is the same as returning from recursion.
    let mut stack = Vec::with_capacity(rows.0 * columns.0);
    stack.push(visit(&mut state, ordering, start)?);

    while let Some(frame) = stack.last_mut() {
        let direction = match frame.next_direction() {
            Some(dir) => dir,
            None => {
                stack.pop();
                continue;
            }
        };
        let current = frame.cell;

        let next = match current.offset(direction, rows, columns) {
            Some(cell) => cell,
            None => continue,
        };
        if state.is_visited(next)? {
            continue;
        }

        trace!("Carving {} -> {}", current, next);
        state.open_edge(current, next)?;
        let next_frame = visit(&mut state, ordering, next)?;
        stack.push(next_frame);
    }

    debug_assert_eq!(state.visited_count(), rows.0 * columns.0);
    debug_assert_eq!(state.open_edges_count(), rows.0 * columns.0 - 1);
    debug!("Carved {} passages", state.open_edges_count());

    Ok(state.into_maze(start, goal))
}

#[derive(Debug)]
struct Frame {
    cell: Cell,
    candidates: [CompassPrimary; 4],
    tried: usize,
}

impl Frame {
    fn next_direction(&mut self) -> Option<CompassPrimary> {
        let dir = self.candidates.get(self.tried).copied();
        if dir.is_some() {
            self.tried += 1;
        }
        dir
    }
}

fn visit<R: Rng>(state: &mut GridState,
                 ordering: &mut RandomOrdering<R>,
                 cell: Cell)
                 -> Result<Frame> {
    state.mark_visited(cell)?;
    let mut candidates = CARVE_DIRECTIONS;
    ordering.shuffle_slice(&mut candidates);
    Ok(Frame { cell, candidates, tried: 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use quickcheck::{quickcheck, TestResult};

    use crate::pathing::Distances;

    /// Keep generated grids small enough for quickcheck to churn through quickly.
    fn dimension(n: u8) -> usize {
        (n % 16) as usize + 1
    }

    fn is_spanning_tree(maze: &Maze) -> bool {
        let graph = maze.passage_graph();
        maze.open_edges_count() == maze.size() - 1 && connected_components(&graph) == 1 &&
        !is_cyclic_undirected(&graph)
    }

    #[test]
    fn zero_dimensions_rejected() {
        for &(r, c) in &[(0, 1), (1, 0), (0, 0)] {
            let err = generate(r, c, None, None, Some(1)).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::InvalidDimension(..)));
        }
    }

    #[test]
    fn start_outside_grid_rejected() {
        let err = generate(3, 3, Some(3), Some(0), Some(1)).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OutOfBounds(..)));

        let options = GeneratorOptions { goal: Some(Cell::new(0, 9)), ..GeneratorOptions::seeded(1) };
        let err = recursive_backtracker(RowsCount(3), ColumnsCount(3), &options).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OutOfBounds(..)));
    }

    #[test]
    fn single_cell() {
        let m = generate(1, 1, None, None, None).unwrap();
        assert_eq!(m.start(), Cell::new(0, 0));
        assert_eq!(m.goal(), Cell::new(0, 0));
        assert_eq!(m.open_edges_count(), 0);
        assert!(m.horizontal_open().is_empty());
        assert_eq!(m.vertical_open(), &[Vec::<bool>::new()]);
    }

    #[test]
    fn single_row_is_a_corridor() {
        for &n in &[2, 5, 17] {
            let m = generate(1, n, Some(0), Some(0), Some(42)).unwrap();
            assert!(m.horizontal_open().is_empty());
            assert_eq!(m.vertical_open(), &[vec![true; n - 1]]);
        }
    }

    #[test]
    fn single_column_is_a_corridor() {
        let m = generate(6, 1, None, None, Some(5)).unwrap();
        assert_eq!(m.horizontal_open(), &vec![vec![true]; 5][..]);
        assert_eq!(m.vertical_open(), &vec![Vec::<bool>::new(); 6][..]);
    }

    #[test]
    fn goal_defaults_to_far_corner() {
        let m = generate(4, 7, Some(0), Some(0), Some(8)).unwrap();
        assert_eq!(m.start(), Cell::new(0, 0));
        assert_eq!(m.goal(), Cell::new(3, 6));

        let options = GeneratorOptions { goal: Some(Cell::new(2, 2)), ..GeneratorOptions::seeded(8) }
            .with_start(Cell::new(1, 1));
        let m = recursive_backtracker(RowsCount(4), ColumnsCount(7), &options).unwrap();
        assert_eq!(m.start(), Cell::new(1, 1));
        assert_eq!(m.goal(), Cell::new(2, 2));
    }

    // usize draws consume 64 bits of the stream on 64-bit targets.
    #[cfg(target_pointer_width = "64")]
    #[test]
    fn seeded_three_by_three() {
        // +---+---+---+
        // |   |       |
        // +   +---+   +
        // |   |       |
        // +   +   +   +
        // |       |   |
        // +---+---+---+
        let m = generate(3, 3, Some(0), Some(0), Some(42)).unwrap();
        assert_eq!(m.horizontal_open(),
                   &[vec![true, false, true], vec![true, true, true]]);
        assert_eq!(m.vertical_open(),
                   &[vec![false, true], vec![false, true], vec![true, false]]);

        let text = m.to_string();
        assert_eq!(text,
                   "+---+---+---+\n\
                    |   |       |\n\
                    +   +---+   +\n\
                    |   |       |\n\
                    +   +   +   +\n\
                    |       |   |\n\
                    +---+---+---+\n");

        let again = generate(3, 3, Some(0), Some(0), Some(42)).unwrap();
        assert_eq!(m, again);
    }

    #[test]
    fn partial_start_draws_only_the_missing_coordinate() {
        for seed in 0..50 {
            let m = generate(4, 5, Some(2), None, Some(seed)).unwrap();
            assert_eq!(m.start().row, 2);
            assert_eq!(m.walls().len(), 31 - m.open_edges_count());
            // the column is the first value taken from the stream
            let mut ordering = RandomOrdering::new(Some(seed));
            assert_eq!(m.start().column, ordering.random_index(5));

            let m = generate(4, 5, None, Some(3), Some(seed)).unwrap();
            assert_eq!(m.start().column, 3);
            let mut ordering = RandomOrdering::new(Some(seed));
            assert_eq!(m.start().row, ordering.random_index(4));
        }
    }

    #[test]
    fn random_start_draws_row_then_column() {
        let m = generate(4, 5, None, None, Some(11)).unwrap();
        let mut ordering = RandomOrdering::new(Some(11));
        let row = ordering.random_index(4);
        let column = ordering.random_index(5);
        assert_eq!(m.start(), Cell::new(row, column));
    }

    #[test]
    fn random_start_is_reproducible() {
        let a = generate(9, 4, None, None, Some(77)).unwrap();
        let b = generate(9, 4, None, None, Some(77)).unwrap();
        assert_eq!(a, b);
        assert!(a.contains(a.start()));
    }

    #[test]
    fn large_grid_does_not_recurse() {
        let m = generate(300, 300, Some(150), Some(150), Some(3)).unwrap();
        assert_eq!(m.open_edges_count(), 300 * 300 - 1);
    }

    #[test]
    fn injected_random_stream() {
        use rand::SeedableRng;
        use rand_xorshift::XorShiftRng;

        let mut ordering = RandomOrdering::from_rng(XorShiftRng::seed_from_u64(42));
        let options = GeneratorOptions::default().with_start(Cell::new(0, 0));
        let injected =
            recursive_backtracker_with(RowsCount(3), ColumnsCount(3), &options, &mut ordering)
                .unwrap();
        assert_eq!(injected, generate(3, 3, Some(0), Some(0), Some(42)).unwrap());
    }

    #[test]
    fn open_edges_form_spanning_tree() {
        fn p(rows: u8, columns: u8, seed: u64) -> bool {
            let m = generate(dimension(rows), dimension(columns), None, None, Some(seed)).unwrap();
            is_spanning_tree(&m)
        }
        quickcheck(p as fn(u8, u8, u64) -> bool)
    }

    #[test]
    fn every_cell_reachable_from_start() {
        fn p(rows: u8, columns: u8, seed: u64) -> bool {
            let m = generate(dimension(rows), dimension(columns), None, None, Some(seed)).unwrap();
            let distances = Distances::new(&m, m.start()).unwrap();
            distances.reachable_count() == m.size()
        }
        quickcheck(p as fn(u8, u8, u64) -> bool)
    }

    #[test]
    fn same_seed_same_maze() {
        fn p(rows: u8, columns: u8, start_row: u8, start_column: u8, seed: u64) -> TestResult {
            let (rows, columns) = (dimension(rows), dimension(columns));
            let (start_row, start_column) = (start_row as usize, start_column as usize);
            if start_row >= rows || start_column >= columns {
                return TestResult::discard();
            }
            let a = generate(rows, columns, Some(start_row), Some(start_column), Some(seed));
            let b = generate(rows, columns, Some(start_row), Some(start_column), Some(seed));
            TestResult::from_bool(a.unwrap() == b.unwrap())
        }
        quickcheck(p as fn(u8, u8, u8, u8, u64) -> TestResult)
    }

    #[test]
    fn unseeded_mazes_are_still_perfect() {
        for _ in 0..20 {
            let m = generate(7, 13, None, None, None).unwrap();
            assert!(is_spanning_tree(&m));
        }
    }
}
