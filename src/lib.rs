//! **maze_layout** carves random perfect mazes on rectangular grids with a seedable recursive
//! backtracker, then answers questions about them: passages, walls, routes and text renderings.
//!
//! ```
//! let maze = maze_layout::generate(3, 3, Some(0), Some(0), Some(42)).unwrap();
//! assert_eq!(maze.open_edges_count(), 8);
//! ```

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid_displays;
pub mod grid_state;
pub mod maze;
pub mod pathing;
pub mod shuffle;
pub mod units;
mod utils;

pub use crate::cells::Cell;
pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::generators::{generate, recursive_backtracker, GeneratorOptions};
pub use crate::grid_state::GridState;
pub use crate::maze::Maze;
pub use crate::shuffle::RandomOrdering;
