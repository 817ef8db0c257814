use docopt::Docopt;
use log::info;
use maze_layout::{
    generators::{self, GeneratorOptions},
    grid_displays::{GridDisplay, PathDisplay, StartEndPointsDisplay},
    pathing,
    units::{ColumnsCount, RowsCount},
    Maze,
};
use serde_derive::Deserialize;
use std::{fs::File, io::prelude::*};

const USAGE: &str = "Maze Layout

Usage:
    maze_driver -h | --help
    maze_driver [(--grid-size=<n>|[--rows=<r> --columns=<c>])] [--seed=<s>] [--start-row=<y>] [--start-column=<x>] [(--show-distances|--show-path [--longest-path]|--mark-start-end)] [--text-out=<path>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --rows=<r>             The number of rows in a r*c grid [default: 10].
    --columns=<c>          The number of columns in a r*c grid [default: 10].
    --seed=<s>             Seed the random stream so the same maze is carved on every run.
    --start-row=<y>        Row of the cell carving starts from. Random if not specified.
    --start-column=<x>     Column of the cell carving starts from. Random if not specified.
    --show-distances       Show the distance (hexadecimal) from the start cell to all other cells.
    --show-path            Show the path from the start cell to the goal in the far corner.
    --longest-path         With --show-path, show the longest path in the maze instead.
    --mark-start-end       Draw an 'S' (start) and 'E' (end) to show the start and goal cells.
    --text-out=<path>      Output file path for a textual rendering of a maze, else stdout.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_start_row: Option<usize>,
    flag_start_column: Option<usize>,
    flag_show_distances: bool,
    flag_show_path: bool,
    flag_longest_path: bool,
    flag_mark_start_end: bool,
    flag_text_out: String,
    flag_save_edges: String,
}

mod errors {
    use error_chain::*;
    error_chain! {
        links {
            Maze(::maze_layout::Error, ::maze_layout::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (rows, columns) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_rows, args.flag_columns)
    };

    let options = GeneratorOptions {
        start_row: args.flag_start_row,
        start_column: args.flag_start_column,
        goal: None,
        seed: args.flag_seed,
    };
    let maze = generators::recursive_backtracker(RowsCount(rows), ColumnsCount(columns), &options)
        .chain_err(|| format!("Failed to carve a {}x{} maze", rows, columns))?;
    info!("Carved {}x{} maze from {} to {}", rows, columns, maze.start(), maze.goal());

    if !args.flag_save_edges.is_empty() {
        write_text_to_file(&maze.edge_list(), &args.flag_save_edges)
            .chain_err(|| format!("Failed to write maze graph to text file {}", args.flag_save_edges))?;
    }

    let text = render_text(&maze, &args)?;
    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

/// Decide how the maze cells are displayed as text
/// - Nothing in the cells
/// - Start and goal markers
/// - Distances from the start cell to all other cells
/// - The route from the start to the goal, or the longest path in the maze
fn render_text(maze: &Maze, maze_args: &MazeArgs) -> Result<String> {
    let display: Option<Box<dyn GridDisplay>> = if maze_args.flag_show_distances {
        let distances = pathing::Distances::new(maze, maze.start())
            .ok_or("Start cell is outside the maze.")?;
        Some(Box::new(distances))
    } else if maze_args.flag_show_path {
        let path = if maze_args.flag_longest_path {
            pathing::longest_path(maze)
        } else {
            pathing::solution(maze)
        };
        // Every carved maze is perfect, so a missing route means a broken maze.
        let path = path.ok_or("No route through the maze.")?;
        Some(Box::new(PathDisplay::new(&path)))
    } else if maze_args.flag_mark_start_end {
        Some(Box::new(StartEndPointsDisplay::new(&[maze.start()], &[maze.goal()])))
    } else {
        None
    };

    Ok(match display {
        Some(d) => maze.render(d.as_ref()),
        None => maze.to_string(),
    })
}

fn write_text_to_file(data: &str, file_name: &str) -> Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> MazeArgs {
        Docopt::new(USAGE)
            .and_then(|d| d.argv(argv.iter().cloned()).deserialize())
            .unwrap_or_else(|e| e.exit())
    }

    #[test]
    fn start_coordinates_are_independent() {
        let args = parse(&["maze_driver", "--start-row=2"]);
        assert_eq!(args.flag_start_row, Some(2));
        assert_eq!(args.flag_start_column, None);

        let args = parse(&["maze_driver", "--start-column=3", "--seed=9"]);
        assert_eq!(args.flag_start_row, None);
        assert_eq!(args.flag_start_column, Some(3));
        assert_eq!(args.flag_seed, Some(9));
    }

    #[test]
    fn defaults_to_ten_by_ten() {
        let args = parse(&["maze_driver"]);
        assert_eq!((args.flag_rows, args.flag_columns), (10, 10));
        assert_eq!(args.flag_grid_size, None);
        assert!(args.flag_text_out.is_empty());
    }
}
