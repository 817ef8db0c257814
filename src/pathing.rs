use itertools::Itertools;
use smallvec::SmallVec;

use crate::cells::Cell;
use crate::maze::Maze;
use crate::utils::{self, FnvHashMap};

/// Step counts from a start cell to every cell reachable through open passages.
#[derive(Debug, Clone)]
pub struct Distances {
    start: Cell,
    distances: FnvHashMap<Cell, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill outwards from `start`. None if `start` is outside the maze.
    pub fn new(maze: &Maze, start: Cell) -> Option<Distances> {
        if !maze.contains(start) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(maze.size());
        distances.insert(start, 0);

        // Passages are unweighted, so the first time a cell is reached is its shortest distance
        // and the map doubles as the visited set.
        let mut frontier = vec![start];
        while !frontier.is_empty() {
            let mut new_frontier = vec![];
            for cell in &frontier {
                let distance_to_cell = distances[cell];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = maze.links(*cell).expect("frontier cells are inside the maze");
                for link in links {
                    if !distances.contains_key(&link) {
                        distances.insert(link, distance_to_cell + 1);
                        new_frontier.push(link);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances { start, distances, max_distance: max })
    }

    #[inline(always)]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, cell: Cell) -> Option<u32> {
        self.distances.get(&cell).cloned()
    }

    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// Cells at the maximum distance from the start, in row-major order.
    pub fn furthest_points(&self) -> SmallVec<[Cell; 8]> {
        self.distances
            .iter()
            .filter(|&(_, &distance)| distance == self.max_distance)
            .map(|(cell, _)| *cell)
            .sorted()
            .collect()
    }
}

/// Walk back downhill from `end` to the start of `distances_from_start`.
/// None if `end` cannot be reached.
pub fn shortest_path(maze: &Maze, distances_from_start: &Distances, end: Cell) -> Option<Vec<Cell>> {
    distances_from_start.distance_from_start_to(end)?;

    let mut path = vec![end];
    let start = distances_from_start.start();
    let mut current = end;

    while current != start {
        let current_distance = distances_from_start.distance_from_start_to(current)?;

        let closest_to_start = maze.links(current)?
            .into_iter()
            .filter_map(|link| {
                distances_from_start.distance_from_start_to(link).map(|d| (link, d))
            })
            .min_by_key(|&(_, d)| d);

        match closest_to_start {
            Some((closer, closer_distance)) if closer_distance < current_distance => {
                current = closer;
                path.push(current);
            }
            // No linked neighbour gets closer to the start: the distances are for another maze.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The route from the start marker to the goal marker.
pub fn solution(maze: &Maze) -> Option<Vec<Cell>> {
    let distances = Distances::new(maze, maze.start())?;
    shortest_path(maze, &distances, maze.goal())
}

/// Works only on a perfect maze: the furthest cell from any cell is one end of the longest
/// path, and the furthest cell from that end is the other.
pub fn longest_path(maze: &Maze) -> Option<Vec<Cell>> {
    let first_distances = Distances::new(maze, Cell::new(0, 0))?;
    let long_path_start = first_distances.furthest_points()[0];

    let distances_from_start = Distances::new(maze, long_path_start)?;
    let end = distances_from_start.furthest_points()[0];

    shortest_path(maze, &distances_from_start, end)
}
