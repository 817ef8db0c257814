use smallvec::SmallVec;

use crate::cells::Cell;
use crate::pathing::Distances;
use crate::utils::{self, FnvHashSet};

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: Cell) -> String {
        String::from("   ")
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, cell: Cell) -> String {
        if let Some(d) = self.distance_from_start_to(cell) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_cells: FnvHashSet<Cell>,
}
impl PathDisplay {
    pub fn new(path: &[Cell]) -> Self {
        let mut on_path_cells = utils::fnv_hashset(path.len());
        on_path_cells.extend(path.iter().cloned());
        PathDisplay { on_path_cells }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, cell: Cell) -> String {
        if self.on_path_cells.contains(&cell) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

/// Marks start cells with `S` and end cells with `E`.
#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_cells: SmallVec<[Cell; 4]>,
    end_cells: SmallVec<[Cell; 4]>,
}
impl StartEndPointsDisplay {
    pub fn new(starts: &[Cell], ends: &[Cell]) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_cells: starts.iter().cloned().collect(),
            end_cells: ends.iter().cloned().collect(),
        }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, cell: Cell) -> String {
        if self.start_cells.contains(&cell) {
            String::from(" S ")
        } else if self.end_cells.contains(&cell) {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}
