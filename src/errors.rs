// `error_chain!` creates the Error, ErrorKind, ResultExt, and Result types.
// Every kind here is a contract violation by the caller, never a transient failure.
use error_chain::*;

use crate::cells::Cell;

error_chain! {
    errors {
        InvalidDimension(rows: usize, columns: usize) {
            description("invalid grid dimensions")
            display("grid dimensions must be at least 1x1, got {}x{}", rows, columns)
        }
        InvalidEdge(a: Cell, b: Cell) {
            description("cells are not grid-adjacent")
            display("no edge between {} and {}, cells must differ by exactly one row or column", a, b)
        }
        OutOfBounds(cell: Cell, rows: usize, columns: usize) {
            description("cell outside the grid")
            display("cell {} is outside the {}x{} grid", cell, rows, columns)
        }
    }
}
