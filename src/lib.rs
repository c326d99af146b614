//! Minimum-move solver for the "Lights Out" toggle puzzle.
//!
//! Toggling a cell flips it and its orthogonal neighbours; the goal is a
//! board with every cell off. [`Solver`] runs a breadth-first search over
//! bit-packed boards, so the first solution it finds is a shortest one.
//!
//! ```
//! use flipsolve::{Grid, SolveResult, Solver};
//!
//! let grid = Grid::new(3)?;
//! let board = grid.board_from_cells([(1, 1)])?;
//! let mut solver = Solver::new(grid);
//! match solver.solve(board) {
//!     SolveResult::Solved(solution) => assert_eq!(solution.len(), 5),
//!     other => panic!("unexpected {:?}", other),
//! }
//! # Ok::<(), flipsolve::GridError>(())
//! ```

pub mod bits;
pub mod board;
pub mod error;
pub mod frontier;
pub mod puzzles;
pub mod scramble;
pub mod solver;
pub mod visited;

pub use board::{Board, Cell, Grid, Move, MoveCatalog};
pub use error::{GridError, PuzzleError};
pub use puzzles::{Puzzle, Puzzles};
pub use scramble::scramble;
pub use solver::{NullTracer, SolveResult, Solution, Solver, Step, Tracer};
