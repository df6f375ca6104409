//! Exhaustive solving for generalized Sudoku grids.
//!
//! The solver combines constraint propagation with depth-first search:
//!
//! - [`propagate`] narrows a candidate grid by removing fixed symbols from
//!   their rows, columns, and blocks until nothing changes.
//! - [`solve_first`], [`solve_all`], [`count_solutions`], and
//!   [`count_solutions_bounded`] search sequentially, branching on the
//!   undetermined cell with the fewest candidates.
//! - [`solve_all_parallel`] and [`count_solutions_parallel`] split the top
//!   of the search tree into [`Slice`]s and search them on worker threads
//!   managed by a [`SliceExecutionController`].
//! - [`SudokuSolver`] wraps all of the above for puzzles given as text cells.
//!
//! # Examples
//!
//! ```
//! use gridsolve_core::{GridShape, text};
//! use gridsolve_solver::{ParallelOptions, SudokuSolver};
//!
//! let solver = SudokuSolver::with_standard_alphabet(GridShape::CLASSIC)?;
//! let puzzle = text::parse_grid_text(
//!     "53..7....\n6..195...\n.98....6.\n8...6...3\n4..8.3..1\n\
//!      7...2...6\n.6....28.\n...419..5\n....8..79\n",
//! );
//!
//! assert_eq!(solver.count_givens(&puzzle)?, 30);
//! let options = ParallelOptions::default();
//! assert_eq!(solver.count_solutions_parallel(&puzzle, &options)?, 1);
//!
//! let solution = solver.solve_one(&puzzle)?.unwrap();
//! assert_eq!(solution[0].concat(), "534678912");
//! # Ok::<(), gridsolve_solver::SolverError>(())
//! ```

pub use self::{
    error::SolverError,
    parallel::{
        DEFAULT_TASK_COUNT, DEFAULT_TASK_DEPTH_LIMIT, ExecutionMode, ExecutionStatus,
        InterruptFlag, ParallelOptions, Slice, SliceExecutionController, SliceId,
        count_solutions_parallel, solve_all_parallel,
    },
    propagate::propagate,
    search::{count_solutions, count_solutions_bounded, solve_all, solve_first},
    solver::SudokuSolver,
};

mod error;
mod parallel;
mod propagate;
mod search;
mod solver;

#[cfg(test)]
mod testing;
