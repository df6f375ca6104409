//! Parallel enumeration and counting.
//!
//! A parallel run has two phases. The plan phase walks the top of the search
//! tree on the calling thread, exactly as the sequential search would, and
//! turns every state reached at the task depth limit into a [`Slice`]. States
//! that are solved or contradictory before that depth are settled during
//! planning: solved ones still become slices, contradictory ones are dropped.
//! The execution phase then runs the ordinary sequential search on every
//! slice through a [`SliceExecutionController`], and merges the per-slice
//! results in planning order.
//!
//! Since the slices partition the search tree, a run that is not interrupted
//! returns exactly what the sequential search returns. An interrupted run
//! returns whatever the slices had found by the time they noticed.
//!
//! # Examples
//!
//! ```
//! use gridsolve_core::{Grid, GridShape, SymbolSet};
//! use gridsolve_solver::{ExecutionMode, ParallelOptions, count_solutions_parallel};
//!
//! let shape = GridShape::new(2, 2)?;
//! let options = ParallelOptions::default()
//!     .with_task_depth_limit(2)
//!     .with_mode(ExecutionMode::OneSlicePerTask);
//! let count = count_solutions_parallel(Grid::new(4, SymbolSet::full(4)), shape, &options)?;
//! assert_eq!(count, 288);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use gridsolve_core::{Grid, GridShape};
use log::debug;

pub use self::{
    controller::{ExecutionMode, InterruptFlag, SliceExecutionController, SliceId},
    slice::{ExecutionStatus, Slice},
};
use crate::{
    SolverError,
    search::{self, Node, branch_choices},
};

mod controller;
mod slice;

/// Default number of branching levels expanded while planning.
pub const DEFAULT_TASK_DEPTH_LIMIT: usize = 5;

/// Default task count for [`ExecutionMode::FixedNumberOfTasks`].
pub const DEFAULT_TASK_COUNT: usize = 16;

/// Settings for a parallel run.
#[derive(Debug, Clone)]
pub struct ParallelOptions {
    /// Number of branching levels expanded before states become slices.
    ///
    /// `0` makes the whole puzzle a single slice.
    pub task_depth_limit: usize,
    /// How slices are mapped onto worker tasks.
    pub mode: ExecutionMode,
    /// Flag polled by workers; set it to stop the run early.
    pub interrupt: InterruptFlag,
}

impl Default for ParallelOptions {
    fn default() -> Self {
        Self {
            task_depth_limit: DEFAULT_TASK_DEPTH_LIMIT,
            mode: ExecutionMode::FixedNumberOfTasks {
                task_count: DEFAULT_TASK_COUNT,
            },
            interrupt: InterruptFlag::new(),
        }
    }
}

impl ParallelOptions {
    /// Sets the task depth limit.
    #[must_use]
    pub fn with_task_depth_limit(self, task_depth_limit: usize) -> Self {
        Self {
            task_depth_limit,
            ..self
        }
    }

    /// Sets the scheduling mode.
    #[must_use]
    pub fn with_mode(self, mode: ExecutionMode) -> Self {
        Self { mode, ..self }
    }

    /// Sets the interrupt flag the run observes.
    #[must_use]
    pub fn with_interrupt(self, interrupt: InterruptFlag) -> Self {
        Self { interrupt, ..self }
    }
}

/// Returns the cell-wise union of every solution, searching slices in
/// parallel.
///
/// Returns `None` if there is no solution, or if an interrupt stopped every
/// slice before it found one.
///
/// # Errors
///
/// Returns [`SolverError::ZeroTaskCount`] if a fixed-task mode asks for no
/// tasks, and [`SolverError::ThreadPool`] if the workers cannot be started.
///
/// # Panics
///
/// Panics if the grid edge does not match the shape.
pub fn solve_all_parallel(
    grid: Grid,
    shape: GridShape,
    options: &ParallelOptions,
) -> Result<Option<Grid>, SolverError> {
    run(grid, shape, options, &UnionOfSolutions { shape })
}

/// Counts every solution, searching slices in parallel.
///
/// # Errors
///
/// Returns [`SolverError::ZeroTaskCount`] if a fixed-task mode asks for no
/// tasks, and [`SolverError::ThreadPool`] if the workers cannot be started.
///
/// # Panics
///
/// Panics if the grid edge does not match the shape.
pub fn count_solutions_parallel(
    grid: Grid,
    shape: GridShape,
    options: &ParallelOptions,
) -> Result<usize, SolverError> {
    run(grid, shape, options, &SolutionCount { shape })
}

/// A search run on every slice, and how slice results combine.
trait SliceSearch: Sync {
    type Output: Send;

    fn empty(&self) -> Self::Output;
    fn search(&self, grid: Grid, interrupt: &InterruptFlag) -> Self::Output;
    fn merge(&self, total: Self::Output, part: Self::Output) -> Self::Output;
}

#[derive(Debug)]
struct UnionOfSolutions {
    shape: GridShape,
}

impl SliceSearch for UnionOfSolutions {
    type Output = Option<Grid>;

    fn empty(&self) -> Self::Output {
        None
    }

    fn search(&self, grid: Grid, interrupt: &InterruptFlag) -> Self::Output {
        search::solve_all_until(grid, self.shape, interrupt)
    }

    fn merge(&self, total: Self::Output, part: Self::Output) -> Self::Output {
        match (total, part) {
            (Some(mut total), Some(part)) => {
                total.union_with(&part);
                Some(total)
            }
            (total, part) => total.or(part),
        }
    }
}

#[derive(Debug)]
struct SolutionCount {
    shape: GridShape,
}

impl SliceSearch for SolutionCount {
    type Output = usize;

    fn empty(&self) -> Self::Output {
        0
    }

    fn search(&self, grid: Grid, interrupt: &InterruptFlag) -> Self::Output {
        search::count_solutions_until(grid, self.shape, interrupt)
    }

    fn merge(&self, total: Self::Output, part: Self::Output) -> Self::Output {
        total + part
    }
}

fn run<Q>(
    grid: Grid,
    shape: GridShape,
    options: &ParallelOptions,
    search: &Q,
) -> Result<Q::Output, SolverError>
where
    Q: SliceSearch,
{
    if options.mode == (ExecutionMode::FixedNumberOfTasks { task_count: 0 }) {
        return Err(SolverError::ZeroTaskCount);
    }

    let mut controller =
        SliceExecutionController::with_interrupt(options.mode, options.interrupt.clone());
    plan(&mut controller, grid, shape, options.task_depth_limit);
    debug!(
        "planned {} slices at depth limit {}",
        controller.slice_count(),
        options.task_depth_limit
    );

    controller.process_all_slices(|controller| match controller.mode() {
        ExecutionMode::OneSlicePerTask => run_one_slice(controller, search),
        ExecutionMode::FixedNumberOfTasks { .. } => run_until_drained(controller, search),
    })?;

    Ok(controller
        .into_results()
        .into_iter()
        .fold(search.empty(), |total, part| search.merge(total, part)))
}

fn plan<T>(
    controller: &mut SliceExecutionController<Grid, T>,
    grid: Grid,
    shape: GridShape,
    depth: usize,
) {
    match Node::expand(grid, shape) {
        Node::Contradiction => {}
        Node::Solved(grid) => controller.create_slice(grid),
        Node::Branch { grid, .. } if depth == 0 => controller.create_slice(grid),
        Node::Branch { grid, pos } => {
            for choice in branch_choices(grid[pos]) {
                plan(controller, grid.with_cell(pos, choice), shape, depth - 1);
            }
        }
    }
}

fn run_one_slice<Q>(controller: &SliceExecutionController<Grid, Q::Output>, search: &Q)
where
    Q: SliceSearch,
{
    let Some(id) = controller.take_slice() else {
        panic!("one-slice-per-task worker found no slice to run");
    };
    run_slice(controller, search, id);
}

fn run_until_drained<Q>(controller: &SliceExecutionController<Grid, Q::Output>, search: &Q)
where
    Q: SliceSearch,
{
    while let Some(id) = controller.take_slice() {
        run_slice(controller, search, id);
    }
}

fn run_slice<Q>(controller: &SliceExecutionController<Grid, Q::Output>, search: &Q, id: SliceId)
where
    Q: SliceSearch,
{
    let grid = controller.start_slice(id);
    let result = search.search(grid, controller.interrupt_flag());
    controller.finish_slice(id, result);
}
