use gridsolve_core::{Alphabet, Grid, GridShape, SymbolSet};

use crate::{ParallelOptions, SolverError, parallel, search};

/// Solver entry point working on text cells.
///
/// A `SudokuSolver` pairs a [`GridShape`] with an [`Alphabet`] of exactly one
/// symbol per column. Puzzles are passed as `edge × edge` rows of strings:
/// a cell lists the symbols it may hold, and a cell listing none (empty, or
/// only characters outside the alphabet) may hold any symbol. Results come
/// back in the same form, each cell listing its symbols in alphabet order.
///
/// # Examples
///
/// ```
/// use gridsolve_core::{GridShape, text};
/// use gridsolve_solver::SudokuSolver;
///
/// let solver = SudokuSolver::with_standard_alphabet(GridShape::new(2, 2)?)?;
/// let puzzle = text::parse_grid_text("123.\n34.2\n.143\n432.\n");
///
/// let solution = solver.solve_one(&puzzle)?.unwrap();
/// assert_eq!(solution, text::parse_grid_text("1234\n3412\n2143\n4321\n"));
/// assert_eq!(solver.count_solutions(&puzzle)?, 1);
/// # Ok::<(), gridsolve_solver::SolverError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SudokuSolver {
    shape: GridShape,
    alphabet: Alphabet,
}

impl SudokuSolver {
    /// Creates a solver for `shape` over `alphabet`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::AlphabetMismatch`] if the alphabet length is
    /// not the grid edge.
    pub fn new(shape: GridShape, alphabet: Alphabet) -> Result<Self, SolverError> {
        if alphabet.len() != shape.edge() {
            return Err(SolverError::AlphabetMismatch {
                alphabet_len: alphabet.len(),
                edge: shape.edge(),
            });
        }
        Ok(Self { shape, alphabet })
    }

    /// Creates a solver for `shape` over [`Alphabet::standard`].
    ///
    /// # Errors
    ///
    /// Returns an error if the standard alphabet cannot cover the edge.
    pub fn with_standard_alphabet(shape: GridShape) -> Result<Self, SolverError> {
        Self::new(shape, Alphabet::standard(shape.edge())?)
    }

    /// Returns the grid shape.
    #[must_use]
    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Returns the alphabet.
    #[must_use]
    #[inline]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Reads text cells into a candidate grid.
    ///
    /// # Errors
    ///
    /// Returns an error if `cells` is not `edge × edge`.
    pub fn parse<R, S>(&self, cells: &[R]) -> Result<Grid, SolverError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        Ok(Grid::from_cells(cells, self.shape.edge(), &self.alphabet)?)
    }

    /// Renders a candidate grid as text cells.
    #[must_use]
    pub fn render(&self, grid: &Grid) -> Vec<Vec<String>> {
        grid.to_cells(&self.alphabet)
    }

    /// Returns the first solution found, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if `cells` is not `edge × edge`.
    pub fn solve_one<R, S>(&self, cells: &[R]) -> Result<Option<Vec<Vec<String>>>, SolverError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let grid = self.parse(cells)?;
        Ok(search::solve_first(grid, self.shape).map(|grid| self.render(&grid)))
    }

    /// Returns the cell-wise union of every solution, or `None` if there is
    /// none.
    ///
    /// # Errors
    ///
    /// Returns an error if `cells` is not `edge × edge`.
    pub fn solve_all<R, S>(&self, cells: &[R]) -> Result<Option<Vec<Vec<String>>>, SolverError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let grid = self.parse(cells)?;
        Ok(search::solve_all(grid, self.shape).map(|grid| self.render(&grid)))
    }

    /// Parallel version of [`solve_all`](Self::solve_all).
    ///
    /// # Errors
    ///
    /// Returns an error if `cells` is not `edge × edge`, or if the parallel
    /// run cannot start.
    pub fn solve_all_parallel<R, S>(
        &self,
        cells: &[R],
        options: &ParallelOptions,
    ) -> Result<Option<Vec<Vec<String>>>, SolverError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let grid = self.parse(cells)?;
        let union = parallel::solve_all_parallel(grid, self.shape, options)?;
        Ok(union.map(|grid| self.render(&grid)))
    }

    /// Counts every solution.
    ///
    /// # Errors
    ///
    /// Returns an error if `cells` is not `edge × edge`.
    pub fn count_solutions<R, S>(&self, cells: &[R]) -> Result<usize, SolverError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        Ok(search::count_solutions(self.parse(cells)?, self.shape))
    }

    /// Counts solutions, stopping once `limit` have been found.
    ///
    /// See [`count_solutions_bounded`](crate::count_solutions_bounded) for
    /// the exact result.
    ///
    /// # Errors
    ///
    /// Returns an error if `cells` is not `edge × edge`.
    pub fn count_solutions_bounded<R, S>(
        &self,
        cells: &[R],
        limit: usize,
    ) -> Result<usize, SolverError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let grid = self.parse(cells)?;
        Ok(search::count_solutions_bounded(grid, self.shape, limit))
    }

    /// Parallel version of [`count_solutions`](Self::count_solutions).
    ///
    /// # Errors
    ///
    /// Returns an error if `cells` is not `edge × edge`, or if the parallel
    /// run cannot start.
    pub fn count_solutions_parallel<R, S>(
        &self,
        cells: &[R],
        options: &ParallelOptions,
    ) -> Result<usize, SolverError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        parallel::count_solutions_parallel(self.parse(cells)?, self.shape, options)
    }

    /// Counts the cells that hold exactly one symbol before any solving.
    ///
    /// # Errors
    ///
    /// Returns an error if `cells` is not `edge × edge`.
    pub fn count_givens<R, S>(&self, cells: &[R]) -> Result<usize, SolverError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        Ok(self.parse(cells)?.count(SymbolSet::is_single))
    }
}
