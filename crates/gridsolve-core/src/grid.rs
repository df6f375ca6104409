//! Square grids of candidate sets.
//!
//! [`Grid`] stores one [`SymbolSet`] per cell in row-major order. It has no
//! solving behavior of its own; it offers the array utilities the
//! propagator and the search build on: copying, element-wise union,
//! element-wise mapping, and predicate counting.
//!
//! # Examples
//!
//! ```
//! use gridsolve_core::{Alphabet, Grid, Position, SymbolSet};
//!
//! let alphabet = Alphabet::standard(4)?;
//! let cells = [
//!     ["1", "", "", ""],
//!     ["", "", "", ""],
//!     ["", "", "", "2"],
//!     ["", "", "", ""],
//! ];
//! let grid = Grid::from_cells(&cells, 4, &alphabet)?;
//!
//! assert_eq!(grid[Position::new(0, 0)], SymbolSet::single(0));
//! assert_eq!(grid[Position::new(0, 1)], alphabet.full_set());
//! assert_eq!(grid.count(SymbolSet::is_single), 2);
//! # Ok::<(), gridsolve_core::CoreError>(())
//! ```

use std::ops::{Index, IndexMut};

use crate::{Alphabet, CoreError, Position, SymbolSet};

/// An `edge × edge` matrix of candidate sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    edge: usize,
    cells: Vec<SymbolSet>,
}

impl Grid {
    /// Creates a grid with every cell set to `fill`.
    #[must_use]
    pub fn new(edge: usize, fill: SymbolSet) -> Self {
        Self {
            edge,
            cells: vec![fill; edge * edge],
        }
    }

    /// Creates a grid with every cell empty.
    ///
    /// An empty grid is the identity for [`Grid::union_with`].
    #[must_use]
    pub fn empty(edge: usize) -> Self {
        Self::new(edge, SymbolSet::EMPTY)
    }

    /// Builds a grid from rows of cell strings.
    ///
    /// Each string is read as the set of alphabet symbols it contains.
    /// Characters outside the alphabet are dropped, and a cell with no valid
    /// character left may hold any symbol of the alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RowCountMismatch`] or
    /// [`CoreError::RowLengthMismatch`] if `cells` is not `edge × edge`.
    pub fn from_cells<R, S>(
        cells: &[R],
        edge: usize,
        alphabet: &Alphabet,
    ) -> Result<Self, CoreError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        if cells.len() != edge {
            return Err(CoreError::RowCountMismatch {
                expected: edge,
                actual: cells.len(),
            });
        }
        let full = alphabet.full_set();
        let mut grid = Self::empty(edge);
        for (row, line) in cells.iter().enumerate() {
            let line = line.as_ref();
            if line.len() != edge {
                return Err(CoreError::RowLengthMismatch {
                    row,
                    expected: edge,
                    actual: line.len(),
                });
            }
            for (col, text) in line.iter().enumerate() {
                let set = alphabet.parse_set(text.as_ref());
                grid[Position::new(row, col)] = if set.is_empty() { full } else { set };
            }
        }
        Ok(grid)
    }

    /// Renders the grid as rows of cell strings.
    ///
    /// Each cell lists every symbol of its set in alphabet order, so a
    /// solved cell becomes a one-character string.
    #[must_use]
    pub fn to_cells(&self, alphabet: &Alphabet) -> Vec<Vec<String>> {
        self.rows()
            .map(|row| row.iter().map(|&set| alphabet.render(set)).collect())
            .collect()
    }

    /// Returns the side length.
    #[must_use]
    #[inline]
    pub fn edge(&self) -> usize {
        self.edge
    }

    /// Returns the cells in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[SymbolSet] {
        &self.cells
    }

    /// Returns the cells in row-major order, mutably.
    #[must_use]
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [SymbolSet] {
        &mut self.cells
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[SymbolSet]> {
        self.cells.chunks(self.edge.max(1))
    }

    /// Returns a copy of this grid with the cell at `pos` replaced.
    #[must_use]
    pub fn with_cell(&self, pos: Position, set: SymbolSet) -> Self {
        let mut clone = self.clone();
        clone[pos] = set;
        clone
    }

    /// Adds every candidate of `other` to the matching cell of `self`.
    ///
    /// # Panics
    ///
    /// Panics if the grids have different edges.
    pub fn union_with(&mut self, other: &Grid) {
        assert_eq!(self.edge, other.edge, "grid edges differ");
        for (cell, &set) in self.cells.iter_mut().zip(&other.cells) {
            *cell |= set;
        }
    }

    /// Returns a new grid with `f` applied to every cell.
    #[must_use]
    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(SymbolSet) -> SymbolSet,
    {
        Self {
            edge: self.edge,
            cells: self.cells.iter().copied().map(f).collect(),
        }
    }

    /// Applies `f` to every cell in place.
    pub fn map_in_place<F>(&mut self, mut f: F)
    where
        F: FnMut(SymbolSet) -> SymbolSet,
    {
        for cell in &mut self.cells {
            *cell = f(*cell);
        }
    }

    /// Counts the cells for which `pred` holds.
    #[must_use]
    pub fn count<F>(&self, mut pred: F) -> usize
    where
        F: FnMut(SymbolSet) -> bool,
    {
        self.cells.iter().filter(|&&set| pred(set)).count()
    }

    /// Returns `true` if some cell still has more than one candidate.
    #[must_use]
    pub fn has_undetermined(&self) -> bool {
        self.cells.iter().any(|set| !set.is_single())
    }

    /// Returns the undetermined cell with the fewest candidates.
    ///
    /// Ties go to the first cell in row-major order. The scan stops at the
    /// first two-candidate cell, since no cell with several candidates can
    /// have fewer. Returns `None` when every cell has at most one candidate.
    #[must_use]
    pub fn smallest_undetermined(&self) -> Option<Position> {
        let mut best: Option<(usize, usize)> = None;
        for (i, set) in self.cells.iter().enumerate() {
            if !set.has_multiple() {
                continue;
            }
            let len = set.len();
            if best.is_none_or(|(_, best_len)| len < best_len) {
                best = Some((i, len));
                if len == 2 {
                    break;
                }
            }
        }
        best.map(|(i, _)| Position::new(i / self.edge, i % self.edge))
    }

    #[inline]
    fn offset(&self, pos: Position) -> usize {
        assert!(
            pos.row() < self.edge && pos.col() < self.edge,
            "position {pos} outside a grid of edge {}",
            self.edge
        );
        pos.row() * self.edge + pos.col()
    }
}

impl Index<Position> for Grid {
    type Output = SymbolSet;

    #[inline]
    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[self.offset(pos)]
    }
}

impl IndexMut<Position> for Grid {
    #[inline]
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        let offset = self.offset(pos);
        &mut self.cells[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet4() -> Alphabet {
        Alphabet::standard(4).unwrap()
    }

    #[test]
    fn test_from_cells_blank_means_full() {
        let cells = vec![vec![String::new(); 4]; 4];
        let grid = Grid::from_cells(&cells, 4, &alphabet4()).unwrap();
        assert!(grid.cells().iter().all(|&set| set == SymbolSet::full(4)));
    }

    #[test]
    fn test_from_cells_drops_invalid_characters() {
        let mut cells = vec![vec!["."; 4]; 4];
        cells[0][0] = "3";
        cells[0][1] = "x";
        cells[0][2] = "9";
        cells[0][3] = "x2";
        let grid = Grid::from_cells(&cells, 4, &alphabet4()).unwrap();
        assert_eq!(grid[Position::new(0, 0)], SymbolSet::single(2));
        assert_eq!(grid[Position::new(0, 1)], SymbolSet::full(4));
        assert_eq!(grid[Position::new(0, 2)], SymbolSet::full(4));
        assert_eq!(grid[Position::new(0, 3)], SymbolSet::single(1));
    }

    #[test]
    fn test_from_cells_rejects_wrong_size() {
        let cells = vec![vec![""; 4]; 3];
        assert_eq!(
            Grid::from_cells(&cells, 4, &alphabet4()),
            Err(CoreError::RowCountMismatch {
                expected: 4,
                actual: 3
            })
        );

        let mut cells = vec![vec![""; 4]; 4];
        cells[2].pop();
        assert_eq!(
            Grid::from_cells(&cells, 4, &alphabet4()),
            Err(CoreError::RowLengthMismatch {
                row: 2,
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_to_cells_lists_every_candidate() {
        let alphabet = alphabet4();
        let mut grid = Grid::new(4, alphabet.full_set());
        grid[Position::new(1, 1)] = SymbolSet::single(3);
        grid[Position::new(1, 2)] = SymbolSet::from_indices([0, 2]);

        let cells = grid.to_cells(&alphabet);
        assert_eq!(cells[0][0], "1234");
        assert_eq!(cells[1][1], "4");
        assert_eq!(cells[1][2], "13");
        assert_eq!(Grid::from_cells(&cells, 4, &alphabet).unwrap(), grid);
    }

    #[test]
    fn test_with_cell_leaves_original_untouched() {
        let grid = Grid::new(4, SymbolSet::full(4));
        let pos = Position::new(2, 3);
        let clone = grid.with_cell(pos, SymbolSet::single(1));
        assert_eq!(grid[pos], SymbolSet::full(4));
        assert_eq!(clone[pos], SymbolSet::single(1));
    }

    #[test]
    fn test_union_with() {
        let mut a = Grid::empty(2);
        let mut b = Grid::empty(2);
        a[Position::new(0, 0)] = SymbolSet::single(0);
        b[Position::new(0, 0)] = SymbolSet::single(1);
        b[Position::new(1, 1)] = SymbolSet::single(1);

        a.union_with(&b);
        assert_eq!(a[Position::new(0, 0)], SymbolSet::from_indices([0, 1]));
        assert_eq!(a[Position::new(1, 1)], SymbolSet::single(1));
        assert_eq!(a[Position::new(0, 1)], SymbolSet::EMPTY);
    }

    #[test]
    #[should_panic(expected = "grid edges differ")]
    fn test_union_with_rejects_mismatched_edges() {
        Grid::empty(2).union_with(&Grid::empty(3));
    }

    #[test]
    fn test_map_and_count() {
        let mut grid = Grid::new(3, SymbolSet::full(3));
        grid[Position::new(0, 0)] = SymbolSet::single(2);
        assert_eq!(grid.count(SymbolSet::is_single), 1);

        let mapped = grid.map(|set| set - SymbolSet::single(2));
        assert_eq!(mapped.count(SymbolSet::is_empty), 1);
        assert_eq!(mapped.count(SymbolSet::has_multiple), 8);

        grid.map_in_place(|_| SymbolSet::single(0));
        assert_eq!(grid.count(SymbolSet::is_single), 9);
        assert!(!grid.has_undetermined());
    }

    #[test]
    fn test_smallest_undetermined_prefers_fewest_candidates() {
        let mut grid = Grid::new(4, SymbolSet::full(4));
        for cell in grid.cells_mut() {
            *cell = SymbolSet::single(0);
        }
        assert_eq!(grid.smallest_undetermined(), None);

        grid[Position::new(0, 3)] = SymbolSet::full(4);
        grid[Position::new(1, 0)] = SymbolSet::from_indices([0, 1, 2]);
        grid[Position::new(2, 2)] = SymbolSet::from_indices([0, 1, 2]);
        assert_eq!(grid.smallest_undetermined(), Some(Position::new(1, 0)));

        grid[Position::new(3, 0)] = SymbolSet::from_indices([1, 3]);
        grid[Position::new(3, 1)] = SymbolSet::from_indices([0, 3]);
        assert_eq!(grid.smallest_undetermined(), Some(Position::new(3, 0)));
    }

    #[test]
    fn test_smallest_undetermined_ignores_empty_cells() {
        let mut grid = Grid::new(2, SymbolSet::single(0));
        grid[Position::new(0, 0)] = SymbolSet::EMPTY;
        grid[Position::new(1, 1)] = SymbolSet::full(2);
        assert_eq!(grid.smallest_undetermined(), Some(Position::new(1, 1)));
    }

    #[test]
    #[should_panic(expected = "outside a grid")]
    fn test_index_out_of_bounds() {
        let grid = Grid::empty(2);
        let _cell = grid[Position::new(2, 0)];
    }
}
