//! Grid geometry: block dimensions and cell positions.

use std::fmt::{self, Display};

use crate::{CoreError, SymbolSet};

/// A cell coordinate, zero-based from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Creates a position from a row and a column.
    #[must_use]
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the row index.
    #[must_use]
    #[inline]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Returns the column index.
    #[must_use]
    #[inline]
    pub const fn col(self) -> usize {
        self.col
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row + 1, self.col + 1)
    }
}

/// Block dimensions of a generalized Sudoku grid.
///
/// A grid with `subgrid_height × subgrid_width` blocks has an edge of
/// `subgrid_height * subgrid_width` cells. Blocks are laid out in
/// `subgrid_width` block-rows and `subgrid_height` block-columns, and are
/// numbered left to right, top to bottom.
///
/// # Examples
///
/// ```
/// use gridsolve_core::{GridShape, Position};
///
/// let shape = GridShape::new(2, 3)?;
/// assert_eq!(shape.edge(), 6);
/// assert_eq!(shape.block_of(Position::new(3, 4)), 3);
/// # Ok::<(), gridsolve_core::CoreError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    subgrid_height: usize,
    subgrid_width: usize,
}

impl GridShape {
    /// The classic 9×9 shape with 3×3 blocks.
    pub const CLASSIC: Self = Self {
        subgrid_height: 3,
        subgrid_width: 3,
    };

    /// Creates a shape from block dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidShape`] if either dimension is zero, and
    /// [`CoreError::EdgeTooLarge`] if the edge exceeds
    /// [`SymbolSet::CAPACITY`].
    pub fn new(subgrid_height: usize, subgrid_width: usize) -> Result<Self, CoreError> {
        if subgrid_height == 0 || subgrid_width == 0 {
            return Err(CoreError::InvalidShape {
                height: subgrid_height,
                width: subgrid_width,
            });
        }
        let edge = subgrid_height.saturating_mul(subgrid_width);
        if edge > SymbolSet::CAPACITY {
            return Err(CoreError::EdgeTooLarge { edge });
        }
        Ok(Self {
            subgrid_height,
            subgrid_width,
        })
    }

    /// Returns the number of rows in a block.
    #[must_use]
    #[inline]
    pub const fn subgrid_height(self) -> usize {
        self.subgrid_height
    }

    /// Returns the number of columns in a block.
    #[must_use]
    #[inline]
    pub const fn subgrid_width(self) -> usize {
        self.subgrid_width
    }

    /// Returns the side length of the grid.
    #[must_use]
    #[inline]
    pub const fn edge(self) -> usize {
        self.subgrid_height * self.subgrid_width
    }

    /// Returns the total number of cells.
    #[must_use]
    #[inline]
    pub const fn cell_count(self) -> usize {
        self.edge() * self.edge()
    }

    /// Returns the index of the block containing `pos`.
    #[must_use]
    #[inline]
    pub const fn block_of(self, pos: Position) -> usize {
        (pos.row / self.subgrid_height) * self.subgrid_height + pos.col / self.subgrid_width
    }

    /// Returns the position of the `i`-th cell of block `block`, in row-major
    /// order within the block.
    #[must_use]
    #[inline]
    pub const fn block_cell(self, block: usize, i: usize) -> Position {
        let top = (block / self.subgrid_height) * self.subgrid_height;
        let left = (block % self.subgrid_height) * self.subgrid_width;
        Position::new(top + i / self.subgrid_width, left + i % self.subgrid_width)
    }
}

impl Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.subgrid_height, self.subgrid_width)
    }
}
