//! Errors raised while building alphabets, shapes, and grids.

/// Errors that can occur when constructing core puzzle types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CoreError {
    /// The alphabet holds more symbols than a [`SymbolSet`](crate::SymbolSet) can represent.
    #[display("alphabet has {len} symbols, at most 64 are supported")]
    AlphabetTooLarge {
        /// Number of symbols requested.
        len: usize,
    },
    /// A symbol occurs more than once in the alphabet.
    #[display("symbol {symbol:?} appears more than once in the alphabet")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: char,
    },
    /// A subgrid dimension is zero.
    #[display("subgrid dimensions must be non-zero, got {height}x{width}")]
    InvalidShape {
        /// Requested subgrid height.
        height: usize,
        /// Requested subgrid width.
        width: usize,
    },
    /// The grid edge exceeds the 64-symbol capacity.
    #[display("grid edge {edge} exceeds the 64-symbol capacity")]
    EdgeTooLarge {
        /// Requested edge length.
        edge: usize,
    },
    /// The cell array has the wrong number of rows.
    #[display("expected {expected} rows, got {actual}")]
    RowCountMismatch {
        /// Expected row count (the grid edge).
        expected: usize,
        /// Actual row count.
        actual: usize,
    },
    /// A row of the cell array has the wrong number of cells.
    #[display("row {row}: expected {expected} cells, got {actual}")]
    RowLengthMismatch {
        /// Zero-based row index.
        row: usize,
        /// Expected cell count (the grid edge).
        expected: usize,
        /// Actual cell count.
        actual: usize,
    },
}
