//! Core data structures for generalized Sudoku solving.
//!
//! This crate provides the value types shared by the solver: candidate sets,
//! alphabets, grid geometry, and the grid of candidate sets itself. Nothing
//! here searches or propagates; see `gridsolve-solver` for that.
//!
//! # Overview
//!
//! - [`SymbolSet`]: fixed-capacity bitset of candidate symbols (up to 64)
//! - [`Alphabet`]: ordered characters mapping text to [`SymbolSet`] bits
//! - [`GridShape`], [`Position`], [`House`]: block dimensions, coordinates,
//!   and the rows, columns, and blocks constraints range over
//! - [`Grid`]: `edge × edge` matrix of candidate sets with array utilities
//! - [`text`]: the line-oriented puzzle file format
//!
//! # Examples
//!
//! ```
//! use gridsolve_core::{Alphabet, Grid, GridShape, text};
//!
//! let shape = GridShape::new(2, 2)?;
//! let alphabet = Alphabet::standard(shape.edge())?;
//! let cells = text::parse_grid_text("1...\n..3.\n....\n...4\n");
//! let grid = Grid::from_cells(&cells, shape.edge(), &alphabet)?;
//!
//! assert_eq!(grid.count(|set| set.is_single()), 3);
//! # Ok::<(), gridsolve_core::CoreError>(())
//! ```

pub use self::{
    alphabet::Alphabet,
    error::CoreError,
    grid::Grid,
    house::{House, HousePositions},
    shape::{GridShape, Position},
    symbol_set::SymbolSet,
};

mod alphabet;
mod error;
mod grid;
mod house;
mod shape;
pub mod symbol_set;
pub mod text;
