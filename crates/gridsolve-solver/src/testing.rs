//! Puzzle fixtures shared by the solver tests.

use gridsolve_core::{Alphabet, Grid};
use proptest::prelude::*;

/// A classic puzzle with 30 givens and a unique solution.
pub const CLASSIC_PUZZLE: &[&str] = &[
    "53..7....",
    "6..195...",
    ".98....6.",
    "8...6...3",
    "4..8.3..1",
    "7...2...6",
    ".6....28.",
    "...419..5",
    "....8..79",
];

/// The only solution of [`CLASSIC_PUZZLE`].
pub const CLASSIC_SOLUTION: &[&str] = &[
    "534678912",
    "672195348",
    "198342567",
    "859761423",
    "426853791",
    "713924856",
    "961537284",
    "287419635",
    "345286179",
];

/// A classic puzzle with `5` given twice in its first row.
pub const DUPLICATE_IN_ROW: &[&str] = &[
    "5...5....",
    ".........",
    ".........",
    ".........",
    ".........",
    ".........",
    ".........",
    ".........",
    ".........",
];

/// A 4×4 grid with no givens; it has 288 solutions.
pub const EMPTY_4X4: &[&str] = &["....", "....", "....", "...."];

/// Splits text rows into one-character cell strings.
pub fn cells<S>(rows: &[S]) -> Vec<Vec<String>>
where
    S: AsRef<str>,
{
    rows.iter()
        .map(|row| row.as_ref().chars().map(String::from).collect())
        .collect()
}

/// Builds a grid over the standard alphabet for the number of rows given.
#[track_caller]
pub fn grid<S>(rows: &[S]) -> Grid
where
    S: AsRef<str>,
{
    let alphabet = Alphabet::standard(rows.len()).unwrap();
    Grid::from_cells(&cells(rows), rows.len(), &alphabet).unwrap()
}

/// Strategy for sparse 4×4 puzzles, contradictory ones included.
pub fn arb_small_puzzle() -> impl Strategy<Value = Vec<String>> {
    let cell = prop_oneof![
        6 => Just('.'),
        1 => Just('1'),
        1 => Just('2'),
        1 => Just('3'),
        1 => Just('4'),
    ];
    let row = prop::collection::vec(cell, 4).prop_map(|chars| chars.into_iter().collect());
    prop::collection::vec(row, 4)
}
