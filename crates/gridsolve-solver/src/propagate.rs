//! Constraint propagation over rows, columns, and blocks.
//!
//! Propagation repeatedly removes every fixed symbol from the other cells of
//! the houses it belongs to, until a whole pass makes no change. It is the
//! only inference the search relies on; anything it cannot settle is left to
//! branching.

use gridsolve_core::{Grid, GridShape, House, SymbolSet};

/// Marker for a grid state that cannot lead to a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Contradiction;

/// Narrows `grid` in place until no house elimination changes it.
///
/// Returns `false` as soon as a contradiction is found: two fixed cells of a
/// house hold the same symbol, or some cell loses its last candidate. The
/// grid is left partially reduced in that case and should be discarded.
///
/// When this returns `true`, no house contains a repeated fixed symbol and
/// no multi-candidate cell contains a symbol fixed elsewhere in its houses.
/// Running it again on the result changes nothing.
///
/// # Examples
///
/// ```
/// use gridsolve_core::{Alphabet, Grid, GridShape};
/// use gridsolve_solver::propagate;
///
/// let shape = GridShape::new(2, 2)?;
/// let alphabet = Alphabet::standard(4)?;
/// let mut grid = Grid::from_cells(
///     &[["1", "2", "3", ""], ["", "", "", ""], ["", "", "", ""], ["", "", "", ""]],
///     4,
///     &alphabet,
/// )?;
///
/// assert!(propagate(&mut grid, shape));
/// assert_eq!(grid.to_cells(&alphabet)[0][3], "4");
/// # Ok::<(), gridsolve_core::CoreError>(())
/// ```
///
/// # Panics
///
/// Panics if the grid edge does not match the shape.
pub fn propagate(grid: &mut Grid, shape: GridShape) -> bool {
    assert_eq!(grid.edge(), shape.edge(), "grid edge does not match shape");
    loop {
        let changed = match eliminate_all(grid, shape) {
            Ok(changed) => changed,
            Err(Contradiction) => return false,
        };
        if !changed {
            return true;
        }
    }
}

fn eliminate_all(grid: &mut Grid, shape: GridShape) -> Result<bool, Contradiction> {
    let mut changed = eliminate_in_rows(grid, shape)?;
    changed |= eliminate_in_columns(grid, shape)?;
    changed |= eliminate_in_blocks(grid, shape)?;
    Ok(changed)
}

fn eliminate_in_rows(grid: &mut Grid, shape: GridShape) -> Result<bool, Contradiction> {
    eliminate_in_houses(grid, shape, shape.rows())
}

fn eliminate_in_columns(grid: &mut Grid, shape: GridShape) -> Result<bool, Contradiction> {
    eliminate_in_houses(grid, shape, shape.columns())
}

fn eliminate_in_blocks(grid: &mut Grid, shape: GridShape) -> Result<bool, Contradiction> {
    eliminate_in_houses(grid, shape, shape.blocks())
}

fn eliminate_in_houses<I>(
    grid: &mut Grid,
    shape: GridShape,
    houses: I,
) -> Result<bool, Contradiction>
where
    I: Iterator<Item = House>,
{
    let mut changed = false;
    for house in houses {
        changed |= eliminate_in_house(grid, shape, house)?;
    }
    Ok(changed)
}

fn eliminate_in_house(
    grid: &mut Grid,
    shape: GridShape,
    house: House,
) -> Result<bool, Contradiction> {
    let mut fixed = SymbolSet::EMPTY;
    for pos in house.positions(shape) {
        let set = grid[pos];
        if set.is_single() {
            if fixed.is_superset(set) {
                return Err(Contradiction);
            }
            fixed |= set;
        }
    }

    let mut changed = false;
    for pos in house.positions(shape) {
        let set = grid[pos];
        if set.is_empty() {
            return Err(Contradiction);
        }
        if set.has_multiple() && !(set & fixed).is_empty() {
            let reduced = set - fixed;
            if reduced.is_empty() {
                return Err(Contradiction);
            }
            grid[pos] = reduced;
            changed = true;
        }
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use gridsolve_core::{Alphabet, Position};
    use proptest::prelude::*;

    use super::*;
    use crate::testing;

    #[test]
    fn test_fills_last_cell_of_row() {
        let shape = GridShape::new(2, 2).unwrap();
        let mut grid = testing::grid(&["123.", "....", "....", "...."]);
        assert!(propagate(&mut grid, shape));
        assert_eq!(grid[Position::new(0, 3)], SymbolSet::single(3));
    }

    #[test]
    fn test_solves_classic_puzzle_by_propagation() {
        // Every empty cell of this grid is a naked single in turn.
        let mut grid = testing::grid(&[
            "53467891.",
            "672195348",
            "198342567",
            "859761423",
            "426853791",
            "713924856",
            "961537284",
            "287419635",
            "3452861.9",
        ]);
        assert!(propagate(&mut grid, GridShape::CLASSIC));
        assert!(!grid.has_undetermined());
        assert_eq!(grid, testing::grid(testing::CLASSIC_SOLUTION));
    }

    #[test]
    fn test_duplicate_in_row_is_contradiction() {
        let mut grid = testing::grid(&["1..1", "....", "....", "...."]);
        assert!(!propagate(&mut grid, GridShape::new(2, 2).unwrap()));
    }

    #[test]
    fn test_duplicate_in_column_is_contradiction() {
        let mut grid = testing::grid(&["2...", "....", "2...", "...."]);
        assert!(!propagate(&mut grid, GridShape::new(2, 2).unwrap()));
    }

    #[test]
    fn test_duplicate_in_block_is_contradiction() {
        let mut grid = testing::grid(&["3...", ".3..", "....", "...."]);
        assert!(!propagate(&mut grid, GridShape::new(2, 2).unwrap()));
    }

    #[test]
    fn test_forced_conflict_and_empty_cells_are_contradictions() {
        // r1c4 is forced to 4, which column 4 already holds.
        let mut grid = testing::grid(&["123.", "....", "...4", "...."]);
        assert!(!propagate(&mut grid, GridShape::new(2, 2).unwrap()));

        let mut grid = Grid::empty(4);
        assert!(!propagate(&mut grid, GridShape::new(2, 2).unwrap()));
    }

    #[test]
    fn test_blank_grid_is_unchanged() {
        let shape = GridShape::new(2, 3).unwrap();
        let blank = Grid::new(6, SymbolSet::full(6));
        let mut grid = blank.clone();
        assert!(propagate(&mut grid, shape));
        assert_eq!(grid, blank);
    }

    #[test]
    fn test_non_rectangular_blocks() {
        // 2x3 blocks: r1c1 = 1 removes 1 from r2c3 through the block only.
        let shape = GridShape::new(2, 3).unwrap();
        let alphabet = Alphabet::standard(6).unwrap();
        let mut cells = vec![vec![String::new(); 6]; 6];
        cells[0][0] = "1".to_owned();
        let mut grid = Grid::from_cells(&cells, 6, &alphabet).unwrap();
        assert!(propagate(&mut grid, shape));
        assert!(!grid[Position::new(1, 2)].contains(0));
        assert!(grid[Position::new(1, 3)].contains(0));
        assert!(grid[Position::new(2, 1)].contains(0));
    }

    proptest! {
        #[test]
        fn test_propagation_is_idempotent_and_sound(rows in testing::arb_small_puzzle()) {
            let shape = GridShape::new(2, 2).unwrap();
            let mut grid = testing::grid(&rows);
            if propagate(&mut grid, shape) {
                let mut again = grid.clone();
                prop_assert!(propagate(&mut again, shape));
                prop_assert_eq!(&again, &grid);

                for house in shape.houses() {
                    let mut fixed = SymbolSet::EMPTY;
                    for pos in house.positions(shape) {
                        let set = grid[pos];
                        prop_assert!(!set.is_empty());
                        if set.is_single() {
                            prop_assert!((fixed & set).is_empty());
                            fixed |= set;
                        }
                    }
                    for pos in house.positions(shape) {
                        let set = grid[pos];
                        if set.has_multiple() {
                            prop_assert!((set & fixed).is_empty());
                        }
                    }
                }
            }
        }
    }
}
