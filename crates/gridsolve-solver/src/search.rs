//! Sequential depth-first search.
//!
//! Every search variant works the same way on a grid state: propagate, stop
//! if the state is contradictory or fully determined, otherwise pick the
//! undetermined cell with the fewest candidates and recurse once per
//! candidate, from the last symbol index down to the first. The variants
//! only differ in what they keep from the leaves and when they stop.

use gridsolve_core::{Grid, GridShape, Position, SymbolSet};

use crate::propagate;

/// Outcome of propagating one grid state.
#[derive(Debug)]
pub(crate) enum Node {
    /// Propagation found a contradiction.
    Contradiction,
    /// Every cell is fixed.
    Solved(Grid),
    /// The search must branch on `pos`.
    Branch { grid: Grid, pos: Position },
}

impl Node {
    pub(crate) fn expand(mut grid: Grid, shape: GridShape) -> Self {
        if !propagate(&mut grid, shape) {
            return Node::Contradiction;
        }
        match grid.smallest_undetermined() {
            Some(pos) => Node::Branch { grid, pos },
            None => Node::Solved(grid),
        }
    }
}

/// The candidates a branch tries, in search order.
pub(crate) fn branch_choices(cell: SymbolSet) -> impl Iterator<Item = SymbolSet> {
    (0..cell.len()).rev().map(move |k| cell.nth(k))
}

/// Cooperative stop request polled between branches.
pub(crate) trait Interrupt {
    fn is_interrupted(&self) -> bool;
}

/// An interrupt that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Uninterrupted;

impl Interrupt for Uninterrupted {
    #[inline]
    fn is_interrupted(&self) -> bool {
        false
    }
}

/// Returns the first solution reached by the search, if any.
///
/// # Examples
///
/// ```
/// use gridsolve_core::{Grid, GridShape, SymbolSet};
/// use gridsolve_solver::solve_first;
///
/// let shape = GridShape::new(2, 2)?;
/// let solution = solve_first(Grid::new(4, SymbolSet::full(4)), shape).unwrap();
/// assert!(!solution.has_undetermined());
/// # Ok::<(), gridsolve_core::CoreError>(())
/// ```
///
/// # Panics
///
/// Panics if the grid edge does not match the shape.
#[must_use]
pub fn solve_first(grid: Grid, shape: GridShape) -> Option<Grid> {
    match Node::expand(grid, shape) {
        Node::Contradiction => None,
        Node::Solved(grid) => Some(grid),
        Node::Branch { grid, pos } => {
            let branch = |choice| solve_first(grid.with_cell(pos, choice), shape);
            branch_choices(grid[pos]).find_map(branch)
        }
    }
}

/// Returns the cell-wise union of every solution.
///
/// Each cell of the result holds exactly the symbols that appear in that
/// cell in at least one solution, so a cell fixed in the result is fixed in
/// every solution. Returns `None` if there is no solution.
///
/// # Panics
///
/// Panics if the grid edge does not match the shape.
#[must_use]
pub fn solve_all(grid: Grid, shape: GridShape) -> Option<Grid> {
    solve_all_until(grid, shape, &Uninterrupted)
}

pub(crate) fn solve_all_until<I>(grid: Grid, shape: GridShape, interrupt: &I) -> Option<Grid>
where
    I: Interrupt + ?Sized,
{
    let (grid, pos) = match Node::expand(grid, shape) {
        Node::Contradiction => return None,
        Node::Solved(grid) => return Some(grid),
        Node::Branch { grid, pos } => (grid, pos),
    };

    let mut union: Option<Grid> = None;
    for choice in branch_choices(grid[pos]) {
        if interrupt.is_interrupted() {
            break;
        }
        let Some(found) = solve_all_until(grid.with_cell(pos, choice), shape, interrupt) else {
            continue;
        };
        match &mut union {
            Some(union) => union.union_with(&found),
            None => union = Some(found),
        }
    }
    union
}

/// Counts every solution.
///
/// # Panics
///
/// Panics if the grid edge does not match the shape.
#[must_use]
pub fn count_solutions(grid: Grid, shape: GridShape) -> usize {
    count_solutions_until(grid, shape, &Uninterrupted)
}

pub(crate) fn count_solutions_until<I>(grid: Grid, shape: GridShape, interrupt: &I) -> usize
where
    I: Interrupt + ?Sized,
{
    let (grid, pos) = match Node::expand(grid, shape) {
        Node::Contradiction => return 0,
        Node::Solved(_) => return 1,
        Node::Branch { grid, pos } => (grid, pos),
    };

    let mut total = 0;
    for choice in branch_choices(grid[pos]) {
        if interrupt.is_interrupted() {
            break;
        }
        total += count_solutions_until(grid.with_cell(pos, choice), shape, interrupt);
    }
    total
}

/// Counts solutions, stopping once `limit` have been found.
///
/// For `limit >= 1` the result is `min(count_solutions(grid), limit)`.
/// Branching stops as soon as the running total reaches the limit, and each
/// branch is only asked for the solutions still missing.
///
/// A limit of `0` stops before the first branch, but a grid that
/// propagation alone fully determines still reports its single solution.
///
/// # Panics
///
/// Panics if the grid edge does not match the shape.
#[must_use]
pub fn count_solutions_bounded(grid: Grid, shape: GridShape, limit: usize) -> usize {
    let (grid, pos) = match Node::expand(grid, shape) {
        Node::Contradiction => return 0,
        Node::Solved(_) => return 1,
        Node::Branch { grid, pos } => (grid, pos),
    };

    let mut total = 0;
    for choice in branch_choices(grid[pos]) {
        if total >= limit {
            break;
        }
        total += count_solutions_bounded(grid.with_cell(pos, choice), shape, limit - total);
    }
    total
}

#[cfg(test)]
mod tests {
    use gridsolve_core::Position;
    use proptest::prelude::*;

    use super::*;
    use crate::testing;

    fn small() -> GridShape {
        GridShape::new(2, 2).unwrap()
    }

    #[test]
    fn test_branch_choices_descend() {
        let cell = SymbolSet::from_indices([0, 2, 5]);
        let choices: Vec<_> = branch_choices(cell).collect();
        assert_eq!(
            choices,
            [SymbolSet::single(5), SymbolSet::single(2), SymbolSet::single(0)]
        );
    }

    #[test]
    fn test_solve_first_classic() {
        let solution = solve_first(testing::grid(testing::CLASSIC_PUZZLE), GridShape::CLASSIC);
        assert_eq!(solution, Some(testing::grid(testing::CLASSIC_SOLUTION)));
    }

    #[test]
    fn test_solve_first_takes_highest_symbol_first() {
        // With no givens the first cell is branched on, highest symbol first.
        let solution = solve_first(testing::grid(testing::EMPTY_4X4), small()).unwrap();
        assert_eq!(solution[Position::new(0, 0)], SymbolSet::single(3));
    }

    #[test]
    fn test_contradiction_has_no_solution() {
        let grid = testing::grid(testing::DUPLICATE_IN_ROW);
        assert_eq!(solve_first(grid.clone(), GridShape::CLASSIC), None);
        assert_eq!(solve_all(grid.clone(), GridShape::CLASSIC), None);
        assert_eq!(count_solutions(grid.clone(), GridShape::CLASSIC), 0);
        assert_eq!(count_solutions_bounded(grid, GridShape::CLASSIC, 5), 0);
    }

    #[test]
    fn test_single_blank_among_duplicates_has_no_solution() {
        let grid = testing::grid(&["111.", "1111", "1111", "1111"]);
        assert_eq!(solve_first(grid.clone(), small()), None);
        assert_eq!(solve_all(grid.clone(), small()), None);
        assert_eq!(count_solutions(grid.clone(), small()), 0);
        assert_eq!(count_solutions_bounded(grid, small(), 5), 0);
    }

    #[test]
    fn test_solve_all_unique_solution() {
        let union = solve_all(testing::grid(testing::CLASSIC_PUZZLE), GridShape::CLASSIC);
        assert_eq!(union, Some(testing::grid(testing::CLASSIC_SOLUTION)));
    }

    #[test]
    fn test_solve_all_unions_solutions() {
        let union = solve_all(testing::grid(testing::EMPTY_4X4), small()).unwrap();
        assert!(union.cells().iter().all(|&set| set == SymbolSet::full(4)));

        // With the top row fixed, r2c1 can take either symbol its block lacks.
        let union = solve_all(testing::grid(&["1234", "....", "....", "...."]), small()).unwrap();
        assert_eq!(union[Position::new(0, 0)], SymbolSet::single(0));
        assert_eq!(union[Position::new(1, 0)], SymbolSet::from_indices([2, 3]));
    }

    #[test]
    fn test_count_empty_4x4() {
        let grid = testing::grid(testing::EMPTY_4X4);
        assert_eq!(count_solutions(grid, small()), 288);
    }

    #[test]
    fn test_count_classic_is_unique() {
        let grid = testing::grid(testing::CLASSIC_PUZZLE);
        assert_eq!(count_solutions(grid, GridShape::CLASSIC), 1);
    }

    #[test]
    fn test_count_bounded_caps_at_limit() {
        let grid = testing::grid(testing::EMPTY_4X4);
        assert_eq!(count_solutions_bounded(grid.clone(), small(), 1), 1);
        assert_eq!(count_solutions_bounded(grid.clone(), small(), 10), 10);
        assert_eq!(count_solutions_bounded(grid.clone(), small(), 288), 288);
        assert_eq!(count_solutions_bounded(grid, small(), 1000), 288);
    }

    #[test]
    fn test_count_bounded_zero_limit() {
        assert_eq!(
            count_solutions_bounded(testing::grid(testing::EMPTY_4X4), small(), 0),
            0
        );
        let solved = testing::grid(testing::CLASSIC_SOLUTION);
        assert_eq!(count_solutions_bounded(solved, GridShape::CLASSIC, 0), 1);
    }

    #[test]
    fn test_count_bounded_is_monotone() {
        let grid = testing::grid(&["1...", "..3.", "....", "...."]);
        let total = count_solutions(grid.clone(), small());
        let mut previous = 0;
        for limit in 1..=total + 2 {
            let count = count_solutions_bounded(grid.clone(), small(), limit);
            assert_eq!(count, limit.min(total));
            assert!(count >= previous);
            previous = count;
        }
    }

    proptest! {
        #[test]
        fn test_search_variants_agree(rows in testing::arb_small_puzzle()) {
            let grid = testing::grid(&rows);
            let count = count_solutions(grid.clone(), small());
            let first = solve_first(grid.clone(), small());
            let union = solve_all(grid.clone(), small());

            prop_assert_eq!(first.is_some(), count > 0);
            prop_assert_eq!(union.is_some(), count > 0);
            if let (Some(first), Some(union)) = (first, union) {
                prop_assert!(!first.has_undetermined());
                for (&single, &all) in first.cells().iter().zip(union.cells()) {
                    prop_assert!(all.is_superset(single));
                }
            }
            prop_assert_eq!(count_solutions_bounded(grid, small(), 3), count.min(3));
        }
    }
}
