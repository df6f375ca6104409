use std::iter::FusedIterator;

use crate::{GridShape, Position};

/// A group of cells whose fixed symbols must be distinct: a row, a column,
/// or a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum House {
    /// A row identified by its index.
    Row {
        /// Row index.
        row: usize,
    },
    /// A column identified by its index.
    Column {
        /// Column index.
        col: usize,
    },
    /// A block identified by its index (left to right, top to bottom).
    Block {
        /// Block index.
        index: usize,
    },
}

impl House {
    /// Converts a cell index within the house into an absolute [`Position`].
    ///
    /// # Panics
    ///
    /// Panics if `i` is not below the shape's edge.
    #[must_use]
    #[inline]
    pub fn position_from_cell_index(self, shape: GridShape, i: usize) -> Position {
        assert!(i < shape.edge());
        match self {
            House::Row { row } => Position::new(row, i),
            House::Column { col } => Position::new(i, col),
            House::Block { index } => shape.block_cell(index, i),
        }
    }

    /// Returns an iterator over the positions of this house.
    #[must_use]
    #[inline]
    pub fn positions(self, shape: GridShape) -> HousePositions {
        HousePositions {
            house: self,
            shape,
            next: 0,
        }
    }
}

/// Iterator over the positions of a [`House`].
#[derive(Debug, Clone)]
pub struct HousePositions {
    house: House,
    shape: GridShape,
    next: usize,
}

impl Iterator for HousePositions {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.shape.edge() {
            return None;
        }
        let pos = self.house.position_from_cell_index(self.shape, self.next);
        self.next += 1;
        Some(pos)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.shape.edge().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl FusedIterator for HousePositions {}
impl ExactSizeIterator for HousePositions {}

impl GridShape {
    /// Returns every row of the grid, top to bottom.
    pub fn rows(self) -> impl Iterator<Item = House> {
        (0..self.edge()).map(|row| House::Row { row })
    }

    /// Returns every column of the grid, left to right.
    pub fn columns(self) -> impl Iterator<Item = House> {
        (0..self.edge()).map(|col| House::Column { col })
    }

    /// Returns every block of the grid, left to right, top to bottom.
    pub fn blocks(self) -> impl Iterator<Item = House> {
        (0..self.edge()).map(|index| House::Block { index })
    }

    /// Returns every house in row, column, block order.
    pub fn houses(self) -> impl Iterator<Item = House> {
        self.rows().chain(self.columns()).chain(self.blocks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_positions() {
        let shape = GridShape::new(2, 2).unwrap();
        let row: Vec<_> = House::Row { row: 1 }.positions(shape).collect();
        assert_eq!(
            row,
            (0..4).map(|col| Position::new(1, col)).collect::<Vec<_>>()
        );

        let block: Vec<_> = House::Block { index: 3 }.positions(shape).collect();
        assert_eq!(
            block,
            vec![
                Position::new(2, 2),
                Position::new(2, 3),
                Position::new(3, 2),
                Position::new(3, 3),
            ]
        );
    }

    #[test]
    fn test_houses_cover_every_cell_three_times() {
        let shape = GridShape::new(2, 3).unwrap();
        let mut seen = vec![0; shape.cell_count()];
        for house in shape.houses() {
            let positions = house.positions(shape);
            assert_eq!(positions.len(), shape.edge());
            for pos in positions {
                seen[pos.row() * shape.edge() + pos.col()] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 3));
        assert_eq!(shape.houses().count(), 18);
    }
}
