use std::fmt;

use crate::{CellSet, Grid, House, ValueSet};

/// A read view of one cell of a [`Grid`].
///
/// Obtained from [`Grid::cell`], [`Grid::cell_at`] or [`Grid::cells`].
/// Mutations go through the grid itself so that its caches stay coherent.
#[derive(Clone, Copy)]
pub struct Cell<'a> {
    grid: &'a Grid,
    index: usize,
}

impl<'a> Cell<'a> {
    pub(crate) fn new(grid: &'a Grid, index: usize) -> Self {
        Self { grid, index }
    }

    /// Returns the row-major index of the cell.
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }

    /// Returns the row index of the cell.
    #[must_use]
    pub fn row_index(self) -> usize {
        self.grid.grid_type().row_of(self.index)
    }

    /// Returns the column index of the cell.
    #[must_use]
    pub fn column_index(self) -> usize {
        self.grid.grid_type().column_of(self.index)
    }

    /// Returns the block index of the cell, if it belongs to a block.
    #[must_use]
    pub fn block_index(self) -> Option<usize> {
        self.grid.grid_type().block_of(self.index)
    }

    /// Returns the row containing the cell.
    #[must_use]
    pub fn row(self) -> House {
        self.grid.row_of(self.index)
    }

    /// Returns the column containing the cell.
    #[must_use]
    pub fn column(self) -> House {
        self.grid.column_of(self.index)
    }

    /// Returns the block containing the cell.
    #[must_use]
    pub fn block(self) -> Option<House> {
        self.grid.block_of(self.index)
    }

    /// Returns the assigned value, `0` when unassigned.
    #[must_use]
    pub fn value(self) -> usize {
        self.grid.value(self.index)
    }

    /// Returns `true` if the cell holds a value.
    #[must_use]
    pub fn is_assigned(self) -> bool {
        self.grid.is_assigned(self.index)
    }

    /// Returns `true` if the cell holds a given value.
    #[must_use]
    pub fn is_given(self) -> bool {
        self.grid.is_given(self.index)
    }

    /// Returns the values still possible for the cell.
    ///
    /// # Panics
    ///
    /// Panics if the grid's derived state is invalid.
    #[must_use]
    #[track_caller]
    pub fn possible_values(self) -> ValueSet {
        self.grid.possible_values(self.index)
    }

    /// Returns the values manually ruled out for the cell.
    #[must_use]
    pub fn excluded_values(self) -> ValueSet {
        self.grid.excluded_values(self.index)
    }

    /// Returns the peers of the cell.
    #[must_use]
    pub fn peers(self) -> CellSet {
        self.grid.peers(self.index)
    }

    /// Returns the one-based `r{row}c{column}` name of the cell.
    #[must_use]
    pub fn name(self) -> String {
        self.grid.grid_type().cell_name(self.index)
    }
}

impl fmt::Debug for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("index", &self.index)
            .field("value", &self.value())
            .field("given", &self.is_given())
            .finish()
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Grid, House, PredefinedType, UpdateMode};

    #[test]
    fn test_cell_coordinates() {
        let grid = Grid::new(PredefinedType::Classic9x9.grid_type());
        let cell = grid.cell_at(4, 7);
        assert_eq!(cell.index(), 43);
        assert_eq!(cell.row_index(), 4);
        assert_eq!(cell.column_index(), 7);
        assert_eq!(cell.block_index(), Some(5));
        assert_eq!(cell.block(), Some(House::Block { index: 5 }));
        assert_eq!(cell.name(), "r5c8");
        assert_eq!(cell.to_string(), "r5c8");
    }

    #[test]
    fn test_cell_reflects_grid_state() {
        let mut grid = Grid::new(PredefinedType::Classic4x4.grid_type());
        grid.set_value(0, 3, UpdateMode::Incremental).unwrap();
        let cell = grid.cell(0);
        assert!(cell.is_assigned());
        assert_eq!(cell.value(), 3);
        assert!(cell.possible_values().is_empty());
        assert!(!grid.cell(1).possible_values().contains(3));
        assert_eq!(grid.cells().filter(|c| c.is_assigned()).count(), 1);
    }
}
