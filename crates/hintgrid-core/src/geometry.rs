//! Grid geometry: size and cell-to-block layout.
//!
//! A [`GridType`] is the only configuration a [`Grid`](crate::Grid) needs. It
//! fixes the grid size and maps every cell to an optional block. Common
//! layouts are available as [`PredefinedType`] presets.
//!
//! # Examples
//!
//! ```
//! use hintgrid_core::{GridType, PredefinedType};
//!
//! let classic = PredefinedType::Classic9x9.grid_type();
//! assert_eq!(classic.grid_size(), 9);
//! assert_eq!(classic.block_of(classic.cell_index(4, 4)), Some(4));
//!
//! // A custom geometry: 6x6 with 3-row by 2-column blocks.
//! let tall = GridType::new(6, |cell| Some((cell / 6) / 3 * 3 + (cell % 6) / 2));
//! assert_eq!(tall.block_of(5), Some(2));
//! ```

use std::{fmt, sync::Arc};

use crate::bit_set::CAPACITY;

/// Largest supported grid size.
pub const MAX_GRID_SIZE: usize = 16;

const _: () = assert!(MAX_GRID_SIZE * MAX_GRID_SIZE <= CAPACITY);

/// The shape of a grid: its size and the block each cell belongs to.
///
/// Cloning is cheap; the block mapping is shared.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GridType {
    grid_size: usize,
    blocks: Arc<[Option<usize>]>,
}

impl GridType {
    /// Creates a geometry from a block-membership function.
    ///
    /// `block_of` receives a row-major cell index and returns the block index
    /// of that cell, or `None` if the cell is not part of any block.
    ///
    /// # Panics
    ///
    /// Panics if `grid_size` is not in `1..=MAX_GRID_SIZE`, or if `block_of`
    /// returns a block index `>= grid_size`.
    #[must_use]
    pub fn new<F>(grid_size: usize, block_of: F) -> Self
    where
        F: Fn(usize) -> Option<usize>,
    {
        assert!(
            (1..=MAX_GRID_SIZE).contains(&grid_size),
            "grid size must be between 1 and {MAX_GRID_SIZE}, got {grid_size}"
        );
        let blocks = (0..grid_size * grid_size)
            .map(|cell| {
                let block = block_of(cell);
                if let Some(block) = block {
                    assert!(
                        block < grid_size,
                        "block index {block} of cell {cell} is out of range for size {grid_size}"
                    );
                }
                block
            })
            .collect();
        Self { grid_size, blocks }
    }

    /// Creates a geometry from an explicit row-major block map.
    ///
    /// # Panics
    ///
    /// Panics if `map` does not hold exactly `grid_size²` entries or contains
    /// an out-of-range block index.
    #[must_use]
    pub fn from_block_map(grid_size: usize, map: &[usize]) -> Self {
        assert_eq!(
            map.len(),
            grid_size * grid_size,
            "block map must have one entry per cell"
        );
        Self::new(grid_size, |cell| Some(map[cell]))
    }

    /// Creates a geometry with rectangular blocks of `block_rows` x `block_columns` cells.
    ///
    /// # Panics
    ///
    /// Panics if the block dimensions do not tile the grid.
    #[must_use]
    pub fn regular(grid_size: usize, block_rows: usize, block_columns: usize) -> Self {
        assert_eq!(
            block_rows * block_columns,
            grid_size,
            "blocks of {block_rows}x{block_columns} cannot tile a grid of size {grid_size}"
        );
        let blocks_per_band = grid_size / block_columns;
        Self::new(grid_size, |cell| {
            let (row, column) = (cell / grid_size, cell % grid_size);
            Some(row / block_rows * blocks_per_band + column / block_columns)
        })
    }

    /// Creates a geometry without blocks, where only rows and columns constrain values.
    #[must_use]
    pub fn latin_square(grid_size: usize) -> Self {
        Self::new(grid_size, |_| None)
    }

    /// Returns the number of rows (and columns, and values).
    #[must_use]
    #[inline]
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Returns the number of cells.
    #[must_use]
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Returns the row-major index of the cell at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is out of range.
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn cell_index(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.grid_size && column < self.grid_size,
            "cell ({row}, {column}) is outside a grid of size {}",
            self.grid_size
        );
        row * self.grid_size + column
    }

    /// Returns the row of a cell.
    #[must_use]
    #[inline]
    pub fn row_of(&self, cell: usize) -> usize {
        cell / self.grid_size
    }

    /// Returns the column of a cell.
    #[must_use]
    #[inline]
    pub fn column_of(&self, cell: usize) -> usize {
        cell % self.grid_size
    }

    /// Returns the block of a cell, if it belongs to one.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is out of range.
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn block_of(&self, cell: usize) -> Option<usize> {
        self.blocks[cell]
    }

    /// Returns the one-based `r{row}c{column}` name of a cell.
    #[must_use]
    pub fn cell_name(&self, cell: usize) -> String {
        format!("r{}c{}", self.row_of(cell) + 1, self.column_of(cell) + 1)
    }
}

impl fmt::Debug for GridType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridType")
            .field("grid_size", &self.grid_size)
            .finish_non_exhaustive()
    }
}

/// Named geometry presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredefinedType {
    /// 4x4 grid with 2x2 blocks.
    Classic4x4,
    /// 6x6 grid with blocks of 2 rows by 3 columns.
    Classic6x6,
    /// The standard 9x9 grid with 3x3 blocks.
    Classic9x9,
    /// A 9x9 grid with irregular blocks.
    Jigsaw1,
}

#[rustfmt::skip]
const JIGSAW_1: [usize; 81] = [
    0, 0, 0, 1, 2, 2, 2, 2, 2,
    0, 0, 0, 1, 1, 1, 2, 2, 2,
    0, 3, 3, 3, 3, 1, 1, 1, 2,
    0, 0, 3, 4, 4, 4, 4, 1, 1,
    3, 3, 3, 3, 4, 5, 5, 5, 5,
    6, 6, 4, 4, 4, 4, 5, 7, 7,
    8, 6, 6, 6, 5, 5, 5, 5, 7,
    8, 8, 8, 6, 6, 6, 7, 7, 7,
    8, 8, 8, 8, 8, 6, 7, 7, 7,
];

impl PredefinedType {
    /// All presets.
    pub const ALL: [Self; 4] = [
        Self::Classic4x4,
        Self::Classic6x6,
        Self::Classic9x9,
        Self::Jigsaw1,
    ];

    /// Builds the geometry of this preset.
    #[must_use]
    pub fn grid_type(self) -> GridType {
        match self {
            Self::Classic4x4 => GridType::regular(4, 2, 2),
            Self::Classic6x6 => GridType::regular(6, 2, 3),
            Self::Classic9x9 => GridType::regular(9, 3, 3),
            Self::Jigsaw1 => GridType::from_block_map(9, &JIGSAW_1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_sizes(grid_type: &GridType) -> Vec<usize> {
        let mut sizes = vec![0; grid_type.grid_size()];
        for cell in 0..grid_type.cell_count() {
            sizes[grid_type.block_of(cell).unwrap()] += 1;
        }
        sizes
    }

    #[test]
    fn test_presets_have_full_blocks() {
        for preset in PredefinedType::ALL {
            let grid_type = preset.grid_type();
            let size = grid_type.grid_size();
            assert_eq!(block_sizes(&grid_type), vec![size; size], "{preset:?}");
        }
    }

    #[test]
    fn test_classic_6x6_layout() {
        let grid_type = PredefinedType::Classic6x6.grid_type();
        let first_rows: Vec<_> = (0..12).map(|c| grid_type.block_of(c).unwrap()).collect();
        assert_eq!(first_rows, [0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1]);
        assert_eq!(grid_type.block_of(grid_type.cell_index(2, 3)), Some(3));
        assert_eq!(grid_type.block_of(grid_type.cell_index(5, 0)), Some(4));
    }

    #[test]
    fn test_jigsaw_layout() {
        let grid_type = PredefinedType::Jigsaw1.grid_type();
        assert_eq!(grid_type.block_of(3), Some(1));
        assert_eq!(grid_type.block_of(grid_type.cell_index(8, 5)), Some(6));
    }

    #[test]
    fn test_latin_square_has_no_blocks() {
        let grid_type = GridType::latin_square(5);
        assert!((0..25).all(|cell| grid_type.block_of(cell).is_none()));
    }

    #[test]
    fn test_equality_compares_layout() {
        assert_eq!(
            PredefinedType::Classic9x9.grid_type(),
            GridType::regular(9, 3, 3)
        );
        assert_ne!(
            PredefinedType::Classic9x9.grid_type(),
            PredefinedType::Jigsaw1.grid_type()
        );
    }

    #[test]
    #[should_panic(expected = "cannot tile")]
    fn test_regular_rejects_bad_blocks() {
        let _ = GridType::regular(6, 2, 2);
    }
}
