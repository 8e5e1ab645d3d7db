use derive_more::{Display, Error, From};

/// Errors returned by grid mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GridError {
    /// The value is not in `0..=grid_size`.
    #[display("value {value} is out of range for a grid of size {grid_size}")]
    ValueOutOfRange {
        /// The rejected value.
        value: usize,
        /// The grid size.
        grid_size: usize,
    },
    /// The cell holds a given value and cannot be modified.
    #[display("cell {cell} holds a given value and cannot be modified")]
    GivenCell {
        /// The cell index.
        cell: usize,
    },
}

/// Errors returned while loading values into a grid.
///
/// After a load error the grid is left partially loaded and should be discarded.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum LoadError {
    /// The input ended before every cell received a symbol.
    #[display("input ended after {filled} of {expected} cells")]
    #[from(ignore)]
    Exhausted {
        /// Number of cells read.
        filled: usize,
        /// Number of cells in the grid.
        expected: usize,
    },
    /// The input contains a symbol outside the accepted alphabet.
    #[display("invalid character {character:?} at offset {offset}")]
    #[from(ignore)]
    InvalidCharacter {
        /// The rejected character.
        character: char,
        /// Byte offset of the character in the input.
        offset: usize,
    },
    /// Applying a loaded value failed.
    #[display("{_0}")]
    Grid(#[error(source)] GridError),
}
