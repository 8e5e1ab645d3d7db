use std::fmt;

use crate::CellSet;

/// Two or more peer cells holding the same assigned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Conflict {
    cells: CellSet,
    value: usize,
}

impl Conflict {
    /// Creates a conflict report.
    ///
    /// # Panics
    ///
    /// Panics if `cells` holds fewer than two cells.
    #[must_use]
    #[track_caller]
    pub fn new(cells: CellSet, value: usize) -> Self {
        assert!(
            cells.len() >= 2,
            "a conflict needs at least two cells, got {}",
            cells.len()
        );
        Self { cells, value }
    }

    /// Returns the conflicting cells.
    #[must_use]
    pub fn cells(&self) -> CellSet {
        self.cells
    }

    /// Returns the duplicated value.
    #[must_use]
    pub fn value(&self) -> usize {
        self.value
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value {} repeated in cells {}", self.value, self.cells)
    }
}
