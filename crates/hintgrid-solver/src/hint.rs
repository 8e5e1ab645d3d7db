//! Deductions proposed by hint finders.
//!
//! A [`Hint`] is either a placement ([`AssignmentHint`]), a set of candidate
//! eliminations ([`EliminationHint`]) or eliminations backed by a deduction
//! chain ([`ChainEliminationHint`]). Hints only touch a grid when applied.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use hintgrid_core::{CellSet, Grid, GridError, GridType, UpdateMode, ValueSet};

use crate::{Chain, SolvingTechnique};

/// A deduction that can be applied to and reverted from a grid.
///
/// Two hints are equal when they come from the same technique and change the
/// grid the same way; the cells kept for presentation are not compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Hint {
    /// Places a value.
    Assignment(AssignmentHint),
    /// Removes candidates.
    Elimination(EliminationHint),
    /// Removes candidates, justified by a chain.
    ChainElimination(ChainEliminationHint),
}

impl Hint {
    /// Returns the technique that produced the hint.
    #[must_use]
    pub fn technique(&self) -> SolvingTechnique {
        match self {
            Self::Assignment(hint) => hint.technique,
            Self::Elimination(hint) => hint.technique,
            Self::ChainElimination(hint) => hint.elimination.technique,
        }
    }

    /// Returns the geometry of the grid the hint was found on.
    #[must_use]
    pub fn grid_type(&self) -> &GridType {
        match self {
            Self::Assignment(hint) => &hint.grid_type,
            Self::Elimination(hint) => &hint.grid_type,
            Self::ChainElimination(hint) => &hint.elimination.grid_type,
        }
    }

    /// Returns the cells that explain the hint.
    #[must_use]
    pub fn related_cells(&self) -> CellSet {
        match self {
            Self::Assignment(hint) => hint.related_cells,
            Self::Elimination(hint) => hint.related_cells,
            Self::ChainElimination(hint) => hint.elimination.related_cells,
        }
    }

    /// Applies the hint to `grid`.
    ///
    /// # Errors
    ///
    /// Returns an error if a placement targets a given cell.
    pub fn apply(&self, grid: &mut Grid, mode: UpdateMode) -> Result<(), GridError> {
        match self {
            Self::Assignment(hint) => hint.apply(grid, mode)?,
            Self::Elimination(hint) => hint.apply(grid, mode),
            Self::ChainElimination(hint) => hint.elimination.apply(grid, mode),
        }
        Ok(())
    }

    /// Undoes [`Hint::apply`].
    ///
    /// A placement is reverted by clearing the cell; eliminations are lifted
    /// cell by cell.
    ///
    /// # Errors
    ///
    /// Returns an error if a placement targets a given cell.
    pub fn revert(&self, grid: &mut Grid, mode: UpdateMode) -> Result<(), GridError> {
        match self {
            Self::Assignment(hint) => hint.revert(grid, mode)?,
            Self::Elimination(hint) => hint.revert(grid, mode),
            Self::ChainElimination(hint) => hint.elimination.revert(grid, mode),
        }
        Ok(())
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.technique())?;
        match self {
            Self::Assignment(hint) => fmt::Display::fmt(hint, f),
            Self::Elimination(hint) => fmt::Display::fmt(hint, f),
            Self::ChainElimination(hint) => fmt::Display::fmt(hint, f),
        }
    }
}

impl From<AssignmentHint> for Hint {
    fn from(hint: AssignmentHint) -> Self {
        Self::Assignment(hint)
    }
}

impl From<EliminationHint> for Hint {
    fn from(hint: EliminationHint) -> Self {
        Self::Elimination(hint)
    }
}

impl From<ChainEliminationHint> for Hint {
    fn from(hint: ChainEliminationHint) -> Self {
        Self::ChainElimination(hint)
    }
}

/// Places `value` into `cell`.
#[derive(Debug, Clone)]
pub struct AssignmentHint {
    grid_type: GridType,
    technique: SolvingTechnique,
    cell: usize,
    value: usize,
    related_cells: CellSet,
}

impl AssignmentHint {
    /// Creates a placement hint without related cells.
    #[must_use]
    pub fn new(
        grid_type: GridType,
        technique: SolvingTechnique,
        cell: usize,
        value: usize,
    ) -> Self {
        let related_cells = CellSet::new(grid_type.cell_count());
        Self {
            grid_type,
            technique,
            cell,
            value,
            related_cells,
        }
    }

    /// Attaches the cells that explain the placement.
    #[must_use]
    pub fn with_related_cells(mut self, related_cells: CellSet) -> Self {
        self.related_cells = related_cells;
        self
    }

    /// Returns the target cell.
    #[must_use]
    pub fn cell(&self) -> usize {
        self.cell
    }

    /// Returns the value to place.
    #[must_use]
    pub fn value(&self) -> usize {
        self.value
    }

    fn apply(&self, grid: &mut Grid, mode: UpdateMode) -> Result<(), GridError> {
        grid.set_value(self.cell, self.value, mode)
    }

    fn revert(&self, grid: &mut Grid, mode: UpdateMode) -> Result<(), GridError> {
        grid.set_value(self.cell, 0, mode)
    }
}

impl PartialEq for AssignmentHint {
    fn eq(&self, other: &Self) -> bool {
        self.grid_type == other.grid_type
            && self.technique == other.technique
            && self.cell == other.cell
            && self.value == other.value
    }
}

impl Eq for AssignmentHint {}

impl Hash for AssignmentHint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.grid_type.hash(state);
        self.technique.hash(state);
        self.cell.hash(state);
        self.value.hash(state);
    }
}

impl fmt::Display for AssignmentHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.grid_type.cell_name(self.cell), self.value)
    }
}

/// Removes candidate values from a set of cells.
///
/// The `n`-th excluded value set belongs to the `n`-th affected cell in
/// ascending index order.
#[derive(Debug, Clone)]
pub struct EliminationHint {
    grid_type: GridType,
    technique: SolvingTechnique,
    matching_cells: CellSet,
    matching_values: ValueSet,
    related_cells: CellSet,
    affected_cells: CellSet,
    excluded_values: Vec<ValueSet>,
}

impl EliminationHint {
    /// Creates an elimination hint with one excluded value set per affected cell.
    ///
    /// # Panics
    ///
    /// Panics if the number of value sets differs from the number of
    /// affected cells.
    #[must_use]
    #[track_caller]
    pub fn new(
        grid_type: GridType,
        technique: SolvingTechnique,
        affected_cells: CellSet,
        excluded_values: Vec<ValueSet>,
    ) -> Self {
        assert_eq!(
            affected_cells.len(),
            excluded_values.len(),
            "an elimination hint needs one excluded value set per affected cell"
        );
        let cells = CellSet::new(grid_type.cell_count());
        let values = ValueSet::new(grid_type.grid_size());
        Self {
            grid_type,
            technique,
            matching_cells: cells,
            matching_values: values,
            related_cells: cells,
            affected_cells,
            excluded_values,
        }
    }

    /// Creates an elimination hint removing the same values from every affected cell.
    #[must_use]
    pub fn uniform(
        grid_type: GridType,
        technique: SolvingTechnique,
        affected_cells: CellSet,
        excluded_values: ValueSet,
    ) -> Self {
        let excluded = vec![excluded_values; affected_cells.len()];
        Self::new(grid_type, technique, affected_cells, excluded)
    }

    /// Attaches the pattern that licenses the elimination.
    #[must_use]
    pub fn with_matching(mut self, cells: CellSet, values: ValueSet) -> Self {
        self.matching_cells = cells;
        self.matching_values = values;
        self
    }

    /// Attaches the cells that explain the elimination.
    #[must_use]
    pub fn with_related_cells(mut self, related_cells: CellSet) -> Self {
        self.related_cells = related_cells;
        self
    }

    /// Returns the cells forming the pattern.
    #[must_use]
    pub fn matching_cells(&self) -> CellSet {
        self.matching_cells
    }

    /// Returns the values forming the pattern.
    #[must_use]
    pub fn matching_values(&self) -> ValueSet {
        self.matching_values
    }

    /// Returns the cells losing candidates.
    #[must_use]
    pub fn affected_cells(&self) -> CellSet {
        self.affected_cells
    }

    /// Returns the removed values, parallel to [`affected_cells`](Self::affected_cells).
    #[must_use]
    pub fn excluded_values(&self) -> &[ValueSet] {
        &self.excluded_values
    }

    /// Iterates over `(cell, removed values)` pairs.
    pub fn eliminations(&self) -> impl Iterator<Item = (usize, ValueSet)> + '_ {
        self.affected_cells
            .iter()
            .zip(self.excluded_values.iter().copied())
    }

    fn apply(&self, grid: &mut Grid, mode: UpdateMode) {
        for (cell, values) in self.eliminations() {
            grid.exclude_possible_values(cell, values, mode);
        }
    }

    fn revert(&self, grid: &mut Grid, mode: UpdateMode) {
        for (cell, values) in self.eliminations() {
            grid.remove_excluded_possible_values(cell, values, mode);
        }
    }

    fn fmt_eliminations(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (cell, values)) in self.eliminations().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}<>{values}", self.grid_type.cell_name(cell))?;
        }
        Ok(())
    }
}

impl PartialEq for EliminationHint {
    fn eq(&self, other: &Self) -> bool {
        self.grid_type == other.grid_type
            && self.technique == other.technique
            && self.affected_cells == other.affected_cells
            && self.excluded_values == other.excluded_values
    }
}

impl Eq for EliminationHint {}

impl Hash for EliminationHint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.grid_type.hash(state);
        self.technique.hash(state);
        self.affected_cells.hash(state);
        self.excluded_values.hash(state);
    }
}

impl fmt::Display for EliminationHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.matching_cells.is_empty() {
            write!(f, "{} in ", self.matching_values)?;
            for (i, cell) in self.matching_cells.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(&self.grid_type.cell_name(cell))?;
            }
            f.write_str(" => ")?;
        }
        self.fmt_eliminations(f)
    }
}

/// An elimination justified by a deduction chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainEliminationHint {
    elimination: EliminationHint,
    chain: Chain,
}

impl ChainEliminationHint {
    /// Wraps an elimination together with the chain that proves it.
    #[must_use]
    pub fn new(elimination: EliminationHint, chain: Chain) -> Self {
        Self { elimination, chain }
    }

    /// Returns the underlying elimination.
    #[must_use]
    pub fn elimination(&self) -> &EliminationHint {
        &self.elimination
    }

    /// Returns the chain.
    #[must_use]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }
}

impl fmt::Display for ChainEliminationHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => ", self.chain)?;
        self.elimination.fmt_eliminations(f)
    }
}
