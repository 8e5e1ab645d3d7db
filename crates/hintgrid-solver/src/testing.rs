//! Test utilities for hint finder implementations.
//!
//! [`FinderTester`] loads a grid, optionally narrows candidates, runs a
//! finder and offers fluent assertions over the hints it produced.

use hintgrid_core::{Grid, PredefinedType, UpdateMode, ValueSet};

use crate::{Hint, HintAggregator, HintFinder};

/// A test harness for verifying hint finders.
///
/// All assertion methods panic with detailed messages on failure, using
/// `#[track_caller]` to report the calling test.
#[derive(Debug)]
pub struct FinderTester {
    grid: Grid,
    hints: Vec<Hint>,
}

impl FinderTester {
    /// Creates a tester from an existing grid.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            hints: Vec::new(),
        }
    }

    /// Creates a tester from a preset geometry and a value string.
    ///
    /// # Panics
    ///
    /// Panics if the string cannot be loaded.
    #[track_caller]
    pub fn from_str(preset: PredefinedType, values: &str) -> Self {
        let grid = Grid::from_values(preset.grid_type(), values).unwrap();
        Self::new(grid)
    }

    /// Rules out candidate values of a cell before running a finder.
    #[must_use]
    pub fn with_exclusions<V>(mut self, cell: usize, values: V) -> Self
    where
        V: IntoIterator<Item = usize>,
    {
        let values = ValueSet::from_bits(self.grid.grid_size(), values);
        self.grid
            .exclude_possible_values(cell, values, UpdateMode::Incremental);
        self
    }

    /// Restricts a cell to exactly the given candidates.
    #[must_use]
    pub fn with_candidates<V>(mut self, cell: usize, values: V) -> Self
    where
        V: IntoIterator<Item = usize>,
    {
        let keep = ValueSet::from_bits(self.grid.grid_size(), values);
        let drop = ValueSet::full(self.grid.grid_size()) - keep;
        self.grid
            .exclude_possible_values(cell, drop, UpdateMode::Incremental);
        self
    }

    /// Returns the grid under test.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the hints found by the last call to [`find`](Self::find).
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// Runs `finder` with an unlimited aggregator and records its hints.
    ///
    /// Every hint is checked against the grid: placements must target
    /// unassigned cells holding the value as a candidate, and eliminations
    /// must only remove existing candidates.
    #[track_caller]
    pub fn find<F>(mut self, finder: &F) -> Self
    where
        F: HintFinder + ?Sized,
    {
        let mut hints = HintAggregator::new();
        let _ = finder.find_hints(&self.grid, &mut hints);
        self.hints = hints.into_vec();
        for hint in &self.hints {
            assert_eq!(
                hint.technique(),
                finder.technique(),
                "Expected hints of {}, got {hint}",
                finder.technique()
            );
            self.assert_sound(hint);
        }
        self
    }

    /// Applies every recorded hint to the grid.
    ///
    /// # Panics
    ///
    /// Panics if a hint cannot be applied.
    #[track_caller]
    #[must_use]
    pub fn apply_hints(mut self) -> Self {
        for hint in &self.hints {
            hint.apply(&mut self.grid, UpdateMode::Incremental).unwrap();
        }
        self
    }

    #[track_caller]
    fn assert_sound(&self, hint: &Hint) {
        match hint {
            Hint::Assignment(hint) => {
                let possible = self.grid.possible_values(hint.cell());
                assert!(
                    !self.grid.is_assigned(hint.cell()) && possible.contains(hint.value()),
                    "Expected {hint} to target a cell with the candidate, but candidates are {possible}"
                );
            }
            Hint::Elimination(_) | Hint::ChainElimination(_) => {
                for (cell, values) in eliminations(hint) {
                    let possible = self.grid.possible_values(cell);
                    assert!(
                        !values.is_empty() && values.is_subset(possible),
                        "Expected {hint} to remove existing candidates from cell {cell}, but candidates are {possible}"
                    );
                }
            }
        }
    }

    /// Asserts the number of recorded hints.
    #[track_caller]
    pub fn assert_hint_count(self, expected: usize) -> Self {
        assert_eq!(
            self.hints.len(),
            expected,
            "Expected {expected} hints, found {}: {:#?}",
            self.hints.len(),
            self.descriptions()
        );
        self
    }

    /// Asserts that no hint was recorded.
    #[track_caller]
    pub fn assert_no_hints(self) -> Self {
        assert!(
            self.hints.is_empty(),
            "Expected no hints, found {:#?}",
            self.descriptions()
        );
        self
    }

    /// Asserts that some hint places `value` into `cell`.
    #[track_caller]
    pub fn assert_placement(self, cell: usize, value: usize) -> Self {
        assert!(
            self.placements().any(|p| p == (cell, value)),
            "Expected placement of {value} in cell {cell}, found {:#?}",
            self.descriptions()
        );
        self
    }

    /// Asserts the number of hints placing `value` into `cell`.
    #[track_caller]
    pub fn assert_placement_count(self, cell: usize, value: usize, expected: usize) -> Self {
        let count = self.placements().filter(|&p| p == (cell, value)).count();
        assert_eq!(
            count, expected,
            "Expected {expected} placements of {value} in cell {cell}, found {count}"
        );
        self
    }

    /// Asserts that the hints together remove all of `values` from `cell`.
    #[track_caller]
    pub fn assert_eliminates<V>(self, cell: usize, values: V) -> Self
    where
        V: IntoIterator<Item = usize>,
    {
        let values = ValueSet::from_bits(self.grid.grid_size(), values);
        let removed = self.removed_from(cell);
        assert!(
            values.is_subset(removed),
            "Expected {values} to be removed from cell {cell}, but removed values are {removed}: {:#?}",
            self.descriptions()
        );
        self
    }

    /// Asserts that the hints together remove exactly `values` from `cell`.
    #[track_caller]
    pub fn assert_eliminates_exact<V>(self, cell: usize, values: V) -> Self
    where
        V: IntoIterator<Item = usize>,
    {
        let values = ValueSet::from_bits(self.grid.grid_size(), values);
        let removed = self.removed_from(cell);
        assert_eq!(
            removed, values,
            "Expected exactly {values} to be removed from cell {cell}, but removed values are {removed}"
        );
        self
    }

    /// Asserts that no hint touches `cell`.
    #[track_caller]
    pub fn assert_untouched(self, cell: usize) -> Self {
        let removed = self.removed_from(cell);
        assert!(
            removed.is_empty() && !self.placements().any(|(c, _)| c == cell),
            "Expected cell {cell} to be untouched, but hints are {:#?}",
            self.descriptions()
        );
        self
    }

    fn placements(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.hints.iter().filter_map(|hint| match hint {
            Hint::Assignment(hint) => Some((hint.cell(), hint.value())),
            _ => None,
        })
    }

    fn removed_from(&self, cell: usize) -> ValueSet {
        let mut removed = ValueSet::new(self.grid.grid_size());
        for hint in &self.hints {
            for (c, values) in eliminations(hint) {
                if c == cell {
                    removed |= values;
                }
            }
        }
        removed
    }

    fn descriptions(&self) -> Vec<String> {
        self.hints.iter().map(ToString::to_string).collect()
    }
}

fn eliminations(hint: &Hint) -> Vec<(usize, ValueSet)> {
    match hint {
        Hint::Assignment(_) => Vec::new(),
        Hint::Elimination(hint) => hint.eliminations().collect(),
        Hint::ChainElimination(hint) => hint.elimination().eliminations().collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use super::*;
    use crate::{BoxedHintFinder, SolvingTechnique};

    #[derive(Debug, Clone, Copy)]
    struct NoOpFinder;

    impl HintFinder for NoOpFinder {
        fn technique(&self) -> SolvingTechnique {
            SolvingTechnique::NakedSingle
        }

        fn clone_box(&self) -> BoxedHintFinder {
            Box::new(*self)
        }

        fn find_hints(&self, _grid: &Grid, _hints: &mut HintAggregator) -> ControlFlow<()> {
            ControlFlow::Continue(())
        }
    }

    #[test]
    fn test_no_op_finder_has_no_hints() {
        FinderTester::from_str(PredefinedType::Classic4x4, "1...............")
            .find(&NoOpFinder)
            .assert_no_hints()
            .assert_untouched(1);
    }

    #[test]
    fn test_with_candidates_narrows_cell() {
        let tester = FinderTester::from_str(PredefinedType::Classic4x4, "................")
            .with_candidates(0, [2, 3]);
        assert_eq!(
            tester.grid().possible_values(0),
            ValueSet::from_bits(4, [2, 3])
        );
    }

    #[test]
    #[should_panic(expected = "Expected no hints")]
    fn test_assert_no_hints_fails_on_hints() {
        FinderTester::from_str(PredefinedType::Classic4x4, "123.............")
            .find(&crate::technique::FullHouse::new())
            .assert_no_hints();
    }
}
