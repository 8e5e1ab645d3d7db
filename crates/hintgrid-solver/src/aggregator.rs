use std::{collections::HashSet, ops::ControlFlow};

use hintgrid_core::{Grid, GridError, UpdateMode};

use crate::Hint;

/// An insertion-ordered, deduplicating collection of hints.
///
/// An aggregator may be capped; once the cap is reached [`add`](Self::add)
/// returns [`ControlFlow::Break`] so finders can stop scanning.
///
/// # Examples
///
/// ```
/// use std::ops::ControlFlow;
///
/// use hintgrid_core::PredefinedType;
/// use hintgrid_solver::{AssignmentHint, HintAggregator, SolvingTechnique};
///
/// let grid_type = PredefinedType::Classic9x9.grid_type();
/// let hint = AssignmentHint::new(grid_type, SolvingTechnique::NakedSingle, 0, 1);
///
/// let mut hints = HintAggregator::single();
/// assert!(hints.add(hint.clone().into()).is_break());
/// assert!(hints.add(hint.into()).is_break());
/// assert_eq!(hints.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HintAggregator {
    hints: Vec<Hint>,
    seen: HashSet<Hint>,
    limit: Option<usize>,
}

impl HintAggregator {
    /// Creates an aggregator without a cap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an aggregator that stops after the first hint.
    #[must_use]
    pub fn single() -> Self {
        Self {
            limit: Some(1),
            ..Self::default()
        }
    }

    /// Returns `true` if no more hints are accepted.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.hints.len() >= limit)
    }

    /// Adds a hint unless an equal one is already present.
    ///
    /// Returns [`ControlFlow::Break`] once the aggregator is full.
    pub fn add(&mut self, hint: Hint) -> ControlFlow<()> {
        if !self.is_full() && !self.seen.contains(&hint) {
            self.seen.insert(hint.clone());
            self.hints.push(hint);
        }
        if self.is_full() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    /// Adds every hint of `other`, keeping the first occurrence of duplicates.
    pub fn append(&mut self, other: Self) {
        for hint in other.hints {
            if self.add(hint).is_break() {
                break;
            }
        }
    }

    /// Applies every hint with deferred updates, then rebuilds the grid state once.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a hint. The grid state is rebuilt
    /// even then.
    pub fn apply_hints(&self, grid: &mut Grid) -> Result<(), GridError> {
        let result = self
            .hints
            .iter()
            .try_for_each(|hint| hint.apply(grid, UpdateMode::Deferred));
        grid.update_state();
        result
    }

    /// Returns the number of hints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    /// Returns `true` if no hint was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    /// Returns the hints in insertion order.
    #[must_use]
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// Returns an iterator over the hints in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Hint> {
        self.hints.iter()
    }

    /// Consumes the aggregator, returning its hints.
    #[must_use]
    pub fn into_vec(self) -> Vec<Hint> {
        self.hints
    }

    /// Drops every hint added after the first `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        for hint in self.hints.drain(len.min(self.hints.len())..) {
            self.seen.remove(&hint);
        }
    }
}

impl IntoIterator for HintAggregator {
    type Item = Hint;
    type IntoIter = std::vec::IntoIter<Hint>;

    fn into_iter(self) -> Self::IntoIter {
        self.hints.into_iter()
    }
}

impl<'a> IntoIterator for &'a HintAggregator {
    type Item = &'a Hint;
    type IntoIter = std::slice::Iter<'a, Hint>;

    fn into_iter(self) -> Self::IntoIter {
        self.hints.iter()
    }
}
