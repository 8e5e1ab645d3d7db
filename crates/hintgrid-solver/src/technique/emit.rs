//! Shared helpers turning finder results into hints.

use std::ops::ControlFlow;

use hintgrid_core::{CellSet, Grid, House, ValueSet};

use crate::{
    AssignmentHint, Chain, ChainEliminationHint, EliminationHint, HintAggregator,
    SolvingTechnique,
};

/// The cells and values forming a pattern, plus the cells shown as context.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pattern {
    cells: CellSet,
    values: ValueSet,
    related: CellSet,
}

impl Pattern {
    pub(crate) fn new(cells: CellSet, values: ValueSet) -> Self {
        Self {
            cells,
            values,
            related: cells,
        }
    }

    pub(crate) fn with_related(mut self, related: CellSet) -> Self {
        self.related = related;
        self
    }
}

/// Emits hints for one technique into an aggregator.
#[derive(Debug)]
pub(crate) struct Emitter<'a> {
    grid: &'a Grid,
    hints: &'a mut HintAggregator,
    technique: SolvingTechnique,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(
        grid: &'a Grid,
        hints: &'a mut HintAggregator,
        technique: SolvingTechnique,
    ) -> Self {
        Self {
            grid,
            hints,
            technique,
        }
    }

    pub(crate) fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Places `value` into `cell`.
    pub(crate) fn place_value(
        &mut self,
        cell: usize,
        value: usize,
        related: CellSet,
    ) -> ControlFlow<()> {
        let hint = AssignmentHint::new(self.grid.grid_type().clone(), self.technique, cell, value)
            .with_related_cells(related);
        self.hints.add(hint.into())
    }

    /// Removes `value` from the cells of `house` outside `except`.
    pub(crate) fn eliminate_value_from_house(
        &mut self,
        house: House,
        except: CellSet,
        value: usize,
        pattern: Pattern,
    ) -> ControlFlow<(), bool> {
        let cells = self.grid.house_cells(house) - except;
        let values = ValueSet::from_bits(self.grid.grid_size(), [value]);
        self.eliminate_values(cells, values, pattern)
    }

    /// Removes every candidate outside `allowed` from `cells`.
    pub(crate) fn eliminate_values_not_in(
        &mut self,
        cells: CellSet,
        allowed: ValueSet,
        pattern: Pattern,
    ) -> ControlFlow<(), bool> {
        match self.collect(cells, |possible| possible - allowed) {
            Some(hint) => self.emit(hint, pattern),
            None => ControlFlow::Continue(false),
        }
    }

    /// Removes the candidates in `values` from `cells`.
    pub(crate) fn eliminate_values(
        &mut self,
        cells: CellSet,
        values: ValueSet,
        pattern: Pattern,
    ) -> ControlFlow<(), bool> {
        match self.collect(cells, |possible| possible & values) {
            Some(hint) => self.emit(hint, pattern),
            None => ControlFlow::Continue(false),
        }
    }

    /// Removes the candidates in `values` from `cells`, justified by `chain`.
    pub(crate) fn eliminate_values_by_chain(
        &mut self,
        cells: CellSet,
        values: ValueSet,
        chain: &Chain,
    ) -> ControlFlow<(), bool> {
        let Some(hint) = self.collect(cells, |possible| possible & values) else {
            return ControlFlow::Continue(false);
        };
        let hint = hint
            .with_matching(chain.cells(), values)
            .with_related_cells(chain.cells() | cells);
        self.hints
            .add(ChainEliminationHint::new(hint, chain.clone()).into())?;
        ControlFlow::Continue(true)
    }

    fn collect<F>(&self, cells: CellSet, mut excluded: F) -> Option<EliminationHint>
    where
        F: FnMut(ValueSet) -> ValueSet,
    {
        let mut affected = CellSet::new(self.grid.cell_count());
        let mut values = Vec::new();
        for cell in cells {
            if self.grid.is_assigned(cell) {
                continue;
            }
            let removed = excluded(self.grid.possible_values(cell));
            if !removed.is_empty() {
                affected.insert(cell);
                values.push(removed);
            }
        }
        (!affected.is_empty()).then(|| {
            EliminationHint::new(
                self.grid.grid_type().clone(),
                self.technique,
                affected,
                values,
            )
        })
    }

    fn emit(&mut self, hint: EliminationHint, pattern: Pattern) -> ControlFlow<(), bool> {
        let hint = hint
            .with_matching(pattern.cells, pattern.values)
            .with_related_cells(pattern.related);
        self.hints.add(hint.into())?;
        ControlFlow::Continue(true)
    }
}
