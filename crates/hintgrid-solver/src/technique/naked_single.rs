use std::ops::ControlFlow;

use hintgrid_core::Grid;

use super::emit::Emitter;
use crate::{BoxedHintFinder, HintAggregator, HintFinder, SolvingTechnique};

/// A finder that places the only remaining candidate of a cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedSingle {}

impl NakedSingle {
    /// Creates a new `NakedSingle` finder.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl HintFinder for NakedSingle {
    fn technique(&self) -> SolvingTechnique {
        SolvingTechnique::NakedSingle
    }

    fn clone_box(&self) -> BoxedHintFinder {
        Box::new(*self)
    }

    fn find_hints(&self, grid: &Grid, hints: &mut HintAggregator) -> ControlFlow<()> {
        let mut emit = Emitter::new(grid, hints, self.technique());
        for cell in grid.unassigned_cells() {
            if let Some(value) = grid.possible_values(cell).as_single() {
                emit.place_value(cell, value, grid.peers(cell))?;
            }
        }
        ControlFlow::Continue(())
    }
}
