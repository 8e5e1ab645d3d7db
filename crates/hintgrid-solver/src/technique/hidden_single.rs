use std::ops::ControlFlow;

use hintgrid_core::Grid;

use super::emit::Emitter;
use crate::{BoxedHintFinder, HintAggregator, HintFinder, SolvingTechnique};

/// A finder that places a value with a single position left in a house.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenSingle {}

impl HiddenSingle {
    /// Creates a new `HiddenSingle` finder.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl HintFinder for HiddenSingle {
    fn technique(&self) -> SolvingTechnique {
        SolvingTechnique::HiddenSingle
    }

    fn clone_box(&self) -> BoxedHintFinder {
        Box::new(*self)
    }

    fn find_hints(&self, grid: &Grid, hints: &mut HintAggregator) -> ControlFlow<()> {
        let mut emit = Emitter::new(grid, hints, self.technique());
        for house in grid.houses() {
            for value in grid.unassigned_values(house) {
                let positions = grid.house_potential_positions(house, value);
                if let Some(cell) = positions.as_single() {
                    emit.place_value(cell, value, grid.house_cells(house))?;
                }
            }
        }
        ControlFlow::Continue(())
    }
}
