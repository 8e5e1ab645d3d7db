use std::ops::ControlFlow;

use hintgrid_core::Grid;

use super::emit::Emitter;
use crate::{BoxedHintFinder, HintAggregator, HintFinder, SolvingTechnique};

/// A finder that places the last missing value of a house.
///
/// A "Full House" occurs when every cell of a house but one is assigned; the
/// remaining cell must take the remaining value.
#[derive(Debug, Default, Clone, Copy)]
pub struct FullHouse {}

impl FullHouse {
    /// Creates a new `FullHouse` finder.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl HintFinder for FullHouse {
    fn technique(&self) -> SolvingTechnique {
        SolvingTechnique::FullHouse
    }

    fn clone_box(&self) -> BoxedHintFinder {
        Box::new(*self)
    }

    fn find_hints(&self, grid: &Grid, hints: &mut HintAggregator) -> ControlFlow<()> {
        let mut emit = Emitter::new(grid, hints, self.technique());
        for house in grid.houses() {
            let Some(cell) = grid.unassigned_cells_in(house).as_single() else {
                continue;
            };
            let Some(value) = grid.unassigned_values(house).as_single() else {
                continue;
            };
            emit.place_value(cell, value, grid.house_cells(house))?;
        }
        ControlFlow::Continue(())
    }
}
