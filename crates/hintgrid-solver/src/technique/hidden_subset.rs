use std::ops::ControlFlow;

use hintgrid_core::{CellSet, Grid, House, ValueSet};

use super::emit::{Emitter, Pattern};
use crate::{BoxedHintFinder, HintAggregator, HintFinder, SolvingTechnique};

/// A finder for hidden subsets: `N` values of a house whose positions
/// together are exactly `N` cells.
///
/// Those cells must hold the values, so every other candidate is removed
/// from them.
#[derive(Debug, Clone, Copy)]
pub struct HiddenSubset {
    size: usize,
}

impl HiddenSubset {
    /// Creates a finder for hidden pairs.
    #[must_use]
    pub const fn pair() -> Self {
        Self { size: 2 }
    }

    /// Creates a finder for hidden triples.
    #[must_use]
    pub const fn triple() -> Self {
        Self { size: 3 }
    }

    /// Creates a finder for hidden quadruples.
    #[must_use]
    pub const fn quadruple() -> Self {
        Self { size: 4 }
    }

    fn extend(
        &self,
        emit: &mut Emitter<'_>,
        house: House,
        pool: ValueSet,
        chosen: ValueSet,
        positions: CellSet,
        start: usize,
    ) -> ControlFlow<()> {
        let grid = emit.grid();
        for value in pool.iter_from(start) {
            let positions = positions | grid.house_potential_positions(house, value);
            if positions.len() > self.size {
                continue;
            }
            let mut chosen = chosen;
            chosen.insert(value);
            if chosen.len() < self.size {
                self.extend(emit, house, pool, chosen, positions, value + 1)?;
            } else if positions.len() == self.size {
                let pattern =
                    Pattern::new(positions, chosen).with_related(grid.house_cells(house));
                emit.eliminate_values_not_in(positions, chosen, pattern)?;
            }
        }
        ControlFlow::Continue(())
    }
}

impl HintFinder for HiddenSubset {
    fn technique(&self) -> SolvingTechnique {
        match self.size {
            2 => SolvingTechnique::HiddenPair,
            3 => SolvingTechnique::HiddenTriple,
            _ => SolvingTechnique::HiddenQuadruple,
        }
    }

    fn clone_box(&self) -> BoxedHintFinder {
        Box::new(*self)
    }

    fn find_hints(&self, grid: &Grid, hints: &mut HintAggregator) -> ControlFlow<()> {
        let mut emit = Emitter::new(grid, hints, self.technique());
        for house in grid.houses() {
            let mut pool = grid.unassigned_values(house);
            for value in pool {
                // A value without positions means the grid is broken; it
                // must not pad a subset.
                if grid.house_potential_positions(house, value).is_empty() {
                    pool.remove(value);
                }
            }
            if pool.len() <= self.size {
                continue;
            }
            let chosen = ValueSet::new(grid.grid_size());
            let positions = CellSet::new(grid.cell_count());
            self.extend(&mut emit, house, pool, chosen, positions, 1)?;
        }
        ControlFlow::Continue(())
    }
}
