use std::ops::ControlFlow;

use hintgrid_core::{CellSet, Grid, House, HouseKind, ValueSet};

use super::emit::{Emitter, Pattern};
use crate::{BoxedHintFinder, HintAggregator, HintFinder, SolvingTechnique};

/// A finder for naked subsets: `N` cells of a house whose candidates together
/// are exactly `N` values.
///
/// Those values must occupy the subset cells, so they are removed from every
/// other cell of the house.
///
/// The *locked* variants only search blocks and require the subset to also
/// lie in a single row or column; the values are then removed from the rest
/// of the block and of that line.
#[derive(Debug, Clone, Copy)]
pub struct NakedSubset {
    size: usize,
    locked: bool,
}

impl NakedSubset {
    /// Creates a finder for naked pairs.
    #[must_use]
    pub const fn pair() -> Self {
        Self {
            size: 2,
            locked: false,
        }
    }

    /// Creates a finder for naked triples.
    #[must_use]
    pub const fn triple() -> Self {
        Self {
            size: 3,
            locked: false,
        }
    }

    /// Creates a finder for naked quadruples.
    #[must_use]
    pub const fn quadruple() -> Self {
        Self {
            size: 4,
            locked: false,
        }
    }

    /// Creates a finder for locked pairs.
    #[must_use]
    pub const fn locked_pair() -> Self {
        Self {
            size: 2,
            locked: true,
        }
    }

    /// Creates a finder for locked triples.
    #[must_use]
    pub const fn locked_triple() -> Self {
        Self {
            size: 3,
            locked: true,
        }
    }

    fn extend(
        &self,
        emit: &mut Emitter<'_>,
        house: House,
        pool: CellSet,
        chosen: CellSet,
        values: ValueSet,
        start: usize,
    ) -> ControlFlow<()> {
        let grid = emit.grid();
        for cell in pool.iter_from(start) {
            let values = values | grid.possible_values(cell);
            if values.len() > self.size {
                continue;
            }
            let mut chosen = chosen;
            chosen.insert(cell);
            if chosen.len() < self.size {
                self.extend(emit, house, pool, chosen, values, cell + 1)?;
            } else if values.len() == self.size {
                self.eliminate(emit, house, chosen, values)?;
            }
        }
        ControlFlow::Continue(())
    }

    fn eliminate(
        &self,
        emit: &mut Emitter<'_>,
        house: House,
        chosen: CellSet,
        values: ValueSet,
    ) -> ControlFlow<()> {
        let grid = emit.grid();
        let mut region = grid.house_cells(house);
        if self.locked {
            let line = grid
                .single_row(chosen)
                .or_else(|| grid.single_column(chosen));
            let Some(line) = line else {
                return ControlFlow::Continue(());
            };
            region |= grid.house_cells(line);
        }
        let pattern = Pattern::new(chosen, values).with_related(region);
        emit.eliminate_values(region - chosen, values, pattern)?;
        ControlFlow::Continue(())
    }
}

impl HintFinder for NakedSubset {
    fn technique(&self) -> SolvingTechnique {
        match (self.locked, self.size) {
            (true, 2) => SolvingTechnique::LockedPair,
            (true, _) => SolvingTechnique::LockedTriple,
            (false, 2) => SolvingTechnique::NakedPair,
            (false, 3) => SolvingTechnique::NakedTriple,
            (false, _) => SolvingTechnique::NakedQuadruple,
        }
    }

    fn clone_box(&self) -> BoxedHintFinder {
        Box::new(*self)
    }

    fn find_hints(&self, grid: &Grid, hints: &mut HintAggregator) -> ControlFlow<()> {
        let mut emit = Emitter::new(grid, hints, self.technique());
        // Blocks first: they yield the widest eliminations.
        let kinds: &[HouseKind] = if self.locked {
            &[HouseKind::Block]
        } else {
            &[HouseKind::Block, HouseKind::Row, HouseKind::Column]
        };
        for &kind in kinds {
            for house in grid.houses_of_kind(kind) {
                let pool = grid.unassigned_cells_in(house);
                if pool.len() < self.size {
                    continue;
                }
                let chosen = CellSet::new(grid.cell_count());
                let values = ValueSet::new(grid.grid_size());
                self.extend(&mut emit, house, pool, chosen, values, 0)?;
            }
        }
        ControlFlow::Continue(())
    }
}
