use std::{collections::HashSet, ops::ControlFlow};

use hintgrid_core::{CellSet, Grid, ValueSet};

use super::emit::Emitter;
use crate::{BoxedHintFinder, Chain, HintAggregator, HintFinder, LinkType, SolvingTechnique};

/// A finder for remote pairs.
///
/// A chain of bivalue cells with identical candidates, each seeing the next,
/// alternates between the two values. With an even number of cells the ends
/// hold different values, so any cell seeing both ends loses both.
#[derive(Debug, Clone, Copy)]
pub struct RemotePair {}

impl RemotePair {
    /// Creates a new finder.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    fn extend(
        emit: &mut Emitter<'_>,
        chain: &mut Chain,
        visited: &mut HashSet<CellSet>,
        current: usize,
        cell_count: usize,
    ) -> ControlFlow<()> {
        // Reversed chains cover the same cells.
        if visited.contains(&chain.cells()) {
            return ControlFlow::Continue(());
        }
        let grid = emit.grid();
        let pair = grid.possible_values(current);

        if cell_count >= 4 && cell_count % 2 == 0 {
            let affected = (grid.peers(current) & grid.peers(chain.root().cell)) - chain.cells();
            if emit.eliminate_values_by_chain(affected, pair, chain)? {
                visited.insert(chain.cells());
            }
        }

        for next in grid.peers(current) {
            if chain.contains(next) || grid.possible_values(next) != pair {
                continue;
            }
            let linked = chain.last().candidate;
            let Some(other) = (pair - ValueSet::from_bits(grid.grid_size(), [linked])).as_single()
            else {
                continue;
            };
            chain.add_link(LinkType::Weak, next, linked);
            chain.add_link(LinkType::Strong, next, other);
            Self::extend(emit, chain, visited, next, cell_count + 1)?;
            chain.remove_last_link();
            chain.remove_last_link();
        }
        ControlFlow::Continue(())
    }
}

impl Default for RemotePair {
    fn default() -> Self {
        Self::new()
    }
}

impl HintFinder for RemotePair {
    fn technique(&self) -> SolvingTechnique {
        SolvingTechnique::RemotePair
    }

    fn clone_box(&self) -> BoxedHintFinder {
        Box::new(*self)
    }

    fn find_hints(&self, grid: &Grid, hints: &mut HintAggregator) -> ControlFlow<()> {
        let mut emit = Emitter::new(grid, hints, self.technique());
        let mut visited = HashSet::new();
        for cell in grid.unassigned_cells() {
            let Some((first, second)) = grid.possible_values(cell).as_double() else {
                continue;
            };
            let mut chain = Chain::new(grid.grid_size(), cell, first);
            chain.add_link(LinkType::Strong, cell, second);
            Self::extend(&mut emit, &mut chain, &mut visited, cell, 1)?;
        }
        ControlFlow::Continue(())
    }
}
