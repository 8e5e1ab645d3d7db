use std::{collections::HashSet, ops::ControlFlow};

use hintgrid_core::{CellSet, Grid, ValueSet};

use super::emit::Emitter;
use crate::{BoxedHintFinder, Chain, HintAggregator, HintFinder, LinkType, SolvingTechnique};

/// Default upper bound on the number of cells in a chain.
pub const DEFAULT_MAX_CHAIN_LENGTH: usize = 12;

/// A finder for X-Chains: alternating strong and weak links of one value.
///
/// A strong link joins the only two positions of a value in a house; a weak
/// link joins any two positions sharing a house. A chain that starts and
/// ends with a strong link forces the value into one of its ends, so cells
/// seeing both ends lose it.
///
/// Chain length is bounded by [`XChain::with_max_length`]. A weak link is
/// only followed into a cell that can continue with a strong link.
#[derive(Debug, Clone, Copy)]
pub struct XChain {
    max_length: usize,
}

impl XChain {
    /// Creates a finder for chains of up to [`DEFAULT_MAX_CHAIN_LENGTH`] cells.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_length: DEFAULT_MAX_CHAIN_LENGTH,
        }
    }

    /// Sets the maximum number of cells in a chain.
    #[must_use]
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    fn extend(
        &self,
        emit: &mut Emitter<'_>,
        chain: &mut Chain,
        visited: &mut HashSet<CellSet>,
        current: usize,
    ) -> ControlFlow<()> {
        if visited.contains(&chain.cells()) {
            return ControlFlow::Continue(());
        }
        let grid = emit.grid();
        let value = chain.last().candidate;

        if chain.len() >= 4 && chain.last_link_type() == Some(LinkType::Strong) {
            let affected = (grid.peers(current) & grid.peers(chain.root().cell)) - chain.cells();
            let values = ValueSet::from_bits(grid.grid_size(), [value]);
            if emit.eliminate_values_by_chain(affected, values, chain)? {
                visited.insert(chain.cells());
            }
        }
        if chain.len() >= self.max_length {
            return ControlFlow::Continue(());
        }

        let next_link = chain
            .last_link_type()
            .map_or(LinkType::Strong, LinkType::opposite);
        for house in grid.houses_of(current) {
            let positions = grid.house_potential_positions(house, value);
            if positions.len() <= 1 {
                continue;
            }
            // A strong link may serve as a weak one, never the reverse.
            let available = if positions.len() == 2 {
                LinkType::Strong
            } else {
                LinkType::Weak
            };
            if available < next_link {
                continue;
            }
            for next in positions {
                if chain.contains(next) {
                    continue;
                }
                if next_link == LinkType::Weak && !has_strong_link(grid, next, value) {
                    continue;
                }
                chain.add_link(next_link, next, value);
                self.extend(emit, chain, visited, next)?;
                chain.remove_last_link();
            }
        }
        ControlFlow::Continue(())
    }
}

fn has_strong_link(grid: &Grid, cell: usize, value: usize) -> bool {
    grid.houses_of(cell)
        .any(|house| grid.house_potential_positions(house, value).len() == 2)
}

impl Default for XChain {
    fn default() -> Self {
        Self::new()
    }
}

impl HintFinder for XChain {
    fn technique(&self) -> SolvingTechnique {
        SolvingTechnique::XChain
    }

    fn clone_box(&self) -> BoxedHintFinder {
        Box::new(*self)
    }

    fn find_hints(&self, grid: &Grid, hints: &mut HintAggregator) -> ControlFlow<()> {
        let mut emit = Emitter::new(grid, hints, self.technique());
        let mut visited = HashSet::new();
        for cell in grid.unassigned_cells() {
            for value in grid.possible_values(cell) {
                let mut chain = Chain::new(grid.grid_size(), cell, value);
                self.extend(&mut emit, &mut chain, &mut visited, cell)?;
            }
        }
        ControlFlow::Continue(())
    }
}
