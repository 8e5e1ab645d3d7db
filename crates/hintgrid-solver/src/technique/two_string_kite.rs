use std::ops::ControlFlow;

use hintgrid_core::{CellSet, Grid, HouseKind};

use super::{emit::Emitter, skyscraper::eliminate_from_ends};
use crate::{BoxedHintFinder, HintAggregator, HintFinder, SolvingTechnique};

/// A finder for 2-String Kites.
///
/// A row and a column each hold a value in exactly two cells, and one cell
/// of each shares a block. As with a skyscraper, one of the two remaining
/// ends holds the value.
#[derive(Debug, Clone, Copy)]
pub struct TwoStringKite {}

impl TwoStringKite {
    /// Creates a new finder.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Default for TwoStringKite {
    fn default() -> Self {
        Self::new()
    }
}

impl HintFinder for TwoStringKite {
    fn technique(&self) -> SolvingTechnique {
        SolvingTechnique::TwoStringKite
    }

    fn clone_box(&self) -> BoxedHintFinder {
        Box::new(*self)
    }

    fn find_hints(&self, grid: &Grid, hints: &mut HintAggregator) -> ControlFlow<()> {
        let mut emit = Emitter::new(grid, hints, self.technique());
        for row in grid.houses_of_kind(HouseKind::Row) {
            for value in grid.unassigned_values(row) {
                let first = grid.house_potential_positions(row, value);
                if first.len() != 2 {
                    continue;
                }
                for column in grid.houses_of_kind(HouseKind::Column) {
                    let second = grid.house_potential_positions(column, value);
                    if second.len() != 2 || first.intersects(second) {
                        continue;
                    }
                    let related = grid.house_cells(row) | grid.house_cells(column);
                    let linked = |a: usize, b: usize| {
                        let pair = CellSet::from_bits(grid.cell_count(), [a, b]);
                        grid.single_block(pair).is_some()
                    };
                    eliminate_from_ends(&mut emit, value, first, second, related, linked)?;
                }
            }
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use hintgrid_core::PredefinedType;

    use super::*;
    use crate::testing::FinderTester;

    fn empty() -> FinderTester {
        FinderTester::new(Grid::new(PredefinedType::Classic9x9.grid_type()))
    }

    /// Confines 1 in row 1 to `row_columns` and in column 1 to r3/r8.
    fn kite(row_columns: [usize; 2]) -> FinderTester {
        let mut tester = empty();
        for column in 0..9 {
            if !row_columns.contains(&column) {
                tester = tester.with_exclusions(column, [1]);
            }
        }
        for row in [1, 3, 4, 5, 6, 8] {
            tester = tester.with_exclusions(row * 9, [1]);
        }
        tester
    }

    #[test]
    fn test_two_string_kite() {
        // r1c2 and r3c1 share block 1.
        kite([1, 6])
            .find(&TwoStringKite::new())
            .assert_eliminates_exact(69, [1])
            .assert_untouched(60)
            .assert_untouched(24)
            .assert_hint_count(1);
    }

    #[test]
    fn test_kite_needs_a_shared_block() {
        kite([4, 6]).find(&TwoStringKite::new()).assert_no_hints();
    }
}
