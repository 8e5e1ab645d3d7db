use std::ops::ControlFlow;

use hintgrid_core::{Grid, HouseKind, ValueSet};

use super::emit::{Emitter, Pattern};
use crate::{BoxedHintFinder, HintAggregator, HintFinder, SolvingTechnique};

/// A finder for candidates locked into the intersection of a block and a line.
///
/// - **Pointing**: the positions of a value inside a block lie in a single
///   row or column. The value is removed from the rest of that line.
/// - **Claiming**: the positions of a value inside a row or column lie in a
///   single block. The value is removed from the rest of that block.
#[derive(Debug, Clone, Copy)]
pub struct LockedCandidates {
    claiming: bool,
}

impl LockedCandidates {
    /// Creates a finder for the pointing variant.
    #[must_use]
    pub const fn pointing() -> Self {
        Self { claiming: false }
    }

    /// Creates a finder for the claiming variant.
    #[must_use]
    pub const fn claiming() -> Self {
        Self { claiming: true }
    }
}

impl HintFinder for LockedCandidates {
    fn technique(&self) -> SolvingTechnique {
        if self.claiming {
            SolvingTechnique::LockedCandidatesClaiming
        } else {
            SolvingTechnique::LockedCandidatesPointing
        }
    }

    fn clone_box(&self) -> BoxedHintFinder {
        Box::new(*self)
    }

    fn find_hints(&self, grid: &Grid, hints: &mut HintAggregator) -> ControlFlow<()> {
        let mut emit = Emitter::new(grid, hints, self.technique());
        let (sources, targets): (&[HouseKind], &[HouseKind]) = if self.claiming {
            (&[HouseKind::Row, HouseKind::Column], &[HouseKind::Block])
        } else {
            (&[HouseKind::Block], &[HouseKind::Row, HouseKind::Column])
        };

        for &kind in sources {
            for house in grid.houses_of_kind(kind) {
                let house_cells = grid.house_cells(house);
                for value in grid.unassigned_values(house) {
                    let positions = grid.house_potential_positions(house, value);
                    if positions.len() <= 1 {
                        continue;
                    }
                    for &target in targets {
                        let Some(line) = grid.single_house(positions, target) else {
                            continue;
                        };
                        let values = ValueSet::from_bits(grid.grid_size(), [value]);
                        let pattern = Pattern::new(positions, values)
                            .with_related(house_cells | grid.house_cells(line));
                        emit.eliminate_value_from_house(line, house_cells, value, pattern)?;
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use hintgrid_core::{GridType, PredefinedType};

    use super::*;
    use crate::testing::FinderTester;

    fn empty() -> FinderTester {
        FinderTester::new(Grid::new(PredefinedType::Classic9x9.grid_type()))
    }

    #[test]
    fn test_pointing_eliminates_from_row() {
        // 1 in block 1 is confined to row 1.
        let mut tester = empty();
        for cell in [9, 10, 11, 18, 19, 20] {
            tester = tester.with_exclusions(cell, [1]);
        }
        let tester = tester.find(&LockedCandidates::pointing()).assert_hint_count(1);
        let tester = (3..9).fold(tester, |t, cell| t.assert_eliminates_exact(cell, [1]));
        tester.assert_untouched(0).assert_untouched(12);
    }

    #[test]
    fn test_claiming_eliminates_from_block() {
        // 1 in row 1 is confined to block 1.
        let mut tester = empty();
        for cell in 3..9 {
            tester = tester.with_exclusions(cell, [1]);
        }
        let tester = tester.find(&LockedCandidates::claiming()).assert_hint_count(1);
        let tester = [9, 10, 11, 18, 19, 20]
            .into_iter()
            .fold(tester, |t, cell| t.assert_eliminates_exact(cell, [1]));
        tester.assert_untouched(1).assert_untouched(27);
    }

    #[test]
    fn test_latin_square_has_no_block_eliminations() {
        FinderTester::new(Grid::new(GridType::latin_square(4)))
            .with_exclusions(0, [1])
            .find(&LockedCandidates::pointing())
            .assert_no_hints()
            .find(&LockedCandidates::claiming())
            .assert_no_hints();
    }
}
