use std::ops::ControlFlow;

use hintgrid_core::{CellSet, Grid, HouseKind, ValueSet};

use super::{
    cross_kind,
    emit::{Emitter, Pattern},
};
use crate::{BoxedHintFinder, HintAggregator, HintFinder, SolvingTechnique};

/// A finder for skyscrapers.
///
/// Two parallel lines each hold a value in exactly two cells, and one cell of
/// each line shares a crossing line. Those two base cells cannot both hold
/// the value, so one of the two remaining ends does. Any cell seeing both
/// ends loses the value.
#[derive(Debug, Clone, Copy)]
pub struct Skyscraper {}

impl Skyscraper {
    /// Creates a new finder.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Default for Skyscraper {
    fn default() -> Self {
        Self::new()
    }
}

impl HintFinder for Skyscraper {
    fn technique(&self) -> SolvingTechnique {
        SolvingTechnique::Skyscraper
    }

    fn clone_box(&self) -> BoxedHintFinder {
        Box::new(*self)
    }

    fn find_hints(&self, grid: &Grid, hints: &mut HintAggregator) -> ControlFlow<()> {
        let mut emit = Emitter::new(grid, hints, self.technique());
        for kind in [HouseKind::Row, HouseKind::Column] {
            let cross = cross_kind(kind);
            for house in grid.houses_of_kind(kind) {
                for value in grid.unassigned_values(house) {
                    let first = grid.house_potential_positions(house, value);
                    if first.len() != 2 {
                        continue;
                    }
                    for other in grid.houses_after(house) {
                        let second = grid.house_potential_positions(other, value);
                        if second.len() != 2 || first.intersects(second) {
                            continue;
                        }
                        let related = grid.house_cells(house) | grid.house_cells(other);
                        let linked =
                            |a: usize, b: usize| grid.house_of(a, cross) == grid.house_of(b, cross);
                        eliminate_from_ends(&mut emit, value, first, second, related, linked)?;
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }
}

/// Removes `value` from the cells seeing both free ends of two strong links.
///
/// `first` and `second` hold the two positions of each link. For every pair
/// of cells, one per link, for which `linked` holds, the other two cells are
/// the ends.
pub(super) fn eliminate_from_ends<F>(
    emit: &mut Emitter<'_>,
    value: usize,
    first: CellSet,
    second: CellSet,
    related: CellSet,
    linked: F,
) -> ControlFlow<()>
where
    F: Fn(usize, usize) -> bool,
{
    let grid = emit.grid();
    let matching = first | second;
    let values = ValueSet::from_bits(grid.grid_size(), [value]);
    for base1 in first {
        for base2 in second {
            if !linked(base1, base2) {
                continue;
            }
            let (Some(end1), Some(end2)) = (
                first.iter().find(|&c| c != base1),
                second.iter().find(|&c| c != base2),
            ) else {
                continue;
            };
            let affected = (grid.peers(end1) & grid.peers(end2)) - matching;
            let pattern = Pattern::new(matching, values).with_related(related);
            emit.eliminate_values(affected, values, pattern)?;
        }
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use hintgrid_core::PredefinedType;

    use super::*;
    use crate::{Hint, testing::FinderTester};

    fn empty() -> FinderTester {
        FinderTester::new(Grid::new(PredefinedType::Classic9x9.grid_type()))
    }

    fn keep_in_row(mut tester: FinderTester, row: usize, columns: [usize; 2]) -> FinderTester {
        for column in 0..9 {
            if !columns.contains(&column) {
                tester = tester.with_exclusions(row * 9 + column, [1]);
            }
        }
        tester
    }

    #[test]
    fn test_skyscraper_on_rows() {
        // 1 in row 1 at c1/c5 and in row 5 at c1/c4: the base is column 1.
        let tester = keep_in_row(empty(), 0, [0, 4]);
        keep_in_row(tester, 4, [0, 3])
            .find(&Skyscraper::new())
            .assert_eliminates_exact(12, [1])
            .assert_eliminates_exact(21, [1])
            .assert_eliminates_exact(31, [1])
            .assert_eliminates_exact(49, [1])
            .assert_untouched(9)
            .assert_untouched(40)
            .assert_hint_count(1);
    }

    #[test]
    fn test_aligned_lines_only_affect_their_columns() {
        // Both rows hold 1 in the same two columns.
        let tester = keep_in_row(empty(), 0, [0, 4]);
        let tester = keep_in_row(tester, 4, [0, 4])
            .find(&Skyscraper::new())
            .assert_untouched(12)
            .assert_untouched(21);
        // Each pair of ends shares a column; only those columns are affected.
        for hint in tester.hints() {
            let Hint::Elimination(hint) = hint else {
                panic!("expected an elimination");
            };
            for cell in hint.affected_cells() {
                assert!(cell % 9 == 0 || cell % 9 == 4, "unexpected cell {cell}");
            }
        }
    }

    #[test]
    fn test_no_skyscraper_without_strong_links() {
        empty().find(&Skyscraper::new()).assert_no_hints();
    }
}
