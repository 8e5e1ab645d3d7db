use std::ops::ControlFlow;

use hintgrid_core::{CellSet, Grid, House, HouseKind, HouseSet, ValueSet};
use tinyvec::ArrayVec;

use super::{
    cross_kind,
    emit::{Emitter, Pattern},
};
use crate::{BoxedHintFinder, HintAggregator, HintFinder, SolvingTechnique};

/// Base lines chosen so far; fish never exceed size four.
type BaseLines = ArrayVec<[usize; 4]>;

/// A finder for basic fish: X-Wing, Swordfish and Jellyfish.
///
/// Choose `N` rows (the base set) in which a value is confined to the same
/// `N` columns (the cover set). The value then occupies those columns only
/// within the base rows, so it is removed from the rest of the cover
/// columns. The same holds with rows and columns swapped.
#[derive(Debug, Clone, Copy)]
pub struct BasicFish {
    size: usize,
}

impl BasicFish {
    /// Creates a finder for X-Wings (size 2).
    #[must_use]
    pub const fn x_wing() -> Self {
        Self { size: 2 }
    }

    /// Creates a finder for Swordfish (size 3).
    #[must_use]
    pub const fn swordfish() -> Self {
        Self { size: 3 }
    }

    /// Creates a finder for Jellyfish (size 4).
    #[must_use]
    pub const fn jellyfish() -> Self {
        Self { size: 4 }
    }

    #[expect(clippy::too_many_arguments)]
    fn extend(
        &self,
        emit: &mut Emitter<'_>,
        base_kind: HouseKind,
        value: usize,
        candidates: HouseSet,
        bases: &mut BaseLines,
        cover: HouseSet,
        start: usize,
    ) -> ControlFlow<()> {
        let grid = emit.grid();
        let cover_kind = cross_kind(base_kind);
        for line in candidates.iter_from(start) {
            let positions = grid.house_potential_positions(House::new(base_kind, line), value);
            let cover = cover | grid.regions_of(positions, cover_kind);
            if cover.len() > self.size {
                continue;
            }
            bases.push(line);
            if bases.len() < self.size {
                self.extend(emit, base_kind, value, candidates, bases, cover, line + 1)?;
            } else if cover.len() == self.size {
                self.eliminate(emit, base_kind, value, bases, cover)?;
            }
            bases.pop();
        }
        ControlFlow::Continue(())
    }

    fn eliminate(
        &self,
        emit: &mut Emitter<'_>,
        base_kind: HouseKind,
        value: usize,
        bases: &BaseLines,
        cover: HouseSet,
    ) -> ControlFlow<()> {
        let grid = emit.grid();
        let base_cells = lines_cells(grid, base_kind, bases.iter().copied());
        let cover_cells = lines_cells(grid, cross_kind(base_kind), cover);

        let values = ValueSet::from_bits(grid.grid_size(), [value]);
        let matching = base_cells & cover_cells & grid.potential_positions(value);
        let pattern = Pattern::new(matching, values).with_related(base_cells | cover_cells);
        emit.eliminate_values(cover_cells - base_cells, values, pattern)?;
        ControlFlow::Continue(())
    }
}

fn lines_cells<I>(grid: &Grid, kind: HouseKind, lines: I) -> CellSet
where
    I: IntoIterator<Item = usize>,
{
    lines
        .into_iter()
        .fold(CellSet::new(grid.cell_count()), |cells, line| {
            cells | grid.house_cells(House::new(kind, line))
        })
}

impl HintFinder for BasicFish {
    fn technique(&self) -> SolvingTechnique {
        match self.size {
            2 => SolvingTechnique::XWing,
            3 => SolvingTechnique::Swordfish,
            _ => SolvingTechnique::Jellyfish,
        }
    }

    fn clone_box(&self) -> BoxedHintFinder {
        Box::new(*self)
    }

    fn find_hints(&self, grid: &Grid, hints: &mut HintAggregator) -> ControlFlow<()> {
        let mut emit = Emitter::new(grid, hints, self.technique());
        for base_kind in [HouseKind::Row, HouseKind::Column] {
            for value in ValueSet::full(grid.grid_size()) {
                let mut candidates = HouseSet::new(grid.grid_size());
                for line in grid.houses_of_kind(base_kind) {
                    let count = grid.house_potential_positions(line, value).len();
                    if (1..=self.size).contains(&count) {
                        candidates.insert(line.index());
                    }
                }
                if candidates.len() < self.size {
                    continue;
                }
                let mut bases = BaseLines::new();
                let cover = HouseSet::new(grid.grid_size());
                self.extend(&mut emit, base_kind, value, candidates, &mut bases, cover, 0)?;
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

    /// Confines `value` in each row to the given columns.
    fn confine(
        mut tester: FinderTester,
        value: usize,
        rows: &[usize],
        columns: &[usize],
    ) -> FinderTester {
        for &row in rows {
            for column in 0..9 {
                if !columns.contains(&column) {
                    tester = tester.with_exclusions(row * 9 + column, [value]);
                }
            }
        }
        tester
    }

    #[test]
    fn test_x_wing_on_rows() {
        confine(empty(), 5, &[1, 6], &[2, 7])
            .find(&BasicFish::x_wing())
            .assert_eliminates_exact(2, [5])
            .assert_eliminates_exact(70, [5])
            .assert_eliminates_exact(7, [5])
            .assert_untouched(11)
            .assert_untouched(16)
            .assert_untouched(3)
            .assert_hint_count(1);
    }

    #[test]
    fn test_swordfish_with_partial_rows() {
        // Rows 1, 5, 9 hold 3 in columns {1, 5}, {5, 9} and {1, 9}.
        let tester = confine(empty(), 3, &[0], &[0, 4]);
        let tester = confine(tester, 3, &[4], &[4, 8]);
        confine(tester, 3, &[8], &[0, 8])
            .find(&BasicFish::swordfish())
            .assert_eliminates_exact(9, [3])
            .assert_eliminates_exact(13, [3])
            .assert_eliminates_exact(17, [3])
            .assert_untouched(10);
    }

    #[test]
    fn test_no_fish_without_confinement() {
        empty().find(&BasicFish::jellyfish()).assert_no_hints();
    }
}
