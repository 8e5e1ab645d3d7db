use std::ops::ControlFlow;

use hintgrid_core::{CellSet, Grid, House, HouseKind, ValueSet};

use super::emit::{Emitter, Pattern};
use crate::{BoxedHintFinder, HintAggregator, HintFinder, SolvingTechnique};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Type1,
    Type2,
    Type4,
}

/// A finder for unique rectangles.
///
/// Four cells at the corners of a rectangle spanning exactly two blocks
/// cannot all be reduced to the same two candidates: the values could be
/// swapped and the puzzle would have two solutions. Two *floor* cells in one
/// line hold exactly the pair; the two *roof* cells in a parallel line decide
/// which deduction applies.
///
/// - **Type 1**: one roof cell holds only the pair, the other has extra
///   candidates. The pair is removed from the latter.
/// - **Type 2**: both roof cells hold the pair plus the same single extra
///   candidate. One of them holds the extra, so it is removed from every
///   cell seeing both roofs.
/// - **Type 4**: a pair value is confined to the roof cells within a house
///   they share. The other pair value is removed from both roofs.
#[derive(Debug, Clone, Copy)]
pub struct UniqueRectangle {
    variant: Variant,
}

/// The corners of a candidate rectangle.
#[derive(Debug, Clone, Copy)]
struct Rectangle {
    pair: ValueSet,
    roofs: [usize; 2],
    cells: CellSet,
}

impl UniqueRectangle {
    /// Creates a finder for type 1 rectangles.
    #[must_use]
    pub const fn type1() -> Self {
        Self {
            variant: Variant::Type1,
        }
    }

    /// Creates a finder for type 2 rectangles.
    #[must_use]
    pub const fn type2() -> Self {
        Self {
            variant: Variant::Type2,
        }
    }

    /// Creates a finder for type 4 rectangles.
    #[must_use]
    pub const fn type4() -> Self {
        Self {
            variant: Variant::Type4,
        }
    }

    fn check(&self, emit: &mut Emitter<'_>, rect: &Rectangle) -> ControlFlow<()> {
        match self.variant {
            Variant::Type1 => check_type1(emit, rect),
            Variant::Type2 => check_type2(emit, rect),
            Variant::Type4 => check_type4(emit, rect),
        }
    }
}

impl HintFinder for UniqueRectangle {
    fn technique(&self) -> SolvingTechnique {
        match self.variant {
            Variant::Type1 => SolvingTechnique::UniqueRectangleType1,
            Variant::Type2 => SolvingTechnique::UniqueRectangleType2,
            Variant::Type4 => SolvingTechnique::UniqueRectangleType4,
        }
    }

    fn clone_box(&self) -> BoxedHintFinder {
        Box::new(*self)
    }

    fn find_hints(&self, grid: &Grid, hints: &mut HintAggregator) -> ControlFlow<()> {
        let mut emit = Emitter::new(grid, hints, self.technique());
        for kind in [HouseKind::Row, HouseKind::Column] {
            for floor in grid.houses_of_kind(kind) {
                let cells = grid.unassigned_cells_in(floor);
                for first in cells {
                    let pair = grid.possible_values(first);
                    if pair.len() != 2 {
                        continue;
                    }
                    for second in cells.iter_from(first + 1) {
                        if grid.possible_values(second) != pair {
                            continue;
                        }
                        for line in grid.houses_of_kind(kind).filter(|&h| h != floor) {
                            let Some(rect) = rectangle(grid, pair, [first, second], line) else {
                                continue;
                            };
                            self.check(&mut emit, &rect)?;
                        }
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }
}

/// Builds the rectangle whose roof lies in `line`, if its roof cells share a
/// candidate with the pair and the corners span two blocks.
fn rectangle(grid: &Grid, pair: ValueSet, floors: [usize; 2], line: House) -> Option<Rectangle> {
    let roofs = [
        corresponding(grid, floors[0], line)?,
        corresponding(grid, floors[1], line)?,
    ];
    if roofs
        .iter()
        .any(|&roof| !grid.possible_values(roof).intersects(pair))
    {
        return None;
    }
    let cells = CellSet::from_bits(grid.cell_count(), floors.into_iter().chain(roofs));
    (grid.blocks_of(cells).len() == 2).then_some(Rectangle { pair, roofs, cells })
}

/// Returns the cell of `line` in the same column (or row) as `cell`.
fn corresponding(grid: &Grid, cell: usize, line: House) -> Option<usize> {
    let grid_type = grid.grid_type();
    match line {
        House::Row { index } => Some(grid_type.cell_index(index, grid_type.column_of(cell))),
        House::Column { index } => Some(grid_type.cell_index(grid_type.row_of(cell), index)),
        House::Block { .. } => None,
    }
}

fn check_type1(emit: &mut Emitter<'_>, rect: &Rectangle) -> ControlFlow<()> {
    let grid = emit.grid();
    let mut equal = None;
    let mut deviant = None;
    for roof in rect.roofs {
        let possible = grid.possible_values(roof);
        let slot = if possible == rect.pair {
            &mut equal
        } else if !(possible - rect.pair).is_empty() {
            &mut deviant
        } else {
            continue;
        };
        if slot.replace(roof).is_some() {
            return ControlFlow::Continue(());
        }
    }
    let (Some(_), Some(deviant)) = (equal, deviant) else {
        return ControlFlow::Continue(());
    };
    let affected = CellSet::from_bits(grid.cell_count(), [deviant]);
    let pattern = Pattern::new(rect.cells, rect.pair);
    emit.eliminate_values(affected, rect.pair, pattern)?;
    ControlFlow::Continue(())
}

fn check_type2(emit: &mut Emitter<'_>, rect: &Rectangle) -> ControlFlow<()> {
    let grid = emit.grid();
    let mut extra = None;
    for roof in rect.roofs {
        let possible = grid.possible_values(roof);
        if !rect.pair.is_subset(possible) {
            return ControlFlow::Continue(());
        }
        let Some(value) = (possible - rect.pair).as_single() else {
            return ControlFlow::Continue(());
        };
        if extra.replace(value).is_some_and(|previous| previous != value) {
            return ControlFlow::Continue(());
        }
    }
    let Some(extra) = extra else {
        return ControlFlow::Continue(());
    };
    let [roof1, roof2] = rect.roofs;
    let affected = grid.peers(roof1) & grid.peers(roof2);
    let values = ValueSet::from_bits(grid.grid_size(), [extra]);
    let pattern = Pattern::new(rect.cells, rect.pair).with_related(rect.cells | affected);
    emit.eliminate_values(affected, values, pattern)?;
    ControlFlow::Continue(())
}

fn check_type4(emit: &mut Emitter<'_>, rect: &Rectangle) -> ControlFlow<()> {
    let grid = emit.grid();
    let mut found = ValueSet::new(grid.grid_size());
    for roof in rect.roofs {
        let possible = grid.possible_values(roof);
        let shared = possible & rect.pair;
        if shared.is_empty() || (possible - rect.pair).is_empty() {
            return ControlFlow::Continue(());
        }
        found |= shared;
    }
    if found.len() != 2 {
        return ControlFlow::Continue(());
    }

    let roofs = CellSet::from_bits(grid.cell_count(), rect.roofs);
    let houses = [
        grid.single_column(roofs),
        grid.single_row(roofs),
        grid.single_block(roofs),
    ];
    for value in rect.pair {
        for house in houses.into_iter().flatten() {
            if !(grid.house_potential_positions(house, value) - roofs).is_empty() {
                continue;
            }
            let mut excluded = rect.pair;
            excluded.remove(value);
            let related = rect.cells | grid.house_cells(house);
            let pattern = Pattern::new(rect.cells, rect.pair).with_related(related);
            emit.eliminate_values(roofs, excluded, pattern)?;
        }
    }
    ControlFlow::Continue(())
}
