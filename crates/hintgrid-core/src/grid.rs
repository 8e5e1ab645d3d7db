//! The mutable puzzle state and its derived caches.
//!
//! A [`Grid`] owns the value, given flag and excluded candidates of every
//! cell. From these it derives three caches:
//!
//! - the possible values of each cell,
//! - the assigned values of each house,
//! - the potential positions of each value.
//!
//! Every mutation invalidates the caches. With [`UpdateMode::Incremental`]
//! the mutation immediately repairs the caches around the touched cell; with
//! [`UpdateMode::Deferred`] the caches stay invalid until
//! [`Grid::update_state`] rebuilds them. Reading derived data while the
//! caches are invalid is a contract violation and panics.
//!
//! # Examples
//!
//! ```
//! use hintgrid_core::{Grid, PredefinedType, UpdateMode, ValueSet};
//!
//! let mut grid = Grid::new(PredefinedType::Classic9x9.grid_type());
//! grid.set_value(0, 5, UpdateMode::Incremental)?;
//! assert!(!grid.possible_values(1).contains(5));
//!
//! grid.exclude_possible_values(2, ValueSet::from_bits(9, [1, 2]), UpdateMode::Deferred);
//! assert!(!grid.is_state_valid());
//! grid.update_state();
//! assert!(!grid.potential_positions(1).contains(2));
//! # Ok::<(), hintgrid_core::GridError>(())
//! ```

use std::{collections::HashSet, fmt, sync::Arc};

use crate::{
    Cell, CellSet, Conflict, GridError, GridType, House, HouseKind, HouseSet, ValueSet,
};

/// Controls when derived state is repaired after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Repair the caches around the mutated cell right away.
    #[default]
    Incremental,
    /// Leave the caches invalid until [`Grid::update_state`] is called.
    Deferred,
}

/// Callback fired whenever the grid's derived state becomes valid.
pub type UpdateHook = Arc<dyn Fn(&Grid) + Send + Sync>;

#[derive(Debug)]
struct Structure {
    grid_type: GridType,
    house_cells: Vec<CellSet>,
    peers: Vec<CellSet>,
}

impl Structure {
    fn new(grid_type: GridType) -> Self {
        let size = grid_type.grid_size();
        let count = grid_type.cell_count();

        let mut house_cells = vec![CellSet::new(count); 3 * size];
        for cell in 0..count {
            house_cells[grid_type.row_of(cell)].insert(cell);
            house_cells[size + grid_type.column_of(cell)].insert(cell);
            if let Some(block) = grid_type.block_of(cell) {
                house_cells[2 * size + block].insert(cell);
            }
        }

        let peers = (0..count)
            .map(|cell| {
                let mut peers = house_cells[grid_type.row_of(cell)]
                    | house_cells[size + grid_type.column_of(cell)];
                if let Some(block) = grid_type.block_of(cell) {
                    peers |= house_cells[2 * size + block];
                }
                peers.remove(cell);
                peers
            })
            .collect();

        Self {
            grid_type,
            house_cells,
            peers,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CellState {
    value: usize,
    given: bool,
    possible: ValueSet,
    excluded: ValueSet,
}

/// An N×N puzzle grid with cached candidate information.
///
/// Cloning a grid copies all per-cell and per-house state while sharing the
/// immutable structure (house membership and peer sets) with the original.
/// The update hook is not carried over to the clone.
pub struct Grid {
    structure: Arc<Structure>,
    cells: Vec<CellState>,
    assigned: Vec<ValueSet>,
    potential: Vec<CellSet>,
    valid: bool,
    update_hook: Option<UpdateHook>,
}

impl Clone for Grid {
    fn clone(&self) -> Self {
        Self {
            structure: Arc::clone(&self.structure),
            cells: self.cells.clone(),
            assigned: self.assigned.clone(),
            potential: self.potential.clone(),
            valid: self.valid,
            update_hook: None,
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("grid_type", self.grid_type())
            .field("values", &self.to_value_string())
            .field("valid", &self.valid)
            .finish_non_exhaustive()
    }
}

impl Grid {
    /// Creates an empty grid of the given geometry.
    #[must_use]
    pub fn new(grid_type: GridType) -> Self {
        let size = grid_type.grid_size();
        let count = grid_type.cell_count();
        let empty_cell = CellState {
            value: 0,
            given: false,
            possible: ValueSet::full(size),
            excluded: ValueSet::new(size),
        };
        let mut grid = Self {
            structure: Arc::new(Structure::new(grid_type)),
            cells: vec![empty_cell; count],
            assigned: vec![ValueSet::new(size); 3 * size],
            potential: vec![CellSet::new(count); size],
            valid: false,
            update_hook: None,
        };
        grid.update_state();
        grid
    }

    /// Returns the geometry of this grid.
    #[must_use]
    #[inline]
    pub fn grid_type(&self) -> &GridType {
        &self.structure.grid_type
    }

    /// Returns the grid size, which is also the number of values.
    #[must_use]
    #[inline]
    pub fn grid_size(&self) -> usize {
        self.structure.grid_type.grid_size()
    }

    /// Returns the number of cells.
    #[must_use]
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Installs a hook fired every time derived state becomes valid.
    pub fn set_update_hook(&mut self, hook: UpdateHook) {
        self.update_hook = Some(hook);
    }

    /// Removes the update hook.
    pub fn clear_update_hook(&mut self) {
        self.update_hook = None;
    }

    // ----- structure -----

    #[inline]
    #[track_caller]
    fn check_cell(&self, cell: usize) {
        assert!(
            cell < self.cells.len(),
            "cell index {cell} is out of range for {} cells",
            self.cells.len()
        );
    }

    #[inline]
    #[track_caller]
    fn house_slot(&self, house: House) -> usize {
        let size = self.grid_size();
        assert!(
            house.index() < size,
            "{house:?} is out of range for a grid of size {size}"
        );
        house.flat_index(size)
    }

    /// Returns a read view of a cell.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    #[track_caller]
    pub fn cell(&self, index: usize) -> Cell<'_> {
        self.check_cell(index);
        Cell::new(self, index)
    }

    /// Returns a read view of the cell at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is out of range.
    #[must_use]
    #[track_caller]
    pub fn cell_at(&self, row: usize, column: usize) -> Cell<'_> {
        self.cell(self.grid_type().cell_index(row, column))
    }

    /// Returns read views of all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell<'_>> {
        (0..self.cells.len()).map(move |index| Cell::new(self, index))
    }

    /// Returns all rows.
    pub fn rows(&self) -> impl Iterator<Item = House> + use<> {
        (0..self.grid_size()).map(|index| House::Row { index })
    }

    /// Returns all columns.
    pub fn columns(&self) -> impl Iterator<Item = House> + use<> {
        (0..self.grid_size()).map(|index| House::Column { index })
    }

    /// Returns all blocks that contain at least one cell.
    pub fn blocks(&self) -> impl Iterator<Item = House> {
        (0..self.grid_size())
            .map(|index| House::Block { index })
            .filter(move |&house| !self.house_cells(house).is_empty())
    }

    /// Returns all houses of one kind.
    pub fn houses_of_kind(&self, kind: HouseKind) -> impl Iterator<Item = House> {
        (0..self.grid_size())
            .map(move |index| House::new(kind, index))
            .filter(move |&house| !self.house_cells(house).is_empty())
    }

    /// Returns all non-empty houses: rows, then columns, then blocks.
    pub fn houses(&self) -> impl Iterator<Item = House> {
        HouseKind::ALL
            .into_iter()
            .flat_map(move |kind| self.houses_of_kind(kind))
    }

    /// Returns the houses of the same kind as `house` with a larger index.
    pub fn houses_after(&self, house: House) -> impl Iterator<Item = House> {
        self.houses_of_kind(house.kind())
            .filter(move |other| other.index() > house.index())
    }

    /// Returns the cells of a house.
    ///
    /// # Panics
    ///
    /// Panics if the house index is out of range.
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn house_cells(&self, house: House) -> CellSet {
        self.structure.house_cells[self.house_slot(house)]
    }

    /// Returns the cells that share a house with `cell`, excluding `cell` itself.
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn peers(&self, cell: usize) -> CellSet {
        self.structure.peers[cell]
    }

    /// Returns the row containing `cell`.
    #[must_use]
    #[inline]
    pub fn row_of(&self, cell: usize) -> House {
        House::Row {
            index: self.grid_type().row_of(cell),
        }
    }

    /// Returns the column containing `cell`.
    #[must_use]
    #[inline]
    pub fn column_of(&self, cell: usize) -> House {
        House::Column {
            index: self.grid_type().column_of(cell),
        }
    }

    /// Returns the block containing `cell`, if any.
    #[must_use]
    #[inline]
    pub fn block_of(&self, cell: usize) -> Option<House> {
        self.grid_type()
            .block_of(cell)
            .map(|index| House::Block { index })
    }

    /// Returns the houses containing `cell`: its row, its column and its block if any.
    pub fn houses_of(&self, cell: usize) -> impl Iterator<Item = House> + use<> {
        [
            Some(self.row_of(cell)),
            Some(self.column_of(cell)),
            self.block_of(cell),
        ]
        .into_iter()
        .flatten()
    }

    /// Returns the house containing `cell` with the given kind.
    #[must_use]
    pub fn house_of(&self, cell: usize, kind: HouseKind) -> Option<House> {
        match kind {
            HouseKind::Row => Some(self.row_of(cell)),
            HouseKind::Column => Some(self.column_of(cell)),
            HouseKind::Block => self.block_of(cell),
        }
    }

    /// Returns the region indices of houses of `kind` touched by `cells`.
    #[must_use]
    pub fn regions_of(&self, cells: CellSet, kind: HouseKind) -> HouseSet {
        let mut regions = HouseSet::new(self.grid_size());
        for cell in cells {
            if let Some(house) = self.house_of(cell, kind) {
                regions.insert(house.index());
            }
        }
        regions
    }

    /// Returns the row indices touched by `cells`.
    #[must_use]
    pub fn rows_of(&self, cells: CellSet) -> HouseSet {
        self.regions_of(cells, HouseKind::Row)
    }

    /// Returns the column indices touched by `cells`.
    #[must_use]
    pub fn columns_of(&self, cells: CellSet) -> HouseSet {
        self.regions_of(cells, HouseKind::Column)
    }

    /// Returns the block indices touched by `cells`.
    #[must_use]
    pub fn blocks_of(&self, cells: CellSet) -> HouseSet {
        self.regions_of(cells, HouseKind::Block)
    }

    /// Returns the single house of `kind` containing every cell in `cells`.
    ///
    /// Returns `None` for an empty set, for cells spread over several houses,
    /// or when a cell has no house of that kind.
    #[must_use]
    pub fn single_house(&self, cells: CellSet, kind: HouseKind) -> Option<House> {
        let mut found = None;
        for cell in cells {
            let house = self.house_of(cell, kind)?;
            match found {
                None => found = Some(house),
                Some(previous) if previous != house => return None,
                Some(_) => {}
            }
        }
        found
    }

    /// Returns the single row containing every cell in `cells`.
    #[must_use]
    pub fn single_row(&self, cells: CellSet) -> Option<House> {
        self.single_house(cells, HouseKind::Row)
    }

    /// Returns the single column containing every cell in `cells`.
    #[must_use]
    pub fn single_column(&self, cells: CellSet) -> Option<House> {
        self.single_house(cells, HouseKind::Column)
    }

    /// Returns the single block containing every cell in `cells`.
    #[must_use]
    pub fn single_block(&self, cells: CellSet) -> Option<House> {
        self.single_house(cells, HouseKind::Block)
    }

    // ----- authoritative state -----

    /// Returns the value of a cell, `0` when unassigned.
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn value(&self, cell: usize) -> usize {
        self.cells[cell].value
    }

    /// Returns `true` if the cell holds a value.
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn is_assigned(&self, cell: usize) -> bool {
        self.cells[cell].value != 0
    }

    /// Returns `true` if the cell holds a given value.
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn is_given(&self, cell: usize) -> bool {
        self.cells[cell].given
    }

    /// Returns the values manually ruled out for a cell.
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn excluded_values(&self, cell: usize) -> ValueSet {
        self.cells[cell].excluded
    }

    /// Returns all unassigned cells.
    #[must_use]
    pub fn unassigned_cells(&self) -> CellSet {
        let mut cells = CellSet::new(self.cells.len());
        for (index, state) in self.cells.iter().enumerate() {
            if state.value == 0 {
                cells.insert(index);
            }
        }
        cells
    }

    /// Returns the unassigned cells of a house.
    #[must_use]
    pub fn unassigned_cells_in(&self, house: House) -> CellSet {
        let mut cells = self.house_cells(house);
        for cell in cells {
            if self.is_assigned(cell) {
                cells.remove(cell);
            }
        }
        cells
    }

    // ----- derived state -----

    /// Returns `true` if the derived caches are up to date.
    #[must_use]
    #[inline]
    pub fn is_state_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    #[track_caller]
    fn check_valid(&self) {
        assert!(
            self.valid,
            "cached grid state is invalidated, call update_state() before reading derived data"
        );
    }

    /// Returns the values still possible for a cell; empty when assigned.
    ///
    /// # Panics
    ///
    /// Panics if the derived state is invalid.
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn possible_values(&self, cell: usize) -> ValueSet {
        self.check_valid();
        self.cells[cell].possible
    }

    /// Returns the values assigned in a house.
    ///
    /// # Panics
    ///
    /// Panics if the derived state is invalid.
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn assigned_values(&self, house: House) -> ValueSet {
        self.check_valid();
        self.assigned[self.house_slot(house)]
    }

    /// Returns the values not yet assigned in a house.
    ///
    /// # Panics
    ///
    /// Panics if the derived state is invalid.
    #[must_use]
    #[track_caller]
    pub fn unassigned_values(&self, house: House) -> ValueSet {
        self.assigned_values(house).complement()
    }

    /// Returns the cells where `value` is still a candidate.
    ///
    /// # Panics
    ///
    /// Panics if the derived state is invalid or `value` is out of range.
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn potential_positions(&self, value: usize) -> CellSet {
        self.check_valid();
        assert!(
            (1..=self.grid_size()).contains(&value),
            "illegal value {value}"
        );
        self.potential[value - 1]
    }

    /// Returns the cells of a house where `value` is still a candidate.
    ///
    /// # Panics
    ///
    /// Panics if the derived state is invalid.
    #[must_use]
    #[inline]
    #[track_caller]
    pub fn house_potential_positions(&self, house: House, value: usize) -> CellSet {
        self.potential_positions(value) & self.house_cells(house)
    }

    /// Returns `true` if no two assigned cells of the house share a value.
    ///
    /// # Panics
    ///
    /// Panics if the derived state is invalid.
    #[must_use]
    #[track_caller]
    pub fn is_house_valid(&self, house: House) -> bool {
        self.check_valid();
        let mut seen = ValueSet::new(self.grid_size());
        self.house_cells(house)
            .iter()
            .map(|cell| self.value(cell))
            .filter(|&value| value != 0)
            .all(|value| seen.insert(value))
    }

    /// Returns `true` if every value is assigned in the house.
    ///
    /// # Panics
    ///
    /// Panics if the derived state is invalid.
    #[must_use]
    #[track_caller]
    pub fn is_house_solved(&self, house: House) -> bool {
        self.assigned_values(house).len() == self.grid_size()
    }

    /// Returns `true` if no house contains a duplicate value.
    ///
    /// # Panics
    ///
    /// Panics if the derived state is invalid.
    #[must_use]
    #[track_caller]
    pub fn is_valid(&self) -> bool {
        self.check_valid();
        self.houses().all(|house| self.is_house_valid(house))
    }

    /// Returns `true` if every house is solved.
    ///
    /// # Panics
    ///
    /// Panics if the derived state is invalid.
    #[must_use]
    #[track_caller]
    pub fn is_solved(&self) -> bool {
        self.check_valid();
        self.houses().all(|house| self.is_house_solved(house))
    }

    /// Returns every group of peer cells holding the same value.
    ///
    /// # Panics
    ///
    /// Panics if the derived state is invalid.
    #[must_use]
    #[track_caller]
    pub fn conflicts(&self) -> Vec<Conflict> {
        self.check_valid();
        let mut seen = HashSet::new();
        let mut conflicts = Vec::new();
        for cell in 0..self.cells.len() {
            let value = self.value(cell);
            if value == 0 {
                continue;
            }
            let mut cells = self.peers(cell);
            for peer in cells {
                if self.value(peer) != value {
                    cells.remove(peer);
                }
            }
            if cells.is_empty() {
                continue;
            }
            cells.insert(cell);
            if seen.insert(cells) {
                conflicts.push(Conflict::new(cells, value));
            }
        }
        conflicts
    }

    // ----- mutation -----

    /// Assigns a value to a cell; `0` clears the assignment.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::GivenCell`] if the cell is given and
    /// [`GridError::ValueOutOfRange`] if `value > grid_size`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is out of range.
    #[track_caller]
    pub fn set_value(
        &mut self,
        cell: usize,
        value: usize,
        mode: UpdateMode,
    ) -> Result<(), GridError> {
        self.check_cell(cell);
        if self.cells[cell].given {
            return Err(GridError::GivenCell { cell });
        }
        let grid_size = self.grid_size();
        if value > grid_size {
            return Err(GridError::ValueOutOfRange { value, grid_size });
        }
        if self.cells[cell].value == value {
            if mode == UpdateMode::Incremental && !self.valid {
                self.update_state();
            }
            return Ok(());
        }

        let was_valid = self.valid;
        self.cells[cell].value = value;
        self.valid = false;
        if mode == UpdateMode::Incremental {
            if was_valid {
                self.refresh_neighborhood(cell);
            } else {
                self.update_state();
            }
        }
        Ok(())
    }

    /// Marks a cell as given or not. Given cells reject value changes.
    #[track_caller]
    pub fn set_given(&mut self, cell: usize, given: bool) {
        self.check_cell(cell);
        self.cells[cell].given = given;
    }

    /// Rules out candidate values for a cell.
    #[track_caller]
    pub fn exclude_possible_values(&mut self, cell: usize, values: ValueSet, mode: UpdateMode) {
        self.check_cell(cell);
        let was_valid = self.valid;
        let state = &mut self.cells[cell];
        state.excluded |= values;
        state.possible -= values;
        self.valid = false;
        self.finish_cell_update(cell, was_valid, mode);
    }

    /// Lifts previously excluded candidate values of a cell.
    ///
    /// The possible values are recomputed from the remaining exclusions and
    /// the values assigned in the cell's houses.
    #[track_caller]
    pub fn remove_excluded_possible_values(
        &mut self,
        cell: usize,
        values: ValueSet,
        mode: UpdateMode,
    ) {
        self.check_cell(cell);
        let was_valid = self.valid;
        self.cells[cell].excluded -= values;
        self.valid = false;
        self.finish_cell_update(cell, was_valid, mode);
    }

    /// Clears a non-given cell's value and every exclusion of the cell.
    #[track_caller]
    pub fn reset_cell(&mut self, cell: usize, mode: UpdateMode) {
        self.check_cell(cell);
        let was_valid = self.valid;
        let state = &mut self.cells[cell];
        let value_changed = !state.given && state.value != 0;
        if !state.given {
            state.value = 0;
        }
        state.excluded.clear();
        self.valid = false;
        match mode {
            UpdateMode::Deferred => {}
            UpdateMode::Incremental if !was_valid => self.update_state(),
            UpdateMode::Incremental if value_changed => self.refresh_neighborhood(cell),
            UpdateMode::Incremental => self.refresh_cell(cell),
        }
    }

    /// Removes every value, given flag and exclusion.
    pub fn clear(&mut self) {
        for state in &mut self.cells {
            state.value = 0;
            state.given = false;
            state.excluded.clear();
        }
        self.update_state();
    }

    /// Restores the grid to its given values, dropping every exclusion.
    pub fn reset(&mut self) {
        for state in &mut self.cells {
            if !state.given {
                state.value = 0;
            }
            state.excluded.clear();
        }
        self.update_state();
    }

    /// Rebuilds all derived state from scratch.
    pub fn update_state(&mut self) {
        for house in 0..self.assigned.len() {
            self.assigned[house] = self.compute_assigned(house);
        }
        for cell in 0..self.cells.len() {
            self.cells[cell].possible = self.derive_possible(cell);
        }
        for positions in &mut self.potential {
            positions.clear();
        }
        for (cell, state) in self.cells.iter().enumerate() {
            for value in state.possible {
                self.potential[value - 1].insert(cell);
            }
        }
        self.mark_valid();
    }

    fn finish_cell_update(&mut self, cell: usize, was_valid: bool, mode: UpdateMode) {
        match mode {
            UpdateMode::Deferred => {}
            UpdateMode::Incremental if was_valid => self.refresh_cell(cell),
            UpdateMode::Incremental => self.update_state(),
        }
    }

    fn compute_assigned(&self, slot: usize) -> ValueSet {
        let mut values = ValueSet::new(self.grid_size());
        for cell in self.structure.house_cells[slot] {
            let value = self.cells[cell].value;
            if value != 0 {
                values.insert(value);
            }
        }
        values
    }

    fn derive_possible(&self, cell: usize) -> ValueSet {
        let state = &self.cells[cell];
        if state.value != 0 {
            return ValueSet::new(self.grid_size());
        }
        let size = self.grid_size();
        let grid_type = self.grid_type();
        let mut possible = state.excluded.complement();
        possible -= self.assigned[grid_type.row_of(cell)];
        possible -= self.assigned[size + grid_type.column_of(cell)];
        if let Some(block) = grid_type.block_of(cell) {
            possible -= self.assigned[2 * size + block];
        }
        possible
    }

    fn refresh_neighborhood(&mut self, cell: usize) {
        let size = self.grid_size();
        for house in self.houses_of(cell) {
            let slot = house.flat_index(size);
            self.assigned[slot] = self.compute_assigned(slot);
        }

        let mut affected = self.peers(cell);
        affected.insert(cell);
        for index in affected {
            self.cells[index].possible = self.derive_possible(index);
        }
        for positions in &mut self.potential {
            *positions -= affected;
        }
        for index in affected {
            for value in self.cells[index].possible {
                self.potential[value - 1].insert(index);
            }
        }
        self.mark_valid();
    }

    fn refresh_cell(&mut self, cell: usize) {
        let possible = self.derive_possible(cell);
        self.cells[cell].possible = possible;
        for (value, positions) in (1..).zip(&mut self.potential) {
            if possible.contains(value) {
                positions.insert(cell);
            } else {
                positions.remove(cell);
            }
        }
        self.mark_valid();
    }

    fn mark_valid(&mut self) {
        self.valid = true;
        if let Some(hook) = self.update_hook.clone() {
            hook(self);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use proptest::prelude::*;

    use super::*;
    use crate::PredefinedType;

    fn classic() -> Grid {
        Grid::new(PredefinedType::Classic9x9.grid_type())
    }

    fn expected_possible(grid: &Grid, cell: usize) -> ValueSet {
        let size = grid.grid_size();
        if grid.is_assigned(cell) {
            return ValueSet::new(size);
        }
        let mut possible = ValueSet::full(size) - grid.excluded_values(cell);
        for peer in grid.peers(cell) {
            let value = grid.value(peer);
            if value != 0 {
                possible.remove(value);
            }
        }
        possible
    }

    #[test]
    fn test_new_grid_has_every_candidate() {
        let grid = classic();
        assert!(grid.is_state_valid());
        assert_eq!(grid.possible_values(40), ValueSet::full(9));
        assert_eq!(grid.potential_positions(5).len(), 81);
        assert!(grid.is_valid());
        assert!(!grid.is_solved());
    }

    #[test]
    fn test_peer_sets_are_symmetric() {
        for preset in PredefinedType::ALL {
            let grid = Grid::new(preset.grid_type());
            for a in 0..grid.cell_count() {
                assert!(!grid.peers(a).contains(a));
                for b in 0..grid.cell_count() {
                    let shares_house = a != b
                        && (grid.row_of(a) == grid.row_of(b)
                            || grid.column_of(a) == grid.column_of(b)
                            || grid.block_of(a) == grid.block_of(b));
                    assert_eq!(grid.peers(a).contains(b), shares_house, "{preset:?} {a} {b}");
                    assert_eq!(grid.peers(a).contains(b), grid.peers(b).contains(a));
                }
            }
        }
    }

    #[test]
    fn test_classic_peer_count() {
        let grid = classic();
        assert!((0..81).all(|cell| grid.peers(cell).len() == 20));
    }

    #[test]
    fn test_set_value_updates_peers() {
        let mut grid = classic();
        grid.set_value(0, 5, UpdateMode::Incremental).unwrap();
        assert!(grid.possible_values(0).is_empty());
        assert!(!grid.possible_values(8).contains(5));
        assert!(!grid.possible_values(72).contains(5));
        assert!(!grid.possible_values(20).contains(5));
        assert!(grid.possible_values(80).contains(5));
        assert_eq!(grid.assigned_values(House::Row { index: 0 }), ValueSet::from_bits(9, [5]));
        assert!(!grid.potential_positions(1).contains(0));

        grid.set_value(0, 0, UpdateMode::Incremental).unwrap();
        assert_eq!(grid.possible_values(0), ValueSet::full(9));
        assert!(grid.possible_values(8).contains(5));
        assert!(grid.potential_positions(5).contains(20));
    }

    #[test]
    fn test_set_value_rejects_given_and_out_of_range() {
        let mut grid = classic();
        assert_eq!(
            grid.set_value(3, 10, UpdateMode::Incremental),
            Err(GridError::ValueOutOfRange {
                value: 10,
                grid_size: 9
            })
        );
        grid.set_value(3, 4, UpdateMode::Incremental).unwrap();
        grid.set_given(3, true);
        assert_eq!(
            grid.set_value(3, 0, UpdateMode::Incremental),
            Err(GridError::GivenCell { cell: 3 })
        );
        assert_eq!(grid.value(3), 4);
    }

    #[test]
    #[should_panic(expected = "cached grid state is invalidated")]
    fn test_reading_invalid_state_panics() {
        let mut grid = classic();
        grid.set_value(0, 1, UpdateMode::Deferred).unwrap();
        let _ = grid.possible_values(1);
    }

    #[test]
    fn test_incremental_after_deferred_rebuilds_everything() {
        let mut grid = classic();
        grid.set_value(0, 1, UpdateMode::Deferred).unwrap();
        grid.set_value(80, 2, UpdateMode::Incremental).unwrap();
        assert!(grid.is_state_valid());
        assert!(!grid.possible_values(1).contains(1));
        assert!(!grid.possible_values(79).contains(2));
    }

    #[test]
    fn test_exclusions_round_trip() {
        let mut grid = classic();
        grid.set_value(1, 3, UpdateMode::Incremental).unwrap();
        let values = ValueSet::from_bits(9, [3, 4, 5]);
        grid.exclude_possible_values(0, values, UpdateMode::Incremental);
        assert_eq!(grid.possible_values(0), ValueSet::full(9) - values);
        assert!(!grid.potential_positions(4).contains(0));

        grid.remove_excluded_possible_values(0, values, UpdateMode::Incremental);
        assert!(grid.excluded_values(0).is_empty());
        assert!(!grid.possible_values(0).contains(3));
        assert!(grid.possible_values(0).contains(4));
        assert!(grid.potential_positions(4).contains(0));
    }

    #[test]
    fn test_clear_and_reset() {
        let mut grid = classic();
        grid.set_value(0, 1, UpdateMode::Incremental).unwrap();
        grid.set_given(0, true);
        grid.set_value(1, 2, UpdateMode::Incremental).unwrap();
        grid.exclude_possible_values(2, ValueSet::from_bits(9, [9]), UpdateMode::Incremental);

        grid.reset();
        assert_eq!(grid.value(0), 1);
        assert_eq!(grid.value(1), 0);
        assert!(grid.excluded_values(2).is_empty());

        grid.clear();
        assert_eq!(grid.value(0), 0);
        assert!(!grid.is_given(0));
        assert_eq!(grid.possible_values(1), ValueSet::full(9));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut grid = classic();
        grid.set_value(0, 1, UpdateMode::Incremental).unwrap();
        let mut copy = grid.clone();
        copy.set_value(1, 2, UpdateMode::Incremental).unwrap();
        assert_eq!(grid.value(1), 0);
        assert!(grid.possible_values(2).contains(2));
        assert_eq!(copy.value(0), 1);
    }

    #[test]
    fn test_conflict_between_two_peers() {
        let mut grid = classic();
        grid.set_value(0, 7, UpdateMode::Incremental).unwrap();
        grid.set_value(5, 7, UpdateMode::Incremental).unwrap();
        assert!(!grid.is_valid());
        let conflicts = grid.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].cells(), CellSet::from_bits(81, [0, 5]));
        assert_eq!(conflicts[0].value(), 7);
    }

    #[test]
    fn test_latin_square_ignores_blocks() {
        let mut grid = Grid::new(GridType::latin_square(4));
        assert_eq!(grid.blocks().count(), 0);
        assert_eq!(grid.houses().count(), 8);
        grid.set_value(0, 1, UpdateMode::Incremental).unwrap();
        assert!(grid.possible_values(5).contains(1));
        assert_eq!(grid.single_block(CellSet::from_bits(16, [0, 1])), None);
    }

    #[test]
    fn test_update_hook_fires_on_revalidation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut grid = classic();
        let counter = Arc::clone(&calls);
        grid.set_update_hook(Arc::new(move |_: &Grid| {
            counter.fetch_add(1, Ordering::Relaxed);
        }));
        grid.set_value(0, 1, UpdateMode::Deferred).unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 0);
        grid.update_state();
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        grid.set_value(1, 2, UpdateMode::Incremental).unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 2);
        let copy = grid.clone();
        assert!(copy.update_hook.is_none());
    }

    #[test]
    fn test_single_house_helpers() {
        let grid = classic();
        let pair = CellSet::from_bits(81, [0, 2]);
        assert_eq!(grid.single_row(pair), Some(House::Row { index: 0 }));
        assert_eq!(grid.single_column(pair), None);
        assert_eq!(grid.single_block(pair), Some(House::Block { index: 0 }));
        assert_eq!(grid.single_row(CellSet::new(81)), None);
        assert_eq!(grid.columns_of(pair), HouseSet::from_bits(9, [0, 2]));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Set(usize, usize),
        Exclude(usize, Vec<usize>),
        Include(usize, Vec<usize>),
        Reset(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..16usize, 0..=4usize).prop_map(|(c, v)| Op::Set(c, v)),
            (0..16usize, prop::collection::vec(1..=4usize, 1..3)).prop_map(|(c, v)| Op::Exclude(c, v)),
            (0..16usize, prop::collection::vec(1..=4usize, 1..3)).prop_map(|(c, v)| Op::Include(c, v)),
            (0..16usize).prop_map(Op::Reset),
        ]
    }

    proptest! {
        #[test]
        fn prop_incremental_updates_match_full_rebuild(
            ops in prop::collection::vec(op_strategy(), 1..40),
            deferred in prop::collection::vec(any::<bool>(), 40),
        ) {
            let mut grid = Grid::new(PredefinedType::Classic4x4.grid_type());
            for (op, &defer) in ops.iter().zip(&deferred) {
                let mode = if defer { UpdateMode::Deferred } else { UpdateMode::Incremental };
                match op {
                    Op::Set(cell, value) => grid.set_value(*cell, *value, mode).unwrap(),
                    Op::Exclude(cell, values) => {
                        grid.exclude_possible_values(*cell, ValueSet::from_bits(4, values.iter().copied()), mode);
                    }
                    Op::Include(cell, values) => {
                        grid.remove_excluded_possible_values(*cell, ValueSet::from_bits(4, values.iter().copied()), mode);
                    }
                    Op::Reset(cell) => grid.reset_cell(*cell, mode),
                }
                if !grid.is_state_valid() {
                    continue;
                }
                let mut rebuilt = grid.clone();
                rebuilt.update_state();
                for cell in 0..16 {
                    prop_assert_eq!(grid.possible_values(cell), expected_possible(&grid, cell));
                    prop_assert_eq!(grid.possible_values(cell), rebuilt.possible_values(cell));
                }
                for value in 1..=4 {
                    prop_assert_eq!(grid.potential_positions(value), rebuilt.potential_positions(value));
                }
                for house in grid.houses() {
                    prop_assert_eq!(grid.assigned_values(house), rebuilt.assigned_values(house));
                    prop_assert_eq!(
                        grid.is_house_solved(house),
                        grid.house_cells(house).iter().all(|c| grid.is_assigned(c)) && grid.is_house_valid(house)
                    );
                }
            }
        }
    }
}
