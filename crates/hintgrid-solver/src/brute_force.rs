use hintgrid_core::{CellSet, Grid, UpdateMode, ValueSet};

use crate::{Hint, HintSolver, SolverError, technique};

/// The order in which a branching cell's candidates are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    /// Smallest candidate first.
    #[default]
    Forward,
    /// Largest candidate first.
    Backward,
}

/// Counters collected by [`BruteForceSolver::solve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BruteForceStats {
    /// Branches taken on a cell with more than one candidate.
    pub guesses: usize,
    /// Search levels abandoned after every option failed.
    pub backtracks: usize,
    /// Values placed by single-hint propagation instead of branching.
    pub direct_propagations: usize,
}

/// A backtracking solver with singles propagation.
///
/// Every search level first asks a [`HintSolver`] limited to naked and
/// hidden singles for a placement. Only when none exists does it branch, on
/// the unassigned cell with the fewest candidates (lowest index on ties).
///
/// # Examples
///
/// ```
/// use hintgrid_core::{Grid, PredefinedType};
/// use hintgrid_solver::{BruteForceSolver, SearchDirection};
///
/// let grid = Grid::new(PredefinedType::Classic4x4.grid_type());
/// let solver = BruteForceSolver::new().with_direction(SearchDirection::Forward);
/// let (solved, stats) = solver.solve(&grid)?;
///
/// assert!(solved.is_solved());
/// assert_eq!(solved.to_value_string().replace('+', ""), "1234341221434321");
/// println!("{} guesses", stats.guesses);
/// # Ok::<(), hintgrid_solver::SolverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BruteForceSolver {
    direction: SearchDirection,
    propagation: HintSolver,
}

impl BruteForceSolver {
    /// Creates a solver searching in [`SearchDirection::Forward`] order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            direction: SearchDirection::Forward,
            propagation: HintSolver::new(technique::singles_finders()),
        }
    }

    /// Sets the order in which candidates are tried.
    #[must_use]
    pub fn with_direction(mut self, direction: SearchDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Returns the configured search direction.
    #[must_use]
    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    /// Searches for a solution of a copy of `grid`.
    ///
    /// When the search is exhausted the returned grid holds only the
    /// original assignments; check [`Grid::is_solved`] to tell the cases
    /// apart.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if `grid` holds conflicting
    /// values, or [`SolverError::Grid`] if an assignment is rejected.
    pub fn solve(&self, grid: &Grid) -> Result<(Grid, BruteForceStats), SolverError> {
        if !grid.is_valid() {
            return Err(SolverError::Inconsistent);
        }
        let mut grid = grid.clone();
        let mut unassigned = grid.unassigned_cells();
        let mut stats = BruteForceStats::default();
        log::debug!(
            "brute force search started with {} unassigned cells",
            unassigned.len()
        );

        let solved = self.search(&mut grid, &mut unassigned, &mut stats)?;

        log::debug!(
            "brute force search {}: {} guesses, {} backtracks, {} propagations",
            if solved { "succeeded" } else { "failed" },
            stats.guesses,
            stats.backtracks,
            stats.direct_propagations
        );
        Ok((grid, stats))
    }

    fn search(
        &self,
        grid: &mut Grid,
        unassigned: &mut CellSet,
        stats: &mut BruteForceStats,
    ) -> Result<bool, SolverError> {
        if unassigned.is_empty() {
            return Ok(true);
        }

        if let Some(Hint::Assignment(hint)) = self.propagation.find_next_hint(grid) {
            let cell = hint.cell();
            grid.set_value(cell, hint.value(), UpdateMode::Incremental)?;
            stats.direct_propagations += 1;
            unassigned.remove(cell);
            if self.search(grid, unassigned, stats)? {
                return Ok(true);
            }
            grid.reset_cell(cell, UpdateMode::Incremental);
            unassigned.insert(cell);
            stats.backtracks += 1;
            return Ok(false);
        }

        let cell = select_cell(grid, *unassigned);
        unassigned.remove(cell);
        let mut candidates = grid.possible_values(cell);
        while let Some(value) = self.next_candidate(candidates) {
            if candidates.len() > 1 {
                stats.guesses += 1;
            }
            candidates.remove(value);
            log::trace!("guessing {}={value}", grid.grid_type().cell_name(cell));
            grid.set_value(cell, value, UpdateMode::Incremental)?;
            if self.search(grid, unassigned, stats)? {
                return Ok(true);
            }
        }

        grid.reset_cell(cell, UpdateMode::Incremental);
        unassigned.insert(cell);
        stats.backtracks += 1;
        Ok(false)
    }

    fn next_candidate(&self, candidates: ValueSet) -> Option<usize> {
        match self.direction {
            SearchDirection::Forward => candidates.first(),
            SearchDirection::Backward => candidates.last(),
        }
    }
}

impl Default for BruteForceSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks the cell with the fewest candidates, stopping early at a dead end.
fn select_cell(grid: &Grid, unassigned: CellSet) -> usize {
    let mut best: Option<(usize, usize)> = None;
    for cell in unassigned {
        let count = grid.possible_values(cell).len();
        if count == 0 {
            return cell;
        }
        if best.is_none_or(|(_, fewest)| count < fewest) {
            best = Some((cell, count));
        }
    }
    best.map_or(0, |(cell, _)| cell)
}

#[cfg(test)]
mod tests {
    use hintgrid_core::PredefinedType;

    use super::*;

    const PUZZLE: &str =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    /// A puzzle with a single solution that singles alone cannot finish.
    const HARD: &str =
        "8..........36......7..9.2...5...7.......457.....1...3...1....68..85...1..9....4..";

    fn classic(values: &str) -> Grid {
        Grid::from_values(PredefinedType::Classic9x9.grid_type(), values).unwrap()
    }

    /// Values in row-major order, without the placed-value markers.
    fn digits(grid: &Grid) -> String {
        grid.to_value_string().replace('+', "")
    }

    #[test]
    fn test_solves_classic_puzzle_by_propagation() {
        let (solved, stats) = BruteForceSolver::new().solve(&classic(PUZZLE)).unwrap();
        assert_eq!(digits(&solved), SOLUTION);
        assert_eq!(stats.guesses, 0);
        assert_eq!(stats.backtracks, 0);
        assert_eq!(stats.direct_propagations, 51);
    }

    #[test]
    fn test_solves_hard_puzzle_with_guesses() {
        let grid = classic(HARD);
        let (solved, stats) = BruteForceSolver::new().solve(&grid).unwrap();
        assert!(solved.is_solved());
        assert!(stats.guesses > 0);
        for cell in grid.cells().filter(|cell| cell.is_assigned()) {
            assert_eq!(solved.value(cell.index()), cell.value());
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        let grid = classic(HARD);
        for direction in [SearchDirection::Forward, SearchDirection::Backward] {
            let solver = BruteForceSolver::new().with_direction(direction);
            let (first, first_stats) = solver.solve(&grid).unwrap();
            let (second, second_stats) = solver.solve(&grid).unwrap();
            assert_eq!(first.to_value_string(), second.to_value_string());
            assert_eq!(first_stats, second_stats);
        }
    }

    #[test]
    fn test_directions_fill_empty_grid_differently() {
        let grid = Grid::new(PredefinedType::Classic4x4.grid_type());
        let (forward, _) = BruteForceSolver::new().solve(&grid).unwrap();
        let (backward, _) = BruteForceSolver::new()
            .with_direction(SearchDirection::Backward)
            .solve(&grid)
            .unwrap();
        assert!(forward.is_solved());
        assert!(backward.is_solved());
        assert_eq!(forward.value(0), 1);
        assert_eq!(backward.value(0), 4);
    }

    #[test]
    fn test_unsolvable_grid_is_returned_unsolved() {
        // r1c9 can only hold 9, which column 9 already has.
        let grid = classic(&format!("12345678.{}9{}", ".".repeat(8), ".".repeat(63)));
        let (result, stats) = BruteForceSolver::new().solve(&grid).unwrap();
        assert!(!result.is_solved());
        assert!(stats.backtracks > 0);
        assert_eq!(result.to_value_string(), grid.to_value_string());
    }

    #[test]
    fn test_conflicting_grid_is_rejected() {
        let grid = classic(&format!("55{}", ".".repeat(79)));
        assert_eq!(
            BruteForceSolver::new().solve(&grid).unwrap_err(),
            SolverError::Inconsistent
        );
    }

    #[test]
    fn test_select_cell_prefers_fewest_candidates() {
        let grid = classic(PUZZLE);
        let cell = select_cell(&grid, grid.unassigned_cells());
        let fewest = grid
            .unassigned_cells()
            .iter()
            .map(|cell| grid.possible_values(cell).len())
            .min()
            .unwrap();
        assert_eq!(grid.possible_values(cell).len(), fewest);
        assert!(
            grid.unassigned_cells()
                .iter()
                .take_while(|&other| other < cell)
                .all(|other| grid.possible_values(other).len() > fewest)
        );
    }
}
