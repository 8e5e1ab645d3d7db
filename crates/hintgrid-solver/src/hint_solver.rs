use std::{
    any::Any,
    ops::ControlFlow,
    panic::{self, AssertUnwindSafe},
};

use hintgrid_core::Grid;

use crate::{
    Hint, HintAggregator, SolverError, SolvingTechnique,
    technique::{self, BoxedHintFinder, HintFinder},
};

/// Statistics collected while solving with hints.
///
/// Application counts follow the order of [`HintSolver::finders`].
///
/// # Examples
///
/// ```
/// use hintgrid_core::{Grid, PredefinedType};
/// use hintgrid_solver::HintSolver;
///
/// let grid = Grid::from_values(
///     PredefinedType::Classic4x4.grid_type(),
///     "1234 34.. 2143 4321",
/// )?;
/// let solver = HintSolver::with_all_finders();
/// let (solved, stats) = solver.solve(&grid)?;
///
/// assert!(solved.is_solved());
/// assert_eq!(stats.total_steps(), 2);
/// for (finder, count) in solver.finders().iter().zip(stats.applications()) {
///     println!("{}: {count}", finder.technique());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct HintSolverStats {
    applications: Vec<usize>,
    total_steps: usize,
    passes: usize,
}

impl HintSolverStats {
    /// Returns how many hints each finder contributed, in solver order.
    #[must_use]
    pub fn applications(&self) -> &[usize] {
        &self.applications
    }

    /// Returns the total number of hints applied.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Returns the number of passes that applied at least one hint.
    #[must_use]
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Returns `true` if any hint was applied.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.total_steps > 0
    }
}

/// A solver that applies human-style hints until the grid is solved or stuck.
///
/// Each pass runs the finders in order against the current grid and applies
/// what they found. A finder that panics only loses its own contribution to
/// that pass; the failure is logged and the remaining finders still run.
#[derive(Debug, Clone)]
pub struct HintSolver {
    finders: Vec<BoxedHintFinder>,
}

impl HintSolver {
    /// Creates a solver running `finders` in the given order.
    #[must_use]
    pub fn new(finders: Vec<BoxedHintFinder>) -> Self {
        Self { finders }
    }

    /// Creates a solver with every registered finder, in priority order.
    #[must_use]
    pub fn with_all_finders() -> Self {
        Self::new(technique::all_finders())
    }

    /// Creates a solver restricted to `techniques`, in priority order.
    ///
    /// # Examples
    ///
    /// ```
    /// use hintgrid_solver::{HintSolver, SolvingTechnique};
    ///
    /// let solver = HintSolver::with_techniques(&[
    ///     SolvingTechnique::HiddenSingle,
    ///     SolvingTechnique::FullHouse,
    /// ]);
    /// assert_eq!(solver.finders()[0].technique(), SolvingTechnique::FullHouse);
    /// ```
    #[must_use]
    pub fn with_techniques(techniques: &[SolvingTechnique]) -> Self {
        Self::new(technique::finders_for(techniques))
    }

    /// Returns the finders in the order they run.
    #[must_use]
    pub fn finders(&self) -> &[BoxedHintFinder] {
        &self.finders
    }

    /// Creates statistics aligned with this solver's finder order.
    #[must_use]
    pub fn new_stats(&self) -> HintSolverStats {
        HintSolverStats {
            applications: vec![0; self.finders.len()],
            total_steps: 0,
            passes: 0,
        }
    }

    /// Solves a copy of `grid`, applying one hint per pass.
    ///
    /// Stops once the grid is solved or a pass finds nothing; the returned
    /// grid may therefore be unsolved.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if `grid` holds conflicting
    /// values, or [`SolverError::Grid`] if a hint cannot be applied.
    pub fn solve(&self, grid: &Grid) -> Result<(Grid, HintSolverStats), SolverError> {
        check_consistency(grid)?;
        let mut grid = grid.clone();
        let mut stats = self.new_stats();
        log::debug!("hint solver started with {} finders", self.finders.len());

        while !grid.is_solved() {
            let mut hints = HintAggregator::single();
            self.pass(&grid, &mut hints, Some(&mut stats));
            if hints.is_empty() {
                break;
            }
            for hint in &hints {
                log::trace!("applying {hint}");
            }
            hints.apply_hints(&mut grid)?;
            stats.total_steps += hints.len();
            stats.passes += 1;
        }

        log::debug!(
            "hint solver stopped after {} steps, solved: {}",
            stats.total_steps,
            grid.is_solved()
        );
        Ok((grid, stats))
    }

    /// Returns the first hint of the highest-priority finder that has one.
    #[must_use]
    pub fn find_next_hint(&self, grid: &Grid) -> Option<Hint> {
        let mut hints = HintAggregator::single();
        self.pass(grid, &mut hints, None);
        hints.into_vec().into_iter().next()
    }

    /// Returns the first hint of every finder, without changing the grid.
    #[must_use]
    pub fn find_first_hints(&self, grid: &Grid) -> Vec<Hint> {
        self.finders
            .iter()
            .filter_map(|finder| {
                let mut hints = HintAggregator::single();
                let _ = run_guarded(finder.as_ref(), grid, &mut hints);
                hints.into_vec().into_iter().next()
            })
            .collect()
    }

    /// Returns every hint of every finder for the current grid.
    #[must_use]
    pub fn find_hints_single_step(&self, grid: &Grid) -> HintAggregator {
        let mut hints = HintAggregator::new();
        self.pass(grid, &mut hints, None);
        hints
    }

    /// Solves a copy of `grid` and returns every hint applied along the way.
    ///
    /// # Errors
    ///
    /// Same as [`solve`](Self::solve).
    pub fn find_all_hints(&self, grid: &Grid) -> Result<HintAggregator, SolverError> {
        check_consistency(grid)?;
        let mut grid = grid.clone();
        let mut trace = HintAggregator::new();

        while !grid.is_solved() {
            let mut hints = HintAggregator::single();
            self.pass(&grid, &mut hints, None);
            if hints.is_empty() {
                break;
            }
            hints.apply_hints(&mut grid)?;
            trace.append(hints);
        }

        log::debug!("collected {} hints", trace.len());
        Ok(trace)
    }

    fn pass(
        &self,
        grid: &Grid,
        hints: &mut HintAggregator,
        mut stats: Option<&mut HintSolverStats>,
    ) {
        for (index, finder) in self.finders.iter().enumerate() {
            let before = hints.len();
            let flow = run_guarded(finder.as_ref(), grid, hints);
            if let Some(stats) = stats.as_deref_mut() {
                stats.applications[index] += hints.len() - before;
            }
            if flow.is_break() {
                break;
            }
        }
    }
}

fn check_consistency(grid: &Grid) -> Result<(), SolverError> {
    if grid.is_valid() {
        Ok(())
    } else {
        Err(SolverError::Inconsistent)
    }
}

/// Runs one finder, discarding its output if it panics.
fn run_guarded(
    finder: &dyn HintFinder,
    grid: &Grid,
    hints: &mut HintAggregator,
) -> ControlFlow<()> {
    let before = hints.len();
    match panic::catch_unwind(AssertUnwindSafe(|| finder.find_hints(grid, hints))) {
        Ok(flow) => flow,
        Err(payload) => {
            hints.truncate(before);
            log::warn!(
                "{} finder failed and was skipped: {}",
                finder.technique(),
                panic_message(payload.as_ref())
            );
            ControlFlow::Continue(())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use hintgrid_core::{PredefinedType, UpdateMode};

    use super::*;
    use crate::technique::{FullHouse, HiddenSingle, NakedSingle};

    const PUZZLE: &str =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn classic(values: &str) -> Grid {
        Grid::from_values(PredefinedType::Classic9x9.grid_type(), values).unwrap()
    }

    /// Values in row-major order, without the placed-value markers.
    fn digits(grid: &Grid) -> String {
        grid.to_value_string().replace('+', "")
    }

    /// Row 1 holds 1 to 8; the rest of the grid is empty.
    fn nearly_full_row() -> Grid {
        classic(&format!("12345678{}", ".".repeat(73)))
    }

    /// A finder that emits one placement and then panics.
    #[derive(Debug, Clone, Copy)]
    struct PanickingFinder;

    impl HintFinder for PanickingFinder {
        fn technique(&self) -> SolvingTechnique {
            SolvingTechnique::XChain
        }

        fn clone_box(&self) -> BoxedHintFinder {
            Box::new(*self)
        }

        fn find_hints(&self, grid: &Grid, hints: &mut HintAggregator) -> ControlFlow<()> {
            let cell = grid.unassigned_cells().first().unwrap();
            let value = grid.possible_values(cell).first().unwrap();
            let hint = crate::AssignmentHint::new(
                grid.grid_type().clone(),
                SolvingTechnique::XChain,
                cell,
                value,
            );
            let _ = hints.add(hint.into());
            panic!("finder bug");
        }
    }

    #[test]
    fn test_solves_classic_puzzle() {
        let solver = HintSolver::with_all_finders();
        let (solved, stats) = solver.solve(&classic(PUZZLE)).unwrap();
        assert!(solved.is_solved());
        assert_eq!(digits(&solved), SOLUTION);
        assert_eq!(stats.total_steps(), stats.applications().iter().sum::<usize>());
        assert_eq!(stats.passes(), stats.total_steps());
        assert!(stats.has_progress());
    }

    #[test]
    fn test_solve_leaves_input_untouched() {
        let grid = classic(PUZZLE);
        let _ = HintSolver::with_all_finders().solve(&grid).unwrap();
        assert_eq!(grid.to_value_string(), classic(PUZZLE).to_value_string());
        assert!(grid.possible_values(2).contains(4));
    }

    #[test]
    fn test_full_house_has_priority() {
        let grid = nearly_full_row();
        let hint = HintSolver::with_all_finders().find_next_hint(&grid).unwrap();
        assert_eq!(hint.technique(), SolvingTechnique::FullHouse);
        let Hint::Assignment(hint) = hint else {
            panic!("expected a placement");
        };
        assert_eq!((hint.cell(), hint.value()), (8, 9));
    }

    #[test]
    fn test_empty_grid_makes_no_progress() {
        let grid = Grid::new(PredefinedType::Classic9x9.grid_type());
        let solver = HintSolver::new(vec![
            Box::new(NakedSingle::new()),
            Box::new(HiddenSingle::new()),
        ]);
        let (result, stats) = solver.solve(&grid).unwrap();
        assert!(!result.is_solved());
        assert!(!stats.has_progress());
        assert_eq!(stats.passes(), 0);
    }

    #[test]
    fn test_find_first_hints_takes_one_per_finder() {
        let grid = classic(PUZZLE);
        let solver = HintSolver::with_all_finders();
        let hints = solver.find_first_hints(&grid);
        assert!(!hints.is_empty());
        for pair in hints.windows(2) {
            assert!(pair[0].technique() < pair[1].technique());
        }
    }

    #[test]
    fn test_find_hints_single_step_collects_everything() {
        let grid = classic(PUZZLE);
        let solver = HintSolver::with_techniques(&[SolvingTechnique::NakedSingle]);
        let all = solver.find_hints_single_step(&grid);
        let first = solver.find_next_hint(&grid).unwrap();
        assert!(all.len() > 1);
        assert_eq!(all.hints()[0], first);
    }

    #[test]
    fn test_find_all_hints_replays_to_solution() {
        let grid = classic(PUZZLE);
        let trace = HintSolver::with_all_finders().find_all_hints(&grid).unwrap();
        let mut replay = grid.clone();
        for hint in &trace {
            hint.apply(&mut replay, UpdateMode::Incremental).unwrap();
        }
        assert_eq!(digits(&replay), SOLUTION);
    }

    #[test]
    fn test_panicking_finder_is_isolated() {
        let grid = nearly_full_row();
        let solver = HintSolver::new(vec![Box::new(PanickingFinder), Box::new(FullHouse::new())]);

        let hints = solver.find_hints_single_step(&grid);
        assert_eq!(hints.len(), 1);
        assert_eq!(hints.hints()[0].technique(), SolvingTechnique::FullHouse);

        let (_, stats) = solver.solve(&grid).unwrap();
        assert_eq!(stats.applications()[0], 0);
        assert!(stats.applications()[1] >= 1);
    }

    #[test]
    fn test_conflicting_grid_is_rejected() {
        let grid = classic(&format!("11{}", ".".repeat(79)));
        assert_eq!(
            HintSolver::with_all_finders().solve(&grid).unwrap_err(),
            SolverError::Inconsistent
        );
    }
}
