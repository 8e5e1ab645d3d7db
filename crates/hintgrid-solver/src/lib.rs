//! Human-style hints and solvers for [`hintgrid_core`] grids.
//!
//! # Overview
//!
//! - [`technique`] holds one [`HintFinder`] per [`SolvingTechnique`]. Finders
//!   scan a grid without changing it and report [`Hint`]s into a
//!   [`HintAggregator`].
//! - [`HintSolver`] runs finders in priority order and applies what they
//!   find, pass after pass.
//! - [`BruteForceSolver`] combines singles propagation with a
//!   fewest-candidates-first backtracking search.
//!
//! # Examples
//!
//! ```
//! use hintgrid_core::{Grid, PredefinedType};
//! use hintgrid_solver::{HintSolver, SolvingTechnique};
//!
//! let grid = Grid::from_values(
//!     PredefinedType::Classic9x9.grid_type(),
//!     "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79",
//! )?;
//!
//! let solver = HintSolver::with_all_finders();
//! let hint = solver.find_next_hint(&grid).expect("an easy puzzle has hints");
//! assert!(hint.technique() <= SolvingTechnique::HiddenSingle);
//!
//! let (solved, _stats) = solver.solve(&grid)?;
//! assert!(solved.is_solved());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    aggregator::HintAggregator,
    brute_force::{BruteForceSolver, BruteForceStats, SearchDirection},
    chain::{Chain, ChainCellState, ChainNode, LinkType},
    error::SolverError,
    hint::{AssignmentHint, ChainEliminationHint, EliminationHint, Hint},
    hint_solver::{HintSolver, HintSolverStats},
    solving_technique::{SolvingTechnique, UnknownTechnique},
    technique::{BoxedHintFinder, HintFinder},
};

mod aggregator;
mod brute_force;
mod chain;
mod error;
mod hint;
mod hint_solver;
mod solving_technique;
pub mod technique;

#[cfg(test)]
mod testing;
