//! Example solving puzzles with the hint solver or the brute-force solver.
//!
//! This example shows how to:
//! - Load puzzles of any predefined geometry from text
//! - Solve them with `HintSolver` and report technique usage
//! - List the hints that lead to a solution
//! - Fall back to `BruteForceSolver` and report search counters
//! - Solve a batch of puzzles in parallel
//!
//! # Usage
//!
//! Solve a single puzzle with every technique:
//!
//! ```sh
//! cargo run --example solve -- "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79"
//! ```
//!
//! Restrict the techniques (case-insensitive) or use another geometry:
//!
//! ```sh
//! cargo run --example solve -- --technique "Naked Single" --technique "Hidden Single" PUZZLE
//! cargo run --example solve -- --grid-type classic4x4 "1.3..4.22.4..3.1"
//! ```
//!
//! Print every hint applied on the way to the solution:
//!
//! ```sh
//! cargo run --example solve -- --solver trace PUZZLE
//! ```
//!
//! Solve with backtracking, trying the largest candidate first:
//!
//! ```sh
//! cargo run --example solve -- --solver brute-force --direction backward PUZZLE
//! ```
//!
//! Set `RUST_LOG=debug` to see solver progress, or `RUST_LOG=trace` for every
//! applied hint.

use std::process;

use clap::{Parser, ValueEnum};
use hintgrid_core::{Grid, PredefinedType};
use hintgrid_solver::{
    BruteForceSolver, HintSolver, SearchDirection, SolverError, SolvingTechnique,
};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverKind {
    Hints,
    Trace,
    BruteForce,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GridKind {
    Classic4x4,
    Classic6x6,
    Classic9x9,
    Jigsaw,
}

impl From<GridKind> for PredefinedType {
    fn from(kind: GridKind) -> Self {
        match kind {
            GridKind::Classic4x4 => Self::Classic4x4,
            GridKind::Classic6x6 => Self::Classic6x6,
            GridKind::Classic9x9 => Self::Classic9x9,
            GridKind::Jigsaw => Self::Jigsaw1,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Solver to use.
    #[arg(long, value_name = "KIND", default_value = "hints")]
    solver: SolverKind,

    /// Grid geometry of every puzzle.
    #[arg(long, value_name = "TYPE", default_value = "classic9x9")]
    grid_type: GridKind,

    /// Technique name for the hint solver (case-insensitive). Repeatable.
    #[arg(short, long = "technique", value_name = "TECHNIQUE")]
    techniques: Vec<String>,

    /// Candidate order for the brute-force solver.
    #[arg(long, value_name = "DIRECTION", default_value = "forward")]
    direction: Direction,

    /// Puzzles in row-major order, `.` or `0` for empty cells.
    #[arg(required = true, value_name = "PUZZLE")]
    puzzles: Vec<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let grid_type = PredefinedType::from(args.grid_type).grid_type();

    let mut techniques = Vec::with_capacity(args.techniques.len());
    for name in &args.techniques {
        match name.parse::<SolvingTechnique>() {
            Ok(technique) => techniques.push(technique),
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Available techniques:");
                for technique in SolvingTechnique::ALL {
                    eprintln!("  {technique}");
                }
                process::exit(2);
            }
        }
    }

    let grids = args
        .puzzles
        .iter()
        .map(|puzzle| Grid::from_values(grid_type.clone(), puzzle))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|err| {
            eprintln!("Invalid puzzle: {err}");
            process::exit(1);
        });

    let hint_solver = if techniques.is_empty() {
        HintSolver::with_all_finders()
    } else {
        HintSolver::with_techniques(&techniques)
    };
    let reports = match args.solver {
        SolverKind::Hints => grids
            .par_iter()
            .map(|grid| solve_with_hints(&hint_solver, grid))
            .collect::<Vec<_>>(),
        SolverKind::Trace => grids
            .par_iter()
            .map(|grid| trace_hints(&hint_solver, grid))
            .collect::<Vec<_>>(),
        SolverKind::BruteForce => {
            let direction = match args.direction {
                Direction::Forward => SearchDirection::Forward,
                Direction::Backward => SearchDirection::Backward,
            };
            let solver = BruteForceSolver::new().with_direction(direction);
            grids
                .par_iter()
                .map(|grid| solve_by_search(&solver, grid))
                .collect::<Vec<_>>()
        }
    };

    let mut unsolved = 0;
    for (puzzle, report) in args.puzzles.iter().zip(reports) {
        println!("Puzzle:");
        println!("  {puzzle}");
        match report {
            Ok((solved, lines)) => {
                if !solved {
                    unsolved += 1;
                }
                for line in lines {
                    println!("{line}");
                }
            }
            Err(err) => {
                unsolved += 1;
                println!("  error: {err}");
            }
        }
        println!();
    }

    if unsolved > 0 {
        eprintln!("{unsolved} puzzle(s) left unsolved.");
        process::exit(1);
    }
}

fn solve_with_hints(solver: &HintSolver, grid: &Grid) -> Result<(bool, Vec<String>), SolverError> {
    let (result, stats) = solver.solve(grid)?;
    let mut lines = vec![
        "Result:".to_owned(),
        format!("{result}"),
        "Stats:".to_owned(),
    ];
    for (finder, count) in solver.finders().iter().zip(stats.applications()) {
        if *count > 0 {
            lines.push(format!("  {}: {count}", finder.technique()));
        }
    }
    lines.push(format!("  total: {}", stats.total_steps()));
    lines.push(format!("  solved: {}", result.is_solved()));
    Ok((result.is_solved(), lines))
}

fn trace_hints(solver: &HintSolver, grid: &Grid) -> Result<(bool, Vec<String>), SolverError> {
    let hints = solver.find_all_hints(grid)?;
    let mut result = grid.clone();
    hints.apply_hints(&mut result)?;
    let mut lines = vec!["Hints:".to_owned()];
    lines.extend(
        hints
            .iter()
            .enumerate()
            .map(|(step, hint)| format!("  {:>3}. {hint}", step + 1)),
    );
    lines.push(format!("  solved: {}", result.is_solved()));
    Ok((result.is_solved(), lines))
}

fn solve_by_search(
    solver: &BruteForceSolver,
    grid: &Grid,
) -> Result<(bool, Vec<String>), SolverError> {
    let (result, stats) = solver.solve(grid)?;
    let lines = vec![
        "Result:".to_owned(),
        format!("{result}"),
        "Stats:".to_owned(),
        format!("  guesses: {}", stats.guesses),
        format!("  backtracks: {}", stats.backtracks),
        format!("  propagations: {}", stats.direct_propagations),
        format!("  solved: {}", result.is_solved()),
    ];
    Ok((result.is_solved(), lines))
}
