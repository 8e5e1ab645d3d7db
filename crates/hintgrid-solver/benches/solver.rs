//! Benchmarks for the complete solvers.
//!
//! # Benchmarks
//!
//! - **`hint_solver`**: Solves each puzzle with every registered finder.
//! - **`brute_force`**: Solves each puzzle by propagation and backtracking.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::{hint, time::Duration};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hintgrid_core::{Grid, PredefinedType};
use hintgrid_solver::{BruteForceSolver, HintSolver};

const PUZZLES: [(&str, &str); 2] = [
    (
        "easy",
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79",
    ),
    (
        "hard",
        "8..........36......7..9.2...5...7.......457.....1...3...1....68..85...1..9....4..",
    ),
];

fn puzzles() -> Vec<(&'static str, Grid)> {
    let grid_type = PredefinedType::Classic9x9.grid_type();
    PUZZLES
        .iter()
        .map(|(name, values)| (*name, Grid::from_values(grid_type.clone(), values).unwrap()))
        .collect()
}

fn bench_hint_solver(c: &mut Criterion) {
    let solver = HintSolver::with_all_finders();
    for (param, grid) in puzzles() {
        c.bench_with_input(BenchmarkId::new("hint_solver", param), &grid, |b, grid| {
            b.iter(|| solver.solve(hint::black_box(grid)).unwrap());
        });
    }
}

fn bench_brute_force(c: &mut Criterion) {
    let solver = BruteForceSolver::new();
    for (param, grid) in puzzles() {
        c.bench_with_input(BenchmarkId::new("brute_force", param), &grid, |b, grid| {
            b.iter(|| solver.solve(hint::black_box(grid)).unwrap());
        });
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets =
        bench_hint_solver,
        bench_brute_force
);
criterion_main!(benches);
