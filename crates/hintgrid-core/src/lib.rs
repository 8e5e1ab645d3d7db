//! Core puzzle-state engine for Sudoku-style grids.
//!
//! This crate provides the data structures every solving component works on.
//!
//! # Overview
//!
//! 1. **Bit sets** - [`bit_set`]: fixed-capacity sets with semantic domains,
//!    specialised as [`ValueSet`] (candidate values, 1-based), [`CellSet`] and
//!    [`HouseSet`] (0-based indices).
//! 2. **Geometry** - [`GridType`] fixes the grid size and the cell-to-block
//!    mapping; [`PredefinedType`] offers the 4x4, 6x6, classic 9x9 and jigsaw
//!    presets.
//! 3. **Grid model** - [`Grid`] holds cell values, given flags and exclusions
//!    and maintains derived candidate caches under an explicit validity
//!    protocol (see [`UpdateMode`]). [`Cell`] is a borrowed read view;
//!    [`House`] identifies rows, columns and blocks.
//! 4. **Text boundary** - [`Grid::load_values`] and [`Grid::to_value_string`].
//!
//! # Examples
//!
//! ```
//! use hintgrid_core::{Grid, House, PredefinedType, UpdateMode};
//!
//! let mut grid = Grid::new(PredefinedType::Classic9x9.grid_type());
//! grid.set_value(0, 5, UpdateMode::Incremental)?;
//!
//! let row = House::Row { index: 0 };
//! assert!(grid.assigned_values(row).contains(5));
//! assert!(!grid.cell_at(0, 8).possible_values().contains(5));
//! # Ok::<(), hintgrid_core::GridError>(())
//! ```

pub mod bit_set;
mod cell;
mod conflict;
mod error;
mod geometry;
mod grid;
mod house;
mod io;

pub use self::{
    bit_set::{BitSet, CellSet, HouseSet, ValueSet},
    cell::Cell,
    conflict::Conflict,
    error::{GridError, LoadError},
    geometry::{GridType, MAX_GRID_SIZE, PredefinedType},
    grid::{Grid, UpdateHook, UpdateMode},
    house::{House, HouseKind},
};
