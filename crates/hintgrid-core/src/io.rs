//! Text boundary of a grid: loading values from and exporting them to strings.
//!
//! The format has one symbol per cell in row-major order:
//!
//! - `1`-`9`, then `A`-`G` for values 10 to 16: a given value
//! - `+` followed by a value symbol: a placed value that is not given
//! - `0`, `.`, `-` or `_`: an unknown cell
//! - whitespace and `|`: ignored
//!
//! # Examples
//!
//! ```
//! use hintgrid_core::{Grid, PredefinedType};
//!
//! let grid = Grid::from_values(
//!     PredefinedType::Classic4x4.grid_type(),
//!     "12.. +34.. .... ....",
//! )?;
//! assert!(grid.is_given(0));
//! assert!(!grid.is_given(4));
//! assert_eq!(grid.value(4), 3);
//! assert_eq!(grid.to_value_string(), "12..+34..........");
//! # Ok::<(), hintgrid_core::LoadError>(())
//! ```

use std::fmt;

use crate::{Grid, GridType, LoadError, UpdateMode};

fn value_symbol(value: usize) -> char {
    match value {
        1..=9 => char::from(b'0' + value as u8),
        10..=16 => char::from(b'A' + (value - 10) as u8),
        _ => '?',
    }
}

fn symbol_value(symbol: char) -> Option<usize> {
    match symbol {
        '1'..='9' => symbol.to_digit(10).map(|d| d as usize),
        'A'..='G' => Some(symbol as usize - 'A' as usize + 10),
        'a'..='g' => Some(symbol as usize - 'a' as usize + 10),
        _ => None,
    }
}

impl Grid {
    /// Creates a grid of the given geometry and loads values into it.
    ///
    /// # Errors
    ///
    /// See [`Grid::load_values`].
    pub fn from_values(grid_type: GridType, input: &str) -> Result<Self, LoadError> {
        let mut grid = Self::new(grid_type);
        grid.load_values(input)?;
        Ok(grid)
    }

    /// Loads one symbol per cell from `input` and rebuilds the derived state.
    ///
    /// Symbols left over after the last cell are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Exhausted`] if the input ends early and
    /// [`LoadError::InvalidCharacter`] for a symbol outside the alphabet or a
    /// value larger than the grid size. The grid is left partially loaded.
    pub fn load_values(&mut self, input: &str) -> Result<(), LoadError> {
        let count = self.cell_count();
        let size = self.grid_size();
        let mut chars = input.char_indices();
        let mut placed = false;
        let mut cell = 0;

        while cell < count {
            let Some((offset, character)) = chars.next() else {
                return Err(LoadError::Exhausted {
                    filled: cell,
                    expected: count,
                });
            };
            let invalid = LoadError::InvalidCharacter { character, offset };
            let value = match character {
                c if c.is_whitespace() || c == '|' => continue,
                '+' if !placed => {
                    placed = true;
                    continue;
                }
                '0' | '.' | '-' | '_' if !placed => 0,
                c => symbol_value(c).filter(|&v| v <= size).ok_or(invalid)?,
            };
            self.set_given(cell, false);
            self.set_value(cell, value, UpdateMode::Deferred)?;
            self.set_given(cell, value != 0 && !placed);
            placed = false;
            cell += 1;
        }

        self.update_state();
        log::debug!(
            "loaded {} given and {} placed values",
            (0..count).filter(|&c| self.is_given(c)).count(),
            (0..count)
                .filter(|&c| self.is_assigned(c) && !self.is_given(c))
                .count()
        );
        Ok(())
    }

    /// Exports the values in the format accepted by [`Grid::load_values`].
    #[must_use]
    pub fn to_value_string(&self) -> String {
        let mut out = String::with_capacity(self.cell_count() * 2);
        for cell in self.cells() {
            match cell.value() {
                0 => out.push('.'),
                value => {
                    if !cell.is_given() {
                        out.push('+');
                    }
                    out.push(value_symbol(value));
                }
            }
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.grid_size();
        for row in 0..size {
            if row > 0 {
                writeln!(f)?;
            }
            for column in 0..size {
                if column > 0 {
                    f.write_str(" ")?;
                }
                match self.cell_at(row, column).value() {
                    0 => f.write_str(".")?,
                    value => write!(f, "{}", value_symbol(value))?,
                }
            }
        }
        Ok(())
    }
}
