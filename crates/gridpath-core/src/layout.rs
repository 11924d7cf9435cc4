//! Text layouts for grids.
//!
//! A layout is a square block of characters, one line per row:
//!
//! ```text
//! S..#.
//! .#.#.
//! .#...
//! .##.#
//! ....E
//! ```
//!
//! `.` is an empty cell, `#` a barrier, `S` the start and `E` the end.
//! Leading and trailing whitespace on each line is ignored, as are blank
//! lines. [`Grid`]'s `Display` writes the same format, plus `o`, `x` and
//! `*` for open, closed and path cells.

use std::fmt;
use std::str::FromStr;

use crate::cell::Role;
use crate::error::GridError;
use crate::geom::Point;
use crate::grid::Grid;

impl Grid {
    /// Build a grid from a text layout.
    pub fn parse(layout: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(GridError::Layout("empty layout".into()));
        }
        let rows = lines.len();
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != rows {
                return Err(GridError::Layout(format!(
                    "row {row} has {width} cells, expected {rows} for a square grid"
                )));
            }
        }

        let mut grid = Grid::new(rows as i32)?;
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let p = Point::new(row as i32, col as i32);
                match Role::from_char(ch) {
                    Some(Role::None) => {}
                    Some(Role::Barrier) => {
                        grid.toggle_barrier(p)?;
                    }
                    Some(role @ (Role::Start | Role::End)) => {
                        let existing = if role == Role::Start {
                            grid.start()
                        } else {
                            grid.end()
                        };
                        if let Some(q) = existing {
                            return Err(GridError::Layout(format!(
                                "duplicate \u{201c}{ch}\u{201d} at {p}, first seen at {q}"
                            )));
                        }
                        if role == Role::Start {
                            grid.set_start(p)?;
                        } else {
                            grid.set_end(p)?;
                        }
                    }
                    _ => {
                        return Err(GridError::Layout(format!(
                            "invalid character \u{201c}{ch}\u{201d} at {p}"
                        )));
                    }
                }
            }
        }
        Ok(grid)
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.rows() as usize;
        for (i, cell) in self.iter().enumerate() {
            write!(f, "{}", cell.role().to_char())?;
            if (i + 1) % w == 0 && i + 1 < self.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
