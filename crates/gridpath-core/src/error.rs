use std::fmt;

use crate::geom::Point;

/// Errors raised when building or editing a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The requested row count is not positive.
    InvalidSize(i32),
    /// A point lies outside the grid.
    OutOfBounds(Point),
    /// A text layout could not be parsed.
    Layout(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize(rows) => write!(f, "grid: invalid size {rows}, rows must be positive"),
            Self::OutOfBounds(p) => write!(f, "grid: point {p} is out of bounds"),
            Self::Layout(msg) => write!(f, "grid layout: {msg}"),
        }
    }
}

impl std::error::Error for GridError {}
