use std::fmt;

use gridpath_core::Point;

/// Reasons a search refuses to start.
///
/// "No path" and "cancelled" are ordinary
/// [`SearchOutcome`](crate::SearchOutcome)s, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// No start cell was given.
    MissingStart,
    /// No end cell was given.
    MissingEnd,
    /// The start or end cell is a barrier.
    BarrierEndpoint(Point),
    /// The start or end cell lies outside the grid.
    OutOfBounds(Point),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => f.write_str("search: start cell is not set"),
            Self::MissingEnd => f.write_str("search: end cell is not set"),
            Self::BarrierEndpoint(p) => write!(f, "search: endpoint {p} is a barrier"),
            Self::OutOfBounds(p) => write!(f, "search: endpoint {p} is outside the grid"),
        }
    }
}

impl std::error::Error for SearchError {}
