use std::fmt;
use std::str::FromStr;

use gridpath_core::Point;

use crate::distance::manhattan;

/// Which search algorithm [`SearchEngine`](crate::SearchEngine) runs.
///
/// Both share the same frontier machinery and differ only in the priority
/// key they assign to a discovered cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Best-first search keyed on `g + manhattan(cell, goal)`.
    #[default]
    AStar,
    /// Dijkstra: keyed on `g` alone.
    UniformCost,
}

impl Mode {
    /// Priority key for a cell at `p` with cost-from-start `g`.
    #[inline]
    pub fn priority(self, g: u32, p: Point, goal: Point) -> u32 {
        match self {
            Self::AStar => g + manhattan(p, goal),
            Self::UniformCost => g,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AStar => "astar",
            Self::UniformCost => "dijkstra",
        })
    }
}

/// Error returned when parsing an unknown [`Mode`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown search mode \u{201c}{}\u{201d} (expected astar or dijkstra)",
            self.0
        )
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "astar" | "a*" => Ok(Self::AStar),
            "d" | "dijkstra" | "uniform" | "uniform-cost" => Ok(Self::UniformCost),
            _ => Err(ParseModeError(s.to_owned())),
        }
    }
}
