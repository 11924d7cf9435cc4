//! The [`Cell`] type — a grid position tagged with a [`Role`].

use crate::geom::Point;

/// What a cell currently means, for editing and for observers.
///
/// Only [`Role::Barrier`] affects the search; the other roles are
/// observation state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    None,
    Start,
    End,
    Barrier,
    /// Discovered and waiting in the frontier.
    Open,
    /// Expanded.
    Closed,
    /// On the reconstructed path.
    Path,
}

impl Role {
    /// Whether the role is one the search engine writes and
    /// [`Grid::reset_search_roles`](crate::Grid::reset_search_roles) clears.
    #[inline]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }

    /// Whether the role belongs to a start or end cell.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Layout character used by [`Grid`](crate::Grid) parsing and display.
    pub const fn to_char(self) -> char {
        match self {
            Self::None => '.',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Barrier => '#',
            Self::Open => 'o',
            Self::Closed => 'x',
            Self::Path => '*',
        }
    }

    /// Inverse of [`to_char`](Role::to_char).
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::None),
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            '#' => Some(Self::Barrier),
            'o' => Some(Self::Open),
            'x' => Some(Self::Closed),
            '*' => Some(Self::Path),
            _ => None,
        }
    }
}

/// A single grid position.
///
/// The position is fixed at creation. Passability is derived from the role,
/// so a barrier can never be passable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Point,
    pub(crate) role: Role,
}

impl Cell {
    #[inline]
    pub(crate) const fn new(pos: Point) -> Self {
        Self {
            pos,
            role: Role::None,
        }
    }

    #[inline]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub const fn row(&self) -> i32 {
        self.pos.row
    }

    #[inline]
    pub const fn col(&self) -> i32 {
        self.pos.col
    }

    #[inline]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Whether the search may step onto this cell.
    #[inline]
    pub const fn passable(&self) -> bool {
        !matches!(self.role, Role::Barrier)
    }
}
