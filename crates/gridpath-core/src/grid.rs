//! The [`Grid`] type — a square 2D array of [`Cell`]s with editing
//! operations and 4-way adjacency.
//!
//! The topology is fixed when the grid is built; only cell roles change.
//! The grid keeps track of its start and end cells so that at most one of
//! each exists at any time.

use crate::cell::{Cell, Role};
use crate::error::GridError;
use crate::geom::Point;

/// A square grid of [`Cell`]s stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: i32,
    cells: Vec<Cell>,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    /// Create a `rows × rows` grid with every cell empty and passable.
    pub fn new(rows: i32) -> Result<Self, GridError> {
        if rows <= 0 {
            return Err(GridError::InvalidSize(rows));
        }
        let cells = (0..rows)
            .flat_map(|row| (0..rows).map(move |col| Cell::new(Point::new(row, col))))
            .collect();
        Ok(Self {
            rows,
            cells,
            start: None,
            end: None,
        })
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.rows && p.col < self.rows
    }

    /// Flat row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        self.contains(p)
            .then(|| (p.row as usize) * (self.rows as usize) + p.col as usize)
    }

    /// Inverse of [`index`](Grid::index). `idx` must be below [`len`](Grid::len).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.rows as usize;
        Point::new((idx / w) as i32, (idx % w) as i32)
    }

    /// The cell at `p`, if in bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// The role at `p`, if in bounds.
    #[inline]
    pub fn role(&self, p: Point) -> Option<Role> {
        self.at(p).map(Cell::role)
    }

    /// Whether `p` is in bounds and not a barrier.
    #[inline]
    pub fn passable(&self, p: Point) -> bool {
        self.at(p).is_some_and(Cell::passable)
    }

    /// The current start cell.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The current end cell.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Number of cells currently holding `role`.
    pub fn count(&self, role: Role) -> usize {
        self.cells.iter().filter(|c| c.role == role).count()
    }

    fn checked_index(&self, p: Point) -> Result<usize, GridError> {
        self.index(p).ok_or(GridError::OutOfBounds(p))
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Turn `p` into a barrier.
    ///
    /// Start and end cells are left alone. Returns whether the cell changed.
    pub fn toggle_barrier(&mut self, p: Point) -> Result<bool, GridError> {
        let i = self.checked_index(p)?;
        let cell = &mut self.cells[i];
        if cell.role.is_endpoint() || cell.role == Role::Barrier {
            return Ok(false);
        }
        cell.role = Role::Barrier;
        Ok(true)
    }

    /// Make `p` the start cell, demoting any previous start.
    ///
    /// Rejected (returns `false`) if `p` is the end cell or a barrier.
    pub fn set_start(&mut self, p: Point) -> Result<bool, GridError> {
        self.set_endpoint(p, Role::Start)
    }

    /// Make `p` the end cell, demoting any previous end.
    ///
    /// Rejected (returns `false`) if `p` is the start cell or a barrier.
    pub fn set_end(&mut self, p: Point) -> Result<bool, GridError> {
        self.set_endpoint(p, Role::End)
    }

    fn set_endpoint(&mut self, p: Point, role: Role) -> Result<bool, GridError> {
        let i = self.checked_index(p)?;
        let current = self.cells[i].role;
        if current == role {
            return Ok(true);
        }
        if current.is_endpoint() || current == Role::Barrier {
            log::debug!("rejected {role:?} at {p}: cell is {current:?}");
            return Ok(false);
        }
        let slot = match role {
            Role::Start => &mut self.start,
            _ => &mut self.end,
        };
        if let Some(prev) = slot.replace(p) {
            let j = (prev.row as usize) * (self.rows as usize) + prev.col as usize;
            self.cells[j].role = Role::None;
        }
        self.cells[i].role = role;
        Ok(true)
    }

    /// Reset `p` to an empty cell, forgetting it as start or end.
    ///
    /// Returns the role the cell had before.
    pub fn clear_cell(&mut self, p: Point) -> Result<Role, GridError> {
        let i = self.checked_index(p)?;
        let prev = std::mem::take(&mut self.cells[i].role);
        match prev {
            Role::Start => self.start = None,
            Role::End => self.end = None,
            _ => {}
        }
        Ok(prev)
    }

    /// Clear every Open, Closed and Path marking. Barriers and endpoints stay.
    pub fn reset_search_roles(&mut self) {
        for cell in &mut self.cells {
            if cell.role.is_search() {
                cell.role = Role::None;
            }
        }
    }

    /// Return the grid to its freshly-built state.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.role = Role::None;
        }
        self.start = None;
        self.end = None;
    }

    /// Record a search role (Open, Closed or Path) on `p`.
    ///
    /// Endpoints and barriers are never overwritten. Returns whether the
    /// role actually changed, so callers only report real transitions.
    pub fn mark(&mut self, p: Point, role: Role) -> bool {
        debug_assert!(role.is_search(), "mark() only writes search roles");
        let Some(i) = self.index(p) else {
            return false;
        };
        let cell = &mut self.cells[i];
        if cell.role == role || cell.role.is_endpoint() || cell.role == Role::Barrier {
            return false;
        }
        cell.role = role;
        true
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Append the passable orthogonal neighbours of `p` into `buf`.
    ///
    /// The caller clears `buf`. Order follows [`Point::neighbors_4`].
    pub fn neighbors_into(&self, p: Point, buf: &mut Vec<Point>) {
        if !self.contains(p) {
            return;
        }
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.passable(n)));
    }

    /// The passable orthogonal neighbours of `p`, computed fresh.
    pub fn neighbors(&self, p: Point) -> Vec<Point> {
        let mut buf = Vec::with_capacity(4);
        self.neighbors_into(p, &mut buf);
        buf
    }
}
