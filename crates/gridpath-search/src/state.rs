use gridpath_core::{Grid, Point};

/// Cost value meaning "not reached" (+∞).
pub const UNREACHABLE: u32 = u32::MAX;

/// Per-run bookkeeping: cost-from-start, priority keys, predecessors and
/// the closed set, stored as flat arrays indexed like the [`Grid`].
///
/// The engine reinitialises it at the start of every run, so nothing from
/// a previous search leaks into the next one.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    rows: i32,
    pub(crate) g: Vec<u32>,
    pub(crate) f: Vec<u32>,
    pub(crate) came_from: Vec<Option<usize>>,
    pub(crate) closed: Vec<bool>,
}

impl SearchState {
    /// Size the state for `grid` and mark every cell unreached.
    pub(crate) fn reset(&mut self, grid: &Grid) {
        let len = grid.len();
        self.rows = grid.rows();
        self.g.clear();
        self.g.resize(len, UNREACHABLE);
        self.f.clear();
        self.f.resize(len, UNREACHABLE);
        self.came_from.clear();
        self.came_from.resize(len, None);
        self.closed.clear();
        self.closed.resize(len, false);
    }

    /// Whether a popped frontier entry no longer reflects the cell: the
    /// cell was already expanded or has since been queued with a smaller key.
    #[inline]
    pub(crate) fn is_stale(&self, idx: usize, key: u32) -> bool {
        self.closed[idx] || key != self.f[idx]
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        let inside = p.row >= 0 && p.col >= 0 && p.row < self.rows && p.col < self.rows;
        inside.then(|| (p.row * self.rows + p.col) as usize)
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        let w = self.rows as usize;
        Point::new((idx / w) as i32, (idx % w) as i32)
    }

    /// Cost from the start to `p` found by the last run, or `None` if `p`
    /// was never reached.
    pub fn cost_at(&self, p: Point) -> Option<u32> {
        let i = self.idx(p)?;
        let g = *self.g.get(i)?;
        (g != UNREACHABLE).then_some(g)
    }

    /// Predecessor of `p` on its best known route, if any.
    pub fn came_from(&self, p: Point) -> Option<Point> {
        let i = self.idx(p)?;
        self.came_from.get(i).copied().flatten().map(|j| self.point(j))
    }

    /// Whether `p` was expanded during the last run.
    pub fn is_closed(&self, p: Point) -> bool {
        self.idx(p)
            .and_then(|i| self.closed.get(i).copied())
            .unwrap_or(false)
    }

    /// The start→`p` route recorded by the last run, or `None` if `p` was
    /// not reached.
    pub fn path_to(&self, p: Point) -> Option<Vec<Point>> {
        let i = self.idx(p)?;
        (*self.g.get(i)? != UNREACHABLE).then(|| self.reconstruct(i))
    }

    /// Walk predecessors from `goal` back to the cell that has none (the
    /// start) and return the route in start→goal order.
    pub(crate) fn reconstruct(&self, goal: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(goal);
        while let Some(i) = cur {
            path.push(self.point(i));
            cur = self.came_from[i];
        }
        path.reverse();
        path
    }
}
