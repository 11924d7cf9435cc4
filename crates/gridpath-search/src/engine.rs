use gridpath_core::{Grid, Point, Role};

use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::mode::Mode;
use crate::state::SearchState;
use crate::traits::{Flow, StepEvent, StepObserver};

/// Result of a search that was allowed to start.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// A shortest path, start first and end last. `cost` is the number of
    /// moves, i.e. `path.len() - 1`.
    Found { path: Vec<Point>, cost: u32 },
    /// Every reachable cell was expanded without meeting the end.
    NotFound,
    /// The observer asked to stop, or the expansion budget ran out.
    Cancelled,
}

impl SearchOutcome {
    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            Self::Found { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The path cost, if one was found.
    pub fn cost(&self) -> Option<u32> {
        match self {
            Self::Found { cost, .. } => Some(*cost),
            _ => None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Counters collected during the last run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells taken off the frontier and expanded.
    pub expanded: usize,
    /// Entries pushed onto the frontier, duplicates included.
    pub pushed: usize,
    /// Popped entries skipped because they were superseded.
    pub stale: usize,
    /// Events delivered to the observer.
    pub events: usize,
}

/// Engine settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Write Open/Closed/Path roles into the grid and notify the observer.
    /// When `false` the grid is left untouched and no events are sent.
    pub mark_roles: bool,
    /// Give up with [`SearchOutcome::Cancelled`] after expanding this many
    /// cells.
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mark_roles: true,
            max_expansions: None,
        }
    }
}

/// Shortest-path search over a [`Grid`].
///
/// The engine owns its frontier and cost maps and rebuilds them at the
/// start of every run; after a run they can be inspected through
/// [`state`](SearchEngine::state) and [`cost_at`](SearchEngine::cost_at).
#[derive(Debug, Default)]
pub struct SearchEngine {
    config: SearchConfig,
    state: SearchState,
    frontier: Frontier,
    stats: SearchStats,
    last_mode: Option<Mode>,
    nbuf: Vec<Point>,
}

impl SearchEngine {
    /// Create an engine with the default [`SearchConfig`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Bookkeeping left by the last run.
    #[inline]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Counters from the last run.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Mode of the last run, if any.
    #[inline]
    pub fn last_mode(&self) -> Option<Mode> {
        self.last_mode
    }

    /// Cost from the start to `p` found by the last run.
    #[inline]
    pub fn cost_at(&self, p: Point) -> Option<u32> {
        self.state.cost_at(p)
    }

    /// Search between the grid's own start and end cells.
    pub fn run<O>(
        &mut self,
        mode: Mode,
        grid: &mut Grid,
        observer: &mut O,
    ) -> Result<SearchOutcome, SearchError>
    where
        O: StepObserver + ?Sized,
    {
        let (start, end) = (grid.start(), grid.end());
        self.search(mode, grid, start, end, observer)
    }

    /// Search from `start` to `end` over `grid`.
    ///
    /// Fails without touching the grid if either endpoint is missing, out
    /// of bounds or a barrier. Otherwise search roles left by an earlier
    /// run are cleared and the search runs to completion, to exhaustion or
    /// until cancelled.
    pub fn search<O>(
        &mut self,
        mode: Mode,
        grid: &mut Grid,
        start: Option<Point>,
        end: Option<Point>,
        observer: &mut O,
    ) -> Result<SearchOutcome, SearchError>
    where
        O: StepObserver + ?Sized,
    {
        let start = start.ok_or(SearchError::MissingStart)?;
        let end = end.ok_or(SearchError::MissingEnd)?;
        let start_idx = grid.index(start).ok_or(SearchError::OutOfBounds(start))?;
        let goal_idx = grid.index(end).ok_or(SearchError::OutOfBounds(end))?;
        for p in [start, end] {
            if !grid.passable(p) {
                return Err(SearchError::BarrierEndpoint(p));
            }
        }

        self.state.reset(grid);
        self.frontier.clear();
        self.stats = SearchStats::default();
        self.last_mode = Some(mode);
        if self.config.mark_roles {
            grid.reset_search_roles();
        }
        let rows = grid.rows();
        log::debug!("{mode} search from {start} to {end} on {rows}x{rows} grid");

        let key = mode.priority(0, start, end);
        self.state.g[start_idx] = 0;
        self.state.f[start_idx] = key;
        self.frontier.push(start_idx, key);
        self.stats.pushed += 1;

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = 'search: loop {
            let Some((ci, key)) = self.frontier.pop() else {
                break 'search SearchOutcome::NotFound;
            };

            if self.state.is_stale(ci, key) {
                self.stats.stale += 1;
                continue;
            }

            if ci == goal_idx {
                let path = self.state.reconstruct(ci);
                let cost = self.state.g[ci];
                // The path is already found: a stop request here changes
                // nothing.
                self.restore_end(grid, observer, end);
                for &p in path.iter().skip(1).take(path.len().saturating_sub(2)) {
                    self.emit(grid, observer, p, Role::Path);
                }
                break 'search SearchOutcome::Found { path, cost };
            }

            if self
                .config
                .max_expansions
                .is_some_and(|max| self.stats.expanded >= max)
            {
                log::info!(
                    "{mode} search gave up after {} expansions",
                    self.stats.expanded
                );
                break 'search SearchOutcome::Cancelled;
            }

            self.stats.expanded += 1;
            let cp = grid.point(ci);
            let tentative = self.state.g[ci] + 1;
            log::trace!("expand {cp} g={} f={key}", self.state.g[ci]);

            nbuf.clear();
            grid.neighbors_into(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = grid.index(np) else {
                    continue;
                };
                if tentative >= self.state.g[ni] {
                    continue;
                }

                let nkey = mode.priority(tentative, np, end);
                self.state.g[ni] = tentative;
                self.state.f[ni] = nkey;
                self.state.came_from[ni] = Some(ci);
                self.state.closed[ni] = false;

                let queued = self.frontier.contains(ni);
                self.frontier.push(ni, nkey);
                self.stats.pushed += 1;
                if !queued && self.emit(grid, observer, np, Role::Open) == Flow::Stop {
                    break 'search SearchOutcome::Cancelled;
                }
            }

            self.state.closed[ci] = true;
            if ci != start_idx && self.emit(grid, observer, cp, Role::Closed) == Flow::Stop {
                break 'search SearchOutcome::Cancelled;
            }
        };

        self.nbuf = nbuf;

        match &outcome {
            SearchOutcome::Found { cost, .. } => {
                log::debug!("{mode} search found path of cost {cost}: {:?}", self.stats)
            }
            SearchOutcome::NotFound => log::debug!("{mode} search found no path: {:?}", self.stats),
            SearchOutcome::Cancelled => log::info!("{mode} search cancelled: {:?}", self.stats),
        }
        Ok(outcome)
    }

    /// Make `end` the grid's end cell once it has been reached. A goal
    /// passed explicitly to [`search`](SearchEngine::search) may have been
    /// marked Open on the way; the grid's previous end, if any, is demoted.
    fn restore_end<O>(&mut self, grid: &mut Grid, observer: &mut O, end: Point)
    where
        O: StepObserver + ?Sized,
    {
        if !self.config.mark_roles || grid.role(end) == Some(Role::End) {
            return;
        }
        if let Ok(true) = grid.set_end(end) {
            self.stats.events += 1;
            observer.on_step(StepEvent {
                pos: end,
                role: Role::End,
            });
        }
    }

    /// Apply a role change to the grid and report it. Unchanged cells are
    /// not reported.
    fn emit<O>(&mut self, grid: &mut Grid, observer: &mut O, pos: Point, role: Role) -> Flow
    where
        O: StepObserver + ?Sized,
    {
        if !self.config.mark_roles || !grid.mark(pos, role) {
            return Flow::Continue;
        }
        self.stats.events += 1;
        observer.on_step(StepEvent { pos, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{EventLog, NoopObserver};

    fn run(mode: Mode, grid: &mut Grid) -> (SearchEngine, SearchOutcome) {
        let mut engine = SearchEngine::new();
        let outcome = engine.run(mode, grid, &mut NoopObserver).unwrap();
        (engine, outcome)
    }

    fn open_grid(rows: i32, start: Point, end: Point) -> Grid {
        let mut g = Grid::new(rows).unwrap();
        g.set_start(start).unwrap();
        g.set_end(end).unwrap();
        g
    }

    fn assert_valid_path(grid: &Grid, path: &[Point], start: Point, end: Point) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {}", w[0], w[1]);
        }
        let mut seen = path.to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), path.len(), "path repeats a cell");
        assert!(path.iter().all(|&p| grid.passable(p)));
    }

    #[test]
    fn open_5x5_corner_to_corner() {
        let (start, end) = (Point::new(0, 0), Point::new(4, 4));
        for mode in [Mode::AStar, Mode::UniformCost] {
            let mut g = open_grid(5, start, end);
            let (engine, outcome) = run(mode, &mut g);
            let path = outcome.path().unwrap();
            assert_eq!(path.len(), 9, "{mode}");
            assert_eq!(outcome.cost(), Some(8));
            assert_eq!(engine.cost_at(end), Some(8));
            assert_valid_path(&g, path, start, end);
        }
    }

    #[test]
    fn both_modes_agree_on_length_without_barriers() {
        let cases = [
            (Point::new(0, 0), Point::new(6, 6)),
            (Point::new(3, 1), Point::new(0, 5)),
            (Point::new(6, 0), Point::new(0, 6)),
            (Point::new(2, 2), Point::new(2, 5)),
        ];
        for (start, end) in cases {
            let mut a = open_grid(7, start, end);
            let mut d = open_grid(7, start, end);
            let (_, oa) = run(Mode::AStar, &mut a);
            let (_, od) = run(Mode::UniformCost, &mut d);
            assert_eq!(oa.cost(), od.cost());
            assert_eq!(oa.cost(), Some(crate::manhattan(start, end)));
        }
    }

    fn column_wall(rows: i32, col: i32, gap_row: i32) -> Grid {
        let mut g = Grid::new(rows).unwrap();
        for row in 0..rows {
            if row != gap_row {
                g.toggle_barrier(Point::new(row, col)).unwrap();
            }
        }
        g
    }

    #[test]
    fn wall_forces_path_through_gap() {
        let (start, end) = (Point::new(0, 0), Point::new(4, 4));
        for mode in [Mode::AStar, Mode::UniformCost] {
            let mut g = column_wall(5, 2, 2);
            g.set_start(start).unwrap();
            g.set_end(end).unwrap();
            let (engine, outcome) = run(mode, &mut g);
            let path = outcome.path().unwrap();
            assert!(path.contains(&Point::new(2, 2)));
            assert_valid_path(&g, path, start, end);
            assert_eq!(engine.cost_at(end), Some(8));
        }
    }

    #[test]
    fn wall_detour_costs_more_than_open_route() {
        let (start, end) = (Point::new(0, 0), Point::new(0, 4));
        let mut open = open_grid(5, start, end);
        let (_, open_outcome) = run(Mode::AStar, &mut open);
        assert_eq!(open_outcome.cost(), Some(4));

        for mode in [Mode::AStar, Mode::UniformCost] {
            let mut g = column_wall(5, 2, 2);
            g.set_start(start).unwrap();
            g.set_end(end).unwrap();
            let (engine, outcome) = run(mode, &mut g);
            assert!(outcome.path().unwrap().contains(&Point::new(2, 2)));
            assert_eq!(engine.cost_at(end), Some(8));
            assert!(outcome.cost() > open_outcome.cost());
        }
    }

    #[test]
    fn enclosed_start_is_not_found() {
        for mode in [Mode::AStar, Mode::UniformCost] {
            let mut g = open_grid(5, Point::new(0, 0), Point::new(4, 4));
            g.toggle_barrier(Point::new(1, 0)).unwrap();
            g.toggle_barrier(Point::new(0, 1)).unwrap();
            let (engine, outcome) = run(mode, &mut g);
            assert_eq!(outcome, SearchOutcome::NotFound);
            assert_eq!(engine.cost_at(Point::new(4, 4)), None);
            assert_eq!(engine.stats().expanded, 1);
        }
    }

    #[test]
    fn enclosed_end_is_not_found() {
        let mut g = open_grid(5, Point::new(0, 0), Point::new(4, 4));
        g.toggle_barrier(Point::new(3, 4)).unwrap();
        g.toggle_barrier(Point::new(4, 3)).unwrap();
        let (engine, outcome) = run(Mode::UniformCost, &mut g);
        assert_eq!(outcome, SearchOutcome::NotFound);
        // Every other passable cell was expanded.
        assert_eq!(engine.stats().expanded, 25 - 3);
    }

    #[test]
    fn start_equals_end() {
        let mut g = Grid::new(3).unwrap();
        let p = Point::new(1, 1);
        for mode in [Mode::AStar, Mode::UniformCost] {
            let mut engine = SearchEngine::new();
            let outcome = engine
                .search(mode, &mut g, Some(p), Some(p), &mut NoopObserver)
                .unwrap();
            assert_eq!(
                outcome,
                SearchOutcome::Found {
                    path: vec![p],
                    cost: 0
                }
            );
            assert_eq!(engine.stats().expanded, 0);
        }
    }

    #[test]
    fn explicit_goal_becomes_end_cell() {
        let (start, end) = (Point::new(0, 0), Point::new(2, 2));
        for mode in [Mode::AStar, Mode::UniformCost] {
            let mut g = Grid::new(3).unwrap();
            let mut log = EventLog::new();
            let mut engine = SearchEngine::new();
            let outcome = engine
                .search(mode, &mut g, Some(start), Some(end), &mut log)
                .unwrap();
            assert_eq!(outcome.cost(), Some(4), "{mode}");
            assert_eq!(g.role(end), Some(Role::End));
            assert_eq!(g.end(), Some(end));
            let ends: Vec<Point> = log.with_role(Role::End).collect();
            assert_eq!(ends, vec![end]);
            assert_eq!(engine.stats().events, log.events.len());
        }

        // A goal other than the grid's end takes its place.
        let mut g = open_grid(4, start, Point::new(0, 3));
        let mut engine = SearchEngine::new();
        let goal = Point::new(3, 0);
        engine
            .search(Mode::AStar, &mut g, Some(start), Some(goal), &mut NoopObserver)
            .unwrap();
        assert_eq!(g.end(), Some(goal));
        assert_eq!(g.role(goal), Some(Role::End));
        assert_ne!(g.role(Point::new(0, 3)), Some(Role::End));
        assert_eq!(g.count(Role::End), 1);

        // Headless runs leave the goal alone.
        let mut g = Grid::new(3).unwrap();
        let mut engine = SearchEngine::with_config(SearchConfig {
            mark_roles: false,
            ..SearchConfig::default()
        });
        engine
            .search(Mode::AStar, &mut g, Some(start), Some(end), &mut NoopObserver)
            .unwrap();
        assert_eq!(g.role(end), Some(Role::None));
        assert_eq!(g.end(), None);
    }

    #[test]
    fn invalid_arguments() {
        let mut engine = SearchEngine::new();
        let mut g = Grid::new(3).unwrap();
        let obs = &mut NoopObserver;
        assert_eq!(
            engine.run(Mode::AStar, &mut g, obs),
            Err(SearchError::MissingStart)
        );
        g.set_start(Point::new(0, 0)).unwrap();
        assert_eq!(
            engine.run(Mode::AStar, &mut g, obs),
            Err(SearchError::MissingEnd)
        );

        let far = Point::new(3, 0);
        assert_eq!(
            engine.search(Mode::AStar, &mut g, Some(Point::new(0, 0)), Some(far), obs),
            Err(SearchError::OutOfBounds(far))
        );

        let wall = Point::new(1, 1);
        g.toggle_barrier(wall).unwrap();
        assert_eq!(
            engine.search(Mode::UniformCost, &mut g, Some(wall), Some(Point::new(2, 2)), obs),
            Err(SearchError::BarrierEndpoint(wall))
        );
        assert_eq!(
            engine.search(Mode::UniformCost, &mut g, Some(Point::new(0, 0)), Some(wall), obs),
            Err(SearchError::BarrierEndpoint(wall))
        );
    }

    #[test]
    fn rerun_reproduces_path() {
        let mut g = Grid::parse(
            "S....
             .##..
             ...#.
             .#...
             ...#E",
        )
        .unwrap();
        for mode in [Mode::AStar, Mode::UniformCost] {
            let mut engine = SearchEngine::new();
            let first = engine.run(mode, &mut g, &mut NoopObserver).unwrap();
            let marked = g.clone();
            g.reset_search_roles();
            let second = engine.run(mode, &mut g, &mut NoopObserver).unwrap();
            assert!(first.is_found());
            assert_eq!(first, second);
            assert_eq!(g, marked);
        }
    }

    #[test]
    fn stale_search_roles_are_cleared_before_a_run() {
        let mut g = open_grid(4, Point::new(0, 0), Point::new(0, 3));
        g.mark(Point::new(3, 0), Role::Path);
        g.mark(Point::new(3, 3), Role::Closed);
        let (_, outcome) = run(Mode::AStar, &mut g);
        assert!(outcome.is_found());
        assert_ne!(g.role(Point::new(3, 0)), Some(Role::Path));
        assert_eq!(g.count(Role::Path), 2);
    }

    #[test]
    fn roles_and_events_match() {
        let mut g = open_grid(5, Point::new(0, 0), Point::new(4, 4));
        g.toggle_barrier(Point::new(2, 2)).unwrap();
        let before = g.clone();

        let mut log = EventLog::new();
        let mut engine = SearchEngine::new();
        let outcome = engine.run(Mode::AStar, &mut g, &mut log).unwrap();
        let path = outcome.path().unwrap();

        assert_eq!(engine.stats().events, log.events.len());
        let path_events: Vec<Point> = log.with_role(Role::Path).collect();
        assert_eq!(path_events, path[1..path.len() - 1].to_vec());

        // Replaying the events on the pre-run grid reproduces the final grid.
        let mut replay = before;
        for e in &log.events {
            assert!(replay.mark(e.pos, e.role), "{e:?} was not a change");
        }
        assert_eq!(replay, g);

        assert_eq!(g.role(Point::new(0, 0)), Some(Role::Start));
        assert_eq!(g.role(Point::new(4, 4)), Some(Role::End));
        assert_eq!(g.role(Point::new(2, 2)), Some(Role::Barrier));
        assert!(log.events.iter().all(|e| e.pos != Point::new(0, 0)));
    }

    #[test]
    fn observer_can_cancel() {
        let mut g = open_grid(8, Point::new(0, 0), Point::new(7, 7));
        let mut seen = 0;
        let mut stop_after_five = |_e: StepEvent| {
            seen += 1;
            if seen == 5 { Flow::Stop } else { Flow::Continue }
        };
        let mut engine = SearchEngine::new();
        let outcome = engine.run(Mode::UniformCost, &mut g, &mut stop_after_five).unwrap();
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(engine.stats().events, 5);
        assert_eq!(seen, 5);
    }

    #[test]
    fn expansion_budget_cancels() {
        let mut g = open_grid(10, Point::new(0, 0), Point::new(9, 9));
        let mut engine = SearchEngine::with_config(SearchConfig {
            max_expansions: Some(3),
            ..SearchConfig::default()
        });
        let outcome = engine.run(Mode::UniformCost, &mut g, &mut NoopObserver).unwrap();
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(engine.stats().expanded, 3);

        // A budget large enough to finish changes nothing.
        let mut engine = SearchEngine::with_config(SearchConfig {
            max_expansions: Some(1000),
            ..SearchConfig::default()
        });
        let outcome = engine.run(Mode::UniformCost, &mut g, &mut NoopObserver).unwrap();
        assert_eq!(outcome.cost(), Some(18));
    }

    #[test]
    fn headless_run_leaves_grid_untouched() {
        let mut g = open_grid(6, Point::new(0, 0), Point::new(5, 3));
        g.toggle_barrier(Point::new(1, 1)).unwrap();
        let before = g.clone();

        let mut log = EventLog::new();
        let mut engine = SearchEngine::with_config(SearchConfig {
            mark_roles: false,
            ..SearchConfig::default()
        });
        let headless = engine.run(Mode::AStar, &mut g, &mut log).unwrap();
        assert_eq!(g, before);
        assert!(log.events.is_empty());
        assert_eq!(engine.stats().events, 0);

        let (_, marked) = run(Mode::AStar, &mut g);
        assert_eq!(headless, marked);
    }

    #[test]
    fn astar_expands_no_more_than_uniform_cost() {
        let (start, end) = (Point::new(1, 1), Point::new(10, 8));
        let mut a = open_grid(12, start, end);
        let mut d = open_grid(12, start, end);
        let (ea, _) = run(Mode::AStar, &mut a);
        let (ed, _) = run(Mode::UniformCost, &mut d);
        assert!(ea.stats().expanded <= ed.stats().expanded);
        assert!(ea.stats().expanded < ed.stats().expanded);
    }

    #[test]
    fn ties_follow_neighbor_order() {
        // Uniform cost on an open grid explores down before up, right
        // before left; the first shortest route found goes down first.
        let mut g = open_grid(3, Point::new(0, 0), Point::new(1, 1));
        let (_, outcome) = run(Mode::UniformCost, &mut g);
        assert_eq!(
            outcome.path().unwrap(),
            &[Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)]
        );
    }

    #[test]
    fn last_mode_and_state_are_exposed() {
        let mut g = open_grid(4, Point::new(0, 0), Point::new(3, 3));
        let (engine, outcome) = run(Mode::UniformCost, &mut g);
        assert_eq!(engine.last_mode(), Some(Mode::UniformCost));
        assert_eq!(
            engine.state().path_to(Point::new(3, 3)).as_deref(),
            outcome.path()
        );
        assert!(engine.state().is_closed(Point::new(0, 0)));
    }
}
