//! Shortest-path search over `gridpath-core` grids.
//!
//! [`SearchEngine`] runs one of two interchangeable algorithms, selected by
//! [`Mode`]:
//!
//! - **A\*** ([`Mode::AStar`]), keyed on cost-so-far plus the
//!   [`manhattan`] distance to the goal
//! - **Uniform cost** ([`Mode::UniformCost`], Dijkstra), keyed on
//!   cost-so-far alone
//!
//! Movement is 4-way with unit cost. Both modes share one frontier that
//! breaks key ties by insertion order, so a given grid always yields the
//! same path.
//!
//! While it runs, the engine marks cells Open, Closed and Path on the grid
//! and reports each change to a [`StepObserver`], which may stop the run.
//!
//! ```
//! use gridpath_core::{Grid, Point};
//! use gridpath_search::{Mode, NoopObserver, SearchEngine};
//!
//! let mut grid = Grid::parse(
//!     "S.#
//!      ..#
//!      ..E",
//! )
//! .unwrap();
//! let mut engine = SearchEngine::new();
//! let outcome = engine.run(Mode::AStar, &mut grid, &mut NoopObserver).unwrap();
//! assert_eq!(outcome.cost(), Some(4));
//! assert_eq!(engine.cost_at(Point::new(2, 2)), Some(4));
//! ```

mod distance;
mod engine;
mod error;
mod frontier;
mod mode;
mod state;
mod traits;

pub use distance::manhattan;
pub use engine::{SearchConfig, SearchEngine, SearchOutcome, SearchStats};
pub use error::SearchError;
pub use mode::{Mode, ParseModeError};
pub use state::{SearchState, UNREACHABLE};
pub use traits::{EventLog, Flow, NoopObserver, StepEvent, StepObserver};
