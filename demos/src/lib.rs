//! Shared pieces of the gridpath demo binaries: command-line grid options,
//! the built-in sample maze, mouse-style editing and the role palette.

use std::error::Error;
use std::path::PathBuf;

use crossterm::style::Color;
use gridpath_core::{Grid, GridError, Point, Role, cell_at_pixel};
use gridpath_search::Mode;

/// Maze used when neither `--map` nor `--rows` is given.
pub const SAMPLE: &str = "\
S...........
.####.#.###.
.#....#...#.
.#.######.#.
.#......#.#.
.######.#.#.
......#.#...
.####.#.###.
.#....#...#.
.#.######.#.
.#........#E
.##########.";

/// Options selecting the grid and algorithm.
#[derive(Debug, Clone, clap::Args)]
pub struct GridArgs {
    /// Search algorithm: astar or dijkstra.
    #[arg(short, long, default_value_t = Mode::AStar)]
    pub mode: Mode,

    /// Text layout to load (`.` empty, `#` barrier, `S` start, `E` end).
    #[arg(long, conflicts_with = "rows")]
    pub map: Option<PathBuf>,

    /// Build an empty grid of this many rows, start top-left, end
    /// bottom-right.
    #[arg(long)]
    pub rows: Option<i32>,
}

/// Build the grid the options ask for.
pub fn load_grid(args: &GridArgs) -> Result<Grid, Box<dyn Error>> {
    if let Some(path) = &args.map {
        let text = std::fs::read_to_string(path)?;
        log::debug!("loaded layout from {}", path.display());
        return Ok(Grid::parse(&text)?);
    }
    if let Some(rows) = args.rows {
        let mut grid = Grid::new(rows)?;
        grid.set_start(Point::ZERO)?;
        grid.set_end(Point::new(rows - 1, rows - 1))?;
        return Ok(grid);
    }
    Ok(Grid::parse(SAMPLE)?)
}

/// Primary-button edit: place the start, then the end, then barriers.
pub fn paint(grid: &mut Grid, p: Point) -> Result<(), GridError> {
    let role = grid.role(p).ok_or(GridError::OutOfBounds(p))?;
    if role.is_endpoint() {
        return Ok(());
    }
    if grid.start().is_none() {
        grid.set_start(p)?;
    } else if grid.end().is_none() {
        grid.set_end(p)?;
    } else {
        grid.toggle_barrier(p)?;
    }
    Ok(())
}

/// Secondary-button edit: empty the cell.
pub fn erase(grid: &mut Grid, p: Point) -> Result<(), GridError> {
    grid.clear_cell(p).map(|_| ())
}

/// Terminal columns and lines needed to draw a grid of `rows` rows: two
/// columns per cell, then a blank line and a status line. `None` when the
/// size does not fit a terminal coordinate.
pub fn screen_size(rows: i32) -> Option<(u16, u16)> {
    let cols = u16::try_from(rows.checked_mul(2)?).ok()?;
    let lines = u16::try_from(rows.checked_add(2)?).ok()?;
    Some((cols, lines))
}

/// Cell under a terminal position, with cells drawn two columns wide.
pub fn cell_at_screen(column: u16, row: u16, rows: i32) -> Option<Point> {
    // One line per cell: the canvas is `rows` units wide.
    cell_at_pixel(i32::from(row), i32::from(column / 2), rows, rows)
}

/// Display colour for each role.
pub fn role_color(role: Role) -> Color {
    match role {
        Role::None => Color::Rgb { r: 255, g: 255, b: 255 },
        Role::Start => Color::Rgb { r: 255, g: 165, b: 0 },
        Role::End => Color::Rgb { r: 64, g: 224, b: 208 },
        Role::Barrier => Color::Rgb { r: 0, g: 0, b: 0 },
        Role::Open => Color::Rgb { r: 0, g: 255, b: 0 },
        Role::Closed => Color::Rgb { r: 255, g: 0, b: 0 },
        Role::Path => Color::Rgb { r: 128, g: 0, b: 128 },
    }
}
