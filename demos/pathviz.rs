//! Animated search viewer for the terminal, using crossterm.
//!
//! Left click places the start, then the end, then barriers; right click
//! erases a cell. `a` runs A*, `d` runs Dijkstra, `r` clears the search
//! marks, `c` clears the grid and `q` quits. Any key pressed while a search
//! is animating cancels it.
//!
//! Run: cargo run --bin pathviz -- --rows 20 --delay-ms 5

use std::error::Error;
use std::io::{self, Stdout, Write};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    execute, queue,
    style::{Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};
use gridpath_core::{Grid, Point, Role};
use gridpath_demos::{
    GridArgs, cell_at_screen, erase, load_grid, paint, role_color, screen_size,
};
use gridpath_search::{Flow, Mode, SearchEngine, SearchOutcome, StepEvent, StepObserver};

const HELP: &str = "[a] A*  [d] Dijkstra  [r] reset marks  [c] clear  [q] quit";

#[derive(Debug, Parser)]
#[command(about = "Watch A* and Dijkstra explore a grid")]
struct Cli {
    #[command(flatten)]
    grid: GridArgs,

    /// Pause between animation steps, in milliseconds.
    #[arg(long, default_value_t = 10)]
    delay_ms: u64,
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// Raw-mode alternate screen, restored on drop.
struct Screen {
    out: Stdout,
}

impl Screen {
    fn open() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        Ok(Self { out })
    }

    /// Each cell is two columns wide so the grid looks square. `run` checks
    /// that the grid fits the terminal before anything is drawn.
    fn draw_cell(&mut self, p: Point, role: Role) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo((p.col * 2) as u16, p.row as u16),
            SetBackgroundColor(role_color(role)),
            Print("  "),
            ResetColor
        )
    }

    fn draw_grid(&mut self, grid: &Grid) -> io::Result<()> {
        for cell in grid.iter() {
            self.draw_cell(cell.pos(), cell.role())?;
        }
        self.out.flush()
    }

    fn status(&mut self, row: u16, msg: &str) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, row),
            terminal::Clear(ClearType::CurrentLine),
            Print(msg)
        )?;
        self.out.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

// ---------------------------------------------------------------------------
// Animation
// ---------------------------------------------------------------------------

/// Draws every step, then waits up to `delay` for a key that cancels.
struct Animator<'a> {
    screen: &'a mut Screen,
    delay: Duration,
    error: Option<io::Error>,
}

impl Animator<'_> {
    fn step(&mut self, e: StepEvent) -> io::Result<Flow> {
        self.screen.draw_cell(e.pos, e.role)?;
        self.screen.out.flush()?;
        if !event::poll(self.delay)? {
            return Ok(Flow::Continue);
        }
        Ok(match event::read()? {
            Event::Key(KeyEvent {
                kind: KeyEventKind::Press,
                ..
            }) => Flow::Stop,
            _ => Flow::Continue,
        })
    }
}

impl StepObserver for Animator<'_> {
    fn on_step(&mut self, e: StepEvent) -> Flow {
        match self.step(e) {
            Ok(flow) => flow,
            Err(err) => {
                self.error = Some(err);
                Flow::Stop
            }
        }
    }
}

fn animate(
    screen: &mut Screen,
    engine: &mut SearchEngine,
    grid: &mut Grid,
    mode: Mode,
    delay: Duration,
) -> Result<String, Box<dyn Error>> {
    grid.reset_search_roles();
    screen.draw_grid(grid)?;

    let mut animator = Animator {
        screen,
        delay,
        error: None,
    };
    let result = engine.run(mode, grid, &mut animator);
    if let Some(err) = animator.error {
        return Err(err.into());
    }

    let stats = engine.stats();
    Ok(match result {
        Ok(SearchOutcome::Found { cost, .. }) => {
            format!("{mode}: path of cost {cost}, {} cells expanded", stats.expanded)
        }
        Ok(SearchOutcome::NotFound) => {
            format!("{mode}: no path, {} cells expanded", stats.expanded)
        }
        Ok(SearchOutcome::Cancelled) => format!("{mode}: cancelled"),
        Err(e) => e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Main loop
// ---------------------------------------------------------------------------

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut grid = load_grid(&cli.grid)?;
    let mut engine = SearchEngine::new();
    let delay = Duration::from_millis(cli.delay_ms);
    let rows = grid.rows();
    let (cols, lines) = screen_size(rows).ok_or("grid is too large to draw")?;
    let (width, height) = terminal::size()?;
    if cols > width || lines > height {
        return Err(format!(
            "a {rows}x{rows} grid needs a {cols}x{lines} terminal, this one is {width}x{height}"
        )
        .into());
    }
    let status_row = lines - 1;

    let mut screen = Screen::open()?;
    screen.draw_grid(&grid)?;
    screen.status(status_row, HELP)?;

    loop {
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => {
                let mode = match code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('a') => Mode::AStar,
                    KeyCode::Char('d') => Mode::UniformCost,
                    KeyCode::Char('r') => {
                        grid.reset_search_roles();
                        screen.draw_grid(&grid)?;
                        screen.status(status_row, HELP)?;
                        continue;
                    }
                    KeyCode::Char('c') => {
                        grid.clear();
                        screen.draw_grid(&grid)?;
                        screen.status(status_row, HELP)?;
                        continue;
                    }
                    _ => continue,
                };
                let msg = animate(&mut screen, &mut engine, &mut grid, mode, delay)?;
                screen.status(status_row, &msg)?;
            }
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => {
                let Some(p) = cell_at_screen(column, row, grid.rows()) else {
                    continue;
                };
                match kind {
                    MouseEventKind::Down(MouseButton::Left)
                    | MouseEventKind::Drag(MouseButton::Left) => paint(&mut grid, p)?,
                    MouseEventKind::Down(MouseButton::Right)
                    | MouseEventKind::Drag(MouseButton::Right) => erase(&mut grid, p)?,
                    _ => continue,
                }
                screen.draw_grid(&grid)?;
            }
            _ => {}
        }
    }
    Ok(())
}
