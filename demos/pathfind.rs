//! One-shot shortest-path search from the command line.
//!
//! Run: cargo run --bin pathfind -- --mode dijkstra --map maze.txt

use clap::Parser;
use gridpath_demos::{GridArgs, load_grid};
use gridpath_search::{NoopObserver, SearchConfig, SearchEngine, SearchOutcome};

#[derive(Debug, Parser)]
#[command(about = "Find a shortest path on a grid and print the result")]
struct Cli {
    #[command(flatten)]
    grid: GridArgs,

    /// Leave the grid unmarked and print only the outcome.
    #[arg(long)]
    headless: bool,

    /// Stop after expanding this many cells.
    #[arg(long)]
    max_expansions: Option<usize>,
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut grid = load_grid(&cli.grid)?;
    let mut engine = SearchEngine::with_config(SearchConfig {
        mark_roles: !cli.headless,
        max_expansions: cli.max_expansions,
    });
    let mode = cli.grid.mode;

    match engine.run(mode, &mut grid, &mut NoopObserver)? {
        SearchOutcome::Found { path, cost } => {
            println!("{mode}: path of cost {cost}");
            let steps: Vec<String> = path.iter().map(ToString::to_string).collect();
            println!("{}", steps.join(" -> "));
        }
        SearchOutcome::NotFound => println!("{mode}: no path"),
        SearchOutcome::Cancelled => println!("{mode}: gave up"),
    }

    let stats = engine.stats();
    println!(
        "expanded {} cells, {} pushes, {} stale pops",
        stats.expanded, stats.pushed, stats.stale
    );
    if !cli.headless {
        println!("\n{grid}");
    }
    Ok(())
}
