use std::process::ExitCode;
use clap::Parser;
use std::time::{Duration, Instant};

use crossfill::engine::{Engine, SearchConfig, SlotPolicy, SolveStatus};
use crossfill::grid::Grid;
use crossfill::library::Library;
use crossfill::log::init_logger;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

/// Crossfill crossword grid filler
#[derive(Parser, Debug)]
#[command(author, version, long_version = LONG_VERSION, about, long_about = None)]
struct Cli {
    /// Path to the grid file ('#' block, '.' blank, 'A'-'Z' pre-filled;
    /// lines starting with '/' are comments)
    grid: String,

    /// Path to the word list file (one word per line)
    #[arg(short, long)]
    word_list: String,

    /// Maximum number of solutions to emit (0 = all of them)
    #[arg(short = 'n', long, default_value_t = 0)]
    num_results: usize,

    /// Wall-clock budget for the search, in seconds (0 = unlimited)
    #[arg(short = 't', long, default_value_t = 0)]
    time_budget: u64,

    /// Abandon search branches deeper than this many commits
    #[arg(long)]
    max_depth: Option<usize>,

    /// Ignore spans shorter than this many cells
    #[arg(long, default_value_t = 1)]
    min_span_len: usize,

    /// Skip words shorter than this many letters
    #[arg(long, default_value_t = 1)]
    min_word_len: usize,

    /// Expand the first open slot in span order instead of the most
    /// constrained one
    #[arg(long)]
    first_in_span_order: bool,

    /// Print the word-length histogram after loading
    #[arg(long)]
    stats: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// Entry point of the crossfill CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them before
/// exiting with a nonzero code so scripts can detect failure.
fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("Error: {e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic for the crossfill CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Load the grid, then the word list capped at the grid's max dimension.
/// 3. Search, streaming each filled grid to stdout as it is found.
/// 4. Print diagnostics (timings, node counts) on stderr.
///
/// Returns `Ok(())` on clean completion (with any number of solutions) or an
/// error (malformed grid, missing file) which bubbles up to [`main`].
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(cli.debug);

    let grid = Grid::load_from_path(&cli.grid, cli.min_span_len)?;
    log::info!(
        "grid is {}x{} with {} spans",
        grid.rows(),
        grid.cols(),
        grid.spans().len()
    );

    let t_load = Instant::now();
    let library = Library::load_from_path(&cli.word_list, cli.min_word_len, grid.max_dim())?;
    let load_secs = t_load.elapsed().as_secs_f64();

    if cli.stats {
        eprintln!("word length histogram:");
        for (len, count) in library.counts_by_len().iter().enumerate().skip(1) {
            eprintln!("[{len}] {count}");
        }
    }

    let config = SearchConfig {
        max_depth: cli.max_depth,
        time_budget: (cli.time_budget > 0).then(|| Duration::from_secs(cli.time_budget)),
        policy: if cli.first_in_span_order {
            SlotPolicy::FirstInSpanOrder
        } else {
            SlotPolicy::FewestCandidates
        },
    };
    let engine = Engine::with_config(&library, config);

    let max_results = if cli.num_results == 0 {
        usize::MAX
    } else {
        cli.num_results
    };

    // Stream solutions as the search finds them: the filled grid on stdout
    // with a blank line after it, the per-solution timing on stderr.
    let t_search = Instant::now();
    let mut t_solution = Instant::now();
    let mut emitted = 0usize;
    let (status, stats) = engine.solve_with(&grid, |solved| {
        print!("{solved}");
        println!();
        emitted += 1;
        eprintln!("solution {emitted} in {} us", t_solution.elapsed().as_micros());
        t_solution = Instant::now();
        emitted < max_results
    });
    let search_secs = t_search.elapsed().as_secs_f64();

    match status {
        SolveStatus::TimedOut => {
            eprintln!("search timed out after {}s; solutions may be missing", cli.time_budget);
        }
        SolveStatus::FoundEnough => {
            eprintln!("stopped after {emitted} requested solutions");
        }
        SolveStatus::Cancelled => {
            eprintln!("search cancelled");
        }
        SolveStatus::Exhausted => {
            eprintln!("search space exhausted");
        }
    }

    eprintln!(
        "Loaded {} words in {load_secs:.3}s; searched {} nodes in {search_secs:.3}s ({emitted} solutions).",
        library.len(),
        stats.nodes
    );

    Ok(())
}
