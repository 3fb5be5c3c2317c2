//! `bench_local.rs`: quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing for a handful of grids on *your* machine.
//! - Loads the word list once, then fills each grid several times and
//!   reports the median.
//! - Always requests 100 solutions per grid (by design, to keep comparisons
//!   simple).
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Print a few solutions:          `cargo run --bin bench_local --release -- -p 5`
//! - See all flags:                  `cargo run --bin bench_local -- --help`
//!
//! NOTES
//! -----
//! - This is *not* Criterion. It's quick and convenient, not statistically
//!   rigorous.
//! - Use the same machine and `--release` for more comparable numbers.
//! - Grids live in `get_cases()` below.
//! - I/O (printing) is kept outside the timed section.
//! - One warm-up run per grid is done (not included in timing).
//! - We report the *median* over repeats (more robust than mean for small _N_).

use clap::Parser;
use std::hint::black_box;
use std::time::Instant;

use crossfill::engine::Engine;
use crossfill::grid::Grid;
use crossfill::library::Library;

/// Simple local benchmark runner: load the word list once, time several grids.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the word list file (one word per line)
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/mini5_words.txt")
    )]
    word_list: String,

    /// Number of repeats per grid (use >1 to reduce noise; median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 1)]
    num_repeats: usize,

    /// Print up to this many solutions per grid (0 = print none)
    #[arg(short = 'p', long = "print", default_value_t = 0)]
    print_limit: usize,
}

/// The fixed number of solutions we request per grid.
/// Keeping this constant across cases makes local comparisons simpler.
const NUM_RESULTS: usize = 100;

/// A benchmark case: a name and the grid text to fill.
#[derive(Clone)]
struct Case {
    name: &'static str,
    grid: &'static str,
}

/// Edit/add new grids here. The summary will display the case name.
fn get_cases() -> Vec<Case> {
    vec![
        Case { name: "open-3x3", grid: "...\n...\n...\n" },
        Case { name: "blocked-3x3", grid: "...\n.#.\n...\n" },
        Case { name: "mini-5x5", grid: "...##\n....#\n.....\n#....\n##...\n" },
        Case { name: "rows-only-5x3", grid: ".....\n#####\n.....\n" },
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    // safe: f64 durations are never NaN in this context
    xs.sort_by(|a, b| a.partial_cmp(b).expect("f64 durations should not be NaN"));
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

const NAME_COL: usize = 16;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load the word list once. This I/O is *not* included in per-grid timing.
    eprintln!("Loading word list from: {}", cli.word_list);
    let t_load = Instant::now();
    let library = Library::load_from_path(&cli.word_list, 1, 16)?;
    let load_secs = t_load.elapsed().as_secs_f64();
    eprintln!("Loaded {} words in {load_secs:.3}s", library.len());

    let engine = Engine::new(&library);

    let cases = get_cases();
    // (name, median_seconds, solutions_last_run) rows for the summary
    let mut summary: Vec<(String, f64, usize)> = Vec::with_capacity(cases.len());

    for (idx, case) in cases.iter().enumerate() {
        eprintln!("\n[{:02}] {}", idx + 1, case.name);

        let grid = Grid::parse_from_str(case.grid, 2)?;

        // One *warm-up* execution per grid to touch code paths / caches.
        // We intentionally ignore its timing.
        let _warmup = engine.solve(&grid, NUM_RESULTS);

        // Repeat the timed runs and collect durations.
        let mut times = Vec::with_capacity(cli.num_repeats);
        let mut last_solutions: Vec<Grid> = Vec::new();

        for rep in 0..cli.num_repeats {
            // Keep only the *core* operation inside the timed region.
            let t_solve = Instant::now();
            let result = engine.solve(black_box(&grid), NUM_RESULTS);
            let solve_secs = t_solve.elapsed().as_secs_f64();

            // Prevent the compiler from proving the result unused and eliding work.
            let _keep = black_box(result.solutions.len());

            times.push(solve_secs);
            last_solutions = result.solutions;

            eprintln!(
                "  run {:>2}/{:>2}: {:.3}s ({} solutions)",
                rep + 1,
                cli.num_repeats,
                solve_secs,
                last_solutions.len()
            );
        }

        // Prefer median for small N; it's less sensitive to noisy outliers.
        let med = median(times);

        // Optionally print a few solutions from the *last* run (outside timing).
        if cli.print_limit > 0 {
            for solution in last_solutions.iter().take(cli.print_limit) {
                println!("{solution}");
            }
        }

        eprintln!(
            "  -> median {med:.3}s over {} run(s); last run produced {} {}",
            cli.num_repeats,
            last_solutions.len(),
            pluralizer(last_solutions.len(), "solution".into(), None),
        );

        summary.push((case.name.to_string(), med, last_solutions.len()));
    }

    // Compact summary at the end for a quick scan across all grids.
    eprintln!("\n==== Summary ====");
    eprintln!("{:<NAME_COL$} | {:>10} | {:>11}", "grid", "median (s)", "# solutions");
    eprintln!("{:-<NAME_COL$}-+-{:-<10}-+-{:-<11}", "", "", "");
    for (name, med, num_solutions) in &summary {
        eprintln!("{name:<NAME_COL$} | {med:>10.3} | {num_solutions:>11}");
    }

    Ok(())
}

fn pluralizer(count: usize, singular: String, plural: Option<String>) -> String {
    if count == 1 {
        singular
    } else {
        plural.unwrap_or_else(|| singular + "s")
    }
}
