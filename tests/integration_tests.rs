//! Integration tests for the crossfill engine.
//!
//! These tests verify the complete pipeline from grid and word list loading
//! through the search to solution rendering, using the fixture files under
//! `tests/fixtures/`.

use std::sync::atomic::Ordering;

use crossfill::checker;
use crossfill::engine::{Engine, SolveStatus};
use crossfill::grid::{Cell, Grid, Point};
use crossfill::library::Library;

const MINI5_GRID: &str = "tests/fixtures/mini5.txt";
const MINI5_WORDS: &str = "tests/fixtures/mini5_words.txt";

/// The fill the mini5 fixtures were built around.
const MINI5_SOLUTION: &str = "\
ABC##
DEFG#
HIJKL
#MNOP
##QRS
";

/// The mini5 block pattern is symmetric across the main diagonal, so the
/// transposed fill is the only other solution.
const MINI5_TRANSPOSED: &str = "\
ADH##
BEIM#
CFJNQ
#GKOR
##LPS
";

fn load_fixtures() -> (Grid, Library) {
    let grid = Grid::load_from_path(MINI5_GRID, 1).expect("fixture grid should load");
    let library =
        Library::load_from_path(MINI5_WORDS, 1, grid.max_dim()).expect("fixture words should load");
    (grid, library)
}

fn rendered(solutions: &[Grid]) -> Vec<String> {
    solutions.iter().map(Grid::to_string).collect()
}

mod fixture_loading {
    use super::*;

    #[test]
    fn test_mini_grid_loads() {
        let (grid, _) = load_fixtures();
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.cols(), 5);
        // 5 across plus 5 down, none shorter than 3 cells
        assert_eq!(grid.spans().len(), 10);
        assert!(grid.spans().iter().all(|s| s.len >= 3));
    }

    #[test]
    fn test_mini_words_load() {
        let (grid, library) = load_fixtures();
        assert_eq!(library.len(), 12);
        assert_eq!(library.stats().malformed, 0);
        assert!(library.is_word("HIJKL"));
        assert!(grid.max_dim() >= 5);
    }
}

mod end_to_end {
    use super::*;

    #[test]
    fn test_mini_grid_has_exactly_the_two_known_fills() {
        let (grid, library) = load_fixtures();
        let result = Engine::new(&library).solve(&grid, usize::MAX);

        assert_eq!(
            rendered(&result.solutions),
            vec![MINI5_SOLUTION, MINI5_TRANSPOSED]
        );
        assert_eq!(result.status, SolveStatus::Exhausted);
    }

    #[test]
    fn test_solutions_preserve_blocks_and_satisfy_the_checker() {
        let (grid, library) = load_fixtures();
        let result = Engine::new(&library).solve(&grid, usize::MAX);

        assert!(!result.solutions.is_empty());
        for solution in &result.solutions {
            for row in 0..grid.rows() {
                for col in 0..grid.cols() {
                    let p = Point::new(row, col);
                    match grid.cell(p) {
                        Cell::Block => assert_eq!(solution.cell(p), Cell::Block),
                        Cell::Blank => assert!(matches!(solution.cell(p), Cell::Letter(_))),
                        Cell::Letter(ch) => assert_eq!(solution.cell(p), Cell::Letter(ch)),
                    }
                }
            }

            let classes = solution.classify_slots();
            assert!(classes.empty.is_empty() && classes.partial.is_empty());
            assert!(checker::all_words(&library, &classes.full));
            assert!(checker::all_distinct(&classes.full));
        }
    }

    #[test]
    fn test_seed_letter_selects_one_fill() {
        // seeding H at (2,0) rules out the transposed fill, which has C there
        let seeded = "\
...##
....#
H....
#....
##...
";
        let grid = Grid::parse_from_str(seeded, 1).unwrap();
        let library = Library::load_from_path(MINI5_WORDS, 1, grid.max_dim()).unwrap();
        let result = Engine::new(&library).solve(&grid, usize::MAX);

        assert_eq!(rendered(&result.solutions), vec![MINI5_SOLUTION]);
    }

    #[test]
    fn test_determinism_across_runs() {
        let (grid, library) = load_fixtures();
        let engine = Engine::new(&library);

        let first = rendered(&engine.solve(&grid, usize::MAX).solutions);
        let second = rendered(&engine.solve(&grid, usize::MAX).solutions);
        assert_eq!(first, second);
    }

    #[test]
    fn test_num_results_requested_is_honored() {
        let (grid, library) = load_fixtures();
        let result = Engine::new(&library).solve(&grid, 1);

        assert_eq!(rendered(&result.solutions), vec![MINI5_SOLUTION]);
        assert_eq!(result.status, SolveStatus::FoundEnough);
    }
}

mod pattern_index {
    use super::*;

    #[test]
    fn test_every_mask_of_cat_matches() {
        let library = Library::parse_from_str("cat\n", 1, 15);
        for pattern in ["CAT", "C.T", ".A.", "..."] {
            let matches = library
                .find_matches(pattern)
                .unwrap_or_else(|| panic!("pattern {pattern} should have matches"));
            assert_eq!(
                matches.iter().map(|&id| library.word(id)).collect::<Vec<_>>(),
                ["CAT"]
            );
        }
    }

    #[test]
    fn test_wrong_length_pattern_matches_nothing() {
        let library = Library::parse_from_str("cat\n", 1, 15);
        assert!(library.find_matches("C.").is_none());
        assert!(library.find_matches("C.T.").is_none());
    }
}

mod cancellation {
    use super::*;

    // A single open row with six candidate words, so the uncancelled run
    // has a long deterministic solution stream to compare prefixes against.
    fn row_grid_and_library() -> (Grid, Library) {
        let grid = Grid::parse_from_str("...\n", 2).unwrap();
        let library = Library::load_from_path(MINI5_WORDS, 1, 3).unwrap();
        (grid, library)
    }

    #[test]
    fn test_cancelled_run_emits_a_prefix_of_the_full_stream() {
        let (grid, library) = row_grid_and_library();
        let engine = Engine::new(&library);

        let full = rendered(&engine.solve(&grid, usize::MAX).solutions);
        assert_eq!(full, vec!["ABC\n", "QRS\n", "ADH\n", "LPS\n", "WOW\n", "XXX\n"]);

        let cancel = engine.cancel_flag();
        let mut seen: Vec<String> = Vec::new();
        let (status, _) = engine.solve_with(&grid, |solved| {
            seen.push(solved.to_string());
            if seen.len() == 3 {
                cancel.store(true, Ordering::Relaxed);
            }
            true
        });

        assert_eq!(status, SolveStatus::Cancelled);
        assert_eq!(seen, full[..3].to_vec());
    }

    #[test]
    fn test_cancel_flag_is_per_run_observable_again() {
        let (grid, library) = row_grid_and_library();
        let engine = Engine::new(&library);

        engine.cancel_flag().store(true, Ordering::Relaxed);
        let result = engine.solve(&grid, usize::MAX);
        assert_eq!(result.status, SolveStatus::Cancelled);
        assert!(result.solutions.is_empty());

        // clearing the flag makes the same engine usable again
        engine.cancel_flag().store(false, Ordering::Relaxed);
        let result = engine.solve(&grid, usize::MAX);
        assert_eq!(result.status, SolveStatus::Exhausted);
        assert_eq!(result.solutions.len(), 6);
    }
}
