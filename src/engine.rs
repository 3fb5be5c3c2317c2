//! The search engine: depth-first backtracking over grid states.
//!
//! Each node snapshots the grid's slots, prunes on a full slot that is not a
//! word or duplicates another, emits a solution when nothing is left to
//! fill, and otherwise picks one unfilled slot and tries every dictionary
//! match for its pattern. A commit is undone by writing the slot's own
//! pre-commit pattern back, so one mutable grid serves the whole search.

use crate::checker::{self, Violation};
use crate::grid::{Grid, Slot};
use crate::library::Library;
use instant::Instant;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Which unfilled slot a node expands next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlotPolicy {
    /// First candidate slot in span order.
    FirstInSpanOrder,
    /// Slot with the fewest dictionary matches, so contradictions surface
    /// as early as possible. First wins ties, keeping runs deterministic.
    #[default]
    FewestCandidates,
}

/// Knobs for one search run.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Abandon branches deeper than this many commits.
    pub max_depth: Option<usize>,
    /// Wall-clock limit for the whole search.
    pub time_budget: Option<Duration>,
    pub policy: SlotPolicy,
}

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// The whole search tree was explored.
    Exhausted,
    /// The sink declined further solutions.
    FoundEnough,
    /// The time budget ran out.
    TimedOut,
    /// The cancellation flag was observed.
    Cancelled,
}

/// Search-tree counters, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered (and not cut short by cancellation or the budget).
    pub nodes: u64,
    /// Branches abandoned because a full slot was not a word.
    pub pruned_non_words: u64,
    /// Branches abandoned because two full slots matched.
    pub pruned_duplicates: u64,
    /// Nodes whose chosen slot had no candidates left.
    pub dead_ends: u64,
    /// Solutions emitted.
    pub solutions: u64,
    /// Deepest commit chain reached.
    pub deepest: usize,
}

/// Everything one [`Engine::solve`] call produced.
#[derive(Debug)]
pub struct SolveResult {
    pub solutions: Vec<Grid>,
    pub status: SolveStatus,
    pub stats: SearchStats,
}

/// Simple helper to enforce a wall-clock time limit on the search.
struct TimeBudget {
    start: Instant,
    limit: Duration,
}

impl TimeBudget {
    fn new(limit: Duration) -> Self {
        Self { start: Instant::now(), limit }
    }

    /// Returns true if the allowed time has fully elapsed.
    fn expired(&self) -> bool {
        self.start.elapsed() >= self.limit
    }
}

/// A configured search over one dictionary. The dictionary is borrowed
/// immutably, so several engines can share it.
pub struct Engine<'a> {
    library: &'a Library,
    config: SearchConfig,
    cancel: Arc<AtomicBool>,
}

impl<'a> Engine<'a> {
    #[must_use]
    pub fn new(library: &'a Library) -> Self {
        Self::with_config(library, SearchConfig::default())
    }

    #[must_use]
    pub fn with_config(library: &'a Library, config: SearchConfig) -> Self {
        Self {
            library,
            config,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The flag observed at every node entry. Set it (from a signal handler,
    /// another thread, or a sink callback) to end the search cleanly;
    /// solutions already emitted remain valid.
    #[must_use]
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Run the search and collect up to `num_results_requested` solutions.
    pub fn solve(&self, grid: &Grid, num_results_requested: usize) -> SolveResult {
        let mut solutions = Vec::new();
        let (status, stats) = self.solve_with(grid, |solved| {
            solutions.push(solved.clone());
            solutions.len() < num_results_requested
        });
        SolveResult { solutions, status, stats }
    }

    /// Run the search, streaming each solution into `sink` as it is found.
    /// Return `false` from the sink to stop. The caller's grid is never
    /// mutated; the search works on a private clone.
    ///
    /// Solutions arrive depth-first: deterministic for a given grid,
    /// dictionary, and configuration.
    pub fn solve_with<F>(&self, grid: &Grid, sink: F) -> (SolveStatus, SearchStats)
    where
        F: FnMut(&Grid) -> bool,
    {
        log::debug!(
            "searching {} spans against {} words",
            grid.spans().len(),
            self.library.len()
        );

        let mut ctx = SearchCtx {
            library: self.library,
            config: &self.config,
            cancel: &self.cancel,
            budget: self.config.time_budget.map(TimeBudget::new),
            sink,
            stats: SearchStats::default(),
            stop: None,
        };

        let mut work = grid.clone();
        ctx.node(&mut work, 0);

        let status = ctx.stop.unwrap_or(SolveStatus::Exhausted);
        log::debug!(
            "search ended with {:?} after {} nodes, {} solutions",
            status,
            ctx.stats.nodes,
            ctx.stats.solutions
        );
        (status, ctx.stats)
    }
}

struct SearchCtx<'a, F> {
    library: &'a Library,
    config: &'a SearchConfig,
    cancel: &'a AtomicBool,
    budget: Option<TimeBudget>,
    sink: F,
    stats: SearchStats,
    stop: Option<SolveStatus>,
}

impl<F: FnMut(&Grid) -> bool> SearchCtx<'_, F> {
    fn node(&mut self, grid: &mut Grid, depth: usize) {
        if self.cancel.load(Ordering::Relaxed) {
            self.stop = Some(SolveStatus::Cancelled);
            return;
        }
        if self.budget.as_ref().is_some_and(TimeBudget::expired) {
            self.stop = Some(SolveStatus::TimedOut);
            return;
        }

        self.stats.nodes += 1;
        self.stats.deepest = self.stats.deepest.max(depth);

        let classes = grid.classify_slots();

        match checker::find_violation(self.library, &classes.full) {
            Some(Violation::NotAWord(word)) => {
                log::trace!("depth {depth}: '{word}' is not a word");
                self.stats.pruned_non_words += 1;
                return;
            }
            Some(Violation::Duplicate(word)) => {
                log::trace!("depth {depth}: '{word}' appears twice");
                self.stats.pruned_duplicates += 1;
                return;
            }
            None => {}
        }

        if classes.partial.is_empty() && classes.empty.is_empty() {
            self.stats.solutions += 1;
            if !(self.sink)(grid) {
                self.stop = Some(SolveStatus::FoundEnough);
            }
            return;
        }

        if self.config.max_depth.is_some_and(|max| depth >= max) {
            self.stats.dead_ends += 1;
            return;
        }

        // Partial slots are constrained by committed crossings, so they come
        // first. The empty pool is only consulted when no partial exists: a
        // blank grid at the root, or sections the fill so far cannot reach.
        let pool = if classes.partial.is_empty() {
            &classes.empty
        } else {
            &classes.partial
        };
        let slot = self.select_slot(pool);

        let Some(candidates) = self.library.find_matches(&slot.pattern) else {
            self.stats.dead_ends += 1;
            return;
        };

        log::trace!("depth {depth}: filling {slot} ({} candidates)", candidates.len());

        for &id in candidates {
            grid.write_span(&slot.span, self.library.word(id));
            self.node(grid, depth + 1);
            // undo the commit so the parent frame sees its own state again
            grid.write_span(&slot.span, &slot.pattern);
            if self.stop.is_some() {
                return;
            }
        }
    }

    fn select_slot<'s>(&self, pool: &'s [Slot]) -> &'s Slot {
        match self.config.policy {
            SlotPolicy::FirstInSpanOrder => &pool[0],
            SlotPolicy::FewestCandidates => pool
                .iter()
                .min_by_key(|slot| {
                    self.library
                        .find_matches(&slot.pattern)
                        .map_or(0, |bucket| bucket.len())
                })
                .unwrap_or(&pool[0]),
        }
    }
}
