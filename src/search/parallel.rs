//! Branch-parallel search
//!
//! The top of the enumeration tree is expanded into an ordered frontier of
//! disjoint branches. Worker threads pull branches in frontier order and
//! explore each on its own copy of the partial placement. The only shared
//! mutable state is an atomic holding the lowest frontier index that has
//! finished the search; workers abandon any branch above it. Because the
//! frontier preserves depth-first order, the winning branch with the lowest
//! index holds the same placement a sequential search would return.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::io::configuration::FRONTIER_BRANCHES_PER_THREAD;
use crate::io::error::{LazorError, Result};
use crate::lattice::board::Board;
use crate::lattice::point::Cell;
use crate::search::observer::SearchObserver;
use crate::search::outcome::{SearchConfig, SearchOutcome, SearchReport, SearchStats, Solution};
use crate::search::placement::{Branch, Explorer, NodeBudget};

/// Expand `root` level by level until at least `target` branches exist
///
/// Stops early when every branch is a leaf. The returned branches are in
/// depth-first order and their subtrees partition the tree under `root`.
pub fn frontier(root: Branch, open_cells: &[Cell], target: usize) -> Vec<Branch> {
    let mut level = vec![root];
    while level.len() < target && level.iter().any(|branch| !branch.is_leaf()) {
        level = level
            .iter()
            .flat_map(|branch| branch.children(open_cells))
            .collect();
    }
    level
}

/// What one worker thread produced
struct WorkerOutput {
    stats: SearchStats,
    solutions: Vec<(usize, Solution)>,
    failures: Vec<(usize, LazorError)>,
}

/// Shared, read-only inputs of all workers
struct WorkQueue<'s, 'b> {
    board: &'b Board,
    open_cells: &'s [Cell],
    config: SearchConfig,
    budget: &'s NodeBudget,
    branches: &'s [Branch],
    next: AtomicUsize,
    finished: AtomicUsize,
}

impl WorkQueue<'_, '_> {
    fn work<O: SearchObserver>(&self, observer: O) -> WorkerOutput {
        let mut explorer = Explorer::new(
            self.board,
            self.open_cells,
            self.config,
            self.budget,
            observer,
        );
        let mut solutions = Vec::new();
        let mut failures = Vec::new();

        loop {
            let index = self.next.fetch_add(1, Ordering::AcqRel);
            let Some(branch) = self.branches.get(index) else {
                break;
            };
            // Branches are handed out in order, so every later one is moot too
            if self.finished.load(Ordering::Acquire) < index {
                break;
            }

            explorer.watch(&self.finished, index);
            match explorer.explore(branch) {
                Ok(Some(solution)) => {
                    self.finished.fetch_min(index, Ordering::AcqRel);
                    solutions.push((index, solution));
                }
                Ok(None) => {}
                Err(error) => {
                    self.finished.fetch_min(index, Ordering::AcqRel);
                    failures.push((index, error));
                }
            }
        }

        WorkerOutput {
            stats: *explorer.stats(),
            solutions,
            failures,
        }
    }
}

/// Explore the tree under `root` on `config.threads` worker threads
///
/// # Errors
///
/// Returns the error of the lowest-indexed failing branch when no branch
/// before it produced a solution.
pub fn explore<O: SearchObserver>(
    board: &Board,
    open_cells: &[Cell],
    config: SearchConfig,
    budget: &NodeBudget,
    observer: &O,
    root: Branch,
) -> Result<SearchReport> {
    let branches = frontier(
        root,
        open_cells,
        config.threads * FRONTIER_BRANCHES_PER_THREAD,
    );
    let queue = WorkQueue {
        board,
        open_cells,
        config,
        budget,
        branches: &branches,
        next: AtomicUsize::new(0),
        finished: AtomicUsize::new(usize::MAX),
    };

    let outputs: Vec<WorkerOutput> = thread::scope(|scope| {
        let handles: Vec<_> = (0..config.threads)
            .map(|_| {
                let observer = observer.clone();
                let queue = &queue;
                scope.spawn(move || queue.work(observer))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    });

    let mut stats = SearchStats::default();
    let mut best: Option<(usize, Solution)> = None;
    let mut first_failure: Option<(usize, LazorError)> = None;
    for output in outputs {
        stats.absorb(&output.stats);
        for (index, solution) in output.solutions {
            if best.as_ref().is_none_or(|(current, _)| index < *current) {
                best = Some((index, solution));
            }
        }
        for (index, error) in output.failures {
            if first_failure.as_ref().is_none_or(|(current, _)| index < *current) {
                first_failure = Some((index, error));
            }
        }
    }

    match (best, first_failure) {
        (Some((solved, _)), Some((failed, error))) if failed < solved => Err(error),
        (Some((_, solution)), _) => Ok(SearchReport {
            outcome: SearchOutcome::Solved(solution),
            stats,
        }),
        (None, Some((_, error))) => Err(error),
        (None, None) => Ok(SearchReport {
            outcome: SearchOutcome::Exhausted,
            stats,
        }),
    }
}
