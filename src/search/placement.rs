//! Depth-first placement search
//!
//! The enumeration tree places one movable block per level. A node's children
//! pick the open cell (row-major, strictly after the previously used cell) and
//! the kind of the next block, so every combination of cells is visited once
//! and identical kinds are never permuted among the same cells. A leaf is a
//! node with no blocks left to place; it is evaluated by the propagator.

use std::ops::Range;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::beam::propagator::Propagator;
use crate::io::error::{LazorError, Result};
use crate::lattice::block::{BlockCounts, BlockKind};
use crate::lattice::board::Board;
use crate::lattice::configuration::{Configuration, Placement};
use crate::lattice::point::Cell;
use crate::search::observer::{NullObserver, SearchObserver};
use crate::search::outcome::{SearchConfig, SearchOutcome, SearchReport, SearchStats, Solution};
use crate::search::parallel;

/// Shared node counter with an optional cap
pub struct NodeBudget {
    limit: Option<u64>,
    spent: AtomicU64,
}

impl NodeBudget {
    /// Create a budget; `None` never runs out
    pub const fn new(limit: Option<u64>) -> Self {
        Self {
            limit,
            spent: AtomicU64::new(0),
        }
    }

    /// Account for one expanded node
    ///
    /// # Errors
    ///
    /// Returns [`LazorError::BudgetExceeded`] once more nodes than the limit
    /// have been charged.
    pub fn charge(&self) -> Result<()> {
        let spent = self.spent.fetch_add(1, Ordering::Relaxed) + 1;
        match self.limit {
            Some(limit) if spent > limit => Err(LazorError::BudgetExceeded { nodes: limit }),
            _ => Ok(()),
        }
    }

    /// Nodes charged so far
    pub fn spent(&self) -> u64 {
        self.spent.load(Ordering::Relaxed)
    }
}

/// A node of the enumeration tree: a partial placement
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branch {
    /// Index into the open-cell list of the first cell still usable
    pub next_cell: usize,
    /// Movable blocks not yet placed
    pub remaining: BlockCounts,
    /// Blocks placed so far, in placement order
    pub placed: Vec<(Cell, BlockKind)>,
}

impl Branch {
    /// The empty placement with the whole movable pool remaining
    pub const fn root(remaining: BlockCounts) -> Self {
        Self {
            next_cell: 0,
            remaining,
            placed: Vec::new(),
        }
    }

    /// Whether every movable block has been placed
    pub const fn is_leaf(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Open-cell indices that can host the next block
    ///
    /// Starting later than `open_count - remaining` would leave fewer cells
    /// than blocks, so those starts are cut off.
    pub fn start_range(&self, open_count: usize) -> Range<usize> {
        let last = (open_count + 1).saturating_sub(self.remaining.total());
        self.next_cell..last.max(self.next_cell)
    }

    /// Child branches in enumeration order
    ///
    /// A leaf is its own only child, so expanding a frontier keeps leaves in place.
    pub fn children(&self, open_cells: &[Cell]) -> Vec<Self> {
        if self.is_leaf() {
            return vec![self.clone()];
        }

        let mut children = Vec::new();
        for index in self.start_range(open_cells.len()) {
            let Some(&cell) = open_cells.get(index) else {
                break;
            };
            for kind in self.remaining.available() {
                let mut remaining = self.remaining;
                remaining.take(kind);
                let mut placed = self.placed.clone();
                placed.push((cell, kind));
                children.push(Self {
                    next_cell: index + 1,
                    remaining,
                    placed,
                });
            }
        }
        children
    }

    /// The placement described by this branch
    pub fn placement(&self) -> Placement {
        self.placed.iter().copied().collect()
    }
}

/// One depth-first worker over a subtree
pub struct Explorer<'s, 'b, O> {
    board: &'b Board,
    open_cells: &'s [Cell],
    config: SearchConfig,
    budget: &'s NodeBudget,
    cancel: Option<(&'s AtomicUsize, usize)>,
    observer: O,
    stats: SearchStats,
}

impl<'s, 'b, O: SearchObserver> Explorer<'s, 'b, O> {
    /// Create a worker sharing `budget` with its siblings
    pub const fn new(
        board: &'b Board,
        open_cells: &'s [Cell],
        config: SearchConfig,
        budget: &'s NodeBudget,
        observer: O,
    ) -> Self {
        Self {
            board,
            open_cells,
            config,
            budget,
            cancel: None,
            observer,
            stats: SearchStats {
                nodes: 0,
                evaluations: 0,
                pruned: 0,
                rejected: 0,
            },
        }
    }

    /// Abandon the current branch once `solved` drops below `branch`
    pub const fn watch(&mut self, solved: &'s AtomicUsize, branch: usize) {
        self.cancel = Some((solved, branch));
    }

    /// Counters accumulated by this worker
    pub const fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .is_some_and(|(solved, branch)| solved.load(Ordering::Acquire) < branch)
    }

    /// Search the subtree under `branch` for the first winning placement
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The node budget is exhausted
    /// - A generated configuration is rejected for a non-local reason
    pub fn explore(&mut self, branch: &Branch) -> Result<Option<Solution>> {
        if self.cancelled() {
            return Ok(None);
        }
        self.budget.charge()?;
        self.stats.nodes += 1;
        self.observer.on_node(&self.stats);

        if branch.is_leaf() {
            return self.evaluate(branch);
        }

        let range = branch.start_range(self.open_cells.len());
        self.stats.pruned += self.open_cells.len().saturating_sub(range.end) as u64;

        for child in branch.children(self.open_cells) {
            if let Some(solution) = self.explore(&child)? {
                return Ok(Some(solution));
            }
        }
        Ok(None)
    }

    /// Propagate every source through the leaf's configuration and test coverage
    fn evaluate(&mut self, leaf: &Branch) -> Result<Option<Solution>> {
        self.stats.evaluations += 1;
        let config = Configuration::new(self.board, leaf.placement())?;
        let propagator = Propagator::new(&config);
        let traced = if self.config.parallel_beams {
            propagator.run_parallel()
        } else {
            propagator.run()
        };

        match traced {
            Ok(trace) => {
                let covered = trace.covers(self.board.targets());
                self.observer.on_evaluate(config.placement(), covered);
                Ok(covered.then(|| Solution {
                    placement: config.into_placement(),
                    trace,
                }))
            }
            Err(error) if error.is_configuration_local() => {
                self.stats.rejected += 1;
                self.observer.on_evaluate(config.placement(), false);
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}

/// Search for a placement of the movable blocks covering every target
pub struct PlacementSearch<'b, O = NullObserver> {
    board: &'b Board,
    config: SearchConfig,
    observer: O,
}

impl<'b> PlacementSearch<'b> {
    /// Create a search without an observer
    pub const fn new(board: &'b Board, config: SearchConfig) -> Self {
        Self {
            board,
            config,
            observer: NullObserver,
        }
    }
}

impl<'b, O: SearchObserver> PlacementSearch<'b, O> {
    /// Create a search reporting to `observer`
    pub const fn with_observer(board: &'b Board, config: SearchConfig, observer: O) -> Self {
        Self {
            board,
            config,
            observer,
        }
    }

    /// Reject boards with more movable blocks than open cells
    ///
    /// # Errors
    ///
    /// Returns [`LazorError::Infeasible`] when the movable pool cannot fit.
    pub fn check_feasible(&self) -> Result<()> {
        let required = self.board.movable_counts().total();
        let available = self.board.open_cells().len();
        if required > available {
            return Err(LazorError::Infeasible {
                required,
                available,
            });
        }
        Ok(())
    }

    /// Run the search to one of its two terminal outcomes
    ///
    /// Stops at the first winning placement in enumeration order; parallel
    /// runs return the same placement as sequential ones.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The search configuration is invalid
    /// - The board is infeasible (before any propagation happens)
    /// - The node budget is exhausted
    pub fn run(self) -> Result<SearchReport> {
        self.config.validate()?;
        self.check_feasible()?;

        let open_cells = self.board.open_cells();
        let budget = NodeBudget::new(self.config.node_budget);
        let root = Branch::root(*self.board.movable_counts());

        if self.config.threads > 1 {
            return parallel::explore(
                self.board,
                &open_cells,
                self.config,
                &budget,
                &self.observer,
                root,
            );
        }

        let mut explorer = Explorer::new(
            self.board,
            &open_cells,
            self.config,
            &budget,
            self.observer,
        );
        let found = explorer.explore(&root)?;
        Ok(SearchReport {
            outcome: found.map_or(SearchOutcome::Exhausted, SearchOutcome::Solved),
            stats: *explorer.stats(),
        })
    }
}

/// Solve `board` without an observer
///
/// # Errors
///
/// See [`PlacementSearch::run`].
pub fn solve(board: &Board, config: SearchConfig) -> Result<SearchReport> {
    PlacementSearch::new(board, config).run()
}
