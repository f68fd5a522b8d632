use crate::beam::propagator::Trace;
use crate::io::configuration::DEFAULT_THREADS;
use crate::io::error::{Result, invalid_parameter};
use crate::lattice::configuration::Placement;

/// Runtime options for a placement search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Worker threads exploring disjoint branches (1 = sequential)
    pub threads: usize,
    /// Optional cap on expanded search nodes
    pub node_budget: Option<u64>,
    /// Propagate independent sources concurrently within each evaluation
    pub parallel_beams: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            node_budget: None,
            parallel_beams: false,
        }
    }
}

impl SearchConfig {
    /// Check option values before a search starts
    ///
    /// # Errors
    ///
    /// Returns [`crate::LazorError::InvalidParameter`] if `threads` is zero
    /// or `node_budget` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(invalid_parameter(
                "threads",
                &self.threads,
                &"at least one thread is required",
            ));
        }
        if self.node_budget == Some(0) {
            return Err(invalid_parameter(
                "node_budget",
                &0,
                &"a budget must allow at least one node",
            ));
        }
        Ok(())
    }
}

/// Counters describing how much work a search did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Enumeration nodes expanded
    pub nodes: u64,
    /// Complete configurations handed to the propagator
    pub evaluations: u64,
    /// Branches discarded because too few open cells remained
    pub pruned: u64,
    /// Evaluations rejected for ambiguous or out-of-bounds geometry
    pub rejected: u64,
}

impl SearchStats {
    /// Add another worker's counters into these
    pub const fn absorb(&mut self, other: &Self) {
        self.nodes += other.nodes;
        self.evaluations += other.evaluations;
        self.pruned += other.pruned;
        self.rejected += other.rejected;
    }
}

/// Winning configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Movable blocks of the winning configuration
    pub placement: Placement,
    /// Beams of the winning configuration
    pub trace: Trace,
}

/// Terminal state of a search
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A placement whose beams visit every target
    Solved(Solution),
    /// Every valid placement was evaluated and none satisfies all targets
    Exhausted,
}

impl SearchOutcome {
    /// The winning solution, if any
    pub const fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved(solution) => Some(solution),
            Self::Exhausted => None,
        }
    }

    /// Whether the search found a solution
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }
}

/// Outcome of a search together with its statistics
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    /// Terminal state
    pub outcome: SearchOutcome,
    /// Work counters
    pub stats: SearchStats,
}
