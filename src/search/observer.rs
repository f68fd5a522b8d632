use crate::lattice::configuration::Placement;
use crate::search::outcome::SearchStats;

/// Hooks called while a search runs
///
/// Both methods default to doing nothing. Observers must be `Clone + Send`
/// because a parallel search hands each worker its own copy.
pub trait SearchObserver: Clone + Send {
    /// Called after every expanded node with the calling worker's counters
    fn on_node(&mut self, _stats: &SearchStats) {}

    /// Called for every complete placement handed to the propagator
    fn on_evaluate(&mut self, _placement: &Placement, _covered: bool) {}
}

/// Observer that ignores every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl SearchObserver for NullObserver {}
