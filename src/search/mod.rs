/// Search hooks for progress display and instrumentation
pub mod observer;
/// Search options, statistics and terminal outcomes
pub mod outcome;
/// Branch-parallel exploration with atomic cancellation
pub mod parallel;
/// Depth-first placement enumeration with pruning
pub mod placement;

pub use outcome::{SearchConfig, SearchOutcome, SearchReport, SearchStats, Solution};
pub use placement::{PlacementSearch, solve};
