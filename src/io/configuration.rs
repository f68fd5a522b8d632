//! Solver constants and runtime configuration defaults

// Board files
/// Extension of board files picked up when a directory is processed
pub const BOARD_EXTENSION: &str = "bff";

// Board size limit
/// Maximum allowed board width or height in cells
pub const MAX_BOARD_DIMENSION: usize = 256;

// Search parallelism
/// Worker threads used when none are requested
pub const DEFAULT_THREADS: usize = 1;

/// Frontier branches generated per worker thread before exploration starts
pub const FRONTIER_BRANCHES_PER_THREAD: usize = 8;

// Progress display settings
/// Nodes expanded between progress refreshes
pub const PROGRESS_REFRESH_NODES: u64 = 2048;
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Spinner tick interval in milliseconds
pub const SPINNER_TICK_MS: u64 = 120;

// Output settings
/// Suffix added to report filenames
pub const OUTPUT_SUFFIX: &str = "_solved";
/// Extension of written reports
pub const OUTPUT_EXTENSION: &str = "txt";
