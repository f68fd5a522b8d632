/// Board file parsing and loading
pub mod board_file;
/// Command-line interface and batch processing
pub mod cli;
/// Compile-time defaults and limits
pub mod configuration;
/// Error types and constructors
pub mod error;
/// Progress display for batch runs
pub mod progress;
/// Text reports of search results
pub mod report;
