//! Lattice board: cell and lattice coordinates, blocks, and configurations
//!
//! This module contains the geometry the simulator runs on:
//! - Conversion between cell space and lattice space
//! - The validated, immutable board
//! - Candidate configurations and block contact detection

/// Block kinds, blocks and block-count multisets
pub mod block;
/// Immutable board with cells, sources and targets
pub mod board;
/// Placement overlays and block contact geometry
pub mod configuration;
/// Bitsets over lattice points
pub mod mask;
/// Lattice points, directions and cells
pub mod point;

pub use board::Board;
pub use configuration::Configuration;
