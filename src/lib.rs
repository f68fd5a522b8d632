//! Placement search and beam simulation for Lazor-style optical grid puzzles
//!
//! A board is a grid of cells on a doubled-resolution lattice. Beams travel
//! diagonally between lattice points and are reflected, absorbed or split by
//! the blocks they touch. The search places a fixed multiset of movable
//! blocks on open cells until every target point is lit.

#![forbid(unsafe_code)]

/// Beam values, optical rules and the propagator
pub mod beam;
/// Board loading, reporting, progress display and error handling
pub mod io;
/// Lattice geometry, boards and configurations
pub mod lattice;
/// Depth-first and branch-parallel placement search
pub mod search;

pub use io::error::{LazorError, Result};
