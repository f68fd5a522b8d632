/// Block interaction rules
pub mod interaction;
/// Work-list beam propagation with cycle detection
pub mod propagator;
/// Beam values
pub mod ray;

pub use propagator::{Propagator, Trace};
pub use ray::Beam;
