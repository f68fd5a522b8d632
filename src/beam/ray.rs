use crate::lattice::board::BeamSource;
use crate::lattice::point::{Direction, LatticePoint};

/// Why a beam stopped travelling in a straight line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeamEnd {
    /// The next point would leave the lattice
    Exited,
    /// An opaque block absorbed the beam
    Absorbed,
    /// A reflecting block turned the beam; one continuation was spawned
    Reflected,
    /// A refracting block split the beam; two continuations were spawned
    Split,
    /// The beam reached a (point, direction) state already processed
    Looped,
}

/// One straight run of light
///
/// Beams are values: propagation never mutates a beam in place, it finishes
/// it with a terminal point and spawns fresh beams for any continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beam {
    /// Lattice point the run starts from
    pub origin: LatticePoint,
    /// Travel direction of the run
    pub direction: Direction,
    /// Last point of the run, once it has been propagated
    pub terminal: Option<LatticePoint>,
    /// How the run ended, once it has been propagated
    pub end: Option<BeamEnd>,
}

impl Beam {
    /// Unpropagated beam
    pub const fn new(origin: LatticePoint, direction: Direction) -> Self {
        Self {
            origin,
            direction,
            terminal: None,
            end: None,
        }
    }

    /// Copy of this beam finished at `terminal`
    #[must_use]
    pub const fn finished(self, terminal: LatticePoint, end: BeamEnd) -> Self {
        Self {
            terminal: Some(terminal),
            end: Some(end),
            ..self
        }
    }

    /// Whether the beam has been propagated
    pub const fn is_finished(&self) -> bool {
        self.terminal.is_some()
    }
}

impl From<BeamSource> for Beam {
    fn from(source: BeamSource) -> Self {
        Self::new(source.origin, source.direction)
    }
}
