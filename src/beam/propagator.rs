//! Beam propagation over a configuration
//!
//! Each source beam is walked through an explicit work-list: a beam runs in a
//! straight line until it leaves the lattice, is absorbed, or touches a block
//! that turns or splits it, in which case the continuations are queued as new
//! beams. A `(point, direction)` guard shared by one source's whole lineage
//! terminates closed loops.

use bitvec::prelude::*;
use std::collections::{BTreeSet, VecDeque};

use crate::beam::interaction::{Interaction, interact};
use crate::beam::ray::{Beam, BeamEnd};
use crate::io::error::{LazorError, Result};
use crate::lattice::board::Board;
use crate::lattice::configuration::Configuration;
use crate::lattice::mask::LatticeMask;
use crate::lattice::point::{Direction, LatticePoint};

/// Everything a set of beams lit up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    visited: LatticeMask,
    points: Vec<LatticePoint>,
    beams: Vec<Beam>,
}

impl Trace {
    /// Empty trace sized for `board`'s lattice
    pub fn for_board(board: &Board) -> Self {
        let (max_x, max_y) = board.lattice_extent();
        Self {
            visited: LatticeMask::new(max_x, max_y),
            points: Vec::new(),
            beams: Vec::new(),
        }
    }

    fn visit(&mut self, point: LatticePoint) {
        if self.visited.insert(point) {
            self.points.push(point);
        }
    }

    /// Set of visited lattice points
    pub const fn visited(&self) -> &LatticeMask {
        &self.visited
    }

    /// Visited points in order of first visit
    pub fn points(&self) -> &[LatticePoint] {
        &self.points
    }

    /// Finished beams in processing order
    pub fn beams(&self) -> &[Beam] {
        &self.beams
    }

    /// Test whether every target was visited
    pub fn covers(&self, targets: &BTreeSet<LatticePoint>) -> bool {
        self.visited.covers(targets)
    }

    /// Targets the trace did not reach
    pub fn missing(&self, targets: &BTreeSet<LatticePoint>) -> Vec<LatticePoint> {
        targets
            .iter()
            .copied()
            .filter(|&target| !self.visited.contains(target))
            .collect()
    }

    /// Union `other` into this trace
    pub fn merge(&mut self, other: Self) {
        let fresh: Vec<LatticePoint> = other
            .points
            .into_iter()
            .filter(|&point| !self.visited.contains(point))
            .collect();
        self.points.extend(fresh);
        self.visited.union_with(&other.visited);
        self.beams.extend(other.beams);
    }
}

/// Processed `(point, direction)` states of one beam lineage
struct StateGuard {
    seen: BitVec,
    columns: usize,
    rows: usize,
}

impl StateGuard {
    fn for_board(board: &Board) -> Self {
        let (max_x, max_y) = board.lattice_extent();
        let columns = usize::try_from(max_x).map_or(0, |x| x + 1);
        let rows = usize::try_from(max_y).map_or(0, |y| y + 1);
        Self {
            seen: bitvec![0; columns * rows * Direction::ALL.len()],
            columns,
            rows,
        }
    }

    /// Record a state, returning false if it was already processed
    fn insert(&mut self, point: LatticePoint, direction: Direction) -> bool {
        let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
            return false;
        };
        if x >= self.columns || y >= self.rows {
            return false;
        }
        let slot = (y * self.columns + x) * Direction::ALL.len() + direction.index();
        let Some(mut bit) = self.seen.get_mut(slot) else {
            return false;
        };
        if *bit {
            return false;
        }
        *bit = true;
        true
    }
}

/// Finish `beam` at `point` as `interaction` dictates, queueing continuations
///
/// Returns false when nothing was touched and the beam keeps travelling.
fn settle(
    beam: Beam,
    point: LatticePoint,
    interaction: Interaction,
    trace: &mut Trace,
    pending: &mut VecDeque<Beam>,
) -> bool {
    let end = match interaction {
        Interaction::Pass => return false,
        Interaction::Absorb => BeamEnd::Absorbed,
        Interaction::Redirect(turned) => {
            pending.push_back(Beam::new(point, turned));
            BeamEnd::Reflected
        }
        Interaction::Split { through, reflected } => {
            pending.push_back(Beam::new(point, through));
            pending.push_back(Beam::new(point, reflected));
            BeamEnd::Split
        }
    };
    trace.beams.push(beam.finished(point, end));
    true
}

/// Walks beams through one configuration
///
/// Holds no mutable state, so independent sources can be traced concurrently.
pub struct Propagator<'c, 'b> {
    config: &'c Configuration<'b>,
}

impl<'c, 'b> Propagator<'c, 'b> {
    /// Create a propagator for `config`
    pub const fn new(config: &'c Configuration<'b>) -> Self {
        Self { config }
    }

    /// Trace one beam and every beam it transitively spawns
    ///
    /// The beam's origin is always part of the visited set. A block the
    /// origin touches in the beam's direction acts before the first step.
    /// Continuations start on the face of the block that spawned them and
    /// skip that check.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The origin lies outside the lattice
    /// - Any beam of the lineage touches ambiguous geometry
    pub fn trace_beam(&self, beam: Beam) -> Result<Trace> {
        let board = self.config.board();
        if !board.in_bounds(beam.origin) {
            return Err(LazorError::BeamOutOfBounds {
                origin: beam.origin,
            });
        }

        let mut trace = Trace::for_board(board);
        let mut guard = StateGuard::for_board(board);
        let mut pending = VecDeque::new();

        trace.visit(beam.origin);
        let contact = self.config.block_touching(beam.origin, beam.direction)?;
        let interaction = interact(contact, beam.direction, beam.origin)?;
        if !settle(beam, beam.origin, interaction, &mut trace, &mut pending) {
            pending.push_back(beam);
        }

        while let Some(current) = pending.pop_front() {
            self.walk(current, &mut guard, &mut trace, &mut pending)?;
        }

        Ok(trace)
    }

    /// Run a single beam until it stops, queueing any continuations
    fn walk(
        &self,
        beam: Beam,
        guard: &mut StateGuard,
        trace: &mut Trace,
        pending: &mut VecDeque<Beam>,
    ) -> Result<()> {
        let board = self.config.board();
        let direction = beam.direction;
        let mut point = beam.origin;
        trace.visit(point);

        loop {
            if !guard.insert(point, direction) {
                trace.beams.push(beam.finished(point, BeamEnd::Looped));
                return Ok(());
            }

            let next = point.step(direction);
            if !board.in_bounds(next) {
                trace.beams.push(beam.finished(point, BeamEnd::Exited));
                return Ok(());
            }
            trace.visit(next);

            let contact = self.config.block_touching(next, direction)?;
            let interaction = interact(contact, direction, next)?;
            if settle(beam, next, interaction, trace, pending) {
                return Ok(());
            }
            point = next;
        }
    }

    /// Trace every source of the board, one after another
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any source, in source order.
    pub fn run(&self) -> Result<Trace> {
        let mut trace = Trace::for_board(self.config.board());
        for &source in self.config.board().sources() {
            trace.merge(self.trace_beam(Beam::from(source))?);
        }
        Ok(trace)
    }

    /// Trace every source of the board on its own scoped thread
    ///
    /// Produces exactly the trace [`Propagator::run`] produces.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any source, in source order.
    pub fn run_parallel(&self) -> Result<Trace> {
        let sources = self.config.board().sources();
        let lineages: Vec<Result<Trace>> = std::thread::scope(|scope| {
            let handles: Vec<_> = sources
                .iter()
                .map(|&source| scope.spawn(move || self.trace_beam(Beam::from(source))))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        });

        let mut trace = Trace::for_board(self.config.board());
        for lineage in lineages {
            trace.merge(lineage?);
        }
        Ok(trace)
    }
}
