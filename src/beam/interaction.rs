//! Optical rules applied when a beam touches a block

use crate::io::error::{LazorError, Result};
use crate::lattice::block::BlockKind;
use crate::lattice::configuration::{Contact, Face};
use crate::lattice::point::{Direction, LatticePoint};

/// Effect of a lattice point on a beam arriving there
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Nothing touched; keep going
    Pass,
    /// Beam stops at the contact point
    Absorb,
    /// Beam continues from the contact point in a new direction
    Redirect(Direction),
    /// Beam continues unchanged and a reflected copy starts at the contact point
    Split {
        /// Direction of the pass-through continuation
        through: Direction,
        /// Direction of the reflected continuation
        reflected: Direction,
    },
}

/// Mirror `incoming` off `face`
///
/// # Errors
///
/// Returns [`LazorError::AmbiguousGeometry`] for a corner contact, where two
/// faces are struck at once and no single axis can be chosen.
pub fn reflect(incoming: Direction, face: Face, point: LatticePoint) -> Result<Direction> {
    face.normal_axis()
        .map(|axis| incoming.flip(axis))
        .ok_or(LazorError::AmbiguousGeometry { point, faces: 2 })
}

/// Apply the touched block's rule to a beam arriving at `point` along `incoming`
///
/// # Errors
///
/// Propagates [`reflect`] failures for reflecting and refracting blocks.
pub fn interact(
    contact: Option<Contact>,
    incoming: Direction,
    point: LatticePoint,
) -> Result<Interaction> {
    let Some(contact) = contact else {
        return Ok(Interaction::Pass);
    };

    match contact.block.kind {
        BlockKind::Opaque => Ok(Interaction::Absorb),
        BlockKind::Reflect => Ok(Interaction::Redirect(reflect(
            incoming,
            contact.face,
            point,
        )?)),
        BlockKind::Refract => Ok(Interaction::Split {
            through: incoming,
            reflected: reflect(incoming, contact.face, point)?,
        }),
    }
}
