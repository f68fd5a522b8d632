//! Tests for block optical rules

#[cfg(test)]
mod tests {
    use lazor::LazorError;
    use lazor::beam::interaction::{Interaction, interact, reflect};
    use lazor::lattice::block::{Block, BlockKind};
    use lazor::lattice::configuration::{Contact, Face};
    use lazor::lattice::point::{Cell, Direction, LatticePoint};

    const POINT: LatticePoint = LatticePoint::new(2, 1);

    fn contact(kind: BlockKind, face: Face) -> Option<Contact> {
        Some(Contact {
            block: Block {
                kind,
                cell: Cell::new(1, 0),
                fixed: true,
            },
            face,
        })
    }

    // Tests reflection flips the component along the face normal
    // Verified by flipping dy on vertical faces
    #[test]
    fn test_reflect_faces() {
        assert_eq!(
            reflect(Direction::DOWN_RIGHT, Face::Vertical, POINT).unwrap(),
            Direction::DOWN_LEFT
        );
        assert_eq!(
            reflect(Direction::DOWN_RIGHT, Face::Horizontal, POINT).unwrap(),
            Direction::UP_RIGHT
        );
    }

    // Tests corner reflections are ambiguous
    // Verified by reversing both components at corners
    #[test]
    fn test_reflect_corner_is_ambiguous() {
        let result = reflect(Direction::UP_LEFT, Face::Corner, POINT);
        assert!(matches!(
            result,
            Err(LazorError::AmbiguousGeometry { point: POINT, faces: 2 })
        ));
    }

    // Tests no contact lets the beam pass
    // Verified by absorbing when nothing is touched
    #[test]
    fn test_no_contact_passes() {
        assert_eq!(
            interact(None, Direction::UP_RIGHT, POINT).unwrap(),
            Interaction::Pass
        );
    }

    // Tests opaque blocks absorb on any face, corners included
    // Verified by reflecting off opaque blocks
    #[test]
    fn test_opaque_absorbs() {
        for face in [Face::Vertical, Face::Horizontal, Face::Corner] {
            assert_eq!(
                interact(contact(BlockKind::Opaque, face), Direction::UP_RIGHT, POINT).unwrap(),
                Interaction::Absorb
            );
        }
    }

    // Tests reflecting blocks redirect the beam
    // Verified by passing through reflecting blocks
    #[test]
    fn test_reflect_redirects() {
        assert_eq!(
            interact(
                contact(BlockKind::Reflect, Face::Vertical),
                Direction::DOWN_RIGHT,
                POINT
            )
            .unwrap(),
            Interaction::Redirect(Direction::DOWN_LEFT)
        );
    }

    // Tests refracting blocks split into pass-through and reflected beams
    // Verified by dropping the pass-through continuation
    #[test]
    fn test_refract_splits() {
        assert_eq!(
            interact(
                contact(BlockKind::Refract, Face::Horizontal),
                Direction::DOWN_RIGHT,
                POINT
            )
            .unwrap(),
            Interaction::Split {
                through: Direction::DOWN_RIGHT,
                reflected: Direction::UP_RIGHT,
            }
        );
        assert!(interact(contact(BlockKind::Refract, Face::Corner), Direction::DOWN_RIGHT, POINT).is_err());
    }
}
