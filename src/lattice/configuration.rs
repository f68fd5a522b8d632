//! Candidate board configurations and block contact geometry
//!
//! A [`Configuration`] overlays one movable [`Placement`] on a borrowed
//! [`Board`]. Constructing or discarding one never copies the grid.

use std::collections::BTreeMap;
use std::fmt;

use crate::io::error::{LazorError, Result, malformed_board};
use crate::lattice::block::{Block, BlockCounts, BlockKind};
use crate::lattice::board::{Board, CellKind};
use crate::lattice::mask::LatticeMask;
use crate::lattice::point::{Axis, Cell, Direction, LatticePoint, PointKind, corners_of};

/// Movable blocks assigned to cells, keyed by cell in row-major order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Placement {
    blocks: BTreeMap<Cell, BlockKind>,
}

impl Placement {
    /// Empty placement
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `kind` to `cell`, returning the kind previously there
    pub fn insert(&mut self, cell: Cell, kind: BlockKind) -> Option<BlockKind> {
        self.blocks.insert(cell, kind)
    }

    /// Kind placed on `cell`
    pub fn get(&self, cell: Cell) -> Option<BlockKind> {
        self.blocks.get(&cell).copied()
    }

    /// Placed blocks in row-major cell order
    pub fn iter(&self) -> impl Iterator<Item = (Cell, BlockKind)> + '_ {
        self.blocks.iter().map(|(&cell, &kind)| (cell, kind))
    }

    /// Number of placed blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Test whether nothing is placed
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Multiset of placed kinds
    pub fn counts(&self) -> BlockCounts {
        self.blocks.values().copied().collect()
    }
}

impl FromIterator<(Cell, BlockKind)> for Placement {
    fn from_iter<I: IntoIterator<Item = (Cell, BlockKind)>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(cell, kind)| format!("{}@{cell}", kind.symbol()))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Which face of a block a beam strikes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// A face parallel to the y axis, crossed by the beam's x motion
    Vertical,
    /// A face parallel to the x axis, crossed by the beam's y motion
    Horizontal,
    /// The block's corner, where two faces meet
    Corner,
}

impl Face {
    /// Axis whose direction component a reflection inverts
    ///
    /// The contact point sits at zero distance from the struck face along its
    /// normal and at distance one along the other axis, so the smaller axis
    /// flips. A corner is at zero distance on both axes and has no single
    /// normal.
    pub const fn normal_axis(self) -> Option<Axis> {
        match self {
            Self::Vertical => Some(Axis::X),
            Self::Horizontal => Some(Axis::Y),
            Self::Corner => None,
        }
    }
}

/// A beam touching a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// The touched block
    pub block: Block,
    /// Face of the block that is struck
    pub face: Face,
}

/// Per-point view of a configuration for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointTag {
    /// Only non-placeable cells meet at this point
    Empty,
    /// Beams can cross this point and a block could still be placed beside it
    Passable,
    /// At least one beam visited this point
    BeamHit,
    /// The point lies on the footprint of a block
    AdjacentToBlock(BlockKind),
}

/// One fully specified assignment of fixed and movable blocks to cells
#[derive(Debug, Clone)]
pub struct Configuration<'b> {
    board: &'b Board,
    placement: Placement,
}

impl<'b> Configuration<'b> {
    /// Overlay `placement` on `board`
    ///
    /// # Errors
    ///
    /// Returns [`LazorError::MalformedBoard`] if a movable block sits on a cell
    /// that is not [`CellKind::Open`].
    pub fn new(board: &'b Board, placement: Placement) -> Result<Self> {
        if let Some((cell, kind)) = placement
            .iter()
            .find(|(cell, _)| board.cell_kind(*cell) != Some(CellKind::Open))
        {
            return Err(malformed_board(&format!(
                "movable {kind} block placed on non-open cell {cell}"
            )));
        }
        Ok(Self { board, placement })
    }

    /// Configuration with only the board's fixed blocks
    pub fn fixed_only(board: &'b Board) -> Self {
        Self {
            board,
            placement: Placement::new(),
        }
    }

    /// Board this configuration overlays
    pub const fn board(&self) -> &'b Board {
        self.board
    }

    /// Movable blocks of this configuration
    pub const fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Release the movable placement
    pub fn into_placement(self) -> Placement {
        self.placement
    }

    /// Block on `cell`, fixed or movable
    pub fn block_at(&self, cell: Cell) -> Option<Block> {
        self.board.fixed_block(cell).or_else(|| {
            self.placement.get(cell).map(|kind| Block {
                kind,
                cell,
                fixed: false,
            })
        })
    }

    fn block_centered_at(&self, point: LatticePoint) -> Option<Block> {
        Cell::from_center(point).and_then(|cell| self.block_at(cell))
    }

    /// The block whose face a beam crosses when moving into `point` along `incoming`
    ///
    /// At an edge midpoint the only candidate is the cell on the far side of
    /// the edge. At a corner the beam enters one cell diagonally and grazes the
    /// two cells its x and y motions lead into; at most one of those may hold a
    /// block. Cell centres touch nothing.
    ///
    /// # Errors
    ///
    /// Returns [`LazorError::AmbiguousGeometry`] when more than one block is
    /// touched at a corner.
    pub fn block_touching(
        &self,
        point: LatticePoint,
        incoming: Direction,
    ) -> Result<Option<Contact>> {
        let (dx, dy) = (incoming.dx(), incoming.dy());
        match point.kind() {
            PointKind::Center => Ok(None),
            PointKind::VerticalEdge => Ok(self
                .block_centered_at(point.offset(dx, 0))
                .map(|block| Contact {
                    block,
                    face: Face::Vertical,
                })),
            PointKind::HorizontalEdge => Ok(self
                .block_centered_at(point.offset(0, dy))
                .map(|block| Contact {
                    block,
                    face: Face::Horizontal,
                })),
            PointKind::Corner => {
                let candidates = [
                    (point.offset(dx, dy), Face::Corner),
                    (point.offset(dx, -dy), Face::Vertical),
                    (point.offset(-dx, dy), Face::Horizontal),
                ];
                let mut touched = candidates.into_iter().filter_map(|(center, face)| {
                    self.block_centered_at(center)
                        .map(|block| Contact { block, face })
                });
                let first = touched.next();
                let extra = touched.count();
                if extra > 0 {
                    return Err(LazorError::AmbiguousGeometry {
                        point,
                        faces: extra + 1,
                    });
                }
                Ok(first)
            }
        }
    }

    /// Classify `point` for rendering, given the points beams visited
    pub fn tag_at(&self, point: LatticePoint, visited: &LatticeMask) -> PointTag {
        if visited.contains(point) {
            return PointTag::BeamHit;
        }

        let mut touches_open = false;
        for cell in self.cells_around(point) {
            if let Some(block) = self.block_at(cell) {
                return PointTag::AdjacentToBlock(block.kind);
            }
            if self.board.cell_kind(cell) == Some(CellKind::Open) {
                touches_open = true;
            }
        }

        if touches_open {
            PointTag::Passable
        } else {
            PointTag::Empty
        }
    }

    /// Grid cells whose footprint (centre, edges, corners) contains `point`
    fn cells_around(&self, point: LatticePoint) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(4);
        for cx in [point.x - 1, point.x, point.x + 1] {
            for cy in [point.y - 1, point.y, point.y + 1] {
                let Some(cell) = Cell::from_center(LatticePoint::new(cx, cy)) else {
                    continue;
                };
                let [top_left, _, _, bottom_right] = corners_of(cell);
                let inside = (top_left.x..=bottom_right.x).contains(&point.x)
                    && (top_left.y..=bottom_right.y).contains(&point.y);
                if inside && self.board.contains_cell(cell) {
                    cells.push(cell);
                }
            }
        }
        cells.sort();
        cells
    }
}
