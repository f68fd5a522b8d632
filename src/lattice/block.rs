//! Block types and the multiset of movable blocks

use crate::lattice::point::Cell;
use std::fmt;

/// Optical behaviour of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockKind {
    /// Mirrors the beam off the struck face
    Reflect,
    /// Absorbs the beam
    Opaque,
    /// Lets the beam through and also reflects a copy of it
    Refract,
}

impl BlockKind {
    /// Every block kind, in enumeration order used by the search
    pub const ALL: [Self; 3] = [Self::Reflect, Self::Opaque, Self::Refract];

    /// Board-file symbol for this kind
    pub const fn symbol(self) -> char {
        match self {
            Self::Reflect => 'A',
            Self::Opaque => 'B',
            Self::Refract => 'C',
        }
    }

    /// Parse a board-file symbol
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'A' => Some(Self::Reflect),
            'B' => Some(Self::Opaque),
            'C' => Some(Self::Refract),
            _ => None,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reflect => "reflect",
            Self::Opaque => "opaque",
            Self::Refract => "refract",
        };
        write!(f, "{name}")
    }
}

/// A block sitting on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    /// Optical behaviour
    pub kind: BlockKind,
    /// Cell the block occupies
    pub cell: Cell,
    /// Whether the block was part of the loaded board rather than placed by search
    pub fixed: bool,
}

/// Multiset of block kinds
///
/// Used both for the movable-block pool of a board and for the blocks still
/// unplaced during search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BlockCounts {
    reflect: usize,
    opaque: usize,
    refract: usize,
}

impl BlockCounts {
    /// Empty multiset
    pub const fn new() -> Self {
        Self {
            reflect: 0,
            opaque: 0,
            refract: 0,
        }
    }

    const fn slot_mut(&mut self, kind: BlockKind) -> &mut usize {
        match kind {
            BlockKind::Reflect => &mut self.reflect,
            BlockKind::Opaque => &mut self.opaque,
            BlockKind::Refract => &mut self.refract,
        }
    }

    /// Builder-style setter for one kind's count
    #[must_use]
    pub const fn with(mut self, kind: BlockKind, count: usize) -> Self {
        *self.slot_mut(kind) = count;
        self
    }

    /// Number of blocks of `kind`
    pub const fn get(&self, kind: BlockKind) -> usize {
        match kind {
            BlockKind::Reflect => self.reflect,
            BlockKind::Opaque => self.opaque,
            BlockKind::Refract => self.refract,
        }
    }

    /// Set the count of `kind`
    pub const fn set(&mut self, kind: BlockKind, count: usize) {
        *self.slot_mut(kind) = count;
    }

    /// Total number of blocks across all kinds
    pub const fn total(&self) -> usize {
        self.reflect + self.opaque + self.refract
    }

    /// Test whether the multiset holds no blocks
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Remove one block of `kind`, returning false when none remain
    pub const fn take(&mut self, kind: BlockKind) -> bool {
        let count = self.slot_mut(kind);
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Return one block of `kind` to the multiset
    pub const fn restore(&mut self, kind: BlockKind) {
        *self.slot_mut(kind) += 1;
    }

    /// Kinds with a non-zero count, in [`BlockKind::ALL`] order
    pub fn available(&self) -> impl Iterator<Item = BlockKind> + '_ {
        BlockKind::ALL
            .into_iter()
            .filter(|&kind| self.get(kind) > 0)
    }
}

impl FromIterator<BlockKind> for BlockCounts {
    fn from_iter<I: IntoIterator<Item = BlockKind>>(iter: I) -> Self {
        let mut counts = Self::new();
        for kind in iter {
            counts.restore(kind);
        }
        counts
    }
}

impl fmt::Display for BlockCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = BlockKind::ALL
            .iter()
            .map(|&kind| format!("{} {}", kind.symbol(), self.get(kind)))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
