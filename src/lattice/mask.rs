use bitvec::prelude::*;
use std::fmt;

use crate::lattice::point::LatticePoint;

/// Fixed-size bitset over the points of one board's lattice
///
/// Points are stored row-major at `y * (2W + 1) + x`. Points outside the
/// lattice are never stored and never reported as members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatticeMask {
    bits: BitVec,
    columns: usize,
    rows: usize,
}

impl LatticeMask {
    /// Create an empty mask for a lattice spanning `[0, max_x] × [0, max_y]`
    pub fn new(max_x: i32, max_y: i32) -> Self {
        let columns = usize::try_from(max_x).map_or(0, |x| x + 1);
        let rows = usize::try_from(max_y).map_or(0, |y| y + 1);
        Self {
            bits: bitvec![0; columns * rows],
            columns,
            rows,
        }
    }

    fn slot(&self, point: LatticePoint) -> Option<usize> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        (x < self.columns && y < self.rows).then_some(y * self.columns + x)
    }

    /// Insert a point, returning true if it was not already present
    ///
    /// Points outside the lattice are ignored and return false.
    pub fn insert(&mut self, point: LatticePoint) -> bool {
        let Some(slot) = self.slot(point) else {
            return false;
        };
        let Some(mut bit) = self.bits.get_mut(slot) else {
            return false;
        };
        let fresh = !*bit;
        *bit = true;
        fresh
    }

    /// Test point membership
    pub fn contains(&self, point: LatticePoint) -> bool {
        self.slot(point)
            .is_some_and(|slot| self.bits.get(slot).as_deref() == Some(&true))
    }

    /// Add every point of `other` to this mask
    ///
    /// Masks of the same lattice are combined word by word.
    pub fn union_with(&mut self, other: &Self) {
        if self.columns == other.columns && self.rows == other.rows {
            self.bits |= other.bits.as_bitslice();
            return;
        }
        for point in other.points() {
            self.insert(point);
        }
    }

    /// Test whether every point yielded by `points` is a member
    pub fn covers<'a>(&self, points: impl IntoIterator<Item = &'a LatticePoint>) -> bool {
        points.into_iter().all(|&point| self.contains(point))
    }

    /// Test if no points are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count points in the mask
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Extract all member points in row-major order
    pub fn points(&self) -> Vec<LatticePoint> {
        let columns = self.columns.max(1);
        self.bits
            .iter_ones()
            .map(|slot| LatticePoint::new((slot % columns) as i32, (slot / columns) as i32))
            .collect()
    }
}

impl fmt::Display for LatticeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LatticeMask({} points)", self.count())
    }
}
