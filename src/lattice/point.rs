//! Lattice and cell coordinate systems
//!
//! Cells live on a coarse `W × H` grid. Every cell `(x, y)` is centred on the
//! lattice point `(2x + 1, 2y + 1)`, so the lattice spans `[0, 2W] × [0, 2H]`
//! and points with both coordinates even are corners shared by up to four
//! cells. The y axis points down, matching the row order of board files.

use std::cmp::Ordering;
use std::fmt;

/// Integer coordinate at double cell-grid resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatticePoint {
    /// Horizontal lattice coordinate
    pub x: i32,
    /// Vertical lattice coordinate (grows downwards)
    pub y: i32,
}

/// Position of a lattice point relative to the cell grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    /// Both coordinates even: shared corner of up to four cells
    Corner,
    /// Both coordinates odd: centre of a single cell
    Center,
    /// Even x, odd y: midpoint of an edge separating horizontally adjacent cells
    VerticalEdge,
    /// Odd x, even y: midpoint of an edge separating vertically adjacent cells
    HorizontalEdge,
}

impl LatticePoint {
    /// Create a lattice point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point one diagonal step away in `direction`
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        Self {
            x: self.x + direction.dx(),
            y: self.y + direction.dy(),
        }
    }

    /// Offset this point by an arbitrary lattice vector
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Classify the point by coordinate parity
    pub const fn kind(self) -> PointKind {
        match (self.x.rem_euclid(2) == 0, self.y.rem_euclid(2) == 0) {
            (true, true) => PointKind::Corner,
            (false, false) => PointKind::Center,
            (true, false) => PointKind::VerticalEdge,
            (false, true) => PointKind::HorizontalEdge,
        }
    }
}

impl fmt::Display for LatticePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Lattice axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal component
    X,
    /// Vertical component
    Y,
}

/// Unit diagonal direction `(dx, dy) ∈ {-1, 1} × {-1, 1}`
///
/// The fields are private so a direction can never hold a zero or
/// non-unit component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    dx: i8,
    dy: i8,
}

impl Direction {
    /// Moving right and down
    pub const DOWN_RIGHT: Self = Self { dx: 1, dy: 1 };
    /// Moving left and down
    pub const DOWN_LEFT: Self = Self { dx: -1, dy: 1 };
    /// Moving right and up
    pub const UP_RIGHT: Self = Self { dx: 1, dy: -1 };
    /// Moving left and up
    pub const UP_LEFT: Self = Self { dx: -1, dy: -1 };

    /// All four diagonal directions, ordered by [`Direction::index`]
    pub const ALL: [Self; 4] = [
        Self::UP_LEFT,
        Self::UP_RIGHT,
        Self::DOWN_LEFT,
        Self::DOWN_RIGHT,
    ];

    /// Build a direction from raw components
    ///
    /// Returns `None` unless both components are exactly `-1` or `1`.
    pub const fn new(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (-1 | 1, -1 | 1) => Some(Self {
                dx: dx as i8,
                dy: dy as i8,
            }),
            _ => None,
        }
    }

    /// Horizontal component
    pub const fn dx(self) -> i32 {
        self.dx as i32
    }

    /// Vertical component
    pub const fn dy(self) -> i32 {
        self.dy as i32
    }

    /// Invert the component along `axis`
    #[must_use]
    pub const fn flip(self, axis: Axis) -> Self {
        match axis {
            Axis::X => Self {
                dx: -self.dx,
                dy: self.dy,
            },
            Axis::Y => Self {
                dx: self.dx,
                dy: -self.dy,
            },
        }
    }

    /// Dense index in `0..4`, used to key per-direction state
    pub const fn index(self) -> usize {
        (((self.dy + 1) / 2) * 2 + (self.dx + 1) / 2) as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

/// Coarse grid cell, ordered row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
}

impl Cell {
    /// Create a cell reference
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Lattice point at the centre of the cell
    pub const fn center(self) -> LatticePoint {
        LatticePoint::new(2 * self.x as i32 + 1, 2 * self.y as i32 + 1)
    }

    /// The cell centred on `point`, if `point` is a non-negative cell centre
    pub const fn from_center(point: LatticePoint) -> Option<Self> {
        if point.x < 1 || point.y < 1 {
            return None;
        }
        match point.kind() {
            PointKind::Center => Some(Self {
                x: ((point.x - 1) / 2) as usize,
                y: ((point.y - 1) / 2) as usize,
            }),
            _ => None,
        }
    }

    /// Index pair for `ndarray` access, in `[row, col]` order
    pub const fn as_index(self) -> [usize; 2] {
        [self.y, self.x]
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// The four corner points of `cell`, diagonally adjacent to its centre
///
/// Ordered top-left, top-right, bottom-left, bottom-right.
pub const fn corners_of(cell: Cell) -> [LatticePoint; 4] {
    let center = cell.center();
    [
        center.offset(-1, -1),
        center.offset(1, -1),
        center.offset(-1, 1),
        center.offset(1, 1),
    ]
}
