//! Immutable puzzle board with validated sources and targets
//!
//! Holds the coarse cell grid, the pool of movable blocks, the beam sources
//! and the target points. Every structural check happens in [`Board::new`],
//! so the propagator and search can treat a board as well-formed.

use ndarray::Array2;
use std::collections::BTreeSet;
use std::fmt;

use crate::io::configuration::MAX_BOARD_DIMENSION;
use crate::io::error::{Result, malformed_board};
use crate::lattice::block::{Block, BlockCounts, BlockKind};
use crate::lattice::point::{Cell, Direction, LatticePoint};

/// Contents of a coarse grid cell at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Free cell that may receive a movable block
    Open,
    /// Cell that can never hold a block (beams still cross it)
    NonPlaceable,
    /// Cell holding a block fixed by the board
    Fixed(BlockKind),
}

impl CellKind {
    /// Board-file token for this cell
    pub const fn symbol(self) -> char {
        match self {
            Self::Open => 'o',
            Self::NonPlaceable => 'x',
            Self::Fixed(kind) => kind.symbol(),
        }
    }
}

/// A light emitter: lattice origin plus diagonal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BeamSource {
    /// Lattice point the beam starts from
    pub origin: LatticePoint,
    /// Initial travel direction
    pub direction: Direction,
}

impl BeamSource {
    /// Create a beam source
    pub const fn new(origin: LatticePoint, direction: Direction) -> Self {
        Self { origin, direction }
    }
}

/// Loaded puzzle, read-only for the duration of solving
#[derive(Debug, Clone)]
pub struct Board {
    /// Cell contents indexed by `[row, col]`
    cells: Array2<CellKind>,
    movable: BlockCounts,
    sources: Vec<BeamSource>,
    targets: BTreeSet<LatticePoint>,
}

impl Board {
    /// Validate and assemble a board
    ///
    /// # Errors
    ///
    /// Returns [`crate::LazorError::MalformedBoard`] if:
    /// - The grid has a zero or oversized dimension
    /// - A source origin or target lies outside `[0, 2W] × [0, 2H]`
    pub fn new(
        cells: Array2<CellKind>,
        movable: BlockCounts,
        sources: Vec<BeamSource>,
        targets: impl IntoIterator<Item = LatticePoint>,
    ) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows == 0 || cols == 0 {
            return Err(malformed_board(&format!(
                "grid must have at least one cell (got {cols}x{rows})"
            )));
        }
        if rows > MAX_BOARD_DIMENSION || cols > MAX_BOARD_DIMENSION {
            return Err(malformed_board(&format!(
                "grid {cols}x{rows} exceeds the {MAX_BOARD_DIMENSION} cell limit"
            )));
        }

        let board = Self {
            cells,
            movable,
            sources,
            targets: targets.into_iter().collect(),
        };

        if let Some(source) = board.sources.iter().find(|s| !board.in_bounds(s.origin)) {
            return Err(malformed_board(&format!(
                "beam source {} lies outside the lattice",
                source.origin
            )));
        }
        if let Some(target) = board.targets.iter().find(|&&t| !board.in_bounds(t)) {
            return Err(malformed_board(&format!(
                "target {target} lies outside the lattice"
            )));
        }

        Ok(board)
    }

    /// Build a board from row vectors, rejecting ragged rows
    ///
    /// # Errors
    ///
    /// Returns [`crate::LazorError::MalformedBoard`] if rows differ in length,
    /// plus every condition checked by [`Board::new`].
    pub fn from_rows(
        rows: Vec<Vec<CellKind>>,
        movable: BlockCounts,
        sources: Vec<BeamSource>,
        targets: impl IntoIterator<Item = LatticePoint>,
    ) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(malformed_board(&format!(
                "row {index} has {} cells, expected {width}",
                row.len()
            )));
        }

        let flat: Vec<CellKind> = rows.into_iter().flatten().collect();
        let cells = Array2::from_shape_vec((height, width), flat)
            .map_err(|e| malformed_board(&format!("grid shape mismatch: {e}")))?;

        Self::new(cells, movable, sources, targets)
    }

    /// Number of cell columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of cell rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Largest lattice coordinates `(2W, 2H)`
    pub fn lattice_extent(&self) -> (i32, i32) {
        (2 * self.width() as i32, 2 * self.height() as i32)
    }

    /// Test whether `point` lies within `[0, 2W] × [0, 2H]`
    pub fn in_bounds(&self, point: LatticePoint) -> bool {
        let (max_x, max_y) = self.lattice_extent();
        (0..=max_x).contains(&point.x) && (0..=max_y).contains(&point.y)
    }

    /// Test whether `cell` is on the grid
    pub fn contains_cell(&self, cell: Cell) -> bool {
        cell.x < self.width() && cell.y < self.height()
    }

    /// Load-time contents of `cell`, or `None` off the grid
    pub fn cell_kind(&self, cell: Cell) -> Option<CellKind> {
        self.cells.get(cell.as_index()).copied()
    }

    /// The fixed block on `cell`, if any
    pub fn fixed_block(&self, cell: Cell) -> Option<Block> {
        match self.cell_kind(cell)? {
            CellKind::Fixed(kind) => Some(Block {
                kind,
                cell,
                fixed: true,
            }),
            CellKind::Open | CellKind::NonPlaceable => None,
        }
    }

    /// Cells that may receive a movable block, in row-major order
    pub fn open_cells(&self) -> Vec<Cell> {
        self.cells
            .indexed_iter()
            .filter(|(_, kind)| **kind == CellKind::Open)
            .map(|((row, col), _)| Cell::new(col, row))
            .collect()
    }

    /// Pool of movable blocks
    pub const fn movable_counts(&self) -> &BlockCounts {
        &self.movable
    }

    /// Beam sources in load order
    pub fn sources(&self) -> &[BeamSource] {
        &self.sources
    }

    /// Lattice points that must be visited
    pub const fn targets(&self) -> &BTreeSet<LatticePoint> {
        &self.targets
    }

    /// Cell rows for display, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = Vec<CellKind>> + '_ {
        self.cells.rows().into_iter().map(|row| row.to_vec())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}:", self.width(), self.height())?;
        for row in self.rows() {
            let tokens: Vec<String> = row.iter().map(|kind| kind.symbol().to_string()).collect();
            writeln!(f, "  {}", tokens.join(" "))?;
        }
        writeln!(f, "Movable blocks: {}", self.movable)?;
        for source in &self.sources {
            writeln!(
                f,
                "Beam at {} moving {}",
                source.origin, source.direction
            )?;
        }
        let targets: Vec<String> = self.targets.iter().map(ToString::to_string).collect();
        write!(f, "Targets: {}", targets.join(" "))
    }
}
