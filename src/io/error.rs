//! Error types for board loading, simulation and search

use crate::lattice::point::LatticePoint;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver operations
///
/// Load-time structural problems are surfaced to the caller immediately.
/// Simulation-level anomalies ([`LazorError::AmbiguousGeometry`],
/// [`LazorError::BeamOutOfBounds`]) are returned by the propagator and
/// absorbed by the search, which scores the offending configuration as failing.
#[derive(Debug)]
pub enum LazorError {
    /// Inconsistent grid, out-of-bounds source or target, or an illegal placement
    MalformedBoard {
        /// Description of what's wrong with the board
        reason: String,
    },

    /// A lattice point touches more than one block face at once
    AmbiguousGeometry {
        /// Lattice point where the contact happened
        point: LatticePoint,
        /// Number of faces touched simultaneously
        faces: usize,
    },

    /// A beam was asked to start outside the lattice
    BeamOutOfBounds {
        /// Offending origin
        origin: LatticePoint,
    },

    /// More movable blocks than open cells to hold them
    Infeasible {
        /// Number of movable blocks to place
        required: usize,
        /// Number of open cells on the board
        available: usize,
    },

    /// Search explored more nodes than the configured budget allows
    BudgetExceeded {
        /// Node budget that was exhausted
        nodes: u64,
    },

    /// Board file text could not be parsed
    BoardSyntax {
        /// 1-based line number
        line: usize,
        /// Description of the problem
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Runtime parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for LazorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBoard { reason } => write!(f, "Malformed board: {reason}"),
            Self::AmbiguousGeometry { point, faces } => {
                write!(
                    f,
                    "Ambiguous geometry at lattice point {point}: {faces} block faces touched"
                )
            }
            Self::BeamOutOfBounds { origin } => {
                write!(f, "Beam origin {origin} lies outside the lattice")
            }
            Self::Infeasible {
                required,
                available,
            } => {
                write!(
                    f,
                    "Infeasible board: {required} movable blocks but only {available} open cells"
                )
            }
            Self::BudgetExceeded { nodes } => {
                write!(f, "Search budget of {nodes} nodes exceeded")
            }
            Self::BoardSyntax { line, reason } => {
                write!(f, "Board file syntax error on line {line}: {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for LazorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl LazorError {
    /// Whether this error only invalidates one candidate configuration
    ///
    /// Such errors come from placements the search generated itself and are
    /// scored as non-winning instead of aborting the search.
    pub const fn is_configuration_local(&self) -> bool {
        matches!(
            self,
            Self::AmbiguousGeometry { .. } | Self::BeamOutOfBounds { .. }
        )
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, LazorError>;

impl From<std::io::Error> for LazorError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create a malformed board error
pub fn malformed_board(reason: &impl ToString) -> LazorError {
    LazorError::MalformedBoard {
        reason: reason.to_string(),
    }
}

/// Create a board file syntax error
pub fn syntax_error(line: usize, reason: &impl ToString) -> LazorError {
    LazorError::BoardSyntax {
        line,
        reason: reason.to_string(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> LazorError {
    LazorError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
