//! Error types for grid access, generation stages and file output

use crate::io::config_loader::ConfigViolation;
use crate::spatial::direction::{Coord, Direction};
use crate::spatial::grid::GridStage;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all maze operations
#[derive(Debug)]
pub enum MazeError {
    /// Cell access outside the grid
    InvalidCoordinate {
        /// Offending coordinate
        coord: Coord,
        /// Grid dimensions (height, width)
        dimensions: (usize, usize),
    },

    /// Attempt to open an outward-facing border wall
    SealedBorder {
        /// Border cell
        coord: Coord,
        /// Direction pointing out of the grid
        direction: Direction,
    },

    /// Attempt to open a wall touching a reserved cell
    ReservedCell {
        /// The reserved cell involved
        coord: Coord,
    },

    /// Reserved region overlaps the entry or exit point
    ///
    /// Recoverable: the reservation has already been discarded when this
    /// is returned.
    ReservationConflict {
        /// Entry or exit cell that fell inside the region
        coord: Coord,
    },

    /// Path reconstruction could not reach the exit
    UnsolvableMaze {
        /// Entry point of the grid
        entry: Coord,
        /// Exit point of the grid
        exit: Coord,
    },

    /// Reserved cells separate the exit from the entry
    ///
    /// Unlike `UnsolvableMaze` this cannot change with fresh randomness.
    ExitIsolated {
        /// Entry point of the grid
        entry: Coord,
        /// Exit point of the grid
        exit: Coord,
    },

    /// Configuration failed validation
    ConfigurationInvalid {
        /// Every violated invariant
        violations: Vec<ConfigViolation>,
    },

    /// Configuration file line could not be parsed
    ConfigParse {
        /// 1-based line number
        line: usize,
        /// Description of the failure
        reason: String,
    },

    /// Stage operation invoked on a grid in the wrong lifecycle stage
    InvalidStage {
        /// Operation that was attempted
        operation: &'static str,
        /// Stage the grid was actually in
        found: GridStage,
    },

    /// Internal algorithm invariant broken (a bug, not a runtime condition)
    InvariantViolation {
        /// Description of the broken invariant
        reason: String,
    },

    /// Failed to save rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
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
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate { coord, dimensions } => {
                write!(
                    f,
                    "Coordinate {coord} is outside the {}x{} grid",
                    dimensions.1, dimensions.0
                )
            }
            Self::SealedBorder { coord, direction } => {
                write!(f, "Cannot open border wall {direction} of cell {coord}")
            }
            Self::ReservedCell { coord } => {
                write!(f, "Cell {coord} is reserved and cannot be opened")
            }
            Self::ReservationConflict { coord } => {
                write!(
                    f,
                    "Reserved region overlaps entry/exit at {coord}, reservation discarded"
                )
            }
            Self::UnsolvableMaze { entry, exit } => {
                write!(f, "No path from entry {entry} to exit {exit}")
            }
            Self::ExitIsolated { entry, exit } => {
                write!(
                    f,
                    "Reserved cells cut exit {exit} off from entry {entry}, no maze can connect them"
                )
            }
            Self::ConfigurationInvalid { violations } => {
                write!(f, "Invalid configuration:")?;
                for violation in violations {
                    write!(f, "\n  - {violation}")?;
                }
                Ok(())
            }
            Self::ConfigParse { line, reason } => {
                write!(f, "Configuration parse error on line {line}: {reason}")
            }
            Self::InvalidStage { operation, found } => {
                write!(f, "Cannot run {operation} on a grid in stage {found:?}")
            }
            Self::InvariantViolation { reason } => {
                write!(f, "Internal invariant violated: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
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
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for maze results
pub type Result<T> = std::result::Result<T, MazeError>;

impl MazeError {
    /// Whether the caller may reasonably retry generation with fresh randomness
    ///
    /// Never true for `ExitIsolated`: the same reservations
    /// isolate the exit on every attempt.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::UnsolvableMaze { .. })
    }
}

/// Create a file system error bound to a path and operation
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> MazeError {
    MazeError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}

/// Create an invariant violation error
pub fn invariant_violation(reason: &impl ToString) -> MazeError {
    MazeError::InvariantViolation {
        reason: reason.to_string(),
    }
}
