//! Error types for puzzle generation, placement and export

use std::fmt;
use std::path::PathBuf;

use crate::puzzle::piece::PieceId;

/// Main error type for all puzzle operations
#[derive(Debug)]
pub enum PuzzleError {
    /// Configuration value rejected before generation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Home rectangles do not tile the grid exactly
    ///
    /// Raised for overlapping rectangles, uncovered cells, or rectangles
    /// reaching past the grid edge.
    InvalidTiling {
        /// Description of the first defect found
        reason: String,
    },

    /// Piece identifier does not belong to the current puzzle instance
    UnknownPiece {
        /// The identifier that was not found
        id: PieceId,
    },

    /// Drag requested on a piece that is already locked home
    PieceLocked {
        /// The locked piece
        id: PieceId,
    },

    /// Drag requested while another drag is still active
    DragInProgress {
        /// Piece currently being dragged
        active: PieceId,
        /// Piece the rejected drag targeted
        requested: PieceId,
    },

    /// Media source kind cannot be composed into a still image
    UnsupportedMedia {
        /// Media kind name
        kind: &'static str,
    },

    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save rendered layout to disk
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

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTiling { reason } => write!(f, "Invalid tiling: {reason}"),
            Self::UnknownPiece { id } => write!(f, "Piece {id} is not part of this puzzle"),
            Self::PieceLocked { id } => write!(f, "Piece {id} is locked and cannot be dragged"),
            Self::DragInProgress { active, requested } => {
                write!(
                    f,
                    "Cannot drag piece {requested} while piece {active} is being dragged"
                )
            }
            Self::UnsupportedMedia { kind } => {
                write!(f, "Media kind '{kind}' cannot be rendered to a still image")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
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

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for puzzle results
pub type Result<T> = std::result::Result<T, PuzzleError>;

impl From<image::ImageError> for PuzzleError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for PuzzleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid tiling error
pub fn invalid_tiling(reason: &impl ToString) -> PuzzleError {
    PuzzleError::InvalidTiling {
        reason: reason.to_string(),
    }
}
