//! Error types for pattern synthesis, correlation analysis and their I/O glue

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all dot-space operations
#[derive(Debug)]
pub enum DotSpaceError {
    /// A configuration value failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Explicit defect index lies outside the grid
    DefectOutOfBounds {
        /// The offending flattened index
        index: usize,
        /// Total number of cells in the grid
        cells: usize,
    },

    /// More random defects requested than there are free cells
    InsufficientCells {
        /// Number of random defects requested
        requested: usize,
        /// Number of non-defect cells available for sampling
        available: usize,
    },

    /// Basis is empty or contains values other than dot and space
    InvalidBasis {
        /// Description of what's wrong with the basis
        reason: String,
    },

    /// Layers handed to the compositor do not share one square shape
    ShapeMismatch {
        /// Shape of the first layer (rows, cols)
        expected: (usize, usize),
        /// Offending shape (rows, cols)
        found: (usize, usize),
    },

    /// Input deck line could not be interpreted
    DeckParse {
        /// 1-based line number in the deck
        line: usize,
        /// Description of the failure
        reason: String,
    },

    /// Failed to save a rendered image to disk
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

impl fmt::Display for DotSpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::DefectOutOfBounds { index, cells } => {
                write!(
                    f,
                    "Defect index {index} is beyond the pattern ({cells} cells, last index {})",
                    cells.saturating_sub(1)
                )
            }
            Self::InsufficientCells {
                requested,
                available,
            } => {
                write!(
                    f,
                    "Cannot place {requested} random defects: only {available} free cells"
                )
            }
            Self::InvalidBasis { reason } => write!(f, "Invalid basis: {reason}"),
            Self::ShapeMismatch { expected, found } => {
                write!(
                    f,
                    "Layer shape {}x{} does not match {}x{}",
                    found.0, found.1, expected.0, expected.1
                )
            }
            Self::DeckParse { line, reason } => {
                write!(f, "Input deck line {line}: {reason}")
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

impl std::error::Error for DotSpaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for dot-space results
pub type Result<T> = std::result::Result<T, DotSpaceError>;

impl From<std::io::Error> for DotSpaceError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Attaches the path and operation to raw I/O failures
pub trait WithPath<T> {
    /// Convert an I/O error into [`DotSpaceError::FileSystem`] naming `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation attached
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| DotSpaceError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> DotSpaceError {
    DotSpaceError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid basis error
pub fn invalid_basis(reason: &impl ToString) -> DotSpaceError {
    DotSpaceError::InvalidBasis {
        reason: reason.to_string(),
    }
}
