//! Error types for catalog construction, propagation and file handling

use crate::spatial::Position;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// A cell lost its last candidate during propagation
    ///
    /// The constraint system is unsatisfiable under the current library,
    /// border constraints and manual overrides. The solve cannot continue.
    Contradiction {
        /// Coordinate of the first cell whose candidate set became empty
        position: Position,
    },

    /// Placement footprint does not fit inside the grid
    InvalidPlacement {
        /// Name of the module being placed
        module: String,
        /// Requested origin coordinate
        position: Position,
        /// Why the placement was rejected
        reason: String,
    },

    /// Cross-section input rejected by the connector catalog
    InvalidCrossSection {
        /// Description of what's wrong with the cross-section
        reason: String,
    },

    /// Connector string does not follow the canonical id grammar
    InvalidConnector {
        /// The offending text
        value: String,
        /// Explanation of the parse failure
        reason: &'static str,
    },

    /// Module definition failed validation
    InvalidModule {
        /// Name of the module
        name: String,
        /// Explanation of the validation failure
        reason: String,
    },

    /// Module name referenced but missing from the library
    UnknownModule {
        /// The unknown name
        name: String,
    },

    /// Extraction requested while a cell still holds several candidates
    Unresolved {
        /// Coordinate of the undecided cell
        position: Position,
        /// Number of candidates still present
        remaining: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
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

    /// Module file or output could not be (de)serialized
    Json {
        /// Path of the document
        path: PathBuf,
        /// Underlying serde error
        source: serde_json::Error,
    },

    /// Failed to save the layer preview to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contradiction { position } => {
                write!(f, "Contradiction: cell {position} has no remaining candidates")
            }
            Self::InvalidPlacement {
                module,
                position,
                reason,
            } => {
                write!(f, "Cannot place module '{module}' at {position}: {reason}")
            }
            Self::InvalidCrossSection { reason } => {
                write!(f, "Invalid cross-section: {reason}")
            }
            Self::InvalidConnector { value, reason } => {
                write!(f, "Invalid connector '{value}': {reason}")
            }
            Self::InvalidModule { name, reason } => {
                write!(f, "Invalid module '{name}': {reason}")
            }
            Self::UnknownModule { name } => {
                write!(f, "Unknown module '{name}'")
            }
            Self::Unresolved {
                position,
                remaining,
            } => {
                write!(
                    f,
                    "Cell {position} is unresolved ({remaining} candidates remaining)"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
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
            Self::Json { path, source } => {
                write!(f, "Malformed JSON in '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl AlgorithmError {
    /// Whether this error signals an unsatisfiable constraint system
    ///
    /// Callers use this to decide whether retrying with another seed can help.
    pub const fn is_contradiction(&self) -> bool {
        matches!(self, Self::Contradiction { .. })
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<std::io::Error> for AlgorithmError {
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
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a module validation error
pub fn invalid_module(name: &str, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidModule {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a cross-section validation error
pub fn invalid_cross_section(reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidCrossSection {
        reason: reason.to_string(),
    }
}
