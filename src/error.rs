//! Error types for design recommendation.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while recommending or rendering map designs.
///
/// Every variant is a caller input error or a collaborator failure; nothing
/// here is transient or worth retrying.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (configuration files, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A requested variable is not a column of the dataset.
    #[error("invalid variable '{0}': not a column of the dataset")]
    InvalidVariable(String),

    /// The dataset has no spatial geometry column.
    #[error("dataset is missing a geometry column")]
    MissingGeometry,

    /// Something that is not an encoding was used to extend a design.
    #[error("invalid encoding operand: {0}")]
    InvalidEncodingOperand(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Invalid figure dimensions for the overplot grid.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: f32,
        /// Height value.
        height: f32,
    },

    /// Marker size must be strictly positive.
    #[error("Invalid marker size: {0}")]
    InvalidMarkerSize(f32),

    /// Rendering collaborator failure.
    #[error("Rendering error: {0}")]
    Rendering(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0.0,
            height: 10.0,
        };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_invalid_variable_names_column() {
        let err = Error::InvalidVariable("depth".to_string());
        assert!(err.to_string().contains("'depth'"));
    }

    #[test]
    fn test_config_parse_includes_line() {
        let err = Error::ConfigParse {
            line: 7,
            message: "bad value".to_string(),
        };
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn test_io_from() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
