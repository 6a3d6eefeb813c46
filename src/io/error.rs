//! Error types for image loading, configuration, and color reduction

use std::fmt;
use std::path::PathBuf;

/// Main error type for all conversion operations
#[derive(Debug)]
pub enum GlyphError {
    /// Failed to decode the source image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Block partitioning received an unusable block size
    InvalidDimension {
        /// Name of the offending dimension
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A color spec string is not a parsable `#RRGGBB` value
    InvalidColorFormat {
        /// The rejected input string
        input: String,
        /// Explanation of why parsing failed
        reason: String,
    },

    /// Clustering was asked for more colors than the image provides
    InsufficientSamples {
        /// Requested cluster count
        requested: usize,
        /// Number of distinct block colors available
        available: usize,
    },

    /// Failed to write the rendered art to the output stream
    OutputWrite {
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for GlyphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidDimension {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid dimension '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidColorFormat { input, reason } => {
                write!(f, "Invalid color spec '{input}': {reason}")
            }
            Self::InsufficientSamples {
                requested,
                available,
            } => {
                write!(
                    f,
                    "Requested {requested} color clusters but only {available} distinct block colors exist"
                )
            }
            Self::OutputWrite { source } => {
                write!(f, "Failed to write output: {source}")
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

impl std::error::Error for GlyphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::OutputWrite { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for conversion results
pub type Result<T> = std::result::Result<T, GlyphError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GlyphError {
    GlyphError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid dimension error
pub fn invalid_dimension(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GlyphError {
    GlyphError::InvalidDimension {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
