//! Error types for apexwrap.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`PyramidError`].
pub type Result<T> = std::result::Result<T, PyramidError>;

/// Errors that can occur while building or texturing the pyramid.
#[derive(Error, Debug)]
pub enum PyramidError {
    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// The mesh shape is incompatible with the four-quadrant net layout.
    #[error("net mapping requires exactly 4 lateral faces, mesh has {lateral_faces}")]
    UnsupportedTopology {
        /// Number of lateral faces found in the mesh.
        lateral_faces: usize,
    },

    /// The image bytes could not be decoded.
    #[error("failed to decode image: {message}")]
    DecodeFailed {
        /// Error message from the decoder.
        message: String,
    },

    /// The decoded image could not be uploaded as a texture.
    #[error("failed to load texture: {message}")]
    TextureLoadFailed {
        /// Error message from the texture upload.
        message: String,
    },

    /// The rendered frame could not be encoded as a still image.
    #[error("failed to encode frame: {message}")]
    EncodeFailed {
        /// Error message from the encoder.
        message: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PyramidError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        PyramidError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
