//! # Litho Errors
//!
//! Error types for layer meshing, stack assembly and persistence.
//!
//! ## Error Policy
//!
//! - Preconditions are checked before any geometry is generated
//! - A failing layer aborts the whole stack, no partial collections
//! - Zero-area triangles are not errors (see [`crate::mesh::face_normal`])

use thiserror::Error;

/// Errors that can occur while building or persisting a layer stack.
#[derive(Debug, Error)]
pub enum LithoError {
    /// Input data has the wrong shape or channel count.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A physical parameter is out of range (non-positive cell size,
    /// negative or non-finite heights, negative quantization step).
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    /// Filament library lookup or parsing failed.
    #[error("Filament error: {message}")]
    Filament { message: String },

    /// Writing a mesh file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LithoError {
    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a filament error.
    pub fn filament(message: impl Into<String>) -> Self {
        Self::Filament {
            message: message.into(),
        }
    }
}

/// Result type alias for lithophane operations.
pub type LithoResult<T> = Result<T, LithoError>;
