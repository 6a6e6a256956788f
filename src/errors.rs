//! Error types for the generator.
//!
//! Unrecognized tokens are not errors: they become diagnostic macros in the
//! generated document. Only configuration and token-source failures surface
//! here.

use thiserror::Error;

/// Errors that can occur while setting up or feeding a generation run.
#[derive(Debug, Error)]
pub enum GenError {
    /// Error reading or parsing a configuration file.
    #[error("failed to load config: {path}: {message}")]
    Config { path: String, message: String },

    /// The token source could not deliver the next token.
    #[error("failed to read tokens from {name}: {message}")]
    Source { name: String, message: String },
}

/// Result type for generator operations.
pub type GenResult<T> = Result<T, GenError>;
