//! Error types for the promptamp CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::userscript::TemplateError;
use thiserror::Error;

/// Main error type for promptamp operations.
///
/// Each variant maps to a specific process exit code.
#[derive(Error, Debug)]
pub enum AmpError {
    /// User provided invalid arguments or the library is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// A prompt draft was rejected at the edit boundary.
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Reading or writing the document store failed.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// The requested prompt does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A bundled script fragment could not be rendered.
    #[error("Script template error: {0}")]
    Template(#[from] TemplateError),
}

impl AmpError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            AmpError::UserError(_) => exit_codes::USER_ERROR,
            AmpError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            AmpError::StorageError(_) => exit_codes::STORAGE_FAILURE,
            AmpError::NotFound(_) => exit_codes::NOT_FOUND,
            AmpError::Template(_) => exit_codes::TEMPLATE_FAILURE,
        }
    }
}

/// Result type alias for promptamp operations.
pub type Result<T> = std::result::Result<T, AmpError>;
