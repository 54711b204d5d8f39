//! Core error types.

/// Errors produced by core domain logic.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A generation request failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),
}
