//! Error types for casement
//!
//! This module defines the error types used throughout the window engine.
//! We use thiserror for convenient error derivation and avoid panics
//! in production code by properly propagating errors.

use crate::window::WindowId;

/// Main error type for casement operations
#[derive(Debug, thiserror::Error)]
pub enum CasementError {
    /// Registration was attempted without an owner
    #[error("Window owner is missing or empty")]
    MissingOwner,

    /// Window not found in registry
    #[error("{0} not found")]
    WindowNotFound(WindowId),

    /// Malformed argument or a transition the window state machine rejects
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Internal bookkeeping went wrong (duplicate z-index, exhausted pool, ...)
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CasementError {
    /// Whether the error belongs to the caller-facing invalid-argument class
    /// (missing owner, unknown window, rejected transition).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            CasementError::MissingOwner
                | CasementError::WindowNotFound(_)
                | CasementError::InvalidArgument(_)
        )
    }
}

/// Result type alias for casement operations
pub type CasementResult<T> = Result<T, CasementError>;

/// Extension trait for Option to convert to Result with error context
pub trait OptionExt<T> {
    /// Convert None to an error with context
    fn ok_or_log<F>(self, error_fn: F) -> CasementResult<T>
    where
        F: FnOnce() -> CasementError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_log<F>(self, error_fn: F) -> CasementResult<T>
    where
        F: FnOnce() -> CasementError,
    {
        match self {
            Some(val) => Ok(val),
            None => {
                let err = error_fn();
                tracing::error!("{err}");
                Err(err)
            }
        }
    }
}
