//! Error types for wavo
//!
//! We use thiserror for convenient error derivation and avoid panics in
//! production code by properly propagating errors. Most protocol-driven
//! failures are not propagated at all: the handler logs and drops the one
//! event, per the no-retry policy of the compositor core.

use std::fmt;

/// Main error type for wavo operations
#[derive(Debug, thiserror::Error)]
pub enum WavoError {
    /// View not found in registry
    #[error("View {0:?} not found")]
    ViewNotFound(crate::shell::ViewId),

    /// Scene node could not be created or resolved
    #[error("Scene error: {0}")]
    Scene(String),

    /// Output setup or mode negotiation failed
    #[error("Output error: {0}")]
    Output(String),

    /// Rendering error
    #[error("Rendering error: {0}")]
    Render(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type alias for wavo operations
pub type WavoResult<T> = Result<T, WavoError>;

/// Helper for operations that should log errors but not propagate them
pub fn log_error<T, E: fmt::Display>(result: Result<T, E>) -> Option<T> {
    match result {
        Ok(val) => Some(val),
        Err(err) => {
            tracing::error!("Operation failed: {err}");
            None
        }
    }
}
