//! Error types for portfolio operations

use thiserror::Error;

/// Errors that can occur during portfolio operations
///
/// Sparse or partial records are never errors; they degrade to empty or zero
/// results. Only a failing signal accessor or invalid configuration is fatal.
#[derive(Error, Debug)]
pub enum PortfolioError {
    /// The signal accessor failed or returned malformed data
    #[error("Upstream unavailable during {operation}: {message}")]
    UpstreamUnavailable {
        /// Operation that was running
        operation: &'static str,
        /// Accessor error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PortfolioError {
    /// Whether the error came from the signal accessor
    pub fn is_upstream(&self) -> bool {
        matches!(self, PortfolioError::UpstreamUnavailable { .. })
    }
}
