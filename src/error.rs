//! Error types for admission checks.
//!
//! The only failure source inside the checks is the job list query; it is
//! surfaced verbatim to the caller, which owns retry and backoff policy.

use thiserror::Error;

/// Error type for operator operations
#[derive(Error, Debug)]
pub enum Error {
    /// Kubernetes API error
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    /// Invalid operator configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this error indicates a not-found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Kube(kube::Error::Api(e)) if e.code == 404)
    }
}

/// Result type alias for operator operations
pub type Result<T> = std::result::Result<T, Error>;
