//! Error types for the Home Assistant / Matter bridge
//!
//! This module provides structured error handling for the bridge core with
//! helper constructors and coarse classification for callers that need to
//! decide between retrying and surfacing a fault.

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Error types for bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Action dispatch errors
    #[error("Action dispatch failed: {0}")]
    Dispatch(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl BridgeError {
    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an action dispatch error
    pub fn dispatch<S: Into<String>>(msg: S) -> Self {
        Self::Dispatch(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Check if the error is retryable by the external integration
    pub fn is_retryable(&self) -> bool {
        matches!(self, BridgeError::Dispatch(_))
    }
}
