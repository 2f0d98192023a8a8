//! Error types for the actuaria workspace
//!
//! Provides:
//! - Distinct error types for different failure modes
//! - Error codes for client handling
//! - Structured, sanitized error responses

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    InvalidFormat,

    // Collaborator errors (8xxx)
    EngineUnavailable,
    EngineTimeout,
    GraphUnavailable,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidFormat => 1002,

            // Collaborators (8xxx)
            ErrorCode::EngineUnavailable => 8001,
            ErrorCode::EngineTimeout => 8002,
            ErrorCode::GraphUnavailable => 8003,

            // Internal (9xxx)
            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    // Collaborator errors
    #[error("{engine} unavailable: {message}")]
    EngineUnavailable { engine: String, message: String },

    #[error("{engine} timed out after {timeout_ms}ms")]
    EngineTimeout { engine: String, timeout_ms: u64 },

    #[error("Knowledge graph unavailable: {message}")]
    GraphUnavailable { message: String },

    // Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            AppError::EngineUnavailable { .. } => ErrorCode::EngineUnavailable,
            AppError::EngineTimeout { .. } => ErrorCode::EngineTimeout,
            AppError::GraphUnavailable { .. } => ErrorCode::GraphUnavailable,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Check if this error originated in a collaborator engine
    pub fn is_engine_failure(&self) -> bool {
        matches!(
            self,
            AppError::EngineUnavailable { .. }
                | AppError::EngineTimeout { .. }
                | AppError::GraphUnavailable { .. }
        )
    }

    /// Build a structured response for this error.
    ///
    /// Engine-originated failures are reduced to a generic notice so that
    /// internal collaborator diagnostics never reach end users; everything
    /// needed for debugging is logged here instead.
    pub fn to_response(&self, request_id: Option<String>) -> ErrorResponse {
        let code = self.code();
        let message = if self.is_engine_failure() {
            tracing::error!(error = %self, code = ?code, "Collaborator failure");
            "The answer engine is temporarily unavailable.".to_string()
        } else {
            tracing::warn!(error = %self, code = ?code, "Request failed");
            self.to_string()
        };

        ErrorResponse {
            error: ErrorDetails {
                code,
                message,
                details: None,
                request_id,
            },
        }
    }
}

/// Structured error response for callers
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration {
            message: err.to_string(),
        }
    }
}
