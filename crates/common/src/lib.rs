//! Actuaria Common Library
//!
//! Shared code for the actuaria workspace including:
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability
//! - Telemetry (tracing) setup

pub mod config;
pub mod errors;
pub mod metrics;
pub mod telemetry;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
