//! Error types for the outer layers of the rules engine
//!
//! Parsing, serializing and rendering are total and never produce these.
//! They come from configuration loading and plan lookups.

use thiserror::Error;

/// Main error type for configuration and preview operations
#[derive(Error, Debug)]
pub enum RuleEngineError {
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Plan not found: {0}")]
    PlanNotFound(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias for the rules engine
pub type Result<T> = std::result::Result<T, RuleEngineError>;
