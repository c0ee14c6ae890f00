//! Error types for SLAC

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// SLAC error types
///
/// Only initialization-class failures are errors. Sensors that fail to come
/// up are reported as capability flags instead, and control operations on an
/// idle orchestrator are no-ops.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No drawing surface registered under the requested identifier
    #[error("Drawing surface not found: {0}")]
    SurfaceNotFound(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration parsed but holds unusable values
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
