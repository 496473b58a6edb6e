//! Auto-scroll configuration errors

use thiserror::Error;

/// Rejected auto-scroll configuration values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Gutter size is negative, NaN or infinite
    #[error("gutter size must be a finite, non-negative distance (got {0})")]
    InvalidSize(f32),

    /// Intensity is NaN or infinite
    #[error("intensity must be finite (got {0})")]
    InvalidIntensity(f32),
}

/// Result type for configuration checks
pub type Result<T> = std::result::Result<T, ConfigError>;
