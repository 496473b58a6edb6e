//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Failed to create or run an event loop
    #[error("Event loop error: {0}")]
    EventLoop(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
