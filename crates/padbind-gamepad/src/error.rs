use thiserror::Error;

use crate::types::DeviceId;

/// Error type for device registry operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to initialize the backend (SDL2 or subsystems).
    #[error("Backend init failed: {0}")]
    BackendInit(String),
    /// Requested device was not found.
    #[error("Device not found: {0}")]
    NotFound(DeviceId),
    /// No input backend was compiled in.
    #[error("No input backend available")]
    NoBackend,
    /// A generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Convenient result alias for registry operations.
pub type Result<T> = std::result::Result<T, Error>;
