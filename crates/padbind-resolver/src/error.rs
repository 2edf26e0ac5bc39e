use padbind_gamepad::DeviceId;
use padbind_workspace::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("a capture is already in progress")]
    CaptureInProgress,
    #[error("device not found: {0}")]
    DeviceNotFound(DeviceId),
    #[error("device {0} has no mapping for the active profile")]
    NoMapping(DeviceId),
    #[error("invalid maple port: {0}")]
    InvalidPort(u8),
    #[error("no game is selected")]
    NoGame,
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("gamepad error: {0}")]
    Gamepad(#[from] padbind_gamepad::Error),
}

pub type Result<T> = std::result::Result<T, ResolverError>;
