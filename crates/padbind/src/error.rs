use padbind_resolver::ResolverError;
use padbind_workspace::WorkspaceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
    #[error("{0}")]
    Resolver(#[from] ResolverError),
    #[error("failed to set Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("invalid axis `{0}`, expected `<code>+` or `<code>-`")]
    InvalidAxis(String),
    #[error("invalid port {0}, expected 0-3")]
    InvalidPort(u8),
    #[error("device {0} has no mapping for the {1} profile")]
    NoMapping(String, padbind_mapping::ControlProfile),
}
