mod parse;
mod settings;
mod store;
mod v1;
mod workspace;
mod yaml_store;

use thiserror::Error;

pub use parse::{parse_mapping, parse_settings, write_mapping, write_settings};
pub use settings::{Settings, DEFAULT_DETECT_TIMEOUT};
pub use store::{MappingKey, MappingStore, MemoryStore};
pub use workspace::Workspace;
pub use yaml_store::YamlStore;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("yaml deserialize error: {0}")]
    YamlDeserializeError(#[from] serde_yaml::Error),
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),
    #[error("v1 file error: {0}")]
    V1(#[from] v1::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("mapping file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },
    #[error("serialize error: {0}")]
    Serialize(#[from] ParseError),
}

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("environment variable not set: {0}")]
    EnvVarNotSet(String),
    #[error("path is not a directory: {0}")]
    PathIsNotDirectory(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings error: {0}")]
    Parse(#[from] ParseError),
}
