mod mapping;
mod settings;

use thiserror::Error;

pub(crate) use mapping::MappingV1;
pub(crate) use settings::SettingsV1;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Mapping(#[from] padbind_mapping::MappingError),
    #[error("invalid axis binding: {0}")]
    InvalidAxis(String),
    #[error("too many ports: {0}")]
    TooManyPorts(usize),
    #[error("invalid port: {0}")]
    InvalidPort(u8),
}
