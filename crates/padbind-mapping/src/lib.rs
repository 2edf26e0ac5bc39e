mod input;
mod layout;
mod mapping;
mod profile;
mod template;

use thiserror::Error;

pub use input::LogicalInput;
pub use layout::{label, layout, LayoutEntry};
pub use mapping::{
    InputMapping, PhysicalBinding, DEFAULT_DEAD_ZONE, DEFAULT_RUMBLE_POWER,
    DEFAULT_SATURATION, SATURATION_MAX, SATURATION_MIN,
};
pub use padbind_gamepad::MAPLE_PORTS;
pub use profile::ControlProfile;
pub use template::{default_mapping, TemplateKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("unknown input: {0}")]
    UnknownInput(String),
    #[error("unknown profile: {0}")]
    UnknownProfile(String),
}
