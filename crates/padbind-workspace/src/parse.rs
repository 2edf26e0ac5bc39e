use padbind_mapping::InputMapping;
use serde::Deserialize;

use crate::settings::Settings;
use crate::v1::{MappingV1, SettingsV1};
use crate::ParseError;

/// Parse a yaml mapping file.
pub fn parse_mapping(input: &str) -> Result<InputMapping, ParseError> {
    let version = parse_version(input)?;
    match version {
        1 => {
            let raw: MappingV1 = serde_yaml::from_str(input)?;
            Ok(raw.to_mapping()?)
        }
        _ => Err(ParseError::UnsupportedVersion(version)),
    }
}

/// Render a mapping as a yaml mapping file.
pub fn write_mapping(mapping: &InputMapping) -> Result<String, ParseError> {
    Ok(serde_yaml::to_string(&MappingV1::from_mapping(mapping))?)
}

/// Parse a yaml settings file.
pub fn parse_settings(input: &str) -> Result<Settings, ParseError> {
    let version = parse_version(input)?;
    match version {
        1 => {
            let raw: SettingsV1 = serde_yaml::from_str(input)?;
            Ok(raw.to_settings()?)
        }
        _ => Err(ParseError::UnsupportedVersion(version)),
    }
}

/// Render settings as a yaml settings file.
pub fn write_settings(settings: &Settings) -> Result<String, ParseError> {
    Ok(serde_yaml::to_string(&SettingsV1::from_settings(settings))?)
}

/// A file with a version.
#[derive(Debug, Clone, Deserialize)]
struct VersionedFile {
    version: u8,
}

/// Parse the version of a yaml file.
fn parse_version(input: &str) -> Result<u8, ParseError> {
    let raw: VersionedFile = serde_yaml::from_str(input)?;
    Ok(raw.version)
}
