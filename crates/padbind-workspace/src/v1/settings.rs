use std::time::Duration;

use padbind_mapping::{ControlProfile, MAPLE_PORTS};
use serde::{Deserialize, Serialize};

use super::Error;
use crate::settings::Settings;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SettingsV1 {
    pub version: u8,
    #[serde(default)]
    pub detect_timeout_ms: Option<u64>,
    #[serde(default)]
    pub port: Option<u8>,
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
}

impl SettingsV1 {
    pub fn from_settings(settings: &Settings) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let timeout_ms = settings.detect_timeout.as_millis() as u64;
        Self {
            version: 1,
            detect_timeout_ms: Some(timeout_ms),
            port: Some(settings.port),
            game: settings.game.as_deref().map(str::to_string),
            profile: Some(settings.profile.name().to_string()),
        }
    }

    pub fn to_settings(&self) -> Result<Settings, Error> {
        let defaults = Settings::default();
        let port = self.port.unwrap_or(defaults.port);
        if port >= MAPLE_PORTS {
            return Err(Error::InvalidPort(port));
        }
        let profile = match self.profile.as_deref() {
            Some(raw) => raw.parse::<ControlProfile>()?,
            None => defaults.profile,
        };
        Ok(Settings {
            detect_timeout: self
                .detect_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.detect_timeout),
            port,
            game: self.game.clone().filter(|g| !g.is_empty()).map(Into::into),
            profile,
        })
    }
}
