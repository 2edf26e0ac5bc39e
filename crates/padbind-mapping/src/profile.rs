use std::fmt;
use std::str::FromStr;

use crate::MappingError;

/// One of the two binding sets kept per device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlProfile {
    /// Dreamcast controller layout.
    #[default]
    Console,
    /// Arcade (NAOMI) cabinet layout.
    Arcade,
}

impl ControlProfile {
    pub fn name(self) -> &'static str {
        match self {
            ControlProfile::Console => "console",
            ControlProfile::Arcade => "arcade",
        }
    }

    /// The profile that is not `self`.
    pub fn other(self) -> ControlProfile {
        match self {
            ControlProfile::Console => ControlProfile::Arcade,
            ControlProfile::Arcade => ControlProfile::Console,
        }
    }
}

impl fmt::Display for ControlProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ControlProfile {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "console" | "dreamcast" | "dc" => ControlProfile::Console,
            "arcade" | "naomi" => ControlProfile::Arcade,
            other => return Err(MappingError::UnknownProfile(other.to_string())),
        })
    }
}
