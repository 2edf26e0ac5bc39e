use std::time::Duration;

use padbind_mapping::ControlProfile;

/// How long a detection session waits for a physical input by default.
pub const DEFAULT_DETECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Scalar settings of the mapping editor.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Time a detection session waits for a physical input.
    pub detect_timeout: Duration,
    /// Maple port edited on devices that feed every port.
    pub port: u8,
    /// Current game id. Enables per-game mappings.
    pub game: Option<Box<str>>,
    /// Profile selected when the editor opens.
    pub profile: ControlProfile,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            detect_timeout: DEFAULT_DETECT_TIMEOUT,
            port: 0,
            game: None,
            profile: ControlProfile::Console,
        }
    }
}
