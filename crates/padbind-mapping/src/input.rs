use std::fmt;
use std::str::FromStr;

use crate::MappingError;

/// A Dreamcast-side control, independent of any physical device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalInput {
    // Digital directions
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    Dpad2Up,
    Dpad2Down,
    Dpad2Left,
    Dpad2Right,

    // Analog directions
    AxisUp,
    AxisDown,
    AxisLeft,
    AxisRight,
    Axis2Up,
    Axis2Down,
    Axis2Left,
    Axis2Right,
    Axis3Up,
    Axis3Down,
    Axis3Left,
    Axis3Right,

    // Buttons
    A,
    B,
    C,
    D,
    X,
    Y,
    Z,
    Start,
    Reload,
    InsertCard,

    // Analog triggers
    LeftTrigger,
    RightTrigger,
    LeftTrigger2,
    RightTrigger2,

    // Emulator hotkeys
    Menu,
    Escape,
    FastForward,
    LoadState,
    SaveState,
    BypassKeyboard,
    Screenshot,
}

impl LogicalInput {
    pub const ALL: [LogicalInput; 41] = [
        LogicalInput::DpadUp,
        LogicalInput::DpadDown,
        LogicalInput::DpadLeft,
        LogicalInput::DpadRight,
        LogicalInput::Dpad2Up,
        LogicalInput::Dpad2Down,
        LogicalInput::Dpad2Left,
        LogicalInput::Dpad2Right,
        LogicalInput::AxisUp,
        LogicalInput::AxisDown,
        LogicalInput::AxisLeft,
        LogicalInput::AxisRight,
        LogicalInput::Axis2Up,
        LogicalInput::Axis2Down,
        LogicalInput::Axis2Left,
        LogicalInput::Axis2Right,
        LogicalInput::Axis3Up,
        LogicalInput::Axis3Down,
        LogicalInput::Axis3Left,
        LogicalInput::Axis3Right,
        LogicalInput::A,
        LogicalInput::B,
        LogicalInput::C,
        LogicalInput::D,
        LogicalInput::X,
        LogicalInput::Y,
        LogicalInput::Z,
        LogicalInput::Start,
        LogicalInput::Reload,
        LogicalInput::InsertCard,
        LogicalInput::LeftTrigger,
        LogicalInput::RightTrigger,
        LogicalInput::LeftTrigger2,
        LogicalInput::RightTrigger2,
        LogicalInput::Menu,
        LogicalInput::Escape,
        LogicalInput::FastForward,
        LogicalInput::LoadState,
        LogicalInput::SaveState,
        LogicalInput::BypassKeyboard,
        LogicalInput::Screenshot,
    ];

    /// Stable identifier used in mapping files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            LogicalInput::DpadUp => "dpad_up",
            LogicalInput::DpadDown => "dpad_down",
            LogicalInput::DpadLeft => "dpad_left",
            LogicalInput::DpadRight => "dpad_right",
            LogicalInput::Dpad2Up => "dpad2_up",
            LogicalInput::Dpad2Down => "dpad2_down",
            LogicalInput::Dpad2Left => "dpad2_left",
            LogicalInput::Dpad2Right => "dpad2_right",
            LogicalInput::AxisUp => "axis_up",
            LogicalInput::AxisDown => "axis_down",
            LogicalInput::AxisLeft => "axis_left",
            LogicalInput::AxisRight => "axis_right",
            LogicalInput::Axis2Up => "axis2_up",
            LogicalInput::Axis2Down => "axis2_down",
            LogicalInput::Axis2Left => "axis2_left",
            LogicalInput::Axis2Right => "axis2_right",
            LogicalInput::Axis3Up => "axis3_up",
            LogicalInput::Axis3Down => "axis3_down",
            LogicalInput::Axis3Left => "axis3_left",
            LogicalInput::Axis3Right => "axis3_right",
            LogicalInput::A => "a",
            LogicalInput::B => "b",
            LogicalInput::C => "c",
            LogicalInput::D => "d",
            LogicalInput::X => "x",
            LogicalInput::Y => "y",
            LogicalInput::Z => "z",
            LogicalInput::Start => "start",
            LogicalInput::Reload => "reload",
            LogicalInput::InsertCard => "insert_card",
            LogicalInput::LeftTrigger => "lt",
            LogicalInput::RightTrigger => "rt",
            LogicalInput::LeftTrigger2 => "lt2",
            LogicalInput::RightTrigger2 => "rt2",
            LogicalInput::Menu => "menu",
            LogicalInput::Escape => "escape",
            LogicalInput::FastForward => "fast_forward",
            LogicalInput::LoadState => "load_state",
            LogicalInput::SaveState => "save_state",
            LogicalInput::BypassKeyboard => "bypass_keyboard",
            LogicalInput::Screenshot => "screenshot",
        }
    }

    /// The input on the other half of the same direction pair, if any.
    pub fn opposite(self) -> Option<LogicalInput> {
        use LogicalInput as L;
        Some(match self {
            L::DpadUp => L::DpadDown,
            L::DpadDown => L::DpadUp,
            L::DpadLeft => L::DpadRight,
            L::DpadRight => L::DpadLeft,
            L::Dpad2Up => L::Dpad2Down,
            L::Dpad2Down => L::Dpad2Up,
            L::Dpad2Left => L::Dpad2Right,
            L::Dpad2Right => L::Dpad2Left,
            L::AxisUp => L::AxisDown,
            L::AxisDown => L::AxisUp,
            L::AxisLeft => L::AxisRight,
            L::AxisRight => L::AxisLeft,
            L::Axis2Up => L::Axis2Down,
            L::Axis2Down => L::Axis2Up,
            L::Axis2Left => L::Axis2Right,
            L::Axis2Right => L::Axis2Left,
            L::Axis3Up => L::Axis3Down,
            L::Axis3Down => L::Axis3Up,
            L::Axis3Left => L::Axis3Right,
            L::Axis3Right => L::Axis3Left,
            _ => return None,
        })
    }
}

impl fmt::Display for LogicalInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogicalInput {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        LogicalInput::ALL
            .iter()
            .copied()
            .find(|input| input.name() == name)
            .ok_or(MappingError::UnknownInput(name))
    }
}
