use crate::input::LogicalInput;
use crate::profile::ControlProfile;

/// A row of the mapping editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutEntry {
    /// A group header. Display only, never bindable.
    Category(&'static str),
    /// A bindable control with its label in this profile.
    Control {
        input: LogicalInput,
        label: &'static str,
    },
}

impl LayoutEntry {
    pub fn input(&self) -> Option<LogicalInput> {
        match self {
            LayoutEntry::Category(_) => None,
            LayoutEntry::Control { input, .. } => Some(*input),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LayoutEntry::Category(label) | LayoutEntry::Control { label, .. } => *label,
        }
    }
}

const fn control(input: LogicalInput, label: &'static str) -> LayoutEntry {
    LayoutEntry::Control { input, label }
}

use LayoutEntry::Category;
use LogicalInput as L;

const CONSOLE_LAYOUT: &[LayoutEntry] = &[
    Category("Directions"),
    control(L::DpadUp, "Up"),
    control(L::DpadDown, "Down"),
    control(L::DpadLeft, "Left"),
    control(L::DpadRight, "Right"),
    control(L::AxisUp, "Thumbstick Up"),
    control(L::AxisDown, "Thumbstick Down"),
    control(L::AxisLeft, "Thumbstick Left"),
    control(L::AxisRight, "Thumbstick Right"),
    control(L::Axis2Up, "R.Thumbstick Up"),
    control(L::Axis2Down, "R.Thumbstick Down"),
    control(L::Axis2Left, "R.Thumbstick Left"),
    control(L::Axis2Right, "R.Thumbstick Right"),
    control(L::Axis3Up, "Axis 3 Up"),
    control(L::Axis3Down, "Axis 3 Down"),
    control(L::Axis3Left, "Axis 3 Left"),
    control(L::Axis3Right, "Axis 3 Right"),
    control(L::Dpad2Up, "DPad2 Up"),
    control(L::Dpad2Down, "DPad2 Down"),
    control(L::Dpad2Left, "DPad2 Left"),
    control(L::Dpad2Right, "DPad2 Right"),
    Category("Buttons"),
    control(L::A, "A"),
    control(L::B, "B"),
    control(L::X, "X"),
    control(L::Y, "Y"),
    control(L::C, "C"),
    control(L::D, "D"),
    control(L::Z, "Z"),
    Category("Triggers"),
    control(L::LeftTrigger, "Left Trigger"),
    control(L::RightTrigger, "Right Trigger"),
    control(L::LeftTrigger2, "Left Trigger 2"),
    control(L::RightTrigger2, "Right Trigger 2"),
    Category("System Buttons"),
    control(L::Start, "Start"),
    control(L::Reload, "Reload"),
    Category("Emulator"),
    control(L::Menu, "Menu"),
    control(L::Escape, "Exit"),
    control(L::FastForward, "Fast-forward"),
    control(L::LoadState, "Load State"),
    control(L::SaveState, "Save State"),
    control(L::BypassKeyboard, "Bypass Emulated Keyboard"),
    control(L::Screenshot, "Save Screenshot"),
];

const ARCADE_LAYOUT: &[LayoutEntry] = &[
    Category("Directions"),
    control(L::DpadUp, "Up"),
    control(L::DpadDown, "Down"),
    control(L::DpadLeft, "Left"),
    control(L::DpadRight, "Right"),
    control(L::AxisUp, "Thumbstick Up"),
    control(L::AxisDown, "Thumbstick Down"),
    control(L::AxisLeft, "Thumbstick Left"),
    control(L::AxisRight, "Thumbstick Right"),
    control(L::Axis2Up, "R.Thumbstick Up"),
    control(L::Axis2Down, "R.Thumbstick Down"),
    control(L::Axis2Left, "R.Thumbstick Left"),
    control(L::Axis2Right, "R.Thumbstick Right"),
    Category("Buttons"),
    control(L::A, "Button 1"),
    control(L::B, "Button 2"),
    control(L::C, "Button 3"),
    control(L::X, "Button 4"),
    control(L::Y, "Button 5"),
    control(L::Z, "Button 6"),
    control(L::Dpad2Left, "Button 7"),
    control(L::Dpad2Right, "Button 8"),
    Category("Triggers"),
    control(L::LeftTrigger, "Left Trigger"),
    control(L::RightTrigger, "Right Trigger"),
    control(L::LeftTrigger2, "Left Trigger 2"),
    control(L::RightTrigger2, "Right Trigger 2"),
    Category("System Buttons"),
    control(L::Start, "Start"),
    control(L::Reload, "Reload"),
    control(L::D, "Coin"),
    control(L::Dpad2Up, "Service"),
    control(L::Dpad2Down, "Test"),
    control(L::InsertCard, "Insert Card"),
    Category("Emulator"),
    control(L::Menu, "Menu"),
    control(L::Escape, "Exit"),
    control(L::FastForward, "Fast-forward"),
    control(L::LoadState, "Load State"),
    control(L::SaveState, "Save State"),
    control(L::BypassKeyboard, "Bypass Emulated Keyboard"),
    control(L::Screenshot, "Save Screenshot"),
];

/// Editor rows for a profile, in display order.
pub fn layout(profile: ControlProfile) -> &'static [LayoutEntry] {
    match profile {
        ControlProfile::Console => CONSOLE_LAYOUT,
        ControlProfile::Arcade => ARCADE_LAYOUT,
    }
}

/// Label of an input in a profile, if the profile shows it.
pub fn label(profile: ControlProfile, input: LogicalInput) -> Option<&'static str> {
    layout(profile)
        .iter()
        .find(|entry| entry.input() == Some(input))
        .map(LayoutEntry::label)
}
