/// Unique identifier of a connected device for the lifetime of the registry.
pub type DeviceId = u32;

/// Number of maple ports a device can feed.
pub const MAPLE_PORTS: u8 = 4;

/// Broad device family, used to pick a default mapping template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// A device exposing the standard gamepad layout.
    Gamepad,
    /// An arcade stick or all-button controller exposing the standard layout.
    ArcadeStick,
    /// A raw joystick with no known layout.
    Joystick,
}

impl DeviceClass {
    /// Whether button and axis codes follow the standard gamepad layout.
    pub fn has_standard_layout(&self) -> bool {
        !matches!(self, DeviceClass::Joystick)
    }
}

/// Maple port assignment of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortAssignment {
    /// The device feeds a single port.
    Fixed(u8),
    /// The device can feed every port; the editor chooses which one to map.
    All,
}

/// Device meta information that remains stable across events.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceInfo {
    pub id: DeviceId,
    pub name: String,
    /// Stable identity used as the persistence key for mappings.
    pub unique_id: Box<str>,
    pub vendor_id: u16,
    pub product_id: u16,
    pub class: DeviceClass,
    pub supports_rumble: bool,
    pub has_analog_stick: bool,
    pub port: PortAssignment,
}

impl DeviceInfo {
    /// Describes a device that is not connected, e.g. when editing stored mappings.
    pub fn offline(id: DeviceId, unique_id: &str, class: DeviceClass) -> Self {
        Self {
            id,
            name: unique_id.to_string(),
            unique_id: unique_id.into(),
            vendor_id: 0,
            product_id: 0,
            class,
            supports_rumble: true,
            has_analog_stick: true,
            port: PortAssignment::All,
        }
    }

    /// Human readable name of a button code, if the layout is known.
    pub fn button_name(&self, code: u32) -> Option<&'static str> {
        if !self.class.has_standard_layout() {
            return None;
        }
        StandardButton::from_code(code).map(|b| b.label())
    }

    /// Human readable name of an axis code, if the layout is known.
    pub fn axis_name(&self, code: u32) -> Option<&'static str> {
        if !self.class.has_standard_layout() {
            return None;
        }
        StandardAxis::from_code(code).map(|a| a.label())
    }
}

/// Buttons of the standard gamepad layout, in code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardButton {
    A,
    B,
    X,
    Y,
    Back,
    Guide,
    Start,
    LeftStick,
    RightStick,
    LeftShoulder,
    RightShoulder,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl StandardButton {
    const ALL: [StandardButton; 15] = [
        StandardButton::A,
        StandardButton::B,
        StandardButton::X,
        StandardButton::Y,
        StandardButton::Back,
        StandardButton::Guide,
        StandardButton::Start,
        StandardButton::LeftStick,
        StandardButton::RightStick,
        StandardButton::LeftShoulder,
        StandardButton::RightShoulder,
        StandardButton::DPadUp,
        StandardButton::DPadDown,
        StandardButton::DPadLeft,
        StandardButton::DPadRight,
    ];

    /// Physical code reported for this button.
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            StandardButton::A => "A",
            StandardButton::B => "B",
            StandardButton::X => "X",
            StandardButton::Y => "Y",
            StandardButton::Back => "Back",
            StandardButton::Guide => "Guide",
            StandardButton::Start => "Start",
            StandardButton::LeftStick => "L3",
            StandardButton::RightStick => "R3",
            StandardButton::LeftShoulder => "L1",
            StandardButton::RightShoulder => "R1",
            StandardButton::DPadUp => "DPad Up",
            StandardButton::DPadDown => "DPad Down",
            StandardButton::DPadLeft => "DPad Left",
            StandardButton::DPadRight => "DPad Right",
        }
    }
}

/// Axes of the standard gamepad layout, in code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

impl StandardAxis {
    const ALL: [StandardAxis; 6] = [
        StandardAxis::LeftX,
        StandardAxis::LeftY,
        StandardAxis::RightX,
        StandardAxis::RightY,
        StandardAxis::LeftTrigger,
        StandardAxis::RightTrigger,
    ];

    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            StandardAxis::LeftX => "Left Stick X",
            StandardAxis::LeftY => "Left Stick Y",
            StandardAxis::RightX => "Right Stick X",
            StandardAxis::RightY => "Right Stick Y",
            StandardAxis::LeftTrigger => "L2",
            StandardAxis::RightTrigger => "R2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_codes_round_trip_through_lookup() {
        assert_eq!(StandardButton::from_code(StandardButton::Start.code()), Some(StandardButton::Start));
        assert_eq!(StandardButton::from_code(15), None);
        assert_eq!(StandardAxis::from_code(5), Some(StandardAxis::RightTrigger));
        assert_eq!(StandardAxis::from_code(6), None);
    }

    #[test]
    fn raw_joysticks_have_no_names() {
        let pad = DeviceInfo::offline(1, "pad", DeviceClass::Gamepad);
        assert_eq!(pad.button_name(0), Some("A"));
        assert_eq!(pad.axis_name(1), Some("Left Stick Y"));

        let stick = DeviceInfo::offline(2, "stick", DeviceClass::Joystick);
        assert_eq!(stick.button_name(0), None);
        assert_eq!(stick.axis_name(1), None);
    }
}
