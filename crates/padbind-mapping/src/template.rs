use padbind_gamepad::{DeviceClass, StandardAxis as Ax, StandardButton as Btn};

use crate::input::LogicalInput as L;
use crate::mapping::{InputMapping, PhysicalBinding};
use crate::profile::ControlProfile;

/// Physical layout a default mapping is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Twin-stick gamepad: face buttons, shoulders, analog triggers.
    Gamepad,
    /// Arcade stick or all-button controller: two rows of action buttons.
    ArcadeStick,
}

impl TemplateKind {
    /// Template matching a device family, if its layout is known.
    pub fn for_class(class: DeviceClass) -> Option<TemplateKind> {
        match class {
            DeviceClass::Gamepad => Some(TemplateKind::Gamepad),
            DeviceClass::ArcadeStick => Some(TemplateKind::ArcadeStick),
            DeviceClass::Joystick => None,
        }
    }
}

const fn btn(button: Btn) -> PhysicalBinding {
    PhysicalBinding::Button(button.code())
}

const fn axis(axis: Ax, positive: bool) -> PhysicalBinding {
    PhysicalBinding::Axis { code: axis.code(), positive }
}

type Template = &'static [(L, PhysicalBinding)];

const STICKS: Template = &[
    (L::DpadUp, btn(Btn::DPadUp)),
    (L::DpadDown, btn(Btn::DPadDown)),
    (L::DpadLeft, btn(Btn::DPadLeft)),
    (L::DpadRight, btn(Btn::DPadRight)),
    (L::AxisUp, axis(Ax::LeftY, false)),
    (L::AxisDown, axis(Ax::LeftY, true)),
    (L::AxisLeft, axis(Ax::LeftX, false)),
    (L::AxisRight, axis(Ax::LeftX, true)),
    (L::Axis2Up, axis(Ax::RightY, false)),
    (L::Axis2Down, axis(Ax::RightY, true)),
    (L::Axis2Left, axis(Ax::RightX, false)),
    (L::Axis2Right, axis(Ax::RightX, true)),
];

const CONSOLE_GAMEPAD: Template = &[
    (L::A, btn(Btn::A)),
    (L::B, btn(Btn::B)),
    (L::X, btn(Btn::X)),
    (L::Y, btn(Btn::Y)),
    (L::C, btn(Btn::LeftShoulder)),
    (L::Z, btn(Btn::RightShoulder)),
    (L::Start, btn(Btn::Start)),
    (L::Menu, btn(Btn::Back)),
    (L::LeftTrigger, axis(Ax::LeftTrigger, true)),
    (L::RightTrigger, axis(Ax::RightTrigger, true)),
];

const CONSOLE_ARCADE_STICK: Template = &[
    (L::A, btn(Btn::A)),
    (L::B, btn(Btn::B)),
    (L::X, btn(Btn::X)),
    (L::Y, btn(Btn::Y)),
    (L::LeftTrigger, btn(Btn::LeftShoulder)),
    (L::RightTrigger, btn(Btn::RightShoulder)),
    (L::Start, btn(Btn::Start)),
    (L::Menu, btn(Btn::Back)),
];

const ARCADE_GAMEPAD: Template = &[
    (L::A, btn(Btn::A)),
    (L::B, btn(Btn::B)),
    (L::C, btn(Btn::X)),
    (L::X, btn(Btn::Y)),
    (L::Y, btn(Btn::LeftShoulder)),
    (L::Z, btn(Btn::RightShoulder)),
    (L::Dpad2Left, axis(Ax::LeftTrigger, true)),
    (L::Dpad2Right, axis(Ax::RightTrigger, true)),
    (L::Start, btn(Btn::Start)),
    (L::D, btn(Btn::Back)),
    (L::Dpad2Up, btn(Btn::LeftStick)),
    (L::Dpad2Down, btn(Btn::RightStick)),
    (L::Menu, btn(Btn::Guide)),
];

const ARCADE_ARCADE_STICK: Template = &[
    (L::A, btn(Btn::X)),
    (L::B, btn(Btn::Y)),
    (L::C, btn(Btn::RightShoulder)),
    (L::X, btn(Btn::A)),
    (L::Y, btn(Btn::B)),
    (L::Z, axis(Ax::RightTrigger, true)),
    (L::Dpad2Left, btn(Btn::LeftShoulder)),
    (L::Dpad2Right, axis(Ax::LeftTrigger, true)),
    (L::Start, btn(Btn::Start)),
    (L::D, btn(Btn::Back)),
    (L::Dpad2Up, btn(Btn::LeftStick)),
    (L::Dpad2Down, btn(Btn::RightStick)),
    (L::Menu, btn(Btn::Guide)),
];

/// Builds the recommended mapping of a profile for a layout.
/// Only port 0 is populated. The result is not marked dirty.
pub fn default_mapping(
    name: impl Into<String>,
    profile: ControlProfile,
    kind: TemplateKind,
) -> InputMapping {
    let buttons = match (profile, kind) {
        (ControlProfile::Console, TemplateKind::Gamepad) => CONSOLE_GAMEPAD,
        (ControlProfile::Console, TemplateKind::ArcadeStick) => CONSOLE_ARCADE_STICK,
        (ControlProfile::Arcade, TemplateKind::Gamepad) => ARCADE_GAMEPAD,
        (ControlProfile::Arcade, TemplateKind::ArcadeStick) => ARCADE_ARCADE_STICK,
    };

    let mut mapping = InputMapping::new(name);
    for (input, binding) in STICKS.iter().chain(buttons) {
        match *binding {
            PhysicalBinding::Button(code) => mapping.set_button(0, *input, code),
            PhysicalBinding::Axis { code, positive } => {
                mapping.set_axis(0, *input, code, positive);
            }
        }
    }
    mapping.clear_dirty();
    mapping
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::layout::{label, layout};

    const ALL_KINDS: [(ControlProfile, TemplateKind); 4] = [
        (ControlProfile::Console, TemplateKind::Gamepad),
        (ControlProfile::Console, TemplateKind::ArcadeStick),
        (ControlProfile::Arcade, TemplateKind::Gamepad),
        (ControlProfile::Arcade, TemplateKind::ArcadeStick),
    ];

    #[test]
    fn templates_never_reuse_a_physical_signal() {
        for (profile, kind) in ALL_KINDS {
            let mapping = default_mapping("pad", profile, kind);
            let bindings = mapping.bindings(0);
            let unique: HashSet<_> = bindings.iter().map(|(_, b)| *b).collect();
            assert_eq!(unique.len(), bindings.len(), "{profile} {kind:?}");
        }
    }

    #[test]
    fn templates_only_bind_inputs_shown_by_the_profile() {
        for (profile, kind) in ALL_KINDS {
            let mapping = default_mapping("pad", profile, kind);
            for (input, _) in mapping.bindings(0) {
                assert!(label(profile, input).is_some(), "{input} hidden in {profile}");
            }
            assert!(!layout(profile).is_empty());
        }
    }

    #[test]
    fn arcade_gamepad_coin_is_back() {
        let mapping = default_mapping("pad", ControlProfile::Arcade, TemplateKind::Gamepad);
        assert_eq!(mapping.button_code(0, L::D), Some(Btn::Back.code()));
        assert_eq!(mapping.button_code(1, L::D), None);
    }

    #[test]
    fn raw_joysticks_have_no_template() {
        assert_eq!(TemplateKind::for_class(DeviceClass::Joystick), None);
        assert_eq!(TemplateKind::for_class(DeviceClass::ArcadeStick), Some(TemplateKind::ArcadeStick));
    }
}
