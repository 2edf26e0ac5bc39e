use std::fmt;

use ahash::AHashMap;
use padbind_gamepad::MAPLE_PORTS;

use crate::input::LogicalInput;

pub const DEFAULT_RUMBLE_POWER: u8 = 100;
pub const DEFAULT_DEAD_ZONE: f32 = 0.1;
pub const DEFAULT_SATURATION: f32 = 1.0;

pub const SATURATION_MIN: f32 = 0.5;
pub const SATURATION_MAX: f32 = 2.0;

/// A concrete physical-device signal assigned to a logical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalBinding {
    Button(u32),
    Axis { code: u32, positive: bool },
}

impl fmt::Display for PhysicalBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalBinding::Button(code) => write!(f, "button {code}"),
            PhysicalBinding::Axis { code, positive } => {
                write!(f, "axis {code}{}", if *positive { '+' } else { '-' })
            }
        }
    }
}

/// Bindings of one maple port. Keyed by physical signal, so a signal drives
/// at most one logical input.
#[derive(Debug, Clone, Default, PartialEq)]
struct PortTable {
    buttons: AHashMap<u32, LogicalInput>,
    axes: AHashMap<(u32, bool), LogicalInput>,
}

/// Bindings and analog tuning of one device for one control profile.
///
/// Ports outside `0..MAPLE_PORTS` read as unbound and ignore writes.
#[derive(Debug, Clone, PartialEq)]
pub struct InputMapping {
    pub name: String,
    ports: [PortTable; MAPLE_PORTS as usize],
    rumble_power: u8,
    dead_zone: f32,
    saturation: f32,
    dirty: bool,
    /// Set by the scalar setters only.
    scalars_dirty: bool,
}

impl InputMapping {
    /// Creates an empty mapping with default tuning.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ports: Default::default(),
            rumble_power: DEFAULT_RUMBLE_POWER,
            dead_zone: DEFAULT_DEAD_ZONE,
            saturation: DEFAULT_SATURATION,
            dirty: false,
            scalars_dirty: false,
        }
    }

    fn table(&self, port: u8) -> Option<&PortTable> {
        self.ports.get(usize::from(port))
    }

    fn table_mut(&mut self, port: u8) -> Option<&mut PortTable> {
        self.ports.get_mut(usize::from(port))
    }

    /// Binds a button code to `input`, replacing the input's previous button
    /// and taking the code away from any other input.
    pub fn set_button(&mut self, port: u8, input: LogicalInput, code: u32) {
        self.clear_button(port, input);
        if let Some(table) = self.table_mut(port) {
            table.buttons.insert(code, input);
            self.dirty = true;
        }
    }

    /// Binds an axis half to `input`, replacing the input's previous axis
    /// and taking the half away from any other input.
    pub fn set_axis(&mut self, port: u8, input: LogicalInput, code: u32, positive: bool) {
        self.clear_axis(port, input);
        if let Some(table) = self.table_mut(port) {
            table.axes.insert((code, positive), input);
            self.dirty = true;
        }
    }

    pub fn clear_button(&mut self, port: u8, input: LogicalInput) {
        let Some(table) = self.table_mut(port) else {
            return;
        };
        let before = table.buttons.len();
        table.buttons.retain(|_, bound| *bound != input);
        if table.buttons.len() != before {
            self.dirty = true;
        }
    }

    pub fn clear_axis(&mut self, port: u8, input: LogicalInput) {
        let Some(table) = self.table_mut(port) else {
            return;
        };
        let before = table.axes.len();
        table.axes.retain(|_, bound| *bound != input);
        if table.axes.len() != before {
            self.dirty = true;
        }
    }

    /// Button code bound to `input`.
    pub fn button_code(&self, port: u8, input: LogicalInput) -> Option<u32> {
        let table = self.table(port)?;
        table
            .buttons
            .iter()
            .find(|(_, bound)| **bound == input)
            .map(|(code, _)| *code)
    }

    /// Axis code and polarity bound to `input`.
    pub fn axis_code(&self, port: u8, input: LogicalInput) -> Option<(u32, bool)> {
        let table = self.table(port)?;
        table
            .axes
            .iter()
            .find(|(_, bound)| **bound == input)
            .map(|(half, _)| *half)
    }

    /// Input driven by a button code.
    pub fn button_id(&self, port: u8, code: u32) -> Option<LogicalInput> {
        self.table(port)?.buttons.get(&code).copied()
    }

    /// Input driven by an axis half.
    pub fn axis_id(&self, port: u8, code: u32, positive: bool) -> Option<LogicalInput> {
        self.table(port)?.axes.get(&(code, positive)).copied()
    }

    /// The binding shown for `input`: its button if any, otherwise its axis.
    pub fn binding(&self, port: u8, input: LogicalInput) -> Option<PhysicalBinding> {
        if let Some(code) = self.button_code(port, input) {
            return Some(PhysicalBinding::Button(code));
        }
        self.axis_code(port, input)
            .map(|(code, positive)| PhysicalBinding::Axis { code, positive })
    }

    /// All bindings of a port, ordered by input.
    pub fn bindings(&self, port: u8) -> Vec<(LogicalInput, PhysicalBinding)> {
        let Some(table) = self.table(port) else {
            return Vec::new();
        };
        let mut out: Vec<(LogicalInput, PhysicalBinding)> = table
            .buttons
            .iter()
            .map(|(code, input)| (*input, PhysicalBinding::Button(*code)))
            .chain(table.axes.iter().map(|((code, positive), input)| {
                (*input, PhysicalBinding::Axis { code: *code, positive: *positive })
            }))
            .collect();
        out.sort_by_key(|(input, binding)| (*input, matches!(binding, PhysicalBinding::Axis { .. })));
        out
    }

    /// Whether no port has any binding.
    pub fn is_empty(&self) -> bool {
        self.ports
            .iter()
            .all(|t| t.buttons.is_empty() && t.axes.is_empty())
    }

    /// Translates a normalized axis value into the input it drives and its
    /// magnitude after dead zone and saturation, in [0.0, 1.0].
    /// NaN reads as a centered axis.
    pub fn classify_axis(&self, port: u8, code: u32, value: f32) -> Option<(LogicalInput, f32)> {
        let value = if value.is_nan() { 0.0 } else { value.clamp(-1.0, 1.0) };
        let positive = value >= 0.0;
        let input = self.axis_id(port, code, positive)?;
        let magnitude = value.abs();
        if magnitude <= self.dead_zone {
            return Some((input, 0.0));
        }
        let span = (1.0 - self.dead_zone).max(f32::EPSILON);
        let scaled = (magnitude - self.dead_zone) / span * self.saturation;
        Some((input, scaled.clamp(0.0, 1.0)))
    }

    pub fn rumble_power(&self) -> u8 {
        self.rumble_power
    }

    pub fn dead_zone(&self) -> f32 {
        self.dead_zone
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    /// Sets the rumble power in percent. Returns `true` if the value changed.
    pub fn set_rumble_power(&mut self, power: u8) -> bool {
        let power = power.min(100);
        if power == self.rumble_power {
            return false;
        }
        self.rumble_power = power;
        self.dirty = true;
        self.scalars_dirty = true;
        true
    }

    /// Sets the dead zone as a fraction of full deflection. Returns `true` if the value changed.
    #[allow(clippy::float_cmp)]
    pub fn set_dead_zone(&mut self, dead_zone: f32) -> bool {
        let dead_zone = dead_zone.clamp(0.0, 1.0);
        if dead_zone == self.dead_zone {
            return false;
        }
        self.dead_zone = dead_zone;
        self.dirty = true;
        self.scalars_dirty = true;
        true
    }

    /// Sets the saturation factor. Returns `true` if the value changed.
    #[allow(clippy::float_cmp)]
    pub fn set_saturation(&mut self, saturation: f32) -> bool {
        let saturation = saturation.clamp(SATURATION_MIN, SATURATION_MAX);
        if saturation == self.saturation {
            return false;
        }
        self.saturation = saturation;
        self.dirty = true;
        self.scalars_dirty = true;
        true
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether rumble power, dead zone or saturation changed since the last save.
    pub fn scalars_changed(&self) -> bool {
        self.scalars_dirty
    }

    pub fn set_dirty(&mut self) {
        self.dirty = true;
    }

    /// Marks the mapping as persisted.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
        self.scalars_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_signal_drives_one_input() {
        let mut m = InputMapping::new("pad");
        m.set_button(0, LogicalInput::A, 5);
        m.set_button(0, LogicalInput::B, 5);
        assert_eq!(m.button_code(0, LogicalInput::A), None);
        assert_eq!(m.button_id(0, 5), Some(LogicalInput::B));
    }

    #[test]
    fn rebinding_an_input_drops_its_previous_code() {
        let mut m = InputMapping::new("pad");
        m.set_button(0, LogicalInput::A, 5);
        m.set_button(0, LogicalInput::A, 6);
        assert_eq!(m.button_id(0, 5), None);
        assert_eq!(m.button_code(0, LogicalInput::A), Some(6));

        m.set_axis(0, LogicalInput::AxisUp, 1, false);
        m.set_axis(0, LogicalInput::AxisUp, 1, true);
        assert_eq!(m.axis_id(0, 1, false), None);
        assert_eq!(m.axis_code(0, LogicalInput::AxisUp), Some((1, true)));
    }

    #[test]
    fn ports_are_independent() {
        let mut m = InputMapping::new("pad");
        m.set_button(1, LogicalInput::Start, 6);
        assert_eq!(m.button_code(0, LogicalInput::Start), None);
        assert_eq!(m.button_code(1, LogicalInput::Start), Some(6));

        m.set_button(MAPLE_PORTS, LogicalInput::Start, 6);
        assert_eq!(m.button_code(MAPLE_PORTS, LogicalInput::Start), None);
    }

    #[test]
    fn binding_prefers_button() {
        let mut m = InputMapping::new("pad");
        m.set_axis(0, LogicalInput::LeftTrigger, 4, true);
        assert_eq!(
            m.binding(0, LogicalInput::LeftTrigger),
            Some(PhysicalBinding::Axis { code: 4, positive: true })
        );
        m.set_button(0, LogicalInput::LeftTrigger, 9);
        assert_eq!(m.binding(0, LogicalInput::LeftTrigger), Some(PhysicalBinding::Button(9)));
        assert_eq!(m.bindings(0).len(), 2);
    }

    #[test]
    fn clearing_nothing_keeps_mapping_clean() {
        let mut m = InputMapping::new("pad");
        m.clear_button(0, LogicalInput::A);
        m.clear_axis(0, LogicalInput::A);
        assert!(!m.is_dirty());
    }

    #[test]
    fn binding_edits_leave_scalars_clean() {
        let mut m = InputMapping::new("pad");
        m.set_button(0, LogicalInput::A, 1);
        m.set_axis(0, LogicalInput::AxisUp, 1, false);
        assert!(m.is_dirty());
        assert!(!m.scalars_changed());

        m.set_dead_zone(0.3);
        assert!(m.scalars_changed());
        m.clear_dirty();
        assert!(!m.is_dirty());
        assert!(!m.scalars_changed());
    }

    #[test]
    fn scalar_setters_clamp_and_track_changes() {
        let mut m = InputMapping::new("pad");
        assert!(!m.set_rumble_power(DEFAULT_RUMBLE_POWER));
        assert!(!m.is_dirty());

        assert!(m.set_dead_zone(1.5));
        assert_eq!(m.dead_zone(), 1.0);
        assert!(m.set_saturation(0.1));
        assert_eq!(m.saturation(), SATURATION_MIN);
        assert!(m.set_rumble_power(250));
        assert_eq!(m.rumble_power(), 100);
        assert!(m.is_dirty());
    }

    #[test]
    fn classify_applies_dead_zone_and_saturation() {
        let mut m = InputMapping::new("pad");
        m.set_axis(0, LogicalInput::AxisLeft, 0, false);
        m.set_axis(0, LogicalInput::AxisRight, 0, true);
        m.set_dead_zone(0.2);

        assert_eq!(m.classify_axis(0, 0, 0.1), Some((LogicalInput::AxisRight, 0.0)));
        let (input, mag) = m.classify_axis(0, 0, -0.6).expect("bound axis");
        assert_eq!(input, LogicalInput::AxisLeft);
        assert!((mag - 0.5).abs() < 1e-6);

        m.set_saturation(2.0);
        let (_, mag) = m.classify_axis(0, 0, 0.6).expect("bound axis");
        assert!((mag - 1.0).abs() < 1e-6);

        assert_eq!(m.classify_axis(0, 3, 1.0), None);
    }

    #[test]
    fn classify_treats_nan_as_centered() {
        let mut m = InputMapping::new("pad");
        m.set_axis(0, LogicalInput::AxisLeft, 0, false);
        m.set_axis(0, LogicalInput::AxisRight, 0, true);

        assert_eq!(m.classify_axis(0, 0, f32::NAN), Some((LogicalInput::AxisRight, 0.0)));
        assert_eq!(m.classify_axis(0, 0, f32::NEG_INFINITY), Some((LogicalInput::AxisLeft, 1.0)));
    }
}
