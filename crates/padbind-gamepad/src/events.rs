use crossbeam_channel::Receiver;

use crate::types::{DeviceId, DeviceInfo};

/// Minimum normalized deflection for an axis movement to count as a deliberate input.
pub const AXIS_DETECT_THRESHOLD: f32 = 0.5;

/// A raw signal reported by a device driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    /// A button changed state.
    Button { code: u32, pressed: bool },
    /// An analog axis moved; value is normalized to [-1.0, 1.0].
    Axis { code: u32, value: f32 },
}

/// A physical input qualified for binding: a pressed button or a deflected axis half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawInput {
    Button(u32),
    Axis { code: u32, positive: bool },
}

impl RawInput {
    /// Qualifies a raw event for capture.
    /// Releases and axis movements below the detection threshold are ignored.
    pub fn from_event(event: RawEvent) -> Option<Self> {
        match event {
            RawEvent::Button { code, pressed: true } => Some(RawInput::Button(code)),
            RawEvent::Button { .. } => None,
            RawEvent::Axis { code, value } => {
                if value.abs() < AXIS_DETECT_THRESHOLD {
                    return None;
                }
                Some(RawInput::Axis {
                    code,
                    positive: value > 0.0,
                })
            }
        }
    }
}

/// Events emitted by the registry about device lifecycle and input.
#[derive(Debug, Clone)]
pub enum DeviceEvent {
    /// A device has been connected and enumerated.
    Connected(DeviceInfo),
    /// A previously connected device has been disconnected.
    Disconnected(DeviceId),
    /// A device reported a raw signal.
    Input { id: DeviceId, event: RawEvent },
}

/// Receiving end for device events subscription.
pub type EventReceiver = Receiver<DeviceEvent>;
