mod capture;
mod error;
mod events;
mod registry;
#[cfg(feature = "sdl2-backend")]
mod runtime;
mod types;

pub use crate::capture::CaptureSlot;
pub use crate::error::{Error, Result};
pub use crate::events::{
    DeviceEvent, EventReceiver, RawEvent, RawInput, AXIS_DETECT_THRESHOLD,
};
pub use crate::registry::{DeviceRegistry, GamepadRegistry};
pub use crate::types::{
    DeviceClass, DeviceId, DeviceInfo, PortAssignment, StandardAxis, StandardButton,
    MAPLE_PORTS,
};
