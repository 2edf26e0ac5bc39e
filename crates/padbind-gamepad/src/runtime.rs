use std::sync::mpsc::Sender;
use std::thread;

use ahash::AHashMap;
use sdl2::controller::{Axis as SdlAxis, Button as SdlButton, GameController};
use sdl2::event::Event;
use sdl2::joystick::Joystick;
use sdl2::{GameControllerSubsystem, JoystickSubsystem};

use crate::error::{Error, Result};
use crate::events::RawEvent;
use crate::registry::DeviceRegistry;
use crate::types::{
    DeviceClass, DeviceId, DeviceInfo, PortAssignment, StandardAxis, StandardButton,
};

struct Devices {
    controllers: AHashMap<DeviceId, GameController>,
    joysticks: AHashMap<DeviceId, Joystick>,
}

/// Starts the SDL2-backed runtime thread that drives device discovery and events.
pub(crate) fn start_runtime_thread(registry: DeviceRegistry, ready_tx: Sender<Result<()>>) {
    thread::spawn(move || {
        // SDL must live entirely within this thread
        let sdl_ctx = match sdl2::init() {
            Ok(ctx) => ctx,
            Err(e) => {
                let _ = ready_tx.send(Err(Error::BackendInit(e)));
                return;
            }
        };
        let subsystems = sdl_ctx
            .game_controller()
            .and_then(|c| sdl_ctx.joystick().map(|j| (c, j)));
        let (controller_subsystem, joystick_subsystem) = match subsystems {
            Ok(s) => s,
            Err(e) => {
                let _ = ready_tx.send(Err(Error::BackendInit(e)));
                return;
            }
        };
        let mut event_pump = match sdl_ctx.event_pump() {
            Ok(p) => p,
            Err(e) => {
                let _ = ready_tx.send(Err(Error::BackendInit(e)));
                return;
            }
        };

        let mut devices = Devices {
            controllers: AHashMap::new(),
            joysticks: AHashMap::new(),
        };

        // Initial enumeration
        if let Ok(num_joysticks) = joystick_subsystem.num_joysticks() {
            for i in 0..num_joysticks {
                open_device(&registry, &controller_subsystem, &joystick_subsystem, &mut devices, i);
            }
        }

        let _ = ready_tx.send(Ok(()));

        loop {
            // Wait for an SDL event or timeout to reduce idle CPU usage
            let Some(first) = event_pump.wait_event_timeout(10) else {
                continue;
            };
            let mut pending = vec![first];
            pending.extend(event_pump.poll_iter());
            for event in pending {
                handle_event(
                    &registry,
                    &controller_subsystem,
                    &joystick_subsystem,
                    &mut devices,
                    event,
                );
            }
        }
    });
}

fn open_device(
    registry: &DeviceRegistry,
    controller_subsystem: &GameControllerSubsystem,
    joystick_subsystem: &JoystickSubsystem,
    devices: &mut Devices,
    index: u32,
) {
    if controller_subsystem.is_game_controller(index) {
        let Ok(controller) = controller_subsystem.open(index) else {
            return;
        };
        let id: DeviceId = controller.instance_id();
        if devices.controllers.contains_key(&id) {
            return;
        }
        let vendor_id = controller.vendor_id().unwrap_or(0);
        let product_id = controller.product_id().unwrap_or(0);
        let name = controller.name();
        let info = DeviceInfo {
            id,
            unique_id: format!("{name}-{vendor_id:04x}{product_id:04x}").into(),
            name,
            vendor_id,
            product_id,
            class: DeviceClass::Gamepad,
            supports_rumble: controller.has_rumble(),
            has_analog_stick: true,
            port: PortAssignment::All,
        };
        devices.controllers.insert(id, controller);
        registry.attach(info);
    } else if let Ok(joystick) = joystick_subsystem.open(index) {
        let id: DeviceId = joystick.instance_id();
        if devices.joysticks.contains_key(&id) {
            return;
        }
        let name = joystick.name();
        let info = DeviceInfo {
            id,
            unique_id: name.clone().into(),
            name,
            vendor_id: 0,
            product_id: 0,
            class: DeviceClass::Joystick,
            supports_rumble: joystick.has_rumble(),
            has_analog_stick: joystick.num_axes() > 0,
            port: PortAssignment::All,
        };
        devices.joysticks.insert(id, joystick);
        registry.attach(info);
    }
}

fn handle_event(
    registry: &DeviceRegistry,
    controller_subsystem: &GameControllerSubsystem,
    joystick_subsystem: &JoystickSubsystem,
    devices: &mut Devices,
    event: Event,
) {
    match event {
        Event::ControllerDeviceAdded { which, .. } | Event::JoyDeviceAdded { which, .. } => {
            open_device(registry, controller_subsystem, joystick_subsystem, devices, which);
        }
        Event::ControllerDeviceRemoved { which, .. } | Event::JoyDeviceRemoved { which, .. } => {
            let id: DeviceId = which;
            let known = devices.controllers.remove(&id).is_some()
                || devices.joysticks.remove(&id).is_some();
            if known {
                registry.detach(id);
            }
        }
        Event::ControllerButtonDown { which, button, .. } => {
            if let Some(btn) = map_sdl_button(button) {
                registry.feed(which, RawEvent::Button { code: btn.code(), pressed: true });
            }
        }
        Event::ControllerButtonUp { which, button, .. } => {
            if let Some(btn) = map_sdl_button(button) {
                registry.feed(which, RawEvent::Button { code: btn.code(), pressed: false });
            }
        }
        Event::ControllerAxisMotion { which, axis, value, .. } => {
            let code = map_sdl_axis(axis).code();
            registry.feed(which, RawEvent::Axis { code, value: normalize(value) });
        }
        // Game controllers also emit joystick events; only raw joysticks use them.
        Event::JoyButtonDown { which, button_idx, .. } if devices.joysticks.contains_key(&which) => {
            registry.feed(which, RawEvent::Button { code: u32::from(button_idx), pressed: true });
        }
        Event::JoyButtonUp { which, button_idx, .. } if devices.joysticks.contains_key(&which) => {
            registry.feed(which, RawEvent::Button { code: u32::from(button_idx), pressed: false });
        }
        Event::JoyAxisMotion { which, axis_idx, value, .. } if devices.joysticks.contains_key(&which) => {
            registry.feed(which, RawEvent::Axis { code: u32::from(axis_idx), value: normalize(value) });
        }
        _ => {}
    }
}

fn normalize(value: i16) -> f32 {
    (f32::from(value) / f32::from(i16::MAX)).clamp(-1.0, 1.0)
}

fn map_sdl_button(button: SdlButton) -> Option<StandardButton> {
    Some(match button {
        SdlButton::A => StandardButton::A,
        SdlButton::B => StandardButton::B,
        SdlButton::X => StandardButton::X,
        SdlButton::Y => StandardButton::Y,
        SdlButton::Back => StandardButton::Back,
        SdlButton::Guide => StandardButton::Guide,
        SdlButton::Start => StandardButton::Start,
        SdlButton::LeftStick => StandardButton::LeftStick,
        SdlButton::RightStick => StandardButton::RightStick,
        SdlButton::LeftShoulder => StandardButton::LeftShoulder,
        SdlButton::RightShoulder => StandardButton::RightShoulder,
        SdlButton::DPadUp => StandardButton::DPadUp,
        SdlButton::DPadDown => StandardButton::DPadDown,
        SdlButton::DPadLeft => StandardButton::DPadLeft,
        SdlButton::DPadRight => StandardButton::DPadRight,
        _ => return None,
    })
}

fn map_sdl_axis(axis: SdlAxis) -> StandardAxis {
    match axis {
        SdlAxis::LeftX => StandardAxis::LeftX,
        SdlAxis::LeftY => StandardAxis::LeftY,
        SdlAxis::RightX => StandardAxis::RightX,
        SdlAxis::RightY => StandardAxis::RightY,
        SdlAxis::TriggerLeft => StandardAxis::LeftTrigger,
        SdlAxis::TriggerRight => StandardAxis::RightTrigger,
    }
}
