use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use crossbeam_channel::{select, tick, unbounded, Receiver};
use padbind_gamepad::{
    DeviceClass, DeviceEvent, DeviceId, DeviceRegistry, GamepadRegistry, RawEvent, RawInput,
};
use padbind_mapping::{layout, LayoutEntry, LogicalInput, PhysicalBinding, TemplateKind, MAPLE_PORTS};
use padbind_resolver::{CaptureStatus, InputBindingResolver};
use padbind_workspace::{Settings, Workspace, YamlStore};

use crate::cli::{Command, Target, Toggle};
use crate::error::AppError;
use crate::{print_debug, print_info, print_warning};

type Editor = InputBindingResolver<DeviceRegistry, YamlStore>;

/// Interval between capture polls while waiting for an input.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

pub(crate) struct Context {
    workspace: Workspace,
    settings: Settings,
    registry: DeviceRegistry,
}

impl Context {
    pub(crate) fn new(workspace: Option<&Path>) -> Result<Self, AppError> {
        let workspace = Workspace::new(workspace)?;
        let settings = workspace.load_settings()?;
        let registry = match DeviceRegistry::with_backend() {
            Ok(registry) => registry,
            Err(e) => {
                print_debug!("no device backend ({e}), devices are edited offline");
                DeviceRegistry::new()
            }
        };
        print_debug!("workspace at {}", workspace.path().display());
        Ok(Self {
            workspace,
            settings,
            registry,
        })
    }

    pub(crate) fn run(self, command: Command) -> Result<(), AppError> {
        match command {
            Command::Devices { watch } => {
                self.list_devices();
                if watch {
                    self.watch_devices()?;
                }
                Ok(())
            }
            Command::Show { target } => self.show(&target),
            Command::Map {
                target,
                input,
                button,
                axis,
            } => {
                let injected = match (button, axis) {
                    (Some(code), _) => Some(RawEvent::Button { code, pressed: true }),
                    (None, Some(axis)) => Some(parse_axis(&axis)?),
                    (None, None) => None,
                };
                self.map(&target, input, injected)
            }
            Command::Unmap { target, input } => {
                let (mut editor, id) = self.open(&target)?;
                editor.unbind(id, input)?;
                editor.finish()?;
                print_info!("{input} unmapped");
                Ok(())
            }
            Command::Reset {
                target,
                arcade_stick,
            } => {
                let kind = if arcade_stick {
                    TemplateKind::ArcadeStick
                } else {
                    TemplateKind::Gamepad
                };
                let (mut editor, id) = self.open(&target)?;
                editor.reset_to_default(id, kind)?;
                print_info!("mapping reset to {kind:?} defaults");
                Ok(())
            }
            Command::Tune {
                target,
                rumble,
                dead_zone,
                saturation,
            } => {
                let (mut editor, id) = self.open(&target)?;
                let mut changed = false;
                if let Some(power) = rumble {
                    changed |= editor.set_rumble_power(id, power)?;
                }
                if let Some(dead_zone) = dead_zone {
                    changed |= editor.set_dead_zone(id, dead_zone)?;
                }
                if let Some(saturation) = saturation {
                    changed |= editor.set_saturation(id, saturation)?;
                }
                if !changed {
                    print_info!("nothing changed");
                    return Ok(());
                }
                editor.commit_scalars(id)?;
                editor.finish()?;
                print_info!("analog settings saved for both profiles");
                Ok(())
            }
            Command::PerGame { target, state } => {
                let (mut editor, id) = self.open(&target)?;
                editor.set_per_game(id, state == Toggle::On)?;
                editor.finish()?;
                match editor.game() {
                    Some(game) if state == Toggle::On => {
                        print_info!("using a separate mapping for {game}");
                    }
                    _ => {
                        print_info!("using the shared mapping");
                    }
                }
                Ok(())
            }
            Command::Settings {
                timeout,
                port,
                profile,
                game,
            } => self.update_settings(timeout, port, profile, game),
        }
    }

    fn list_devices(&self) {
        let devices = self.registry.devices();
        if devices.is_empty() {
            print_warning!("no devices connected");
            return;
        }
        for device in devices {
            print_info!(
                "{} ({}) class={:?} rumble={} port={:?}",
                device.unique_id.bold(),
                device.name,
                device.class,
                device.supports_rumble,
                device.port,
            );
        }
    }

    fn watch_devices(&self) -> Result<(), AppError> {
        let events = self.registry.subscribe();
        let stop_rx = stop_signal()?;
        print_info!("watching devices, press Ctrl+C to stop");
        loop {
            select! {
                recv(stop_rx) -> _ => break,
                recv(events) -> event => {
                    let Ok(event) = event else {
                        break;
                    };
                    if let Some(line) = describe_event(&event) {
                        print_info!("{line}");
                    }
                }
            }
        }
        Ok(())
    }

    fn open(&self, target: &Target) -> Result<(Editor, DeviceId), AppError> {
        let mut editor = InputBindingResolver::with_settings(
            self.registry.clone(),
            self.workspace.store(),
            &self.settings,
        );
        if let Some(port) = target.port {
            editor.set_port(port)?;
        }
        if let Some(game) = target.game.as_deref() {
            editor.set_game(Some(game));
        }

        let info = match self.registry.find_by_unique_id(&target.device) {
            Some(info) => info,
            None => {
                let class = DeviceClass::from(target.class);
                print_debug!("{} is not connected, editing offline as {class:?}", target.device);
                self.registry.attach_offline(&target.device, class)
            }
        };
        let profile = target.profile.unwrap_or(self.settings.profile);
        if editor.resolve_for_profile(info.id, profile)?.is_none() {
            return Err(AppError::NoMapping(target.device.clone(), profile));
        }
        Ok((editor, info.id))
    }

    fn show(&self, target: &Target) -> Result<(), AppError> {
        let (editor, id) = self.open(target)?;
        let Some(mapping) = editor.mapping(id) else {
            return Ok(());
        };
        let Some(profile) = editor.active_profile(id) else {
            return Ok(());
        };
        print_info!(
            "{} - {profile} profile, port {}{}",
            target.device.bold(),
            editor.port_for(id).unwrap_or_default(),
            if editor.is_per_game(id) { ", per game" } else { "" },
        );
        print_info!(
            "rumble {}%, dead zone {:.2}, saturation {:.2}",
            mapping.rumble_power(),
            mapping.dead_zone(),
            mapping.saturation(),
        );
        for entry in layout(profile) {
            match entry {
                LayoutEntry::Category(label) => log::info!("{}", label.bold()),
                LayoutEntry::Control { input, label } => {
                    let bound = editor.describe(id, *input).unwrap_or_else(|| "-".to_string());
                    log::info!("  {label:<20} {bound}");
                }
            }
        }
        Ok(())
    }

    fn map(
        &self,
        target: &Target,
        input: LogicalInput,
        injected: Option<RawEvent>,
    ) -> Result<(), AppError> {
        let (mut editor, id) = self.open(target)?;

        let stop_rx = stop_signal()?;

        editor.begin_capture(id, input)?;
        match injected {
            Some(event) => editor.registry().feed(id, event),
            None => {
                print_info!("press a button or move an axis for {}", input.to_string().bold());
            }
        }

        let ticker = tick(POLL_INTERVAL);
        let mut shown = None;
        loop {
            select! {
                recv(stop_rx) -> _ => {
                    editor.cancel_capture();
                    print_warning!("mapping cancelled");
                    break;
                }
                recv(ticker) -> _ => {
                    match editor.poll_capture() {
                        CaptureStatus::Capturing { remaining, .. } => {
                            let secs = remaining.as_millis().div_ceil(1000);
                            if shown != Some(secs) {
                                print_info!("{secs}s left");
                                shown = Some(secs);
                            }
                        }
                        CaptureStatus::Committed { bound, .. } => {
                            for (input, _) in bound {
                                let label = editor.describe(id, input).unwrap_or_default();
                                print_info!("{input} -> {}", label.bold());
                            }
                            break;
                        }
                        CaptureStatus::TimedOut { input } => {
                            print_warning!("no input detected, {input} left unchanged");
                            break;
                        }
                        CaptureStatus::Idle => break,
                    }
                }
            }
        }

        editor.finish()?;
        Ok(())
    }

    fn update_settings(
        self,
        timeout: Option<u64>,
        port: Option<u8>,
        profile: Option<padbind_mapping::ControlProfile>,
        game: Option<String>,
    ) -> Result<(), AppError> {
        let mut settings = self.settings;
        if let Some(secs) = timeout {
            settings.detect_timeout = Duration::from_secs(secs);
        }
        if let Some(port) = port {
            if port >= MAPLE_PORTS {
                return Err(AppError::InvalidPort(port));
            }
            settings.port = port;
        }
        if let Some(profile) = profile {
            settings.profile = profile;
        }
        if let Some(game) = game {
            settings.game = Some(game).filter(|g| !g.is_empty()).map(Into::into);
        }
        self.workspace.save_settings(&settings)?;
        print_info!(
            "settings saved: timeout {}s, port {}, profile {}, game {}",
            settings.detect_timeout.as_secs(),
            settings.port,
            settings.profile,
            settings.game.as_deref().unwrap_or("-"),
        );
        Ok(())
    }
}

/// Channel that receives a message on Ctrl+C.
fn stop_signal() -> Result<Receiver<()>, AppError> {
    let (stop_tx, stop_rx) = unbounded::<()>();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })?;
    Ok(stop_rx)
}

/// One line per hot-plug event or qualifying input. Releases and small axis
/// motion print nothing.
fn describe_event(event: &DeviceEvent) -> Option<String> {
    match event {
        DeviceEvent::Connected(info) => Some(format!(
            "{} connected as {} ({:?})",
            info.unique_id, info.id, info.class
        )),
        DeviceEvent::Disconnected(id) => Some(format!("device {id} disconnected")),
        DeviceEvent::Input { id, event } => {
            let binding = match RawInput::from_event(*event)? {
                RawInput::Button(code) => PhysicalBinding::Button(code),
                RawInput::Axis { code, positive } => PhysicalBinding::Axis { code, positive },
            };
            Some(format!("device {id}: {binding}"))
        }
    }
}

/// Parses an axis half written as `<code>+` or `<code>-` into a full deflection.
fn parse_axis(raw: &str) -> Result<RawEvent, AppError> {
    let raw = raw.trim();
    let (digits, value) = if let Some(d) = raw.strip_suffix('+') {
        (d, 1.0)
    } else if let Some(d) = raw.strip_suffix('-') {
        (d, -1.0)
    } else {
        return Err(AppError::InvalidAxis(raw.to_string()));
    };
    let code = digits
        .parse::<u32>()
        .map_err(|_| AppError::InvalidAxis(raw.to_string()))?;
    Ok(RawEvent::Axis { code, value })
}
