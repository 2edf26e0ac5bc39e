use std::time::{Duration, Instant};

use ahash::AHashMap;
use log::{debug, info};
use padbind_gamepad::{DeviceId, DeviceInfo, GamepadRegistry, PortAssignment, MAPLE_PORTS};
use padbind_mapping::{
    default_mapping, ControlProfile, InputMapping, LogicalInput, PhysicalBinding, TemplateKind,
};
use padbind_workspace::{MappingKey, MappingStore, Settings, DEFAULT_DETECT_TIMEOUT};

use crate::commit::commit_capture;
use crate::error::{ResolverError, Result};
use crate::session::{CaptureStatus, DetectionSession};

/// Mapping state of one device in the editor.
#[derive(Debug)]
struct DeviceState {
    info: DeviceInfo,
    profile: ControlProfile,
    mapping: Option<InputMapping>,
    /// Game `mapping` is stored under. Kept when the selected game changes.
    game: Option<Box<str>>,
}

/// A mapping found by the fallback chain.
struct Resolved {
    mapping: InputMapping,
    game: Option<Box<str>>,
    /// Whether `mapping` was loaded from the store.
    stored: bool,
}

/// Binds physical inputs to logical inputs and keeps device mappings in sync
/// with the store.
///
/// One resolver drives one editor. At most one detection session is open at a
/// time; mapping edits are rejected while it is.
pub struct InputBindingResolver<R, S> {
    registry: R,
    store: S,
    states: AHashMap<DeviceId, DeviceState>,
    session: Option<DetectionSession>,
    timeout: Duration,
    port: u8,
    game: Option<Box<str>>,
}

impl<R: GamepadRegistry, S: MappingStore> InputBindingResolver<R, S> {
    pub fn new(registry: R, store: S) -> Self {
        Self {
            registry,
            store,
            states: AHashMap::new(),
            session: None,
            timeout: DEFAULT_DETECT_TIMEOUT,
            port: 0,
            game: None,
        }
    }

    /// Creates a resolver using the timeout, port and game of `settings`.
    pub fn with_settings(registry: R, store: S, settings: &Settings) -> Self {
        let mut resolver = Self::new(registry, store);
        resolver.timeout = settings.detect_timeout;
        resolver.port = settings.port.min(MAPLE_PORTS - 1);
        resolver.game.clone_from(&settings.game);
        resolver
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Port edited on devices that feed every port.
    pub fn port(&self) -> u8 {
        self.port
    }

    pub fn set_port(&mut self, port: u8) -> Result<()> {
        if port >= MAPLE_PORTS {
            return Err(ResolverError::InvalidPort(port));
        }
        self.port = port;
        Ok(())
    }

    pub fn game(&self) -> Option<&str> {
        self.game.as_deref()
    }

    /// Selects the running game. Mappings resolved afterwards look for a
    /// per-game mapping first. Mappings already resolved keep their game.
    pub fn set_game(&mut self, game: Option<&str>) {
        self.game = game.filter(|g| !g.is_empty()).map(Into::into);
    }

    /// Port whose table is edited for `device`.
    pub fn port_for(&self, device: DeviceId) -> Option<u8> {
        let info = match self.states.get(&device) {
            Some(state) => state.info.clone(),
            None => self.registry.device(device)?,
        };
        Some(self.effective_port(&info))
    }

    /// Profile `device` was last resolved for.
    pub fn active_profile(&self, device: DeviceId) -> Option<ControlProfile> {
        self.states.get(&device).map(|s| s.profile)
    }

    /// Resolved mapping of `device` for its active profile.
    pub fn mapping(&self, device: DeviceId) -> Option<&InputMapping> {
        self.states.get(&device)?.mapping.as_ref()
    }

    /// Whether the mapping of `device` is stored under a game.
    pub fn is_per_game(&self, device: DeviceId) -> bool {
        self.states.get(&device).is_some_and(|s| s.game.is_some())
    }

    pub fn is_capturing(&self) -> bool {
        self.session.is_some()
    }

    /// Opens a detection session binding the next input of `device` to `input`.
    pub fn begin_capture(&mut self, device: DeviceId, input: LogicalInput) -> Result<()> {
        self.begin_capture_at(device, input, Instant::now())
    }

    pub fn begin_capture_at(
        &mut self,
        device: DeviceId,
        input: LogicalInput,
        now: Instant,
    ) -> Result<()> {
        self.ensure_idle()?;
        let state = self.state(device)?;
        if state.mapping.is_none() {
            return Err(ResolverError::NoMapping(device));
        }
        let port = self.effective_port(&state.info);
        let slot = self.registry.detect_input(device)?;
        debug!("capture started - device={device} input={input} port={port}");
        self.session = Some(DetectionSession {
            device,
            input,
            port,
            start: now,
            slot,
        });
        Ok(())
    }

    /// Advances the open session. Never blocks.
    pub fn poll_capture(&mut self) -> CaptureStatus {
        self.poll_capture_at(Instant::now())
    }

    pub fn poll_capture_at(&mut self, now: Instant) -> CaptureStatus {
        let Some(session) = self.session.as_ref() else {
            return CaptureStatus::Idle;
        };
        let input = session.input;

        if let Some(raw) = session.slot.take() {
            let Some(session) = self.session.take() else {
                return CaptureStatus::Idle;
            };
            let Some(mapping) = self
                .states
                .get_mut(&session.device)
                .and_then(|s| s.mapping.as_mut())
            else {
                return CaptureStatus::TimedOut { input };
            };
            let bound = commit_capture(mapping, session.port, input, raw);
            debug!("capture committed - device={} {bound:?}", session.device);
            return CaptureStatus::Committed { input, bound };
        }

        match session.remaining(now, self.timeout) {
            Some(remaining) => CaptureStatus::Capturing { input, remaining },
            None => {
                self.close_session();
                debug!("capture timed out - input={input}");
                CaptureStatus::TimedOut { input }
            }
        }
    }

    /// Closes the open session without changes.
    pub fn cancel_capture(&mut self) -> CaptureStatus {
        match self.close_session() {
            Some(input) => CaptureStatus::TimedOut { input },
            None => CaptureStatus::Idle,
        }
    }

    /// Clears the button and axis binding of `input`. Clearing an unbound
    /// input changes nothing.
    pub fn unbind(&mut self, device: DeviceId, input: LogicalInput) -> Result<()> {
        self.ensure_idle()?;
        let port = self.port_for(device).ok_or(ResolverError::DeviceNotFound(device))?;
        let mapping = self.mapping_mut(device)?;
        mapping.clear_button(port, input);
        mapping.clear_axis(port, input);
        Ok(())
    }

    /// Makes `profile` the active profile of `device` and returns its mapping.
    ///
    /// A dirty mapping of the previous profile is saved first. The new mapping
    /// is the stored one for the current game, then the stored global one,
    /// then the default template for the device class, then a copy of the
    /// console mapping. Without any of these the device has no mapping.
    pub fn resolve_for_profile(
        &mut self,
        device: DeviceId,
        profile: ControlProfile,
    ) -> Result<Option<&InputMapping>> {
        self.ensure_idle()?;
        let info = self
            .registry
            .device(device)
            .ok_or(ResolverError::DeviceNotFound(device))?;
        self.save_if_dirty(device)?;

        let resolved = self.lookup(&info, profile)?;
        debug!(
            "resolved {} ({profile}) - found={} per_game={}",
            info.unique_id,
            resolved.is_some(),
            resolved.as_ref().is_some_and(|r| r.game.is_some()),
        );
        let (mapping, game) = match resolved {
            Some(r) => (Some(r.mapping), r.game),
            None => (None, None),
        };
        self.states.insert(
            device,
            DeviceState {
                info,
                profile,
                mapping,
                game,
            },
        );
        Ok(self.mapping(device))
    }

    /// Saves the active mapping if it changed and carries its rumble power,
    /// dead zone and saturation over to the other profile's mapping.
    ///
    /// The other profile is only touched if a scalar changed. Scalars the device has no hardware for are not carried. A stored
    /// mapping of the other profile is only written if a value changed; a
    /// missing one is created from the fallback chain.
    pub fn commit_scalars(&mut self, device: DeviceId) -> Result<()> {
        self.ensure_idle()?;
        let state = self.state(device)?;
        let Some(mapping) = state.mapping.as_ref() else {
            return Ok(());
        };
        if !mapping.is_dirty() {
            return Ok(());
        }
        let scalars_changed = mapping.scalars_changed();
        let info = state.info.clone();
        let other_profile = state.profile.other();

        self.save_if_dirty(device)?;
        if !scalars_changed {
            return Ok(());
        }

        let Some(mut other) = self.lookup(&info, other_profile)? else {
            return Ok(());
        };
        let Some(current) = self.mapping(device) else {
            return Ok(());
        };
        let changed = carry_scalars(&info, current, &mut other.mapping);
        if changed || !other.stored {
            let key = mapping_key(&info, other_profile, other.game.as_deref());
            self.store.save(&key, &other.mapping)?;
            info!("scalars copied to {key}");
        }
        Ok(())
    }

    /// Sets the rumble power of the active mapping. Returns `true` if it changed.
    pub fn set_rumble_power(&mut self, device: DeviceId, power: u8) -> Result<bool> {
        self.ensure_idle()?;
        Ok(self.mapping_mut(device)?.set_rumble_power(power))
    }

    /// Sets the dead zone of the active mapping. Returns `true` if it changed.
    pub fn set_dead_zone(&mut self, device: DeviceId, dead_zone: f32) -> Result<bool> {
        self.ensure_idle()?;
        Ok(self.mapping_mut(device)?.set_dead_zone(dead_zone))
    }

    /// Sets the saturation of the active mapping. Returns `true` if it changed.
    pub fn set_saturation(&mut self, device: DeviceId, saturation: f32) -> Result<bool> {
        self.ensure_idle()?;
        Ok(self.mapping_mut(device)?.set_saturation(saturation))
    }

    /// Replaces the bindings of the active mapping with a default template
    /// and saves it. Scalars are kept.
    pub fn reset_to_default(&mut self, device: DeviceId, kind: TemplateKind) -> Result<()> {
        self.ensure_idle()?;
        let state = self.state(device)?;
        let mut mapping = default_mapping(state.info.name.clone(), state.profile, kind);
        if let Some(previous) = state.mapping.as_ref() {
            carry_scalars(&state.info, previous, &mut mapping);
        }
        let key = mapping_key(&state.info, state.profile, state.game.as_deref());
        self.store.save(&key, &mapping)?;
        mapping.clear_dirty();
        info!("mapping {key} reset to {kind:?} defaults");
        self.state_mut(device)?.mapping = Some(mapping);
        Ok(())
    }

    /// Moves the active mapping of `device` to or from the current game.
    ///
    /// Enabling saves the mapping under the game. Disabling deletes the game
    /// mapping the device uses and resolves its mapping again.
    pub fn set_per_game(&mut self, device: DeviceId, enabled: bool) -> Result<()> {
        self.ensure_idle()?;
        if enabled {
            let game = self.game.clone().ok_or(ResolverError::NoGame)?;
            let state = self.state(device)?;
            if state.game.as_deref() == Some(&*game) {
                return Ok(());
            }
            let mapping = state.mapping.as_ref().ok_or(ResolverError::NoMapping(device))?;
            let key = MappingKey::new(&state.info.unique_id, state.profile).with_game(Some(&*game));
            self.store.save(&key, mapping)?;
            info!("mapping {key} created");
            let state = self.state_mut(device)?;
            state.game = Some(game);
            if let Some(mapping) = state.mapping.as_mut() {
                mapping.clear_dirty();
            }
        } else {
            let state = self.state(device)?;
            let Some(game) = state.game.as_deref() else {
                return Ok(());
            };
            let info = state.info.clone();
            let profile = state.profile;
            let key = MappingKey::new(&info.unique_id, profile).with_game(Some(game));
            self.store.remove(&key)?;
            info!("mapping {key} removed");
            let resolved = self.lookup(&info, profile)?;
            let state = self.state_mut(device)?;
            match resolved {
                Some(r) => {
                    state.game = r.game;
                    state.mapping = Some(r.mapping);
                }
                None => {
                    state.game = None;
                    state.mapping = None;
                }
            }
        }
        Ok(())
    }

    /// Display text of the control bound to `input`: the device's name for
    /// it or its raw code in brackets, with `+`/`-` for axis halves.
    pub fn describe(&self, device: DeviceId, input: LogicalInput) -> Option<String> {
        let state = self.states.get(&device)?;
        let port = self.effective_port(&state.info);
        let binding = state.mapping.as_ref()?.binding(port, input)?;
        Some(describe_binding(&state.info, binding))
    }

    /// Saves the active mapping of `device` if it changed.
    pub fn save(&mut self, device: DeviceId) -> Result<()> {
        self.ensure_idle()?;
        self.state(device)?;
        self.save_if_dirty(device)
    }

    /// Saves every changed mapping. Called when the editor closes.
    pub fn finish(&mut self) -> Result<()> {
        self.cancel_capture();
        let mut devices: Vec<DeviceId> = self.states.keys().copied().collect();
        devices.sort_unstable();
        for device in devices {
            self.save_if_dirty(device)?;
        }
        Ok(())
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.session.is_some() {
            return Err(ResolverError::CaptureInProgress);
        }
        Ok(())
    }

    fn close_session(&mut self) -> Option<LogicalInput> {
        let session = self.session.take()?;
        session.slot.disarm();
        Some(session.input)
    }

    fn effective_port(&self, info: &DeviceInfo) -> u8 {
        match info.port {
            PortAssignment::Fixed(port) => port,
            PortAssignment::All => self.port,
        }
    }

    fn state(&self, device: DeviceId) -> Result<&DeviceState> {
        match self.states.get(&device) {
            Some(state) => Ok(state),
            None if self.registry.device(device).is_some() => Err(ResolverError::NoMapping(device)),
            None => Err(ResolverError::DeviceNotFound(device)),
        }
    }

    fn state_mut(&mut self, device: DeviceId) -> Result<&mut DeviceState> {
        self.states
            .get_mut(&device)
            .ok_or(ResolverError::NoMapping(device))
    }

    fn mapping_mut(&mut self, device: DeviceId) -> Result<&mut InputMapping> {
        self.state(device)?;
        self.state_mut(device)?
            .mapping
            .as_mut()
            .ok_or(ResolverError::NoMapping(device))
    }

    fn save_if_dirty(&mut self, device: DeviceId) -> Result<()> {
        let Some(state) = self.states.get(&device) else {
            return Ok(());
        };
        let Some(mapping) = state.mapping.as_ref().filter(|m| m.is_dirty()) else {
            return Ok(());
        };
        let key = mapping_key(&state.info, state.profile, state.game.as_deref());
        self.store.save(&key, mapping)?;
        info!("mapping {key} saved");
        if let Some(mapping) = self.state_mut(device)?.mapping.as_mut() {
            mapping.clear_dirty();
        }
        Ok(())
    }

    /// Finds the mapping of `profile` for a device without touching state.
    fn lookup(&self, info: &DeviceInfo, profile: ControlProfile) -> Result<Option<Resolved>> {
        let global = MappingKey::new(&info.unique_id, profile);

        if let Some(game) = self.game.as_deref() {
            let key = global.clone().with_game(Some(game));
            if let Some(mapping) = self.store.load(&key)? {
                return Ok(Some(Resolved {
                    mapping,
                    game: Some(game.into()),
                    stored: true,
                }));
            }
        }

        if let Some(mapping) = self.store.load(&global)? {
            return Ok(Some(Resolved {
                mapping,
                game: None,
                stored: true,
            }));
        }

        let console = if profile == ControlProfile::Console {
            None
        } else {
            self.store
                .load(&MappingKey::new(&info.unique_id, ControlProfile::Console))?
        };

        if let Some(kind) = TemplateKind::for_class(info.class) {
            let mut mapping = default_mapping(info.name.clone(), profile, kind);
            if let Some(console) = console.as_ref() {
                carry_scalars(info, console, &mut mapping);
                mapping.clear_dirty();
            }
            debug!("{} ({profile}) uses the {kind:?} template", info.unique_id);
            return Ok(Some(Resolved {
                mapping,
                game: None,
                stored: false,
            }));
        }

        Ok(console.map(|mapping| Resolved {
            mapping,
            game: None,
            stored: false,
        }))
    }
}

fn mapping_key(info: &DeviceInfo, profile: ControlProfile, game: Option<&str>) -> MappingKey {
    MappingKey::new(&info.unique_id, profile).with_game(game)
}

/// Copies the scalars `info` has hardware for. Returns `true` if any changed.
fn carry_scalars(info: &DeviceInfo, from: &InputMapping, to: &mut InputMapping) -> bool {
    let mut changed = false;
    if info.supports_rumble {
        changed |= to.set_rumble_power(from.rumble_power());
    }
    if info.has_analog_stick {
        changed |= to.set_dead_zone(from.dead_zone());
        changed |= to.set_saturation(from.saturation());
    }
    changed
}

fn describe_binding(info: &DeviceInfo, binding: PhysicalBinding) -> String {
    match binding {
        PhysicalBinding::Button(code) => match info.button_name(code) {
            Some(name) => name.to_string(),
            None => format!("[{code}]"),
        },
        PhysicalBinding::Axis { code, positive } => {
            let sign = if positive { '+' } else { '-' };
            match info.axis_name(code) {
                Some(name) => format!("{name}{sign}"),
                None => format!("[{code}]{sign}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use padbind_gamepad::{DeviceClass, DeviceRegistry, RawEvent, StandardAxis, StandardButton};
    use padbind_workspace::MemoryStore;

    use super::*;

    use LogicalInput as L;

    type TestResolver<'a> = InputBindingResolver<DeviceRegistry, &'a MemoryStore>;

    fn console_key(device: &str) -> MappingKey {
        MappingKey::new(device, ControlProfile::Console)
    }

    /// A store holding an empty console mapping for `device`.
    fn store_with_empty(device: &str) -> MemoryStore {
        let store = MemoryStore::new();
        store
            .save(&console_key(device), &InputMapping::new(device))
            .expect("save");
        store
    }

    fn open(store: &MemoryStore, class: DeviceClass) -> (TestResolver<'_>, DeviceId) {
        let registry = DeviceRegistry::new();
        let id = registry.attach_offline("pad", class).id;
        let mut resolver = InputBindingResolver::new(registry, store);
        resolver
            .resolve_for_profile(id, ControlProfile::Console)
            .expect("resolve");
        (resolver, id)
    }

    fn capture(resolver: &mut TestResolver<'_>, id: DeviceId, input: L, event: RawEvent) -> CaptureStatus {
        let start = Instant::now();
        resolver.begin_capture_at(id, input, start).expect("capture starts");
        resolver.registry().feed(id, event);
        resolver.poll_capture_at(start)
    }

    fn mapping(resolver: &TestResolver<'_>, id: DeviceId) -> InputMapping {
        resolver.mapping(id).cloned().expect("device has a mapping")
    }

    #[test]
    fn unbind_twice_equals_unbind_once() {
        let store = MemoryStore::new();
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);

        resolver.unbind(id, L::A).expect("unbind");
        let once = mapping(&resolver, id);
        assert_eq!(once.button_code(0, L::A), None);

        resolver.unbind(id, L::A).expect("unbind");
        assert_eq!(mapping(&resolver, id), once);
    }

    #[test]
    fn rebind_to_axis_drops_button() {
        let store = store_with_empty("pad");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);

        capture(&mut resolver, id, L::A, RawEvent::Button { code: 5, pressed: true });
        assert_eq!(mapping(&resolver, id).button_code(0, L::A), Some(5));

        let status = capture(&mut resolver, id, L::A, RawEvent::Axis { code: 3, value: 0.9 });
        assert!(matches!(status, CaptureStatus::Committed { input: L::A, .. }));
        let m = mapping(&resolver, id);
        assert_eq!(m.button_code(0, L::A), None);
        assert_eq!(m.button_id(0, 5), None);
        assert_eq!(m.axis_code(0, L::A), Some((3, true)));
    }

    #[test]
    fn axis_capture_binds_free_opposite() {
        let store = store_with_empty("pad");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);

        let status = capture(&mut resolver, id, L::DpadUp, RawEvent::Axis { code: 1, value: 0.8 });
        match status {
            CaptureStatus::Committed { bound, .. } => assert_eq!(bound.len(), 2),
            other => panic!("expected commit, got {other:?}"),
        }
        let m = mapping(&resolver, id);
        assert_eq!(m.axis_code(0, L::DpadUp), Some((1, true)));
        assert_eq!(m.axis_code(0, L::DpadDown), Some((1, false)));
        assert!(m.is_dirty());
    }

    #[test]
    fn axis_capture_keeps_bound_opposite() {
        let store = MemoryStore::new();
        let mut seeded = InputMapping::new("pad");
        seeded.set_button(0, L::DpadDown, 12);
        store.save(&console_key("pad"), &seeded).expect("save");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);

        capture(&mut resolver, id, L::DpadUp, RawEvent::Axis { code: 1, value: 0.8 });
        let m = mapping(&resolver, id);
        assert_eq!(m.axis_code(0, L::DpadUp), Some((1, true)));
        assert_eq!(m.button_code(0, L::DpadDown), Some(12));
        assert_eq!(m.axis_code(0, L::DpadDown), None);
        assert_eq!(m.axis_id(0, 1, false), None);
    }

    #[test]
    fn axis_capture_without_opposite_binds_once() {
        let store = store_with_empty("pad");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);

        capture(&mut resolver, id, L::Start, RawEvent::Axis { code: 2, value: -1.0 });
        let m = mapping(&resolver, id);
        assert_eq!(m.bindings(0), vec![(L::Start, PhysicalBinding::Axis { code: 2, positive: false })]);
    }

    #[test]
    fn timeout_leaves_mapping_unchanged() {
        let store = MemoryStore::new();
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);
        let before = mapping(&resolver, id);

        let start = Instant::now();
        resolver.begin_capture_at(id, L::B, start).expect("capture starts");
        assert_eq!(
            resolver.poll_capture_at(start + Duration::from_secs(1)),
            CaptureStatus::Capturing {
                input: L::B,
                remaining: Duration::from_secs(4),
            }
        );
        assert_eq!(
            resolver.poll_capture_at(start + Duration::from_secs(5)),
            CaptureStatus::TimedOut { input: L::B }
        );
        assert!(!resolver.is_capturing());

        // A late input must not reach the closed session.
        resolver.registry().feed(id, RawEvent::Button { code: 9, pressed: true });
        assert_eq!(resolver.poll_capture_at(start + Duration::from_secs(6)), CaptureStatus::Idle);
        assert_eq!(mapping(&resolver, id), before);
    }

    #[test]
    fn cancel_closes_session_without_changes() {
        let store = store_with_empty("pad");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);

        resolver.begin_capture(id, L::X).expect("capture starts");
        assert_eq!(resolver.cancel_capture(), CaptureStatus::TimedOut { input: L::X });
        assert_eq!(resolver.cancel_capture(), CaptureStatus::Idle);
        assert!(mapping(&resolver, id).is_empty());
    }

    #[test]
    fn edits_are_rejected_while_capturing() {
        let store = store_with_empty("pad");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);

        resolver.begin_capture(id, L::X).expect("capture starts");
        assert!(matches!(resolver.begin_capture(id, L::Y), Err(ResolverError::CaptureInProgress)));
        assert!(matches!(resolver.unbind(id, L::Y), Err(ResolverError::CaptureInProgress)));
        assert!(matches!(
            resolver.resolve_for_profile(id, ControlProfile::Arcade),
            Err(ResolverError::CaptureInProgress)
        ));
    }

    #[test]
    fn capture_needs_a_known_device_with_a_mapping() {
        let store = MemoryStore::new();
        let (mut resolver, _) = open(&store, DeviceClass::Gamepad);
        assert!(matches!(resolver.begin_capture(99, L::A), Err(ResolverError::DeviceNotFound(99))));

        let stick = resolver.registry().attach_offline("stick", DeviceClass::Joystick).id;
        assert!(matches!(resolver.begin_capture(stick, L::A), Err(ResolverError::NoMapping(_))));
        let resolved = resolver
            .resolve_for_profile(stick, ControlProfile::Console)
            .expect("resolve");
        assert!(resolved.is_none());
        assert!(matches!(resolver.begin_capture(stick, L::A), Err(ResolverError::NoMapping(_))));
    }

    #[test]
    fn scalars_follow_to_the_other_profile() {
        let store = store_with_empty("pad");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);

        assert!(resolver.set_dead_zone(id, 0.3).expect("set"));
        assert!(resolver.set_rumble_power(id, 60).expect("set"));
        resolver.commit_scalars(id).expect("commit");

        let console = store.load(&console_key("pad")).expect("load").expect("console");
        assert!((console.dead_zone() - 0.3).abs() < f32::EPSILON);
        let arcade = store
            .load(&console_key("pad").other_profile())
            .expect("load")
            .expect("arcade mapping created");
        assert!((arcade.dead_zone() - 0.3).abs() < f32::EPSILON);
        assert_eq!(arcade.rumble_power(), 60);
        assert!(!mapping(&resolver, id).is_dirty());
    }

    #[test]
    fn unchanged_scalars_leave_other_profile_alone() {
        let store = store_with_empty("pad");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);

        assert!(!resolver.set_dead_zone(id, padbind_mapping::DEFAULT_DEAD_ZONE).expect("set"));
        resolver.commit_scalars(id).expect("commit");
        assert!(store.load(&console_key("pad").other_profile()).expect("load").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn binding_edit_does_not_touch_other_profile() {
        let store = store_with_empty("pad");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);

        capture(&mut resolver, id, L::A, RawEvent::Button { code: 3, pressed: true });
        resolver.commit_scalars(id).expect("commit");

        let console = store.load(&console_key("pad")).expect("load").expect("console");
        assert_eq!(console.button_code(0, L::A), Some(3));
        assert!(store.load(&console_key("pad").other_profile()).expect("load").is_none());
        assert!(!mapping(&resolver, id).is_dirty());
    }

    #[test]
    fn scalar_edit_updates_stored_other_profile() {
        let store = store_with_empty("pad");
        let mut arcade = InputMapping::new("pad");
        arcade.set_button(0, L::A, 4);
        store.save(&console_key("pad").other_profile(), &arcade).expect("save");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);

        resolver.set_saturation(id, 1.5).expect("set");
        resolver.commit_scalars(id).expect("commit");

        let arcade = store
            .load(&console_key("pad").other_profile())
            .expect("load")
            .expect("arcade");
        assert!((arcade.saturation() - 1.5).abs() < f32::EPSILON);
        assert_eq!(arcade.button_code(0, L::A), Some(4));
    }

    #[test]
    fn scalars_without_hardware_are_not_carried() {
        let store = store_with_empty("pad");
        let registry = DeviceRegistry::new();
        let info = DeviceInfo {
            supports_rumble: false,
            ..DeviceInfo::offline(1, "pad", DeviceClass::Gamepad)
        };
        registry.attach(info);
        let mut resolver = InputBindingResolver::new(registry, &store);
        resolver.resolve_for_profile(1, ControlProfile::Console).expect("resolve");

        resolver.set_rumble_power(1, 10).expect("set");
        resolver.set_saturation(1, 1.5).expect("set");
        resolver.commit_scalars(1).expect("commit");

        let arcade = store
            .load(&console_key("pad").other_profile())
            .expect("load")
            .expect("arcade mapping created");
        assert_eq!(arcade.rumble_power(), padbind_mapping::DEFAULT_RUMBLE_POWER);
        assert!((arcade.saturation() - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn arcade_falls_back_to_template_not_console_bindings() {
        let store = MemoryStore::new();
        let mut console = InputMapping::new("pad");
        console.set_button(0, L::A, 9);
        console.set_dead_zone(0.25);
        store.save(&console_key("pad"), &console).expect("save");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);

        let arcade = resolver
            .resolve_for_profile(id, ControlProfile::Arcade)
            .expect("resolve")
            .cloned()
            .expect("template mapping");
        let template = default_mapping("pad", ControlProfile::Arcade, TemplateKind::Gamepad);
        assert_eq!(arcade.bindings(0), template.bindings(0));
        assert_eq!(arcade.button_code(0, L::A), Some(StandardButton::A.code()));
        assert!((arcade.dead_zone() - 0.25).abs() < f32::EPSILON);
        assert!(!arcade.is_dirty());
        assert_eq!(resolver.active_profile(id), Some(ControlProfile::Arcade));
    }

    #[test]
    fn joystick_arcade_falls_back_to_console_copy() {
        let store = MemoryStore::new();
        let mut console = InputMapping::new("pad");
        console.set_button(0, L::A, 9);
        store.save(&console_key("pad"), &console).expect("save");
        let (mut resolver, id) = open(&store, DeviceClass::Joystick);

        let arcade = resolver
            .resolve_for_profile(id, ControlProfile::Arcade)
            .expect("resolve")
            .cloned()
            .expect("console copy");
        assert_eq!(arcade.button_code(0, L::A), Some(9));
    }

    #[test]
    fn switching_profile_saves_dirty_mapping() {
        let store = MemoryStore::new();
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);
        assert!(store.is_empty());

        resolver.unbind(id, L::Start).expect("unbind");
        resolver.resolve_for_profile(id, ControlProfile::Arcade).expect("resolve");

        let saved = store.load(&console_key("pad")).expect("load").expect("saved");
        assert_eq!(saved.button_code(0, L::Start), None);
        assert!(store.load(&console_key("pad").other_profile()).expect("load").is_none());
    }

    #[test]
    fn captures_go_to_the_selected_port() {
        let store = store_with_empty("pad");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);
        assert!(matches!(resolver.set_port(4), Err(ResolverError::InvalidPort(4))));
        resolver.set_port(2).expect("port");

        capture(&mut resolver, id, L::B, RawEvent::Button { code: 1, pressed: true });
        let m = mapping(&resolver, id);
        assert_eq!(m.button_code(0, L::B), None);
        assert_eq!(m.button_code(2, L::B), Some(1));
        assert_eq!(resolver.describe(id, L::B).as_deref(), Some("B"));
    }

    #[test]
    fn fixed_port_devices_ignore_port_selection() {
        let store = store_with_empty("pad");
        let registry = DeviceRegistry::new();
        registry.attach(DeviceInfo {
            port: PortAssignment::Fixed(1),
            ..DeviceInfo::offline(1, "pad", DeviceClass::Gamepad)
        });
        let mut resolver = InputBindingResolver::new(registry, &store);
        resolver.resolve_for_profile(1, ControlProfile::Console).expect("resolve");
        resolver.set_port(3).expect("port");

        assert_eq!(resolver.port_for(1), Some(1));
        capture(&mut resolver, 1, L::Y, RawEvent::Button { code: 3, pressed: true });
        assert_eq!(mapping(&resolver, 1).button_code(1, L::Y), Some(3));
    }

    #[test]
    fn per_game_mapping_round_trip() {
        let store = store_with_empty("pad");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);
        assert!(matches!(resolver.set_per_game(id, true), Err(ResolverError::NoGame)));

        resolver.set_game(Some("T1234"));
        resolver.set_per_game(id, true).expect("enable");
        assert!(resolver.is_per_game(id));
        let game_key = console_key("pad").with_game(Some("T1234"));
        assert!(store.load(&game_key).expect("load").is_some());

        capture(&mut resolver, id, L::A, RawEvent::Button { code: 2, pressed: true });
        resolver.save(id).expect("save");
        let game = store.load(&game_key).expect("load").expect("game mapping");
        assert_eq!(game.button_code(0, L::A), Some(2));
        let global = store.load(&console_key("pad")).expect("load").expect("global");
        assert_eq!(global.button_code(0, L::A), None);

        resolver.resolve_for_profile(id, ControlProfile::Console).expect("resolve");
        assert!(resolver.is_per_game(id));

        resolver.set_per_game(id, false).expect("disable");
        assert!(!resolver.is_per_game(id));
        assert!(store.load(&game_key).expect("load").is_none());
        assert_eq!(mapping(&resolver, id).button_code(0, L::A), None);
    }

    #[test]
    fn per_game_mapping_keeps_its_game_after_game_changes() {
        let store = store_with_empty("pad");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);
        resolver.set_game(Some("T1"));
        resolver.set_per_game(id, true).expect("enable");
        capture(&mut resolver, id, L::A, RawEvent::Button { code: 7, pressed: true });

        resolver.set_game(None);
        resolver.save(id).expect("save");
        assert!(resolver.is_per_game(id));
        let global = store.load(&console_key("pad")).expect("load").expect("global");
        assert_eq!(global.button_code(0, L::A), None);
        let game_key = console_key("pad").with_game(Some("T1"));
        let game = store.load(&game_key).expect("load").expect("game mapping");
        assert_eq!(game.button_code(0, L::A), Some(7));

        resolver.set_game(Some("T2"));
        resolver.unbind(id, L::A).expect("unbind");
        resolver.finish().expect("finish");
        let game = store.load(&game_key).expect("load").expect("game mapping");
        assert_eq!(game.button_code(0, L::A), None);
        assert!(store.load(&console_key("pad").with_game(Some("T2"))).expect("load").is_none());

        resolver.set_per_game(id, false).expect("disable");
        assert!(!resolver.is_per_game(id));
        assert!(store.load(&game_key).expect("load").is_none());
    }

    #[test]
    fn reset_uses_template_and_keeps_scalars() {
        let store = store_with_empty("pad");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);
        resolver.set_saturation(id, 1.25).expect("set");

        resolver.reset_to_default(id, TemplateKind::ArcadeStick).expect("reset");
        let m = mapping(&resolver, id);
        assert!(!m.is_dirty());
        assert_eq!(m.button_code(0, L::LeftTrigger), Some(StandardButton::LeftShoulder.code()));
        assert!((m.saturation() - 1.25).abs() < f32::EPSILON);

        let saved = store.load(&console_key("pad")).expect("load").expect("saved");
        assert_eq!(saved, m);
    }

    #[test]
    fn describe_uses_device_names() {
        let store = MemoryStore::new();
        let (resolver, id) = open(&store, DeviceClass::Gamepad);
        assert_eq!(resolver.describe(id, L::AxisUp).as_deref(), Some("Left Stick Y-"));
        assert_eq!(resolver.describe(id, L::Start).as_deref(), Some("Start"));
        assert_eq!(resolver.describe(id, L::Screenshot), None);
        assert_eq!(StandardAxis::LeftY.code(), 1);
    }

    #[test]
    fn describe_falls_back_to_codes() {
        let store = store_with_empty("pad");
        let (mut resolver, id) = open(&store, DeviceClass::Joystick);
        capture(&mut resolver, id, L::AxisLeft, RawEvent::Axis { code: 3, value: -0.7 });
        capture(&mut resolver, id, L::Start, RawEvent::Button { code: 11, pressed: true });

        assert_eq!(resolver.describe(id, L::AxisLeft).as_deref(), Some("[3]-"));
        assert_eq!(resolver.describe(id, L::AxisRight).as_deref(), Some("[3]+"));
        assert_eq!(resolver.describe(id, L::Start).as_deref(), Some("[11]"));
    }

    #[test]
    fn finish_saves_changed_mappings() {
        let store = store_with_empty("pad");
        let (mut resolver, id) = open(&store, DeviceClass::Gamepad);
        capture(&mut resolver, id, L::Z, RawEvent::Button { code: 10, pressed: true });
        resolver.begin_capture(id, L::C).expect("capture starts");

        resolver.finish().expect("finish");
        assert!(!resolver.is_capturing());
        let saved = store.load(&console_key("pad")).expect("load").expect("saved");
        assert_eq!(saved.button_code(0, L::Z), Some(10));
        assert_eq!(saved.button_code(0, L::C), None);
    }

    #[test]
    fn settings_configure_timeout_port_and_game() {
        let store = MemoryStore::new();
        let settings = Settings {
            detect_timeout: Duration::from_secs(2),
            port: 3,
            game: Some("MVSC2".into()),
            profile: ControlProfile::Arcade,
        };
        let resolver = InputBindingResolver::with_settings(DeviceRegistry::new(), &store, &settings);
        assert_eq!(resolver.timeout(), Duration::from_secs(2));
        assert_eq!(resolver.port(), 3);
        assert_eq!(resolver.game(), Some("MVSC2"));
    }
}
