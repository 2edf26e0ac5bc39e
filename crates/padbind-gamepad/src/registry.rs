use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use ahash::AHashMap;
use crossbeam_channel::{unbounded, Sender};

use crate::capture::CaptureSlot;
use crate::error::{Error, Result};
use crate::events::{DeviceEvent, EventReceiver, RawEvent, RawInput};
use crate::types::{DeviceClass, DeviceId, DeviceInfo};

/// First id handed out to devices attached without a backend.
const OFFLINE_ID_BASE: DeviceId = 0x8000_0000;

/// Source of connected devices and raw input detection.
pub trait GamepadRegistry {
    /// Returns a snapshot of a device by id if it is currently known.
    fn device(&self, id: DeviceId) -> Option<DeviceInfo>;

    /// Returns a snapshot of currently known devices.
    fn devices(&self) -> Vec<DeviceInfo>;

    /// Arms a one-shot detection on the device.
    /// The first qualifying input it reports is written to the returned slot.
    fn detect_input(&self, id: DeviceId) -> Result<CaptureSlot>;
}

/// Shared state used by the registry, the backend loop and cloned handles.
pub(crate) struct Inner {
    pub subscribers: Mutex<Vec<Sender<DeviceEvent>>>,
    pub devices: RwLock<AHashMap<DeviceId, DeviceInfo>>,
    pub captures: Mutex<AHashMap<DeviceId, CaptureSlot>>,
    next_offline_id: AtomicU32,
}

/// Registry of connected devices. Backends feed it, the mapping editor reads it.
#[derive(Clone)]
pub struct DeviceRegistry {
    pub(crate) inner: Arc<Inner>,
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceRegistry {
    /// Creates an empty registry with no backend attached.
    pub fn new() -> Self {
        let inner = Arc::new(Inner {
            subscribers: Mutex::new(Vec::new()),
            devices: RwLock::new(AHashMap::new()),
            captures: Mutex::new(AHashMap::new()),
            next_offline_id: AtomicU32::new(OFFLINE_ID_BASE),
        });
        Self { inner }
    }

    /// Creates a registry and starts the SDL2 backend thread.
    /// Blocks briefly until the initial device enumeration completes (up to 1s).
    #[cfg(feature = "sdl2-backend")]
    pub fn with_backend() -> Result<Self> {
        let registry = Self::new();
        let (ready_tx, ready_rx) = std::sync::mpsc::channel();
        crate::runtime::start_runtime_thread(registry.clone(), ready_tx);

        match ready_rx.recv_timeout(std::time::Duration::from_secs(1)) {
            Ok(Ok(())) => Ok(registry),
            Ok(Err(e)) => Err(e),
            // Enumeration is slow, but the thread is alive.
            Err(_) => Ok(registry),
        }
    }

    #[cfg(not(feature = "sdl2-backend"))]
    pub fn with_backend() -> Result<Self> {
        Err(Error::NoBackend)
    }

    /// Subscribes to device events. Dropped subscribers are cleaned automatically.
    pub fn subscribe(&self) -> EventReceiver {
        let (tx, rx) = unbounded();
        if let Ok(mut subs) = self.inner.subscribers.lock() {
            subs.push(tx);
        }
        rx
    }

    /// Registers a connected device.
    pub fn attach(&self, info: DeviceInfo) {
        log::debug!("device attached - {} id={}", info.name, info.id);
        if let Ok(mut map) = self.inner.devices.write() {
            map.insert(info.id, info.clone());
        }
        self.broadcast(DeviceEvent::Connected(info));
    }

    /// Registers a device that is not backed by hardware, under a fresh id.
    pub fn attach_offline(&self, unique_id: &str, class: DeviceClass) -> DeviceInfo {
        let id = self.inner.next_offline_id.fetch_add(1, Ordering::Relaxed);
        let info = DeviceInfo::offline(id, unique_id, class);
        self.attach(info.clone());
        info
    }

    /// Forgets a device and cancels any pending detection on it.
    pub fn detach(&self, id: DeviceId) {
        log::debug!("device detached - id={id}");
        if let Ok(mut map) = self.inner.devices.write() {
            map.remove(&id);
        }
        if let Ok(mut captures) = self.inner.captures.lock() {
            if let Some(slot) = captures.remove(&id) {
                slot.disarm();
            }
        }
        self.broadcast(DeviceEvent::Disconnected(id));
    }

    /// Feeds a raw signal from a driver. Safe to call from any thread.
    pub fn feed(&self, id: DeviceId, event: RawEvent) {
        if let Some(input) = RawInput::from_event(event) {
            if let Ok(mut captures) = self.inner.captures.lock() {
                if let Some(slot) = captures.get(&id) {
                    if slot.offer(input) || !slot.is_armed() {
                        captures.remove(&id);
                    }
                }
            }
        }
        self.broadcast(DeviceEvent::Input { id, event });
    }

    /// Finds a device by its stable identity.
    pub fn find_by_unique_id(&self, unique_id: &str) -> Option<DeviceInfo> {
        let map = self.inner.devices.read().ok()?;
        map.values().find(|d| &*d.unique_id == unique_id).cloned()
    }

    fn broadcast(&self, event: DeviceEvent) {
        if let Ok(mut subs) = self.inner.subscribers.lock() {
            subs.retain(|tx| tx.send(event.clone()).is_ok());
        }
    }
}

impl GamepadRegistry for DeviceRegistry {
    fn device(&self, id: DeviceId) -> Option<DeviceInfo> {
        let map = self.inner.devices.read().ok()?;
        map.get(&id).cloned()
    }

    fn devices(&self) -> Vec<DeviceInfo> {
        if let Ok(map) = self.inner.devices.read() {
            let mut devices: Vec<DeviceInfo> = map.values().cloned().collect();
            devices.sort_by_key(|d| d.id);
            return devices;
        }
        Vec::new()
    }

    fn detect_input(&self, id: DeviceId) -> Result<CaptureSlot> {
        if self.device(id).is_none() {
            return Err(Error::NotFound(id));
        }
        let slot = CaptureSlot::new();
        let mut captures = self
            .inner
            .captures
            .lock()
            .map_err(|e| Error::Backend(format!("{e}")))?;
        if let Some(previous) = captures.insert(id, slot.clone()) {
            previous.disarm();
        }
        Ok(slot)
    }
}
