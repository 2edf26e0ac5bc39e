use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::events::RawInput;

#[derive(Debug, Default)]
struct Slot {
    armed: AtomicBool,
    captured: Mutex<Option<RawInput>>,
}

/// Single-slot handoff between a driver thread and the UI thread.
///
/// The slot is armed on creation and keeps only the first input offered to it.
/// Clones share the same slot: the registry keeps one to feed it, the
/// resolver keeps one to poll it.
#[derive(Debug, Clone)]
pub struct CaptureSlot {
    inner: Arc<Slot>,
}

impl Default for CaptureSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSlot {
    /// Creates an armed, empty slot.
    pub fn new() -> Self {
        let inner = Slot {
            armed: AtomicBool::new(true),
            captured: Mutex::new(None),
        };
        Self { inner: Arc::new(inner) }
    }

    /// Offers an input from the producer side.
    /// Returns `true` if the input was recorded.
    pub fn offer(&self, input: RawInput) -> bool {
        if !self.inner.armed.swap(false, Ordering::AcqRel) {
            return false;
        }
        if let Ok(mut slot) = self.inner.captured.lock() {
            *slot = Some(input);
            return true;
        }
        false
    }

    /// Takes the recorded input, if any. Never blocks on an empty slot.
    pub fn take(&self) -> Option<RawInput> {
        self.inner.captured.lock().ok().and_then(|mut slot| slot.take())
    }

    /// Whether the slot still waits for an input.
    pub fn is_armed(&self) -> bool {
        self.inner.armed.load(Ordering::Acquire)
    }

    /// Stops accepting inputs. Anything offered later is dropped.
    pub fn disarm(&self) {
        self.inner.armed.store(false, Ordering::Release);
    }
}
