use std::time::{Duration, Instant};

use padbind_gamepad::{CaptureSlot, DeviceId};
use padbind_mapping::LogicalInput;

use crate::commit::Bound;

/// An open detection window waiting for the user to actuate a control.
#[derive(Debug)]
pub(crate) struct DetectionSession {
    pub(crate) device: DeviceId,
    pub(crate) input: LogicalInput,
    pub(crate) port: u8,
    pub(crate) start: Instant,
    pub(crate) slot: CaptureSlot,
}

impl DetectionSession {
    /// Time left before the session expires, or `None` once it has.
    pub(crate) fn remaining(&self, now: Instant, timeout: Duration) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.start);
        timeout.checked_sub(elapsed).filter(|left| !left.is_zero())
    }
}

/// What a poll observed.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureStatus {
    /// No session is open.
    Idle,
    /// Still waiting for a physical input.
    Capturing {
        input: LogicalInput,
        remaining: Duration,
    },
    /// A physical input was bound. The session is closed.
    Committed { input: LogicalInput, bound: Bound },
    /// The window expired or was cancelled without changes. The session is closed.
    TimedOut { input: LogicalInput },
}

impl CaptureStatus {
    /// Whether the session is still open.
    pub fn is_capturing(&self) -> bool {
        matches!(self, CaptureStatus::Capturing { .. })
    }
}
