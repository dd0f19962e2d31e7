//! Link liveness monitoring
//!
//! The central half beacons a heartbeat once a second. The monitor
//! accumulates silence between beacons; past the timeout the link is
//! reported down and the sidebar switches to the disconnected glyph.

use crate::status::LinkState;

/// Beacon interval the central half transmits at
pub const HEARTBEAT_INTERVAL_MS: u32 = 1_000;

/// Silence after which the link is considered down
///
/// Three missed beacons plus slack, so a single lost frame never flaps
/// the icon.
pub const LINK_TIMEOUT_MS: u32 = 3_000;

/// Tracks time since the last heartbeat
pub struct LinkMonitor {
    /// Milliseconds of silence so far, saturating
    silence_ms: u32,
    /// Sequence number of the last beacon, for gap accounting
    last_seq: Option<u8>,
}

impl Default for LinkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkMonitor {
    /// Create a monitor that reports `Disconnected` until the first
    /// heartbeat arrives
    pub const fn new() -> Self {
        Self {
            silence_ms: LINK_TIMEOUT_MS,
            last_seq: None,
        }
    }

    /// Record a heartbeat
    ///
    /// Returns how many beacons were missed since the previous one
    /// (0 when on schedule), which the caller may log.
    pub fn heartbeat(&mut self, seq: u8) -> u8 {
        let missed = match self.last_seq {
            Some(prev) => seq.wrapping_sub(prev).saturating_sub(1),
            None => 0,
        };
        self.last_seq = Some(seq);
        self.silence_ms = 0;
        missed
    }

    /// Advance the silence clock by elapsed milliseconds
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.silence_ms = self.silence_ms.saturating_add(elapsed_ms);
    }

    /// Current link verdict
    pub fn state(&self) -> LinkState {
        if self.silence_ms >= LINK_TIMEOUT_MS {
            LinkState::Disconnected
        } else {
            LinkState::Connected
        }
    }
}
