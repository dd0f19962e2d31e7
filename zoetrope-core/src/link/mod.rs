//! Split-link plumbing
//!
//! The display half hangs off the central keyboard half over a wired
//! UART. `frame` is the four-byte wire format, `monitor` turns heartbeat
//! arrivals (or their absence) into the sidebar's link state.

pub mod frame;
pub mod monitor;

pub use frame::{FrameError, FrameParser, LinkFrame, FRAME_LEN, FRAME_SOF};
pub use monitor::{LinkMonitor, HEARTBEAT_INTERVAL_MS, LINK_TIMEOUT_MS};
