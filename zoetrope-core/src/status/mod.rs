//! Peripheral status model
//!
//! What the sidebar renders: the half's own battery and the split-link
//! state. Pure value types with a pure transition, so redraw decisions in
//! the firmware are a plain equality check.

pub mod battery;
pub mod state;

pub use battery::{percent_from_mv, BatteryFilter};
pub use state::{BatteryStatus, LinkState, StatusEvent, StatusState};
