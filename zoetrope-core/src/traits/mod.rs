//! Ports implemented by the firmware
//!
//! These traits define the interface between the sequencing logic and the
//! platform: where randomness comes from and where selected frames go.

pub mod random;
pub mod sink;

pub use random::{RandomError, RandomSource};
pub use sink::{FrameSink, SinkError};
