//! Board-agnostic core logic for the Zoetrope display module
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Slideshow sequencing (no-repeat random frame rotation)
//! - Peripheral status model (battery, split link)
//! - Link frame parsing and liveness monitoring
//! - Ports implemented by the firmware (random source, frame sink)
//!
//! Nothing here allocates or touches a clock, so the whole crate runs in
//! host tests as well as on the target.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod link;
pub mod sequencer;
pub mod status;
pub mod traits;
