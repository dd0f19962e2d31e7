//! Rendering layer for the Zoetrope display module
//!
//! Pure [`embedded-graphics`](embedded_graphics) drawing over any monochrome
//! [`DrawTarget`](embedded_graphics::draw_target::DrawTarget). The firmware
//! hands in its framebuffer, the tests hand in mock targets; nothing in here
//! touches hardware.
//!
//! The 160x68 panel is split into two regions:
//!
//! * [`layout::art_region`]: the left 140 px, where catalog frames are blitted
//! * [`layout::sidebar_region`]: the right 20 px, owned by the status bar

#![no_std]
#![deny(unsafe_code)]

pub mod art;
pub mod layout;
pub mod statusbar;

#[cfg(test)]
pub(crate) mod test_target;
