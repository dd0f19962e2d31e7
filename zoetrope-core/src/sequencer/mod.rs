//! Slideshow sequencing
//!
//! A no-repeat random rotation over the fixed frame catalog: `Sequencer`
//! owns the shuffled order and reshuffles on exhaustion, `Slideshow`
//! couples it to the renderer port and the bring-up rules.

pub mod order;
pub mod slideshow;

pub use order::{Sequencer, SequencerError};
pub use slideshow::{Slideshow, SlideshowError};
