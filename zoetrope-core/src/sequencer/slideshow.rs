//! Slideshow driver
//!
//! Couples the sequencer to the renderer port and owns the bring-up
//! rules. `start` is the only constructor: first shuffle, then the first
//! frame immediately, so the display is never blank for a whole rotation
//! interval after power-up. Cadence belongs to the caller - the firmware
//! arms a periodic timer with `interval_ms` and calls `tick` on each
//! fire, host tests call it directly.

use crate::config::SlideshowConfig;
use crate::sequencer::{Sequencer, SequencerError};
use crate::traits::{FrameSink, RandomError, RandomSource, SinkError};

/// Errors from slideshow operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlideshowError {
    /// The catalog has no frames
    EmptyCatalog,
    /// The random source failed; no degraded order is substituted
    Entropy(RandomError),
    /// The sink rejected the frame; the sequence has still advanced
    Sink(SinkError),
}

impl From<SequencerError> for SlideshowError {
    fn from(err: SequencerError) -> Self {
        match err {
            SequencerError::EmptyCatalog => SlideshowError::EmptyCatalog,
            SequencerError::Entropy(e) => SlideshowError::Entropy(e),
        }
    }
}

/// A running slideshow over `N` frames
///
/// Existence implies successful bring-up: an empty catalog or a dead
/// random source fails `start` and no instance is handed back. Dropping
/// the value cancels the slideshow; `start` may be called again later and
/// produces a fresh sequence.
pub struct Slideshow<const N: usize> {
    seq: Sequencer<N>,
    config: SlideshowConfig,
}

impl<const N: usize> Slideshow<N> {
    /// Bring the slideshow up and show the first frame
    ///
    /// Performs the initial shuffle and one synchronous tick on the fresh
    /// order. The caller arms the periodic schedule with `interval_ms`
    /// afterwards. Any failure - no frames, no entropy, sink refusal -
    /// aborts bring-up entirely.
    pub fn start<R, S>(
        config: SlideshowConfig,
        rng: &mut R,
        sink: &mut S,
    ) -> Result<Self, SlideshowError>
    where
        R: RandomSource + ?Sized,
        S: FrameSink + ?Sized,
    {
        let mut seq = Sequencer::new();
        seq.reshuffle(rng)?;
        let mut show = Self { seq, config };
        show.tick(rng, sink)?;
        Ok(show)
    }

    /// Advance to the next frame and hand it to the sink
    ///
    /// Returns the frame index shown. On sink failure the sequence has
    /// already advanced: the frame is skipped rather than replayed on the
    /// next tick, keeping the cadence and the no-repeat bookkeeping
    /// intact.
    pub fn tick<R, S>(&mut self, rng: &mut R, sink: &mut S) -> Result<u8, SlideshowError>
    where
        R: RandomSource + ?Sized,
        S: FrameSink + ?Sized,
    {
        let index = self.seq.next(rng)?;
        sink.show_frame(index).map_err(SlideshowError::Sink)?;
        Ok(index)
    }

    /// Rotation interval the caller should schedule ticks at
    pub fn interval_ms(&self) -> u32 {
        self.config.interval_ms
    }

    /// Position within the current cycle, for progress logging
    pub fn cursor(&self) -> usize {
        self.seq.cursor()
    }
}
