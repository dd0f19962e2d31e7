//! Frame sink port
//!
//! Where selected frame indices go. The firmware's sink resolves an index
//! against the embedded art catalog and blits it into the screen buffer;
//! test sinks just record what they were asked to show.

/// Frame sink errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// Frame index outside the catalog
    UnknownFrame,
    /// Rendering into the target failed
    Render,
}

/// Receiver for selected frame indices
pub trait FrameSink {
    /// Clear the previous art content and present the given frame
    ///
    /// Called from the display task only, between status redraws, and must
    /// return promptly - the rotation cadence is minutes, not frames per
    /// second.
    fn show_frame(&mut self, index: u8) -> Result<(), SinkError>;
}
