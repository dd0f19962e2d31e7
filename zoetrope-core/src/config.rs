//! Configuration types
//!
//! Build-time tunables with their defaults. The one exposed knob is the
//! rotation interval, which the firmware's build script can override;
//! everything else in the module is compiled in.

/// Default rotation interval between art frames (10 minutes)
pub const DEFAULT_INTERVAL_MS: u32 = 600_000;

/// Slideshow timing configuration
///
/// The interval is fixed for the life of a slideshow instance; there is
/// no runtime reconfiguration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlideshowConfig {
    /// Delay between frame changes in milliseconds, always positive
    /// (validated where the override enters, in the firmware build script)
    pub interval_ms: u32,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl SlideshowConfig {
    /// Configuration with an explicit interval
    pub const fn with_interval_ms(interval_ms: u32) -> Self {
        Self { interval_ms }
    }
}
