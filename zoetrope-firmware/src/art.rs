//! Art catalog
//!
//! Thirty 140x68 1-bit frames baked into flash. `include_bytes!` against
//! the typed length keeps an undersized or oversized asset from slipping
//! past the build.

use zoetrope_core::traits::{FrameSink, SinkError};
use zoetrope_display::art::{draw_frame, FRAME_DATA_LEN};

use crate::lcd::SharpLcd;

/// Number of frames in the catalog.
pub const FRAME_COUNT: usize = 30;

/// Raw frame data, indexed by catalog position.
static FRAMES: [&[u8; FRAME_DATA_LEN]; FRAME_COUNT] = [
    include_bytes!("../assets/frames/frame_00.raw"),
    include_bytes!("../assets/frames/frame_01.raw"),
    include_bytes!("../assets/frames/frame_02.raw"),
    include_bytes!("../assets/frames/frame_03.raw"),
    include_bytes!("../assets/frames/frame_04.raw"),
    include_bytes!("../assets/frames/frame_05.raw"),
    include_bytes!("../assets/frames/frame_06.raw"),
    include_bytes!("../assets/frames/frame_07.raw"),
    include_bytes!("../assets/frames/frame_08.raw"),
    include_bytes!("../assets/frames/frame_09.raw"),
    include_bytes!("../assets/frames/frame_10.raw"),
    include_bytes!("../assets/frames/frame_11.raw"),
    include_bytes!("../assets/frames/frame_12.raw"),
    include_bytes!("../assets/frames/frame_13.raw"),
    include_bytes!("../assets/frames/frame_14.raw"),
    include_bytes!("../assets/frames/frame_15.raw"),
    include_bytes!("../assets/frames/frame_16.raw"),
    include_bytes!("../assets/frames/frame_17.raw"),
    include_bytes!("../assets/frames/frame_18.raw"),
    include_bytes!("../assets/frames/frame_19.raw"),
    include_bytes!("../assets/frames/frame_20.raw"),
    include_bytes!("../assets/frames/frame_21.raw"),
    include_bytes!("../assets/frames/frame_22.raw"),
    include_bytes!("../assets/frames/frame_23.raw"),
    include_bytes!("../assets/frames/frame_24.raw"),
    include_bytes!("../assets/frames/frame_25.raw"),
    include_bytes!("../assets/frames/frame_26.raw"),
    include_bytes!("../assets/frames/frame_27.raw"),
    include_bytes!("../assets/frames/frame_28.raw"),
    include_bytes!("../assets/frames/frame_29.raw"),
];

/// Look up a frame by catalog index.
pub fn frame_data(index: u8) -> Option<&'static [u8; FRAME_DATA_LEN]> {
    FRAMES.get(usize::from(index)).copied()
}

impl FrameSink for SharpLcd<'_> {
    fn show_frame(&mut self, index: u8) -> Result<(), SinkError> {
        let data = frame_data(index).ok_or(SinkError::UnknownFrame)?;
        match draw_frame(self, data) {
            Ok(()) => Ok(()),
            Err(never) => match never {},
        }
    }
}
