//! Split-link wire frames
//!
//! Fixed four-byte frames in both directions:
//!
//! - SOF (1 byte): 0xA5 synchronization byte
//! - KIND (1 byte): frame kind identifier
//! - ARG (1 byte): kind-specific argument, 0 when unused
//! - CHECK (1 byte): XOR of KIND and ARG
//!
//! The fixed length keeps the peripheral's receive path allocation-free
//! and lets the parser resynchronize within one frame of garbage.

/// Frame synchronization byte
pub const FRAME_SOF: u8 = 0xA5;

/// Encoded frame length on the wire
pub const FRAME_LEN: usize = 4;

const KIND_HEARTBEAT: u8 = 0x01;
const KIND_SLEEP: u8 = 0x02;
const KIND_WAKE: u8 = 0x03;
const KIND_BATTERY: u8 = 0x04;

/// Errors from frame parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Checksum mismatch, frame dropped
    BadChecksum,
    /// Well-formed frame with a kind this firmware does not know
    UnknownKind,
}

/// Link frame kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkFrame {
    /// Periodic liveness beacon with a rolling sequence number
    Heartbeat { seq: u8 },
    /// Blank the display and stop the slideshow
    Sleep,
    /// Bring the display back up (fresh slideshow sequence)
    Wake,
    /// Battery percent report, peripheral to central
    Battery { percent: u8 },
}

impl LinkFrame {
    fn kind_arg(&self) -> (u8, u8) {
        match *self {
            LinkFrame::Heartbeat { seq } => (KIND_HEARTBEAT, seq),
            LinkFrame::Sleep => (KIND_SLEEP, 0),
            LinkFrame::Wake => (KIND_WAKE, 0),
            LinkFrame::Battery { percent } => (KIND_BATTERY, percent),
        }
    }

    fn from_kind_arg(kind: u8, arg: u8) -> Result<Self, FrameError> {
        match kind {
            KIND_HEARTBEAT => Ok(LinkFrame::Heartbeat { seq: arg }),
            KIND_SLEEP => Ok(LinkFrame::Sleep),
            KIND_WAKE => Ok(LinkFrame::Wake),
            KIND_BATTERY => Ok(LinkFrame::Battery { percent: arg }),
            _ => Err(FrameError::UnknownKind),
        }
    }

    /// Encode this frame for the wire
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let (kind, arg) = self.kind_arg();
        [FRAME_SOF, kind, arg, kind ^ arg]
    }
}

/// Byte-at-a-time parser for link frames
///
/// Bytes outside a frame are discarded until the next SOF; a checksum
/// failure drops the frame and returns to hunting for SOF, so at most one
/// valid frame is lost to a burst of line noise.
#[derive(Debug, Clone, Copy)]
pub struct FrameParser {
    state: ParseState,
}

#[derive(Debug, Clone, Copy)]
enum ParseState {
    AwaitSof,
    AwaitKind,
    AwaitArg { kind: u8 },
    AwaitCheck { kind: u8, arg: u8 },
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub const fn new() -> Self {
        Self {
            state: ParseState::AwaitSof,
        }
    }

    /// Feed one received byte
    ///
    /// Returns `Ok(Some(frame))` when the byte completes a valid frame,
    /// `Ok(None)` while mid-frame or hunting for SOF.
    pub fn feed(&mut self, byte: u8) -> Result<Option<LinkFrame>, FrameError> {
        match self.state {
            ParseState::AwaitSof => {
                if byte == FRAME_SOF {
                    self.state = ParseState::AwaitKind;
                }
                Ok(None)
            }
            ParseState::AwaitKind => {
                self.state = ParseState::AwaitArg { kind: byte };
                Ok(None)
            }
            ParseState::AwaitArg { kind } => {
                self.state = ParseState::AwaitCheck { kind, arg: byte };
                Ok(None)
            }
            ParseState::AwaitCheck { kind, arg } => {
                self.state = ParseState::AwaitSof;
                if byte != kind ^ arg {
                    return Err(FrameError::BadChecksum);
                }
                LinkFrame::from_kind_arg(kind, arg).map(Some)
            }
        }
    }
}
