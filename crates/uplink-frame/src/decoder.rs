//! The frame decoder entry points.

use tracing::debug;

use crate::layout::LayoutVersion;
use crate::result::DecodeResult;
use crate::uplink::Uplink;

/// Decode a frame into named fields and diagnostics.
///
/// Never fails: a frame below the layout's minimum length yields a result
/// with a single error and no fields.
pub fn decode(frame: &[u8], layout: LayoutVersion) -> DecodeResult {
    match Uplink::parse(frame, layout) {
        Ok(uplink) => uplink.to_result(),
        Err(err) => {
            debug!(%layout, len = frame.len(), "rejected frame: {}", err);
            DecodeResult::rejected(&err)
        }
    }
}

/// A decoder bound to one layout.
///
/// Holds no state between calls; share it freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDecoder {
    layout: LayoutVersion,
}

impl FrameDecoder {
    /// Create a decoder for the given layout.
    pub fn new(layout: LayoutVersion) -> Self {
        FrameDecoder { layout }
    }

    /// The layout this decoder applies.
    pub fn layout(&self) -> LayoutVersion {
        self.layout
    }

    /// Decode a frame. See [`decode`].
    pub fn decode(&self, frame: &[u8]) -> DecodeResult {
        decode(frame, self.layout)
    }
}

impl From<LayoutVersion> for FrameDecoder {
    fn from(layout: LayoutVersion) -> Self {
        FrameDecoder::new(layout)
    }
}
