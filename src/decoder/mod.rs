pub mod video;

pub use video::VideoDecoder;

use anyhow::Result;

/// One decoded raster frame (tightly packed RGB, row-major).
#[derive(Clone)]
pub struct FrameData {
    pub buffer: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl FrameData {
    pub fn new(buffer: Vec<u8>, width: u32, height: u32) -> Self {
        Self { buffer, width, height }
    }
}

/// Sequential source of decoded frames.
///
/// `next_frame` yields frames in stream order and returns `Ok(None)` at end
/// of stream. Implemented by [`VideoDecoder`] for real videos; sampler tests
/// drive the loop with synthetic sources instead.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<FrameData>>;
}
