use anyhow::{anyhow, Result};
use opencv::{
    core,
    imgproc,
    prelude::*,
    videoio,
};
use std::path::Path;

use super::{FrameData, FrameSource};

/// OpenCV-backed video decoder. The underlying `VideoCapture` releases its
/// backend handle on drop, so the capture is freed exactly once no matter
/// how the read loop ends.
pub struct VideoDecoder {
    capture: videoio::VideoCapture,
}

impl VideoDecoder {
    pub fn open(path: &Path) -> Result<Self> {
        // CAP_ANY lets OpenCV choose the backend
        // macOS: AVFoundation, Windows: Media Foundation, Linux: V4L2/GStreamer
        let capture = videoio::VideoCapture::from_file(&path.to_string_lossy(), videoio::CAP_ANY)?;

        if !capture.is_opened()? {
            return Err(anyhow!("Failed to open video file: {}", path.display()));
        }

        let fps = capture.get(videoio::CAP_PROP_FPS)?;
        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;
        log::debug!("Opened {}: {}x{} @ {:.2} fps", path.display(), width, height, fps);

        Ok(Self { capture })
    }
}

impl FrameSource for VideoDecoder {
    fn next_frame(&mut self) -> Result<Option<FrameData>> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? {
            return Ok(None); // EOF
        }
        if frame.empty() {
            return Ok(None);
        }

        // OpenCV decodes to BGR; frames are persisted as RGB
        let mut rgb = Mat::default();
        imgproc::cvt_color(&frame, &mut rgb, imgproc::COLOR_BGR2RGB, 0,
                          core::AlgorithmHint::ALGO_HINT_DEFAULT)?;

        if !rgb.is_continuous() {
            return Err(anyhow!("Frame data is not continuous"));
        }

        let width = rgb.cols() as u32;
        let height = rgb.rows() as u32;
        let buffer = rgb.data_bytes()?.to_vec();

        Ok(Some(FrameData::new(buffer, width, height)))
    }
}
