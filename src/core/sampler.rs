use anyhow::{Context, Result};
use image::RgbImage;
use std::path::Path;

use crate::decoder::{FrameData, FrameSource, VideoDecoder};

/// Frames extracted directly next to their source video.
pub const FLAT_IMAGE_EXT: &str = "png";
/// Frames extracted into a labeled training run.
pub const RUN_IMAGE_EXT: &str = "jpg";

/// Persists every `interval`-th frame of one video into an output directory.
/// The walker drives this once per discovered video; tests substitute a
/// recording implementation.
pub trait Sampler {
    fn sample(&self, video_path: &Path, output_dir: &Path, interval: u32, prefix: &str)
        -> Result<usize>;
}

/// Production sampler: OpenCV decode, `image` crate encode.
pub struct FrameSampler {
    image_ext: &'static str,
}

impl FrameSampler {
    pub fn new(image_ext: &'static str) -> Self {
        Self { image_ext }
    }
}

impl Sampler for FrameSampler {
    fn sample(
        &self,
        video_path: &Path,
        output_dir: &Path,
        interval: u32,
        prefix: &str,
    ) -> Result<usize> {
        let decoder = match VideoDecoder::open(video_path) {
            Ok(decoder) => decoder,
            Err(err) => {
                // An unreadable source behaves as an empty frame stream
                log::warn!("Skipping unreadable video {}: {:#}", video_path.display(), err);
                return Ok(0);
            }
        };

        let saved = sample_frames(decoder, output_dir, interval, prefix, self.image_ext)?;
        println!(
            "✅ Finished {}: {} frame(s) saved",
            video_path.display(),
            saved
        );
        Ok(saved)
    }
}

/// Decode-and-save loop. A video of F decodable frames yields exactly
/// ceil(F / interval) images, at indices 0, interval, 2*interval, ...
///
/// Decode errors mid-stream end the loop like a normal end of stream; only
/// filesystem write failures propagate.
pub fn sample_frames(
    mut source: impl FrameSource,
    output_dir: &Path,
    interval: u32,
    prefix: &str,
    image_ext: &str,
) -> Result<usize> {
    let interval = interval.max(1); // interval 0 would panic on modulo
    let mut frame_num: u32 = 0;
    let mut saved = 0;

    loop {
        match source.next_frame() {
            Ok(Some(frame)) => {
                if frame_num % interval == 0 {
                    let output_path = output_dir.join(frame_file_name(prefix, frame_num, image_ext));
                    save_frame(&frame, &output_path)?;
                    println!("Saved frame number {}", frame_num);
                    saved += 1;
                }
                frame_num += 1;
            }
            Ok(None) => break, // EOF
            Err(err) => {
                log::warn!("Decoding error after frame {}: {:#}", frame_num, err);
                break;
            }
        }
    }

    Ok(saved)
}

/// `<prefix>_frame_<index>.<ext>`, or plain `frame_<index>.<ext>` when no
/// prefix disambiguation is wanted (flat mode).
pub fn frame_file_name(prefix: &str, index: u32, image_ext: &str) -> String {
    if prefix.is_empty() {
        format!("frame_{}.{}", index, image_ext)
    } else {
        format!("{}_frame_{}.{}", prefix, index, image_ext)
    }
}

fn save_frame(frame: &FrameData, path: &Path) -> Result<()> {
    let img: RgbImage = RgbImage::from_raw(frame.width, frame.height, frame.buffer.clone())
        .context("Frame buffer does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::fs;
    use std::path::PathBuf;

    /// Fixed number of 2x2 frames, fill value = frame index.
    struct SyntheticFrames {
        total: u32,
        produced: u32,
    }

    impl SyntheticFrames {
        fn new(total: u32) -> Self {
            Self { total, produced: 0 }
        }
    }

    impl FrameSource for SyntheticFrames {
        fn next_frame(&mut self) -> Result<Option<FrameData>> {
            if self.produced == self.total {
                return Ok(None);
            }
            let fill = self.produced as u8;
            self.produced += 1;
            Ok(Some(FrameData::new(vec![fill; 2 * 2 * 3], 2, 2)))
        }
    }

    /// One good frame, then the stream breaks.
    struct BrokenStream {
        produced: u32,
    }

    impl FrameSource for BrokenStream {
        fn next_frame(&mut self) -> Result<Option<FrameData>> {
            if self.produced == 0 {
                self.produced += 1;
                return Ok(Some(FrameData::new(vec![0; 2 * 2 * 3], 2, 2)));
            }
            Err(anyhow!("stream went away"))
        }
    }

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn saved_names(dir: &PathBuf) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_every_nth_frame_is_saved() {
        let dir = scratch("frameset_test_sampler_nth");

        // 7 frames, interval 3 -> ceil(7/3) = 3 images at 0, 3, 6
        let saved = sample_frames(SyntheticFrames::new(7), &dir, 3, "open0", "jpg").unwrap();

        assert_eq!(saved, 3);
        assert_eq!(
            saved_names(&dir),
            vec!["open0_frame_0.jpg", "open0_frame_3.jpg", "open0_frame_6.jpg"]
        );
    }

    #[test]
    fn test_three_frames_interval_two() {
        let dir = scratch("frameset_test_sampler_clip");

        let saved = sample_frames(SyntheticFrames::new(3), &dir, 2, "", "png").unwrap();

        assert_eq!(saved, 2);
        assert_eq!(saved_names(&dir), vec!["frame_0.png", "frame_2.png"]);
    }

    #[test]
    fn test_interval_one_keeps_everything() {
        let dir = scratch("frameset_test_sampler_all");

        let saved = sample_frames(SyntheticFrames::new(4), &dir, 1, "bg0", "jpg").unwrap();

        assert_eq!(saved, 4);
    }

    #[test]
    fn test_empty_stream_saves_nothing() {
        let dir = scratch("frameset_test_sampler_empty");

        let saved = sample_frames(SyntheticFrames::new(0), &dir, 2, "", "png").unwrap();

        assert_eq!(saved, 0);
        assert!(saved_names(&dir).is_empty());
    }

    #[test]
    fn test_decode_error_ends_loop_quietly() {
        let dir = scratch("frameset_test_sampler_broken");

        // Frame 0 lands before the stream breaks; no error surfaces
        let saved = sample_frames(BrokenStream { produced: 0 }, &dir, 1, "", "png").unwrap();

        assert_eq!(saved, 1);
        assert_eq!(saved_names(&dir), vec!["frame_0.png"]);
    }

    #[test]
    fn test_rerun_on_cleared_directory_is_idempotent() {
        let dir = scratch("frameset_test_sampler_idem");

        sample_frames(SyntheticFrames::new(5), &dir, 2, "fist1", "jpg").unwrap();
        let first = saved_names(&dir);

        let dir = scratch("frameset_test_sampler_idem");
        sample_frames(SyntheticFrames::new(5), &dir, 2, "fist1", "jpg").unwrap();

        assert_eq!(first, saved_names(&dir));
    }
}
