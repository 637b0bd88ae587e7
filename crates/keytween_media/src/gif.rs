//! Animated GIF assembly.

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use keytween_error::{KeytweenResult, MediaError, MediaErrorKind};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Encodes frame files into a looping animated GIF.
///
/// Frames are expected to share dimensions; nothing is resized, so a
/// mismatch surfaces as whatever the encoder makes of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GifAssembler {
    frame_delay: Duration,
}

impl GifAssembler {
    /// Creates an assembler showing each frame for `frame_delay`.
    pub fn new(frame_delay: Duration) -> Self {
        Self { frame_delay }
    }

    /// Per-frame display time.
    pub fn frame_delay(&self) -> Duration {
        self.frame_delay
    }

    /// Writes `frames`, in order, to a GIF at `output` that loops forever.
    ///
    /// Every frame is decoded and encoded before `output` is touched, so a
    /// failure leaves any existing file in place.
    ///
    /// This decodes and encodes synchronously; async callers should run it
    /// on a blocking thread.
    ///
    /// # Errors
    ///
    /// Returns error if `frames` is empty, a frame cannot be decoded, or the
    /// output cannot be written.
    #[instrument(skip(self, frames, output), fields(frames = frames.len(), output = %output.display()))]
    pub fn assemble(&self, frames: &[PathBuf], output: &Path) -> KeytweenResult<()> {
        if frames.is_empty() {
            return Err(MediaError::new(MediaErrorKind::EmptySequence("frames".to_string())).into());
        }

        let decoded = frames
            .iter()
            .map(|path| {
                image::open(path)
                    .map(|image| image.to_rgba8())
                    .map_err(|e| {
                        MediaError::new(MediaErrorKind::Decode(format!(
                            "{}: {}",
                            path.display(),
                            e
                        )))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut bytes);
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| MediaError::new(MediaErrorKind::Encode(e.to_string())))?;

            let delay = Delay::from_saturating_duration(self.frame_delay);
            for (path, rgba) in frames.iter().zip(decoded) {
                debug!(frame = %path.display(), width = rgba.width(), height = rgba.height(), "Encoding frame");
                encoder
                    .encode_frame(Frame::from_parts(rgba, 0, 0, delay))
                    .map_err(|e| {
                        MediaError::new(MediaErrorKind::Encode(format!(
                            "{}: {}",
                            path.display(),
                            e
                        )))
                    })?;
            }
            // The GIF trailer is written when the encoder is dropped.
        }

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MediaError::new(MediaErrorKind::Encode(format!("{}: {}", parent.display(), e)))
            })?;
        }
        std::fs::write(output, &bytes).map_err(|e| {
            MediaError::new(MediaErrorKind::Encode(format!("{}: {}", output.display(), e)))
        })?;

        info!("Assembled animation");
        Ok(())
    }
}

impl Default for GifAssembler {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}
