//! Fixed output directory layout.

use derive_getters::Getters;
use std::path::{Path, PathBuf};

/// Digits in a frame file index. Fixed width keeps lexicographic order equal
/// to sequence order.
pub const FRAME_INDEX_WIDTH: usize = 3;

/// Frames one bundle can hold at [`FRAME_INDEX_WIDTH`] digits.
pub const MAX_FRAMES: usize = 10usize.pow(FRAME_INDEX_WIDTH as u32);

/// File name for the frame at `index`.
///
/// # Examples
///
/// ```
/// use keytween_storage::frame_file_name;
///
/// assert_eq!(frame_file_name(0), "frame_000.png");
/// assert_eq!(frame_file_name(42), "frame_042.png");
/// ```
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{:0width$}.png", index, width = FRAME_INDEX_WIDTH)
}

/// Paths of one output bundle.
///
/// # Examples
///
/// ```
/// use keytween_storage::OutputLayout;
/// use std::path::Path;
///
/// let layout = OutputLayout::new("/work");
/// assert_eq!(layout.out_dir(), Path::new("/work/tween_output"));
/// assert_eq!(layout.frame_path(7), Path::new("/work/tween_output/frames/frame_007.png"));
/// assert_eq!(layout.segment_path(2), Path::new("/work/tween_output/segment_02.mp4"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct OutputLayout {
    /// `<root>/tween_output`
    out_dir: PathBuf,
    /// `<root>/tween_output/frames`
    frames_dir: PathBuf,
}

impl OutputLayout {
    /// Name of the bundle directory below the output root.
    pub const OUTPUT_DIR: &'static str = "tween_output";

    /// Lays out a bundle below `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let out_dir = root.as_ref().join(Self::OUTPUT_DIR);
        let frames_dir = out_dir.join("frames");
        Self {
            out_dir,
            frames_dir,
        }
    }

    /// Path of the frame at `index`.
    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.frames_dir.join(frame_file_name(index))
    }

    /// Path of the assembled GIF.
    pub fn gif_path(&self) -> PathBuf {
        self.out_dir.join("tween.gif")
    }

    /// Path of the video segment for the `number`-th transition, counting from 1.
    pub fn segment_path(&self, number: usize) -> PathBuf {
        self.out_dir.join(format!("segment_{:02}.mp4", number))
    }

    /// Path of the concatenated video.
    pub fn video_path(&self) -> PathBuf {
        self.out_dir.join("tween.mp4")
    }
}
