//! Output bundle storage for Keytween.
//!
//! Every run writes into one fixed directory tree below an output root
//! (normally the working directory):
//!
//! ```text
//! tween_output/
//! ├── frames/
//! │   ├── frame_000.png   (start keyframe)
//! │   ├── frame_001.png   (tween)
//! │   └── ...
//! ├── tween.gif
//! ├── segment_01.mp4      (optional)
//! ├── segment_02.mp4      (optional)
//! └── tween.mp4           (optional)
//! ```
//!
//! Runs are not versioned: a new run writes over files whose names it
//! reuses and leaves the rest in place.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod frames;
mod layout;

pub use frames::FrameStore;
pub use layout::{FRAME_INDEX_WIDTH, MAX_FRAMES, OutputLayout, frame_file_name};
