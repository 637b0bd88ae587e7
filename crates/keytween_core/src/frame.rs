//! Frames of the output sequence.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a frame's pixels came from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum FrameOrigin {
    /// A user keyframe copied into the bundle
    #[display("keyframe")]
    Keyframe,
    /// An image synthesized from a tween prompt
    #[display("synthesized")]
    Synthesized,
}

/// An image file at a fixed position in the animation.
///
/// The index is encoded in the file name, so sorting frame files by name
/// reproduces the animation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Frame {
    /// Position in the final sequence, starting at zero
    index: usize,
    /// Location of the frame file
    path: PathBuf,
    /// Copied keyframe or synthesized tween
    origin: FrameOrigin,
}

impl Frame {
    /// Creates a frame record.
    pub fn new(index: usize, path: impl Into<PathBuf>, origin: FrameOrigin) -> Self {
        Self {
            index,
            path: path.into(),
            origin,
        }
    }
}
