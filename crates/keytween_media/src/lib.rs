//! Media assembly for Keytween.
//!
//! - [`GifAssembler`] encodes an ordered frame list into a looping GIF.
//! - [`CommandRunner`] is the seam for every external process; the default
//!   [`ProcessRunner`] spawns real binaries, tests substitute a recorder.
//! - [`VideoTweener`] drives a first-last-frame-to-video model and `ffmpeg`
//!   through a runner. It is only usable when [`VideoToolConfig`] names both
//!   the tool and the model directory.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gif;
mod runner;
mod video;

pub use gif::GifAssembler;
pub use runner::{CommandInvocation, CommandRunner, ProcessRunner};
pub use video::{
    FLF2V_MODEL_DIR_VAR, VideoSettings, VideoToolConfig, VideoTools, VideoTweener, WAN2_DIR_VAR,
    concat_list,
};
