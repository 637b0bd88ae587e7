//! Run stages.

use serde::{Deserialize, Serialize};

/// Where a run is in its fixed sequence of steps.
///
/// Runs advance through the variants in declaration order, from
/// [`RunStage::Idle`] to [`RunStage::Done`], skipping [`RunStage::VideoStage`]
/// when video is disabled. Any failure moves the run to [`RunStage::Failed`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum RunStage {
    /// Not started
    #[default]
    Idle,
    /// Copying the start keyframe
    CopyStartFrame,
    /// Generating start->middle prompts
    #[strum(serialize = "generate_prompts_ab")]
    GeneratePromptsAB,
    /// Synthesizing start->middle frames
    #[strum(serialize = "synthesize_images_ab")]
    SynthesizeImagesAB,
    /// Copying the middle keyframe
    CopyMiddleFrame,
    /// Generating middle->end prompts
    #[strum(serialize = "generate_prompts_bc")]
    GeneratePromptsBC,
    /// Synthesizing middle->end frames
    #[strum(serialize = "synthesize_images_bc")]
    SynthesizeImagesBC,
    /// Copying the end keyframe
    CopyEndFrame,
    /// Writing the GIF
    AssembleAnimation,
    /// Rendering and joining video segments
    VideoStage,
    /// Finished successfully
    Done,
    /// Aborted by an error
    Failed,
}
