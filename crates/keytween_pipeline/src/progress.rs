//! Progress events and reporters.

use crate::RunStage;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Something worth telling the user about a run.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum RunEvent {
    /// The run moved to a new stage
    #[display("Entering {}", _0)]
    StageEntered(RunStage),
    /// Prompts came back for a transition
    #[display("Generated {} prompts for {}", count, transition)]
    PromptsGenerated {
        /// Transition label, e.g. `start->middle`
        transition: String,
        /// Number of usable prompts
        count: usize,
    },
    /// The backend returned a different number of prompts than requested
    #[display("Expected {} prompts for {} but got {}", expected, transition, actual)]
    PromptCountMismatch {
        /// Transition label
        transition: String,
        /// Requested frame count
        expected: usize,
        /// Prompts actually parsed
        actual: usize,
    },
    /// A batch of frames was written
    #[display("Wrote {} frames, next index {}", count, next_index)]
    FramesWritten {
        /// Frames in the batch
        count: usize,
        /// Index the next frame will take
        next_index: usize,
    },
    /// The GIF was written
    #[display("GIF saved to {}", _0.display())]
    AnimationSaved(PathBuf),
    /// The MP4 was written
    #[display("Video saved to {}", _0.display())]
    VideoSaved(PathBuf),
    /// Video tooling is not configured
    #[display("WAN2_DIR and FLF2V_MODEL_DIR must be set to generate video")]
    VideoSkipped,
    /// The run finished
    #[display("Run complete with {} frames", frames)]
    Completed {
        /// Total frames in the sequence
        frames: usize,
    },
    /// The run stopped on an error
    #[display("Error: {}", message)]
    Failed {
        /// Stage that was running
        stage: RunStage,
        /// Error text, verbatim
        message: String,
    },
}

/// Receives run events as they happen.
pub trait ProgressReporter: Send + Sync {
    /// Handle one event.
    fn report(&self, event: &RunEvent);
}

/// Writes run events to the `tracing` log at a level matching their severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn report(&self, event: &RunEvent) {
        match event {
            RunEvent::PromptCountMismatch { .. } | RunEvent::VideoSkipped => warn!("{}", event),
            RunEvent::Failed { stage, .. } => error!(stage = %stage, "{}", event),
            _ => info!("{}", event),
        }
    }
}

impl<P: ProgressReporter + ?Sized> ProgressReporter for &P {
    fn report(&self, event: &RunEvent) {
        (**self).report(event)
    }
}
