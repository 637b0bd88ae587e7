//! Run orchestration for Keytween.
//!
//! A run takes three keyframes and produces the sequence
//! `start, tweens(start->middle), middle, tweens(middle->end), end`:
//!
//! 1. [`PromptGenerator`] asks a multimodal completion backend for numbered
//!    descriptions of the in-between states, parsed by [`parse_prompt_list`].
//! 2. [`ImageSynthesizer`] renders one frame per prompt into the output bundle.
//! 3. The frames are assembled into a looping GIF and, when the video tools
//!    are configured, into an interpolated MP4.
//!
//! [`Orchestrator`] drives these steps strictly in order, reporting each
//! [`RunStage`] to a [`ProgressReporter`].
//!
//! # Example
//!
//! ```no_run
//! use keytween_media::{ProcessRunner, VideoToolConfig};
//! use keytween_models::OpenAiFactory;
//! use keytween_pipeline::{GenerateCommand, Orchestrator, TracingReporter, TweenConfig};
//!
//! # async fn example() -> keytween_error::KeytweenResult<()> {
//! let config = TweenConfig::load()?;
//! let factory = OpenAiFactory::new(config.openai_settings());
//! let orchestrator = Orchestrator::new(
//!     config,
//!     VideoToolConfig::from_env(),
//!     factory,
//!     ProcessRunner,
//!     TracingReporter,
//! );
//!
//! let command = GenerateCommand::new("start.png", "middle.png", "end.png", 2)
//!     .with_api_key("sk-...");
//! let report = command.execute(&orchestrator).await?;
//! println!("GIF saved to {}", report.gif_path().display());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod commands;
mod config;
mod orchestrator;
mod parse;
mod progress;
mod prompts;
mod stage;
mod synth;

pub use commands::{GenerateCommand, MAX_FRAMES_PER_TRANSITION, PromptsCommand};
pub use config::{AnimationConfig, CompletionConfig, ImageConfig, TweenConfig};
pub use orchestrator::{Orchestrator, RunReport, TransitionPrompts};
pub use parse::parse_prompt_list;
pub use progress::{ProgressReporter, RunEvent, TracingReporter};
pub use prompts::{PromptGenerator, SYSTEM_INSTRUCTION};
pub use stage::RunStage;
pub use synth::ImageSynthesizer;
