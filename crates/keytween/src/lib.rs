//! Keytween - keyframe tweening with generative models
//!
//! Keytween takes three keyframe images (start, middle, end), asks a
//! multimodal model to describe the in-between states of each transition,
//! renders those descriptions with an image model, and assembles the whole
//! sequence into a looping GIF. When a first-last-frame video model is
//! installed it also renders and joins MP4 segments.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use keytween::{
//!     GenerateCommand, OpenAiFactory, Orchestrator, ProcessRunner, TracingReporter,
//!     TweenConfig, VideoToolConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TweenConfig::load()?;
//!     let factory = OpenAiFactory::new(config.openai_settings());
//!     let orchestrator = Orchestrator::new(
//!         config,
//!         VideoToolConfig::from_env(),
//!         factory,
//!         ProcessRunner,
//!         TracingReporter,
//!     );
//!
//!     let report = GenerateCommand::new("start.png", "middle.png", "end.png", 2)
//!         .with_api_key(std::env::var("OPENAI_API_KEY")?)
//!         .execute(&orchestrator)
//!         .await?;
//!
//!     println!("{} frames, GIF at {}", report.frames().len(), report.gif_path().display());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Keytween is organized as a workspace with focused crates:
//!
//! - `keytween_error` - Error types
//! - `keytween_core` - Core data types (Input, Output, Frame, etc.)
//! - `keytween_interface` - TweenDriver and ImageSynthesis traits
//! - `keytween_models` - OpenAI-compatible provider
//! - `keytween_storage` - Output bundle layout
//! - `keytween_media` - GIF assembly and external video tooling
//! - `keytween_pipeline` - Prompt generation, synthesis, and orchestration
//!
//! This crate (`keytween`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Re-export error types
pub use keytween_error::{
    BackendError, CommandError, ConfigError, KeytweenError, KeytweenErrorKind, KeytweenResult,
    MediaError, MediaErrorKind, OpenAiError, OpenAiErrorKind, StorageError, StorageErrorKind,
    ValidationError,
};

// Re-export core types
pub use keytween_core::{
    Frame, FrameOrigin, GenerateRequest, GenerateResponse, ImageRequest, Input, Keyframes,
    MediaSource, Message, Output, Prompt, Role, Transition, mime_from_extension,
};

// Re-export traits
pub use keytween_interface::{BackendFactory, ImageSynthesis, TweenBackend, TweenDriver, Vision};

// Re-export provider
pub use keytween_models::{OpenAiClient, OpenAiFactory, OpenAiSettings};

// Re-export storage
pub use keytween_storage::{FrameStore, OutputLayout, frame_file_name};

// Re-export media
pub use keytween_media::{
    CommandInvocation, CommandRunner, GifAssembler, ProcessRunner, VideoSettings,
    VideoToolConfig, VideoTweener,
};

// Re-export pipeline
pub use keytween_pipeline::{
    GenerateCommand, ImageSynthesizer, Orchestrator, ProgressReporter, PromptGenerator,
    PromptsCommand, RunEvent, RunReport, RunStage, TracingReporter, TransitionPrompts,
    TweenConfig, parse_prompt_list,
};
