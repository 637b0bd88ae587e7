//! Single-run state machine.

use crate::{
    GenerateCommand, ImageSynthesizer, ProgressReporter, PromptGenerator, PromptsCommand,
    RunEvent, RunStage, TweenConfig,
};
use derive_getters::Getters;
use keytween_core::{Frame, Prompt, Transition};
use keytween_error::{KeytweenError, KeytweenResult, MediaError, MediaErrorKind};
use keytween_interface::{BackendFactory, TweenBackend};
use keytween_media::{CommandRunner, GifAssembler, VideoToolConfig, VideoTweener};
use keytween_storage::{FrameStore, OutputLayout};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Prompts produced for one transition.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct TransitionPrompts {
    label: String,
    requested: u32,
    prompts: Vec<Prompt>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct RunReport {
    /// Every frame of the sequence, in order
    frames: Vec<Frame>,
    /// The assembled GIF
    gif_path: PathBuf,
    /// The joined MP4, when video tools were configured
    video_path: Option<PathBuf>,
    /// Prompts per transition, start->middle first
    prompts: Vec<TransitionPrompts>,
}

#[derive(Debug, Default)]
struct RunState {
    stage: RunStage,
    next_index: usize,
    frames: Vec<Frame>,
    prompts: Vec<TransitionPrompts>,
}

fn absolute_root(root: PathBuf) -> PathBuf {
    std::path::absolute(&root).unwrap_or(root)
}

/// Drives a run from keyframes to GIF (and optionally video).
///
/// Steps run one after another; the first error stops the run, is reported
/// as [`RunEvent::Failed`], and is returned unchanged. Inputs are validated
/// and the backend connected before anything is written.
pub struct Orchestrator<F, R, P> {
    config: TweenConfig,
    video_tools: VideoToolConfig,
    output_root: PathBuf,
    factory: F,
    runner: R,
    reporter: P,
}

impl<F, R, P> Orchestrator<F, R, P>
where
    F: BackendFactory,
    R: CommandRunner,
    P: ProgressReporter,
{
    /// Creates an orchestrator writing under the current working directory.
    pub fn new(
        config: TweenConfig,
        video_tools: VideoToolConfig,
        factory: F,
        runner: R,
        reporter: P,
    ) -> Self {
        Self {
            config,
            video_tools,
            output_root: absolute_root(PathBuf::from(".")),
            factory,
            runner,
            reporter,
        }
    }

    /// Writes the output bundle under `root` instead of the working directory.
    ///
    /// A relative `root` is resolved against the current working directory
    /// here, since video tools run from their own directory.
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = absolute_root(root.into());
        self
    }

    /// Run configuration.
    pub fn config(&self) -> &TweenConfig {
        &self.config
    }

    /// Directory holding `tween_output/`.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Runs the full pipeline for `command`.
    #[instrument(skip(self, command), fields(frames = command.frames(), root = %self.output_root.display()))]
    pub async fn generate(&self, command: &GenerateCommand) -> KeytweenResult<RunReport> {
        let mut state = RunState::default();
        let result = self.run(command, &mut state).await;
        self.finish(result, state.stage)
    }

    /// Generates prompts for one transition without rendering frames.
    #[instrument(skip(self, command), fields(frames = command.frames()))]
    pub async fn prompts(&self, command: &PromptsCommand) -> KeytweenResult<Vec<Prompt>> {
        let mut state = RunState::default();
        let result = self.prompts_only(command, &mut state).await;
        self.finish(result, state.stage)
    }

    fn finish<T>(&self, result: KeytweenResult<T>, stage: RunStage) -> KeytweenResult<T> {
        if let Err(e) = &result {
            self.reporter.report(&RunEvent::Failed {
                stage,
                message: e.to_string(),
            });
        }
        result
    }

    fn enter(&self, state: &mut RunState, stage: RunStage) {
        debug!(from = %state.stage, to = %stage, "Stage transition");
        state.stage = stage;
        self.reporter.report(&RunEvent::StageEntered(stage));
    }

    async fn prompts_only(
        &self,
        command: &PromptsCommand,
        state: &mut RunState,
    ) -> KeytweenResult<Vec<Prompt>> {
        let (from, to, api_key) = command.validate()?;
        let backend = self.factory.connect(api_key)?;
        let transition = Transition::new("from->to", from, to, *command.frames());

        self.enter(state, RunStage::GeneratePromptsAB);
        let prompts = self.request_prompts(&backend, &transition).await?;
        self.enter(state, RunStage::Done);
        Ok(prompts)
    }

    async fn run(
        &self,
        command: &GenerateCommand,
        state: &mut RunState,
    ) -> KeytweenResult<RunReport> {
        let (keyframes, api_key) = command.validate()?;
        let backend = self.factory.connect(api_key)?;
        let [start_to_middle, middle_to_end] = keyframes.transitions(*command.frames());
        let generator = PromptGenerator::new(&backend, self.config.completion());
        for transition in [&start_to_middle, &middle_to_end] {
            generator.check_images(transition.from(), transition.to())?;
        }

        let store = FrameStore::create(OutputLayout::new(&self.output_root)).await?;

        self.enter(state, RunStage::CopyStartFrame);
        let start_frame = self.copy_keyframe(&store, keyframes.start(), state).await?;

        self.tween(
            &backend,
            &store,
            &start_to_middle,
            (RunStage::GeneratePromptsAB, RunStage::SynthesizeImagesAB),
            state,
        )
        .await?;

        self.enter(state, RunStage::CopyMiddleFrame);
        let middle_frame = self.copy_keyframe(&store, keyframes.middle(), state).await?;

        self.tween(
            &backend,
            &store,
            &middle_to_end,
            (RunStage::GeneratePromptsBC, RunStage::SynthesizeImagesBC),
            state,
        )
        .await?;

        self.enter(state, RunStage::CopyEndFrame);
        let end_frame = self.copy_keyframe(&store, keyframes.end(), state).await?;

        self.enter(state, RunStage::AssembleAnimation);
        let gif_path = self.assemble(store.layout(), &state.frames).await?;
        self.reporter
            .report(&RunEvent::AnimationSaved(gif_path.clone()));

        let video_path = self
            .render_video(store.layout(), [&start_frame, &middle_frame, &end_frame], state)
            .await?;

        self.enter(state, RunStage::Done);
        self.reporter.report(&RunEvent::Completed {
            frames: state.frames.len(),
        });

        Ok(RunReport {
            frames: std::mem::take(&mut state.frames),
            gif_path,
            video_path,
            prompts: std::mem::take(&mut state.prompts),
        })
    }

    async fn copy_keyframe(
        &self,
        store: &FrameStore,
        source: &Path,
        state: &mut RunState,
    ) -> KeytweenResult<Frame> {
        let frame = store.copy_keyframe(source, state.next_index).await?;
        state.next_index += 1;
        state.frames.push(frame.clone());
        Ok(frame)
    }

    async fn request_prompts<B: TweenBackend>(
        &self,
        backend: &B,
        transition: &Transition,
    ) -> KeytweenResult<Vec<Prompt>> {
        let generator = PromptGenerator::new(backend, self.config.completion());
        let prompts = generator
            .generate(transition.from(), transition.to(), *transition.count())
            .await?;

        self.reporter.report(&RunEvent::PromptsGenerated {
            transition: transition.label().clone(),
            count: prompts.len(),
        });
        if prompts.len() != *transition.count() as usize {
            self.reporter.report(&RunEvent::PromptCountMismatch {
                transition: transition.label().clone(),
                expected: *transition.count() as usize,
                actual: prompts.len(),
            });
        }
        Ok(prompts)
    }

    async fn tween<B: TweenBackend>(
        &self,
        backend: &B,
        store: &FrameStore,
        transition: &Transition,
        (prompt_stage, synth_stage): (RunStage, RunStage),
        state: &mut RunState,
    ) -> KeytweenResult<()> {
        self.enter(state, prompt_stage);
        let prompts = self.request_prompts(backend, transition).await?;

        self.enter(state, synth_stage);
        let frames = ImageSynthesizer::new(backend, store)
            .synthesize(&prompts, state.next_index)
            .await?;
        state.next_index += frames.len();
        self.reporter.report(&RunEvent::FramesWritten {
            count: frames.len(),
            next_index: state.next_index,
        });
        state.frames.extend(frames);

        state.prompts.push(TransitionPrompts {
            label: transition.label().clone(),
            requested: *transition.count(),
            prompts,
        });
        Ok(())
    }

    async fn assemble(&self, layout: &OutputLayout, frames: &[Frame]) -> KeytweenResult<PathBuf> {
        let paths: Vec<PathBuf> = frames.iter().map(|f| f.path().clone()).collect();
        let gif_path = layout.gif_path();
        let target = gif_path.clone();
        let assembler = GifAssembler::new(self.config.animation().frame_delay());

        tokio::task::spawn_blocking(move || assembler.assemble(&paths, &target))
            .await
            .map_err(|e| KeytweenError::from(MediaError::new(MediaErrorKind::Task(e.to_string()))))??;

        Ok(gif_path)
    }

    async fn render_video(
        &self,
        layout: &OutputLayout,
        [start, middle, end]: [&Frame; 3],
        state: &mut RunState,
    ) -> KeytweenResult<Option<PathBuf>> {
        let Some(tools) = self.video_tools.tools() else {
            self.reporter.report(&RunEvent::VideoSkipped);
            return Ok(None);
        };

        self.enter(state, RunStage::VideoStage);
        let tweener = VideoTweener::new(&self.runner, tools, self.config.video().clone());

        let segments = vec![layout.segment_path(1), layout.segment_path(2)];
        tweener
            .synthesize_segment(start.path(), middle.path(), &segments[0])
            .await?;
        tweener
            .synthesize_segment(middle.path(), end.path(), &segments[1])
            .await?;

        let video_path = layout.video_path();
        tweener.combine(&segments, &video_path).await?;
        self.reporter.report(&RunEvent::VideoSaved(video_path.clone()));

        Ok(Some(video_path))
    }
}
