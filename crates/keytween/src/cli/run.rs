//! Command handlers.

use keytween_media::{GifAssembler, ProcessRunner, VideoToolConfig};
use keytween_models::OpenAiFactory;
use keytween_pipeline::{
    GenerateCommand, Orchestrator, PromptsCommand, TracingReporter, TweenConfig,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};

type CliOrchestrator = Orchestrator<OpenAiFactory, ProcessRunner, TracingReporter>;

fn orchestrator(config: TweenConfig) -> CliOrchestrator {
    let factory = OpenAiFactory::new(config.openai_settings());
    Orchestrator::new(
        config,
        VideoToolConfig::from_env(),
        factory,
        ProcessRunner,
        TracingReporter,
    )
}

/// Runs the full pipeline and prints a summary.
#[instrument(skip(command, output_root))]
pub async fn run_generate(
    command: GenerateCommand,
    output_root: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = TweenConfig::load()?;
    let mut orchestrator = orchestrator(config);
    if let Some(root) = output_root {
        orchestrator = orchestrator.with_output_root(root);
    }

    let report = command.execute(&orchestrator).await?;

    for transition in report.prompts() {
        println!("{}:", transition.label());
        for (n, prompt) in transition.prompts().iter().enumerate() {
            println!("  {}. {}", n + 1, prompt);
        }
    }
    println!(
        "Wrote {} frames to {}",
        report.frames().len(),
        orchestrator.output_root().join("tween_output/frames").display()
    );
    println!("GIF saved to {}", report.gif_path().display());
    if let Some(video) = report.video_path() {
        println!("Video saved to {}", video.display());
    }
    Ok(())
}

/// Prints the prompts for one transition.
#[instrument(skip(command))]
pub async fn run_prompts(command: PromptsCommand) -> anyhow::Result<()> {
    let config = TweenConfig::load()?;
    let prompts = command.execute(&orchestrator(config)).await?;

    for (n, prompt) in prompts.iter().enumerate() {
        println!("{}. {}", n + 1, prompt);
    }
    Ok(())
}

/// Assembles existing frames into a GIF.
#[instrument(skip(frames, output), fields(frames = frames.len(), output = %output.display()))]
pub async fn run_assemble(
    frames: Vec<PathBuf>,
    output: &Path,
    delay_ms: Option<u64>,
) -> anyhow::Result<()> {
    let delay = match delay_ms {
        Some(ms) => Duration::from_millis(ms),
        None => TweenConfig::load()?.animation().frame_delay(),
    };

    let target = output.to_path_buf();
    tokio::task::spawn_blocking(move || GifAssembler::new(delay).assemble(&frames, &target))
        .await??;

    info!("Assembled animation");
    println!("GIF saved to {}", output.display());
    Ok(())
}
