//! Keytween CLI binary.
//!
//! This binary provides command-line access to Keytween:
//! - Generate a tweened GIF (and optional video) from three keyframes
//! - Preview the prompts for one transition
//! - Assemble existing frames into a GIF

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::{Cli, Commands, run_assemble, run_generate, run_prompts};
    use keytween_pipeline::{GenerateCommand, PromptsCommand};

    // Pick up OPENAI_API_KEY and the video tool paths from .env
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Execute the requested command
    let result = match cli.command {
        Commands::Generate {
            start,
            middle,
            end,
            frames,
            api_key,
            output_root,
        } => {
            let command = GenerateCommand::from_inputs(start, middle, end, frames, api_key);
            run_generate(command, output_root).await
        }

        Commands::Prompts {
            from,
            to,
            frames,
            api_key,
        } => {
            let command = PromptsCommand::from_inputs(from, to, frames, api_key);
            run_prompts(command).await
        }

        Commands::Assemble {
            output,
            delay_ms,
            frames,
        } => run_assemble(frames, &output, delay_ms).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
