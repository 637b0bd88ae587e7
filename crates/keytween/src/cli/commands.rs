//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Keytween - tween between keyframes with generative models
#[derive(Parser, Debug)]
#[command(name = "keytween")]
#[command(about = "Generate in-between frames for three keyframes and assemble them into a GIF", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline: prompts, frames, GIF, and optional video
    Generate {
        /// Start keyframe
        #[arg(long)]
        start: Option<PathBuf>,

        /// Middle keyframe
        #[arg(long)]
        middle: Option<PathBuf>,

        /// End keyframe
        #[arg(long)]
        end: Option<PathBuf>,

        /// In-between frames per transition
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=10))]
        frames: u32,

        /// OpenAI API key
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Directory that will hold `tween_output/` (defaults to the working directory)
        #[arg(long)]
        output_root: Option<PathBuf>,
    },

    /// Print the prompts for a single transition without rendering anything
    Prompts {
        /// First image
        #[arg(long)]
        from: Option<PathBuf>,

        /// Second image
        #[arg(long)]
        to: Option<PathBuf>,

        /// Number of prompts to request
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=10))]
        frames: u32,

        /// OpenAI API key
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Assemble existing frames into a looping GIF
    Assemble {
        /// Output GIF path
        #[arg(long)]
        output: PathBuf,

        /// Frame delay in milliseconds (defaults to the configured value)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Frames, in display order
        #[arg(required = true)]
        frames: Vec<PathBuf>,
    },
}
