//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the keytween binary.

mod commands;
mod run;

pub use commands::{Cli, Commands};
pub use run::{run_assemble, run_generate, run_prompts};
