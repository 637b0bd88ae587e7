//! Error types for Keytween.
//!
//! This crate provides the foundation error types used throughout the Keytween workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Two conditions in a run are deliberately *not* errors: a prompt list whose
//! length differs from the requested frame count, and a missing video tool
//! configuration. Both are reported as log notices by the pipeline.
//!
//! # Examples
//!
//! ```
//! use keytween_error::{KeytweenResult, ValidationError};
//!
//! fn check_key(key: &str) -> KeytweenResult<()> {
//!     if key.trim().is_empty() {
//!         Err(ValidationError::new("API key is required"))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_key("").is_err());
//! assert!(check_key("sk-test").is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod command;
mod config;
mod error;
mod media;
mod openai;
mod storage;
mod validation;

pub use backend::BackendError;
pub use command::CommandError;
pub use config::ConfigError;
pub use error::{KeytweenError, KeytweenErrorKind, KeytweenResult};
pub use media::{MediaError, MediaErrorKind};
pub use openai::{OpenAiError, OpenAiErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use validation::ValidationError;
