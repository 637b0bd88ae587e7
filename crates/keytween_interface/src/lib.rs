//! Trait definitions for Keytween.
//!
//! This crate defines the seams between the tweening pipeline and the
//! external generation services:
//!
//! - [`TweenDriver`] - multimodal completion (keyframes in, prompt list out)
//! - [`ImageSynthesis`] - one image per prompt
//! - [`Vision`] - image-input limits of a completion backend
//! - [`BackendFactory`] - binds a run's credentials to a backend

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{BackendFactory, ImageSynthesis, TweenBackend, TweenDriver, Vision};
