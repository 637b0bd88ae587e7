//! Core data types for Keytween.
//!
//! This crate provides the foundation data types shared by the provider
//! clients, the output bundle, and the orchestration pipeline.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod frame;
mod image_request;
mod input;
mod keyframe;
mod media;
mod message;
mod output;
mod prompt;
mod request;
mod role;

pub use frame::{Frame, FrameOrigin};
pub use image_request::{ImageRequest, ImageRequestBuilder};
pub use input::Input;
pub use keyframe::{Keyframes, Transition};
pub use media::{MediaSource, mime_from_extension};
pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use prompt::Prompt;
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateResponse, GenerateResponseBuilder,
};
pub use role::Role;
